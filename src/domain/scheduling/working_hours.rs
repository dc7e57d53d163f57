use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::api::config_dto::WorkingHoursDto;
use crate::domain::utils::time_format::parse_clock_time;
use crate::error::{Error, Result};

const DEFAULT_START_HOUR: i64 = 8;
const DEFAULT_END_HOUR: i64 = 17;
const DEFAULT_LUNCH_BREAK_MINUTES: i64 = 30;
const MAX_LUNCH_BREAK_MINUTES: i64 = 24 * 60;

/// Daily opening hours of the cleaning crew. `start < end` holds for every
/// constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    start: NaiveTime,
    end: NaiveTime,

    /// Length of the lunch break in minutes.
    lunch_break_duration: i64,
}

impl WorkingHours {
    pub fn new(start: NaiveTime, end: NaiveTime, lunch_break_duration: i64) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidWorkingHours { start, end });
        }

        if !(0..=MAX_LUNCH_BREAK_MINUTES).contains(&lunch_break_duration) {
            return Err(Error::InvalidConfiguration(format!(
                "lunchBreakDuration must be between 0 and {} minutes, got {}",
                MAX_LUNCH_BREAK_MINUTES, lunch_break_duration
            )));
        }

        Ok(WorkingHours { start, end, lunch_break_duration })
    }

    /// Builds working hours from "HH:mm" strings.
    pub fn parse(start: &str, end: &str, lunch_break_duration: i64) -> Result<Self> {
        Self::new(parse_clock_time(start)?, parse_clock_time(end)?, lunch_break_duration)
    }

    /// Missing fields keep their default value.
    pub fn from_dto(dto: &WorkingHoursDto) -> Result<Self> {
        let default = WorkingHours::default();

        let start = match &dto.start {
            Some(start) => parse_clock_time(start)?,
            None => default.start,
        };
        let end = match &dto.end {
            Some(end) => parse_clock_time(end)?,
            None => default.end,
        };

        Self::new(start, end, dto.lunch_break_duration.unwrap_or(default.lunch_break_duration))
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn lunch_break_duration(&self) -> Duration {
        Duration::minutes(self.lunch_break_duration)
    }

    pub fn opening(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start)
    }

    pub fn closing(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.end)
    }

    /// Closed interval check: opening and closing time themselves count as working time.
    pub fn contains(&self, date: NaiveDate, instant: NaiveDateTime) -> bool {
        self.opening(date) <= instant && instant <= self.closing(date)
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        WorkingHours {
            start: NaiveTime::MIN + Duration::hours(DEFAULT_START_HOUR),
            end: NaiveTime::MIN + Duration::hours(DEFAULT_END_HOUR),
            lunch_break_duration: DEFAULT_LUNCH_BREAK_MINUTES,
        }
    }
}
