use chrono::{Duration, NaiveDateTime};

use crate::domain::scheduling::working_hours::WorkingHours;

/// Lunch may start no earlier than three hours into a job...
const EARLIEST_LUNCH_OFFSET_MINUTES: i64 = 180;
/// ...and no later than four hours into it.
const LATEST_LUNCH_OFFSET_MINUTES: i64 = 240;

/// The floating lunch period of one service run. It is anchored to the start
/// of that run, not to a clock time:
/// `[anchor + 3h, anchor + 4h + lunch break]`, closed on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunchWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl LunchWindow {
    pub fn anchored_at(anchor: NaiveDateTime, working_hours: &WorkingHours) -> Self {
        LunchWindow {
            start: anchor + Duration::minutes(EARLIEST_LUNCH_OFFSET_MINUTES),
            end: anchor + Duration::minutes(LATEST_LUNCH_OFFSET_MINUTES) + working_hours.lunch_break_duration(),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn test_window_floats_with_anchor() {
        let hours = WorkingHours::default();

        let from_eight = LunchWindow::anchored_at(at(8, 0), &hours);
        assert_eq!(from_eight.start, at(11, 0));
        assert_eq!(from_eight.end, at(12, 30));

        let from_half_past = LunchWindow::anchored_at(at(8, 30), &hours);
        assert_eq!(from_half_past.start, at(11, 30));
        assert_eq!(from_half_past.end, at(13, 0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let window = LunchWindow::anchored_at(at(8, 0), &WorkingHours::default());
        assert!(window.contains(at(11, 0)));
        assert!(window.contains(at(12, 30)));
        assert!(!window.contains(at(10, 59)));
        assert!(!window.contains(at(12, 31)));
    }
}
