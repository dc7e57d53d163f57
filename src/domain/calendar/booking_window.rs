use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::domain::calendar::clock::Clock;
use crate::error::{Error, Result};

/// Which calendar days customers may pick: weekdays from `min_lead_days`
/// after today up to the season's last day of the current year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    min_lead_days: i64,
    last_month: u32,
    last_day: u32,
}

impl BookingWindow {
    pub fn new(min_lead_days: i64, last_month: u32, last_day: u32) -> Result<Self> {
        if min_lead_days < 0 {
            return Err(Error::InvalidConfiguration(format!("minimum lead time must not be negative, got {} days", min_lead_days)));
        }

        // 2000 is a leap year, so Feb 29 passes here and is clamped per year later.
        if NaiveDate::from_ymd_opt(2000, last_month, last_day).is_none() {
            return Err(Error::InvalidConfiguration(format!("invalid season end {}-{}", last_month, last_day)));
        }

        Ok(BookingWindow { min_lead_days, last_month, last_day })
    }

    pub fn earliest(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(self.min_lead_days)
    }

    pub fn latest(&self, today: NaiveDate) -> NaiveDate {
        (1..=self.last_day).rev().find_map(|day| NaiveDate::from_ymd_opt(today.year(), self.last_month, day)).unwrap_or(today)
    }

    pub fn is_selectable(&self, date: NaiveDate, clock: &dyn Clock) -> bool {
        let today = clock.today();

        if date < self.earliest(today) || date > self.latest(today) {
            return false;
        }

        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// All selectable days, in order.
    pub fn selectable_dates(&self, clock: &dyn Clock) -> Vec<NaiveDate> {
        let today = clock.today();
        let latest = self.latest(today);

        self.earliest(today).iter_days().take_while(|date| *date <= latest).filter(|date| self.is_selectable(*date, clock)).collect()
    }
}

impl Default for BookingWindow {
    fn default() -> Self {
        BookingWindow { min_lead_days: 14, last_month: 10, last_day: 31 }
    }
}
