use chrono::{NaiveDate, NaiveTime};

use crate::error::{Error, Result};

pub const CLOCK_FORMAT: &str = "%H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an "HH:mm" clock time.
pub fn parse_clock_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|_| Error::InvalidTime(value.to_string()))
}

pub fn format_clock_time(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Parses a "yyyy-MM-dd" calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(value.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_time_round_trip() {
        let time = parse_clock_time("08:30").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(format_clock_time(time), "08:30");
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        assert!(matches!(parse_clock_time("8h30"), Err(Error::InvalidTime(_))));
        assert!(matches!(parse_clock_time("24:00"), Err(Error::InvalidTime(_))));
        assert!(matches!(parse_date("10/06/2024"), Err(Error::InvalidDate(_))));
    }
}
