use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::domain::utils::id::BookingId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scheduler JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write CSV output: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Working hours must start before they end (start: {start}, end: {end})")]
    InvalidWorkingHours { start: NaiveTime, end: NaiveTime },

    #[error("Invalid clock time '{0}', expected HH:mm")]
    InvalidTime(String),

    #[error("Invalid calendar date '{0}', expected yyyy-MM-dd")]
    InvalidDate(String),

    #[error("Invalid scheduler configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),

    /// Another booking took the interval between the availability check and the write.
    #[error("Slot {date} {start_time}-{end_time} is no longer available")]
    SlotConflict { date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime },

    #[error("Booking not found: {0}")]
    BookingNotFound(BookingId),

    #[error("Booking repository unavailable: {0}")]
    RepositoryUnavailable(String),

    #[error("Route lookup failed: {0}")]
    RouteLookupFailed(String),
}

impl Error {
    /// Only write-time slot conflicts may be resolved by refreshing the slots and asking again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::SlotConflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
