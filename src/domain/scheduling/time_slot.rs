use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::api::booking_dto::{SlotReasonDto, TimeSlotDto};
use crate::domain::utils::time_format::{format_clock_time, format_date};

/// Granularity of the offered slot grid.
pub const SLOT_LENGTH_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotReason {
    /// Overlaps an existing booking.
    Booked,

    /// Starts inside the lunch window.
    Lunch,
}

/// A derived, never persisted view of one 30 minute period of a working day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub available: bool,
    pub reason: Option<SlotReason>,
}

impl TimeSlot {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    pub fn to_dto(&self) -> TimeSlotDto {
        TimeSlotDto {
            date: format_date(self.date),
            start_time: format_clock_time(self.start_time),
            end_time: format_clock_time(self.end_time),
            available: self.available,
            reason: self.reason.map(|reason| match reason {
                SlotReason::Booked => SlotReasonDto::Booked,
                SlotReason::Lunch => SlotReasonDto::Lunch,
            }),
        }
    }
}

impl SlotReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotReason::Booked => "booked",
            SlotReason::Lunch => "lunch",
        }
    }
}
