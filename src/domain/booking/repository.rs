use chrono::NaiveDate;

use crate::domain::booking::booking::{Booking, BookingPatch, NewBooking};
use crate::domain::utils::id::BookingId;
use crate::error::Result;

/// Persistence boundary for bookings.
///
/// Implementations are the source of truth for the no-overlap invariant:
/// `create_booking` and interval-moving `update_booking` calls must fail
/// with `Error::SlotConflict` when the interval overlaps another
/// time-blocking booking on the same date. Infrastructure failures surface
/// as `Error::RepositoryUnavailable`.
pub trait BookingRepository: std::fmt::Debug + Send + Sync {
    fn list_bookings(&self) -> Result<Vec<Booking>>;

    fn list_bookings_on(&self, date: NaiveDate) -> Result<Vec<Booking>> {
        Ok(self.list_bookings()?.into_iter().filter(|booking| booking.date == date).collect())
    }

    fn get_booking(&self, id: &BookingId) -> Result<Booking>;

    fn create_booking(&self, booking: NewBooking) -> Result<Booking>;

    fn update_booking(&self, id: &BookingId, patch: BookingPatch) -> Result<Booking>;

    fn delete_booking(&self, id: &BookingId) -> Result<()>;
}
