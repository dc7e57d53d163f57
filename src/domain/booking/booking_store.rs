use chrono::{NaiveDate, NaiveTime};
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::booking::booking::{Booking, BookingPatch, NewBooking};
use crate::domain::booking::repository::BookingRepository;
use crate::domain::utils::id::BookingId;
use crate::error::{Error, Result};

new_key_type! {
    struct BookingKey;
}

#[derive(Debug)]
struct StoreInner {
    /// Booking storage.
    slots: SlotMap<BookingKey, Booking>,

    /// Lookup of the internal key by public booking id.
    id_index: HashMap<BookingId, BookingKey>,
}

impl StoreInner {
    /// Checks the no-overlap invariant for `[start, end)` on `date`, ignoring `skip`.
    fn ensure_free(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime, skip: Option<BookingKey>) -> Result<()> {
        let taken = self
            .slots
            .iter()
            .filter(|(key, _)| Some(*key) != skip)
            .any(|(_, booking)| booking.occupies_time() && booking.overlaps(date, start, end));

        if taken {
            return Err(Error::SlotConflict { date, start_time: start, end_time: end });
        }

        Ok(())
    }
}

/// In-memory booking repository.
///
/// Both maps sit behind a single lock, so the overlap check and the insert
/// of `create_booking` happen atomically.
#[derive(Debug, Clone)]
pub struct BookingStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(StoreInner { slots: SlotMap::with_key(), id_index: HashMap::new() })) }
    }

    /// Seeds the store with already persisted bookings. The no-overlap
    /// invariant is not re-checked for them.
    pub fn with_bookings(bookings: Vec<Booking>) -> Result<Self> {
        let store = Self::new();
        {
            let mut guard = store.write()?;
            for booking in bookings {
                let id = booking.id.clone();
                let key = guard.slots.insert(booking);
                guard.id_index.insert(id, key);
            }
        }
        Ok(store)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.slots.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| Error::RepositoryUnavailable("booking store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| Error::RepositoryUnavailable("booking store lock poisoned".to_string()))
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingRepository for BookingStore {
    fn list_bookings(&self) -> Result<Vec<Booking>> {
        let guard = self.read()?;
        let mut bookings: Vec<Booking> = guard.slots.values().cloned().collect();
        bookings.sort_by_key(|booking| (booking.date, booking.start_time));
        Ok(bookings)
    }

    fn get_booking(&self, id: &BookingId) -> Result<Booking> {
        let guard = self.read()?;
        guard.id_index.get(id).and_then(|key| guard.slots.get(*key)).cloned().ok_or_else(|| Error::BookingNotFound(id.clone()))
    }

    fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        if booking.start_time >= booking.end_time {
            return Err(Error::InvalidRequest(format!("booking must end after it starts ({} - {})", booking.start_time, booking.end_time)));
        }

        let mut guard = self.write()?;
        guard.ensure_free(booking.date, booking.start_time, booking.end_time, None)?;

        let booking = Booking::from_new(BookingId::generate(), booking);
        let key = guard.slots.insert(booking.clone());
        guard.id_index.insert(booking.id.clone(), key);

        log::debug!("Stored booking {} on {} {}-{}.", booking.id, booking.date, booking.start_time, booking.end_time);

        Ok(booking)
    }

    fn update_booking(&self, id: &BookingId, patch: BookingPatch) -> Result<Booking> {
        let mut guard = self.write()?;
        let key = *guard.id_index.get(id).ok_or_else(|| Error::BookingNotFound(id.clone()))?;
        let mut updated = guard.slots.get(key).cloned().ok_or_else(|| Error::BookingNotFound(id.clone()))?;

        let was_blocking = updated.occupies_time();
        let moves_interval = patch.moves_interval();
        updated.apply(patch);

        if updated.start_time >= updated.end_time {
            return Err(Error::InvalidRequest(format!("booking must end after it starts ({} - {})", updated.start_time, updated.end_time)));
        }

        // Reactivating a cancelled booking claims its interval again.
        if updated.occupies_time() && (moves_interval || !was_blocking) {
            guard.ensure_free(updated.date, updated.start_time, updated.end_time, Some(key))?;
        }

        if let Some(slot) = guard.slots.get_mut(key) {
            *slot = updated.clone();
        }

        Ok(updated)
    }

    fn delete_booking(&self, id: &BookingId) -> Result<()> {
        let mut guard = self.write()?;
        let key = guard.id_index.remove(id).ok_or_else(|| Error::BookingNotFound(id.clone()))?;
        guard.slots.remove(key);
        Ok(())
    }
}
