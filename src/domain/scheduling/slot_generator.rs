use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::booking::booking::{Booking, occupied_intervals};
use crate::domain::scheduling::lunch_window::LunchWindow;
use crate::domain::scheduling::time_slot::{SLOT_LENGTH_MINUTES, SlotReason, TimeSlot};
use crate::domain::scheduling::working_hours::WorkingHours;

/// Lays a grid of consecutive 30 minute slots over the working day of `date`
/// and marks every slot that is taken by a booking or falls into lunch.
///
/// Only bookings on `date` that are not cancelled are considered. The last
/// slot must end no later than closing time; a shorter remainder is dropped.
///
/// Lunch is anchored at opening time here because no concrete job is known
/// yet, and only the slot start is tested against it. `can_book` anchors
/// lunch at the job start instead, so a slot offered here can still be
/// refused there.
pub fn generate_slots(date: NaiveDate, existing_bookings: &[Booking], working_hours: &WorkingHours) -> Vec<TimeSlot> {
    let occupied: Vec<(NaiveDateTime, NaiveDateTime)> = occupied_intervals(date, existing_bookings).collect();
    let lunch = LunchWindow::anchored_at(working_hours.opening(date), working_hours);
    let closing = working_hours.closing(date);
    let slot_length = Duration::minutes(SLOT_LENGTH_MINUTES);

    let mut slots = Vec::new();
    let mut current = working_hours.opening(date);

    while current + slot_length <= closing {
        let slot_end = current + slot_length;

        let is_booked = occupied.iter().any(|&(booking_start, booking_end)| slot_hits_booking(current, slot_end, booking_start, booking_end));
        let is_lunch = lunch.contains(current);

        let reason = if is_booked {
            Some(SlotReason::Booked)
        } else if is_lunch {
            Some(SlotReason::Lunch)
        } else {
            None
        };

        slots.push(TimeSlot { date, start_time: current.time(), end_time: slot_end.time(), available: reason.is_none(), reason });

        current = slot_end;
    }

    log::debug!(
        "Generated {} slots for {} ({} occupied intervals, {} available).",
        slots.len(),
        date,
        occupied.len(),
        slots.iter().filter(|slot| slot.available).count()
    );

    slots
}

/// A slot is taken when its start or its end lies in `[booking_start, booking_end)`,
/// or when the booking lies entirely inside the slot. A slot that ends right
/// when a booking starts therefore counts as taken, one that starts right when
/// a booking ends does not.
fn slot_hits_booking(slot_start: NaiveDateTime, slot_end: NaiveDateTime, booking_start: NaiveDateTime, booking_end: NaiveDateTime) -> bool {
    let within = |instant: NaiveDateTime| booking_start <= instant && instant < booking_end;

    within(slot_start) || within(slot_end) || (slot_start < booking_start && booking_end <= slot_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::booking::{Booking, BookingStatus};
    use chrono::NaiveTime;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot_at(slots: &[TimeSlot], h: u32, m: u32) -> &TimeSlot {
        slots.iter().find(|slot| slot.start_time == time(h, m)).unwrap()
    }

    #[test]
    fn test_default_day_has_eighteen_slots() {
        let slots = generate_slots(date(), &[], &WorkingHours::default());

        assert_eq!(slots.len(), 18);
        assert_eq!(slots[0].start_time, time(8, 0));
        assert_eq!(slots[0].end_time, time(8, 30));
        assert_eq!(slots[17].end_time, time(17, 0));
        assert!(slots.windows(2).all(|pair| pair[0].end_time == pair[1].start_time));
    }

    #[test]
    fn test_remainder_shorter_than_a_slot_is_dropped() {
        let hours = WorkingHours::new(time(8, 0), time(9, 45), 30).unwrap();
        let slots = generate_slots(date(), &[], &hours);

        assert_eq!(slots.len(), 3);
        assert_eq!(slots.last().unwrap().end_time, time(9, 30));
    }

    #[test]
    fn test_lunch_is_anchored_at_opening() {
        let slots = generate_slots(date(), &[], &WorkingHours::default());

        // Window is [11:00, 12:30] for 08:00 opening and a 30 minute break.
        for (h, m) in [(11, 0), (11, 30), (12, 0), (12, 30)] {
            let slot = slot_at(&slots, h, m);
            assert!(!slot.available, "slot {:02}:{:02} should be lunch", h, m);
            assert_eq!(slot.reason, Some(SlotReason::Lunch));
        }
        assert!(slot_at(&slots, 10, 30).available);
        assert!(slot_at(&slots, 13, 0).available);
    }

    #[test]
    fn test_booking_blocks_touching_slots() {
        let booking = Booking::interval(date(), time(10, 0), time(11, 0));
        let slots = generate_slots(date(), &[booking], &WorkingHours::default());

        for (h, m) in [(9, 30), (10, 0), (10, 30)] {
            let slot = slot_at(&slots, h, m);
            assert_eq!(slot.reason, Some(SlotReason::Booked), "slot {:02}:{:02} should be booked", h, m);
        }
        assert!(slot_at(&slots, 9, 0).available);
        // 11:00 is free of the booking but starts the lunch window.
        assert_eq!(slot_at(&slots, 11, 0).reason, Some(SlotReason::Lunch));
    }

    #[test]
    fn test_booked_wins_over_lunch() {
        let booking = Booking::interval(date(), time(11, 0), time(12, 0));
        let slots = generate_slots(date(), &[booking], &WorkingHours::default());

        assert_eq!(slot_at(&slots, 11, 0).reason, Some(SlotReason::Booked));
        assert_eq!(slot_at(&slots, 11, 30).reason, Some(SlotReason::Booked));
        assert_eq!(slot_at(&slots, 12, 0).reason, Some(SlotReason::Lunch));
    }

    #[test]
    fn test_short_booking_inside_a_slot_blocks_it() {
        let booking = Booking::interval(date(), time(14, 5), time(14, 20));
        let slots = generate_slots(date(), &[booking], &WorkingHours::default());

        assert_eq!(slot_at(&slots, 14, 0).reason, Some(SlotReason::Booked));
        assert!(slot_at(&slots, 13, 30).available);
        assert!(slot_at(&slots, 14, 30).available);
    }

    #[test]
    fn test_other_dates_and_cancelled_bookings_are_ignored() {
        let other_day = Booking::interval(date().succ_opt().unwrap(), time(9, 0), time(10, 0));
        let mut cancelled = Booking::interval(date(), time(14, 0), time(15, 0));
        cancelled.status = BookingStatus::Cancelled;

        let slots = generate_slots(date(), &[other_day, cancelled], &WorkingHours::default());

        assert!(slot_at(&slots, 9, 0).available);
        assert!(slot_at(&slots, 14, 0).available);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let bookings = vec![Booking::interval(date(), time(9, 0), time(9, 45)), Booking::interval(date(), time(15, 0), time(16, 0))];
        let hours = WorkingHours::default();

        assert_eq!(generate_slots(date(), &bookings, &hours), generate_slots(date(), &bookings, &hours));
    }
}
