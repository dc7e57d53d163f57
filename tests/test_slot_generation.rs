use chrono::{NaiveDate, NaiveTime};
use solar_scheduler::domain::booking::booking::Booking;
use solar_scheduler::domain::scheduling::lunch_window::LunchWindow;
use solar_scheduler::{SlotReason, TimeSlot, WorkingHours, generate_slots};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn slot_at(slots: &[TimeSlot], h: u32, m: u32) -> &TimeSlot {
    slots.iter().find(|slot| slot.start_time == time(h, m)).unwrap_or_else(|| panic!("no slot at {:02}:{:02}", h, m))
}

#[test]
fn test_existing_booking_marks_intersecting_slots() {
    let booking = Booking::interval(date(), time(10, 0), time(11, 0));
    let slots = generate_slots(date(), &[booking], &WorkingHours::default());

    for (h, m) in [(9, 30), (10, 0), (10, 30)] {
        let slot = slot_at(&slots, h, m);
        assert!(!slot.available, "{:02}:{:02} should be unavailable", h, m);
        assert_eq!(slot.reason, Some(SlotReason::Booked));
    }

    // 11:00 is clear of the booking; it is only unavailable if lunch covers it.
    let eleven = slot_at(&slots, 11, 0);
    assert_ne!(eleven.reason, Some(SlotReason::Booked));

    // With lunch pushed out of the way 11:00 is plainly available.
    let late_lunch = WorkingHours::new(time(6, 0), time(17, 0), 0).unwrap();
    let slots = generate_slots(date(), &[Booking::interval(date(), time(10, 0), time(11, 0))], &late_lunch);
    assert!(slot_at(&slots, 11, 0).available);
}

#[test]
fn test_empty_bookings_leave_only_lunch_blocked() {
    for hours in [WorkingHours::default(), WorkingHours::new(time(7, 0), time(18, 30), 60).unwrap(), WorkingHours::new(time(9, 15), time(13, 0), 0).unwrap()] {
        for offset in 0..7 {
            let day = date() + chrono::Duration::days(offset);
            let lunch = LunchWindow::anchored_at(hours.opening(day), &hours);

            for slot in generate_slots(day, &[], &hours) {
                if lunch.contains(slot.starts_at()) {
                    assert_eq!(slot.reason, Some(SlotReason::Lunch));
                } else {
                    assert!(slot.available, "{} {} should be available", day, slot.start_time);
                }
            }
        }
    }
}

#[test]
fn test_every_overlapping_slot_is_booked() {
    let bookings = vec![
        Booking::interval(date(), time(8, 10), time(8, 50)),
        Booking::interval(date(), time(13, 0), time(14, 30)),
        Booking::interval(date(), time(15, 45), time(15, 55)),
    ];
    let slots = generate_slots(date(), &bookings, &WorkingHours::default());

    for slot in &slots {
        let overlaps = bookings.iter().any(|booking| booking.overlaps(slot.date, slot.start_time, slot.end_time));
        if overlaps {
            assert_eq!(slot.reason, Some(SlotReason::Booked), "{} should be booked", slot.start_time);
        }
    }
}

#[test]
fn test_generation_is_idempotent() {
    let bookings = vec![Booking::interval(date(), time(9, 0), time(10, 15))];
    let hours = WorkingHours::default();

    let first = generate_slots(date(), &bookings, &hours);
    let second = generate_slots(date(), &bookings, &hours);
    assert_eq!(first, second);
}

#[test]
fn test_slot_count_truncates_remainder() {
    let hours = WorkingHours::new(time(8, 0), time(16, 50), 30).unwrap();
    let slots = generate_slots(date(), &[], &hours);

    assert_eq!(slots.len(), 17);
    assert_eq!(slots.last().unwrap().end_time, time(16, 30));
    assert!(slots.iter().all(|slot| (slot.end_time - slot.start_time).num_minutes() == 30));
}
