use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::booking::booking::{Booking, occupied_intervals};
use crate::domain::scheduling::lunch_window::LunchWindow;
use crate::domain::scheduling::service_duration::ServiceDuration;
use crate::domain::scheduling::working_hours::WorkingHours;

/// Verdict of the availability check for one concrete job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Bookable,
    OutsideWorkingHours,
    BookingConflict,
    LunchConflict,
}

impl Availability {
    pub fn is_bookable(&self) -> bool {
        *self == Availability::Bookable
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Bookable => "bookable",
            Availability::OutsideWorkingHours => "outside working hours",
            Availability::BookingConflict => "overlaps an existing booking",
            Availability::LunchConflict => "collides with the lunch break",
        }
    }
}

/// Time a job occupies: on-site service plus travel to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ServiceWindow {
    /// `None` when the job's length does not fit the calendar.
    pub fn new(date: NaiveDate, start_time: NaiveTime, number_of_panels: u32, travel_time: i64, service_duration: &ServiceDuration) -> Option<Self> {
        let start = date.and_time(start_time);
        let total = service_duration.for_panels(number_of_panels)?.checked_add(&Duration::try_minutes(travel_time)?)?;

        Some(ServiceWindow { start, end: start.checked_add_signed(total)? })
    }

    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Checks whether a job of `number_of_panels` panels plus `travel_time`
/// minutes of travel fits at `start_time` on `date`.
///
/// Checks run in order: both ends inside working hours, no overlap with a
/// non-cancelled booking on `date`, neither end inside the lunch window
/// anchored at the job's own start.
pub fn check_availability(
    date: NaiveDate,
    start_time: NaiveTime,
    number_of_panels: u32,
    existing_bookings: &[Booking],
    travel_time: i64,
    working_hours: &WorkingHours,
    service_duration: &ServiceDuration,
) -> Availability {
    let Some(window) = ServiceWindow::new(date, start_time, number_of_panels, travel_time, service_duration) else {
        log::debug!("{} {}: job of {} panels plus {} min travel has no representable end.", date, start_time, number_of_panels, travel_time);
        return Availability::OutsideWorkingHours;
    };

    if !working_hours.contains(date, window.start) || !working_hours.contains(date, window.end) {
        log::debug!("{} {}: job of {} min leaves working hours.", date, start_time, window.minutes());
        return Availability::OutsideWorkingHours;
    }

    let has_conflict = occupied_intervals(date, existing_bookings).any(|(booking_start, booking_end)| {
        let start_inside = booking_start <= window.start && window.start < booking_end;
        let end_inside = booking_start < window.end && window.end <= booking_end;
        let encloses = window.start < booking_start && window.end > booking_end;

        start_inside || end_inside || encloses
    });

    if has_conflict {
        log::debug!("{} {}: job of {} min overlaps an existing booking.", date, start_time, window.minutes());
        return Availability::BookingConflict;
    }

    let lunch = LunchWindow::anchored_at(window.start, working_hours);
    if lunch.contains(window.start) || lunch.contains(window.end) {
        log::debug!("{} {}: job end {} falls into lunch [{}, {}].", date, start_time, window.end.time(), lunch.start.time(), lunch.end.time());
        return Availability::LunchConflict;
    }

    Availability::Bookable
}

/// `true` when [`check_availability`] finds no reason to refuse the job.
pub fn can_book(
    date: NaiveDate,
    start_time: NaiveTime,
    number_of_panels: u32,
    existing_bookings: &[Booking],
    travel_time: i64,
    working_hours: &WorkingHours,
    service_duration: &ServiceDuration,
) -> bool {
    check_availability(date, start_time, number_of_panels, existing_bookings, travel_time, working_hours, service_duration).is_bookable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::booking::BookingStatus;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn check(start: NaiveTime, panels: u32, bookings: &[Booking], travel: i64) -> Availability {
        check_availability(date(), start, panels, bookings, travel, &WorkingHours::default(), &ServiceDuration::default())
    }

    /// Service duration without any constants, so the job lasts exactly its travel time.
    fn zero_duration() -> ServiceDuration {
        ServiceDuration::new(0, 0, 0).unwrap()
    }

    #[test]
    fn test_twenty_panels_at_opening_fit() {
        assert_eq!(check(time(8, 0), 20, &[], 0), Availability::Bookable);
        assert_eq!(check(time(8, 30), 20, &[], 0), Availability::Bookable);
    }

    #[test]
    fn test_service_window_adds_travel() {
        let window = ServiceWindow::new(date(), time(8, 30), 20, 20, &ServiceDuration::default()).unwrap();
        assert_eq!(window.end, date().and_time(time(11, 15)));
        assert_eq!(window.minutes(), 165);
    }

    #[test]
    fn test_job_must_end_by_closing() {
        // 145 min from 14:35 ends exactly at 17:00.
        assert_eq!(check(time(14, 35), 20, &[], 0), Availability::Bookable);
        assert_eq!(check(time(15, 0), 20, &[], 0), Availability::OutsideWorkingHours);
        assert_eq!(check(time(7, 30), 0, &[], 0), Availability::OutsideWorkingHours);
    }

    #[test]
    fn test_end_in_job_relative_lunch_is_refused() {
        // 40 panels: 245 min, 08:00 -> 12:05 which lies in [11:00, 12:30].
        assert_eq!(check(time(8, 0), 40, &[], 0), Availability::LunchConflict);
        // Travel pushes 20 panels from 10:25 to 11:00, the first lunch minute.
        assert_eq!(check(time(8, 0), 20, &[], 35), Availability::LunchConflict);
        assert_eq!(check(time(8, 0), 20, &[], 34), Availability::Bookable);
    }

    #[test]
    fn test_partial_overlap_is_refused() {
        let bookings = [Booking::interval(date(), time(10, 0), time(11, 0))];

        // 08:00 + 145 = 10:25, inside the booking.
        assert_eq!(check(time(8, 0), 20, &bookings, 0), Availability::BookingConflict);
        // Starts inside the booking.
        assert_eq!(check(time(10, 30), 0, &bookings, 0), Availability::BookingConflict);
        // Starts exactly when the booking starts.
        assert_eq!(check(time(10, 0), 0, &bookings, 0), Availability::BookingConflict);
    }

    #[test]
    fn test_full_containment_is_refused() {
        let bookings = [Booking::interval(date(), time(9, 0), time(9, 30))];

        // 08:30 + 145 = 10:55 encloses the whole booking without either end inside it.
        assert!(!can_book(date(), time(8, 30), 20, &bookings, 0, &WorkingHours::default(), &ServiceDuration::default()));
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        let bookings = [Booking::interval(date(), time(10, 0), time(11, 0))];
        let hours = WorkingHours::default();

        // 09:00-10:00 ends exactly when the booking starts.
        assert_eq!(check_availability(date(), time(9, 0), 0, &bookings, 60, &hours, &zero_duration()), Availability::Bookable);
        // 11:00-12:00 starts exactly when the booking ends.
        assert_eq!(check_availability(date(), time(11, 0), 0, &bookings, 60, &hours, &zero_duration()), Availability::Bookable);
    }

    #[test]
    fn test_cancelled_and_other_day_bookings_do_not_block() {
        let mut cancelled = Booking::interval(date(), time(9, 0), time(10, 0));
        cancelled.status = BookingStatus::Cancelled;
        let other_day = Booking::interval(date().succ_opt().unwrap(), time(8, 0), time(12, 0));

        assert_eq!(check(time(8, 0), 20, &[cancelled, other_day], 0), Availability::Bookable);
    }

    #[test]
    fn test_huge_travel_time_is_outside_working_hours() {
        assert!(ServiceWindow::new(date(), time(8, 0), 20, 1_000_000_000_000, &ServiceDuration::default()).is_none());
        assert!(ServiceWindow::new(date(), time(8, 0), 20, i64::MAX, &ServiceDuration::default()).is_none());

        assert_eq!(check(time(8, 0), 20, &[], 1_000_000_000_000), Availability::OutsideWorkingHours);
        assert_eq!(check(time(8, 0), 20, &[], i64::MAX), Availability::OutsideWorkingHours);
    }
}
