use chrono::{NaiveDate, NaiveTime};

use crate::api::config_dto::SchedulerConfigDto;
use crate::domain::booking::booking::Booking;
use crate::domain::pricing::price_list::PricingConfig;
use crate::domain::scheduling::availability::{self, Availability, ServiceWindow};
use crate::domain::scheduling::service_duration::ServiceDuration;
use crate::domain::scheduling::slot_generator;
use crate::domain::scheduling::time_slot::TimeSlot;
use crate::domain::scheduling::working_hours::WorkingHours;
use crate::domain::utils::time_format::parse_clock_time;
use crate::error::{Error, Result};

/// Everything the scheduling engine needs to know, passed explicitly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchedulerConfig {
    pub working_hours: WorkingHours,
    pub service_duration: ServiceDuration,
    pub pricing: PricingConfig,
}

impl SchedulerConfig {
    /// Validates the configuration file; absent sections keep their defaults.
    pub fn from_dto(dto: &SchedulerConfigDto) -> Result<Self> {
        let working_hours = match &dto.working_hours {
            Some(hours) => WorkingHours::from_dto(hours)?,
            None => WorkingHours::default(),
        };

        let service_duration = match &dto.service_duration {
            Some(duration) => ServiceDuration::from_dto(duration)?,
            None => ServiceDuration::default(),
        };

        let pricing = match &dto.pricing {
            Some(pricing) => PricingConfig::from_dto(pricing)?,
            None => PricingConfig::default(),
        };

        Ok(SchedulerConfig { working_hours, service_duration, pricing })
    }
}

/// Facade over the slot generator and the availability predicate. Holds no
/// state besides its configuration; every call works on the booking snapshot
/// it is given.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Scheduler { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn generate_slots(&self, date: NaiveDate, existing_bookings: &[Booking]) -> Vec<TimeSlot> {
        slot_generator::generate_slots(date, existing_bookings, &self.config.working_hours)
    }

    /// Same as [`slot_generator::generate_slots`] with per-call working hours.
    pub fn generate_slots_with(&self, date: NaiveDate, existing_bookings: &[Booking], working_hours: &WorkingHours) -> Vec<TimeSlot> {
        slot_generator::generate_slots(date, existing_bookings, working_hours)
    }

    /// Availability check for an "HH:mm" start time.
    ///
    /// A job that does not fit is `Ok(false)`; errors are reserved for
    /// malformed input.
    pub fn can_book(&self, date: NaiveDate, start_time: &str, number_of_panels: u32, existing_bookings: &[Booking], travel_time: i64) -> Result<bool> {
        let start_time = parse_clock_time(start_time)?;
        Ok(self.check(date, start_time, number_of_panels, existing_bookings, travel_time)?.is_bookable())
    }

    pub fn check(&self, date: NaiveDate, start_time: NaiveTime, number_of_panels: u32, existing_bookings: &[Booking], travel_time: i64) -> Result<Availability> {
        if travel_time < 0 {
            return Err(Error::InvalidRequest(format!("travel time must not be negative, got {} min", travel_time)));
        }
        self.service_window(date, start_time, number_of_panels, travel_time)?;

        Ok(availability::check_availability(
            date,
            start_time,
            number_of_panels,
            existing_bookings,
            travel_time,
            &self.config.working_hours,
            &self.config.service_duration,
        ))
    }

    pub fn service_minutes(&self, number_of_panels: u32) -> Result<i64> {
        self.config
            .service_duration
            .minutes_for(number_of_panels)
            .ok_or_else(|| Error::InvalidRequest(format!("service duration for {} panels is out of range", number_of_panels)))
    }

    pub fn service_window(&self, date: NaiveDate, start_time: NaiveTime, number_of_panels: u32, travel_time: i64) -> Result<ServiceWindow> {
        ServiceWindow::new(date, start_time, number_of_panels, travel_time, &self.config.service_duration).ok_or_else(|| {
            Error::InvalidRequest(format!("job of {} panels plus {} min travel from {} {} is out of range", number_of_panels, travel_time, date, start_time))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config_dto::WorkingHoursDto;
    use crate::loader::parser::parse_json_str;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn test_can_book_parses_start_time() {
        let scheduler = Scheduler::default();

        assert!(scheduler.can_book(date(), "08:00", 20, &[], 0).unwrap());
        assert!(scheduler.can_book(date(), "08:30", 20, &[], 0).unwrap());
        assert!(!scheduler.can_book(date(), "16:00", 20, &[], 0).unwrap());
        assert!(matches!(scheduler.can_book(date(), "8 o'clock", 20, &[], 0), Err(Error::InvalidTime(_))));
        assert!(matches!(scheduler.can_book(date(), "08:00", 20, &[], -5), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_out_of_range_travel_time_is_an_invalid_request() {
        let scheduler = Scheduler::default();

        assert!(matches!(scheduler.can_book(date(), "08:00", 20, &[], 1_000_000_000_000), Err(Error::InvalidRequest(_))));
        assert!(matches!(scheduler.can_book(date(), "08:00", 20, &[], i64::MAX), Err(Error::InvalidRequest(_))));
        assert!(matches!(scheduler.service_window(date(), NaiveTime::MIN, 20, i64::MAX), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_generate_slots_with_overrides_working_hours() {
        let scheduler = Scheduler::default();
        let short_day = WorkingHours::parse("10:00", "12:00", 30).unwrap();
        let booking = Booking::interval(date(), NaiveTime::from_hms_opt(10, 30, 0).unwrap(), NaiveTime::from_hms_opt(11, 0, 0).unwrap());

        let slots = scheduler.generate_slots_with(date(), std::slice::from_ref(&booking), &short_day);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0].start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(slots[3].end_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert!(!slots[1].available);

        // The configured hours are untouched.
        assert_eq!(scheduler.generate_slots(date(), &[booking]).len(), 18);
    }

    #[test]
    fn test_config_from_partial_dto() {
        let dto: SchedulerConfigDto = parse_json_str(r#"{"workingHours": {"start": "07:00", "end": "15:00"}, "serviceDuration": {"perPanel": 4}}"#).unwrap();
        let config = SchedulerConfig::from_dto(&dto).unwrap();

        assert_eq!(config.working_hours.start(), NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(config.service_duration.minutes_for(20), Some(30 + 80 + 15));
        assert_eq!(config.pricing, PricingConfig::default());

        let scheduler = Scheduler::new(config);
        assert_eq!(scheduler.generate_slots(date(), &[]).len(), 16);
    }

    #[test]
    fn test_inverted_working_hours_fail_at_construction() {
        let dto = SchedulerConfigDto {
            working_hours: Some(WorkingHoursDto { start: Some("17:00".to_string()), end: Some("08:00".to_string()), lunch_break_duration: None }),
            ..Default::default()
        };

        assert!(matches!(SchedulerConfig::from_dto(&dto), Err(Error::InvalidWorkingHours { .. })));
    }
}
