use crate::api::booking_dto::BookingDto;
use crate::api::config_dto::SchedulerConfigDto;
use crate::domain::booking::booking::Booking;
use crate::domain::scheduling::scheduler::SchedulerConfig;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

pub use crate::domain::booking::booking_desk::{BookingDecision, BookingDesk, BookingRequest, RejectionReason};
pub use crate::domain::scheduling::availability::{Availability, can_book};
pub use crate::domain::scheduling::scheduler::Scheduler;
pub use crate::domain::scheduling::slot_generator::generate_slots;
pub use crate::domain::scheduling::time_slot::{SlotReason, TimeSlot};
pub use crate::domain::scheduling::working_hours::WorkingHours;

/// Loads and validates a scheduler configuration file.
pub fn load_scheduler_config(file_path: &str) -> Result<SchedulerConfig> {
    let dto: SchedulerConfigDto = parse_json_file(file_path)?;
    let config = SchedulerConfig::from_dto(&dto)?;

    log::info!(
        "Scheduler configuration loaded from '{}': {}-{}, lunch {} min.",
        file_path,
        config.working_hours.start(),
        config.working_hours.end(),
        config.working_hours.lunch_break_duration().num_minutes()
    );

    Ok(config)
}

/// Loads a JSON array of bookings.
pub fn load_bookings(file_path: &str) -> Result<Vec<Booking>> {
    let dtos: Vec<BookingDto> = parse_json_file(file_path)?;
    let bookings = Booking::from_dtos(dtos)?;

    log::info!("Loaded {} bookings from '{}'.", bookings.len(), file_path);

    Ok(bookings)
}
