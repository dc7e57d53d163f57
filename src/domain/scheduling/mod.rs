pub mod availability;
pub mod lunch_window;
pub mod scheduler;
pub mod service_duration;
pub mod slot_generator;
pub mod time_slot;
pub mod working_hours;
