pub mod booking;
pub mod booking_desk;
pub mod booking_store;
pub mod daily_stats;
pub mod repository;
