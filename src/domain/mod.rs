pub mod booking;
pub mod calendar;
pub mod pricing;
pub mod routing;
pub mod scheduling;
pub mod utils;
