pub mod booking_window;
pub mod clock;
