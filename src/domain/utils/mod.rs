pub mod id;
pub mod time_format;
