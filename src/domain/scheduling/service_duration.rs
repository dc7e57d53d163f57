use chrono::Duration;

use crate::api::config_dto::ServiceDurationDto;
use crate::error::{Error, Result};

/// Constants of the on-site time model, all in minutes:
/// `base_time + panels * per_panel + buffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDuration {
    base_time: i64,
    per_panel: i64,
    buffer: i64,
}

impl ServiceDuration {
    pub fn new(base_time: i64, per_panel: i64, buffer: i64) -> Result<Self> {
        for (name, value) in [("baseTime", base_time), ("perPanel", per_panel), ("buffer", buffer)] {
            if value < 0 {
                return Err(Error::InvalidConfiguration(format!("{} must not be negative, got {}", name, value)));
            }
        }

        Ok(ServiceDuration { base_time, per_panel, buffer })
    }

    pub fn from_dto(dto: &ServiceDurationDto) -> Result<Self> {
        let default = ServiceDuration::default();
        Self::new(
            dto.base_time.unwrap_or(default.base_time),
            dto.per_panel.unwrap_or(default.per_panel),
            dto.buffer.unwrap_or(default.buffer),
        )
    }

    /// On-site minutes needed for a job with `number_of_panels` panels.
    /// `None` when the configured constants overflow.
    pub fn minutes_for(&self, number_of_panels: u32) -> Option<i64> {
        i64::from(number_of_panels).checked_mul(self.per_panel)?.checked_add(self.base_time)?.checked_add(self.buffer)
    }

    pub fn for_panels(&self, number_of_panels: u32) -> Option<Duration> {
        Duration::try_minutes(self.minutes_for(number_of_panels)?)
    }

    pub fn base_time(&self) -> i64 {
        self.base_time
    }

    pub fn per_panel(&self) -> i64 {
        self.per_panel
    }

    pub fn buffer(&self) -> i64 {
        self.buffer
    }
}

impl Default for ServiceDuration {
    fn default() -> Self {
        ServiceDuration { base_time: 30, per_panel: 5, buffer: 15 }
    }
}
