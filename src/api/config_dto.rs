use serde::{Deserialize, Serialize};

/// Root of the scheduler configuration file. Every section is optional and
/// falls back to the built-in defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerConfigDto {
    pub working_hours: Option<WorkingHoursDto>,
    pub service_duration: Option<ServiceDurationDto>,
    pub pricing: Option<PricingDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkingHoursDto {
    /// "HH:mm"
    pub start: Option<String>,
    /// "HH:mm"
    pub end: Option<String>,
    /// Minutes.
    pub lunch_break_duration: Option<i64>,
}

/// All values in minutes.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceDurationDto {
    pub base_time: Option<i64>,
    pub per_panel: Option<i64>,
    pub buffer: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingDto {
    pub tiers: Option<Vec<PriceTierDto>>,
    pub residential_fee: Option<i64>,
    pub travel_cost_per_10_km: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PriceTierDto {
    pub max_panels: u32,
    pub one_time: i64,
    pub yearly: i64,
}
