use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct LocationDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceTypeDto {
    #[default]
    Onetime,
    Yearly,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatusDto {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Booking as exchanged with the booking API. Only the scheduling fields are
/// mandatory, so plain interval lists can be loaded as well.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    /// "yyyy-MM-dd"
    pub date: String,
    /// "HH:mm"
    pub start_time: String,
    /// "HH:mm"
    pub end_time: String,
    #[serde(default)]
    pub service_type: ServiceTypeDto,
    #[serde(default)]
    pub number_of_panels: u32,
    #[serde(default)]
    pub is_residential: bool,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: LocationDto,
    /// Kilometres.
    #[serde(default)]
    pub travel_distance: f64,
    /// Minutes.
    #[serde(default)]
    pub travel_time: i64,
    #[serde(default)]
    pub total_cost: i64,
    #[serde(default)]
    pub status: BookingStatusDto,
}

/// What a customer submits from the booking form.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestDto {
    pub customer_id: String,
    pub date: String,
    pub start_time: String,
    pub service_type: ServiceTypeDto,
    pub number_of_panels: u32,
    pub is_residential: bool,
    pub address: String,
    pub location: LocationDto,
    pub travel_distance: f64,
    pub travel_time: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotReasonDto {
    Booked,
    Lunch,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDto {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<SlotReasonDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatsDto {
    pub total_bookings: usize,
    pub completed_bookings: usize,
    pub total_distance: f64,
    pub total_revenue: i64,
}
