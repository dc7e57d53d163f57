use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::api::booking_dto::{BookingDto, BookingStatusDto, LocationDto, ServiceTypeDto};
use crate::domain::utils::id::{BookingId, CustomerId};
use crate::domain::utils::time_format::{format_clock_time, format_date, parse_clock_time, parse_date};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    OneTime,
    Yearly,
}

/// Lifecycle of a booking. New bookings start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,

    /// Cancelled bookings keep their record but no longer occupy time.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A booked job as stored by the booking repository. The scheduling engine
/// only looks at `date`, `start_time`, `end_time` and `status`.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: BookingId,
    pub customer_id: CustomerId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub service_type: ServiceType,
    pub number_of_panels: u32,
    pub is_residential: bool,
    pub address: String,
    pub location: Location,

    /// Kilometres from the depot.
    pub travel_distance: f64,

    /// Minutes from the depot.
    pub travel_time: i64,

    /// SEK.
    pub total_cost: i64,
    pub status: BookingStatus,
}

/// Fields of a booking before the repository has assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub customer_id: CustomerId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub service_type: ServiceType,
    pub number_of_panels: u32,
    pub is_residential: bool,
    pub address: String,
    pub location: Location,
    pub travel_distance: f64,
    pub travel_time: i64,
    pub total_cost: i64,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub number_of_panels: Option<u32>,
    pub address: Option<String>,
    pub total_cost: Option<i64>,
    pub status: Option<BookingStatus>,
}

impl Booking {
    /// Bare booking that only occupies `[start_time, end_time)` on `date`.
    pub fn interval(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Booking {
            id: BookingId::generate(),
            customer_id: CustomerId::new(""),
            date,
            start_time,
            end_time,
            service_type: ServiceType::OneTime,
            number_of_panels: 0,
            is_residential: false,
            address: String::new(),
            location: Location::default(),
            travel_distance: 0.0,
            travel_time: 0,
            total_cost: 0,
            status: BookingStatus::Pending,
        }
    }

    pub fn from_new(id: BookingId, new: NewBooking) -> Self {
        Booking {
            id,
            customer_id: new.customer_id,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            service_type: new.service_type,
            number_of_panels: new.number_of_panels,
            is_residential: new.is_residential,
            address: new.address,
            location: new.location,
            travel_distance: new.travel_distance,
            travel_time: new.travel_time,
            total_cost: new.total_cost,
            status: BookingStatus::Pending,
        }
    }

    /// Bookings without an id (e.g. hand-written fixture files) get a fresh one.
    pub fn from_dto(dto: BookingDto) -> Result<Self> {
        let id = dto.id.map(BookingId::new).unwrap_or_else(BookingId::generate);

        Ok(Booking {
            id,
            customer_id: CustomerId::new(dto.customer_id.unwrap_or_default()),
            date: parse_date(&dto.date)?,
            start_time: parse_clock_time(&dto.start_time)?,
            end_time: parse_clock_time(&dto.end_time)?,
            service_type: dto.service_type.into(),
            number_of_panels: dto.number_of_panels,
            is_residential: dto.is_residential,
            address: dto.address,
            location: Location { lat: dto.location.lat, lng: dto.location.lng },
            travel_distance: dto.travel_distance,
            travel_time: dto.travel_time,
            total_cost: dto.total_cost,
            status: dto.status.into(),
        })
    }

    pub fn from_dtos(dtos: Vec<BookingDto>) -> Result<Vec<Self>> {
        dtos.into_iter().map(Booking::from_dto).collect()
    }

    pub fn to_dto(&self) -> BookingDto {
        BookingDto {
            id: Some(self.id.to_string()),
            customer_id: Some(self.customer_id.to_string()),
            date: format_date(self.date),
            start_time: format_clock_time(self.start_time),
            end_time: format_clock_time(self.end_time),
            service_type: self.service_type.into(),
            number_of_panels: self.number_of_panels,
            is_residential: self.is_residential,
            address: self.address.clone(),
            location: LocationDto { lat: self.location.lat, lng: self.location.lng },
            travel_distance: self.travel_distance,
            travel_time: self.travel_time,
            total_cost: self.total_cost,
            status: self.status.into(),
        }
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    /// Whether the booking still blocks its interval.
    pub fn occupies_time(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Half-open overlap with `[start, end)` on the same date.
    pub fn overlaps(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        self.date == date && self.start_time < end && start < self.end_time
    }

    pub fn apply(&mut self, patch: BookingPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(number_of_panels) = patch.number_of_panels {
            self.number_of_panels = number_of_panels;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(total_cost) = patch.total_cost {
            self.total_cost = total_cost;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl BookingPatch {
    pub fn moves_interval(&self) -> bool {
        self.date.is_some() || self.start_time.is_some() || self.end_time.is_some()
    }
}

/// Occupied `[start, end)` intervals of all time-blocking bookings on `date`.
pub fn occupied_intervals(date: NaiveDate, bookings: &[Booking]) -> impl Iterator<Item = (NaiveDateTime, NaiveDateTime)> + '_ {
    bookings
        .iter()
        .filter(move |booking| booking.date == date && booking.occupies_time())
        .map(|booking| (booking.starts_at(), booking.ends_at()))
}

impl From<ServiceTypeDto> for ServiceType {
    fn from(dto: ServiceTypeDto) -> Self {
        match dto {
            ServiceTypeDto::Onetime => ServiceType::OneTime,
            ServiceTypeDto::Yearly => ServiceType::Yearly,
        }
    }
}

impl From<ServiceType> for ServiceTypeDto {
    fn from(service_type: ServiceType) -> Self {
        match service_type {
            ServiceType::OneTime => ServiceTypeDto::Onetime,
            ServiceType::Yearly => ServiceTypeDto::Yearly,
        }
    }
}

impl From<BookingStatusDto> for BookingStatus {
    fn from(dto: BookingStatusDto) -> Self {
        match dto {
            BookingStatusDto::Pending => BookingStatus::Pending,
            BookingStatusDto::Confirmed => BookingStatus::Confirmed,
            BookingStatusDto::Completed => BookingStatus::Completed,
            BookingStatusDto::Cancelled => BookingStatus::Cancelled,
        }
    }
}

impl From<BookingStatus> for BookingStatusDto {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Pending => BookingStatusDto::Pending,
            BookingStatus::Confirmed => BookingStatusDto::Confirmed,
            BookingStatus::Completed => BookingStatusDto::Completed,
            BookingStatus::Cancelled => BookingStatusDto::Cancelled,
        }
    }
}
