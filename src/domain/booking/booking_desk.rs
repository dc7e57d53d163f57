use chrono::{NaiveDate, NaiveTime};

use crate::api::booking_dto::BookingRequestDto;
use crate::domain::booking::booking::{Booking, BookingPatch, BookingStatus, Location, NewBooking, ServiceType};
use crate::domain::booking::daily_stats::DailyStats;
use crate::domain::booking::repository::BookingRepository;
use crate::domain::pricing::quote::Quote;
use crate::domain::routing::route_lookup::{RouteLookup, route_to};
use crate::domain::scheduling::availability::Availability;
use crate::domain::scheduling::scheduler::Scheduler;
use crate::domain::scheduling::time_slot::TimeSlot;
use crate::domain::utils::id::{BookingId, CustomerId};
use crate::domain::utils::time_format::{parse_clock_time, parse_date};
use crate::error::{Error, Result};

/// A customer's booking form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub customer_id: CustomerId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub service_type: ServiceType,
    pub number_of_panels: u32,
    pub is_residential: bool,
    pub address: String,
    pub location: Location,
    pub travel_distance: f64,
    pub travel_time: i64,
}

impl BookingRequest {
    pub fn from_dto(dto: BookingRequestDto) -> Result<Self> {
        Ok(BookingRequest {
            customer_id: CustomerId::new(dto.customer_id),
            date: parse_date(&dto.date)?,
            start_time: parse_clock_time(&dto.start_time)?,
            service_type: dto.service_type.into(),
            number_of_panels: dto.number_of_panels,
            is_residential: dto.is_residential,
            address: dto.address,
            location: Location { lat: dto.location.lat, lng: dto.location.lng },
            travel_distance: dto.travel_distance,
            travel_time: dto.travel_time,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The availability check refused the job on current data.
    NotBookable(Availability),

    /// Another booking won the race between check and write.
    SlotTaken,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingDecision {
    Confirmed(Booking),

    /// The caller should offer `refreshed_slots` again.
    Rejected { reason: RejectionReason, refreshed_slots: Vec<TimeSlot> },
}

/// Runs the check-then-create sequence against a booking repository.
///
/// There is no lock spanning the check and the write. The desk re-checks
/// against a fresh booking list right before writing and relies on the
/// repository to reject overlaps; a lost race becomes
/// `RejectionReason::SlotTaken` with a refreshed slot grid.
#[derive(Debug)]
pub struct BookingDesk<R: BookingRepository> {
    scheduler: Scheduler,
    repository: R,
}

impl<R: BookingRepository> BookingDesk<R> {
    pub fn new(scheduler: Scheduler, repository: R) -> Self {
        BookingDesk { scheduler, repository }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn offer_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        let bookings = self.repository.list_bookings_on(date)?;
        Ok(self.scheduler.generate_slots(date, &bookings))
    }

    pub fn quote(&self, request: &BookingRequest) -> Result<Quote> {
        Quote::for_job(request.number_of_panels, request.service_type, request.is_residential, request.travel_distance, &self.scheduler.config().pricing)
    }

    /// Resolves the request's address and fills in location, distance and travel time.
    pub fn attach_route(&self, request: &mut BookingRequest, lookup: &dyn RouteLookup, depot: &Location) -> Result<()> {
        let (candidate, metrics) = route_to(lookup, depot, &request.address)?;

        request.address = candidate.address;
        request.location = candidate.location;
        request.travel_distance = metrics.distance_km;
        request.travel_time = metrics.travel_time_minutes();

        Ok(())
    }

    pub fn submit(&self, request: BookingRequest) -> Result<BookingDecision> {
        let quote = self.quote(&request)?;
        let date = request.date;

        let existing = self.repository.list_bookings_on(date)?;
        let verdict = self.scheduler.check(date, request.start_time, request.number_of_panels, &existing, request.travel_time)?;

        if !verdict.is_bookable() {
            log::warn!("Refused booking on {} at {} for {} panels: {}.", date, request.start_time, request.number_of_panels, verdict.as_str());
            return Ok(BookingDecision::Rejected {
                reason: RejectionReason::NotBookable(verdict),
                refreshed_slots: self.scheduler.generate_slots(date, &existing),
            });
        }

        let window = self.scheduler.service_window(date, request.start_time, request.number_of_panels, request.travel_time)?;

        let new_booking = NewBooking {
            customer_id: request.customer_id,
            date,
            start_time: request.start_time,
            end_time: window.end.time(),
            service_type: request.service_type,
            number_of_panels: request.number_of_panels,
            is_residential: request.is_residential,
            address: request.address,
            location: request.location,
            travel_distance: request.travel_distance,
            travel_time: request.travel_time,
            total_cost: quote.total(),
        };

        match self.repository.create_booking(new_booking) {
            Ok(booking) => {
                tracing::info!(booking = %booking.id, %date, start = %booking.start_time, end = %booking.end_time, "booking created");
                Ok(BookingDecision::Confirmed(booking))
            }
            Err(err) if err.is_retryable() => {
                tracing::warn!(%date, start = %request.start_time, "slot no longer available: {}", err);
                let fresh = self.repository.list_bookings_on(date)?;
                Ok(BookingDecision::Rejected { reason: RejectionReason::SlotTaken, refreshed_slots: self.scheduler.generate_slots(date, &fresh) })
            }
            Err(err) => Err(err),
        }
    }

    pub fn confirm(&self, id: &BookingId) -> Result<Booking> {
        self.transition(id, &[BookingStatus::Pending], BookingStatus::Confirmed)
    }

    pub fn complete(&self, id: &BookingId) -> Result<Booking> {
        self.transition(id, &[BookingStatus::Pending, BookingStatus::Confirmed], BookingStatus::Completed)
    }

    pub fn cancel(&self, id: &BookingId) -> Result<Booking> {
        self.transition(id, &[BookingStatus::Pending, BookingStatus::Confirmed], BookingStatus::Cancelled)
    }

    pub fn daily_stats(&self, date: NaiveDate) -> Result<DailyStats> {
        Ok(DailyStats::for_date(date, &self.repository.list_bookings_on(date)?))
    }

    fn transition(&self, id: &BookingId, allowed_from: &[BookingStatus], to: BookingStatus) -> Result<Booking> {
        let current = self.repository.get_booking(id)?;

        if !allowed_from.contains(&current.status) {
            return Err(Error::InvalidRequest(format!("booking {} cannot move from {:?} to {:?}", id, current.status, to)));
        }

        let booking = self.repository.update_booking(id, BookingPatch { status: Some(to), ..Default::default() })?;
        log::info!("Booking {} is now {:?}.", id, to);

        Ok(booking)
    }
}
