use crate::domain::booking::booking::ServiceType;
use crate::domain::pricing::price_list::PricingConfig;
use crate::error::{Error, Result};

/// Cost breakdown of a job in SEK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub service_cost: i64,
    pub residential_fee: i64,
    pub travel_cost: i64,
}

impl Quote {
    pub fn for_job(number_of_panels: u32, service_type: ServiceType, is_residential: bool, distance_km: f64, pricing: &PricingConfig) -> Result<Self> {
        if number_of_panels == 0 {
            return Err(Error::InvalidRequest("a job needs at least one panel".to_string()));
        }

        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(Error::InvalidRequest(format!("invalid travel distance {}", distance_km)));
        }

        let tier = pricing.tier_for(number_of_panels).ok_or_else(|| {
            Error::InvalidRequest(format!("{} panels exceed the maximum of {} panels", number_of_panels, pricing.max_panels()))
        })?;

        let started_ten_km = (distance_km / 10.0).ceil() as i64;

        Ok(Quote {
            service_cost: tier.price(service_type),
            residential_fee: if is_residential { pricing.residential_fee } else { 0 },
            travel_cost: started_ten_km * pricing.travel_cost_per_10_km,
        })
    }

    pub fn total(&self) -> i64 {
        self.service_cost + self.residential_fee + self.travel_cost
    }
}
