use crate::api::config_dto::{PriceTierDto, PricingDto};
use crate::domain::booking::booking::ServiceType;
use crate::error::{Error, Result};

/// Price of a cleaning for jobs up to `max_panels` panels, in SEK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTier {
    pub max_panels: u32,
    pub one_time: i64,
    pub yearly: i64,
}

impl PriceTier {
    pub fn price(&self, service_type: ServiceType) -> i64 {
        match service_type {
            ServiceType::OneTime => self.one_time,
            ServiceType::Yearly => self.yearly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    /// Sorted by `max_panels`, strictly increasing.
    tiers: Vec<PriceTier>,

    /// Equipment fee for residential roofs.
    pub residential_fee: i64,

    /// Charged per started 10 km of driving distance.
    pub travel_cost_per_10_km: i64,
}

impl PricingConfig {
    pub fn new(mut tiers: Vec<PriceTier>, residential_fee: i64, travel_cost_per_10_km: i64) -> Result<Self> {
        if tiers.is_empty() {
            return Err(Error::InvalidConfiguration("pricing needs at least one tier".to_string()));
        }

        tiers.sort_by_key(|tier| tier.max_panels);

        if tiers.windows(2).any(|pair| pair[0].max_panels == pair[1].max_panels) {
            return Err(Error::InvalidConfiguration("pricing tiers must have distinct maxPanels".to_string()));
        }

        if tiers.iter().any(|tier| tier.one_time < 0 || tier.yearly < 0) || residential_fee < 0 || travel_cost_per_10_km < 0 {
            return Err(Error::InvalidConfiguration("prices must not be negative".to_string()));
        }

        Ok(PricingConfig { tiers, residential_fee, travel_cost_per_10_km })
    }

    pub fn from_dto(dto: &PricingDto) -> Result<Self> {
        let default = PricingConfig::default();

        let tiers = match &dto.tiers {
            Some(tiers) => tiers.iter().map(|tier: &PriceTierDto| PriceTier { max_panels: tier.max_panels, one_time: tier.one_time, yearly: tier.yearly }).collect(),
            None => default.tiers,
        };

        Self::new(
            tiers,
            dto.residential_fee.unwrap_or(default.residential_fee),
            dto.travel_cost_per_10_km.unwrap_or(default.travel_cost_per_10_km),
        )
    }

    /// Smallest tier that covers `number_of_panels`.
    pub fn tier_for(&self, number_of_panels: u32) -> Option<&PriceTier> {
        self.tiers.iter().find(|tier| number_of_panels <= tier.max_panels)
    }

    pub fn max_panels(&self) -> u32 {
        self.tiers.last().map(|tier| tier.max_panels).unwrap_or(0)
    }

    pub fn tiers(&self) -> &[PriceTier] {
        &self.tiers
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tiers: vec![
                PriceTier { max_panels: 20, one_time: 800, yearly: 2000 },
                PriceTier { max_panels: 30, one_time: 1200, yearly: 3000 },
                PriceTier { max_panels: 40, one_time: 1600, yearly: 4000 },
            ],
            residential_fee: 175,
            travel_cost_per_10_km: 100,
        }
    }
}
