use crate::domain::booking::booking::Location;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct AddressCandidate {
    pub address: String,
    pub location: Location,
}

/// Driving distance and time between two places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMetrics {
    pub distance_km: f64,
    pub duration_minutes: f64,
}

impl RouteMetrics {
    /// Whole minutes of travel to add to a job, rounded up.
    pub fn travel_time_minutes(&self) -> i64 {
        self.duration_minutes.max(0.0).ceil() as i64
    }
}

/// Address autocompletion and driving-distance lookup, provided by an
/// external geocoding/routing service.
pub trait RouteLookup: std::fmt::Debug + Send + Sync {
    fn resolve_address(&self, query: &str) -> Result<Vec<AddressCandidate>>;

    fn route_metrics(&self, origin: &Location, destination: &Location) -> Result<RouteMetrics>;
}

/// Resolves `query` to its first candidate and returns the route to it from `origin`.
pub fn route_to(lookup: &dyn RouteLookup, origin: &Location, query: &str) -> Result<(AddressCandidate, RouteMetrics)> {
    let candidate = lookup
        .resolve_address(query)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::RouteLookupFailed(format!("no address matches '{}'", query)))?;
    let metrics = lookup.route_metrics(origin, &candidate.location)?;

    Ok((candidate, metrics))
}

/// Fixed table of known addresses and their route from the depot.
#[derive(Debug, Clone)]
pub struct StaticRouteTable {
    depot: Location,
    entries: Vec<(AddressCandidate, RouteMetrics)>,
}

impl StaticRouteTable {
    pub fn new(depot: Location) -> Self {
        StaticRouteTable { depot, entries: Vec::new() }
    }

    pub fn with_route(mut self, address: impl Into<String>, location: Location, metrics: RouteMetrics) -> Self {
        self.entries.push((AddressCandidate { address: address.into(), location }, metrics));
        self
    }

    pub fn depot(&self) -> Location {
        self.depot
    }

    pub fn route_from_depot(&self, query: &str) -> Result<(AddressCandidate, RouteMetrics)> {
        route_to(self, &self.depot, query)
    }
}

impl RouteLookup for StaticRouteTable {
    fn resolve_address(&self, query: &str) -> Result<Vec<AddressCandidate>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.entries.iter().filter(|(candidate, _)| candidate.address.to_lowercase().contains(&needle)).map(|(candidate, _)| candidate.clone()).collect())
    }

    fn route_metrics(&self, origin: &Location, destination: &Location) -> Result<RouteMetrics> {
        if origin != &self.depot {
            return Err(Error::RouteLookupFailed("only routes from the depot are known".to_string()));
        }

        self.entries
            .iter()
            .find(|(candidate, _)| &candidate.location == destination)
            .map(|(_, metrics)| *metrics)
            .ok_or_else(|| Error::RouteLookupFailed(format!("no route to ({}, {})", destination.lat, destination.lng)))
    }
}
