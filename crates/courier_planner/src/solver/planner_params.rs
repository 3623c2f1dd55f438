use courier_providers::travel_provider::{DEFAULT_SPEED_KMH, TravelProvider};
use jiff::SignedDuration;

use crate::{
    problem::kmh::Kmh,
    traffic::{severity::Severity, traffic_cache::DEFAULT_CAPACITY},
};

#[derive(Clone, Debug)]
pub struct PlannerParams {
    pub travel_provider: TravelProvider,

    /// Speed used when a leg has to be estimated geometrically
    pub average_speed: Kmh,

    pub traffic_freshness: SignedDuration,

    /// Most traffic samples kept in memory at once
    pub traffic_cache_capacity: usize,

    /// Lowest traffic severity that discards the remaining plan
    pub reroute_severity: Severity,

    /// Maximum number of routes planned at the same time in a batch
    pub batch_concurrency: usize,
}

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            travel_provider: TravelProvider::GoogleMaps,
            average_speed: Kmh::new(DEFAULT_SPEED_KMH),
            traffic_freshness: SignedDuration::from_mins(5),
            traffic_cache_capacity: DEFAULT_CAPACITY,
            reroute_severity: Severity::High,
            batch_concurrency: 8,
        }
    }
}
