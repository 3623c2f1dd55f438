use jiff::Timestamp;
use tracing::{debug, warn};

use crate::{
    problem::location::Location,
    traffic::{
        traffic_cache::{InMemoryTrafficCache, TrafficCache, TrafficKey},
        traffic_sample::TrafficSample,
        traffic_source::{TrafficFeed, TrafficSource},
    },
};

/// Current traffic between two locations, cached for the freshness window
/// of the cache.
pub struct TrafficMonitor<S = TrafficFeed, C = InMemoryTrafficCache> {
    source: S,
    cache: C,
}

impl<S, C> TrafficMonitor<S, C>
where
    S: TrafficSource,
    C: TrafficCache,
{
    pub fn new(source: S, cache: C) -> Self {
        Self { source, cache }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Never fails: without a provider, or when it errors, conditions are
    /// assumed to be light.
    pub async fn conditions(&self, from: &Location, to: &Location) -> TrafficSample {
        let key = TrafficKey::new(from, to);

        if let Some(sample) = self.cache.get(&key, Timestamp::now()) {
            debug!(?key, "Traffic conditions served from cache");
            return sample;
        }

        match self.source.travel_conditions(from, to).await {
            Ok(Some(leg)) => {
                let delay_minutes = (leg.traffic_delay() / 60.0).round() as i64;
                let sample = TrafficSample::from_delay_minutes(delay_minutes);

                debug!(
                    ?key,
                    severity = %sample.severity,
                    delay_minutes,
                    "Fetched traffic conditions"
                );

                self.cache.insert(key, sample, Timestamp::now());
                sample
            }
            Ok(None) => TrafficSample::optimistic(),
            Err(error) => {
                warn!(%error, "Traffic provider failed, assuming light traffic");
                TrafficSample::optimistic()
            }
        }
    }
}
