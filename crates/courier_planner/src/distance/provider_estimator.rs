use std::sync::Arc;

use courier_providers::google_maps::{GoogleMapsClient, waypoint_chunks};
use jiff::{SignedDuration, Timestamp};
use tracing::{debug, warn};

use crate::{
    distance::{
        distance_estimator::DistanceEstimator, geometric_estimator::GeometricEstimator,
        leg_estimate::LegEstimate,
    },
    problem::{estimate_quality::EstimateQuality, location::Location},
};

/// Live estimates from Google Maps. Any leg the provider cannot describe,
/// because the request failed or the response skipped it, is estimated
/// geometrically instead.
pub struct ProviderEstimator {
    client: Arc<GoogleMapsClient>,
    fallback: GeometricEstimator,
}

impl ProviderEstimator {
    pub fn new(client: Arc<GoogleMapsClient>, fallback: GeometricEstimator) -> Self {
        Self { client, fallback }
    }
}

impl DistanceEstimator for ProviderEstimator {
    async fn estimate_path(&self, path: &[Location], departure: Timestamp) -> Vec<LegEstimate> {
        let mut estimates = Vec::with_capacity(path.len().saturating_sub(1));
        let mut chunk_departure = departure;

        for chunk in waypoint_chunks(path.len()) {
            let points = &path[chunk];
            let legs = match self.client.fetch_legs(points, chunk_departure).await {
                Ok(legs) => legs,
                Err(error) => {
                    warn!(
                        %error,
                        "Distance provider failed, estimating {} legs geometrically",
                        points.len() - 1
                    );
                    vec![None; points.len() - 1]
                }
            };

            for (pair, leg) in points.windows(2).zip(legs) {
                let estimate = match leg {
                    Some(leg) => LegEstimate::from_travel_leg(&leg, EstimateQuality::Exact),
                    None => {
                        debug!("Leg missing from provider response, estimating geometrically");
                        self.fallback.leg(&pair[0], &pair[1])
                    }
                };

                estimates.push(estimate);
            }

            let chunk_duration = estimates
                .iter()
                .fold(SignedDuration::ZERO, |total, leg| total + leg.duration);
            chunk_departure = departure + chunk_duration;
        }

        estimates
    }

    fn fallback(&self) -> GeometricEstimator {
        self.fallback
    }
}
