use std::{future::Future, sync::Arc};

use courier_providers::{google_maps::GoogleMapsClient, travel_provider::TravelProvider};
use jiff::Timestamp;
use tracing::info;

use crate::{
    distance::{
        geometric_estimator::GeometricEstimator, leg_estimate::LegEstimate,
        provider_estimator::ProviderEstimator,
    },
    problem::{kmh::Kmh, location::Location},
};

/// Estimates distance and travel time between locations.
///
/// Implementations never fail: when a live provider is unavailable the
/// estimate degrades to a geometric one, visible only through
/// [`LegEstimate::quality`].
pub trait DistanceEstimator: Send + Sync {
    /// One estimate per consecutive pair of `path`, in order.
    fn estimate_path(
        &self,
        path: &[Location],
        departure: Timestamp,
    ) -> impl Future<Output = Vec<LegEstimate>> + Send;

    /// Closed-form estimator used for any leg `estimate_path` leaves out.
    fn fallback(&self) -> GeometricEstimator {
        GeometricEstimator::default()
    }

    fn estimate(
        &self,
        from: &Location,
        to: &Location,
        departure: Timestamp,
    ) -> impl Future<Output = LegEstimate> + Send {
        let path = [from.clone(), to.clone()];

        async move {
            let mut legs = self.estimate_path(&path, departure).await;

            match legs.pop() {
                Some(leg) => leg,
                None => self.fallback().leg(&path[0], &path[1]),
            }
        }
    }
}

/// The estimator selected by configuration.
pub enum Estimator {
    Geometric(GeometricEstimator),
    Provider(ProviderEstimator),
}

impl Estimator {
    /// Falls back to the geometric estimator when `provider` asks for a live
    /// provider but no client is configured.
    pub fn new(
        provider: TravelProvider,
        client: Option<Arc<GoogleMapsClient>>,
        fallback_speed: Kmh,
    ) -> Self {
        let fallback = GeometricEstimator::new(fallback_speed);

        match (provider, client) {
            (TravelProvider::GoogleMaps, Some(client)) => {
                Estimator::Provider(ProviderEstimator::new(client, fallback))
            }
            (TravelProvider::GoogleMaps, None) => {
                info!("No Google Maps client configured, using geometric estimates");
                Estimator::Geometric(fallback)
            }
            (TravelProvider::AsTheCrowFlies { speed_kmh }, _) => {
                Estimator::Geometric(GeometricEstimator::new(Kmh::new(speed_kmh)))
            }
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Estimator::Provider(_))
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator::Geometric(GeometricEstimator::default())
    }
}

impl DistanceEstimator for Estimator {
    async fn estimate_path(&self, path: &[Location], departure: Timestamp) -> Vec<LegEstimate> {
        match self {
            Estimator::Geometric(estimator) => estimator.estimate_path(path, departure).await,
            Estimator::Provider(estimator) => estimator.estimate_path(path, departure).await,
        }
    }

    fn fallback(&self) -> GeometricEstimator {
        match self {
            Estimator::Geometric(estimator) => estimator.fallback(),
            Estimator::Provider(estimator) => estimator.fallback(),
        }
    }
}
