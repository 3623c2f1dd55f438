use std::{env, sync::Arc};

use clap::Args;
use courier_planner::{
    distance::distance_estimator::Estimator,
    problem::kmh::Kmh,
    solver::{planner_params::PlannerParams, route_planner::RoutePlanner},
};
use courier_providers::{
    google_maps::{GoogleMapsClient, GoogleMapsClientParams},
    travel_provider::{DEFAULT_SPEED_KMH, TravelProvider},
};
use tracing::info;

#[derive(Args)]
pub struct PlannerArgs {
    /// Only estimate geometrically, even when GOOGLE_MAPS_API_KEY is set
    #[arg(long)]
    offline: bool,

    /// Average speed of geometric estimates, in km/h
    #[arg(long, default_value_t = DEFAULT_SPEED_KMH)]
    speed: f64,

    /// Maximum number of routes planned at the same time
    #[arg(long, default_value_t = 8)]
    concurrency: usize,
}

impl PlannerArgs {
    pub fn params(&self) -> PlannerParams {
        PlannerParams {
            travel_provider: if self.offline {
                TravelProvider::AsTheCrowFlies {
                    speed_kmh: self.speed,
                }
            } else {
                TravelProvider::GoogleMaps
            },
            average_speed: Kmh::new(self.speed),
            batch_concurrency: self.concurrency,
            ..PlannerParams::default()
        }
    }

    pub fn google_maps_client(&self) -> Option<Arc<GoogleMapsClient>> {
        if self.offline {
            return None;
        }

        let api_key = env::var("GOOGLE_MAPS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            info!("GOOGLE_MAPS_API_KEY is not set, using geometric estimates");
        }

        api_key.map(|key| Arc::new(GoogleMapsClient::new(GoogleMapsClientParams::new(key))))
    }

    pub fn planner(&self) -> anyhow::Result<RoutePlanner> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            anyhow::bail!("--speed must be a positive number");
        }

        let params = self.params();
        let estimator = Estimator::new(
            params.travel_provider,
            self.google_maps_client(),
            params.average_speed,
        );

        Ok(RoutePlanner::new(estimator))
    }
}
