use std::sync::Arc;

use courier_planner::{
    distance::distance_estimator::Estimator,
    solver::{
        batch_coordinator::BatchCoordinator, planner_params::PlannerParams, rerouter::Rerouter,
        route_planner::RoutePlanner,
    },
    traffic::{
        traffic_cache::InMemoryTrafficCache, traffic_monitor::TrafficMonitor,
        traffic_source::TrafficFeed,
    },
};
use courier_providers::google_maps::GoogleMapsClient;

use crate::config::ServiceConfig;

pub struct AppState {
    pub planner: Arc<RoutePlanner>,
    pub rerouter: Rerouter,
    pub batch_coordinator: BatchCoordinator,
    pub expose_errors: bool,
}

impl AppState {
    pub fn new(params: &PlannerParams, client: Option<Arc<GoogleMapsClient>>) -> Self {
        let estimator = Estimator::new(
            params.travel_provider.clone(),
            client.clone(),
            params.average_speed,
        );
        let planner = Arc::new(RoutePlanner::new(estimator));

        let monitor = Arc::new(TrafficMonitor::new(
            TrafficFeed::new(client),
            InMemoryTrafficCache::with_capacity(
                params.traffic_freshness,
                params.traffic_cache_capacity,
            ),
        ));

        Self {
            rerouter: Rerouter::new(Arc::clone(&planner), monitor)
                .with_threshold(params.reroute_severity),
            batch_coordinator: BatchCoordinator::new(
                Arc::clone(&planner),
                params.batch_concurrency,
            ),
            planner,
            expose_errors: true,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        let client = config
            .google_maps_params()
            .map(|params| Arc::new(GoogleMapsClient::new(params)));

        Self {
            expose_errors: !config.production,
            ..Self::new(&config.planner_params(), client)
        }
    }
}
