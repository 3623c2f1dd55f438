use std::sync::Arc;

use jiff::Timestamp;
use tracing::{debug, info, instrument};

use crate::{
    distance::distance_estimator::{DistanceEstimator, Estimator},
    problem::{location::Location, route::Route},
    solver::route_planner::RoutePlanner,
    traffic::{
        severity::Severity,
        traffic_cache::{InMemoryTrafficCache, TrafficCache},
        traffic_monitor::TrafficMonitor,
        traffic_source::{TrafficFeed, TrafficSource},
    },
};

/// Re-plans the unvisited part of a route when traffic towards the next
/// stop is heavy.
pub struct Rerouter<E = Estimator, S = TrafficFeed, C = InMemoryTrafficCache> {
    planner: Arc<RoutePlanner<E>>,
    monitor: Arc<TrafficMonitor<S, C>>,
    threshold: Severity,
}

impl<E, S, C> Rerouter<E, S, C>
where
    E: DistanceEstimator,
    S: TrafficSource,
    C: TrafficCache,
{
    pub fn new(planner: Arc<RoutePlanner<E>>, monitor: Arc<TrafficMonitor<S, C>>) -> Self {
        Self {
            planner,
            monitor,
            threshold: Severity::High,
        }
    }

    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    pub async fn reroute(
        &self,
        route: Route,
        current_location: &Location,
        current_stop_index: usize,
    ) -> Route {
        self.reroute_at(route, current_location, current_stop_index, Timestamp::now())
            .await
    }

    /// Stops before `current_stop_index` are completed and kept as they are.
    /// The remaining stops are planned again from `current_location` only when
    /// traffic towards the next stop reaches the threshold, otherwise `route`
    /// is returned untouched.
    #[instrument(skip_all, level = "debug", fields(driver_id = route.driver_id(), current_stop_index = current_stop_index))]
    pub async fn reroute_at(
        &self,
        route: Route,
        current_location: &Location,
        current_stop_index: usize,
        now: Timestamp,
    ) -> Route {
        let Some(next_stop) = route.stops().get(current_stop_index) else {
            debug!("No remaining stops, keeping route");
            return route;
        };

        let conditions = self
            .monitor
            .conditions(current_location, next_stop.location())
            .await;

        if conditions.severity < self.threshold {
            debug!(severity = %conditions.severity, "Traffic is acceptable, keeping route");
            return route;
        }

        let remaining = route.remaining_locations(current_stop_index);

        info!(
            severity = %conditions.severity,
            delay_minutes = conditions.delay_minutes,
            "Heavy traffic detected, rerouting {} remaining stops",
            remaining.len()
        );

        let tail = self
            .planner
            .plan_at(route.driver_id(), current_location, &remaining, now)
            .await;

        route.with_replanned_tail(current_stop_index, tail)
    }
}
