use std::sync::Arc;

use futures::{StreamExt, stream};
use jiff::Timestamp;
use tracing::{debug, error, instrument};

use crate::{
    distance::distance_estimator::{DistanceEstimator, Estimator},
    error::PlanningError,
    json::{types::JsonRouteRequest, validation::Validate},
    problem::route::Route,
    solver::route_planner::RoutePlanner,
};

/// Plans independent routes concurrently. Every request gets its own
/// outcome, in the order of the input.
pub struct BatchCoordinator<E = Estimator> {
    planner: Arc<RoutePlanner<E>>,
    concurrency: usize,
}

impl<E> BatchCoordinator<E>
where
    E: DistanceEstimator + 'static,
{
    pub fn new(planner: Arc<RoutePlanner<E>>, concurrency: usize) -> Self {
        Self {
            planner,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub async fn plan_batch(
        &self,
        requests: Vec<JsonRouteRequest>,
    ) -> Vec<Result<Route, PlanningError>> {
        self.plan_batch_at(requests, Timestamp::now()).await
    }

    #[instrument(skip_all, level = "debug", fields(requests = requests.len()))]
    pub async fn plan_batch_at(
        &self,
        requests: Vec<JsonRouteRequest>,
        departure: Timestamp,
    ) -> Vec<Result<Route, PlanningError>> {
        stream::iter(requests.into_iter().enumerate())
            .map(|(index, request)| {
                let planner = Arc::clone(&self.planner);
                async move {
                    let result = plan_entry(planner, request, departure).await;
                    if let Err(error) = &result {
                        debug!(index, %error, "Batch entry failed");
                    }
                    result
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

async fn plan_entry<E>(
    planner: Arc<RoutePlanner<E>>,
    request: JsonRouteRequest,
    departure: Timestamp,
) -> Result<Route, PlanningError>
where
    E: DistanceEstimator + 'static,
{
    request.validate()?;

    let task = tokio::spawn(async move {
        planner
            .plan_at(
                &request.driver_id,
                &request.start_location,
                &request.delivery_locations,
                departure,
            )
            .await
    });

    task.await.map_err(|join_error| {
        error!(error = %join_error, "Planning task did not complete");
        PlanningError::Internal(join_error.to_string())
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        distance::{geometric_estimator::GeometricEstimator, leg_estimate::LegEstimate},
        error::ValidationError,
        problem::location::Location,
        test_utils::{create_location_row, departure, location},
    };

    fn request(driver_id: &str, start: Location, stops: Vec<Location>) -> JsonRouteRequest {
        JsonRouteRequest {
            driver_id: driver_id.to_owned(),
            start_location: start,
            delivery_locations: stops,
        }
    }

    fn coordinator(concurrency: usize) -> BatchCoordinator<GeometricEstimator> {
        BatchCoordinator::new(
            Arc::new(RoutePlanner::new(GeometricEstimator::default())),
            concurrency,
        )
    }

    #[tokio::test]
    async fn test_invalid_entry_does_not_affect_siblings() {
        let requests = vec![
            request("valid", location(0.0, 0.0), create_location_row(2)),
            request("invalid", location(0.0, 0.0), vec![location(91.0, 0.0)]),
        ];

        let results = coordinator(8).plan_batch_at(requests, departure()).await;

        assert_eq!(results.len(), 2);

        let route = results[0].as_ref().unwrap();
        assert_eq!(route.driver_id(), "valid");
        assert_eq!(route.len(), 2);

        match &results[1] {
            Err(PlanningError::Validation(ValidationError { field, .. })) => {
                assert_eq!(field, "deliveryLocations[0].latitude");
            }
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_plans() {
        let coordinator = coordinator(0);
        assert_eq!(coordinator.concurrency(), 1);

        let results = coordinator
            .plan_batch_at(
                vec![request("driver", location(0.0, 0.0), create_location_row(1))],
                departure(),
            )
            .await;

        assert!(results[0].is_ok());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = coordinator(4).plan_batch_at(Vec::new(), departure()).await;
        assert!(results.is_empty());
    }

    /// Longer paths answer faster, so later entries finish first.
    struct ReversedLatencyEstimator;

    impl DistanceEstimator for ReversedLatencyEstimator {
        async fn estimate_path(&self, path: &[Location], _departure: Timestamp) -> Vec<LegEstimate> {
            tokio::time::sleep(Duration::from_millis(100 / path.len() as u64)).await;
            GeometricEstimator::default().legs(path)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_follow_input_order() {
        let requests: Vec<JsonRouteRequest> = (1..=6)
            .map(|stops| {
                request(
                    &format!("driver-{stops}"),
                    location(0.0, 0.0),
                    create_location_row(stops),
                )
            })
            .collect();

        let planner = Arc::new(RoutePlanner::new(ReversedLatencyEstimator));
        let coordinator = BatchCoordinator::new(planner, 3);
        let results = coordinator.plan_batch_at(requests, departure()).await;

        let drivers: Vec<&str> = results
            .iter()
            .map(|result| result.as_ref().unwrap().driver_id())
            .collect();

        assert_eq!(
            drivers,
            vec!["driver-1", "driver-2", "driver-3", "driver-4", "driver-5", "driver-6"]
        );
    }

    struct PanickingEstimator;

    impl DistanceEstimator for PanickingEstimator {
        async fn estimate_path(&self, path: &[Location], _departure: Timestamp) -> Vec<LegEstimate> {
            if path.len() > 2 {
                panic!("estimator blew up");
            }
            Vec::new()
        }
    }

    #[tokio::test]
    async fn test_panicking_entry_is_reported_as_internal() {
        let planner = Arc::new(RoutePlanner::new(PanickingEstimator));
        let coordinator = BatchCoordinator::new(planner, 2);

        let results = coordinator
            .plan_batch_at(
                vec![
                    request("panics", location(0.0, 0.0), create_location_row(3)),
                    request("plans", location(0.0, 0.0), create_location_row(1)),
                ],
                departure(),
            )
            .await;

        assert!(matches!(results[0], Err(PlanningError::Internal(_))));

        // Legs missing from the estimator are completed geometrically
        let route = results[1].as_ref().unwrap();
        assert_eq!(route.driver_id(), "plans");
        assert_eq!(route.len(), 1);
    }
}
