use jiff::Timestamp;
use tracing::{debug, instrument};

use crate::{
    distance::{
        distance_estimator::{DistanceEstimator, Estimator},
        geometric_estimator::GeometricEstimator,
        leg_estimate::LegEstimate,
    },
    problem::{
        location::Location,
        route::{Route, RouteStop},
    },
    solver::nearest_neighbor,
    timer_debug,
};

pub struct RoutePlanner<E = Estimator> {
    estimator: E,
}

impl<E> RoutePlanner<E>
where
    E: DistanceEstimator,
{
    pub fn new(estimator: E) -> Self {
        Self { estimator }
    }

    /// Plans a route departing now.
    pub async fn plan(&self, driver_id: &str, start: &Location, stops: &[Location]) -> Route {
        self.plan_at(driver_id, start, stops, Timestamp::now())
            .await
    }

    /// Orders `stops` from `start` and annotates every leg with its distance,
    /// duration and estimated arrival, departing at `departure`.
    #[instrument(skip_all, level = "debug", fields(driver_id = driver_id, stops = stops.len()))]
    pub async fn plan_at(
        &self,
        driver_id: &str,
        start: &Location,
        stops: &[Location],
        departure: Timestamp,
    ) -> Route {
        if stops.is_empty() {
            return Route::empty(driver_id.to_owned(), start.clone(), departure);
        }

        let ordered = timer_debug!(
            "Nearest neighbor ordering",
            nearest_neighbor::order(start, stops)
        );

        let mut path = Vec::with_capacity(ordered.len() + 1);
        path.push(start.clone());
        path.extend(ordered.iter().cloned());

        let legs = timer_debug!(
            "Leg estimation",
            self.estimator.estimate_path(&path, departure).await
        );
        if legs.len() != ordered.len() {
            debug!(
                "Estimator returned {} legs for {} stops, completing geometrically",
                legs.len(),
                ordered.len()
            );
        }

        let stops = annotate_stops(self.estimator.fallback(), start, ordered, legs, departure);

        Route::from_stops(driver_id.to_owned(), start.clone(), stops, departure)
    }
}

fn annotate_stops(
    fallback: GeometricEstimator,
    start: &Location,
    ordered: Vec<Location>,
    legs: Vec<LegEstimate>,
    departure: Timestamp,
) -> Vec<RouteStop> {
    let mut legs = legs.into_iter();

    let mut previous = start.clone();
    let mut arrival = departure;

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, location)| {
            let leg = legs
                .next()
                .unwrap_or_else(|| fallback.leg(&previous, &location));

            arrival = arrival + leg.duration;
            previous = location.clone();

            RouteStop::new(
                location,
                index + 1,
                leg.distance,
                leg.duration,
                arrival,
                leg.quality,
            )
        })
        .collect()
}
