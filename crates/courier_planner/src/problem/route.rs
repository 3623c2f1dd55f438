use jiff::{SignedDuration, Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::{
    duration_seconds, estimate_quality::EstimateQuality, location::Location, meters::Meters,
};

/// A stop of a planned route. Distance and duration are those of the leg
/// arriving at this stop.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    location: Location,
    sequence_number: usize,
    distance: Meters,

    #[serde(with = "duration_seconds")]
    #[schemars(with = "f64")]
    duration: SignedDuration,

    estimated_arrival: Timestamp,

    #[serde(default)]
    estimate_quality: EstimateQuality,
}

impl RouteStop {
    pub fn new(
        location: Location,
        sequence_number: usize,
        distance: Meters,
        duration: SignedDuration,
        estimated_arrival: Timestamp,
        estimate_quality: EstimateQuality,
    ) -> Self {
        Self {
            location,
            sequence_number,
            distance,
            duration,
            estimated_arrival,
            estimate_quality,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn sequence_number(&self) -> usize {
        self.sequence_number
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }

    pub fn estimated_arrival(&self) -> Timestamp {
        self.estimated_arrival
    }

    pub fn estimate_quality(&self) -> EstimateQuality {
        self.estimate_quality
    }

    pub fn with_sequence_number(mut self, sequence_number: usize) -> Self {
        self.sequence_number = sequence_number;
        self
    }
}

/// An ordered plan for one driver. Routes are values: re-planning always
/// builds a new one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    driver_id: String,
    start_location: Location,
    stops: Vec<RouteStop>,
    total_distance: Meters,

    #[serde(with = "duration_seconds")]
    #[schemars(with = "f64")]
    total_duration: SignedDuration,

    estimated_completion: Timestamp,

    #[serde(default)]
    estimate_quality: EstimateQuality,
}

impl Route {
    pub fn empty(driver_id: String, start_location: Location, departure: Timestamp) -> Self {
        Self::from_stops(driver_id, start_location, Vec::new(), departure)
    }

    /// Builds a route and derives its totals from `stops`.
    ///
    /// The completion is the arrival at the last stop, or `departure` when
    /// there is none.
    pub fn from_stops(
        driver_id: String,
        start_location: Location,
        stops: Vec<RouteStop>,
        departure: Timestamp,
    ) -> Self {
        let total_distance = stops.iter().map(|stop| stop.distance).sum();
        let total_duration = stops
            .iter()
            .fold(SignedDuration::ZERO, |total, stop| total + stop.duration);
        let estimated_completion = stops
            .last()
            .map_or(departure, |stop| stop.estimated_arrival);
        let estimate_quality = stops
            .iter()
            .fold(EstimateQuality::Exact, |quality, stop| {
                quality.combine(stop.estimate_quality)
            });

        Self {
            driver_id,
            start_location,
            stops,
            total_distance,
            total_duration,
            estimated_completion,
            estimate_quality,
        }
    }

    pub fn driver_id(&self) -> &str {
        &self.driver_id
    }

    pub fn start_location(&self) -> &Location {
        &self.start_location
    }

    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    pub fn total_distance(&self) -> Meters {
        self.total_distance
    }

    pub fn total_duration(&self) -> SignedDuration {
        self.total_duration
    }

    pub fn estimated_completion(&self) -> Timestamp {
        self.estimated_completion
    }

    pub fn estimate_quality(&self) -> EstimateQuality {
        self.estimate_quality
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Estimated arrival at the stop at `index`, `None` when out of range.
    pub fn stop_eta(&self, index: usize) -> Option<Timestamp> {
        self.stops.get(index).map(|stop| stop.estimated_arrival)
    }

    /// Locations of the stops from `index` onward, in visiting order.
    pub fn remaining_locations(&self, index: usize) -> Vec<Location> {
        self.stops
            .iter()
            .skip(index)
            .map(|stop| stop.location.clone())
            .collect()
    }

    /// Keeps the first `completed` stops verbatim and appends the stops of
    /// `tail`, renumbered to continue the sequence.
    ///
    /// Arrivals of `tail` are kept as planned from its own departure, so when
    /// the tail departs before the last kept arrival the arrivals are not
    /// monotonic across the joint.
    pub fn with_replanned_tail(self, completed: usize, tail: Route) -> Route {
        let completed = completed.min(self.stops.len());

        let mut stops = self.stops;
        stops.truncate(completed);
        stops.extend(
            tail.stops
                .into_iter()
                .enumerate()
                .map(|(offset, stop)| stop.with_sequence_number(completed + offset + 1)),
        );

        Route::from_stops(
            self.driver_id,
            self.start_location,
            stops,
            tail.estimated_completion,
        )
    }
}
