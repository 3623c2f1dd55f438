use crate::{
    error::ValidationError,
    json::types::{JsonBatchRouteRequest, JsonRerouteRequest, JsonRouteRequest},
    problem::location::Location,
};

/// Checks that do not fit in the type system: coordinate ranges, required
/// strings and non-empty lists. The first failing field is reported.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, "must be a number"));
    }

    if value < min {
        return Err(ValidationError::new(
            field,
            format!("must be greater than or equal to {min}"),
        ));
    }

    if value > max {
        return Err(ValidationError::new(
            field,
            format!("must be less than or equal to {max}"),
        ));
    }

    Ok(())
}

fn check_not_blank(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is not allowed to be empty"));
    }

    Ok(())
}

fn check_not_empty<T>(field: &str, values: &[T]) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::new(field, "must contain at least 1 items"));
    }

    Ok(())
}

impl Validate for Location {
    fn validate(&self) -> Result<(), ValidationError> {
        check_range("latitude", self.lat(), -90.0, 90.0)?;
        check_range("longitude", self.lon(), -180.0, 180.0)?;
        check_not_blank("address", self.address())
    }
}

impl Validate for JsonRouteRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_not_blank("driverId", &self.driver_id)?;

        self.start_location
            .validate()
            .map_err(|error| error.within("startLocation"))?;

        check_not_empty("deliveryLocations", &self.delivery_locations)?;

        for (index, location) in self.delivery_locations.iter().enumerate() {
            location
                .validate()
                .map_err(|error| error.within(format!("deliveryLocations[{index}]")))?;
        }

        Ok(())
    }
}

/// Completed stops are kept as they are, only the stops that get replanned
/// are checked.
impl Validate for JsonRerouteRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        self.current_location
            .validate()
            .map_err(|error| error.within("currentLocation"))?;

        let remaining = self
            .current_route
            .stops()
            .iter()
            .enumerate()
            .skip(self.current_stop_index);

        for (index, stop) in remaining {
            stop.location()
                .validate()
                .map_err(|error| error.within(format!("currentRoute.stops[{index}].location")))?;
        }

        Ok(())
    }
}

/// Only the shape of the batch is checked here, entries are validated one by
/// one when planned so an invalid entry does not reject its siblings.
impl Validate for JsonBatchRouteRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_not_empty("deliveries", &self.deliveries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    use crate::{
        problem::{
            estimate_quality::EstimateQuality,
            meters::Meters,
            route::{Route, RouteStop},
        },
        test_utils::{create_location_row, create_route, departure, location},
    };

    fn request(start: Location, stops: Vec<Location>) -> JsonRouteRequest {
        JsonRouteRequest {
            driver_id: String::from("driver-1"),
            start_location: start,
            delivery_locations: stops,
        }
    }

    #[test]
    fn test_valid_request() {
        let request = request(location(0.0, 0.0), create_location_row(3));
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn test_coordinate_bounds_are_inclusive() {
        assert!(location(90.0, 180.0).validate().is_ok());
        assert!(location(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        let error = request(location(0.0, 0.0), vec![location(0.0, 1.0), location(91.0, 0.0)])
            .validate()
            .unwrap_err();

        assert_eq!(error.field, "deliveryLocations[1].latitude");
        assert_eq!(error.reason, "must be less than or equal to 90");
    }

    #[test]
    fn test_longitude_out_of_range() {
        let error = request(location(0.0, -180.5), create_location_row(1))
            .validate()
            .unwrap_err();

        assert_eq!(error.field, "startLocation.longitude");
        assert_eq!(error.reason, "must be greater than or equal to -180");
    }

    #[test]
    fn test_nan_coordinate() {
        let error = Location::new(f64::NAN, 0.0, "Nowhere").validate().unwrap_err();
        assert_eq!(error.field, "latitude");
        assert_eq!(error.reason, "must be a number");
    }

    #[test]
    fn test_empty_address() {
        let error = request(location(0.0, 0.0), vec![Location::new(0.0, 1.0, "  ")])
            .validate()
            .unwrap_err();

        assert_eq!(error.field, "deliveryLocations[0].address");
    }

    #[test]
    fn test_empty_driver_id() {
        let mut request = request(location(0.0, 0.0), create_location_row(1));
        request.driver_id = String::new();

        assert_eq!(request.validate().unwrap_err().field, "driverId");
    }

    #[test]
    fn test_no_delivery_locations() {
        let error = request(location(0.0, 0.0), Vec::new())
            .validate()
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "\"deliveryLocations\" must contain at least 1 items"
        );
    }

    #[test]
    fn test_reroute_request() {
        let reroute = JsonRerouteRequest {
            current_route: create_route(&[(1000.0, 60)]),
            current_location: location(-95.0, 0.0),
            current_stop_index: 0,
        };

        assert_eq!(
            reroute.validate().unwrap_err().field,
            "currentLocation.latitude"
        );
    }

    fn route_through(locations: Vec<Location>) -> Route {
        let stops = locations
            .into_iter()
            .enumerate()
            .map(|(index, location)| {
                RouteStop::new(
                    location,
                    index + 1,
                    Meters::new(1000.0),
                    SignedDuration::from_mins(2),
                    departure() + SignedDuration::from_mins(2 * (index as i64 + 1)),
                    EstimateQuality::Approximate,
                )
            })
            .collect();

        Route::from_stops(String::from("driver"), location(0.0, 0.0), stops, departure())
    }

    #[test]
    fn test_reroute_remaining_stops_are_checked() {
        let reroute = JsonRerouteRequest {
            current_route: route_through(vec![location(0.0, 1.0), location(0.0, 200.0)]),
            current_location: location(0.0, 0.5),
            current_stop_index: 0,
        };

        let error = reroute.validate().unwrap_err();
        assert_eq!(error.field, "currentRoute.stops[1].location.longitude");
        assert_eq!(error.reason, "must be less than or equal to 180");
    }

    #[test]
    fn test_reroute_completed_stops_are_not_checked() {
        let reroute = JsonRerouteRequest {
            current_route: route_through(vec![location(0.0, 200.0), location(0.0, 1.0)]),
            current_location: location(0.0, 0.5),
            current_stop_index: 1,
        };

        assert_eq!(reroute.validate(), Ok(()));
    }

    #[test]
    fn test_batch_checks_only_its_shape() {
        let empty = JsonBatchRouteRequest { deliveries: Vec::new() };
        assert_eq!(empty.validate().unwrap_err().field, "deliveries");

        let batch = JsonBatchRouteRequest {
            deliveries: vec![request(location(91.0, 0.0), create_location_row(1))],
        };
        assert!(batch.validate().is_ok());
    }
}
