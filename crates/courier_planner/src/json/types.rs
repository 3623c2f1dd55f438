use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::PlanningError,
    problem::{location::Location, route::Route},
};

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename = "RouteRequest", rename_all = "camelCase")]
pub struct JsonRouteRequest {
    pub driver_id: String,
    pub start_location: Location,
    pub delivery_locations: Vec<Location>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename = "RerouteRequest", rename_all = "camelCase")]
pub struct JsonRerouteRequest {
    pub current_route: Route,
    pub current_location: Location,

    /// Index of the next stop to visit, every stop before it is completed
    pub current_stop_index: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename = "BatchRouteRequest")]
pub struct JsonBatchRouteRequest {
    pub deliveries: Vec<JsonRouteRequest>,
}

/// Result of one entry of a batch, in the order of the request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename = "BatchOutcome")]
pub struct JsonBatchOutcome {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Route>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Result<Route, PlanningError>> for JsonBatchOutcome {
    fn from(result: Result<Route, PlanningError>) -> Self {
        match result {
            Ok(route) => JsonBatchOutcome {
                success: true,
                data: Some(route),
                message: None,
            },
            Err(error) => JsonBatchOutcome {
                success: false,
                data: None,
                message: Some(error.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ValidationError, test_utils::create_route};

    #[test]
    fn test_deserialize_route_request() {
        let body = r#"{
            "driverId": "driver-1",
            "startLocation": { "latitude": 40.7128, "longitude": -74.006, "address": "Depot" },
            "deliveryLocations": [
                { "latitude": 40.73, "longitude": -73.99, "address": "A", "orderId": "order-1" }
            ]
        }"#;

        let request: JsonRouteRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.driver_id, "driver-1");
        assert_eq!(request.start_location.address(), "Depot");
        assert_eq!(request.delivery_locations[0].order_id(), Some("order-1"));
    }

    #[test]
    fn test_negative_stop_index_is_rejected() {
        let route = serde_json::to_value(create_route(&[(1000.0, 60)])).unwrap();
        let body = serde_json::json!({
            "currentRoute": route,
            "currentLocation": { "latitude": 0.0, "longitude": 0.5, "address": "Here" },
            "currentStopIndex": -1
        });

        assert!(serde_json::from_value::<JsonRerouteRequest>(body).is_err());
    }

    #[test]
    fn test_outcome_from_result() {
        let outcome = JsonBatchOutcome::from(Ok(create_route(&[(1000.0, 60)])));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("message").is_none());

        let outcome = JsonBatchOutcome::from(Err(PlanningError::from(ValidationError::new(
            "startLocation.latitude",
            "must be less than or equal to 90",
        ))));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(
            json["message"],
            "\"startLocation.latitude\" must be less than or equal to 90"
        );
    }
}
