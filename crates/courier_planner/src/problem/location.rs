use courier_providers::as_the_crow_flies::haversine_distance;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::meters::Meters;

/// A point on the map a driver starts from or delivers to.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    latitude: f64,
    longitude: f64,
    address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order_id: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            address: address.into(),
            order_id: None,
        }
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn lat(&self) -> f64 {
        self.latitude
    }

    pub fn lon(&self) -> f64 {
        self.longitude
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    pub fn haversine_distance(&self, to: &Location) -> Meters {
        Meters::new(haversine_distance(self, to))
    }
}

impl From<&Location> for geo_types::Point<f64> {
    fn from(location: &Location) -> Self {
        geo_types::Point::new(location.longitude, location.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let location: Location = serde_json::from_str(
            r#"{"latitude": 40.71, "longitude": -74.0, "address": "Main St 1", "orderId": "ord-1"}"#,
        )
        .unwrap();

        assert_eq!(location.lat(), 40.71);
        assert_eq!(location.lon(), -74.0);
        assert_eq!(location.address(), "Main St 1");
        assert_eq!(location.order_id(), Some("ord-1"));
    }

    #[test]
    fn test_order_id_is_optional() {
        let location: Location =
            serde_json::from_str(r#"{"latitude": 0, "longitude": 0, "address": "x"}"#).unwrap();
        assert_eq!(location.order_id(), None);

        let json = serde_json::to_value(&location).unwrap();
        assert!(json.get("orderId").is_none());
    }

    #[test]
    fn test_point_is_lon_lat() {
        let point: geo_types::Point = (&Location::new(50.0, 4.0, "")).into();
        assert_eq!(point.x(), 4.0);
        assert_eq!(point.y(), 50.0);
    }
}
