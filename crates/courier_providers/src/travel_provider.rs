use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPEED_KMH: f64 = 30.0;

#[derive(Deserialize, Serialize, JsonSchema, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TravelProvider {
    /// https://developers.google.com/maps/documentation/directions
    GoogleMaps,

    AsTheCrowFlies { speed_kmh: f64 },
}

impl Default for TravelProvider {
    fn default() -> Self {
        TravelProvider::AsTheCrowFlies {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let provider: TravelProvider = serde_json::from_str(r#"{"type":"google_maps"}"#).unwrap();
        assert_eq!(provider, TravelProvider::GoogleMaps);

        let provider: TravelProvider =
            serde_json::from_str(r#"{"type":"as_the_crow_flies","speed_kmh":40.0}"#).unwrap();
        assert_eq!(provider, TravelProvider::AsTheCrowFlies { speed_kmh: 40.0 });
    }
}
