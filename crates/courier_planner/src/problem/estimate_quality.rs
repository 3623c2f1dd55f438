use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether a figure came from a live provider or from a closed-form estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EstimateQuality {
    Exact,

    // Unknown provenance is treated as approximate
    #[default]
    Approximate,
}

impl EstimateQuality {
    pub fn combine(self, other: EstimateQuality) -> EstimateQuality {
        match (self, other) {
            (EstimateQuality::Exact, EstimateQuality::Exact) => EstimateQuality::Exact,
            _ => EstimateQuality::Approximate,
        }
    }
}
