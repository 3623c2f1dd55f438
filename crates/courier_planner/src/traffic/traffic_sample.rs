use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{problem::estimate_quality::EstimateQuality, traffic::severity::Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSample {
    pub severity: Severity,
    pub delay_minutes: i64,
    pub quality: EstimateQuality,
}

impl TrafficSample {
    pub fn from_delay_minutes(delay_minutes: i64) -> Self {
        Self {
            severity: Severity::from_delay_minutes(delay_minutes),
            delay_minutes,
            quality: EstimateQuality::Exact,
        }
    }

    /// Assumed conditions when nothing is known, never blocks planning.
    pub fn optimistic() -> Self {
        Self {
            severity: Severity::Low,
            delay_minutes: 0,
            quality: EstimateQuality::Approximate,
        }
    }
}
