use courier_providers::travel_leg::TravelLeg;
use jiff::SignedDuration;

use crate::problem::{estimate_quality::EstimateQuality, meters::Meters};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegEstimate {
    pub distance: Meters,
    pub duration: SignedDuration,
    pub quality: EstimateQuality,
}

impl LegEstimate {
    /// Converts a provider leg, preferring the duration in traffic.
    pub fn from_travel_leg(leg: &TravelLeg, quality: EstimateQuality) -> Self {
        Self {
            distance: Meters::new(leg.distance),
            duration: SignedDuration::from_secs_f64(leg.expected_time().max(0.0)),
            quality,
        }
    }
}
