use courier_providers::travel_provider::DEFAULT_SPEED_KMH;
use jiff::Timestamp;

use crate::{
    distance::{distance_estimator::DistanceEstimator, leg_estimate::LegEstimate},
    problem::{estimate_quality::EstimateQuality, kmh::Kmh, location::Location},
};

/// Great-circle distance driven at a constant average speed. Never fails.
#[derive(Debug, Clone, Copy)]
pub struct GeometricEstimator {
    speed: Kmh,
}

impl Default for GeometricEstimator {
    fn default() -> Self {
        Self {
            speed: Kmh::new(DEFAULT_SPEED_KMH),
        }
    }
}

impl GeometricEstimator {
    pub fn new(speed: Kmh) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> Kmh {
        self.speed
    }

    pub fn leg(&self, from: &Location, to: &Location) -> LegEstimate {
        let distance = from.haversine_distance(to);

        LegEstimate {
            distance,
            duration: distance / self.speed,
            quality: EstimateQuality::Approximate,
        }
    }

    pub fn legs(&self, path: &[Location]) -> Vec<LegEstimate> {
        path.windows(2)
            .map(|pair| self.leg(&pair[0], &pair[1]))
            .collect()
    }
}

impl DistanceEstimator for GeometricEstimator {
    async fn estimate_path(&self, path: &[Location], _departure: Timestamp) -> Vec<LegEstimate> {
        self.legs(path)
    }

    fn fallback(&self) -> GeometricEstimator {
        *self
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;
    use crate::{problem::meters::Meters, test_utils::location};

    #[test]
    fn test_leg() {
        let estimator = GeometricEstimator::default();
        let leg = estimator.leg(&location(0.0, 0.0), &location(0.0, 1.0));

        assert!((leg.distance.value() - 111_194.93).abs() < 0.01);
        // 111.19km at 30km/h
        assert_eq!(leg.duration.as_secs(), 13343);
        assert_eq!(leg.quality, EstimateQuality::Approximate);
    }

    #[test]
    fn test_same_location_is_zero() {
        let estimator = GeometricEstimator::default();
        let leg = estimator.leg(&location(50.85, 4.35), &location(50.85, 4.35));

        assert_eq!(leg.distance, Meters::ZERO);
        assert_eq!(leg.duration, SignedDuration::ZERO);
    }

    #[tokio::test]
    async fn test_estimate_path() {
        let estimator = GeometricEstimator::new(Kmh::new(60.0));
        let path = vec![location(0.0, 0.0), location(0.0, 1.0), location(0.0, 3.0)];

        let legs = estimator
            .estimate_path(&path, crate::test_utils::departure())
            .await;

        assert_eq!(legs.len(), 2);
        assert!((legs[1].distance.value() - 2.0 * legs[0].distance.value()).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_estimate_single_leg() {
        let estimator = GeometricEstimator::default();
        let leg = estimator
            .estimate(
                &location(0.0, 0.0),
                &location(0.0, 1.0),
                crate::test_utils::departure(),
            )
            .await;

        assert_eq!(leg, estimator.leg(&location(0.0, 0.0), &location(0.0, 1.0)));
    }
}
