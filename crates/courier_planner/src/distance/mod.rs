pub mod distance_estimator;
pub mod geometric_estimator;
pub mod leg_estimate;
pub mod provider_estimator;
