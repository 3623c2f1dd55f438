pub mod duration_seconds;
pub mod estimate_quality;
pub mod kmh;
pub mod location;
pub mod meters;
pub mod route;
