pub mod severity;
pub mod traffic_cache;
pub mod traffic_monitor;
pub mod traffic_sample;
pub mod traffic_source;
