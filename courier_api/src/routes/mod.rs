pub mod batch_optimize;
pub mod health;
pub mod optimize;
pub mod reroute;
pub mod router;
