pub mod batch_coordinator;
pub mod nearest_neighbor;
pub mod planner_params;
pub mod rerouter;
pub mod route_planner;
