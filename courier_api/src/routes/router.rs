use std::sync::Arc;

use aide::axum::{
    ApiRouter,
    routing::{get, post},
};

use crate::{
    routes::{
        batch_optimize::batch_optimize_handler, health::health_handler,
        optimize::optimize_handler, reroute::reroute_handler,
    },
    state::AppState,
};

pub fn route_routes(state: Arc<AppState>) -> ApiRouter {
    aide::generate::infer_responses(true);
    let router = ApiRouter::new()
        .api_route("/optimize", post(optimize_handler))
        .api_route("/reroute", post(reroute_handler))
        .api_route("/batch-optimize", post(batch_optimize_handler))
        .api_route("/health", get(health_handler))
        .with_state(state);

    aide::generate::infer_responses(false);

    router
}
