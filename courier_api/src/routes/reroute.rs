use std::sync::Arc;

use axum::{Json, extract::State};
use courier_planner::{
    json::{types::JsonRerouteRequest, validation::Validate},
    problem::route::Route,
};

use crate::{error::ApiError, extract::ApiJson, response::ApiResponse, state::AppState};

pub async fn reroute_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<JsonRerouteRequest>,
) -> Result<Json<ApiResponse<Route>>, ApiError> {
    body.validate()?;

    let route = state
        .rerouter
        .reroute(
            body.current_route,
            &body.current_location,
            body.current_stop_index,
        )
        .await;

    Ok(Json(ApiResponse::ok(route)))
}
