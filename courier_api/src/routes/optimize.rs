use std::sync::Arc;

use axum::{Json, extract::State};
use courier_planner::{
    json::{types::JsonRouteRequest, validation::Validate},
    problem::route::Route,
};

use crate::{error::ApiError, extract::ApiJson, response::ApiResponse, state::AppState};

pub async fn optimize_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<JsonRouteRequest>,
) -> Result<Json<ApiResponse<Route>>, ApiError> {
    body.validate()?;

    let route = state
        .planner
        .plan(
            &body.driver_id,
            &body.start_location,
            &body.delivery_locations,
        )
        .await;

    Ok(Json(ApiResponse::ok(route)))
}
