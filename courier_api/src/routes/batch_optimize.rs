use std::sync::Arc;

use axum::{Json, extract::State};
use courier_planner::{
    error::PlanningError,
    json::{
        types::{JsonBatchOutcome, JsonBatchRouteRequest},
        validation::Validate,
    },
};

use crate::{error::ApiError, extract::ApiJson, response::ApiResponse, state::AppState};

pub async fn batch_optimize_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<JsonBatchRouteRequest>,
) -> Result<Json<ApiResponse<Vec<JsonBatchOutcome>>>, ApiError> {
    body.validate()?;

    let outcomes = state
        .batch_coordinator
        .plan_batch(body.deliveries)
        .await
        .into_iter()
        .map(|result| match result {
            Err(PlanningError::Internal(_)) if !state.expose_errors => JsonBatchOutcome {
                success: false,
                data: None,
                message: Some(String::from("Failed to optimize route")),
            },
            result => JsonBatchOutcome::from(result),
        })
        .collect();

    Ok(Json(ApiResponse::ok(outcomes)))
}
