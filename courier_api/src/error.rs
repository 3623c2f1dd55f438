use aide::OperationOutput;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use courier_planner::error::ValidationError;

use crate::response::ApiResponse;

pub enum ApiError {
    BadRequest(String),
    NotFound(String),

    /// The detail is only present when it may be shown to clients
    InternalServerError(Option<String>),
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, ApiResponse::failure(message, None))
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, ApiResponse::failure(message, None))
            }
            ApiError::InternalServerError(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponse::failure(String::from("Internal server error"), detail),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl OperationOutput for ApiError {
    type Inner = ApiResponse<()>;
}
