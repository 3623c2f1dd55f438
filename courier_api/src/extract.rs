use aide::{OperationInput, generate::GenContext, openapi::Operation};
use axum::{Json, extract::FromRequest};
use schemars::JsonSchema;

use crate::error::ApiError;

/// `Json` whose rejections use the error envelope.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl<T: JsonSchema> OperationInput for ApiJson<T> {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        Json::<T>::operation_input(ctx, operation);
    }
}
