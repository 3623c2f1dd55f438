use schemars::JsonSchema;
use serde::Serialize;

/// Envelope shared by every endpoint. `success` is false for any non-2xx
/// response.
#[derive(Serialize, JsonSchema)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(message: String, error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            error,
        }
    }
}
