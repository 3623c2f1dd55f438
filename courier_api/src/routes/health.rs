use axum::Json;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::Serialize;

pub const SERVICE_NAME: &str = "route-optimization-service";

#[derive(Serialize, JsonSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub service: &'static str,
    pub status: &'static str,
    pub timestamp: Timestamp,
}

#[derive(Serialize, JsonSchema)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        service: SERVICE_NAME,
        status: "healthy",
        timestamp: Timestamp::now(),
    })
}

pub async fn service_info_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}
