pub mod config;
mod docs;
pub mod error;
mod extract;
pub mod response;
pub mod routes;
pub mod state;

use std::{any::Any, sync::Arc};

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
    transform::TransformOpenApi,
};
use axum::{
    Extension, Router,
    http::Method,
    response::{IntoResponse, Response},
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
};
use tracing::error;

use crate::{
    docs::docs_routes,
    error::ApiError,
    routes::{
        health::{health_handler, service_info_handler},
        router::route_routes,
    },
    state::AppState,
};

/// The whole service, documented under `/docs`.
pub fn app(state: Arc<AppState>) -> Router {
    let (app, api) = api_router(state.clone());
    let expose_errors = state.expose_errors;

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(AnyOrigin)
        .allow_headers(AnyOrigin);

    app.fallback(not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer)
                .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send>| {
                    panic_response(panic, expose_errors)
                })),
        )
        .layer(Extension(Arc::new(api)))
        .with_state(state)
}

/// The OpenAPI document of every documented route.
pub fn openapi(state: Arc<AppState>) -> OpenApi {
    api_router(state).1
}

fn api_router(state: Arc<AppState>) -> (Router<Arc<AppState>>, OpenApi) {
    aide::generate::on_error(|error| tracing::error!("{}", error));
    aide::generate::extract_schemas(true);

    let mut api = OpenApi::default();

    let app = ApiRouter::new()
        .nest_api_service("/docs", docs_routes())
        .nest_api_service("/api/v1/routes", route_routes(state))
        .api_route("/health", get(health_handler))
        .api_route("/", get(service_info_handler))
        .finish_api_with(&mut api, api_docs);

    (app, api)
}

fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Courier Route Planner API")
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound(String::from("Route not found"))
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, expose_errors: bool) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("Unknown panic")
    };

    error!(detail, "Request handler panicked");

    ApiError::InternalServerError(expose_errors.then_some(detail)).into_response()
}
