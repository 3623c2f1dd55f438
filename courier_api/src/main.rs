use std::sync::Arc;

use anyhow::Context;
use axum::serve;
use courier_api::{app, config::ServiceConfig, openapi, state::AppState};
use mimalloc::MiMalloc;
use tracing::{Level, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ServiceConfig::from_env()?;
    let state = Arc::new(AppState::from_config(&config));

    if std::env::args().any(|a| a == "--generate-openapi") {
        let spec = serde_json::to_string_pretty(&openapi(state))?;
        std::fs::create_dir_all("schemas")?;
        std::fs::write("schemas/openapi.json", spec)?;
        info!("OpenAPI specification has been written to schemas/openapi.json");
        return Ok(());
    }

    if config.google_maps_api_key.is_none() {
        info!("GOOGLE_MAPS_API_KEY is not set, using geometric estimates without live traffic");
    }

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    info!(
        "Route optimization service listening on {} (production = {})",
        config.bind_address, config.production
    );

    serve(listener, app(state)).await?;

    Ok(())
}
