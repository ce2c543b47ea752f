mod cache;
mod config;
mod errors;
mod fingerprint;
mod geo;
mod model;
mod orchestrator;
mod recommendations;
mod routes;
mod scoring;
mod state;
mod weighting;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::geo::{GeoService, HttpGeoService, NullGeoService};
use crate::orchestrator::MatcherOrchestrator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matching engine v{}", env!("CARGO_PKG_VERSION"));

    let geo: Arc<dyn GeoService> = match &config.geo_service_url {
        Some(url) => {
            info!(%url, "Geo Service configured");
            Arc::new(HttpGeoService::new(url.clone(), config.geo_service_timeout_ms))
        }
        None => {
            info!("No GEO_SERVICE_URL set, location scoring runs in heuristic-only mode");
            Arc::new(NullGeoService)
        }
    };

    let orchestrator = Arc::new(MatcherOrchestrator::new(
        geo,
        Duration::from_secs(config.cache_ttl_seconds),
        config.default_deadline_ms,
    ));

    let state = AppState { orchestrator, config: config.clone() };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
