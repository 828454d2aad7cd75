mod ai_gateway;
mod career;
mod config;
mod db;
mod errors;
mod extractor;
mod leaderboard;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_gateway::gemini::{GeminiProvider, MODEL};
use crate::ai_gateway::AiGateway;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Road2Success API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    // Initialize AI gateway
    let provider = GeminiProvider::new(config.gemini_api_key.clone())
        .context("Failed to build HTTP client for the AI provider")?;
    let ai = AiGateway::new(Arc::new(provider));
    info!("AI gateway initialized (model: {MODEL})");

    let state = AppState { db, ai };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts CORS to the deployed frontend when one is configured.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    let Some(frontend_url) = &config.frontend_url else {
        info!("FRONTEND_URL not set; CORS is permissive");
        return Ok(CorsLayer::permissive());
    };

    let origin: HeaderValue = frontend_url
        .parse()
        .with_context(|| format!("FRONTEND_URL '{frontend_url}' is not a valid origin"))?;
    info!("CORS restricted to {frontend_url}");

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}
