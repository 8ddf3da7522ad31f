//! Readsync Server - Headless Daemon
//!
//! A pure Rust HTTP server that:
//! - Mirrors publisher feeds from the upstream platform into SQLite
//! - Manages the platform credential pool (login handshake, containment)
//! - Provides a REST API for control on /api/*
//!
//! Access via: http://localhost:8064

use anyhow::Result;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_dir = readsync_core::config::resolve_data_dir()?;
    let config = readsync_core::config::load_config(&data_dir)?;

    // Port from env overrides the config file
    let port: u16 = std::env::var("READSYNC_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(config.server.port);

    info!("readsync server starting on port {}...", port);

    let state = AppState::initialize(&config, &data_dir)?;
    info!("application state initialized (data dir: {})", data_dir.display());

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("server listening on http://{}", addr);
    info!("API available at http://{}/api/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::router())
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}
