//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "ok" once the server is up)
    pub status: String,
    /// Module name ("preview-scraper")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "preview-scraper".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
