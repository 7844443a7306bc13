//! preview-scraper library interface
//!
//! Enriches a music-collaboration graph dataset with Spotify metadata: an
//! HTTP-triggered scrape job recovering track preview URLs per collaboration
//! edge, an edge-list cleaning job, and a one-shot artist-image fetcher.
//!
//! Exposed as a library so integration tests can drive the router directly.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use crate::config::Config;
pub use crate::error::{ApiError, ApiResult, Error, Result};

use crate::services::SpotifyClient;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration (paths, port, token)
    pub config: Arc<Config>,
    /// Spotify API client
    pub spotify: SpotifyClient,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, spotify: SpotifyClient) -> Self {
        Self {
            config: Arc::new(config),
            spotify,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::scrape_routes())
        .merge(api::clean_routes())
        .merge(api::health_routes())
        .with_state(state)
}
