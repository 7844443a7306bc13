//! Scrape trigger
//!
//! Runs the full edge-enrichment pipeline: load the prior-run cache and the
//! edge export, resolve every edge, write CSV + JSON outputs.

use crate::error::ApiResult;
use crate::services::pipeline::{BatchPipeline, ResultCache};
use crate::store;
use crate::AppState;
use axum::{extract::State, routing::get, Router};
use tracing::{error, info};

/// GET /scrape
///
/// Responds `"OK"` after output writes are issued; write failures are logged
/// for the operator but do not fail the request.
pub async fn scrape(State(state): State<AppState>) -> ApiResult<&'static str> {
    let config = &state.config;

    let cache = ResultCache::new(store::read_result_cache(&config.cache_path)?);
    let edges = store::read_edges(&config.edges_path)?;
    info!(
        edges = edges.len(),
        cached = cache.len(),
        "Starting scrape run"
    );

    let pipeline = BatchPipeline::new(state.spotify.clone());
    let themes = pipeline.run(&edges, &cache).await;
    info!(themes = themes.len(), "Scrape run complete");

    if let Err(e) = store::write_themes_csv(&config.output_csv_path, &themes) {
        error!(path = %config.output_csv_path.display(), error = %e, "CSV write failed");
    }
    if let Err(e) = store::write_themes_json(&config.output_json_path, &themes) {
        error!(path = %config.output_json_path.display(), error = %e, "JSON write failed");
    }

    Ok("OK")
}

/// Build scrape routes
pub fn scrape_routes() -> Router<AppState> {
    Router::new().route("/scrape", get(scrape))
}
