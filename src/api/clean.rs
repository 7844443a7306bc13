//! Edge-cleaning trigger

use crate::error::ApiResult;
use crate::services::dedup_edges;
use crate::store;
use crate::AppState;
use axum::{extract::State, routing::get, Router};
use tracing::{error, info};

/// GET /clean
///
/// De-duplicates the undirected edge-list CSV and writes the re-indexed
/// result. Responds `"OK"` once the write has been issued.
pub async fn clean(State(state): State<AppState>) -> ApiResult<&'static str> {
    let config = &state.config;

    let records = store::read_full_edges(&config.full_edges_path)?;
    let total = records.len();
    let deduped = dedup_edges(records);
    info!(total, kept = deduped.len(), "Edge list deduplicated");

    if let Err(e) = store::write_clean_edges(&config.clean_edges_path, &deduped) {
        error!(path = %config.clean_edges_path.display(), error = %e, "Clean CSV write failed");
    }

    Ok("OK")
}

/// Build clean routes
pub fn clean_routes() -> Router<AppState> {
    Router::new().route("/clean", get(clean))
}
