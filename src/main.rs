//! preview-scraper - collaboration-graph enrichment service
//!
//! Serves the HTTP triggers for the scrape and edge-cleaning jobs. Both run
//! synchronously: the response is sent once the job's file writes have been
//! issued.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use preview_scraper::services::SpotifyClient;
use preview_scraper::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting preview-scraper");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let spotify = SpotifyClient::new(config.spotify_token.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create Spotify client: {}", e))?;

    let addr = format!("127.0.0.1:{}", config.port);
    let state = AppState::new(config, spotify);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    info!("Scrape trigger: http://{}/scrape", addr);
    info!("Clean trigger:  http://{}/clean", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
