//! fetch-images - one-shot artist image lookup
//!
//! Reads the Gephi node export, fetches every artist record in concurrent
//! batches of 50, and writes a two-column CSV of artist id and first image
//! URL (empty when the artist has none).

use anyhow::Result;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use preview_scraper::services::{ImageFetcher, SpotifyClient};
use preview_scraper::{store, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let spotify = SpotifyClient::new(config.spotify_token.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create Spotify client: {}", e))?;

    let nodes = store::read_nodes(&config.nodes_path)?;
    info!(nodes = nodes.len(), "Fetching artist images");

    let fetcher = ImageFetcher::new(spotify);
    let records = fetcher.fetch_images(&nodes).await;
    info!(records = records.len(), "Image lookup complete");

    // A write failure is operator-visible but does not change the exit path
    match store::write_images_csv(&config.images_csv_path, &records) {
        Ok(()) => info!(path = %config.images_csv_path.display(), "Image CSV written"),
        Err(e) => error!(path = %config.images_csv_path.display(), error = %e, "Image CSV write failed"),
    }

    Ok(())
}
