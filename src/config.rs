//! Configuration for preview-scraper
//!
//! Everything is resolved once at startup into an explicit `Config` value that
//! is passed into the components; there is no ambient global state.

use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Default listening port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 5000;

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port for the HTTP trigger endpoints
    pub port: u16,
    /// Spotify API bearer token; empty means API calls will be rejected
    pub spotify_token: String,
    /// Gephi edge export consumed by the scrape job
    pub edges_path: PathBuf,
    /// CSV from a prior run, used as the result cache (optional on disk)
    pub cache_path: PathBuf,
    /// CSV output of the scrape job
    pub output_csv_path: PathBuf,
    /// JSON mirror of the scrape output
    pub output_json_path: PathBuf,
    /// Full edge-list CSV consumed by the cleaning job
    pub full_edges_path: PathBuf,
    /// Deduplicated edge-list CSV written by the cleaning job
    pub clean_edges_path: PathBuf,
    /// Gephi node export consumed by the image job
    pub nodes_path: PathBuf,
    /// Two-column CSV written by the image job
    pub images_csv_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            spotify_token: String::new(),
            edges_path: PathBuf::from("edges.json"),
            cache_path: PathBuf::from("almost_final.csv"),
            output_csv_path: PathBuf::from("final.csv"),
            output_json_path: PathBuf::from("output.json"),
            full_edges_path: PathBuf::from("edges-full.csv"),
            clean_edges_path: PathBuf::from("edges-full-clean.csv"),
            nodes_path: PathBuf::from("input/nodes_edges_minify.json"),
            images_csv_path: PathBuf::from("images.csv"),
        }
    }
}

impl Config {
    /// Resolve configuration from the environment
    ///
    /// `SPOTIFY_TOKEN` supplies the bearer token; `PORT` overrides the
    /// listening port. File paths keep the defaults of the original jobs.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid PORT value: {:?}", port)))?;
        }

        match std::env::var("SPOTIFY_TOKEN") {
            Ok(token) if is_valid_token(&token) => {
                info!("Spotify token loaded from environment");
                config.spotify_token = token;
            }
            _ => {
                warn!(
                    "SPOTIFY_TOKEN not set; Spotify calls will fail until one is provided. \
                     Obtain a token at: https://developer.spotify.com/console"
                );
            }
        }

        Ok(config)
    }
}

/// Validate token (non-empty, non-whitespace)
pub fn is_valid_token(token: &str) -> bool {
    !token.trim().is_empty()
}
