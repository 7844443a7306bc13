//! Spotify Web API client
//!
//! Bearer-token authenticated client for the three endpoints the enrichment
//! jobs use: track search, by-id track detail, and batched artist lookup.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const SPOTIFY_BASE_URL: &str = "https://api.spotify.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Search result page size for track queries
pub const SEARCH_LIMIT: u32 = 25;

/// Maximum artist ids per batched `/artists` call
pub const ARTIST_BATCH_SIZE: usize = 50;

/// Spotify client errors
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Track search response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

/// One page of track search results
#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    pub items: Vec<TrackCandidate>,
}

/// A track returned by the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackCandidate {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub preview_url: Option<String>,
}

/// Artist reference embedded in a track record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

/// By-id track detail, reduced to the preview field the resolver needs
#[derive(Debug, Clone, Deserialize)]
pub struct TrackDetail {
    pub preview_url: Option<String>,
}

/// Batched artist lookup response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistsResponse {
    pub artists: Vec<ArtistRecord>,
}

/// A full artist record from the `/artists` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRecord {
    pub id: String,
    #[serde(default)]
    pub images: Vec<ArtistImage>,
}

/// One entry of an artist's ordered image list
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistImage {
    pub url: String,
}

/// Spotify Web API client
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(token: impl Into<String>) -> Result<Self, SpotifyError> {
        Self::with_base_url(token, SPOTIFY_BASE_URL)
    }

    /// Client pointed at an alternate base URL (tests use a local mock)
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SpotifyError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    /// Search for tracks matching a composed query string
    ///
    /// Limited to [`SEARCH_LIMIT`] results of type "track". The query is
    /// URL-encoded by the request builder; callers pass it verbatim.
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<TrackCandidate>, SpotifyError> {
        let url = format!("{}/search", self.base_url);
        let limit = SEARCH_LIMIT.to_string();

        tracing::debug!(query = %query, "Spotify track search");

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query), ("type", "track"), ("limit", &limit)])
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Api(status.as_u16(), error_text));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))?;

        Ok(body.tracks.items)
    }

    /// Fetch a single track's full record by id
    pub async fn track_detail(&self, id: &str) -> Result<TrackDetail, SpotifyError> {
        let url = format!("{}/tracks/{}", self.base_url, id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))
    }

    /// Batched artist lookup, up to [`ARTIST_BATCH_SIZE`] comma-joined ids
    pub async fn artists(&self, ids: &[String]) -> Result<Vec<ArtistRecord>, SpotifyError> {
        let url = format!("{}/artists", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("ids", ids.join(","))])
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Api(status.as_u16(), error_text));
        }

        let body: ArtistsResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))?;

        Ok(body.artists)
    }
}
