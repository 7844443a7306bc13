//! Track resolver
//!
//! Orchestrates one resolution attempt for a collaboration edge: remote
//! search, candidate selection, preview-URL recovery with a by-id fallback,
//! and classification of the outcome.

use crate::models::{Edge, Preview, ResolveError, ResolvedTheme};
use crate::services::matcher::select_candidate;
use crate::services::spotify_client::SpotifyClient;

/// Resolves one edge into a [`ResolvedTheme`]
pub struct TrackResolver {
    client: SpotifyClient,
}

impl TrackResolver {
    pub fn new(client: SpotifyClient) -> Self {
        Self { client }
    }

    /// Resolve an edge with one search attempt
    ///
    /// With `hide_artist` set, the artist constraint is dropped from the
    /// query and only the track title is searched. Never fails: search
    /// errors are absorbed into a `request error` record and logged.
    pub async fn resolve(&self, edge: &Edge, hide_artist: bool) -> ResolvedTheme {
        let query = if hide_artist {
            format!("track:{}", edge.colab_track_name)
        } else {
            format!(
                "track:{} artist:{} {}",
                edge.colab_track_name, edge.source, edge.target
            )
        };

        let candidates = match self.client.search_tracks(&query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(
                    source = %edge.source,
                    target = %edge.target,
                    error = %e,
                    "Track search failed"
                );
                return ResolvedTheme::unresolved(edge, ResolveError::RequestError);
            }
        };

        let Some((candidate, flags)) = select_candidate(edge, &candidates) else {
            return ResolvedTheme::unresolved(edge, ResolveError::NotFound);
        };

        let preview = match candidate.preview_url.as_deref() {
            Some(url) if !url.is_empty() => Preview::Url(url.to_string()),
            _ => self.preview_from_detail(&candidate.id).await,
        };

        ResolvedTheme {
            source: edge.source.clone(),
            target: edge.target.clone(),
            edge_track_name: edge.colab_track_name.clone(),
            spotify_track_name: candidate.name.clone(),
            spotify_artists: flags.artist_names.join(", "),
            track_name_coincides: Some(flags.track_name_coincides),
            artists_coincides: Some(flags.artists_coincide()),
            id: candidate.id.clone(),
            preview,
            error: ResolveError::Ok,
        }
    }

    /// Secondary preview lookup by track id
    ///
    /// Exactly one attempt; any failure degrades to "no preview available"
    /// without touching the record's error classification.
    async fn preview_from_detail(&self, id: &str) -> Preview {
        match self.client.track_detail(id).await {
            Ok(detail) => match detail.preview_url {
                Some(url) if !url.is_empty() => Preview::Url(url),
                _ => Preview::Missing,
            },
            Err(e) => {
                tracing::debug!(track_id = %id, error = %e, "Preview detail lookup failed");
                Preview::Missing
            }
        }
    }
}
