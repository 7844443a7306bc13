//! Candidate matcher
//!
//! Decides which search candidate best represents a collaboration edge and
//! computes the match-quality flags reported alongside it.

use crate::models::Edge;
use crate::services::normalize::normalize;
use crate::services::spotify_client::TrackCandidate;

/// Match-quality flags for one edge/candidate pair, recomputed per candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFlags {
    /// The edge's source artist appears among the candidate's artists
    pub source_exists: bool,
    /// The edge's target artist appears among the candidate's artists.
    /// (The upstream schema called this `sourceTarget`; the behavior has
    /// always been plain target membership and is kept as such.)
    pub target_exists: bool,
    /// The candidate's title equals the edge's track name post-normalization
    pub track_name_coincides: bool,
    /// Candidate artist display names, unnormalized, in API order
    pub artist_names: Vec<String>,
}

impl MatchFlags {
    /// All three name conditions hold
    pub fn is_full_match(&self) -> bool {
        self.source_exists && self.target_exists && self.track_name_coincides
    }

    /// Value of the `artists_coincides` output column
    pub fn artists_coincide(&self) -> bool {
        self.source_exists && self.target_exists
    }
}

/// Compute match flags for one candidate against one edge
pub fn match_flags(edge: &Edge, candidate: &TrackCandidate) -> MatchFlags {
    let artist_names: Vec<String> = candidate.artists.iter().map(|a| a.name.clone()).collect();

    let source = normalize(&edge.source);
    let target = normalize(&edge.target);

    let source_exists = artist_names.iter().any(|n| normalize(n) == source);
    let target_exists = artist_names.iter().any(|n| normalize(n) == target);
    let track_name_coincides = normalize(&candidate.name) == normalize(&edge.colab_track_name);

    MatchFlags {
        source_exists,
        target_exists,
        track_name_coincides,
        artist_names,
    }
}

/// Select the candidate that best represents the edge
///
/// First candidate where all three name conditions hold wins; otherwise the
/// list head is taken regardless of match quality. Flags are recomputed
/// against the final choice so the fallback is reported honestly.
pub fn select_candidate<'a>(
    edge: &Edge,
    candidates: &'a [TrackCandidate],
) -> Option<(&'a TrackCandidate, MatchFlags)> {
    let chosen = candidates
        .iter()
        .find(|c| match_flags(edge, c).is_full_match())
        .or_else(|| candidates.first())?;

    let flags = match_flags(edge, chosen);
    Some((chosen, flags))
}
