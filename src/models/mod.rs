//! Data model for the collaboration-graph enrichment jobs
//!
//! Record shapes mirror the CSV/JSON files produced by prior runs, so a file
//! written by one run can be read back as the result cache of the next.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One collaboration edge from the Gephi export (`edges.json`)
///
/// An undirected relationship between two artist names, carrying the title of
/// the track they collaborated on. Immutable input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// First artist name
    pub source: String,
    /// Second artist name
    pub target: String,
    /// Title of the collaboration track
    pub colab_track_name: String,
}

/// Terminal classification of a resolution attempt
///
/// Serialized as the literal strings the output schema uses: `""` for
/// success, `"not found"`, `"request error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveError {
    /// A candidate was found and a record attached to it
    #[default]
    Ok,
    /// The search returned zero candidates
    NotFound,
    /// The search call itself failed (network, auth, malformed response)
    RequestError,
}

impl ResolveError {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveError::Ok => "",
            ResolveError::NotFound => "not found",
            ResolveError::RequestError => "request error",
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResolveError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResolveError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "" => Ok(ResolveError::Ok),
            "not found" => Ok(ResolveError::NotFound),
            "request error" => Ok(ResolveError::RequestError),
            other => Err(de::Error::custom(format!(
                "unknown error classification: {:?}",
                other
            ))),
        }
    }
}

/// Preview URL slot: either a URL string or the literal `false`
///
/// The output schema stores the missing case as boolean `false` in JSON and
/// the string `"false"` in CSV; this type round-trips both encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Url(String),
    Missing,
}

impl Preview {
    pub fn is_missing(&self) -> bool {
        matches!(self, Preview::Missing)
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Preview::Url(u) => Some(u),
            Preview::Missing => None,
        }
    }
}

impl Serialize for Preview {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Preview::Url(url) => serializer.serialize_str(url),
            Preview::Missing => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for Preview {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PreviewVisitor;

        impl<'de> Visitor<'de> for PreviewVisitor {
            type Value = Preview;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a preview URL string or false")
            }

            fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Preview, E> {
                Ok(Preview::Missing)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Preview, E> {
                // CSV carries no type information: "false" is the missing marker
                if v.is_empty() || v == "false" {
                    Ok(Preview::Missing)
                } else {
                    Ok(Preview::Url(v.to_string()))
                }
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Preview, E> {
                self.visit_str(&v)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Preview, E> {
                Ok(Preview::Missing)
            }
        }

        deserializer.deserialize_any(PreviewVisitor)
    }
}

/// Serde helpers for the tri-state match flags
///
/// Success rows carry a real boolean; not-found / request-error rows carry the
/// empty string. `Option<bool>` with these helpers reproduces that encoding in
/// both CSV and JSON.
mod flag {
    use super::*;

    pub fn serialize<S: Serializer>(v: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(b) => serializer.serialize_bool(*b),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        struct FlagVisitor;

        impl<'de> Visitor<'de> for FlagVisitor {
            type Value = Option<bool>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or the empty string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Option<bool>, E> {
                Ok(Some(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Option<bool>, E> {
                match v {
                    "" => Ok(None),
                    "true" => Ok(Some(true)),
                    "false" => Ok(Some(false)),
                    other => Err(E::custom(format!("unknown flag value: {:?}", other))),
                }
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Option<bool>, E> {
                self.visit_str(&v)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Option<bool>, E> {
                Ok(None)
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

/// Output record for one edge, one per resolution attempt or cache hit
///
/// Field order is the fixed CSV column order; do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTheme {
    pub source: String,
    pub target: String,
    pub edge_track_name: String,
    pub spotify_track_name: String,
    /// Candidate artist display names joined with ", "
    pub spotify_artists: String,
    #[serde(with = "flag")]
    pub track_name_coincides: Option<bool>,
    /// Both edge endpoints appear among the candidate's artists
    #[serde(with = "flag")]
    pub artists_coincides: Option<bool>,
    pub id: String,
    pub preview: Preview,
    pub error: ResolveError,
}

impl ResolvedTheme {
    /// Record for an edge that could not be resolved: descriptive fields
    /// blank, no preview, terminal error classification attached.
    pub fn unresolved(edge: &Edge, error: ResolveError) -> Self {
        Self {
            source: edge.source.clone(),
            target: edge.target.clone(),
            edge_track_name: edge.colab_track_name.clone(),
            spotify_track_name: String::new(),
            spotify_artists: String::new(),
            track_name_coincides: None,
            artists_coincides: None,
            id: String::new(),
            preview: Preview::Missing,
            error,
        }
    }
}

/// One row of the full edge-list CSV used by the cleaning job
///
/// The leading unnamed column is the row index, rewritten by the
/// deduplicator. Remaining fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullEdgeRecord {
    #[serde(rename = "")]
    pub index: Option<usize>,
    pub source: String,
    pub target: String,
    pub weight: String,
    pub track_name: String,
    pub artists: String,
    pub preview: String,
    pub source_id: String,
    pub target_id: String,
    pub track_id: String,
}

/// A graph node from the Gephi node export
///
/// The export stores the Spotify artist id under `id__1` (the plain `id` is
/// Gephi's internal node id).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphNode {
    #[serde(rename = "id__1")]
    pub id: String,
}

/// Top-level shape of `nodes_edges_minify.json`
#[derive(Debug, Deserialize)]
pub struct NodesFile {
    pub nodes: Vec<GraphNode>,
}
