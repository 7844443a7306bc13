//! Service components for the enrichment jobs

pub mod dedup;
pub mod image_fetcher;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod resolver;
pub mod retry;
pub mod spotify_client;

pub use dedup::dedup_edges;
pub use image_fetcher::{ImageFetcher, ImageRecord};
pub use matcher::{match_flags, select_candidate, MatchFlags};
pub use normalize::normalize;
pub use pipeline::{BatchPipeline, ResultCache};
pub use resolver::TrackResolver;
pub use retry::RetryController;
pub use spotify_client::{SpotifyClient, SpotifyError, TrackCandidate};
