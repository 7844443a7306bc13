//! Artist image fetcher
//!
//! Batches node ids into groups of 50 and issues all lookups concurrently,
//! joining on every outcome before merging. A failed batch contributes zero
//! records and never aborts the run.

use crate::models::GraphNode;
use crate::services::spotify_client::{SpotifyClient, ARTIST_BATCH_SIZE};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One output row of `images.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    /// First image URL of the artist's ordered image list, or empty
    pub image_url: String,
}

/// Batched, concurrent artist-image lookup
pub struct ImageFetcher {
    client: SpotifyClient,
}

impl ImageFetcher {
    pub fn new(client: SpotifyClient) -> Self {
        Self { client }
    }

    /// Fetch first-image URLs for every node, tolerating per-batch failures
    pub async fn fetch_images(&self, nodes: &[GraphNode]) -> Vec<ImageRecord> {
        let batches = nodes.chunks(ARTIST_BATCH_SIZE).map(|chunk| {
            let ids: Vec<String> = chunk.iter().map(|n| n.id.clone()).collect();
            let client = self.client.clone();
            async move { client.artists(&ids).await }
        });

        let results = join_all(batches).await;

        // Merged keyed by artist id: a repeated id collapses to a single row
        // at its first-seen position, with the later value winning.
        let mut records: Vec<ImageRecord> = Vec::with_capacity(nodes.len());
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
        for (batch, result) in results.into_iter().enumerate() {
            match result {
                Ok(artists) => {
                    for artist in artists {
                        let record = ImageRecord {
                            id: artist.id,
                            image_url: artist
                                .images
                                .first()
                                .map(|img| img.url.clone())
                                .unwrap_or_default(),
                        };
                        match positions.get(&record.id) {
                            Some(&at) => records[at] = record,
                            None => {
                                positions.insert(record.id.clone(), records.len());
                                records.push(record);
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(batch, error = %e, "Artist batch failed, dropping its records");
                }
            }
        }

        records
    }
}
