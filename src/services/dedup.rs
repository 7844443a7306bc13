//! Edge deduplicator
//!
//! Removes duplicate undirected edges from a flat edge list: `(a, b)` and
//! `(b, a)` are the same edge, the first-seen record survives, and survivors
//! are re-indexed with a zero-based sequence number.

use crate::models::FullEdgeRecord;
use std::collections::HashSet;

/// Drop duplicate undirected edges and re-index the survivors
pub fn dedup_edges(records: Vec<FullEdgeRecord>) -> Vec<FullEdgeRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());

    for record in records {
        let key = if record.source_id <= record.target_id {
            (record.source_id.clone(), record.target_id.clone())
        } else {
            (record.target_id.clone(), record.source_id.clone())
        };

        if seen.insert(key) {
            kept.push(record);
        }
    }

    for (i, record) in kept.iter_mut().enumerate() {
        record.index = Some(i);
    }

    kept
}
