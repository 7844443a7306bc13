//! File input/output for the enrichment jobs
//!
//! All reads are explicit, scoped operations returning a [`Result`]; writers
//! flush before returning so callers can log failures at the call site.

use crate::error::Result;
use crate::models::{Edge, FullEdgeRecord, GraphNode, NodesFile, ResolvedTheme};
use crate::services::ImageRecord;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read the Gephi edge export
pub fn read_edges(path: &Path) -> Result<Vec<Edge>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read a prior run's output CSV to seed the result cache
///
/// A missing file is an empty cache, not an error; the first run has no
/// prior output to reuse.
pub fn read_result_cache(path: &Path) -> Result<Vec<ResolvedTheme>> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "No prior results, starting with an empty cache");
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Read the full edge-list CSV consumed by the cleaning job
pub fn read_full_edges(path: &Path) -> Result<Vec<FullEdgeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Read the Gephi node export for the image job
pub fn read_nodes(path: &Path) -> Result<Vec<GraphNode>> {
    let raw = fs::read_to_string(path)?;
    let file: NodesFile = serde_json::from_str(&raw)?;
    Ok(file.nodes)
}

fn write_csv<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the resolution results with the fixed column order
pub fn write_themes_csv(path: &Path, themes: &[ResolvedTheme]) -> Result<()> {
    write_csv(path, themes)
}

/// Write the JSON mirror of the resolution results
pub fn write_themes_json(path: &Path, themes: &[ResolvedTheme]) -> Result<()> {
    let raw = serde_json::to_string(themes)?;
    fs::write(path, raw)?;
    Ok(())
}

/// Write the deduplicated edge list
pub fn write_clean_edges(path: &Path, records: &[FullEdgeRecord]) -> Result<()> {
    write_csv(path, records)
}

/// Write the two-column artist image CSV
pub fn write_images_csv(path: &Path, records: &[ImageRecord]) -> Result<()> {
    write_csv(path, records)
}
