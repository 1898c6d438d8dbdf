//! Split a JSON array document into several smaller documents.
//!
//! A batch helper for keeping individual series documents small. It works on
//! any JSON array and knows nothing about the catalog.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Divide `items` into `parts` consecutive chunks.
///
/// The first `items.len() % parts` chunks receive one extra item. Chunks may
/// be empty when there are fewer items than parts.
pub fn partition<T: Clone>(items: &[T], parts: usize) -> Vec<Vec<T>> {
    if parts == 0 {
        return Vec::new();
    }

    let base = items.len() / parts;
    let remainder = items.len() % parts;

    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < remainder);
        chunks.push(items[start..start + size].to_vec());
        start += size;
    }

    chunks
}

/// Output path for the 1-based part `index`: `<input>_part<index>.json`.
pub fn part_path(input: &Path, index: usize) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(format!("_part{}.json", index));
    PathBuf::from(name)
}

/// Split the JSON array at `input` into `parts` files. Returns the written paths.
pub fn split_file(input: &Path, parts: usize) -> Result<Vec<PathBuf>> {
    if parts == 0 {
        anyhow::bail!("Invalid number of parts. Please enter a positive integer.");
    }

    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read file: {:?}", input))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {:?}", input))?;
    let items = value
        .as_array()
        .with_context(|| format!("Expected a JSON array in {:?}", input))?;

    let mut written = Vec::with_capacity(parts);
    for (i, chunk) in partition(items, parts).into_iter().enumerate() {
        let path = part_path(input, i + 1);
        let json = serde_json::to_string_pretty(&chunk)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write part {} to {:?}", i + 1, path))?;
        tracing::info!("Part {} written to {:?}", i + 1, path);
        written.push(path);
    }

    Ok(written)
}
