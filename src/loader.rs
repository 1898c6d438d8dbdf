//! Series document discovery and loading.
//!
//! Everything here runs once at startup. Any unreadable or malformed
//! document is fatal: the server never starts with a partial catalog.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tvstreams_catalog::{parse_document, CatalogStore, Series};

use crate::config::DataConfig;

/// List the documents to ingest, in ingestion order.
///
/// Explicit `files` win; otherwise every regular file in `dir` whose name
/// contains `pattern`, sorted by file name.
pub fn discover_documents(data: &DataConfig) -> Result<Vec<PathBuf>> {
    if !data.files.is_empty() {
        return Ok(data.files.clone());
    }

    let entries = std::fs::read_dir(&data.dir)
        .with_context(|| format!("Failed to read data directory: {:?}", data.dir))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", data.dir))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.contains(&data.pattern));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths)
}

/// Read and decode one series document.
pub fn load_document(path: &Path) -> Result<Vec<Series>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read series data file: {:?}", path))?;

    parse_document(&content)
        .with_context(|| format!("Failed to parse series data file: {:?}", path))
}

/// Discover, load and merge every document into a store.
pub fn load_catalog(data: &DataConfig) -> Result<CatalogStore> {
    let paths = discover_documents(data)?;

    if paths.is_empty() {
        warn!(
            "No series data files matching {:?} found in {:?}; catalog is empty",
            data.pattern, data.dir
        );
    } else {
        info!("Found {} series data file(s)", paths.len());
    }

    load_paths(&paths)
}

/// Load already discovered documents, in order, into a store.
pub fn load_paths(paths: &[PathBuf]) -> Result<CatalogStore> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let document = load_document(path)?;
        info!("Read {} series from {:?}", document.len(), path);
        documents.push(document);
    }

    let store = CatalogStore::build(documents);
    info!("Merged catalog holds {} series", store.len());

    Ok(store)
}
