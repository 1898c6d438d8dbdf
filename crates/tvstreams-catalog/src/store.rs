//! Immutable series store.
//!
//! Built once from every ingested document and shared read-only afterwards.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::model::Series;

/// The catalog: all ingested series in ingestion order.
#[derive(Debug, Default)]
pub struct CatalogStore {
    series: Vec<Series>,
    /// First position of each id. Later duplicates are kept in `series` but
    /// never win an id lookup.
    index: HashMap<String, usize>,
}

/// Summary counts over a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub series: usize,
    pub seasons: usize,
    pub episodes: usize,
    pub missing_stream_urls: usize,
    pub duplicate_ids: usize,
}

impl CatalogStore {
    /// Concatenate documents in the order given.
    pub fn build<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Vec<Series>>,
    {
        let series: Vec<Series> = documents.into_iter().flatten().collect();
        let mut index = HashMap::with_capacity(series.len());

        for (position, s) in series.iter().enumerate() {
            if let Some(&first) = index.get(&s.id) {
                warn!(
                    "Duplicate series id {} at position {} (first seen at {}); first entry wins",
                    s.id, position, first
                );
                continue;
            }
            index.insert(s.id.clone(), position);
        }

        debug!("Catalog built with {} series", series.len());
        Self { series, index }
    }

    /// First series with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Series> {
        self.index.get(id).map(|&position| &self.series[position])
    }

    /// Series in store order.
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            series: self.series.len(),
            duplicate_ids: self.series.len() - self.index.len(),
            ..Default::default()
        };

        for season in self.series.iter().flat_map(|s| &s.seasons) {
            stats.seasons += 1;
            stats.episodes += season.episodes.len();
            stats.missing_stream_urls += season
                .episodes
                .iter()
                .filter(|e| e.playable_url().is_none())
                .count();
        }

        stats
    }
}
