//! Catalog, meta and stream queries over a [`CatalogStore`].
//!
//! Every query produces a well-formed response. Misses inside the stream
//! resolution chain are tracked as [`LookupMiss`] so they can be logged and
//! tested, then collapse to an empty stream list at the public boundary.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::composite::CompositeId;
use crate::model::{CatalogResponse, MetaResponse, Stream, StreamsResponse};
use crate::prober::LivenessProber;
use crate::store::CatalogStore;

/// The single type/catalog pair this resolver answers catalog queries for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogBinding {
    pub content_type: String,
    pub catalog_id: String,
}

impl CatalogBinding {
    pub fn new(content_type: impl Into<String>, catalog_id: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            catalog_id: catalog_id.into(),
        }
    }

    fn matches(&self, content_type: &str, catalog_id: &str) -> bool {
        self.content_type == content_type && self.catalog_id == catalog_id
    }
}

impl Default for CatalogBinding {
    fn default() -> Self {
        Self::new("series", "yourtvstreams")
    }
}

/// Why a stream id did not resolve to a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupMiss {
    #[error("stream id is not series:season:episode")]
    MalformedId,
    #[error("series not found")]
    SeriesNotFound,
    #[error("season not found")]
    SeasonNotFound,
    #[error("episode not found")]
    EpisodeNotFound,
    #[error("episode has no stream url")]
    MissingStreamUrl,
    #[error("stream url is unreachable")]
    Unreachable,
}

/// Answers the three addon queries.
pub struct QueryResolver {
    store: Arc<CatalogStore>,
    binding: CatalogBinding,
    prober: Arc<dyn LivenessProber>,
    liveness_check: bool,
}

impl QueryResolver {
    /// Create a resolver with the liveness gate disabled.
    pub fn new(
        store: Arc<CatalogStore>,
        binding: CatalogBinding,
        prober: Arc<dyn LivenessProber>,
    ) -> Self {
        Self {
            store,
            binding,
            prober,
            liveness_check: false,
        }
    }

    /// Enable or disable probing resolved streams before returning them.
    pub fn with_liveness_check(mut self, enabled: bool) -> Self {
        self.liveness_check = enabled;
        self
    }

    pub fn liveness_check(&self) -> bool {
        self.liveness_check
    }

    pub fn binding(&self) -> &CatalogBinding {
        &self.binding
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// List the catalog, optionally filtered by a case-insensitive name search.
    ///
    /// Any type/catalog pair other than the bound one yields no metas.
    pub fn list_or_search(
        &self,
        content_type: &str,
        catalog_id: &str,
        search: Option<&str>,
    ) -> CatalogResponse {
        if !self.binding.matches(content_type, catalog_id) {
            debug!("Catalog request for unknown catalog {}/{}", content_type, catalog_id);
            return CatalogResponse::default();
        }

        let metas = self
            .store
            .iter()
            .map(|series| series.preview(&self.binding.content_type));

        let metas = match search {
            Some(term) => {
                let needle = term.to_lowercase();
                metas
                    .filter(|meta| meta.name.to_lowercase().contains(&needle))
                    .collect()
            }
            None => metas.collect(),
        };

        CatalogResponse { metas }
    }

    /// Summary for a single series, or an empty response.
    pub fn meta_lookup(&self, id: &str) -> MetaResponse {
        let meta = self
            .store
            .find_by_id(id)
            .map(|series| series.preview(&self.binding.content_type));

        if meta.is_none() {
            debug!("Meta request for unknown id {}", id);
        }

        MetaResponse { meta }
    }

    /// Walk series, season and episode for a composite id, without probing.
    pub fn resolve_stream(&self, id: &str) -> Result<Stream, LookupMiss> {
        let key = CompositeId::parse(id).map_err(|_| LookupMiss::MalformedId)?;

        let series = self
            .store
            .find_by_id(key.series_id)
            .ok_or(LookupMiss::SeriesNotFound)?;
        let season = series
            .season(key.season)
            .ok_or(LookupMiss::SeasonNotFound)?;
        let episode = season
            .episode(key.episode)
            .ok_or(LookupMiss::EpisodeNotFound)?;
        let url = episode
            .playable_url()
            .ok_or(LookupMiss::MissingStreamUrl)?;

        Ok(Stream {
            title: key.title(),
            url: url.to_string(),
        })
    }

    /// Resolve a composite id and, when enabled, gate it on a liveness probe.
    pub async fn check_stream(&self, id: &str) -> Result<Stream, LookupMiss> {
        let stream = self.resolve_stream(id)?;

        if self.liveness_check && !self.prober.probe(&stream.url).await {
            return Err(LookupMiss::Unreachable);
        }

        Ok(stream)
    }

    /// Streams for a composite id: one stream, or none on any miss.
    ///
    /// `content_type` is accepted for protocol symmetry and not consulted.
    pub async fn stream_lookup(&self, content_type: &str, id: &str) -> StreamsResponse {
        trace!("Stream request {}/{}", content_type, id);

        match self.check_stream(id).await {
            Ok(stream) => StreamsResponse {
                streams: vec![stream],
            },
            Err(miss) => {
                debug!("No stream for {}: {}", id, miss);
                StreamsResponse::default()
            }
        }
    }
}

impl fmt::Debug for QueryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResolver")
            .field("series", &self.store.len())
            .field("binding", &self.binding)
            .field("liveness_check", &self.liveness_check)
            .finish_non_exhaustive()
    }
}
