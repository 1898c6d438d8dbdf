//! Error types for the catalog crate.
//!
//! Query operations never surface these to callers; they are used by
//! document decoding and composite id parsing, whose failures the resolver
//! folds into empty results.

/// Error type for catalog construction and key parsing.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A stream id did not contain `series:season:episode`.
    #[error("Malformed stream id: {0:?}")]
    MalformedStreamId(String),

    /// A series document could not be decoded.
    #[error("Invalid series document: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// Create a new MalformedStreamId error.
    pub fn malformed_stream_id<S: Into<String>>(id: S) -> Self {
        Self::MalformedStreamId(id.into())
    }
}

/// Result type alias using [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
