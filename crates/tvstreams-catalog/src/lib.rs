//! tvstreams-catalog: the catalog resolution engine.
//!
//! This crate holds everything with actual logic behind the addon:
//!
//! - **Model**: series, seasons and episodes as ingested from JSON documents
//! - **Store**: the immutable, ordered series list with first-wins id lookup
//! - **Resolver**: catalog listing/search, meta lookup and stream lookup
//! - **Prober**: optional liveness check gating stream results
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tvstreams_catalog::{parse_document, CatalogBinding, CatalogStore, QueryResolver, StaticProber};
//!
//! let doc = r#"[{"id": "tt1", "name": "Show", "seasons": [
//!     {"season": 1, "episodes": [{"episode": 2, "stream_url": "http://x/ep2"}]}
//! ]}]"#;
//! let store = Arc::new(CatalogStore::build(vec![parse_document(doc).unwrap()]));
//! let resolver = QueryResolver::new(store, CatalogBinding::default(), Arc::new(StaticProber(true)));
//!
//! let stream = resolver.resolve_stream("tt1:1:2").unwrap();
//! assert_eq!(stream.title, "S1E2");
//! ```

pub mod composite;
pub mod error;
pub mod model;
pub mod prober;
pub mod resolver;
pub mod store;

pub use composite::CompositeId;
pub use error::{CatalogError, Result};
pub use model::*;
pub use prober::{HttpProber, LivenessProber, StaticProber, DEFAULT_PROBE_TIMEOUT};
pub use resolver::{CatalogBinding, LookupMiss, QueryResolver};
pub use store::{CatalogStats, CatalogStore};
