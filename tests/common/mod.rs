//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which builds an [`AppContext`] over an in-memory
//! catalog. The [`TestHarness::with_server`] constructor starts Axum on a
//! random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use http_body_util::BodyExt;

use tvstreams::config::Config;
use tvstreams::manifest::Manifest;
use tvstreams::server::{create_router, AppContext};
use tvstreams_catalog::{
    parse_document, CatalogStore, LivenessProber, QueryResolver, StaticProber,
};

/// Two shows with mixed numeric and textual season/episode numbers.
pub const FIXTURE: &str = r#"[
    {"id": "tt0001", "name": "Night Harbor", "poster": "http://img/harbor.jpg", "seasons": [
        {"season": 1, "episodes": [
            {"episode": 1, "stream_url": "http://x/harbor-s1e1"},
            {"episode": "2", "stream_url": "http://x/harbor-s1e2"},
            {"episode": 3}
        ]},
        {"season": "2", "episodes": [{"episode": 1, "stream_url": "http://x/harbor-s2e1"}]}
    ]},
    {"id": "tt0002", "name": "Harbor Lights", "seasons": []},
    {"id": "tt0003", "name": "Desert Kings", "poster": "http://img/desert.jpg", "seasons": [
        {"season": 1, "episodes": [{"episode": 1, "stream_url": "http://x/desert-s1e1"}]}
    ]}
]"#;

pub struct TestHarness {
    pub ctx: AppContext,
}

impl TestHarness {
    /// Harness over [`FIXTURE`] with the liveness check disabled.
    pub fn new() -> Self {
        Self::with_document(FIXTURE)
    }

    pub fn with_document(json: &str) -> Self {
        Self::with_config(&Config::default(), json)
    }

    /// Harness wired through [`AppContext::new`], so the config's stream
    /// settings pick the prober and the liveness gate.
    pub fn with_config(config: &Config, json: &str) -> Self {
        let store = CatalogStore::build(vec![parse_document(json).expect("invalid fixture")]);
        Self {
            ctx: AppContext::new(config, store),
        }
    }

    /// Harness with the liveness check enabled and a custom prober.
    pub fn with_prober(json: &str, prober: Arc<dyn LivenessProber>) -> Self {
        let config = Config::default();
        let store = CatalogStore::build(vec![parse_document(json).expect("invalid fixture")]);
        let resolver = QueryResolver::new(Arc::new(store), config.addon.binding(), prober)
            .with_liveness_check(true);

        Self {
            ctx: AppContext {
                resolver: Arc::new(resolver),
                manifest: Arc::new(Manifest::from(&config.addon)),
            },
        }
    }

    /// Harness whose prober always reports streams as unreachable.
    pub fn unreachable() -> Self {
        Self::with_prober(FIXTURE, Arc::new(StaticProber(false)))
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.ctx.clone())
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = harness.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// Collect a response body as JSON.
pub async fn body_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as a string.
pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
