//! Stream liveness checks.
//!
//! A probe answers one question: does this URL respond successfully right
//! now? Every failure mode collapses to `false`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

/// Timeout applied to a probe when none is configured.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks whether a stream URL is currently reachable.
#[async_trait]
pub trait LivenessProber: Send + Sync {
    /// Returns `true` only if the URL answered with a success status.
    async fn probe(&self, url: &str) -> bool;
}

/// Prober that issues a single `HEAD` request per check.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_PROBE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LivenessProber for HttpProber {
    async fn probe(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed,
            Ok(parsed) => {
                debug!("Stream check skipped for {}: unsupported scheme {}", url, parsed.scheme());
                return false;
            }
            Err(e) => {
                debug!("Stream check skipped for {}: {}", url, e);
                return false;
            }
        };

        // Per-request timeout as well, in case the client fell back to defaults.
        match self.client.head(parsed).timeout(self.timeout).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    debug!("Stream check for {} returned {}", url, status);
                }
                status.is_success()
            }
            Err(e) => {
                warn!("Stream check failed for {}: {}", url, e);
                false
            }
        }
    }
}

/// Prober with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticProber(pub bool);

#[async_trait]
impl LivenessProber for StaticProber {
    async fn probe(&self, _url: &str) -> bool {
        self.0
    }
}
