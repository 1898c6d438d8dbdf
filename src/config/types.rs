use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tvstreams_catalog::{CatalogBinding, DEFAULT_PROBE_TIMEOUT};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub streams: StreamsConfig,

    #[serde(default)]
    pub addon: AddonConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    7000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where series documents are read from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Directory scanned for series documents
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    /// Substring a file name must contain to be loaded
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Explicit document list; replaces directory discovery when non-empty
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_pattern() -> String {
    "_organized_series_data.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            pattern: default_pattern(),
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamsConfig {
    /// Probe each resolved stream URL before returning it (default: false)
    #[serde(default)]
    pub liveness_check: bool,

    /// Probe timeout in seconds (default: 5, must be non-zero)
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

fn default_probe_timeout() -> u64 {
    DEFAULT_PROBE_TIMEOUT.as_secs()
}

impl StreamsConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for StreamsConfig {
    fn default() -> Self {
        Self {
            liveness_check: false,
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

/// Addon identity advertised in the manifest, and the catalog it serves.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddonConfig {
    #[serde(default = "default_addon_id")]
    pub id: String,

    #[serde(default = "default_addon_version")]
    pub version: String,

    #[serde(default = "default_addon_name")]
    pub name: String,

    #[serde(default = "default_addon_description")]
    pub description: String,

    #[serde(default = "default_content_type")]
    pub content_type: String,

    #[serde(default = "default_catalog_id")]
    pub catalog_id: String,

    #[serde(default = "default_addon_name")]
    pub catalog_name: String,

    #[serde(default = "default_id_prefixes")]
    pub id_prefixes: Vec<String>,
}

fn default_addon_id() -> String {
    "community.yourtvstreams".to_string()
}
fn default_addon_version() -> String {
    "1.0.0".to_string()
}
fn default_addon_name() -> String {
    "Fight Club".to_string()
}
fn default_addon_description() -> String {
    "Stream TV series".to_string()
}
fn default_content_type() -> String {
    "series".to_string()
}
fn default_catalog_id() -> String {
    "yourtvstreams".to_string()
}
fn default_id_prefixes() -> Vec<String> {
    vec!["tt".to_string()]
}

impl AddonConfig {
    pub fn binding(&self) -> CatalogBinding {
        CatalogBinding::new(&self.content_type, &self.catalog_id)
    }
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            id: default_addon_id(),
            version: default_addon_version(),
            name: default_addon_name(),
            description: default_addon_description(),
            content_type: default_content_type(),
            catalog_id: default_catalog_id(),
            catalog_name: default_addon_name(),
            id_prefixes: default_id_prefixes(),
        }
    }
}
