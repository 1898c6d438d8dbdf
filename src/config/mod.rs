mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse config")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./tvstreams.toml",
        "~/.config/tvstreams/config.toml",
        "/etc/tvstreams/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.streams.probe_timeout_secs == 0 {
        anyhow::bail!("Probe timeout must be at least 1 second");
    }

    if config.addon.content_type.is_empty() || config.addon.catalog_id.is_empty() {
        anyhow::bail!("Addon content_type and catalog_id cannot be empty");
    }

    if config.data.files.is_empty() {
        if config.data.pattern.is_empty() {
            anyhow::bail!("Data file pattern cannot be empty");
        }
        if !config.data.dir.is_dir() {
            tracing::warn!("Data directory does not exist: {:?}", config.data.dir);
        }
    }

    Ok(())
}
