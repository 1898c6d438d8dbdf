mod cli;

use tvstreams::{config, loader, server, split};
use tvstreams_catalog::{HttpProber, LivenessProber};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::time::Duration;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    liveness_check: Option<bool>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(enabled) = liveness_check {
        config.streams.liveness_check = enabled;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting tvstreams addon");

    // Any unreadable document is fatal.
    let store = loader::load_catalog(&config.data)?;

    server::start_server(config, store).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tvstreams=trace,tvstreams_catalog=trace,tower_http=debug".to_string()
        } else {
            "tvstreams=debug,tvstreams_catalog=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start {
            host,
            port,
            liveness_check,
            no_liveness_check,
        } => {
            let liveness_check = match (liveness_check, no_liveness_check) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(
                host,
                port,
                liveness_check,
                cli.config.as_deref(),
            ))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate(path.as_deref())
        }
        Commands::Probe { url, timeout_secs } => {
            probe_url(&url, timeout_secs, cli.config.as_deref())
        }
        Commands::Split { input, parts } => split_json(&input, parts),
        Commands::Version => {
            println!("tvstreams {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => println!("Validating config: {:?}", p),
        None => println!("No config file specified, using default locations"),
    }

    let config = config::load_config_or_default(path)?;
    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  Catalog: {}/{}",
        config.addon.content_type, config.addon.catalog_id
    );
    println!("  Liveness check: {}", config.streams.liveness_check);
    println!("  Probe timeout: {}s", config.streams.probe_timeout_secs);

    let documents = loader::discover_documents(&config.data)?;
    println!("  Data files: {}", documents.len());
    for doc in &documents {
        println!("    {}", doc.display());
    }

    let store = loader::load_paths(&documents)?;
    let stats = store.stats();
    println!("✓ Series data is valid");
    println!("  Series: {}", stats.series);
    println!("  Seasons: {}", stats.seasons);
    println!("  Episodes: {}", stats.episodes);
    println!("  Missing stream URLs: {}", stats.missing_stream_urls);
    println!("  Duplicate ids: {}", stats.duplicate_ids);

    Ok(())
}

fn probe_url(url: &str, timeout_secs: Option<u64>, config_path: Option<&Path>) -> Result<()> {
    let timeout = match timeout_secs {
        Some(0) => anyhow::bail!("Probe timeout must be at least 1 second"),
        Some(secs) => Duration::from_secs(secs),
        None => config::load_config_or_default(config_path)?
            .streams
            .probe_timeout(),
    };

    let prober = HttpProber::with_timeout(timeout);
    let rt = tokio::runtime::Runtime::new()?;
    let reachable = rt.block_on(prober.probe(url));

    if !reachable {
        anyhow::bail!("unreachable: {}", url);
    }
    println!("reachable: {}", url);
    Ok(())
}

fn split_json(input: &Path, parts: usize) -> Result<()> {
    let written = split::split_file(input, parts)?;
    for (i, path) in written.iter().enumerate() {
        println!("Part {} written to {}", i + 1, path.display());
    }
    Ok(())
}
