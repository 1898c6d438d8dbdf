use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tvstreams")]
#[command(author, version, about = "Series catalog and stream addon server")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the addon server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Probe stream URLs before returning them (overrides config)
        #[arg(long, overrides_with = "no_liveness_check")]
        liveness_check: bool,

        /// Return stream URLs without probing them (overrides config)
        #[arg(long, overrides_with = "liveness_check")]
        no_liveness_check: bool,
    },

    /// Load config and series data, then report catalog statistics
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Check whether a stream URL is currently reachable
    Probe {
        /// Stream URL to check
        #[arg(required = true)]
        url: String,

        /// Probe timeout in seconds (defaults to the configured timeout)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Split a JSON array file into several part files
    Split {
        /// JSON file to split
        #[arg(required = true)]
        input: PathBuf,

        /// Number of parts to write
        #[arg(short = 'n', long)]
        parts: usize,
    },

    /// Display version information
    Version,
}
