//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Query flags are optional: when absent, the value
//! from `.quakestats.toml` (or the built-in default) is used.

use clap::Parser;
use std::path::PathBuf;

/// QuakeStats - earthquake statistics from the USGS event catalog
///
/// Fetches earthquakes inside a latitude/longitude box and time window,
/// prints how many were loaded and the strongest one, and charts the
/// number of events and the average magnitude per year.
///
/// Examples:
///   quakestats
///   quakestats --start-time 2010-01-01 --min-magnitude 2.5
///   quakestats --format json --no-charts
///   quakestats --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Catalog query endpoint (FDSN event service, GeoJSON output)
    #[arg(long, value_name = "URL", env = "QUAKESTATS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Start of the time window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_time: Option<String>,

    /// End of the time window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end_time: Option<String>,

    /// Southern edge of the bounding box
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub min_latitude: Option<f64>,

    /// Northern edge of the bounding box
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub max_latitude: Option<f64>,

    /// Western edge of the bounding box
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub min_longitude: Option<f64>,

    /// Eastern edge of the bounding box
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub max_longitude: Option<f64>,

    /// Minimum magnitude of returned events
    #[arg(long, value_name = "MAG", allow_negative_numbers = true)]
    pub min_magnitude: Option<f64>,

    /// Sort order understood by the catalog (e.g. time-asc)
    #[arg(long, value_name = "KEY")]
    pub order_by: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Directory the chart SVG files are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format for the summary (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Do not render charts
    #[arg(long)]
    pub no_charts: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .quakestats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default configuration file
    ///
    /// Written to the --config path when given, otherwise .quakestats.toml
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text lines (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if let Some(ref endpoint) = self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err("Endpoint URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
