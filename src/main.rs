//! QuakeStats - earthquake statistics from the USGS event catalog
//!
//! Fetches earthquake records once, prints how many were loaded and the
//! strongest one, and charts the yearly event count and average magnitude.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, malformed record, config, chart output, etc.)
//!   2 - No data (non-success status from the catalog, or zero events)

mod analysis;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod pipeline;
mod report;

use anyhow::Result;
use cli::Args;
use client::CatalogClient;
use config::{Config, CONFIG_FILE_NAME};
use pipeline::Outcome;
use report::ConsoleReporter;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config(&args);
    }

    // Initialize logging
    init_logging(&args);

    info!("QuakeStats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: write the default config to --config or .quakestats.toml.
fn handle_init_config(args: &Args) -> Result<()> {
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if let Err(e) = Config::write_default(&path) {
        eprintln!("⚠️  {:#}", e);
        std::process::exit(1);
    }

    println!("✅ Created {} with default settings.", path.display());
    println!("   Edit it to customize the query window, bounding box and charts.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the fetch → aggregate → report pipeline once. Returns the exit code.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let client = CatalogClient::new(config.client_config(!args.quiet))?;
    let mut reporter = ConsoleReporter::new(args.format, config.chart_options());

    info!("Fetching earthquakes from {}", client.endpoint());
    match pipeline::run(&client, &config.query, &mut reporter).await? {
        Outcome::Reported(summary) => {
            info!(
                "Done: {} events, strongest magnitude {}",
                summary.count, summary.strongest.magnitude
            );
            Ok(0)
        }
        Outcome::NoData(reason) => {
            warn!("Nothing reported: {}", reason);
            Ok(2)
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
