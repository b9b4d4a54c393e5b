//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.quakestats.toml` files.

use crate::client::{ClientConfig, DEFAULT_ENDPOINT};
use crate::models::QueryFilter;
use crate::report::ChartOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".quakestats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog query filter.
    #[serde(default)]
    pub query: QueryFilter,

    /// HTTP client settings.
    #[serde(default)]
    pub client: ClientSettings,

    /// Chart output settings.
    #[serde(default)]
    pub charts: ChartSettings,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Catalog query endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Chart output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Render the charts at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory the SVG files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Chart width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Chart height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// File name of the "number per year" chart.
    #[serde(default = "default_number_per_year_file")]
    pub number_per_year_file: String,

    /// File name of the "average magnitude per year" chart.
    #[serde(default = "default_average_magnitude_file")]
    pub average_magnitude_file: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: default_output_dir(),
            width: default_width(),
            height: default_height(),
            number_per_year_file: default_number_per_year_file(),
            average_magnitude_file: default_average_magnitude_file(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_number_per_year_file() -> String {
    "number_per_year.svg".to_string()
}

fn default_average_magnitude_file() -> String {
    "average_magnitude_per_year.svg".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.quakestats.toml` from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        let query = &mut self.query;
        if let Some(ref start_time) = args.start_time {
            query.start_time = start_time.clone();
        }
        if let Some(ref end_time) = args.end_time {
            query.end_time = end_time.clone();
        }
        if let Some(min_latitude) = args.min_latitude {
            query.min_latitude = min_latitude;
        }
        if let Some(max_latitude) = args.max_latitude {
            query.max_latitude = max_latitude;
        }
        if let Some(min_longitude) = args.min_longitude {
            query.min_longitude = min_longitude;
        }
        if let Some(max_longitude) = args.max_longitude {
            query.max_longitude = max_longitude;
        }
        if let Some(min_magnitude) = args.min_magnitude {
            query.min_magnitude = min_magnitude;
        }
        if let Some(ref order_by) = args.order_by {
            query.order_by = order_by.clone();
        }

        if let Some(ref endpoint) = args.endpoint {
            self.client.endpoint = endpoint.clone();
        }
        if let Some(timeout) = args.timeout {
            self.client.timeout_seconds = timeout;
        }

        if let Some(ref output_dir) = args.output_dir {
            self.charts.output_dir = output_dir.display().to_string();
        }

        // Flags always override
        if args.no_charts {
            self.charts.enabled = false;
        }
    }

    /// Client configuration derived from the `[client]` section.
    pub fn client_config(&self, show_progress: bool) -> ClientConfig {
        ClientConfig {
            endpoint: self.client.endpoint.clone(),
            timeout_seconds: self.client.timeout_seconds,
            show_progress,
        }
    }

    /// Chart options derived from the `[charts]` section.
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            enabled: self.charts.enabled,
            output_dir: PathBuf::from(&self.charts.output_dir),
            width: self.charts.width,
            height: self.charts.height,
            number_per_year_file: self.charts.number_per_year_file.clone(),
            average_magnitude_file: self.charts.average_magnitude_file.clone(),
        }
    }

    /// Write the default configuration to `path`, refusing to overwrite.
    pub fn write_default(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!(
                "{} already exists. Remove it first or edit it manually.",
                path.display()
            );
        }

        std::fs::write(path, Self::default_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
