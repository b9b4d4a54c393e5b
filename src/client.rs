//! Earthquake catalog client.
//!
//! One GET against the FDSN event endpoint with the filter encoded as query
//! parameters. No retries and no pagination: the single response either
//! carries the whole result set or the call fails.

use crate::error::{QuakeError, Result};
use crate::models::{EventCollection, QueryFilter};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default FDSN GeoJSON query endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://earthquake.usgs.gov/fdsnws/event/1/query.geojson";

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    /// Show a spinner while the request is in flight.
    pub show_progress: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 60,
            show_progress: true,
        }
    }
}

/// HTTP client for the event catalog.
pub struct CatalogClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| QuakeError::Transport {
                endpoint: config.endpoint.clone(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Fetch every event matching `filter`.
    ///
    /// A non-success status is returned as [`QuakeError::Fetch`] carrying the
    /// status code, so callers can decide to report "no data" and stop.
    pub async fn fetch_events(&self, filter: &QueryFilter) -> Result<EventCollection> {
        info!(
            "Querying {} for events from {} to {}",
            self.config.endpoint, filter.start_time, filter.end_time
        );
        debug!("Query filter: {:?}", filter);

        let spinner = self.start_spinner();

        let result = self.send(filter).await;

        if let Some(pb) = spinner {
            match &result {
                Ok(collection) => {
                    pb.finish_with_message(format!("Loaded {} events", collection.len()))
                }
                Err(_) => pb.finish_and_clear(),
            }
        }

        result
    }

    async fn send(&self, filter: &QueryFilter) -> Result<EventCollection> {
        let response = self
            .http_client
            .get(&self.config.endpoint)
            .query(&filter.to_query_pairs())
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("request timed out after {}s", self.config.timeout_seconds)
                } else if e.is_connect() {
                    "cannot connect to the catalog".to_string()
                } else {
                    e.to_string()
                };
                QuakeError::Transport {
                    endpoint: self.config.endpoint.clone(),
                    message,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Catalog answered with status {}", status);
            return Err(QuakeError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| QuakeError::Transport {
            endpoint: self.config.endpoint.clone(),
            message: format!("failed to read response body: {}", e),
        })?;
        debug!("Received {} bytes", body.len());

        let collection: EventCollection =
            serde_json::from_str(&body).map_err(|e| QuakeError::Decode(e.to_string()))?;

        info!("Catalog returned {} events", collection.len());
        Ok(collection)
    }

    fn start_spinner(&self) -> Option<ProgressBar> {
        if !self.config.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")
        {
            pb.set_style(style);
        }
        pb.set_message("Fetching earthquake data...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}
