//! Domain errors for the fetch → aggregate → report pipeline.

use thiserror::Error;

/// Errors raised while fetching, extracting, aggregating or charting events.
#[derive(Debug, Error)]
pub enum QuakeError {
    /// The catalog answered with a non-success status.
    #[error("Failed to retrieve data: {status}")]
    Fetch { status: u16 },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// The response body was not a GeoJSON feature collection.
    #[error("Failed to parse catalog response: {0}")]
    Decode(String),

    /// An event is missing a field one of the extractors needs.
    #[error("Malformed record #{index}: missing or invalid `{field}`")]
    MalformedRecord { index: usize, field: &'static str },

    /// Aggregation that needs at least one event got none.
    #[error("No events in collection")]
    EmptyCollection,

    /// Chart backend failure.
    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

impl QuakeError {
    /// True for the failures that mean "nothing to report" rather than a crash.
    pub fn is_no_data(&self) -> bool {
        matches!(self, QuakeError::Fetch { .. } | QuakeError::EmptyCollection)
    }
}

/// Type alias for Results using QuakeError
pub type Result<T> = std::result::Result<T, QuakeError>;
