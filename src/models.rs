//! Data models for the earthquake catalog.
//!
//! This module contains the GeoJSON shapes returned by the catalog, the
//! query filter sent to it, and the summary produced by the pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Filter parameters sent with the catalog query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Start of the time window (ISO date).
    #[serde(default = "default_start_time")]
    pub start_time: String,
    /// End of the time window (ISO date).
    #[serde(default = "default_end_time")]
    pub end_time: String,
    #[serde(default = "default_min_latitude")]
    pub min_latitude: f64,
    #[serde(default = "default_max_latitude")]
    pub max_latitude: f64,
    #[serde(default = "default_min_longitude")]
    pub min_longitude: f64,
    #[serde(default = "default_max_longitude")]
    pub max_longitude: f64,
    /// Events below this magnitude are not returned.
    #[serde(default = "default_min_magnitude")]
    pub min_magnitude: f64,
    /// Sort key understood by the catalog (e.g. `time-asc`).
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            start_time: default_start_time(),
            end_time: default_end_time(),
            min_latitude: default_min_latitude(),
            max_latitude: default_max_latitude(),
            min_longitude: default_min_longitude(),
            max_longitude: default_max_longitude(),
            min_magnitude: default_min_magnitude(),
            order_by: default_order_by(),
        }
    }
}

fn default_start_time() -> String {
    "2000-01-01".to_string()
}

fn default_end_time() -> String {
    "2018-10-11".to_string()
}

fn default_min_latitude() -> f64 {
    50.008
}

fn default_max_latitude() -> f64 {
    58.723
}

fn default_min_longitude() -> f64 {
    -9.756
}

fn default_max_longitude() -> f64 {
    1.67
}

fn default_min_magnitude() -> f64 {
    1.0
}

fn default_order_by() -> String {
    "time-asc".to_string()
}

impl QueryFilter {
    /// Query string pairs in the catalog's parameter names.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("starttime", self.start_time.clone()),
            ("endtime", self.end_time.clone()),
            ("maxlatitude", self.max_latitude.to_string()),
            ("minlatitude", self.min_latitude.to_string()),
            ("maxlongitude", self.max_longitude.to_string()),
            ("minlongitude", self.min_longitude.to_string()),
            ("minmagnitude", self.min_magnitude.to_string()),
            ("orderby", self.order_by.clone()),
        ]
    }
}

/// Properties block of a GeoJSON feature.
///
/// Fields are optional so that a missing value surfaces as a malformed
/// record at extraction time instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventProperties {
    /// Magnitude of the event.
    #[serde(default)]
    pub mag: Option<f64>,
    /// Origin time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub time: Option<i64>,
}

/// Geometry block of a GeoJSON feature: `[longitude, latitude, depth]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// A single earthquake record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub properties: EventProperties,
    #[serde(default)]
    pub geometry: Option<EventGeometry>,
}

impl Event {
    /// Build a well-formed event.
    #[allow(dead_code)] // Fixture constructor
    pub fn new(mag: f64, time_ms: i64, coordinates: [f64; 3]) -> Self {
        Self {
            properties: EventProperties {
                mag: Some(mag),
                time: Some(time_ms),
            },
            geometry: Some(EventGeometry {
                coordinates: coordinates.to_vec(),
            }),
        }
    }
}

/// The events returned by one catalog query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCollection {
    #[serde(default)]
    pub features: Vec<Event>,
}

impl EventCollection {
    #[allow(dead_code)] // Fixture constructor
    pub fn new(features: Vec<Event>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Latitude/longitude pair, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Magnitudes of the events observed in each year, in input order.
pub type YearGroupedMagnitudes = BTreeMap<i32, Vec<f64>>;

/// The strongest event of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrongestEvent {
    pub magnitude: f64,
    pub location: Location,
}

/// Per-year statistics row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearStats {
    pub year: i32,
    pub count: usize,
    pub average_magnitude: f64,
}

/// Everything the reporters need, computed once from a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Filter the events were fetched with.
    pub filter: QueryFilter,
    /// Number of events loaded.
    pub count: usize,
    /// Event with the highest magnitude.
    pub strongest: StrongestEvent,
    /// Sorted by year.
    pub years: Vec<YearStats>,
}

impl Summary {
    /// `(year, count)` points for the "number per year" chart.
    pub fn count_series(&self) -> Vec<(i32, f64)> {
        self.years.iter().map(|y| (y.year, y.count as f64)).collect()
    }

    /// `(year, average)` points for the "average magnitude per year" chart.
    pub fn average_series(&self) -> Vec<(i32, f64)> {
        self.years
            .iter()
            .map(|y| (y.year, y.average_magnitude))
            .collect()
    }
}
