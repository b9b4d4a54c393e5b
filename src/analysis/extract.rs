//! Per-event feature extraction.
//!
//! Each extractor reads one attribute of an [`Event`]. The `index` argument is
//! the event's position in its collection and only feeds error messages.

use crate::error::{QuakeError, Result};
use crate::models::{Event, Location};
use chrono::{DateTime, Datelike};

/// Magnitude of the event.
pub fn magnitude_of(event: &Event, index: usize) -> Result<f64> {
    event
        .properties
        .mag
        .ok_or(QuakeError::MalformedRecord {
            index,
            field: "properties.mag",
        })
}

/// Calendar year of the event's origin time, in UTC.
///
/// The millisecond timestamp is floor-divided by 1000 before conversion, so
/// the sub-second part never moves an event across a year boundary.
pub fn year_of(event: &Event, index: usize) -> Result<i32> {
    let malformed = || QuakeError::MalformedRecord {
        index,
        field: "properties.time",
    };

    let millis = event.properties.time.ok_or_else(malformed)?;
    let seconds = millis.div_euclid(1000);

    DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.year())
        .ok_or_else(malformed)
}

/// Location of the event as `(latitude, longitude)`.
///
/// GeoJSON stores `[longitude, latitude, depth]`; depth is dropped.
pub fn location_of(event: &Event, index: usize) -> Result<Location> {
    match event.geometry.as_ref().map(|g| g.coordinates.as_slice()) {
        Some([longitude, latitude, ..]) => Ok(Location {
            latitude: *latitude,
            longitude: *longitude,
        }),
        _ => Err(QuakeError::MalformedRecord {
            index,
            field: "geometry.coordinates",
        }),
    }
}
