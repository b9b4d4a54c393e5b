//! Event aggregation and statistics.
//!
//! This module folds an [`EventCollection`] into the summary values the
//! reporters print and plot.

use crate::analysis::extract::{location_of, magnitude_of, year_of};
use crate::error::{QuakeError, Result};
use crate::models::{
    EventCollection, QueryFilter, StrongestEvent, Summary, YearGroupedMagnitudes, YearStats,
};
use std::collections::BTreeMap;

/// Number of events; 0 when there is no collection at all.
pub fn count(collection: Option<&EventCollection>) -> usize {
    collection.map_or(0, EventCollection::len)
}

/// Magnitude and location of the strongest event.
///
/// Ties go to the earliest event in input order.
pub fn strongest(collection: &EventCollection) -> Result<StrongestEvent> {
    let mut best: Option<(usize, f64)> = None;

    for (index, event) in collection.features.iter().enumerate() {
        let magnitude = magnitude_of(event, index)?;
        match best {
            Some((_, current)) if magnitude <= current => {}
            _ => best = Some((index, magnitude)),
        }
    }

    let (index, magnitude) = best.ok_or(QuakeError::EmptyCollection)?;
    let location = location_of(&collection.features[index], index)?;

    Ok(StrongestEvent {
        magnitude,
        location,
    })
}

/// Group magnitudes by UTC year, keeping input order inside each year.
pub fn group_magnitudes_by_year(collection: &EventCollection) -> Result<YearGroupedMagnitudes> {
    let mut grouped = YearGroupedMagnitudes::new();

    for (index, event) in collection.features.iter().enumerate() {
        let year = year_of(event, index)?;
        let magnitude = magnitude_of(event, index)?;
        grouped.entry(year).or_default().push(magnitude);
    }

    Ok(grouped)
}

/// Mean magnitude for every year that has events.
pub fn average_magnitude_per_year(groups: &YearGroupedMagnitudes) -> BTreeMap<i32, f64> {
    groups
        .iter()
        .filter(|(_, magnitudes)| !magnitudes.is_empty())
        .map(|(year, magnitudes)| {
            let mean = magnitudes.iter().sum::<f64>() / magnitudes.len() as f64;
            (*year, mean)
        })
        .collect()
}

/// Number of events for every year that has events.
pub fn count_per_year(groups: &YearGroupedMagnitudes) -> BTreeMap<i32, usize> {
    groups
        .iter()
        .filter(|(_, magnitudes)| !magnitudes.is_empty())
        .map(|(year, magnitudes)| (*year, magnitudes.len()))
        .collect()
}

/// Compute the full summary for a non-empty collection.
pub fn summarize(collection: &EventCollection, filter: &QueryFilter) -> Result<Summary> {
    if collection.is_empty() {
        return Err(QuakeError::EmptyCollection);
    }

    let strongest = strongest(collection)?;
    let groups = group_magnitudes_by_year(collection)?;
    let averages = average_magnitude_per_year(&groups);
    let counts = count_per_year(&groups);

    let years = counts
        .iter()
        .map(|(year, count)| YearStats {
            year: *year,
            count: *count,
            average_magnitude: averages.get(year).copied().unwrap_or_default(),
        })
        .collect();

    Ok(Summary {
        filter: filter.clone(),
        count: count(Some(collection)),
        strongest,
        years,
    })
}
