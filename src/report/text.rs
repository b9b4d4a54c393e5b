//! Console report generation.
//!
//! This module renders a [`Summary`] as plain text lines or as JSON.

use crate::models::{QueryFilter, Summary, YearStats};
use anyhow::Result;

/// Generate the plain-text summary printed after a successful run.
pub fn generate_text_report(summary: &Summary) -> String {
    let mut output = String::new();

    output.push_str(&generate_filter_section(&summary.filter));
    output.push_str(&format!("Loaded {}\n", summary.count));
    output.push_str(&format!(
        "The strongest earthquake was at {} with magnitude {}\n",
        summary.strongest.location, summary.strongest.magnitude
    ));
    output.push_str(&generate_years_section(&summary.years));

    output
}

/// Describe the query window.
fn generate_filter_section(filter: &QueryFilter) -> String {
    format!(
        "Query: {} to {}, lat [{}, {}], lon [{}, {}], magnitude >= {}\n",
        filter.start_time,
        filter.end_time,
        filter.min_latitude,
        filter.max_latitude,
        filter.min_longitude,
        filter.max_longitude,
        filter.min_magnitude
    )
}

/// Generate the per-year table.
fn generate_years_section(years: &[YearStats]) -> String {
    if years.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("\nYear  Count  Avg magnitude\n");
    for row in years {
        section.push_str(&format!(
            "{:<5} {:>5}  {:>13.2}\n",
            row.year, row.count, row.average_magnitude
        ));
    }

    section
}

/// Message printed when the pipeline has nothing to report.
pub fn generate_no_data_notice(reason: &str) -> String {
    format!("No data loaded: {}\n", reason)
}

/// Generate a JSON report.
pub fn generate_json_report(summary: &Summary) -> Result<String> {
    serde_json::to_string_pretty(summary).map_err(Into::into)
}
