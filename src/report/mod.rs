//! Reporters: console text, JSON and charts.

pub mod chart;
pub mod text;

pub use chart::{render_yearly_line_chart, AVERAGE_MAGNITUDE_PER_YEAR, NUMBER_PER_YEAR};
pub use text::{generate_json_report, generate_no_data_notice, generate_text_report};

use crate::cli::OutputFormat;
use crate::models::Summary;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Sink for everything the pipeline reports.
pub trait Reporter {
    /// Print the count/strongest-event summary.
    fn summary(&mut self, summary: &Summary) -> Result<()>;

    /// Chart event counts per year.
    fn number_per_year(&mut self, summary: &Summary) -> Result<()>;

    /// Chart average magnitude per year.
    fn average_magnitude_per_year(&mut self, summary: &Summary) -> Result<()>;

    /// Tell the user there is nothing to report.
    fn no_data(&mut self, reason: &str);
}

/// Chart output settings.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub enabled: bool,
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    pub number_per_year_file: String,
    pub average_magnitude_file: String,
}

/// Reporter writing to stdout/stderr and SVG files.
pub struct ConsoleReporter {
    format: OutputFormat,
    charts: ChartOptions,
}

impl ConsoleReporter {
    pub fn new(format: OutputFormat, charts: ChartOptions) -> Self {
        Self { format, charts }
    }

    fn render(
        &self,
        file_name: &str,
        style: &chart::ChartStyle,
        points: &[(i32, f64)],
    ) -> Result<()> {
        if !self.charts.enabled {
            return Ok(());
        }

        std::fs::create_dir_all(&self.charts.output_dir).with_context(|| {
            format!(
                "Failed to create chart directory {}",
                self.charts.output_dir.display()
            )
        })?;

        let path = self.charts.output_dir.join(file_name);
        render_yearly_line_chart(&path, style, points, (self.charts.width, self.charts.height))
            .with_context(|| format!("Failed to write chart {}", path.display()))?;

        if self.format == OutputFormat::Text {
            println!("Chart saved to: {}", path.display());
        }
        Ok(())
    }
}

impl Reporter for ConsoleReporter {
    fn summary(&mut self, summary: &Summary) -> Result<()> {
        match self.format {
            OutputFormat::Text => print!("{}", generate_text_report(summary)),
            OutputFormat::Json => println!("{}", generate_json_report(summary)?),
        }
        Ok(())
    }

    fn number_per_year(&mut self, summary: &Summary) -> Result<()> {
        self.render(
            &self.charts.number_per_year_file,
            &NUMBER_PER_YEAR,
            &summary.count_series(),
        )
    }

    fn average_magnitude_per_year(&mut self, summary: &Summary) -> Result<()> {
        self.render(
            &self.charts.average_magnitude_file,
            &AVERAGE_MAGNITUDE_PER_YEAR,
            &summary.average_series(),
        )
    }

    fn no_data(&mut self, reason: &str) {
        eprint!("{}", generate_no_data_notice(reason));
    }
}
