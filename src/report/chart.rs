//! Line chart rendering.
//!
//! Every chart gets its own SVG backend and drawing area, so nothing drawn
//! for one chart can leak into the next.

use crate::error::{QuakeError, Result};
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info};

/// Labels and colour of one yearly line chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub caption: &'static str,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    pub color: RGBColor,
}

/// "Number of Earthquakes per Year".
pub const NUMBER_PER_YEAR: ChartStyle = ChartStyle {
    caption: "Number of Earthquakes per Year",
    x_desc: "Year",
    y_desc: "Number of Earthquakes",
    color: RGBColor(31, 119, 180),
};

/// "Average Magnitude per Year".
pub const AVERAGE_MAGNITUDE_PER_YEAR: ChartStyle = ChartStyle {
    caption: "Average Magnitude per Year",
    x_desc: "Year",
    y_desc: "Average Magnitude",
    color: RGBColor(255, 165, 0),
};

fn chart_err<E: Display>(e: E) -> QuakeError {
    QuakeError::Chart(e.to_string())
}

/// Y-axis range covering every point and zero, padded by a tenth of the span.
///
/// Negative values (small magnitudes can be below zero) extend the axis
/// downwards instead of being clipped to it.
fn value_range(points: &[(i32, f64)]) -> (f64, f64) {
    let y_min = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::min);
    let y_max = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);

    let span = y_max - y_min;
    let pad = if span > 0.0 { span * 0.1 } else { 1.0 };

    let bottom = if y_min < 0.0 { y_min - pad } else { 0.0 };
    let top = if y_max > 0.0 { y_max + pad } else { pad };
    (bottom, top)
}

/// Draw `points` as connected markers over integer years and write an SVG.
pub fn render_yearly_line_chart(
    path: &Path,
    style: &ChartStyle,
    points: &[(i32, f64)],
    size: (u32, u32),
) -> Result<()> {
    let (first_year, last_year) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => return Err(QuakeError::Chart(format!("no points for '{}'", style.caption))),
    };

    let (y_bottom, y_top) = value_range(points);
    let year_span = (last_year - first_year + 1) as usize;

    debug!(
        "Rendering '{}' with {} points to {}",
        style.caption,
        points.len(),
        path.display()
    );

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(style.caption, ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first_year..last_year + 1, y_bottom..y_top)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc(style.x_desc)
        .y_desc(style.y_desc)
        .x_labels(year_span.min(20))
        .x_label_formatter(&|year| year.to_string())
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            style.color.stroke_width(2),
        ))
        .map_err(chart_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 4, style.color.filled())),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;

    info!("Wrote chart: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_writes_separate_svg_files() {
        let dir = TempDir::new().unwrap();
        let counts = dir.path().join("number_per_year.svg");
        let averages = dir.path().join("average_magnitude_per_year.svg");

        render_yearly_line_chart(
            &counts,
            &NUMBER_PER_YEAR,
            &[(2001, 2.0), (2005, 1.0)],
            (640, 480),
        )
        .unwrap();
        render_yearly_line_chart(
            &averages,
            &AVERAGE_MAGNITUDE_PER_YEAR,
            &[(2001, 4.95), (2005, 3.2)],
            (640, 480),
        )
        .unwrap();

        let counts_svg = std::fs::read_to_string(&counts).unwrap();
        let averages_svg = std::fs::read_to_string(&averages).unwrap();

        assert!(counts_svg.contains("<svg"));
        assert!(counts_svg.contains("Number of Earthquakes per Year"));
        assert!(!counts_svg.contains("Average Magnitude per Year"));
        assert!(averages_svg.contains("Average Magnitude per Year"));
        assert!(!averages_svg.contains("Number of Earthquakes per Year"));
    }

    fn circle_centers_y(svg: &str) -> Vec<f64> {
        svg.split("<circle")
            .skip(1)
            .filter_map(|element| {
                let start = element.find("cy=\"")? + 4;
                let end = start + element[start..].find('"')?;
                element[start..end].parse().ok()
            })
            .collect()
    }

    #[test]
    fn test_value_range() {
        let (bottom, top) = value_range(&[(2001, 2.0), (2002, 4.0)]);
        assert_eq!(bottom, 0.0);
        assert!((top - 4.4).abs() < 1e-9);

        assert_eq!(value_range(&[(2001, 0.0)]), (0.0, 1.0));

        let (bottom, top) = value_range(&[(2001, -0.5), (2002, -0.3)]);
        assert!(bottom < -0.5);
        assert!(top > 0.0);
    }

    #[test]
    fn test_render_negative_values_below_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("negative.svg");

        render_yearly_line_chart(
            &path,
            &AVERAGE_MAGNITUDE_PER_YEAR,
            &[(2001, -0.5), (2002, -0.3), (2003, 0.0)],
            (640, 480),
        )
        .unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        let ys = circle_centers_y(&svg);
        assert_eq!(ys.len(), 3);

        // SVG y grows downwards: more negative values sit lower.
        assert!(ys[0] > ys[1], "{:?}", ys);
        assert!(ys[1] > ys[2], "{:?}", ys);
    }

    #[test]
    fn test_render_single_year() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one.svg");

        render_yearly_line_chart(&path, &NUMBER_PER_YEAR, &[(2010, 7.0)], (320, 240)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_without_points_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.svg");

        let err = render_yearly_line_chart(&path, &NUMBER_PER_YEAR, &[], (320, 240)).unwrap_err();
        assert!(matches!(err, QuakeError::Chart(_)));
        assert!(!path.exists());
    }
}
