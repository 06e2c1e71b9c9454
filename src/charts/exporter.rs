//! Static Chart Exporter
//! Writes the rate history to an SVG file with plotters.
//!
//! Layout matches the window chart: title and y label name the pair,
//! x axis carries one date label per sample.

use crate::charts::plotter::{date_label, X_LABEL};
use crate::rates::RateSeries;
use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const LINE: RGBColor = RGBColor(52, 152, 219);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No chart data to export")]
    EmptySeries,
    #[error("Failed to render chart: {0}")]
    Render(String),
}

fn render_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Render(e.to_string())
}

/// Rate axis range with a margin so a flat series still gets a visible span.
pub fn padded_rate_range(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > f64::EPSILON {
        span * 0.1
    } else {
        (lo.abs() * 0.01).max(1e-4)
    };
    (lo - pad, hi + pad)
}

/// Exports the rate chart as a static image.
pub struct ChartExporter;

impl ChartExporter {
    pub fn export_svg(
        series: &RateSeries,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ExportError> {
        let (earliest, mut latest) = series.date_bounds().ok_or(ExportError::EmptySeries)?;
        let (lo, hi) = series.rate_bounds().ok_or(ExportError::EmptySeries)?;
        if latest == earliest {
            latest = latest
                .checked_add_days(Days::new(1))
                .ok_or(ExportError::EmptySeries)?;
        }
        let (y_min, y_max) = padded_rate_range(lo, hi);
        let title = series.title();

        let root = SVGBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&title, ("sans-serif", 22))
            .margin(16)
            .x_label_area_size(90)
            .y_label_area_size(70)
            .build_cartesian_2d(earliest..latest, y_min..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(&title)
            .x_labels(series.points.len())
            .x_label_formatter(&|d: &NaiveDate| date_label(*d))
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_formatter(&|v: &f64| format!("{v:.4}"))
            .draw()
            .map_err(render_err)?;

        let mut points: Vec<(NaiveDate, f64)> =
            series.points.iter().map(|p| (p.date, p.rate)).collect();
        points.sort_by_key(|(date, _)| *date);

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                LINE.stroke_width(2),
            ))
            .map_err(render_err)?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, 3, LINE.filled())),
            )
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        info!(path = %path.display(), "Exported rate chart");
        Ok(())
    }
}
