//! Chart Plotter Module
//! Draws the interactive rate-history chart using egui_plot.

use crate::rates::RateSeries;
use chrono::{Datelike, NaiveDate};
use egui::epaint::TextShape;
use egui::{Color32, FontId, RichText};
use egui_plot::{GridMark, Line, Plot, PlotPoint, PlotPoints, Points};
use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

pub const LINE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const DEFAULT_TITLE: &str = "Currency Exchange Rate";
pub const DEFAULT_Y_LABEL: &str = "Exchange Rate";
pub const X_LABEL: &str = "Date";

/// Room below the plot frame for the rotated date labels
const DATE_BAND_HEIGHT: f32 = 72.0;
const DATE_FONT_SIZE: f32 = 12.0;

/// Chart title and y-axis label for the given series (or the empty chart).
pub fn axis_labels(series: Option<&RateSeries>) -> (String, String) {
    match series {
        Some(series) => (series.title(), series.title()),
        None => (DEFAULT_TITLE.to_string(), DEFAULT_Y_LABEL.to_string()),
    }
}

/// Plot x coordinate of a date (days since CE).
pub fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

pub fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Creates the rate chart using egui_plot.
pub struct RatePlotter;

impl RatePlotter {
    /// Draw title, line plot and rotated date labels.
    /// An absent series draws the empty chart.
    pub fn draw_rate_chart(
        ui: &mut egui::Ui,
        series: Option<&RateSeries>,
        equal_aspect: bool,
        height: f32,
    ) {
        let (title, y_label) = axis_labels(series);

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&title).size(18.0).strong());
        });
        ui.add_space(6.0);

        let sample_xs: Vec<f64> = series
            .map(|s| s.points.iter().map(|p| date_to_x(p.date)).collect())
            .unwrap_or_default();
        let grid_xs = sample_xs.clone();

        let mut plot = Plot::new("rate_history")
            .height((height - DATE_BAND_HEIGHT).max(120.0))
            .y_axis_label(y_label)
            .show_axes([false, true])
            .allow_scroll(false)
            .x_grid_spacer(move |_input| {
                grid_xs
                    .iter()
                    .map(|&value| GridMark {
                        value,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .label_formatter(|_name, value| match x_to_date(value.x) {
                Some(date) => format!("{}\n{:.4}", date_label(date), value.y),
                None => String::new(),
            });

        if equal_aspect {
            plot = plot.data_aspect(1.0);
        }

        let response = plot.show(ui, |plot_ui| {
            let Some(series) = series else {
                return;
            };
            let points: Vec<[f64; 2]> = series
                .points
                .iter()
                .map(|p| [date_to_x(p.date), p.rate])
                .collect();

            plot_ui.line(
                Line::new(PlotPoints::from_iter(points.iter().copied()))
                    .color(LINE_COLOR)
                    .width(2.0)
                    .name(series.title()),
            );
            plot_ui.points(
                Points::new(PlotPoints::from_iter(points.iter().copied()))
                    .radius(3.0)
                    .color(LINE_COLOR),
            );
        });

        // Date tick labels, rotated 45 degrees
        let (band, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), DATE_BAND_HEIGHT),
            egui::Sense::hover(),
        );
        let transform = response.transform;
        let frame = *transform.frame();
        let painter = ui.painter();
        let color = ui.visuals().text_color();

        for &x in &sample_xs {
            let Some(date) = x_to_date(x) else {
                continue;
            };
            let tick = transform.position_from_point(&PlotPoint::new(x, 0.0));
            if tick.x < frame.left() || tick.x > frame.right() {
                continue;
            }
            let galley = painter.layout_no_wrap(
                date_label(date),
                FontId::proportional(DATE_FONT_SIZE),
                color,
            );
            // Text runs up and to the right, ending at the tick
            let run = galley.size().x * FRAC_1_SQRT_2;
            let pos = egui::pos2(tick.x - run, frame.bottom() + 4.0 + run);
            painter.add(TextShape::new(pos, galley, color).with_angle(-FRAC_PI_4));
        }

        painter.text(
            egui::pos2(frame.center().x, band.bottom()),
            egui::Align2::CENTER_BOTTOM,
            X_LABEL,
            FontId::proportional(13.0),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use crate::rates::RatePoint;

    #[test]
    fn test_date_x_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let x = date_to_x(date);
        assert_eq!(x_to_date(x), Some(date));
        assert_eq!(x_to_date(x + 0.4), Some(date));
        assert_eq!(x_to_date(x + 1.0), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(x_to_date(f64::NAN), None);
    }

    #[test]
    fn test_consecutive_days_are_one_unit_apart() {
        let a = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date_to_x(b) - date_to_x(a), 1.0);
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(
            axis_labels(None),
            (
                "Currency Exchange Rate".to_string(),
                "Exchange Rate".to_string()
            )
        );

        let series = RateSeries {
            from: Currency::EUR,
            to: Currency::SEK,
            points: vec![RatePoint {
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                rate: 11.6,
            }],
        };
        let (title, y_label) = axis_labels(Some(&series));
        assert_eq!(title, "EUR to SEK Exchange Rate");
        assert_eq!(y_label, "EUR to SEK Exchange Rate");
    }

    #[test]
    fn test_date_label_format() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        assert_eq!(date_label(date), "2024-07-09");
    }
}
