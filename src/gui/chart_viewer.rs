//! Chart Viewer Widget
//! Central panel showing the rate history chart.

use crate::charts::RatePlotter;
use crate::rates::RateSeries;

/// Holds the series currently on screen. A cleared viewer draws empty axes.
pub struct ChartViewer {
    series: Option<RateSeries>,
    equal_aspect: bool,
}

impl ChartViewer {
    pub fn new(equal_aspect: bool) -> Self {
        Self {
            series: None,
            equal_aspect,
        }
    }

    pub fn clear(&mut self) {
        self.series = None;
    }

    pub fn set_series(&mut self, series: RateSeries) {
        self.series = Some(series);
    }

    pub fn series(&self) -> Option<&RateSeries> {
        self.series.as_ref()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let height = ui.available_height() - 40.0;
        RatePlotter::draw_rate_chart(ui, self.series.as_ref(), self.equal_aspect, height);
    }
}
