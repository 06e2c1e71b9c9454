//! Currency Converter Main Application
//! Main window with control panel and chart viewer. Rate lookups run on a
//! background thread; results come back over a channel polled each frame.

use crate::charts::{ChartExporter, ExportError};
use crate::config::AppConfig;
use crate::converter::Converter;
use crate::currency::{parse_amount, ConversionRequest, ConversionResult, ConvertError, CurrencySet};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::rates::RateSeries;
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, warn};

/// Export image size in pixels
const EXPORT_SIZE: (u32, u32) = (1000, 700);

/// Result of a background rate lookup
enum JobResult {
    Converted(Result<ConversionResult, ConvertError>),
    Plotted(Result<RateSeries, ConvertError>),
}

/// Main application window.
pub struct ConverterApp {
    converter: Converter,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async rate lookup
    job_rx: Option<Receiver<JobResult>>,
    is_working: bool,
}

impl ConverterApp {
    pub fn new(converter: Converter, currencies: CurrencySet, config: &AppConfig) -> Self {
        Self {
            converter,
            control_panel: ControlPanel::new(currencies, config.default_from, config.default_to),
            chart_viewer: ChartViewer::new(config.chart.equal_aspect),
            job_rx: None,
            is_working: false,
        }
    }

    /// Validate the amount here, then fetch the latest rate in the background.
    fn start_convert(&mut self) {
        if self.is_working {
            return;
        }

        let amount = match parse_amount(&self.control_panel.amount_text) {
            Ok(amount) => amount,
            Err(e) => {
                self.control_panel.set_result(e.to_string());
                return;
            }
        };

        let request =
            ConversionRequest::latest(self.control_panel.from, self.control_panel.to, amount);
        let converter = self.converter.clone();
        self.control_panel.set_status("Fetching latest rate...");
        self.spawn_job(move || JobResult::Converted(converter.convert(&request)));
    }

    /// Clear the chart and fetch the last week of rates in the background.
    fn start_plot(&mut self) {
        if self.is_working {
            return;
        }

        self.chart_viewer.clear();
        self.control_panel.export_enabled = false;

        let (from, to) = (self.control_panel.from, self.control_panel.to);
        let today = chrono::Local::now().date_naive();
        let converter = self.converter.clone();
        self.control_panel.set_status("Fetching rate history...");
        self.spawn_job(move || {
            JobResult::Plotted(converter.rate_history(from, to, today))
        });
    }

    fn spawn_job<F>(&mut self, job: F)
    where
        F: FnOnce() -> JobResult + Send + 'static,
    {
        let (tx, rx) = channel();

        let spawned = thread::Builder::new()
            .name("rate-lookup".to_string())
            .spawn(move || {
                let _ = tx.send(job());
            });

        match spawned {
            Ok(_) => {
                debug!("Dispatched rate lookup");
                self.job_rx = Some(rx);
                self.is_working = true;
                self.control_panel.busy = true;
            }
            Err(e) => {
                warn!(error = %e, "Could not start rate lookup thread");
                self.control_panel
                    .set_result(ConvertError::Worker(e.to_string()).to_string());
                self.control_panel.set_status("Ready");
            }
        }
    }

    /// Check for background lookup results
    fn check_job_results(&mut self) {
        let Some(rx) = self.job_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.finish_job();
                self.apply_result(result);
            }
            Err(TryRecvError::Empty) => {
                self.job_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                warn!("Rate lookup thread exited without a result");
                self.finish_job();
                let err = ConvertError::Worker("rate lookup stopped unexpectedly".to_string());
                self.control_panel.set_result(err.to_string());
            }
        }
    }

    fn finish_job(&mut self) {
        self.is_working = false;
        self.control_panel.busy = false;
        self.control_panel.set_status("Ready");
    }

    fn apply_result(&mut self, result: JobResult) {
        match result {
            JobResult::Converted(Ok(conversion)) => {
                debug!(%conversion, "Conversion complete");
                self.control_panel.set_result(conversion.to_string());
            }
            JobResult::Plotted(Ok(series)) => {
                debug!(samples = series.points.len(), "Rate history complete");
                self.chart_viewer.set_series(series);
                self.control_panel.export_enabled = true;
            }
            JobResult::Converted(Err(e)) | JobResult::Plotted(Err(e)) => {
                warn!(error = %e, "Rate lookup failed");
                self.control_panel.set_result(e.to_string());
            }
        }
    }

    /// Handle chart export - ask for a location and write an SVG
    fn handle_export_chart(&mut self) {
        let Some(series) = self.chart_viewer.series() else {
            self.control_panel
                .set_status(ExportError::EmptySeries.to_string());
            return;
        };

        let file_name = format!("{}_{}_rates.svg", series.from, series.to);
        let output_path = match rfd::FileDialog::new()
            .add_filter("SVG Image", &["svg"])
            .set_file_name(file_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match ChartExporter::export_svg(series, &output_path, EXPORT_SIZE) {
            Ok(()) => {
                self.control_panel
                    .set_status(format!("Chart saved to {}", output_path.display()));
            }
            Err(e) => {
                warn!(error = %e, "Chart export failed");
                self.control_panel.set_status(e.to_string());
            }
        }
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_job_results();

        // Request repaint while a lookup is running
        if self.is_working {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    match action {
                        ControlPanelAction::Convert => self.start_convert(),
                        ControlPanelAction::Plot => self.start_plot(),
                        ControlPanelAction::ExportChart => self.handle_export_chart(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
