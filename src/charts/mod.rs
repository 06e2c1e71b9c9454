//! Charts module - Chart rendering

mod exporter;
mod plotter;

pub use exporter::{ChartExporter, ExportError};
pub use plotter::RatePlotter;
