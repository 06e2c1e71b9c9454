//! FX Converter - Currency Converter & Exchange Rate History Viewer
//!
//! Converts an amount between two currencies and charts the last week of rates.

mod charts;
mod config;
mod converter;
mod currency;
mod gui;
mod log;
mod rates;

use anyhow::{anyhow, Context};
use config::{AppConfig, ProviderConfig};
use converter::Converter;
use currency::CurrencySet;
use eframe::egui;
use gui::ConverterApp;
use rates::{CachingRateProvider, FrankfurterProvider, RateProvider};
use std::sync::Arc;
use tracing::info;

fn build_provider(config: &ProviderConfig) -> anyhow::Result<Arc<dyn RateProvider>> {
    let http = FrankfurterProvider::new(&config.base_url, config.timeout())
        .context("Failed to create rate provider")?;
    info!(base_url = %config.base_url, "Using rate service");

    let provider: Arc<dyn RateProvider> = Arc::new(http);
    if config.cache_history {
        Ok(Arc::new(CachingRateProvider::new(provider)))
    } else {
        Ok(provider)
    }
}

fn main() -> anyhow::Result<()> {
    log::init_logging();

    let config = AppConfig::load_or_default();
    let converter = Converter::new(build_provider(&config.provider)?);
    let currencies = CurrencySet::standard();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([700.0, 500.0])
            .with_title("Currency Converter"),
        ..Default::default()
    };

    // Run the application
    let app = ConverterApp::new(converter, currencies, &config);
    eframe::run_native(
        "Currency Converter",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("Window error: {e}"))
}
