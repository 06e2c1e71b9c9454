//! Converter Module
//! The convert and rate-history operations, independent of any UI.

use crate::currency::{ConversionRequest, ConversionResult, ConvertError, Currency};
use crate::rates::{RatePoint, RateProvider, RateSeries};
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use tracing::debug;

/// Number of calendar days shown in the history chart, today included.
pub const HISTORY_DAYS: u64 = 7;

/// Dates of the history window: today first, then each prior day.
pub fn history_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (0..HISTORY_DAYS)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

/// Runs conversions and history lookups against a rate provider.
#[derive(Clone)]
pub struct Converter {
    provider: Arc<dyn RateProvider>,
}

impl Converter {
    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self { provider }
    }

    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        let rate = self
            .provider
            .get_rate(request.from, request.to, request.as_of)?;
        debug!(from = %request.from, to = %request.to, rate, "Converted amount");

        Ok(ConversionResult {
            amount: request.amount,
            from: request.from,
            to: request.to,
            converted: request.amount * rate,
        })
    }

    /// Fetch one rate per day for the history window ending at `today`.
    pub fn rate_history(
        &self,
        from: Currency,
        to: Currency,
        today: NaiveDate,
    ) -> Result<RateSeries, ConvertError> {
        let points = history_dates(today)
            .into_iter()
            .map(|date| -> Result<RatePoint, ConvertError> {
                let rate = self.provider.get_historical_rate(from, to, date)?;
                Ok(RatePoint { date, rate })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(%from, %to, samples = points.len(), "Fetched rate history");
        Ok(RateSeries { from, to, points })
    }
}
