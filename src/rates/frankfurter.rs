//! Frankfurter Rate Provider
//! Fetches ECB reference rates from a Frankfurter-compatible HTTP API.

use crate::currency::Currency;
use crate::rates::{RateError, RateProvider};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.dev/v1";

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    rates: HashMap<String, f64>,
}

/// Blocking rate provider. Every call is one HTTP round trip.
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, RateError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("fx_converter/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url_for(&self, from: Currency, to: Currency, as_of: Option<NaiveDate>) -> String {
        let segment = match as_of {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "latest".to_string(),
        };
        format!("{}/{}?from={}&to={}", self.base_url, segment, from, to)
    }
}

impl RateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterRateFetch", skip(self), fields(from = %from, to = %to))]
    fn get_rate(
        &self,
        from: Currency,
        to: Currency,
        as_of: Option<NaiveDate>,
    ) -> Result<f64, RateError> {
        if from == to {
            return Ok(1.0);
        }

        let pair = format!("{from}{to}");
        let url = self.url_for(from, to, as_of);
        debug!("Requesting exchange rate from {}", url);

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, %pair, "Rate service returned an error status");
            return Err(RateError::Status { status, pair });
        }

        let text = response.text()?;
        let data: FrankfurterResponse = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(source) => return Err(RateError::Decode { pair, source }),
        };

        let Some(rate) = data.rates.get(to.code()).copied() else {
            return Err(RateError::MissingRate(pair));
        };
        if rate <= 0.0 {
            warn!(rate, %pair, "Rate service returned an unusable rate");
            return Err(RateError::Unavailable(format!(
                "Unusable rate {rate} for currency pair: {pair}"
            )));
        }
        Ok(rate)
    }
}
