//! Rates module - Exchange rate lookup abstractions and providers

mod cache;
mod frankfurter;

pub use cache::CachingRateProvider;
pub use frankfurter::{FrankfurterProvider, DEFAULT_BASE_URL};

use crate::currency::Currency;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error: {status} for currency pair: {pair}")]
    Status {
        status: reqwest::StatusCode,
        pair: String,
    },
    #[error("No rate data found for currency pair: {0}")]
    MissingRate(String),
    #[error("Failed to parse rate response for {pair}: {source}")]
    Decode {
        pair: String,
        #[source]
        source: serde_json::Error,
    },
    /// The service answered, but not with a usable rate
    #[error("{0}")]
    Unavailable(String),
}

/// Source of current and historical exchange rates.
///
/// Implementations may block; callers run them off the UI thread.
pub trait RateProvider: Send + Sync {
    /// Units of `to` per one unit of `from`, as of `as_of` (latest when `None`).
    fn get_rate(
        &self,
        from: Currency,
        to: Currency,
        as_of: Option<NaiveDate>,
    ) -> Result<f64, RateError>;

    fn get_historical_rate(
        &self,
        from: Currency,
        to: Currency,
        date: NaiveDate,
    ) -> Result<f64, RateError> {
        self.get_rate(from, to, Some(date))
    }
}

/// One sample of a rate history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Rate history for a currency pair, newest sample first.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    pub from: Currency,
    pub to: Currency,
    pub points: Vec<RatePoint>,
}

impl RateSeries {
    pub fn title(&self) -> String {
        format!("{} to {} Exchange Rate", self.from, self.to)
    }

    /// (min, max) of the rates, `None` for an empty series.
    pub fn rate_bounds(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.rate, p.rate)),
            Some((lo, hi)) => Some((lo.min(p.rate), hi.max(p.rate))),
        })
    }

    /// (earliest, latest) sample dates.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let earliest = self.points.iter().map(|p| p.date).min()?;
        let latest = self.points.iter().map(|p| p.date).max()?;
        Some((earliest, latest))
    }
}

#[cfg(test)]
pub mod testing {
    //! Stand-in provider for tests.

    use super::*;
    use std::sync::Mutex;

    pub type Call = (Currency, Currency, Option<NaiveDate>);

    enum Behavior {
        Fixed(f64),
        Fail(String),
        ByDate(Box<dyn Fn(NaiveDate) -> f64 + Send + Sync>),
    }

    /// Records every lookup and answers from a canned behavior.
    pub struct StubRateProvider {
        behavior: Behavior,
        calls: Mutex<Vec<Call>>,
    }

    impl StubRateProvider {
        pub fn fixed(rate: f64) -> Self {
            Self::with(Behavior::Fixed(rate))
        }

        pub fn failing(message: &str) -> Self {
            Self::with(Behavior::Fail(message.to_string()))
        }

        pub fn by_date(f: impl Fn(NaiveDate) -> f64 + Send + Sync + 'static) -> Self {
            Self::with(Behavior::ByDate(Box::new(f)))
        }

        fn with(behavior: Behavior) -> Self {
            Self {
                behavior,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RateProvider for StubRateProvider {
        fn get_rate(
            &self,
            from: Currency,
            to: Currency,
            as_of: Option<NaiveDate>,
        ) -> Result<f64, RateError> {
            self.calls.lock().unwrap().push((from, to, as_of));
            match &self.behavior {
                Behavior::Fixed(rate) => Ok(*rate),
                Behavior::Fail(message) => Err(RateError::Unavailable(message.clone())),
                Behavior::ByDate(f) => {
                    let date = as_of.expect("by_date stub only answers dated lookups");
                    Ok(f(date))
                }
            }
        }
    }
}
