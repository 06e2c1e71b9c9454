//! Rate Cache
//! Memoizes historical lookups for days that are over. A past day's published
//! rate does not change; today's can still be revised, so it is always fetched.

use crate::currency::Currency;
use crate::rates::{RateError, RateProvider};
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

type HistoryKey = (Currency, Currency, NaiveDate);

/// Whether the rate for `date` is final as of `today`.
fn is_settled(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub struct CachingRateProvider {
    inner: Arc<dyn RateProvider>,
    history: Mutex<HashMap<HistoryKey, f64>>,
}

impl CachingRateProvider {
    pub fn new(inner: Arc<dyn RateProvider>) -> Self {
        Self {
            inner,
            history: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, key: &HistoryKey) -> Option<f64> {
        let value = self.history.lock().ok()?.get(key).copied();
        if value.is_some() {
            debug!("Cache HIT");
        } else {
            debug!("Cache MISS");
        }
        value
    }

    fn store(&self, key: HistoryKey, rate: f64) {
        if let Ok(mut history) = self.history.lock() {
            debug!("Cache PUT");
            history.insert(key, rate);
        }
    }
}

impl RateProvider for CachingRateProvider {
    fn get_rate(
        &self,
        from: Currency,
        to: Currency,
        as_of: Option<NaiveDate>,
    ) -> Result<f64, RateError> {
        let Some(date) = as_of else {
            return self.inner.get_rate(from, to, None);
        };
        if !is_settled(date, Local::now().date_naive()) {
            return self.inner.get_rate(from, to, as_of);
        }

        let key = (from, to, date);
        if let Some(rate) = self.cached(&key) {
            return Ok(rate);
        }

        let rate = self.inner.get_rate(from, to, as_of)?;
        self.store(key, rate);
        Ok(rate)
    }
}
