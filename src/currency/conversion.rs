//! Conversion Module
//! Request/result values for a single conversion and the user-facing error taxonomy.

use crate::currency::Currency;
use crate::rates::RateError;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// User-visible failure of a convert or plot action.
/// The display text is written straight into the result label.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Please enter a valid amount")]
    InvalidAmount,
    #[error("An error occurred: {0}")]
    Lookup(#[from] RateError),
    #[error("An error occurred: {0}")]
    Worker(String),
}

/// Parse the amount entry text. Surrounding whitespace is ignored and `_`
/// may group digits (`1_000`).
pub fn parse_amount(text: &str) -> Result<f64, ConvertError> {
    let Some(digits) = remove_digit_separators(text.trim()) else {
        return Err(ConvertError::InvalidAmount);
    };
    match digits.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(ConvertError::InvalidAmount),
    }
}

/// Drop `_` separators; each one must sit between two digits.
fn remove_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let is_digit = |b: Option<&u8>| b.is_some_and(u8::is_ascii_digit);
    for (i, _) in text.match_indices('_') {
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        if !is_digit(before) || !is_digit(bytes.get(i + 1)) {
            return None;
        }
    }
    Some(text.replace('_', ""))
}

/// Shortest round-trip text for an amount. Scientific notation keeps a signed
/// exponent of at least two digits: `1e+16`, `1.5e-05`.
fn format_amount(amount: f64) -> String {
    let text = format!("{amount:?}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// One conversion request, built fresh from the UI on each action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub from: Currency,
    pub to: Currency,
    pub amount: f64,
    /// `None` asks for the latest rate
    pub as_of: Option<NaiveDate>,
}

impl ConversionRequest {
    pub fn latest(from: Currency, to: Currency, amount: f64) -> Self {
        Self {
            from,
            to,
            amount,
            as_of: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub amount: f64,
    pub from: Currency,
    pub to: Currency,
    pub converted: f64,
}

impl fmt::Display for ConversionResult {
    /// `100.0 USD =  90.00 EUR`: the converted value carries a sign column,
    /// blank for non-negative values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = format_amount(self.amount);
        let sign = if self.converted.is_sign_negative() {
            ""
        } else {
            " "
        };
        let (from, to, converted) = (self.from, self.to, self.converted);
        write!(f, "{amount} {from} = {sign}{converted:.2} {to}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_numbers() {
        assert_eq!(parse_amount("100").unwrap(), 100.0);
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_amount("1e3").unwrap(), 1000.0);
        assert_eq!(parse_amount("-4").unwrap(), -4.0);
        assert_eq!(parse_amount("1_000").unwrap(), 1000.0);
        assert_eq!(parse_amount("2_500.5_0").unwrap(), 2500.5);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        let inputs = [
            "abc", "", "   ", "12,5", "1.2.3", "inf", "NaN", "10 USD", "_1", "1_", "1__0", "1_.5",
        ];
        for text in inputs {
            let message = parse_amount(text).unwrap_err().to_string();
            assert_eq!(message, "Please enter a valid amount", "input {text:?}");
        }
    }

    #[test]
    fn test_result_display() {
        let result = ConversionResult {
            amount: 100.0,
            from: Currency::USD,
            to: Currency::EUR,
            converted: 90.0,
        };
        assert_eq!(result.to_string(), "100.0 USD =  90.00 EUR");

        let result = ConversionResult {
            amount: 2.5,
            from: Currency::GBP,
            to: Currency::JPY,
            converted: 480.126,
        };
        assert_eq!(result.to_string(), "2.5 GBP =  480.13 JPY");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100.0), "100.0");
        assert_eq!(format_amount(0.0001), "0.0001");
        assert_eq!(format_amount(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_amount(1e15), "1000000000000000.0");
        assert_eq!(format_amount(1e16), "1e+16");
        assert_eq!(format_amount(1e-5), "1e-05");
        assert_eq!(format_amount(-1.5e-7), "-1.5e-07");
        assert_eq!(format_amount(2.5e300), "2.5e+300");
    }

    #[test]
    fn test_result_display_large_amount() {
        let result = ConversionResult {
            amount: 1e16,
            from: Currency::JPY,
            to: Currency::USD,
            converted: 0.5,
        };
        assert_eq!(result.to_string(), "1e+16 JPY =  0.50 USD");
    }

    #[test]
    fn test_result_display_negative() {
        let result = ConversionResult {
            amount: -10.0,
            from: Currency::USD,
            to: Currency::CHF,
            converted: -8.8,
        };
        assert_eq!(result.to_string(), "-10.0 USD = -8.80 CHF");
    }

    #[test]
    fn test_error_display() {
        let err = ConvertError::Lookup(RateError::Unavailable("timeout".to_string()));
        assert_eq!(err.to_string(), "An error occurred: timeout");
        let err = ConvertError::Worker("worker stopped".to_string());
        assert_eq!(err.to_string(), "An error occurred: worker stopped");
    }
}
