//! Currency Codes Module
//! The closed set of ISO-4217 codes the converter offers.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Three-letter ISO-4217 currency code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    USD,
    EUR,
    JPY,
    GBP,
    AUD,
    CAD,
    CHF,
    CNY,
    SEK,
    NZD,
}

impl Currency {
    pub fn code(&self) -> &str {
        self.as_ref()
    }
}

/// Immutable, ordered set of currencies offered in the selectors.
/// Built once at startup and handed to the UI at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySet {
    codes: Vec<Currency>,
}

impl CurrencySet {
    /// All supported currencies in display order.
    pub fn standard() -> Self {
        Self {
            codes: Currency::iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Currency> + '_ {
        self.codes.iter().copied()
    }

    pub fn contains(&self, currency: Currency) -> bool {
        self.codes.contains(&currency)
    }

    /// Return `preferred` if it is in the set, otherwise the first member.
    pub fn resolve(&self, preferred: Currency) -> Option<Currency> {
        if self.contains(preferred) {
            Some(preferred)
        } else {
            self.codes.first().copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_standard_set_order() {
        let set = CurrencySet::standard();
        let codes: Vec<String> = set.iter().map(|c| c.to_string()).collect();
        assert_eq!(codes.join(" "), "USD EUR JPY GBP AUD CAD CHF CNY SEK NZD");
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!(Currency::from_str("GBP").unwrap(), Currency::GBP);
        assert_eq!(Currency::from_str("sek").unwrap(), Currency::SEK);
        assert!(Currency::from_str("XYZ").is_err());
        assert_eq!(Currency::CHF.code(), "CHF");
    }

    #[test]
    fn test_resolve_falls_back_to_first_member() {
        let standard = CurrencySet::standard();
        assert_eq!(standard.resolve(Currency::SEK), Some(Currency::SEK));

        let narrow = CurrencySet {
            codes: vec![Currency::EUR, Currency::JPY],
        };
        assert_eq!(narrow.resolve(Currency::JPY), Some(Currency::JPY));
        assert_eq!(narrow.resolve(Currency::USD), Some(Currency::EUR));

        let empty = CurrencySet { codes: Vec::new() };
        assert_eq!(empty.resolve(Currency::USD), None);
    }

    #[test]
    fn test_serde_uses_iso_codes() {
        let json = serde_json::to_string(&Currency::NZD).unwrap();
        assert_eq!(json, "\"NZD\"");
        let parsed: Currency = serde_json::from_str("\"CNY\"").unwrap();
        assert_eq!(parsed, Currency::CNY);
    }
}
