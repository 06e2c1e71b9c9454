//! Currency module - Currency codes and conversion values

mod code;
mod conversion;

pub use code::{Currency, CurrencySet};
pub use conversion::{parse_amount, ConversionRequest, ConversionResult, ConvertError};
