//! Convertly Rates - Rate tables for currency and cryptocurrency
//!
//! A rate table maps unit ids to a number relative to an implicit base unit.
//! Currency tables say how many units one base buys; crypto tables say how
//! many base units one coin is worth. The orientation is a property of the
//! category (`Category::base_relation`), never guessed from the numbers.

mod convert;
mod provider;
mod table;

pub use convert::convert_with_rates;
pub use provider::{MockRateProvider, RateProvider, MOCK_CRYPTO_RATES, MOCK_CURRENCY_RATES};
pub use table::{ConversionRates, RateError, RateTable};
