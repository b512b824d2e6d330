//! Validated rate table snapshots

use std::collections::HashMap;
use serde::Serialize;
use thiserror::Error;
use convertly_core::{codes, BaseRelation, Category, ConvertError, ConvertlyError, Severity};
use crate::convert_with_rates;

/// Unit id -> rate against the category's implicit base unit
pub type ConversionRates = HashMap<String, f64>;

/// Error type for building or fetching rate tables
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateError {
    #[error("{0} is not a rate-based category")]
    NotRateBased(Category),

    #[error("rate table for {category} has no entry for base unit '{base}'")]
    MissingBase { category: Category, base: String },

    #[error("rate table for {category} has base unit '{base}' at {value}, expected 1")]
    BaseNotUnity { category: Category, base: String, value: f64 },

    #[error("rate table for {category} has invalid rate {value} for '{id}'")]
    InvalidRate { category: Category, id: String, value: f64 },

    #[error("failed to load exchange rates: {0}")]
    Unavailable(String),
}

impl From<RateError> for ConvertlyError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::NotRateBased(_) => {
                ConvertlyError::new(codes::UNSUPPORTED_CATEGORY, err.to_string())
                    .with_severity(Severity::Fatal)
            }
            RateError::Unavailable(_) => {
                ConvertlyError::new(codes::RATES_UNAVAILABLE, err.to_string())
                    .with_suggestion("Retry once the rate provider is reachable")
            }
            _ => ConvertlyError::new(codes::INVALID_RATES, err.to_string())
                .with_severity(Severity::Fatal),
        }
    }
}

/// A point-in-time rate table for one rate-based category.
///
/// Construction checks the invariants the raw converter takes on trust: the
/// named base entry exists and equals 1, and every rate is finite and
/// positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    category: Category,
    relation: BaseRelation,
    base: String,
    rates: ConversionRates,
}

impl RateTable {
    pub fn new(
        category: Category,
        base: impl Into<String>,
        rates: ConversionRates,
    ) -> Result<Self, RateError> {
        let base = base.into();
        let relation = category
            .base_relation()
            .ok_or(RateError::NotRateBased(category))?;

        match rates.get(&base) {
            None => return Err(RateError::MissingBase { category, base }),
            Some(&value) if value != 1.0 => {
                return Err(RateError::BaseNotUnity { category, base, value })
            }
            Some(_) => {}
        }

        if let Some((id, &value)) = rates.iter().find(|(_, r)| !(r.is_finite() && **r > 0.0)) {
            return Err(RateError::InvalidRate {
                category,
                id: id.clone(),
                value,
            });
        }

        Ok(RateTable {
            category,
            relation,
            base,
            rates,
        })
    }

    /// Build from `(id, rate)` pairs
    pub fn from_pairs(
        category: Category,
        base: &str,
        pairs: &[(&str, f64)],
    ) -> Result<Self, RateError> {
        let rates = pairs.iter().map(|(id, r)| (id.to_string(), *r)).collect();
        Self::new(category, base, rates)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn relation(&self) -> BaseRelation {
        self.relation
    }

    /// Id of the reference unit valued at 1
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn rates(&self) -> &ConversionRates {
        &self.rates
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.rates.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Entries sorted by unit id
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.rates.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn convert(&self, value: f64, from_id: &str, to_id: &str) -> Result<f64, ConvertError> {
        convert_with_rates(value, from_id, to_id, &self.rates, self.category)
    }
}
