//! Base-normalized rate conversion

use convertly_core::{Category, ConvertError};
use tracing::{debug, warn};
use crate::ConversionRates;

/// Convert `value` between two units of a rate-based category.
///
/// The value is routed through the table's implicit base unit using the
/// category's orientation. The table is trusted to hold its base at 1; use
/// `RateTable` to have that checked.
pub fn convert_with_rates(
    value: f64,
    from_id: &str,
    to_id: &str,
    rates: &ConversionRates,
    category: Category,
) -> Result<f64, ConvertError> {
    if !value.is_finite() {
        return Err(ConvertError::InvalidInput);
    }

    let relation = category.base_relation().ok_or_else(|| {
        warn!(%category, "rate conversion called for unhandled category");
        ConvertError::UnsupportedCategory(category)
    })?;

    let from_rate = usable_rate(rates, from_id, category)?;
    let to_rate = usable_rate(rates, to_id, category)?;

    debug!(%category, from = from_id, to = to_id, from_rate, to_rate, "convert with rates");

    if from_id == to_id {
        return Ok(value);
    }

    let value_in_base = relation.to_base(value, from_rate);
    Ok(relation.from_base(value_in_base, to_rate))
}

/// A rate that can be divided by: present, finite and positive
fn usable_rate(rates: &ConversionRates, id: &str, category: Category) -> Result<f64, ConvertError> {
    match rates.get(id) {
        Some(&rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        _ => {
            warn!(%category, unit = id, "missing rate for conversion");
            Err(ConvertError::MissingRate {
                category,
                id: id.to_string(),
            })
        }
    }
}
