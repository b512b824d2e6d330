//! Linear/affine unit conversion

use convertly_core::{Category, ConvertError};
use tracing::{debug, warn};
use crate::{convert_temperature, Unit};

/// Find a unit by id in a category's unit list
pub fn find_unit<'a>(units: &'a [Unit], id: &str) -> Option<&'a Unit> {
    units.iter().find(|u| u.id == id)
}

/// Normalize to base units with the source factor, then denormalize with
/// the target factor.
pub fn convert_by_factor(value: f64, from_factor: f64, to_factor: f64) -> f64 {
    let value_in_base = value * from_factor;
    value_in_base / to_factor
}

/// Convert `value` between two units of `category`.
///
/// Temperature goes through the affine scales and ignores `units`. Every
/// other category needs both ids present in `units` with a linear factor.
pub fn convert_linear_or_affine(
    value: f64,
    from_id: &str,
    to_id: &str,
    category: Category,
    units: &[Unit],
) -> Result<f64, ConvertError> {
    if !value.is_finite() {
        return Err(ConvertError::InvalidInput);
    }

    debug!(%category, from = from_id, to = to_id, value, "convert");

    if category == Category::Temperature {
        return convert_temperature(value, from_id, to_id);
    }

    let from = resolve(units, from_id, category)?;
    let to = resolve(units, to_id, category)?;

    let from_factor = factor_of(from, category)?;
    let to_factor = factor_of(to, category)?;

    if from.id == to.id {
        return Ok(value);
    }

    Ok(convert_by_factor(value, from_factor, to_factor))
}

fn resolve<'a>(units: &'a [Unit], id: &str, category: Category) -> Result<&'a Unit, ConvertError> {
    find_unit(units, id).ok_or_else(|| {
        warn!(%category, unit = id, "unit definition not found");
        ConvertError::UnknownUnit {
            category,
            id: id.to_string(),
        }
    })
}

fn factor_of(unit: &Unit, category: Category) -> Result<f64, ConvertError> {
    unit.factor().ok_or_else(|| {
        warn!(%category, unit = %unit.id, "factor not defined");
        ConvertError::MissingFactor {
            category,
            id: unit.id.clone(),
        }
    })
}
