//! Unit representation

use std::fmt;
use serde::{Serialize, Deserialize};
use convertly_core::Category;
use crate::TemperatureScale;

/// How a unit converts to the rest of its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitKind {
    /// 1 unit = `factor` base units of the category
    Linear { factor: f64 },
    /// Affine scale, converted through Celsius
    Temperature { scale: TemperatureScale },
    /// Priced by an external rate table
    Rated,
}

/// A measurement unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Stable key, unique within its category (e.g., "meter", "USD")
    pub id: String,
    /// Display name (e.g., "Meter", "US Dollar")
    pub name: String,
    /// Display symbol (e.g., "m", "$")
    pub symbol: String,
    pub category: Category,
    #[serde(flatten)]
    pub kind: UnitKind,
}

impl Unit {
    /// Create a unit with a linear factor to the category base
    pub fn linear(id: &str, name: &str, symbol: &str, category: Category, factor: f64) -> Self {
        Unit {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            category,
            kind: UnitKind::Linear { factor },
        }
    }

    /// Create a temperature unit from its scale
    pub fn temperature(scale: TemperatureScale) -> Self {
        Unit {
            id: scale.id().to_string(),
            name: scale.name().to_string(),
            symbol: scale.symbol().to_string(),
            category: Category::Temperature,
            kind: UnitKind::Temperature { scale },
        }
    }

    /// Create a unit whose value comes from a rate table
    pub fn rated(id: &str, name: &str, symbol: &str, category: Category) -> Self {
        Unit {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            category,
            kind: UnitKind::Rated,
        }
    }

    /// Linear factor, if this unit has one
    pub fn factor(&self) -> Option<f64> {
        match self.kind {
            UnitKind::Linear { factor } => Some(factor),
            _ => None,
        }
    }

    pub fn is_base(&self) -> bool {
        self.factor() == Some(1.0)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
