//! Measurement categories and how each one converts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a rate table relates its entries to the implicit base unit.
///
/// The two orientations are inverse of each other, so a table must never be
/// interpreted without knowing which one it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseRelation {
    /// `rates[X]` is how many X one base unit buys (EUR: 0.92 per USD)
    UnitsPerBase,
    /// `rates[X]` is how many base units one X is worth (BTC: 68000 USD)
    BasePerUnit,
}

impl BaseRelation {
    /// Express `value` units of a rated unit in base units
    pub fn to_base(self, value: f64, rate: f64) -> f64 {
        match self {
            BaseRelation::UnitsPerBase => value / rate,
            BaseRelation::BasePerUnit => value * rate,
        }
    }

    /// Express `value` base units in units of a rated unit
    pub fn from_base(self, value: f64, rate: f64) -> f64 {
        match self {
            BaseRelation::UnitsPerBase => value * rate,
            BaseRelation::BasePerUnit => value / rate,
        }
    }
}

/// Which converter handles a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStrategy {
    /// `value * from.factor / to.factor`
    Linear,
    /// Affine scales pivoting through Celsius
    Temperature,
    /// External rate table with the given orientation
    Rates(BaseRelation),
    /// Text handed to the AI text service; no numeric conversion
    Document,
}

/// A measurement category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Length,
    Weight,
    Volume,
    Temperature,
    Speed,
    Area,
    DataStorage,
    Currency,
    Crypto,
    #[serde(rename = "document_processing")]
    Document,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Length,
        Category::Weight,
        Category::Volume,
        Category::Temperature,
        Category::Speed,
        Category::Area,
        Category::DataStorage,
        Category::Currency,
        Category::Crypto,
        Category::Document,
    ];

    /// Stable machine id
    pub fn id(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Volume => "volume",
            Category::Temperature => "temperature",
            Category::Speed => "speed",
            Category::Area => "area",
            Category::DataStorage => "data_storage",
            Category::Currency => "currency",
            Category::Crypto => "crypto",
            Category::Document => "document_processing",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Volume => "Volume",
            Category::Temperature => "Temperature",
            Category::Speed => "Speed",
            Category::Area => "Area",
            Category::DataStorage => "Data Storage",
            Category::Currency => "Currency",
            Category::Crypto => "Cryptocurrency",
            Category::Document => "Document Processing",
        }
    }

    pub fn strategy(&self) -> ConversionStrategy {
        match self {
            Category::Temperature => ConversionStrategy::Temperature,
            Category::Currency => ConversionStrategy::Rates(BaseRelation::UnitsPerBase),
            Category::Crypto => ConversionStrategy::Rates(BaseRelation::BasePerUnit),
            Category::Document => ConversionStrategy::Document,
            _ => ConversionStrategy::Linear,
        }
    }

    /// Rate orientation, for rate-based categories only
    pub fn base_relation(&self) -> Option<BaseRelation> {
        match self.strategy() {
            ConversionStrategy::Rates(relation) => Some(relation),
            _ => None,
        }
    }

    pub fn is_rate_based(&self) -> bool {
        self.base_relation().is_some()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the machine id or the display name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.id() == needle || c.name().to_lowercase() == needle)
            .or(match needle.as_str() {
                "cryptocurrency" => Some(Category::Crypto),
                "mass" => Some(Category::Weight),
                "document" => Some(Category::Document),
                _ => None,
            })
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(Category::Length.strategy(), ConversionStrategy::Linear);
        assert_eq!(Category::DataStorage.strategy(), ConversionStrategy::Linear);
        assert_eq!(Category::Temperature.strategy(), ConversionStrategy::Temperature);
        assert_eq!(
            Category::Currency.strategy(),
            ConversionStrategy::Rates(BaseRelation::UnitsPerBase)
        );
        assert_eq!(
            Category::Crypto.strategy(),
            ConversionStrategy::Rates(BaseRelation::BasePerUnit)
        );
    }

    #[test]
    fn test_relations_are_inverse() {
        let v = 10.0;
        let rate = 0.92;
        let a = BaseRelation::UnitsPerBase.to_base(v, rate);
        let b = BaseRelation::BasePerUnit.from_base(v, rate);
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("length".parse::<Category>().unwrap(), Category::Length);
        assert_eq!("Data Storage".parse::<Category>().unwrap(), Category::DataStorage);
        assert_eq!("Cryptocurrency".parse::<Category>().unwrap(), Category::Crypto);
        assert_eq!("crypto".parse::<Category>().unwrap(), Category::Crypto);
        assert!("bogus".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_ids() {
        let json = serde_json::to_string(&Category::DataStorage).unwrap();
        assert_eq!(json, "\"data_storage\"");
        let back: Category = serde_json::from_str("\"document_processing\"").unwrap();
        assert_eq!(back, Category::Document);
        for cat in Category::ALL {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat.id()));
        }
    }
}
