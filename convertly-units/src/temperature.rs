//! Temperature scales
//!
//! Temperature scales do not share a zero point, so they cannot use a linear
//! factor. Every conversion pivots through Celsius.

use std::fmt;
use serde::{Serialize, Deserialize};
use convertly_core::ConvertError;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
    Reaumur,
}

impl TemperatureScale {
    pub const ALL: [TemperatureScale; 5] = [
        TemperatureScale::Celsius,
        TemperatureScale::Fahrenheit,
        TemperatureScale::Kelvin,
        TemperatureScale::Rankine,
        TemperatureScale::Reaumur,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "celsius",
            TemperatureScale::Fahrenheit => "fahrenheit",
            TemperatureScale::Kelvin => "kelvin",
            TemperatureScale::Rankine => "rankine",
            TemperatureScale::Reaumur => "reaumur",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "Celsius",
            TemperatureScale::Fahrenheit => "Fahrenheit",
            TemperatureScale::Kelvin => "Kelvin",
            TemperatureScale::Rankine => "Rankine",
            TemperatureScale::Reaumur => "Réaumur",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "°C",
            TemperatureScale::Fahrenheit => "°F",
            TemperatureScale::Kelvin => "K",
            TemperatureScale::Rankine => "°R",
            TemperatureScale::Reaumur => "°Ré",
        }
    }

    /// Look up a scale by unit id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.id() == id)
    }

    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - 273.15,
            TemperatureScale::Rankine => (value - 491.67) * 5.0 / 9.0,
            TemperatureScale::Reaumur => value * 5.0 / 4.0,
        }
    }

    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureScale::Kelvin => celsius + 273.15,
            TemperatureScale::Rankine => celsius * 9.0 / 5.0 + 491.67,
            TemperatureScale::Reaumur => celsius * 4.0 / 5.0,
        }
    }

    /// Convert a reading on this scale to another scale
    pub fn convert(&self, value: f64, target: TemperatureScale) -> f64 {
        if *self == target {
            return value;
        }
        target.from_celsius(self.to_celsius(value))
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Convert between temperature unit ids.
///
/// Same id returns the value untouched, even for ids that are not known
/// scales.
pub fn convert_temperature(value: f64, from_id: &str, to_id: &str) -> Result<f64, ConvertError> {
    if from_id == to_id {
        return Ok(value);
    }

    let from = TemperatureScale::from_id(from_id).ok_or_else(|| {
        warn!(unit = from_id, "unknown temperature unit");
        ConvertError::UnknownTemperatureUnit(from_id.to_string())
    })?;
    let to = TemperatureScale::from_id(to_id).ok_or_else(|| {
        warn!(unit = to_id, "unknown temperature unit");
        ConvertError::UnknownTemperatureUnit(to_id.to_string())
    })?;

    Ok(from.convert(value, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(convert_temperature(0.0, "celsius", "fahrenheit").unwrap(), 32.0);
        assert_eq!(convert_temperature(100.0, "celsius", "fahrenheit").unwrap(), 212.0);
    }

    #[test]
    fn test_celsius_to_kelvin() {
        assert_eq!(convert_temperature(0.0, "celsius", "kelvin").unwrap(), 273.15);
    }

    #[test]
    fn test_fahrenheit_to_celsius() {
        let c = convert_temperature(212.0, "fahrenheit", "celsius").unwrap();
        assert!(close(c, 100.0));
    }

    #[test]
    fn test_rankine_and_reaumur() {
        let r = convert_temperature(0.0, "celsius", "rankine").unwrap();
        assert!(close(r, 491.67));

        let re = convert_temperature(100.0, "celsius", "reaumur").unwrap();
        assert!(close(re, 80.0));

        // Absolute zero agrees between Kelvin and Rankine
        let k = convert_temperature(0.0, "rankine", "kelvin").unwrap();
        assert!(k.abs() < 1e-9);
    }

    #[test]
    fn test_same_unit_is_untouched() {
        let v = 36.6;
        for scale in TemperatureScale::ALL {
            assert_eq!(convert_temperature(v, scale.id(), scale.id()).unwrap(), v);
        }
    }

    #[test]
    fn test_round_trip_all_pairs() {
        for from in TemperatureScale::ALL {
            for to in TemperatureScale::ALL {
                for &v in &[-40.0, 0.0, 37.5, 1234.5] {
                    let there = from.convert(v, to);
                    let back = to.convert(there, from);
                    assert!(close(back, v), "{} -> {} -> {}: {} != {}", from, to, from, back, v);
                }
            }
        }
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(
            convert_temperature(0.0, "celsius", "bogus"),
            Err(ConvertError::UnknownTemperatureUnit("bogus".to_string()))
        );
        assert!(convert_temperature(0.0, "bogus", "celsius").is_err());
    }
}
