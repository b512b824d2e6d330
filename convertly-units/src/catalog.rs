//! Unit catalog - ordered unit lists per category and converter definitions

use std::collections::HashMap;
use std::sync::LazyLock;
use serde::Serialize;
use convertly_core::Category;
use crate::{TemperatureScale, Unit};

/// Global unit catalog
pub static CATALOG: LazyLock<UnitCatalog> = LazyLock::new(UnitCatalog::new);

/// A converter offered to the user: its category, title and defaults
#[derive(Debug, Clone, Serialize)]
pub struct ConverterDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub default_from: &'static str,
    pub default_to: &'static str,
    pub rate_based: bool,
    pub file_based: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_file_types: Option<&'static str>,
}

/// Ordered units for every category plus the converter definitions
pub struct UnitCatalog {
    units: HashMap<Category, Vec<Unit>>,
    definitions: Vec<ConverterDefinition>,
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitCatalog {
    pub fn new() -> Self {
        let mut catalog = UnitCatalog {
            units: HashMap::new(),
            definitions: Vec::new(),
        };
        catalog.register_all_units();
        catalog.register_definitions();
        catalog
    }

    /// Units of a category in display order. Empty for categories
    /// without units.
    pub fn units(&self, category: Category) -> &[Unit] {
        self.units.get(&category).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get a unit by category and id
    pub fn get(&self, category: Category, id: &str) -> Option<&Unit> {
        self.units(category).iter().find(|u| u.id == id)
    }

    /// Converter definitions in display order
    pub fn definitions(&self) -> &[ConverterDefinition] {
        &self.definitions
    }

    pub fn definition(&self, category: Category) -> Option<&ConverterDefinition> {
        self.definitions.iter().find(|d| d.category == category)
    }

    fn register(&mut self, unit: Unit) {
        self.units.entry(unit.category).or_default().push(unit);
    }

    fn linear(&mut self, category: Category, id: &str, name: &str, symbol: &str, factor: f64) {
        self.register(Unit::linear(id, name, symbol, category, factor));
    }

    fn rated(&mut self, category: Category, id: &str, name: &str, symbol: &str) {
        self.register(Unit::rated(id, name, symbol, category));
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_weight_units();
        self.register_volume_units();
        self.register_temperature_units();
        self.register_speed_units();
        self.register_area_units();
        self.register_data_storage_units();
        self.register_currency_units();
        self.register_crypto_units();
    }

    fn register_length_units(&mut self) {
        let c = Category::Length;
        // Metric, base: meter
        self.linear(c, "nanometer", "Nanometer", "nm", 1e-9);
        self.linear(c, "micrometer", "Micrometer", "µm", 1e-6);
        self.linear(c, "millimeter", "Millimeter", "mm", 0.001);
        self.linear(c, "centimeter", "Centimeter", "cm", 0.01);
        self.linear(c, "decimeter", "Decimeter", "dm", 0.1);
        self.linear(c, "meter", "Meter", "m", 1.0);
        self.linear(c, "decameter", "Decameter", "dam", 10.0);
        self.linear(c, "hectometer", "Hectometer", "hm", 100.0);
        self.linear(c, "kilometer", "Kilometer", "km", 1000.0);

        // Imperial/US
        self.linear(c, "inch", "Inch", "in", 0.0254);
        self.linear(c, "foot", "Foot", "ft", 0.3048);
        self.linear(c, "yard", "Yard", "yd", 0.9144);
        self.linear(c, "mile", "Mile", "mi", 1609.34);
        self.linear(c, "nautical_mile", "Nautical Mile", "NM", 1852.0);
        self.linear(c, "furlong", "Furlong", "fur", 201.168);

        // Astronomical
        self.linear(c, "astronomical_unit", "Astronomical Unit", "AU", 1.496e11);
        self.linear(c, "light_year", "Light Year", "ly", 9.461e15);
        self.linear(c, "parsec", "Parsec", "pc", 3.086e16);
    }

    fn register_weight_units(&mut self) {
        let c = Category::Weight;
        // Base: kilogram
        self.linear(c, "microgram", "Microgram", "µg", 1e-9);
        self.linear(c, "milligram", "Milligram", "mg", 1e-6);
        self.linear(c, "gram", "Gram", "g", 0.001);
        self.linear(c, "kilogram", "Kilogram", "kg", 1.0);
        self.linear(c, "metric_ton", "Metric Ton (Tonne)", "t", 1000.0);
        self.linear(c, "ounce", "Ounce", "oz", 0.0283495);
        self.linear(c, "pound", "Pound", "lb", 0.453592);
        self.linear(c, "stone", "Stone", "st", 6.35029);
        self.linear(c, "short_ton_us", "Short Ton (US)", "ton (US)", 907.185);
        self.linear(c, "long_ton_uk", "Long Ton (UK)", "ton (UK)", 1016.05);
        self.linear(c, "grain", "Grain", "gr", 0.00006479891);
    }

    fn register_volume_units(&mut self) {
        let c = Category::Volume;
        // Base: liter
        self.linear(c, "milliliter", "Milliliter", "mL", 0.001);
        self.linear(c, "centiliter", "Centiliter", "cL", 0.01);
        self.linear(c, "deciliter", "Deciliter", "dL", 0.1);
        self.linear(c, "liter", "Liter", "L", 1.0);
        self.linear(c, "cubic_centimeter", "Cubic Centimeter", "cm³", 0.001);
        self.linear(c, "cubic_meter", "Cubic Meter", "m³", 1000.0);

        // US customary
        self.linear(c, "us_teaspoon", "Teaspoon (US)", "tsp (US)", 0.00492892);
        self.linear(c, "us_tablespoon", "Tablespoon (US)", "tbsp (US)", 0.0147868);
        self.linear(c, "us_fluid_ounce", "Fluid Ounce (US)", "fl oz (US)", 0.0295735);
        self.linear(c, "us_cup", "Cup (US)", "cup (US)", 0.236588);
        self.linear(c, "us_pint", "Pint (US)", "pt (US)", 0.473176);
        self.linear(c, "us_quart", "Quart (US)", "qt (US)", 0.946353);
        self.linear(c, "us_gallon", "Gallon (US)", "gal (US)", 3.78541);

        // Imperial
        self.linear(c, "uk_fluid_ounce", "Fluid Ounce (UK)", "fl oz (UK)", 0.0284131);
        self.linear(c, "uk_pint", "Pint (UK)", "pt (UK)", 0.568261);
        self.linear(c, "uk_quart", "Quart (UK)", "qt (UK)", 1.13652);
        self.linear(c, "uk_gallon", "Gallon (UK)", "gal (UK)", 4.54609);

        self.linear(c, "cubic_inch", "Cubic Inch", "in³", 0.0163871);
        self.linear(c, "cubic_foot", "Cubic Foot", "ft³", 28.3168);
    }

    fn register_temperature_units(&mut self) {
        for scale in TemperatureScale::ALL {
            self.register(Unit::temperature(scale));
        }
    }

    fn register_speed_units(&mut self) {
        let c = Category::Speed;
        // Base: meter per second
        self.linear(c, "mps", "Meter/second", "m/s", 1.0);
        self.linear(c, "kph", "Kilometer/hour", "km/h", 1.0 / 3.6);
        self.linear(c, "mph", "Mile/hour", "mph", 0.44704);
        self.linear(c, "knot", "Knot", "kn", 0.514444);
        self.linear(c, "fps", "Foot/second", "ft/s", 0.3048);
        self.linear(c, "speed_of_light", "Speed of Light (vacuum)", "c", 299792458.0);
    }

    fn register_area_units(&mut self) {
        let c = Category::Area;
        // Base: square meter
        self.linear(c, "sqmm", "Square Millimeter", "mm²", 0.000001);
        self.linear(c, "sqcm", "Square Centimeter", "cm²", 0.0001);
        self.linear(c, "sqmeter", "Square Meter", "m²", 1.0);
        self.linear(c, "hectare", "Hectare", "ha", 10000.0);
        self.linear(c, "sqkm", "Square Kilometer", "km²", 1000000.0);
        self.linear(c, "sqinch", "Square Inch", "in²", 0.00064516);
        self.linear(c, "sqfoot", "Square Foot", "ft²", 0.092903);
        self.linear(c, "sqyard", "Square Yard", "yd²", 0.836127);
        self.linear(c, "acre", "Acre", "acre", 4046.86);
        self.linear(c, "sqmile", "Square Mile", "mi²", 2589988.11);
    }

    fn register_data_storage_units(&mut self) {
        let c = Category::DataStorage;
        // Base: byte. Decimal (10^3n) and binary (2^10n) prefixes
        self.linear(c, "bit", "Bit", "bit", 0.125);
        self.linear(c, "byte", "Byte", "B", 1.0);
        self.linear(c, "kilobyte", "Kilobyte (10³ B)", "kB", 1e3);
        self.linear(c, "kibibyte", "Kibibyte (2¹⁰ B)", "KiB", 1024.0);
        self.linear(c, "megabyte", "Megabyte (10⁶ B)", "MB", 1e6);
        self.linear(c, "mebibyte", "Mebibyte (2²⁰ B)", "MiB", 1024f64.powi(2));
        self.linear(c, "gigabyte", "Gigabyte (10⁹ B)", "GB", 1e9);
        self.linear(c, "gibibyte", "Gibibyte (2³⁰ B)", "GiB", 1024f64.powi(3));
        self.linear(c, "terabyte", "Terabyte (10¹² B)", "TB", 1e12);
        self.linear(c, "tebibyte", "Tebibyte (2⁴⁰ B)", "TiB", 1024f64.powi(4));
        self.linear(c, "petabyte", "Petabyte (10¹⁵ B)", "PB", 1e15);
        self.linear(c, "pebibyte", "Pebibyte (2⁵⁰ B)", "PiB", 1024f64.powi(5));
    }

    fn register_currency_units(&mut self) {
        let c = Category::Currency;
        self.rated(c, "USD", "US Dollar", "$");
        self.rated(c, "EUR", "Euro", "€");
        self.rated(c, "JPY", "Japanese Yen", "¥");
        self.rated(c, "GBP", "British Pound", "£");
        self.rated(c, "AUD", "Australian Dollar", "A$");
        self.rated(c, "CAD", "Canadian Dollar", "C$");
        self.rated(c, "CHF", "Swiss Franc", "CHF");
        self.rated(c, "CNY", "Chinese Yuan Renminbi", "¥");
        self.rated(c, "HKD", "Hong Kong Dollar", "HK$");
        self.rated(c, "NZD", "New Zealand Dollar", "NZ$");
        self.rated(c, "SEK", "Swedish Krona", "kr");
        self.rated(c, "KRW", "South Korean Won", "₩");
        self.rated(c, "SGD", "Singapore Dollar", "S$");
        self.rated(c, "NOK", "Norwegian Krone", "kr");
        self.rated(c, "MXN", "Mexican Peso", "Mex$");
        self.rated(c, "INR", "Indian Rupee", "₹");
        self.rated(c, "RUB", "Russian Ruble", "₽");
        self.rated(c, "ZAR", "South African Rand", "R");
        self.rated(c, "BRL", "Brazilian Real", "R$");
        self.rated(c, "TRY", "Turkish Lira", "₺");
    }

    fn register_crypto_units(&mut self) {
        let c = Category::Crypto;
        self.rated(c, "BTC", "Bitcoin", "BTC");
        self.rated(c, "ETH", "Ethereum", "ETH");
        self.rated(c, "USDT", "Tether", "USDT");
        self.rated(c, "BNB", "Binance Coin", "BNB");
        self.rated(c, "SOL", "Solana", "SOL");
        self.rated(c, "XRP", "XRP (Ripple)", "XRP");
        self.rated(c, "ADA", "Cardano", "ADA");
        self.rated(c, "DOGE", "Dogecoin", "DOGE");
        self.rated(c, "SHIB", "Shiba Inu", "SHIB");
        self.rated(c, "AVAX", "Avalanche", "AVAX");
        self.rated(c, "DOT", "Polkadot", "DOT");
        self.rated(c, "LTC", "Litecoin", "LTC");
        self.rated(c, "LINK", "Chainlink", "LINK");
        // Distinct from the currency catalog's USD; the crypto reference unit
        self.rated(c, "USD", "US Dollar (for Crypto Conversion)", "$");
    }

    fn register_definitions(&mut self) {
        let def = |id: &'static str,
                   title: &'static str,
                   category: Category,
                   default_from: &'static str,
                   default_to: &'static str| ConverterDefinition {
            id,
            title,
            category,
            default_from,
            default_to,
            rate_based: false,
            file_based: false,
            accept_file_types: None,
        };

        self.definitions = vec![
            ConverterDefinition {
                rate_based: true,
                ..def("currency", "Currency Converter", Category::Currency, "USD", "EUR")
            },
            def("length", "Length & Distance Converter", Category::Length, "meter", "foot"),
            def("weight", "Weight & Mass Converter", Category::Weight, "kilogram", "pound"),
            def("temperature", "Temperature Converter", Category::Temperature, "celsius", "fahrenheit"),
            ConverterDefinition {
                file_based: true,
                accept_file_types: Some(".txt,.md"),
                ..def(
                    "document_processing",
                    "Document Text Processor",
                    Category::Document,
                    "txt",
                    "summarize",
                )
            },
            def("volume", "Volume & Capacity Converter", Category::Volume, "liter", "us_gallon"),
            def("data_storage", "Data Storage Converter", Category::DataStorage, "megabyte", "mebibyte"),
            def("area", "Area Converter", Category::Area, "sqmeter", "acre"),
            def("speed", "Speed Converter", Category::Speed, "kph", "mph"),
            ConverterDefinition {
                rate_based: true,
                ..def("crypto", "Cryptocurrency Converter", Category::Crypto, "BTC", "USD")
            },
        ];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::UnitKind;

    #[test]
    fn test_unit_counts() {
        assert_eq!(CATALOG.units(Category::Length).len(), 18);
        assert_eq!(CATALOG.units(Category::Weight).len(), 11);
        assert_eq!(CATALOG.units(Category::Volume).len(), 19);
        assert_eq!(CATALOG.units(Category::Temperature).len(), 5);
        assert_eq!(CATALOG.units(Category::Speed).len(), 6);
        assert_eq!(CATALOG.units(Category::Area).len(), 10);
        assert_eq!(CATALOG.units(Category::DataStorage).len(), 12);
        assert_eq!(CATALOG.units(Category::Currency).len(), 20);
        assert_eq!(CATALOG.units(Category::Crypto).len(), 14);
        assert!(CATALOG.units(Category::Document).is_empty());
    }

    #[test]
    fn test_ids_unique_per_category() {
        for cat in Category::ALL {
            let units = CATALOG.units(cat);
            let ids: HashSet<&str> = units.iter().map(|u| u.id.as_str()).collect();
            assert_eq!(ids.len(), units.len(), "duplicate id in {}", cat);
        }
    }

    #[test]
    fn test_kinds_match_strategy() {
        for cat in Category::ALL {
            for unit in CATALOG.units(cat) {
                assert_eq!(unit.category, cat);
                match unit.kind {
                    UnitKind::Linear { factor } => {
                        assert!(factor > 0.0 && factor.is_finite(), "{} factor", unit.id);
                        assert!(!cat.is_rate_based() && cat != Category::Temperature);
                    }
                    UnitKind::Temperature { .. } => assert_eq!(cat, Category::Temperature),
                    UnitKind::Rated => assert!(cat.is_rate_based()),
                }
            }
        }
    }

    #[test]
    fn test_one_base_unit_per_linear_category() {
        for cat in [
            Category::Length,
            Category::Weight,
            Category::Volume,
            Category::Speed,
            Category::Area,
            Category::DataStorage,
        ] {
            let bases = CATALOG.units(cat).iter().filter(|u| u.is_base()).count();
            assert_eq!(bases, 1, "{}", cat);
        }
    }

    #[test]
    fn test_usd_in_both_rate_catalogs() {
        let fiat = CATALOG.get(Category::Currency, "USD").unwrap();
        let crypto = CATALOG.get(Category::Crypto, "USD").unwrap();
        assert_ne!(fiat.name, crypto.name);
    }

    #[test]
    fn test_definitions_defaults_resolve() {
        assert_eq!(CATALOG.definitions().len(), 10);
        for def in CATALOG.definitions() {
            assert_eq!(def.rate_based, def.category.is_rate_based());
            if def.file_based {
                continue;
            }
            assert!(CATALOG.get(def.category, def.default_from).is_some(), "{}", def.id);
            assert!(CATALOG.get(def.category, def.default_to).is_some(), "{}", def.id);
        }
        assert_eq!(CATALOG.definitions()[0].category, Category::Currency);
    }
}
