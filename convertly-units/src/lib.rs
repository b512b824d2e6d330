//! Convertly Units - Measurement catalog and unit conversion
//!
//! Provides the unit catalog and the linear/affine converter.
//!
//! Categories:
//! - Length (nm, m, km, ft, mi, AU, ly, etc.)
//! - Weight (mg, g, kg, lb, st, etc.)
//! - Volume (mL, L, m³, US and UK cups/pints/gallons, etc.)
//! - Temperature (°C, °F, K, °R, °Ré)
//! - Speed (m/s, km/h, mph, kn, c)
//! - Area (mm², m², ha, acre, etc.)
//! - Data Storage (bit, B, kB/KiB through PB/PiB)
//! - Currency and Cryptocurrency (catalog only, converted with rate tables)

mod catalog;
mod convert;
mod temperature;
mod unit;

pub use catalog::{ConverterDefinition, UnitCatalog, CATALOG};
pub use convert::{convert_by_factor, convert_linear_or_affine, find_unit};
pub use temperature::{convert_temperature, TemperatureScale};
pub use unit::{Unit, UnitKind};
