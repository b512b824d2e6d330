//! Convertly Core - Fundamental types
//!
//! This crate provides the core types used throughout Convertly:
//! - `Category`: Measurement categories and their conversion strategy
//! - `ConvertError`: Typed failures of the conversion engine
//! - `ConvertlyError`: Structured errors for tool consumers
//! - `parse_input` / `format_result`: Display-side number handling

mod category;
mod error;
mod format;

pub use category::{BaseRelation, Category, ConversionStrategy};
pub use error::{codes, ConvertError, ConvertlyError, Severity};
pub use format::{format_exponential, format_result, parse_input};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{BaseRelation, Category, ConvertError, ConvertlyError, Severity};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_error_into_structured() {
        let err: ConvertlyError = ConvertError::UnknownUnit {
            category: Category::Length,
            id: "cubit".to_string(),
        }
        .into();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);
        assert!(err.message.contains("cubit"));
        assert_eq!(err.severity, Severity::Error);
    }

    #[test]
    fn test_invalid_input_is_warning() {
        let err: ConvertlyError = ConvertError::InvalidInput.into();
        assert_eq!(err.code, codes::INVALID_INPUT);
        assert_eq!(err.severity, Severity::Warning);
    }

    #[test]
    fn test_rate_categories_have_relations() {
        for cat in Category::ALL {
            assert_eq!(cat.is_rate_based(), cat.base_relation().is_some());
        }
    }
}
