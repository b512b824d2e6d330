//! Conversion failures and structured errors
//!
//! The engine never panics for an expected condition. Converters return
//! `ConvertError`; anything facing a tool consumer is turned into a
//! `ConvertlyError` that carries a machine-readable code.

use crate::Category;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const MISSING_FACTOR: &str = "MISSING_FACTOR";
    pub const MISSING_RATE: &str = "MISSING_RATE";
    pub const UNSUPPORTED_CATEGORY: &str = "UNSUPPORTED_CATEGORY";
    pub const INVALID_RATES: &str = "INVALID_RATES";
    pub const RATES_UNAVAILABLE: &str = "RATES_UNAVAILABLE";
    pub const NOT_APPLICABLE: &str = "NOT_APPLICABLE";
    pub const DOCUMENT_ERROR: &str = "DOCUMENT_ERROR";
    pub const NOT_CONFIGURED: &str = "NOT_CONFIGURED";
    pub const SERVICE_ERROR: &str = "SERVICE_ERROR";
    pub const ARG_MISSING: &str = "ARG_MISSING";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Why a conversion produced no number
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Empty, non-numeric or non-finite input. Nothing to show.
    #[error("input is not a finite number")]
    InvalidInput,

    #[error("unit '{id}' not found in {category}")]
    UnknownUnit { category: Category, id: String },

    #[error("unit '{id}' in {category} has no conversion factor")]
    MissingFactor { category: Category, id: String },

    #[error("unknown temperature unit: {0}")]
    UnknownTemperatureUnit(String),

    #[error("missing rate for '{id}' in {category}")]
    MissingRate { category: Category, id: String },

    /// Rate conversion asked for a category without a rate table
    #[error("unsupported category for rate conversion: {0}")]
    UnsupportedCategory(Category),
}

impl ConvertError {
    /// True when the caller should render nothing rather than a message
    pub fn is_silent(&self) -> bool {
        matches!(self, ConvertError::InvalidInput)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::InvalidInput => codes::INVALID_INPUT,
            ConvertError::UnknownUnit { .. } | ConvertError::UnknownTemperatureUnit(_) => {
                codes::UNKNOWN_UNIT
            }
            ConvertError::MissingFactor { .. } => codes::MISSING_FACTOR,
            ConvertError::MissingRate { .. } => codes::MISSING_RATE,
            ConvertError::UnsupportedCategory(_) => codes::UNSUPPORTED_CATEGORY,
        }
    }
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to show, no message needed
    Warning,
    /// The request failed; show the message
    Error,
    /// A defect in the caller or collaborator data
    Fatal,
}

/// Structured error for tool consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertlyError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl ConvertlyError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_category(name: &str) -> Self {
        Self::new(codes::UNKNOWN_CATEGORY, format!("Unknown category: {}", name))
            .with_suggestion("Use list_categories to see available categories")
    }

    pub fn arg_missing(tool: &str, arg: &str) -> Self {
        Self::new(codes::ARG_MISSING, format!("{}: missing argument '{}'", tool, arg))
            .with_suggestion("Use tools/list for the input schema")
    }

    pub fn arg_type(tool: &str, arg: &str, expected: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}: argument '{}' must be {}", tool, arg, expected),
        )
    }

    pub fn not_applicable(details: impl Into<String>) -> Self {
        Self::new(codes::NOT_APPLICABLE, details)
    }

    pub fn rates_unavailable(category: Category) -> Self {
        Self::new(
            codes::RATES_UNAVAILABLE,
            format!("Exchange rates not loaded for {}", category),
        )
        .with_suggestion("Fetch rates for the category before converting")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for ConvertlyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConvertlyError {}

impl From<ConvertError> for ConvertlyError {
    fn from(err: ConvertError) -> Self {
        let base = Self::new(err.code(), err.to_string());
        match err {
            ConvertError::InvalidInput => base.with_severity(Severity::Warning),
            ConvertError::UnknownUnit { .. } | ConvertError::UnknownTemperatureUnit(_) => {
                base.with_suggestion("Use list_units to see unit ids for the category")
            }
            ConvertError::MissingRate { .. } => {
                base.with_suggestion("Check that the rate table covers both units")
            }
            ConvertError::UnsupportedCategory(_) => base.with_severity(Severity::Fatal),
            ConvertError::MissingFactor { .. } => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_input_is_silent() {
        assert!(ConvertError::InvalidInput.is_silent());
        assert!(!ConvertError::UnknownTemperatureUnit("bogus".into()).is_silent());
        assert!(!ConvertError::UnsupportedCategory(Category::Length).is_silent());
    }

    #[test]
    fn test_display() {
        let err = ConvertError::MissingRate {
            category: Category::Currency,
            id: "XYZ".to_string(),
        };
        assert_eq!(err.to_string(), "missing rate for 'XYZ' in Currency");

        let structured = ConvertlyError::from(err);
        let shown = structured.to_string();
        assert!(shown.starts_with("[MISSING_RATE]"));
        assert!(shown.contains("suggestion"));
    }

    #[test]
    fn test_unsupported_category_is_fatal() {
        let err = ConvertlyError::from(ConvertError::UnsupportedCategory(Category::Area));
        assert_eq!(err.severity, Severity::Fatal);
        assert_eq!(err.code, codes::UNSUPPORTED_CATEGORY);
    }

    #[test]
    fn test_serialize_skips_empty_suggestion() {
        let err = ConvertlyError::new(codes::INTERNAL, "boom");
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("suggestion").is_none());
        assert_eq!(json["severity"], "error");
    }
}
