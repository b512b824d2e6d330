//! Category dispatch and display flow
//!
//! Picks the converter a category needs, turns typed input into a rendered
//! result, and swaps the two sides of a converter.

use serde::Serialize;
use convertly_core::{
    format_result, parse_input, Category, ConversionStrategy, ConvertlyError, Severity,
};
use convertly_rates::RateTable;
use convertly_units::{convert_linear_or_affine, ConverterDefinition, CATALOG};

/// What a converter should show for its output field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Display {
    /// Nothing to show and nothing to complain about
    Empty,
    Value(String),
    Error(String),
}

/// Convert with whichever engine `category` uses.
///
/// Rate-based categories need the table for that category; anything else
/// ignores `rates`.
pub fn convert_value(
    value: f64,
    from_id: &str,
    to_id: &str,
    category: Category,
    rates: Option<&RateTable>,
) -> Result<f64, ConvertlyError> {
    match category.strategy() {
        ConversionStrategy::Linear | ConversionStrategy::Temperature => {
            convert_linear_or_affine(value, from_id, to_id, category, CATALOG.units(category))
                .map_err(Into::into)
        }
        ConversionStrategy::Rates(_) => {
            let table = rates.ok_or_else(|| ConvertlyError::rates_unavailable(category))?;
            if table.category() != category {
                return Err(ConvertlyError::internal(format!(
                    "{} rates passed for a {} conversion",
                    table.category(),
                    category
                )));
            }
            table.convert(value, from_id, to_id).map_err(Into::into)
        }
        ConversionStrategy::Document => Err(ConvertlyError::not_applicable(
            "Document Processing has no numeric conversion; use process_document",
        )),
    }
}

/// Full input-to-output flow of a numeric converter
pub fn convert_for_display(
    input: &str,
    from_id: &str,
    to_id: &str,
    category: Category,
    rates: Option<&RateTable>,
) -> Display {
    let value = match parse_input(input) {
        Some(v) => v,
        None => return Display::Empty,
    };

    match convert_value(value, from_id, to_id, category, rates) {
        Ok(result) => Display::Value(format_result(result)),
        Err(e) if e.severity == Severity::Warning => Display::Empty,
        Err(e) => Display::Error(e.message),
    }
}

/// A converter with its sides exchanged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swapped {
    pub from: String,
    pub to: String,
    /// The previous output, now the input
    pub input: String,
}

/// Exchange source and target units; the shown output becomes the input
pub fn swap(
    definition: &ConverterDefinition,
    from_id: &str,
    to_id: &str,
    output: &str,
) -> Result<Swapped, ConvertlyError> {
    if definition.file_based {
        return Err(ConvertlyError::not_applicable(
            "Swap is not applicable for document processing actions.",
        ));
    }
    Ok(Swapped {
        from: to_id.to_string(),
        to: from_id.to_string(),
        input: output.to_string(),
    })
}
