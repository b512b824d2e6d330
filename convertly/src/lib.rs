//! Convertly - Unit, currency and cryptocurrency conversion
//!
//! Ties the unit catalog, the rate provider and the document text helper
//! together behind one engine.

mod display;

pub use display::{convert_for_display, convert_value, swap, Display, Swapped};

pub use convertly_core::{
    codes, format_result, parse_input, BaseRelation, Category, ConvertError, ConvertlyError,
    Severity,
};
pub use convertly_docs::{DocumentAction, DocumentError, SourceType, TextService};
pub use convertly_rates::{ConversionRates, MockRateProvider, RateProvider, RateTable};
pub use convertly_units::{ConverterDefinition, Unit, UnitKind, CATALOG};

use std::sync::Arc;
use serde::Serialize;
use tracing::info;

/// A numeric conversion result with its display form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub value: f64,
    pub formatted: String,
}

/// Main Convertly engine
pub struct Convertly {
    rates: Arc<dyn RateProvider>,
    text: Option<Arc<dyn TextService>>,
}

impl Convertly {
    pub fn new(rates: Arc<dyn RateProvider>) -> Self {
        Self { rates, text: None }
    }

    /// Builder: enable document processing
    pub fn with_text_service(mut self, service: Arc<dyn TextService>) -> Self {
        self.text = Some(service);
        self
    }

    pub fn has_text_service(&self) -> bool {
        self.text.is_some()
    }

    pub fn definitions(&self) -> &'static [ConverterDefinition] {
        CATALOG.definitions()
    }

    pub fn units(&self, category: Category) -> &'static [Unit] {
        CATALOG.units(category)
    }

    /// Fresh rate snapshot for a rate-based category
    pub async fn rates(&self, category: Category) -> Result<RateTable, ConvertlyError> {
        self.rates.fetch(category).await.map_err(Into::into)
    }

    /// Convert a value. Rate-based categories fetch a new table for this
    /// request only.
    pub async fn convert(
        &self,
        value: f64,
        from_id: &str,
        to_id: &str,
        category: Category,
    ) -> Result<Conversion, ConvertlyError> {
        let table = if category.is_rate_based() {
            Some(self.rates(category).await?)
        } else {
            None
        };

        let value = convert_value(value, from_id, to_id, category, table.as_ref())?;
        Ok(Conversion {
            value,
            formatted: format_result(value),
        })
    }

    /// Summarize or reformat document text with the AI text service
    pub async fn process_document(
        &self,
        text: &str,
        action: DocumentAction,
    ) -> Result<String, ConvertlyError> {
        let service = self.text.as_ref().ok_or(DocumentError::NotConfigured)?;
        let result = convertly_docs::process_document(service.as_ref(), text, action).await?;
        info!(%action, chars = result.chars().count(), "document processed");
        Ok(result)
    }
}

impl Default for Convertly {
    fn default() -> Self {
        Self::new(Arc::new(MockRateProvider::new()))
    }
}
