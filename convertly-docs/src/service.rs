//! Text service seam and the document pipeline

use async_trait::async_trait;
use thiserror::Error;
use convertly_core::{codes, ConvertlyError, Severity};
use tracing::{debug, warn};
use crate::DocumentAction;

/// Error type for document processing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    #[error("AI text service not configured: set GEMINI_API_KEY to enable document processing")]
    NotConfigured,

    #[error("no text content to process")]
    EmptyText,

    #[error("unsupported file type: {0}; only .txt and .md are supported")]
    UnsupportedFileType(String),

    #[error("unknown document action: {0}")]
    UnknownAction(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid response from AI text service: {0}")]
    InvalidResponse(String),
}

impl From<DocumentError> for ConvertlyError {
    fn from(err: DocumentError) -> Self {
        let message = err.to_string();
        match err {
            DocumentError::NotConfigured => ConvertlyError::new(codes::NOT_CONFIGURED, message)
                .with_suggestion("Set GEMINI_API_KEY (or API_KEY) and restart the server"),
            DocumentError::EmptyText => ConvertlyError::new(codes::DOCUMENT_ERROR, message)
                .with_severity(Severity::Warning),
            DocumentError::UnsupportedFileType(_) | DocumentError::UnknownAction(_) => {
                ConvertlyError::new(codes::DOCUMENT_ERROR, message)
            }
            DocumentError::Network(_) | DocumentError::Http { .. } | DocumentError::InvalidResponse(_) => {
                ConvertlyError::new(codes::SERVICE_ERROR, message)
            }
        }
    }
}

/// External AI text service: prompt in, text out
#[async_trait]
pub trait TextService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DocumentError>;
}

/// Run `action` over `text` with the given service
pub async fn process_document(
    service: &dyn TextService,
    text: &str,
    action: DocumentAction,
) -> Result<String, DocumentError> {
    if text.trim().is_empty() {
        return Err(DocumentError::EmptyText);
    }

    debug!(%action, chars = text.chars().count(), "processing document");
    let prompt = action.prompt(text);

    match service.generate(&prompt).await {
        Ok(result) => Ok(result.trim().to_string()),
        Err(e) => {
            warn!(%action, error = %e, "text service failed");
            Err(e)
        }
    }
}
