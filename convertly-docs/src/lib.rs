//! Convertly Docs - Document text helper
//!
//! Reads `.txt`/`.md` content and hands it to an external AI text service to
//! summarize it or reformat it as Markdown. The service sits behind the
//! `TextService` trait; `GeminiService` is the HTTP implementation.

mod action;
mod gemini;
mod service;

pub use action::{DocumentAction, SourceType};
pub use gemini::{GeminiConfig, GeminiService, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use service::{process_document, DocumentError, TextService};
