//! Document actions and accepted source types

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::DocumentError;

/// What to do with a document's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentAction {
    #[serde(rename = "to-markdown")]
    ToMarkdown,
    #[serde(rename = "summarize")]
    Summarize,
}

impl DocumentAction {
    pub const ALL: [DocumentAction; 2] = [DocumentAction::ToMarkdown, DocumentAction::Summarize];

    pub fn id(&self) -> &'static str {
        match self {
            DocumentAction::ToMarkdown => "to-markdown",
            DocumentAction::Summarize => "summarize",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DocumentAction::ToMarkdown => "Convert to Markdown",
            DocumentAction::Summarize => "Summarize Text",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DocumentAction::ToMarkdown => "MD",
            DocumentAction::Summarize => "∑",
        }
    }

    /// Prompt sent to the text service for `text`
    pub fn prompt(&self, text: &str) -> String {
        match self {
            DocumentAction::ToMarkdown => format!(
                "Convert the following text to well-formatted Markdown.\n\
                 Ensure appropriate headings, lists, bold, italics, and code blocks if applicable.\n\
                 Do not add any conversational preamble or explanation, only the Markdown output.\n\
                 Text:\n---\n{}\n---",
                text
            ),
            DocumentAction::Summarize => format!(
                "Provide a concise summary of the following text.\n\
                 Focus on the main points and key information.\n\
                 The summary should be a single paragraph if possible, or a few short paragraphs for longer texts.\n\
                 Do not add any conversational preamble or explanation, only the summary.\n\
                 Text:\n---\n{}\n---",
                text
            ),
        }
    }
}

impl fmt::Display for DocumentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for DocumentAction {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "to-markdown" | "to_markdown" | "markdown" => Ok(DocumentAction::ToMarkdown),
            "summarize" | "summary" => Ok(DocumentAction::Summarize),
            _ => Err(DocumentError::UnknownAction(s.to_string())),
        }
    }
}

/// File kinds the document helper reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Txt,
    Md,
}

impl SourceType {
    pub const ALL: [SourceType; 2] = [SourceType::Txt, SourceType::Md];

    pub fn id(&self) -> &'static str {
        match self {
            SourceType::Txt => "txt",
            SourceType::Md => "md",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceType::Txt => "Text File",
            SourceType::Md => "Markdown File",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            SourceType::Txt => "text/plain",
            SourceType::Md => "text/markdown",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SourceType::Txt => ".txt",
            SourceType::Md => ".md",
        }
    }

    /// Decide whether a file can be processed, from its name and reported
    /// MIME type. A `text/plain` MIME type is enough on its own.
    pub fn detect(file_name: &str, mime_type: Option<&str>) -> Result<SourceType, DocumentError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(SourceType::Md.extension()) {
            return Ok(SourceType::Md);
        }
        if lower.ends_with(SourceType::Txt.extension()) || mime_type == Some("text/plain") {
            return Ok(SourceType::Txt);
        }

        let shown = match mime_type {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => file_name.rsplit('.').next().unwrap_or(file_name).to_string(),
        };
        Err(DocumentError::UnsupportedFileType(shown))
    }
}
