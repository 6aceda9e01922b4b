//! Error types for listing page parsing and page transport
//!
//! Structural markup problems (`ParsingError`) and malformed field values
//! (`FieldParseError`) are absorbed inside the crawl. Only `TransportError`
//! ends a crawl early.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Card has no title element")]
    MissingTitle,

    #[error("Card title '{title}' has no link")]
    MissingLink { title: String },

    #[error("Card '{title}' has no parameter list")]
    MissingParameterList { title: String },

    #[error("Card '{title}' has an empty parameter list")]
    EmptyParameterList { title: String },

    #[error("URL resolution failed: {url} - {reason}")]
    UrlResolutionFailed {
        url: String,
        reason: String,
        base_url: Option<String>,
    },

    #[error("Pagination block present but contains no items")]
    EmptyPagination,

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid field pattern for {field}: {pattern} - {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },
}

impl ParsingError {
    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_pattern(field: &str, pattern: &str, reason: impl ToString) -> Self {
        Self::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Configuration errors are detected before a crawl starts; the rest
    /// describe one card or page.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidSelector { .. } | Self::InvalidPattern { .. })
    }
}

/// Malformed values in otherwise well-formed cards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("Armor class not found for '{title}'")]
    ArmorClassMissing { title: String },

    #[error("Armor class '{raw}' of '{title}' is not an integer")]
    ArmorClassNotInteger { title: String, raw: String },
}

/// Why a single card produced no record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error(transparent)]
    Structural(#[from] ParsingError),

    #[error(transparent)]
    Field(#[from] FieldParseError),
}

impl ExtractionError {
    /// Field errors are expected on sparsely documented entries and are
    /// only worth a warning.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Field(_))
    }
}

/// Page fetch failures. Any of these aborts the crawl.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    #[error("HTTP request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP error {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

pub type ParsingResult<T> = Result<T, ParsingError>;
