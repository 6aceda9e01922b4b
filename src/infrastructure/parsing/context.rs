//! Parsing context for listing pages
//!
//! Carries the page position so card-level problems can be logged with it.

/// Context information for parsing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// Current page being parsed (1-based)
    pub page_number: u32,

    /// URL the page was fetched from
    pub page_url: String,
}

impl ParseContext {
    pub fn new(page_number: u32, page_url: impl Into<String>) -> Self {
        Self {
            page_number,
            page_url: page_url.into(),
        }
    }
}
