//! Listing page adapter
//!
//! Wraps a fetched body into a queryable document and answers the two
//! questions the crawl asks of a page: which cards does it hold, and is it
//! the last one.

use scraper::{ElementRef, Html};
use tracing::debug;

use super::config::ParsingConfig;
use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};

/// What the pagination block says about the next page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    /// No pagination block: the whole result set fits on one page
    Absent,
    /// A pagination block with no items, i.e. unexpected markup
    Malformed,
    /// An item carries the next-page indicator
    HasNext,
    /// Items present, none points forward
    Exhausted,
}

impl PaginationState {
    pub fn is_last_page(self) -> ParsingResult<bool> {
        match self {
            Self::Absent | Self::Exhausted => Ok(true),
            Self::HasNext => Ok(false),
            Self::Malformed => Err(ParsingError::EmptyPagination),
        }
    }
}

/// A parsed listing page
pub struct ListingPage<'c> {
    document: Html,
    config: &'c ParsingConfig,
}

impl<'c> ListingPage<'c> {
    pub fn parse(body: &str, config: &'c ParsingConfig) -> Self {
        Self {
            document: Html::parse_document(body),
            config,
        }
    }

    /// Parse a raw body; invalid UTF-8 sequences are replaced.
    pub fn parse_bytes(body: &[u8], config: &'c ParsingConfig) -> Self {
        Self::parse(&String::from_utf8_lossy(body), config)
    }

    /// Card containers in document order
    pub fn cards(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.document.select(&self.config.selectors.card)
    }

    pub fn pagination_state(&self) -> PaginationState {
        let selectors = &self.config.selectors;
        let Some(block) = self.document.select(&selectors.pagination).next() else {
            debug!("No pagination block, single page result");
            return PaginationState::Absent;
        };

        let mut items = block.select(&selectors.pagination_item).peekable();
        if items.peek().is_none() {
            return PaginationState::Malformed;
        }

        let indicator = self.config.next_page_indicator.as_str();
        if items.any(|item| item.text().collect::<String>().contains(indicator)) {
            PaginationState::HasNext
        } else {
            PaginationState::Exhausted
        }
    }

    pub fn is_last_page(&self) -> ParsingResult<bool> {
        self.pagination_state().is_last_page()
    }
}
