//! HTML parsing for bestiary listing pages
//!
//! `ListingPage` owns the parsed document, `MonsterCardParser` turns its cards
//! into records. Documents are not `Send`; parse and extract synchronously.

pub mod config;
pub mod context;
pub mod listing_page;
pub mod monster_card_parser;

pub use self::config::{FieldRules, ListingSelectors, ParsingConfig};
pub use context::ParseContext;
pub use listing_page::{ListingPage, PaginationState};
pub use monster_card_parser::{CardOutcome, FieldKind, MonsterCardParser};

pub use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};

/// Parser that works on a whole listing page with its position in the crawl
pub trait ContextualParser {
    type Output;

    fn parse_with_context(&self, page: &ListingPage<'_>, context: &ParseContext) -> Self::Output;
}
