//! Bestiary Crawler
//!
//! Walks the paginated dnd.su bestiary search results, extracts creature
//! records from the listing cards, filters them by armor class and returns
//! them optionally sorted.

pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_utils;

pub use application::{
    render_records, split_message, BestiaryCrawler, CrawlRun, CrawlTermination,
    CrawlerSetupError, SearchUrl,
};
pub use domain::{ArmorClassRange, DisplayLanguage, MonsterRecord, SortKey};
pub use infrastructure::{AppConfig, CrawlerConfig, HttpSessionFactory};
