//! Application layer
//!
//! Crawl orchestration on top of the domain rules and infrastructure
//! adapters, plus the helpers front ends use around a crawl.

pub mod bestiary_crawler;
pub mod pagination_controller;
pub mod report;
pub mod search_url;

pub use bestiary_crawler::{BestiaryCrawler, CrawlerSetupError};
pub use pagination_controller::{CrawlRun, CrawlTermination, PaginationController};
pub use report::{render_records, split_message};
pub use search_url::{SearchUrl, SearchUrlError};
