//! Bestiary crawler entry point
//!
//! Compiles the page layout rules once, opens a fresh session per crawl and
//! hands the loop to `PaginationController`. Callers get the filtered records;
//! crawl failures are logged, not returned.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::pagination_controller::{CrawlRun, CrawlTermination, PaginationController};
use crate::domain::armor_range::ArmorClassRange;
use crate::domain::monster::MonsterRecord;
use crate::domain::services::SessionFactory;
use crate::domain::sorting::{sort_records, SortKey};
use crate::infrastructure::config::CrawlerConfig;
use crate::infrastructure::parsing::ParsingConfig;
use crate::infrastructure::parsing_error::ParsingError;
use crate::infrastructure::simple_http_client::HttpSessionFactory;

/// Crawler settings rejected before any page is fetched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrawlerSetupError {
    #[error("Invalid crawler configuration: {0}")]
    Parsing(#[from] ParsingError),
}

pub struct BestiaryCrawler<F: SessionFactory> {
    config: CrawlerConfig,
    parsing: ParsingConfig,
    factory: F,
}

impl BestiaryCrawler<HttpSessionFactory> {
    /// Crawler fetching over HTTP with the configured timeout and user agent
    pub fn with_http(config: CrawlerConfig) -> Result<Self, CrawlerSetupError> {
        let factory = HttpSessionFactory::from_crawler_config(&config);
        Self::new(config, factory)
    }
}

impl<F: SessionFactory> BestiaryCrawler<F> {
    pub fn new(config: CrawlerConfig, factory: F) -> Result<Self, CrawlerSetupError> {
        let parsing = ParsingConfig::from_crawler_config(&config)?;
        Ok(Self {
            config,
            parsing,
            factory,
        })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawl `search_url` and return every record whose armor class lies in
    /// `[min_armor_class, max_armor_class]` (bounds in either order), in
    /// discovery order.
    pub async fn crawl(
        &self,
        search_url: &str,
        min_armor_class: i32,
        max_armor_class: i32,
    ) -> Vec<MonsterRecord> {
        self.crawl_sorted(search_url, min_armor_class, max_armor_class, None)
            .await
    }

    /// Like `crawl`, then stable-sorted by `sort_key` when given.
    pub async fn crawl_sorted(
        &self,
        search_url: &str,
        min_armor_class: i32,
        max_armor_class: i32,
        sort_key: Option<SortKey>,
    ) -> Vec<MonsterRecord> {
        let range = ArmorClassRange::new(min_armor_class, max_armor_class);
        let mut records = self
            .crawl_with_cancellation(search_url, range, &CancellationToken::new())
            .await
            .records;
        if let Some(key) = sort_key {
            sort_records(&mut records, key);
        }
        records
    }

    /// Crawl until done or until `cancel` fires; a cancelled or failed crawl
    /// still returns what it collected.
    pub async fn crawl_with_cancellation(
        &self,
        search_url: &str,
        range: ArmorClassRange,
        cancel: &CancellationToken,
    ) -> CrawlRun {
        info!("🚀 Crawling {} for armor class {}", search_url, range);

        let session = match self.factory.open_session() {
            Ok(session) => session,
            Err(e) => {
                error!("Could not open session: {}", e);
                return CrawlRun {
                    records: Vec::new(),
                    pages_visited: 0,
                    termination: CrawlTermination::TransportFailure,
                };
            }
        };

        let controller = PaginationController::new(
            &self.parsing,
            self.config.courtesy_delay(),
            self.config.page_cap,
        );
        let run = controller.run(&session, search_url, range, cancel).await;

        if run.termination.is_partial() {
            warn!(
                "Crawl of {} ended early ({:?}), returning {} records",
                search_url,
                run.termination,
                run.records.len()
            );
        }
        run
    }
}
