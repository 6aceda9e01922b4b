//! Pagination controller
//!
//! Drives one crawl over a search result: fetch page, extract cards, filter by
//! armor class, decide whether to continue. Transport failures and
//! cancellation end the crawl early; what was collected so far is kept.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::domain::armor_range::ArmorClassRange;
use crate::domain::monster::MonsterRecord;
use crate::domain::pagination::PaginationCursor;
use crate::domain::services::PageFetcher;
use crate::infrastructure::parsing::{
    ContextualParser, ListingPage, MonsterCardParser, ParseContext, ParsingConfig,
};

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlTermination {
    LastPage,
    PageCap,
    TransportFailure,
    Cancelled,
}

impl CrawlTermination {
    /// True when the crawl ended before the site said it was done
    pub fn is_partial(self) -> bool {
        matches!(self, Self::TransportFailure | Self::Cancelled)
    }
}

/// Result of one crawl
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlRun {
    pub records: Vec<MonsterRecord>,
    pub pages_visited: u32,
    pub termination: CrawlTermination,
}

/// Records kept from one page and whether it was the last one
#[derive(Debug)]
struct PageOutcome {
    records: Vec<MonsterRecord>,
    is_last_page: bool,
}

pub struct PaginationController<'a> {
    parsing: &'a ParsingConfig,
    courtesy_delay: Duration,
    page_cap: u32,
}

impl<'a> PaginationController<'a> {
    pub fn new(parsing: &'a ParsingConfig, courtesy_delay: Duration, page_cap: u32) -> Self {
        Self {
            parsing,
            courtesy_delay,
            page_cap,
        }
    }

    /// Crawl `search_url` page by page until the last page, the page cap, a
    /// transport failure or cancellation.
    pub async fn run<S>(
        &self,
        session: &S,
        search_url: &str,
        range: ArmorClassRange,
        cancel: &CancellationToken,
    ) -> CrawlRun
    where
        S: PageFetcher + ?Sized,
    {
        let mut cursor = PaginationCursor::new(self.page_cap);
        let mut records = Vec::new();
        let mut pages_visited = 0u32;

        let termination = loop {
            if !cursor.within_cap() {
                break CrawlTermination::PageCap;
            }

            let url = cursor.page_url(search_url);
            let context = ParseContext::new(cursor.page_number(), url.as_str());
            debug!("Fetching page {}: {}", context.page_number, url);

            let fetched = tokio::select! {
                biased;
                () = cancel.cancelled() => break CrawlTermination::Cancelled,
                result = session.fetch_page(&url) => result,
            };
            let body = match fetched {
                Ok(body) => body,
                Err(e) => {
                    error!("Crawl aborted on page {}: {}", context.page_number, e);
                    break CrawlTermination::TransportFailure;
                }
            };
            pages_visited += 1;

            let outcome = self.process_page(&body, &context, range);
            info!(
                "📄 Page {}: {} matching records",
                context.page_number,
                outcome.records.len()
            );
            records.extend(outcome.records);

            if outcome.is_last_page {
                cursor.mark_last_page();
            }
            if cursor.is_last_page() {
                break CrawlTermination::LastPage;
            }
            if !cursor.advance() {
                warn!("Page cap of {} reached, stopping", self.page_cap);
                break CrawlTermination::PageCap;
            }

            if !self.courtesy_delay.is_zero() {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break CrawlTermination::Cancelled,
                    () = tokio::time::sleep(self.courtesy_delay) => {}
                }
            }
        };

        info!(
            "Crawl finished ({:?}): {} records from {} pages",
            termination,
            records.len(),
            pages_visited
        );
        CrawlRun {
            records,
            pages_visited,
            termination,
        }
    }

    fn process_page(
        &self,
        body: &str,
        context: &ParseContext,
        range: ArmorClassRange,
    ) -> PageOutcome {
        let page = ListingPage::parse(body, self.parsing);
        let parser = MonsterCardParser::new(self.parsing);

        let mut records = Vec::new();
        for outcome in parser.parse_with_context(&page, context) {
            match outcome {
                Ok(record) if range.contains(record.armor_class) => records.push(record),
                Ok(record) => debug!(
                    "'{}' filtered out: armor class {} not in {}",
                    record.title, record.armor_class, range
                ),
                Err(e) if e.is_silent() => warn!("Page {}: {}", context.page_number, e),
                Err(e) => error!("Page {}: card skipped: {}", context.page_number, e),
            }
        }

        let is_last_page = page.is_last_page().unwrap_or_else(|e| {
            error!("Page {}: {}, treating as last page", context.page_number, e);
            true
        });

        PageOutcome {
            records,
            is_last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::CrawlerConfig;
    use crate::test_utils::{
        card_html, listing_html, with_final_page, with_next_page, ScriptedResponse, ScriptedSite,
        TWO_CARD_SAMPLE,
    };

    const SEARCH_URL: &str = "https://dnd.su/bestiary/?search=";

    fn parsing() -> ParsingConfig {
        ParsingConfig::from_crawler_config(&CrawlerConfig::default()).unwrap()
    }

    fn wolf_page() -> String {
        listing_html(&[card_html(
            "Wolf",
            "/bestiary/8-wolf/",
            &["<li><strong>Класс Доспеха</strong> 13</li>"],
        )])
    }

    async fn run(site: &ScriptedSite, page_cap: u32, range: ArmorClassRange) -> CrawlRun {
        let parsing = parsing();
        PaginationController::new(&parsing, Duration::ZERO, page_cap)
            .run(site, SEARCH_URL, range, &CancellationToken::new())
            .await
    }

    #[tokio::test]
    async fn single_page_without_pagination() {
        let site = ScriptedSite::pages([TWO_CARD_SAMPLE.to_string()]);
        let run = run(&site, 10, ArmorClassRange::new(10, 20)).await;

        assert_eq!(run.termination, CrawlTermination::LastPage);
        assert_eq!(run.pages_visited, 1);
        assert_eq!(run.records.len(), 2);
        assert_eq!(site.requested_urls(), vec![format!("{SEARCH_URL}&page=1")]);
    }

    #[tokio::test]
    async fn follows_next_page_until_exhausted() {
        let site = ScriptedSite::pages([
            with_next_page(TWO_CARD_SAMPLE),
            with_final_page(&wolf_page()),
        ]);
        let run = run(&site, 10, ArmorClassRange::new(0, 30)).await;

        assert_eq!(run.termination, CrawlTermination::LastPage);
        assert_eq!(run.pages_visited, 2);
        let titles: Vec<_> = run.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Барсук [Badger]", "Monster", "Wolf"]);
        assert_eq!(
            site.requested_urls(),
            vec![format!("{SEARCH_URL}&page=1"), format!("{SEARCH_URL}&page=2")]
        );
    }

    #[tokio::test]
    async fn page_cap_stops_always_next_pagination() {
        let site = ScriptedSite::pages([with_next_page(&wolf_page())]);
        let run = run(&site, 3, ArmorClassRange::new(0, 30)).await;

        assert_eq!(run.termination, CrawlTermination::PageCap);
        assert_eq!(site.fetch_count(), 3);
        assert_eq!(run.pages_visited, 3);
        assert_eq!(run.records.len(), 3);
    }

    #[tokio::test]
    async fn zero_page_cap_fetches_nothing() {
        let site = ScriptedSite::pages([wolf_page()]);
        let run = run(&site, 0, ArmorClassRange::new(0, 30)).await;
        assert_eq!(run.termination, CrawlTermination::PageCap);
        assert_eq!(site.fetch_count(), 0);
    }

    #[tokio::test]
    async fn transport_failure_keeps_earlier_pages() {
        let site = ScriptedSite::new(vec![
            ScriptedResponse::Page(with_next_page(TWO_CARD_SAMPLE)),
            ScriptedResponse::Status(503),
        ]);
        let run = run(&site, 10, ArmorClassRange::new(10, 20)).await;

        assert_eq!(run.termination, CrawlTermination::TransportFailure);
        assert!(run.termination.is_partial());
        assert_eq!(run.pages_visited, 1);
        assert_eq!(run.records.len(), 2);
    }

    #[tokio::test]
    async fn empty_pagination_block_ends_crawl() {
        let body = format!(r#"{}<ul class="pagination"></ul>"#, wolf_page());
        let site = ScriptedSite::pages([body, wolf_page()]);
        let run = run(&site, 10, ArmorClassRange::new(0, 30)).await;

        assert_eq!(run.termination, CrawlTermination::LastPage);
        assert_eq!(site.fetch_count(), 1);
        assert_eq!(run.records.len(), 1);
    }

    #[tokio::test]
    async fn filters_by_range() {
        let site = ScriptedSite::pages([TWO_CARD_SAMPLE.to_string()]);
        let run = run(&site, 10, ArmorClassRange::new(11, 20)).await;
        assert_eq!(run.records.len(), 1);
        assert_eq!(run.records[0].title, "Monster");
    }

    #[tokio::test]
    async fn cancelled_before_start_fetches_nothing() {
        let parsing = parsing();
        let site = ScriptedSite::pages([wolf_page()]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let run = PaginationController::new(&parsing, Duration::ZERO, 10)
            .run(&site, SEARCH_URL, ArmorClassRange::new(0, 30), &cancel)
            .await;
        assert_eq!(run.termination, CrawlTermination::Cancelled);
        assert_eq!(site.fetch_count(), 0);
        assert!(run.records.is_empty());
    }

    #[tokio::test]
    async fn cancellation_during_fetch_keeps_records() {
        let parsing = parsing();
        let site = ScriptedSite::new(vec![
            ScriptedResponse::Page(with_next_page(&wolf_page())),
            ScriptedResponse::Hang,
        ]);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let run = PaginationController::new(&parsing, Duration::ZERO, 10)
            .run(&site, SEARCH_URL, ArmorClassRange::new(0, 30), &cancel)
            .await;
        assert_eq!(run.termination, CrawlTermination::Cancelled);
        assert_eq!(run.pages_visited, 1);
        assert_eq!(run.records.len(), 1);
    }

    #[tokio::test]
    async fn cancellation_during_courtesy_delay() {
        let parsing = parsing();
        let site = ScriptedSite::pages([with_next_page(&wolf_page())]);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let run = PaginationController::new(&parsing, Duration::from_secs(3600), 10)
            .run(&site, SEARCH_URL, ArmorClassRange::new(0, 30), &cancel)
            .await;
        assert_eq!(run.termination, CrawlTermination::Cancelled);
        assert_eq!(site.fetch_count(), 1);
        assert_eq!(run.records.len(), 1);
    }
}
