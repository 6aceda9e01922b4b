//! Test utilities for bestiary-crawler
//!
//! Listing page fixtures and a scripted in-memory site standing in for the
//! HTTP session, so crawl tests run without network access.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::services::{PageFetcher, SessionFactory};
use crate::infrastructure::config::CrawlerConfig;
use crate::infrastructure::parsing_error::TransportError;

/// Two cards as served by the site: AC 10 / danger 0 and AC 15 / danger 1/8
pub const TWO_CARD_SAMPLE: &str = r#"
    <div class="card">
        <div class="card-header">
            <h2 class="card-title" itemprop="name">
                <a href="/bestiary/327-badger/" target="_blank" itemprop="url" class="item-link">Барсук [Badger]</a>
            </h2>
        </div>
        <div class="card-body new-article" itemprop="articleBody">
            <ul class="params">
                <li class=""><strong>Класс Доспеха</strong> 10</li>
                <li class=""><strong>Опасность</strong> 0 (0 или 10 опыта)</li>
            </ul>
        </div>
        <div class="card-footer"></div>
    </div>
    <div class="card">
        <div class="card-header">
            <h2 class="card-title" itemprop="name">
                <a href="/bestiary/328-monster/" target="_blank" itemprop="url" class="item-link">Monster</a>
            </h2>
        </div>
        <div class="card-body new-article" itemprop="articleBody">
            <ul class="params">
                <li class=""><strong>Класс Доспеха</strong> 15</li>
                <li class=""><strong>Опасность</strong> 1/8 (0 или 10 опыта)</li>
            </ul>
        </div>
        <div class="card-footer"></div>
    </div>
"#;

pub fn card_html(title: &str, href: &str, items: &[&str]) -> String {
    format!(
        r#"<div class="card"><h2 class="card-title"><a href="{href}">{title}</a></h2><ul class="params">{}</ul></div>"#,
        items.concat()
    )
}

pub fn listing_html(cards: &[String]) -> String {
    format!("<html><body>{}</body></html>", cards.concat())
}

/// Pagination block with a next-page item
pub fn with_next_page(body: &str) -> String {
    format!(r#"{body}<ul class="pagination"><li>1</li><li><a href="?page=2">&gt;</a></li></ul>"#)
}

/// Pagination block without a next-page item
pub fn with_final_page(body: &str) -> String {
    format!(r#"{body}<ul class="pagination"><li>1</li><li>2</li></ul>"#)
}

/// Crawler settings for tests: no courtesy delay
pub fn fast_crawler_config() -> CrawlerConfig {
    CrawlerConfig {
        courtesy_delay_ms: 0,
        ..CrawlerConfig::default()
    }
}

/// One scripted reply of the fake site
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Page(String),
    Status(u16),
    /// Never answers; the crawl must be cancelled
    Hang,
}

/// In-memory site replaying responses in fetch order. The last response is
/// repeated once the script runs out.
#[derive(Debug, Clone)]
pub struct ScriptedSite {
    responses: Arc<Vec<ScriptedResponse>>,
    requested: Arc<Mutex<Vec<String>>>,
    sessions_opened: Arc<Mutex<usize>>,
}

impl ScriptedSite {
    pub fn new(responses: Vec<ScriptedResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            requested: Arc::new(Mutex::new(Vec::new())),
            sessions_opened: Arc::new(Mutex::new(0)),
        }
    }

    pub fn pages(pages: impl IntoIterator<Item = String>) -> Self {
        Self::new(pages.into_iter().map(ScriptedResponse::Page).collect())
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    pub fn sessions_opened(&self) -> usize {
        *self.sessions_opened.lock().unwrap()
    }
}

#[async_trait]
impl PageFetcher for ScriptedSite {
    async fn fetch_page(&self, url: &str) -> Result<String, TransportError> {
        let index = {
            let mut requested = self.requested.lock().unwrap();
            requested.push(url.to_string());
            requested.len() - 1
        };
        let response = self
            .responses
            .get(index)
            .or_else(|| self.responses.last())
            .cloned()
            .unwrap_or(ScriptedResponse::Status(404));

        match response {
            ScriptedResponse::Page(body) => Ok(body),
            ScriptedResponse::Status(status) => Err(TransportError::HttpStatus {
                status,
                url: url.to_string(),
            }),
            ScriptedResponse::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(TransportError::Timeout { url: url.to_string() })
            }
        }
    }
}

impl SessionFactory for ScriptedSite {
    type Session = ScriptedSite;

    fn open_session(&self) -> Result<ScriptedSite, TransportError> {
        *self.sessions_opened.lock().unwrap() += 1;
        Ok(self.clone())
    }
}
