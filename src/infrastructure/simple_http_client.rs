//! HTTP client for listing page fetches
//!
//! One `HttpClient` is built per crawl by `HttpSessionFactory` and dropped
//! when the crawl ends. Fetches are single attempts: the crawl treats any
//! failure as fatal, so retries live nowhere.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, error, info};

use crate::domain::services::{PageFetcher, SessionFactory};
use crate::infrastructure::config::CrawlerConfig;
use crate::infrastructure::parsing_error::TransportError;

/// Configuration for HTTP client behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Whether to follow redirects
    pub follow_redirects: bool,
}

impl HttpClientConfig {
    pub fn from_crawler_config(config: &CrawlerConfig) -> Self {
        Self {
            timeout_seconds: config.request_timeout_seconds,
            user_agent: config.user_agent.clone(),
            follow_redirects: true,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from_crawler_config(&CrawlerConfig::default())
    }
}

/// HTTP session for one crawl
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Fetch a page body as text; non-success statuses are errors
    pub async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        info!("🌐 HTTP GET: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_request_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            error!("❌ HTTP error {}: {}", status, url);
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| TransportError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn map_request_error(url: &str, error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout { url: url.to_string() }
    } else {
        TransportError::Request {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &str) -> Result<String, TransportError> {
        self.fetch_text(url).await
    }
}

/// Builds a fresh `HttpClient` for each crawl
#[derive(Debug, Clone)]
pub struct HttpSessionFactory {
    config: HttpClientConfig,
}

impl HttpSessionFactory {
    pub fn new(config: HttpClientConfig) -> Self {
        Self { config }
    }

    pub fn from_crawler_config(config: &CrawlerConfig) -> Self {
        Self::new(HttpClientConfig::from_crawler_config(config))
    }
}

impl SessionFactory for HttpSessionFactory {
    type Session = HttpClient;

    fn open_session(&self) -> Result<HttpClient, TransportError> {
        debug!("Opening HTTP session (timeout {}s)", self.config.timeout_seconds);
        HttpClient::with_config(self.config.clone())
    }
}
