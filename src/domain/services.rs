//! Service seams used by the crawl.
//!
//! A crawl opens one session through a `SessionFactory`, fetches every page
//! through it and drops it when the crawl ends.

use async_trait::async_trait;

use crate::infrastructure::parsing_error::TransportError;

/// Fetches raw listing page bodies
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page body; any failure is a transport error
    async fn fetch_page(&self, url: &str) -> Result<String, TransportError>;
}

/// Opens a fresh fetch session per crawl
pub trait SessionFactory: Send + Sync {
    type Session: PageFetcher;

    fn open_session(&self) -> Result<Self::Session, TransportError>;
}
