//! Pagination cursor for a single crawl.
//!
//! Responsibility:
//! - current page number (1-based) and last-page flag
//! - page cap check
//! - page URL construction (`page=<n>` appended to the search URL)

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PaginationCursor {
    page_number: u32,
    is_last_page: bool,
    page_cap: u32,
}

impl PaginationCursor {
    pub(crate) fn new(page_cap: u32) -> Self {
        Self {
            page_number: 1,
            is_last_page: false,
            page_cap,
        }
    }

    pub(crate) fn page_number(&self) -> u32 {
        self.page_number
    }

    pub(crate) fn is_last_page(&self) -> bool {
        self.is_last_page
    }

    pub(crate) fn mark_last_page(&mut self) {
        self.is_last_page = true;
    }

    /// True while the cursor points at a page within the cap.
    pub(crate) fn within_cap(&self) -> bool {
        self.page_number <= self.page_cap
    }

    /// Move to the next page. Returns false once the cap is exceeded.
    pub(crate) fn advance(&mut self) -> bool {
        self.page_number = self.page_number.saturating_add(1);
        self.within_cap()
    }

    pub(crate) fn page_url(&self, search_url: &str) -> String {
        page_url(search_url, self.page_number)
    }
}

/// Append the page parameter to a search URL.
pub fn page_url(search_url: &str, page_number: u32) -> String {
    let separator = if search_url.contains('?') { '&' } else { '?' };
    format!("{search_url}{separator}page={page_number}")
}
