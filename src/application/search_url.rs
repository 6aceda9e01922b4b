//! Search URL validation and construction
//!
//! A crawl starts from a bestiary search URL: the bare search endpoint
//! followed by `&key=value` filter pairs.

use std::fmt;

use regex::Regex;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchUrlError {
    #[error("Not a bestiary search URL: {url}")]
    Rejected { url: String },

    #[error("Invalid search URL pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// A search URL accepted by the configured pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUrl(String);

impl SearchUrl {
    /// Validate `url` against `pattern` (a full-match regex).
    pub fn parse(url: &str, pattern: &str) -> Result<Self, SearchUrlError> {
        let regex = Regex::new(pattern).map_err(|e| SearchUrlError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        let url = url.trim();
        if regex.is_match(url) {
            Ok(Self(url.to_string()))
        } else {
            Err(SearchUrlError::Rejected {
                url: url.to_string(),
            })
        }
    }

    /// Append `key=value` filters to a search endpoint, each as `&key=value`.
    pub fn with_filters<K, V>(base: &str, filters: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = base.to_string();
        for (key, value) in filters {
            url.push('&');
            url.push_str(key.as_ref());
            url.push('=');
            url.push_str(value.as_ref());
        }
        info!("Final url is {}", url);
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SearchUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::dnd_su::{SEARCH_BASE_URL, SEARCH_URL_PATTERN};
    use rstest::rstest;

    #[rstest]
    #[case("https://dnd.su/bestiary/?search=")]
    #[case("https://dnd.su/bestiary/?search=&size=3")]
    #[case("https://dnd.su/bestiary/?search=&type=beast&size=3")]
    #[case("https://dnd.su/bestiary/?search=&cr%5B%5D=1-8")]
    #[case("https://dnd.su/bestiary/?search=&cr[]=1-8")]
    fn accepts_search_urls(#[case] url: &str) {
        assert_eq!(SearchUrl::parse(url, SEARCH_URL_PATTERN).unwrap().as_str(), url);
    }

    #[rstest]
    #[case("https://dnd.su/bestiary/")]
    #[case("https://example.com/bestiary/?search=")]
    #[case("http://dnd.su/bestiary/?search=")]
    #[case("https://dnd.su/bestiary/?search=&size")]
    #[case("https://dnd.su/bestiary/?search=&a=b c")]
    fn rejects_other_urls(#[case] url: &str) {
        assert_eq!(
            SearchUrl::parse(url, SEARCH_URL_PATTERN),
            Err(SearchUrlError::Rejected { url: url.to_string() })
        );
    }

    #[test]
    fn bad_pattern_is_reported() {
        assert!(matches!(
            SearchUrl::parse("https://dnd.su", "(("),
            Err(SearchUrlError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn builds_url_from_filters() {
        let url = SearchUrl::with_filters(SEARCH_BASE_URL, &[("type", "beast"), ("size", "3")]);
        assert_eq!(url.as_str(), "https://dnd.su/bestiary/?search=&type=beast&size=3");
        assert!(SearchUrl::parse(url.as_str(), SEARCH_URL_PATTERN).is_ok());
    }

    #[test]
    fn no_filters_keeps_base() {
        let url = SearchUrl::with_filters::<&str, &str>(SEARCH_BASE_URL, &[]);
        assert_eq!(url.to_string(), SEARCH_BASE_URL);
    }
}
