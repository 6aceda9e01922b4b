//! Compiled parsing configuration
//!
//! Selector strings and field patterns from `CrawlerConfig` are compiled once
//! per crawler; a bad selector or regex is reported before any page is fetched.

use regex::Regex;
use scraper::Selector;
use url::Url;

use crate::infrastructure::config::{CrawlerConfig, PageSelectors};
use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};

/// Main parsing configuration
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    /// Base URL for resolving relative card links
    pub base_url: Url,

    /// Glyph marking a next-page pagination item
    pub next_page_indicator: String,

    pub selectors: ListingSelectors,

    pub fields: FieldRules,
}

impl ParsingConfig {
    pub fn from_crawler_config(config: &CrawlerConfig) -> ParsingResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ParsingError::UrlResolutionFailed {
            url: config.base_url.clone(),
            reason: format!("Invalid base URL: {e}"),
            base_url: None,
        })?;

        Ok(Self {
            base_url,
            next_page_indicator: config.next_page_indicator.clone(),
            selectors: ListingSelectors::compile(&config.selectors)?,
            fields: FieldRules::compile(config)?,
        })
    }
}

/// CSS selectors for listing pages
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub card: Selector,
    pub title: Selector,
    pub title_link: Selector,
    pub params_list: Selector,
    pub params_item: Selector,
    pub params_label: Selector,
    pub pagination: Selector,
    pub pagination_item: Selector,
}

impl ListingSelectors {
    pub fn compile(selectors: &PageSelectors) -> ParsingResult<Self> {
        Ok(Self {
            card: compile_selector(&selectors.card)?,
            title: compile_selector(&selectors.title)?,
            title_link: compile_selector(&selectors.title_link)?,
            params_list: compile_selector(&selectors.params_list)?,
            params_item: compile_selector(&selectors.params_item)?,
            params_label: compile_selector(&selectors.params_label)?,
            pagination: compile_selector(&selectors.pagination)?,
            pagination_item: compile_selector(&selectors.pagination_item)?,
        })
    }
}

fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e))
}

/// Labels and value patterns of the two recognized card fields
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub armor_class_label: String,
    pub danger_label: String,
    pub armor_class_pattern: Regex,
    pub danger_pattern: Regex,
}

impl FieldRules {
    pub fn compile(config: &CrawlerConfig) -> ParsingResult<Self> {
        let armor_class_pattern = Regex::new(&config.armor_class_pattern).map_err(|e| {
            ParsingError::invalid_pattern("armor_class", &config.armor_class_pattern, e)
        })?;
        let danger_pattern = Regex::new(&config.danger_pattern)
            .map_err(|e| ParsingError::invalid_pattern("danger", &config.danger_pattern, e))?;

        Ok(Self {
            armor_class_label: config.armor_class_label.clone(),
            danger_label: config.danger_label.clone(),
            armor_class_pattern,
            danger_pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_compiles() {
        let config = ParsingConfig::from_crawler_config(&CrawlerConfig::default()).unwrap();
        assert_eq!(config.base_url.as_str(), "https://dnd.su/");
        assert!(config.fields.danger_pattern.is_match("\u{2014}"));
        assert_eq!(
            config.fields.danger_pattern.find("1/8 (25 опыта)").map(|m| m.as_str()),
            Some("1/8")
        );
    }

    #[test]
    fn invalid_selector_is_reported() {
        let mut crawler = CrawlerConfig::default();
        crawler.selectors.card = "div[".to_string();
        let err = ParsingConfig::from_crawler_config(&crawler).unwrap_err();
        assert!(matches!(err, ParsingError::InvalidSelector { ref selector, .. } if selector == "div["));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let crawler = CrawlerConfig {
            armor_class_pattern: r"(\d+".to_string(),
            ..CrawlerConfig::default()
        };
        let err = ParsingConfig::from_crawler_config(&crawler).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let crawler = CrawlerConfig {
            base_url: "not a url".to_string(),
            ..CrawlerConfig::default()
        };
        assert!(matches!(
            ParsingConfig::from_crawler_config(&crawler),
            Err(ParsingError::UrlResolutionFailed { .. })
        ));
    }
}
