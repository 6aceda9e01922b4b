//! Configuration infrastructure
//!
//! Two sections:
//! 1. `crawler`: site constants, field labels and patterns, pacing
//! 2. `logging`: subscriber setup
//!
//! Values are layered: built-in defaults, then an optional config file, then
//! `BESTIARY__`-prefixed environment variables (e.g.
//! `BESTIARY__CRAWLER__PAGE_CAP=5`). `ConfigManager` saves the resolved
//! configuration as JSON in the user config directory; a saved file is the
//! default file layer on later runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub crawler: CrawlerConfig,
    pub logging: LoggingConfig,
}

/// Crawl behaviour and the page layout contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause between consecutive page fetches in milliseconds
    pub courtesy_delay_ms: u64,

    /// Hard upper bound on pages visited per crawl
    pub page_cap: u32,

    /// Base URL for resolving relative card links
    pub base_url: String,

    /// Bold label text of the armor class item
    pub armor_class_label: String,

    /// Bold label text of the danger item
    pub danger_label: String,

    /// First match in the armor class item is the armor class
    pub armor_class_pattern: String,

    /// First match in the danger item is the danger token; must also match
    /// the no-rating dash
    pub danger_pattern: String,

    /// Glyph present in a pagination item when a next page exists
    pub next_page_indicator: String,

    pub user_agent: String,

    pub request_timeout_seconds: u64,

    /// Accepted shape of search URLs
    pub search_url_pattern: String,

    pub selectors: PageSelectors,
}

impl CrawlerConfig {
    pub fn courtesy_delay(&self) -> Duration {
        Duration::from_millis(self.courtesy_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            courtesy_delay_ms: defaults::COURTESY_DELAY_MS,
            page_cap: defaults::PAGE_CAP,
            base_url: dnd_su::BASE_URL.to_string(),
            armor_class_label: dnd_su::ARMOR_CLASS_LABEL.to_string(),
            danger_label: dnd_su::DANGER_LABEL.to_string(),
            armor_class_pattern: defaults::ARMOR_CLASS_PATTERN.to_string(),
            danger_pattern: defaults::DANGER_PATTERN.to_string(),
            next_page_indicator: dnd_su::NEXT_PAGE_INDICATOR.to_string(),
            user_agent: defaults::USER_AGENT.to_string(),
            request_timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            search_url_pattern: dnd_su::SEARCH_URL_PATTERN.to_string(),
            selectors: PageSelectors::default(),
        }
    }
}

/// CSS selectors describing the listing page layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    pub card: String,
    pub title: String,
    pub title_link: String,
    pub params_list: String,
    pub params_item: String,
    pub params_label: String,
    pub pagination: String,
    pub pagination_item: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            card: "div.card".to_string(),
            title: "h2.card-title".to_string(),
            title_link: "a".to_string(),
            params_list: "ul.params".to_string(),
            params_item: "li".to_string(),
            params_label: "strong".to_string(),
            pagination: "ul.pagination".to_string(),
            pagination_item: "li".to_string(),
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console (stderr) output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; defaults to `<data dir>/bestiary-crawler/logs`
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "info")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: None,
            module_filters: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Layered load: defaults, optional file, then environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(defaults::ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.crawler.base_url.trim().is_empty() {
            anyhow::bail!("crawler.base_url must not be empty");
        }
        if self.crawler.armor_class_label.is_empty() || self.crawler.danger_label.is_empty() {
            anyhow::bail!("crawler field labels must not be empty");
        }
        if self.crawler.next_page_indicator.is_empty() {
            anyhow::bail!("crawler.next_page_indicator must not be empty");
        }
        if self.crawler.request_timeout_seconds == 0 {
            anyhow::bail!("crawler.request_timeout_seconds must be greater than 0");
        }
        Ok(())
    }
}

/// Reads and writes the JSON configuration file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);
        Ok(config_dir)
    }

    /// Get application data directory
    pub fn get_app_data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .context("Failed to get user data directory")?
            .join(defaults::APP_DIR_NAME);
        Ok(data_dir)
    }

    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The saved configuration file, if one has been written
    pub fn existing_config_path(&self) -> Option<&Path> {
        self.config_path.exists().then_some(self.config_path.as_path())
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }
}

/// dnd.su bestiary constants
pub mod dnd_su {
    /// Base URL for resolving card links
    pub const BASE_URL: &str = "https://dnd.su";

    /// Search page without filters
    pub const SEARCH_BASE_URL: &str = "https://dnd.su/bestiary/?search=";

    /// Search URL shape: base search page followed by `&key=value` filters
    pub const SEARCH_URL_PATTERN: &str =
        r"^https://dnd\.su/bestiary/\?search=(&[\w\-%\[\]]+=[\w\-%]+)*$";

    pub const ARMOR_CLASS_LABEL: &str = "Класс Доспеха";

    pub const DANGER_LABEL: &str = "Опасность";

    pub const NEXT_PAGE_INDICATOR: &str = ">";
}

/// Default configuration values
pub mod defaults {
    pub const APP_DIR_NAME: &str = "bestiary-crawler";

    pub const CONFIG_FILE_NAME: &str = "bestiary_crawler_config.json";

    /// Environment variable prefix for layered configuration
    pub const ENV_PREFIX: &str = "BESTIARY";

    pub const COURTESY_DELAY_MS: u64 = 2000;

    pub const PAGE_CAP: u32 = 1000;

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const ARMOR_CLASS_PATTERN: &str = r"\d+";

    /// Fraction, integer, or the no-rating dash (U+2014)
    pub const DANGER_PATTERN: &str = r"\d+/\d+|\d+|\x{2014}";

    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    /// Maximum length of one rendered message chunk
    pub const MAX_MESSAGE_LENGTH: usize = 4000;

    pub const LOG_LEVEL: &str = "info";
}
