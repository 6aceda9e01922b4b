//! Infrastructure layer: configuration, logging, HTTP sessions and HTML parsing

pub mod config;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod simple_http_client;

pub use self::config::{AppConfig, ConfigManager, CrawlerConfig, LoggingConfig, PageSelectors};
pub use logging::{get_log_directory, init_logging_with_config};
pub use parsing::{ListingPage, MonsterCardParser, PaginationState, ParsingConfig};
pub use parsing_error::{
    ExtractionError, FieldParseError, ParsingError, ParsingResult, TransportError,
};
pub use simple_http_client::{HttpClient, HttpClientConfig, HttpSessionFactory};
