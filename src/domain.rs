//! Domain module - core types and pure rules
//!
//! - `monster`: the extracted record and its rendering
//! - `danger_rating`: fraction/sentinel normalization
//! - `armor_range`: inclusive, order-insensitive armor class filter
//! - `sorting`: stable sort keys
//! - `pagination`: per-crawl cursor

pub mod armor_range;
pub mod danger_rating;
pub mod monster;
pub mod pagination;
pub mod services;
pub mod sorting;

pub use armor_range::{in_range, ArmorClassRange, ArmorRangeParseError};
pub use danger_rating::parse_danger_rating;
pub use monster::{DisplayLanguage, FieldLabels, MonsterRecord};
pub use pagination::page_url;
pub use services::{PageFetcher, SessionFactory};
pub use sorting::{by_armor_class, by_danger_rating, by_title, sort_records, SortKey};
