//! Sort keys for crawl results.
//!
//! The comparators are independent and never chained. Sorting is stable, so
//! records with equal keys keep their crawl-discovery order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::monster::MonsterRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    DangerRating,
    ArmorClass,
}

impl SortKey {
    /// Identifier used by the chat front end's sort buttons.
    pub fn callback_id(self) -> &'static str {
        match self {
            Self::Title => "sort_by_title",
            Self::DangerRating => "sort_by_danger",
            Self::ArmorClass => "sort_by_ac",
        }
    }

    pub fn comparator(self) -> fn(&MonsterRecord, &MonsterRecord) -> Ordering {
        match self {
            Self::Title => by_title,
            Self::DangerRating => by_danger_rating,
            Self::ArmorClass => by_armor_class,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.callback_id())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sort_by_title" | "title" => Ok(Self::Title),
            "sort_by_danger" | "danger" => Ok(Self::DangerRating),
            "sort_by_ac" | "ac" | "armor" | "armor_class" => Ok(Self::ArmorClass),
            other => Err(format!("Unknown sort key '{other}'")),
        }
    }
}

/// Ordinal comparison of titles.
pub fn by_title(a: &MonsterRecord, b: &MonsterRecord) -> Ordering {
    a.title.cmp(&b.title)
}

pub fn by_danger_rating(a: &MonsterRecord, b: &MonsterRecord) -> Ordering {
    a.danger_rating.total_cmp(&b.danger_rating)
}

pub fn by_armor_class(a: &MonsterRecord, b: &MonsterRecord) -> Ordering {
    a.armor_class.cmp(&b.armor_class)
}

/// Stable, ascending sort by the given key.
pub fn sort_records(records: &mut [MonsterRecord], key: SortKey) {
    records.sort_by(key.comparator());
}
