//! Monster record extracted from a bestiary listing card.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language used when a record is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLanguage {
    #[default]
    En,
    Ru,
}

impl DisplayLanguage {
    /// Field captions used in rendered records.
    pub fn labels(self) -> FieldLabels {
        match self {
            Self::En => FieldLabels {
                title: "Title",
                url: "URL",
                armor_class: "Armor Class",
                danger: "Danger",
            },
            Self::Ru => FieldLabels {
                title: "Название",
                url: "URL",
                armor_class: "Класс Доспеха",
                danger: "Опасность",
            },
        }
    }
}

impl FromStr for DisplayLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            other => Err(format!("Unsupported language '{other}' (expected 'en' or 'ru')")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLabels {
    pub title: &'static str,
    pub url: &'static str,
    pub armor_class: &'static str,
    pub danger: &'static str,
}

/// One creature entry.
///
/// Equality ignores `language`, which only affects rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub title: String,
    pub url: String,
    pub armor_class: i32,
    pub danger_rating: f64,
    #[serde(default)]
    pub language: DisplayLanguage,
}

impl MonsterRecord {
    pub fn new(title: String, url: String, armor_class: i32, danger_rating: f64) -> Self {
        Self {
            title,
            url,
            armor_class,
            danger_rating,
            language: DisplayLanguage::default(),
        }
    }

    pub fn with_language(mut self, language: DisplayLanguage) -> Self {
        self.language = language;
        self
    }

    /// Danger rating the way the site prints it (`1/8`, `1/4`, `1/2`, `3`).
    pub fn danger_display(&self) -> String {
        format_danger(self.danger_rating)
    }
}

impl PartialEq for MonsterRecord {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.url == other.url
            && self.armor_class == other.armor_class
            && self.danger_rating.to_bits() == other.danger_rating.to_bits()
    }
}

impl fmt::Display for MonsterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.language.labels();
        write!(
            f,
            "{}: {}\n{}: {}\n{}: {}\n{}: {}",
            labels.title,
            self.title,
            labels.url,
            self.url,
            labels.armor_class,
            self.armor_class,
            labels.danger,
            self.danger_display(),
        )
    }
}

const FRACTIONAL_RATINGS: [(f64, &str); 3] = [(0.125, "1/8"), (0.25, "1/4"), (0.5, "1/2")];

fn format_danger(rating: f64) -> String {
    FRACTIONAL_RATINGS
        .iter()
        .find(|(value, _)| (rating - value).abs() < f64::EPSILON)
        .map_or_else(|| format!("{rating:.0}"), |(_, text)| (*text).to_string())
}
