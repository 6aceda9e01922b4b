//! Monster card extraction
//!
//! One card holds a title heading with a link and a parameter list. Items in
//! the list are attributed to a field only when their bold label matches one
//! of the configured labels exactly; their position in the list is irrelevant.

use scraper::ElementRef;
use tracing::{debug, warn};
use url::Url;

use super::config::{FieldRules, ParsingConfig};
use super::context::ParseContext;
use super::listing_page::ListingPage;
use super::ContextualParser;
use crate::domain::danger_rating::parse_danger_rating;
use crate::domain::monster::MonsterRecord;
use crate::infrastructure::parsing_error::{ExtractionError, FieldParseError, ParsingError};

/// Outcome of extracting a single card
pub type CardOutcome = Result<MonsterRecord, ExtractionError>;

/// The card fields the extractor knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ArmorClass,
    DangerRating,
}

impl FieldKind {
    /// Map a bold label to a field; unknown labels are ignored.
    pub fn classify(label: &str, rules: &FieldRules) -> Option<Self> {
        if label == rules.armor_class_label {
            Some(Self::ArmorClass)
        } else if label == rules.danger_label {
            Some(Self::DangerRating)
        } else {
            None
        }
    }

    /// First token of the item's text matching this field's pattern.
    pub fn capture(self, item_text: &str, rules: &FieldRules) -> Option<String> {
        let pattern = match self {
            Self::ArmorClass => &rules.armor_class_pattern,
            Self::DangerRating => &rules.danger_pattern,
        };
        pattern.find(item_text).map(|m| m.as_str().to_string())
    }
}

/// Raw field tokens found in a card's parameter list
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CardFields {
    armor_class: Option<String>,
    danger: Option<String>,
}

impl CardFields {
    fn slot(&mut self, kind: FieldKind) -> &mut Option<String> {
        match kind {
            FieldKind::ArmorClass => &mut self.armor_class,
            FieldKind::DangerRating => &mut self.danger,
        }
    }
}

/// Parser turning listing cards into monster records
pub struct MonsterCardParser<'c> {
    config: &'c ParsingConfig,
}

impl<'c> MonsterCardParser<'c> {
    pub fn new(config: &'c ParsingConfig) -> Self {
        Self { config }
    }

    /// Extract one record from one card.
    pub fn extract(&self, card: &ElementRef<'_>) -> CardOutcome {
        let selectors = &self.config.selectors;

        let title_element = card
            .select(&selectors.title)
            .next()
            .ok_or(ParsingError::MissingTitle)?;
        let title = title_element.text().map(str::trim).collect::<String>();
        if title.is_empty() {
            return Err(ParsingError::MissingTitle.into());
        }

        let href = title_element
            .select(&selectors.title_link)
            .next()
            .and_then(|link| link.value().attr("href"))
            .ok_or_else(|| ParsingError::MissingLink { title: title.clone() })?;
        let url = resolve_url(&self.config.base_url, href)?;

        let params = card
            .select(&selectors.params_list)
            .next()
            .ok_or_else(|| ParsingError::MissingParameterList { title: title.clone() })?;
        if params.select(&selectors.params_item).next().is_none() {
            return Err(ParsingError::EmptyParameterList { title }.into());
        }
        let fields = self.read_fields(&params, &title);

        let raw_armor_class = fields
            .armor_class
            .ok_or_else(|| FieldParseError::ArmorClassMissing { title: title.clone() })?;
        let armor_class = raw_armor_class.parse::<i32>().map_err(|_| {
            FieldParseError::ArmorClassNotInteger {
                title: title.clone(),
                raw: raw_armor_class.clone(),
            }
        })?;
        let danger_rating = parse_danger_rating(fields.danger.as_deref());

        debug!("armor class = {}, danger = {} for '{}'", armor_class, danger_rating, title);
        Ok(MonsterRecord::new(title, url, armor_class, danger_rating))
    }

    fn read_fields(&self, params: &ElementRef<'_>, title: &str) -> CardFields {
        let selectors = &self.config.selectors;
        let rules = &self.config.fields;
        let mut fields = CardFields::default();

        for item in params.select(&selectors.params_item) {
            let Some(label) = item.select(&selectors.params_label).next() else {
                continue;
            };
            let label = label.text().collect::<String>();
            let Some(kind) = FieldKind::classify(&label, rules) else {
                continue;
            };

            let slot = fields.slot(kind);
            if slot.is_some() {
                continue;
            }

            let text = item.text().collect::<String>();
            match kind.capture(&text, rules) {
                Some(token) => *slot = Some(token),
                None => warn!("{} - no value matched in '{}' of '{}'", label, text.trim(), title),
            }
        }

        fields
    }
}

impl ContextualParser for MonsterCardParser<'_> {
    type Output = Vec<CardOutcome>;

    /// Extract every card on the page, one outcome per card in page order.
    fn parse_with_context(&self, page: &ListingPage<'_>, context: &ParseContext) -> Self::Output {
        let outcomes: Vec<CardOutcome> = page.cards().map(|card| self.extract(&card)).collect();
        debug!(
            "Extracted {} cards from page {} ({})",
            outcomes.len(),
            context.page_number,
            context.page_url
        );
        outcomes
    }
}

fn resolve_url(base_url: &Url, href: &str) -> Result<String, ParsingError> {
    base_url
        .join(href.trim())
        .map(String::from)
        .map_err(|e| ParsingError::UrlResolutionFailed {
            url: href.to_string(),
            reason: format!("Failed to join URL: {e}"),
            base_url: Some(base_url.to_string()),
        })
}
