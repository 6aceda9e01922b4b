//! Rendering crawl results for chat-sized messages

use crate::domain::monster::{DisplayLanguage, MonsterRecord};

const BLOCK_SEPARATOR: &str = "\n\n";

/// Render records as localized blocks separated by blank lines.
pub fn render_records(records: &[MonsterRecord], language: DisplayLanguage) -> String {
    records
        .iter()
        .map(|record| record.clone().with_language(language).to_string())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Split `text` into chunks of at most `max_length` characters.
///
/// A chunk ends at the last blank line inside the limit when there is one,
/// otherwise exactly at the limit. Leading whitespace of the remainder is
/// dropped; empty chunks are never produced.
pub fn split_message(text: &str, max_length: usize) -> Vec<String> {
    let max_length = max_length.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while let Some((limit, _)) = rest.char_indices().nth(max_length) {
        let split = match rest[..limit].rfind(BLOCK_SEPARATOR) {
            Some(position) if position > 0 => position,
            _ => limit,
        };
        chunks.push(rest[..split].to_string());
        rest = rest[split..].trim_start();
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::defaults::MAX_MESSAGE_LENGTH;

    fn badger() -> MonsterRecord {
        MonsterRecord::new(
            "Барсук [Badger]".to_string(),
            "https://dnd.su/bestiary/327-badger/".to_string(),
            10,
            0.125,
        )
    }

    #[test]
    fn renders_localized_blocks() {
        let records = vec![badger(), badger()];
        let text = render_records(&records, DisplayLanguage::Ru);
        let blocks: Vec<_> = text.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            "Название: Барсук [Badger]\nURL: https://dnd.su/bestiary/327-badger/\nКласс Доспеха: 10\nОпасность: 1/8"
        );
    }

    #[test]
    fn renders_nothing_for_no_records() {
        assert_eq!(render_records(&[], DisplayLanguage::En), "");
        assert!(split_message("", MAX_MESSAGE_LENGTH).is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_message("Hello", 5), vec!["Hello"]);
    }

    #[test]
    fn hard_split_without_blank_lines() {
        assert_eq!(split_message("Hello, World!", 5), vec!["Hello", ", Wor", "ld!"]);
    }

    #[test]
    fn prefers_blank_line_boundaries() {
        let text = "aaaa\n\nbbbb\n\ncccc";
        assert_eq!(split_message(text, 12), vec!["aaaa\n\nbbbb", "cccc"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let chunks = split_message("ЖЖЖЖЖЖ", 4);
        assert_eq!(chunks, vec!["ЖЖЖЖ", "ЖЖ"]);
    }

    #[test]
    fn chunks_respect_the_limit() {
        let records: Vec<_> = (0..200).map(|_| badger()).collect();
        let text = render_records(&records, DisplayLanguage::En);
        let chunks = split_message(&text, 500);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 500));
        assert!(chunks.iter().all(|c| c.starts_with("Title:")));
    }
}
