//! Practice words and text normalization.

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

/// A single practice word.
///
/// `text` is always trimmed and lowercased; it is only written through
/// [`WordItem::new`] and [`WordItem::set_text`]. Stored records are read back
/// through the repairing loader in `store::schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordItem {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
}

impl WordItem {
    /// Build a word from raw text. Returns `None` when the text is blank.
    pub fn new(text: &str) -> Option<Self> {
        let text = normalize_word(text);
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text,
            hint: None,
            sentence: None,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Blank input is rejected and leaves the word unchanged.
    pub fn set_text(&mut self, text: &str) -> bool {
        let text = normalize_word(text);
        if text.is_empty() {
            return false;
        }
        self.text = text;
        true
    }
}

/// Canonical stored form of a word: trimmed, lowercase.
pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split raw user input into practice words.
///
/// Splits on newlines and commas, trims, lowercases, drops empty entries and
/// later duplicates. First occurrence wins and order is preserved.
pub fn parse_words(raw: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for piece in raw.split(['\n', ',']) {
        let word = normalize_word(piece);
        if word.is_empty() || words.contains(&word) {
            continue;
        }
        words.push(word);
    }
    words
}

/// Canonical form used to compare a learner's submission with the target.
///
/// Applies NFKC, trims, case-folds and collapses internal whitespace runs.
pub fn normalize_submission(raw: &str) -> String {
    let composed: String = raw.nfkc().collect();
    composed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether `submission` spells `target` after normalization.
pub fn is_match(submission: &str, target: &str) -> bool {
    let target = normalize_submission(target);
    !target.is_empty() && normalize_submission(submission) == target
}

/// De-duplicate word items by text, keeping the first occurrence.
pub fn dedupe_items(items: Vec<WordItem>) -> Vec<WordItem> {
    let mut out: Vec<WordItem> = Vec::with_capacity(items.len());
    for item in items {
        if out.iter().any(|existing| existing.text == item.text) {
            continue;
        }
        out.push(item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_newlines_and_commas() {
        let words = parse_words("Cat, dog\nSUN,,\n  run  ");
        assert_eq!(words, vec!["cat", "dog", "sun", "run"]);
    }

    #[test]
    fn parse_drops_later_duplicates() {
        let words = parse_words("dog\ncat\nDog\ncat ");
        assert_eq!(words, vec!["dog", "cat"]);
    }

    #[test]
    fn parse_is_idempotent_on_simple_input() {
        let first = parse_words("b, a\nB\n\nc");
        let second = parse_words(&first.join("\n"));
        assert_eq!(first, second);
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse_words("").is_empty());
        assert!(parse_words(" , \n ,").is_empty());
    }

    #[test]
    fn submission_normalization_equivalence() {
        assert!(is_match("Cat ", "cat"));
        assert!(is_match("CAT", "cat"));
        assert!(is_match("cat", "cat"));
        assert!(!is_match("cats", "cat"));
    }

    #[test]
    fn submission_collapses_internal_whitespace() {
        assert_eq!(normalize_submission("  ice   \t cream "), "ice cream");
        assert!(is_match("ICE  CREAM", "ice cream"));
    }

    #[test]
    fn submission_applies_nfkc() {
        // Fullwidth letters compose to ASCII under NFKC.
        assert!(is_match("\u{FF43}\u{FF41}\u{FF54}", "cat"));
        // Decomposed e + combining acute matches the precomposed form.
        assert!(is_match("cafe\u{301}", "caf\u{e9}"));
    }

    #[test]
    fn blank_never_matches() {
        assert!(!is_match("", ""));
        assert!(!is_match("   ", "cat"));
    }

    #[test]
    fn word_item_normalizes_on_write() {
        let mut item = WordItem::new("  Apple ").unwrap();
        assert_eq!(item.text(), "apple");
        assert!(item.set_text("BANANA"));
        assert_eq!(item.text(), "banana");
        assert!(!item.set_text("   "));
        assert_eq!(item.text(), "banana");
        assert!(WordItem::new(" ").is_none());
    }

    #[test]
    fn dedupe_keeps_first() {
        let items = vec![
            WordItem::new("a").unwrap(),
            WordItem::new("b").unwrap(),
            WordItem::new("A").unwrap(),
        ];
        let texts: Vec<_> = dedupe_items(items)
            .iter()
            .map(|w| w.text().to_string())
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
