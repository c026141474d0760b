//! Repairing loaders for persisted store records.
//!
//! Stored blobs are never trusted: each field is type-checked on its own and
//! anything unexpected is dropped or replaced by a default, so an older or
//! hand-edited record still loads.

use serde_json::{Map, Value};

use super::state::{Settings, WordList, DEFAULT_LIST_NAME};
use crate::words::{dedupe_items, WordItem};

/// Parse the `lists` record.
///
/// Fails only when the text is not JSON at all. A JSON value of the wrong
/// shape yields no lists.
pub fn parse_lists(raw: &str) -> Result<Vec<WordList>, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(entries) = value else {
        tracing::warn!("Stored word lists are not an array, ignoring");
        return Ok(Vec::new());
    };

    let mut lists: Vec<WordList> = Vec::with_capacity(entries.len());
    for entry in &entries {
        let Some(list) = word_list_from_value(entry) else {
            tracing::warn!("Dropping malformed stored word list");
            continue;
        };
        if lists.iter().any(|existing| existing.id == list.id) {
            tracing::warn!(id = %list.id, "Dropping duplicate stored word list");
            continue;
        }
        lists.push(list);
    }
    Ok(lists)
}

/// Parse the `settings` record, back-filling defaults for missing or
/// mistyped fields.
pub fn parse_settings(raw: &str) -> Result<Settings, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    let mut settings = Settings::default();
    let Value::Object(map) = value else {
        tracing::warn!("Stored settings are not an object, using defaults");
        return Ok(settings);
    };

    if let Some(voice) = map.get("voiceId").and_then(Value::as_str) {
        settings.voice_id = Some(voice.to_string());
    }
    if let Some(rate) = map.get("ttsRate").and_then(Value::as_f64) {
        let rate = rate as f32;
        if rate.is_finite() && rate > 0.0 {
            settings.tts_rate = rate;
        }
    }
    settings.show_hints = bool_field(&map, "showHints", settings.show_hints);
    settings.dyslexic_font = bool_field(&map, "dyslexicFont", settings.dyslexic_font);
    settings.sfx = bool_field(&map, "sfx", settings.sfx);
    Ok(settings)
}

fn bool_field(map: &Map<String, Value>, key: &str, default: bool) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn word_list_from_value(value: &Value) -> Option<WordList> {
    let map = value.as_object()?;
    let id = map.get("id").and_then(Value::as_str)?.to_string();
    if id.is_empty() {
        return None;
    }

    let name = map
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_LIST_NAME)
        .to_string();

    let words = match map.get("words") {
        Some(Value::Array(items)) => dedupe_items(items.iter().filter_map(word_from_value).collect()),
        _ => Vec::new(),
    };

    Some(WordList {
        id,
        name,
        words,
        created_at: timestamp(map.get("createdAt")).unwrap_or(0),
        last_used_at: timestamp(map.get("lastUsedAt")),
    })
}

/// Accepts `{ "text": .., "hint"?: .., "sentence"?: .. }` or a bare string.
fn word_from_value(value: &Value) -> Option<WordItem> {
    match value {
        Value::String(text) => WordItem::new(text),
        Value::Object(map) => {
            let mut item = WordItem::new(map.get("text").and_then(Value::as_str)?)?;
            item.hint = map.get("hint").and_then(Value::as_str).map(str::to_string);
            item.sentence = map
                .get("sentence")
                .and_then(Value::as_str)
                .map(str::to_string);
            Some(item)
        }
        _ => None,
    }
}

fn timestamp(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    if let Some(ms) = value.as_i64() {
        return Some(ms);
    }
    value
        .as_f64()
        .filter(|ms| ms.is_finite())
        .map(|ms| ms as i64)
}
