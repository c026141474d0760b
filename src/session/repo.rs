//! Session persistence, keyed by game and list id.
//!
//! Loading validates the stored record field by field. A record that cannot
//! be read, or that was built for a different word sequence, is discarded
//! and a fresh session takes its place. Nothing here returns an error.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde_json::Value;

use super::rewards::backfill_rewards;
use super::state::GameSession;
use crate::storage::SharedStorage;

/// Why a fresh session was created instead of resuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshReason {
    /// Nothing stored (or no storage at all).
    Missing,
    /// Stored record was unreadable or had the wrong shape.
    Malformed,
    /// Stored word sequence differs positionally from the current list.
    WordsChanged,
}

/// How [`SessionStore::load_or_create`] obtained its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    Resumed,
    Fresh(FreshReason),
}

/// Reads and writes sessions under `{prefix}:{list_id}`.
#[derive(Clone)]
pub struct SessionStore {
    storage: SharedStorage,
    prefix: String,
}

impl SessionStore {
    pub fn new(storage: SharedStorage, prefix: &str) -> Self {
        Self {
            storage,
            prefix: prefix.to_string(),
        }
    }

    pub fn key(&self, list_id: &str) -> String {
        format!("{}:{}", self.prefix, list_id)
    }

    /// Resume the stored session for `list_id` if it was built for exactly
    /// `words`, otherwise start a new one. The result is persisted.
    pub fn load_or_create<R: Rng + ?Sized>(
        &self,
        list_id: &str,
        words: &[String],
        reward_pool: &[String],
        rng: &mut R,
    ) -> (GameSession, SessionOrigin) {
        let reason = match self.read_raw(list_id) {
            None => FreshReason::Missing,
            Some(raw) => match restore(list_id, &raw, words, reward_pool, rng) {
                Ok(session) => {
                    self.save(&session);
                    tracing::info!(
                        list_id,
                        done = session.words_done().len(),
                        total = session.words().len(),
                        "Resumed game session"
                    );
                    return (session, SessionOrigin::Resumed);
                }
                Err(reason) => reason,
            },
        };

        tracing::info!(list_id, ?reason, "Starting new game session");
        let session = GameSession::create(list_id, words, reward_pool, rng);
        self.save(&session);
        (session, SessionOrigin::Fresh(reason))
    }

    /// Persist a session. Failures are logged and otherwise ignored.
    pub fn save(&self, session: &GameSession) {
        let Some(storage) = &self.storage else {
            return;
        };
        let json = match serde_json::to_string(session) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "Unable to serialize game session");
                return;
            }
        };
        if let Err(err) = storage.set(&self.key(session.list_id()), &json) {
            tracing::warn!(error = %err, "Unable to save game session");
        }
    }

    /// Forget the stored session for `list_id`.
    pub fn clear(&self, list_id: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(err) = storage.remove(&self.key(list_id)) {
            tracing::warn!(error = %err, "Unable to clear game session");
        }
    }

    fn read_raw(&self, list_id: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get(&self.key(list_id)) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "Unable to load game session");
                None
            }
        }
    }
}

/// Rebuild a session from its stored JSON, repairing what can be repaired.
fn restore<R: Rng + ?Sized>(
    list_id: &str,
    raw: &str,
    words: &[String],
    reward_pool: &[String],
    rng: &mut R,
) -> Result<GameSession, FreshReason> {
    let value: Value = serde_json::from_str(raw).map_err(|err| {
        tracing::warn!(error = %err, "Stored game session is not valid JSON");
        FreshReason::Malformed
    })?;
    let map = value.as_object().ok_or(FreshReason::Malformed)?;

    let stored_words = string_array(map.get("words")).ok_or(FreshReason::Malformed)?;
    let stored_pending = string_array(map.get("wordsPending")).ok_or(FreshReason::Malformed)?;
    if stored_words != words {
        return Err(FreshReason::WordsChanged);
    }

    let mut done: Vec<String> = Vec::new();
    for word in string_array(map.get("wordsDone")).unwrap_or_default() {
        if words.contains(&word) && !done.contains(&word) {
            done.push(word);
        }
    }

    let mut pending: Vec<String> = Vec::new();
    for word in stored_pending.into_iter().chain(words.iter().cloned()) {
        if words.contains(&word) && !done.contains(&word) && !pending.contains(&word) {
            pending.push(word);
        }
    }

    let opened: BTreeSet<usize> = match map.get("openedBoxIndices") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(box_index)
            .filter(|index| *index < words.len())
            .collect(),
        _ => BTreeSet::new(),
    };

    let mut animal_by_box: BTreeMap<usize, String> = BTreeMap::new();
    if let Some(Value::Object(entries)) = map.get("animalByBox") {
        for (key, token) in entries {
            let (Ok(index), Some(token)) = (key.trim().parse::<usize>(), token.as_str()) else {
                continue;
            };
            if index < words.len() {
                animal_by_box.insert(index, token.to_string());
            }
        }
    }
    let filled = backfill_rewards(&mut animal_by_box, words.len(), reward_pool, rng);
    if filled > 0 {
        tracing::debug!(filled, "Backfilled missing box rewards");
    }

    let current_word = map
        .get("currentWord")
        .and_then(Value::as_str)
        .filter(|word| pending.iter().any(|p| p == word))
        .map(str::to_string);

    let mut session = GameSession {
        list_id: list_id.to_string(),
        words: words.to_vec(),
        words_pending: pending,
        words_done: done,
        opened_box_indices: opened,
        animal_by_box,
        current_word,
    };
    if session.current_word.is_none() {
        session.pick_next_word(rng);
    }
    Ok(session)
}

fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}

fn box_index(value: &Value) -> Option<usize> {
    if let Some(index) = value.as_u64() {
        return usize::try_from(index).ok();
    }
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as usize),
        _ => None,
    }
}
