use crate::storage::SharedStorage;
use crate::words::{parse_words, WordItem};

use super::schema::{parse_lists, parse_settings};
use super::state::{now_millis, AppState, SettingsPatch, WordList, DEFAULT_LIST_NAME};

pub const KEY_LISTS: &str = "asgs.lists";
pub const KEY_CURRENT_LIST_ID: &str = "asgs.currentListId";
pub const KEY_SETTINGS: &str = "asgs.settings";

pub const SAMPLE_LIST_NAME: &str = "Sample List";
pub const SAMPLE_WORDS: [&str; 4] = ["cat", "dog", "run", "sun"];

/// Callback invoked with the new state after every change.
pub type Listener = Box<dyn Fn(&AppState) + Send + Sync>;

/// Handle returned by [`WordListStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single source of truth for word lists, the current list and settings.
pub struct WordListStore {
    state: AppState,
    storage: SharedStorage,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    id_source: fn() -> String,
}

fn new_list_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl WordListStore {
    /// Build the store from durable storage.
    ///
    /// Missing, unreadable or malformed records fall back to defaults; this
    /// never fails.
    pub fn load(storage: SharedStorage) -> Self {
        let state = load_state(&storage);
        Self::with_state(state, storage)
    }

    /// Build the store from an explicit initial snapshot.
    pub fn with_state(state: AppState, storage: SharedStorage) -> Self {
        Self {
            state,
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
            id_source: new_list_id,
        }
    }

    /// Replace the identifier source used for new lists.
    pub fn with_id_source(mut self, id_source: fn() -> String) -> Self {
        self.id_source = id_source;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_list(&self) -> Option<&WordList> {
        self.state.current_list()
    }

    /// Words of the current list, or nothing when no list is selected.
    pub fn words_for_play(&self) -> &[WordItem] {
        self.current_list()
            .map(|list| list.words.as_slice())
            .unwrap_or(&[])
    }

    /// Register a listener. It is called immediately with the current state
    /// and again after every change.
    pub fn subscribe(&mut self, listener: impl Fn(&AppState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        listener(&self.state);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Replace the current list's words, or create a new current list.
    pub fn upsert_word_list(&mut self, name: &str, raw_words: &str) {
        let words: Vec<WordItem> = parse_words(raw_words)
            .iter()
            .filter_map(|text| WordItem::new(text))
            .collect();
        let name = name.trim();
        let now = now_millis();

        let current_id = self.state.current_list_id.clone();
        match current_id.as_deref().and_then(|id| self.state.list_mut(id)) {
            Some(existing) => {
                existing.words = words;
                if !name.is_empty() {
                    existing.name = name.to_string();
                }
                existing.last_used_at = Some(now);
                tracing::info!(id = %existing.id, words = existing.words.len(), "Word list updated");
            }
            None => {
                let list = WordList {
                    id: (self.id_source)(),
                    name: if name.is_empty() {
                        DEFAULT_LIST_NAME.to_string()
                    } else {
                        name.to_string()
                    },
                    words,
                    created_at: now,
                    last_used_at: Some(now),
                };
                tracing::info!(id = %list.id, words = list.words.len(), "Word list created");
                self.state.current_list_id = Some(list.id.clone());
                self.state.lists.insert(0, list);
            }
        }

        self.commit();
    }

    /// Make `id` the current list.
    ///
    /// A no-op when it already is. Returns false for an unknown id.
    pub fn set_current_list_id(&mut self, id: &str) -> bool {
        if self.state.current_list_id.as_deref() == Some(id) {
            return true;
        }
        let Some(list) = self.state.list_mut(id) else {
            tracing::warn!(id, "Cannot select unknown word list");
            return false;
        };
        list.last_used_at = Some(now_millis());

        let old = self.state.current_list_id.replace(id.to_string());
        tracing::info!(old = ?old, new = %id, "Current word list switched");
        self.commit();
        true
    }

    /// Remove a list. Returns false if no list had that id.
    pub fn delete_list(&mut self, id: &str) -> bool {
        let before = self.state.lists.len();
        self.state.lists.retain(|list| list.id != id);
        if self.state.lists.len() == before {
            return false;
        }

        if self.state.current_list_id.as_deref() == Some(id) {
            self.state.current_list_id = self.state.lists.first().map(|list| list.id.clone());
        }
        tracing::info!(id, "Word list deleted");
        self.commit();
        true
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.state.settings.apply(patch);
        self.commit();
    }

    /// Create the starter list when there are no lists at all.
    pub fn ensure_default_list(&mut self) {
        if !self.state.lists.is_empty() {
            return;
        }
        let now = now_millis();
        let starter = WordList {
            id: (self.id_source)(),
            name: SAMPLE_LIST_NAME.to_string(),
            words: SAMPLE_WORDS.iter().filter_map(|w| WordItem::new(w)).collect(),
            created_at: now,
            last_used_at: Some(now),
        };
        self.state.current_list_id = Some(starter.id.clone());
        self.state.lists.push(starter);
        self.commit();
    }

    /// Write the full state to storage without notifying.
    pub fn save_state(&self) {
        let Some(storage) = &self.storage else {
            return;
        };

        let lists = match serde_json::to_string(&self.state.lists) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize word lists");
                return;
            }
        };
        let settings = match serde_json::to_string(&self.state.settings) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize settings");
                return;
            }
        };

        let result = storage
            .set(KEY_LISTS, &lists)
            .and_then(|_| match &self.state.current_list_id {
                Some(id) => storage.set(KEY_CURRENT_LIST_ID, id),
                None => storage.remove(KEY_CURRENT_LIST_ID),
            })
            .and_then(|_| storage.set(KEY_SETTINGS, &settings));

        if let Err(err) = result {
            tracing::warn!(error = %err, "Failed to persist state");
        }
    }

    fn commit(&self) {
        self.save_state();
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }
}

fn load_state(storage: &SharedStorage) -> AppState {
    let mut state = AppState::default();
    let Some(storage) = storage else {
        tracing::debug!("No storage available, starting in memory");
        return state;
    };

    match storage.get(KEY_LISTS) {
        Ok(Some(raw)) => match parse_lists(&raw) {
            Ok(lists) => state.lists = lists,
            Err(err) => tracing::warn!(error = %err, "Failed to parse stored word lists"),
        },
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "Failed to read stored word lists"),
    }

    match storage.get(KEY_SETTINGS) {
        Ok(Some(raw)) => match parse_settings(&raw) {
            Ok(settings) => state.settings = settings,
            Err(err) => tracing::warn!(error = %err, "Failed to parse stored settings"),
        },
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "Failed to read stored settings"),
    }

    match storage.get(KEY_CURRENT_LIST_ID) {
        Ok(Some(id)) => {
            let id = id.trim();
            if state.list(id).is_some() {
                state.current_list_id = Some(id.to_string());
            } else {
                tracing::warn!(id, "Stored current list no longer exists");
            }
        }
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "Failed to read current list id"),
    }

    state
}
