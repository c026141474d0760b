//! Word List Store: saved lists, the active list and user settings.
//!
//! The store is an explicit context object owned by the application shell.
//! Every mutation persists through the injected storage (best effort) and then
//! notifies subscribers with the new state.

mod schema;
mod state;
mod word_lists;

pub use schema::{parse_lists, parse_settings};
pub use state::{now_millis, AppState, Settings, SettingsPatch, WordList, DEFAULT_LIST_NAME};
pub use word_lists::{
    Listener, SubscriptionId, WordListStore, KEY_CURRENT_LIST_ID, KEY_LISTS, KEY_SETTINGS,
    SAMPLE_LIST_NAME, SAMPLE_WORDS,
};
