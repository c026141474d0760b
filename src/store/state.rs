use serde::Serialize;

use crate::words::WordItem;

/// Name given to a new list created without one.
pub const DEFAULT_LIST_NAME: &str = "My Word List";

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A named, ordered, de-duplicated collection of practice words.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordList {
    pub id: String,
    pub name: String,
    pub words: Vec<WordItem>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<i64>,
}

impl WordList {
    /// Word texts in list order.
    pub fn texts(&self) -> Vec<String> {
        self.words.iter().map(|w| w.text().to_string()).collect()
    }
}

/// Process-wide user preferences.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    pub tts_rate: f32,
    pub show_hints: bool,
    pub dyslexic_font: bool,
    pub sfx: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            voice_id: None,
            tts_rate: 1.0,
            show_hints: true,
            dyslexic_font: false,
            sfx: true,
        }
    }
}

/// Partial settings update; `None` fields are left untouched.
///
/// `voice_id: Some(None)` clears the voice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub voice_id: Option<Option<String>>,
    pub tts_rate: Option<f32>,
    pub show_hints: Option<bool>,
    pub dyslexic_font: Option<bool>,
    pub sfx: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Settings {
    /// Shallow-merge a patch. A non-finite or non-positive rate is ignored.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(voice_id) = patch.voice_id {
            self.voice_id = voice_id;
        }
        if let Some(rate) = patch.tts_rate {
            if rate.is_finite() && rate > 0.0 {
                self.tts_rate = rate;
            } else {
                tracing::warn!(rate, "Ignoring invalid speech rate");
            }
        }
        if let Some(show_hints) = patch.show_hints {
            self.show_hints = show_hints;
        }
        if let Some(dyslexic_font) = patch.dyslexic_font {
            self.dyslexic_font = dyslexic_font;
        }
        if let Some(sfx) = patch.sfx {
            self.sfx = sfx;
        }
    }
}

/// Everything the store owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub lists: Vec<WordList>,
    pub current_list_id: Option<String>,
    pub settings: Settings,
}

impl AppState {
    pub fn current_list(&self) -> Option<&WordList> {
        let id = self.current_list_id.as_deref()?;
        self.lists.iter().find(|list| list.id == id)
    }

    pub fn list(&self, id: &str) -> Option<&WordList> {
        self.lists.iter().find(|list| list.id == id)
    }

    pub(crate) fn list_mut(&mut self, id: &str) -> Option<&mut WordList> {
        self.lists.iter_mut().find(|list| list.id == id)
    }
}
