//! Read-only projection of the tracker for presentation layers.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeTone {
    Success,
    Error,
    Info,
}

/// Short feedback message shown next to the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub tone: NoticeTone,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            tone: NoticeTone::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            tone: NoticeTone::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            tone: NoticeTone::Info,
            message: message.into(),
        }
    }
}

/// Everything a front end needs to draw the prompt area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptView {
    /// Current word with untyped letters hidden, e.g. `C A _`.
    pub masked: String,
    pub typed: String,
    pub progress_done: usize,
    pub progress_total: usize,
    pub notice: Option<Notice>,
    pub hint: Option<String>,
    pub last_reward: Option<String>,
    pub streak: u32,
    pub complete: bool,
    pub empty: bool,
}

/// Show typed letters in upper case and the rest as underscores.
pub fn mask_word(word: &str, typed_len: usize) -> String {
    word.chars()
        .enumerate()
        .map(|(i, ch)| {
            if ch == ' ' {
                " ".to_string()
            } else if i < typed_len {
                ch.to_uppercase().to_string()
            } else {
                "_".to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
