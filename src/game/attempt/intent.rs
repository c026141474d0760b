use crate::game::mvi::Intent;
use crate::game::view::Notice;

#[derive(Debug, Clone)]
pub enum AttemptIntent {
    /// A new prompt became current (or none is left). Clears per-word state;
    /// the streak carries over.
    Start { word: Option<String> },
    /// Push an accepted character onto the typed buffer.
    Append { ch: char },
    Backspace,
    /// Replace the whole typed buffer (submission games).
    SetInput { text: String },
    /// A wrong letter or a wrong submission.
    Mistake,
    /// A correct letter or word; extends the streak.
    Correct,
    RevealHint { hint: String },
    Notice(Notice),
    ClearNotice,
}

impl Intent for AttemptIntent {}
