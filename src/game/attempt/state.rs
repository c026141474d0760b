use crate::game::mvi::MviState;
use crate::game::view::Notice;

/// Input state for the prompt being attempted, plus the running streak.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttemptState {
    pub word: Option<String>,
    pub typed: String,
    /// Wrong attempts on the current word. Reset on every word change.
    pub mistakes_for_word: u32,
    /// Wrong attempts across the whole run.
    pub total_mistakes: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub hint: Option<String>,
    pub notice: Option<Notice>,
}

impl MviState for AttemptState {}

impl AttemptState {
    /// Number of characters typed so far.
    pub fn typed_len(&self) -> usize {
        self.typed.chars().count()
    }

    /// The character the learner should type next, if any.
    pub fn expected_next(&self) -> Option<char> {
        self.word.as_deref()?.chars().nth(self.typed_len())
    }

    /// Leading characters of `typed` that spell the start of the word.
    pub fn correct_prefix_len(&self) -> usize {
        let Some(word) = self.word.as_deref() else {
            return 0;
        };
        self.typed
            .chars()
            .zip(word.chars())
            .take_while(|(typed, expected)| same_letter(*typed, *expected))
            .count()
    }
}

/// Case-insensitive letter comparison.
pub fn same_letter(typed: char, expected: char) -> bool {
    typed.to_lowercase().eq(expected.to_lowercase())
}
