use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::Serialize;

use super::rewards::assign_rewards;

/// Resumable progress for one list within one game.
///
/// Each position of `words` is in exactly one of `words_pending` and
/// `words_done`; `current_word`, when set, is an element of `words_pending`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub(super) list_id: String,
    pub(super) words: Vec<String>,
    pub(super) words_pending: Vec<String>,
    pub(super) words_done: Vec<String>,
    pub(super) opened_box_indices: BTreeSet<usize>,
    pub(super) animal_by_box: BTreeMap<usize, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) current_word: Option<String>,
}

/// What happened when the current word was completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub word: String,
    /// Box opened for this word, if one was still closed.
    pub box_index: Option<usize>,
    /// Token behind that box.
    pub reward: Option<String>,
}

impl GameSession {
    /// Start a fresh session over `words` and pick the first prompt.
    pub fn create<R: Rng + ?Sized>(
        list_id: &str,
        words: &[String],
        reward_pool: &[String],
        rng: &mut R,
    ) -> Self {
        let mut session = Self {
            list_id: list_id.to_string(),
            words: words.to_vec(),
            words_pending: words.to_vec(),
            words_done: Vec::new(),
            opened_box_indices: BTreeSet::new(),
            animal_by_box: assign_rewards(words.len(), reward_pool, rng),
            current_word: None,
        };
        session.pick_next_word(rng);
        session
    }

    /// Choose the next prompt uniformly from the pending pool.
    ///
    /// Clears the current word when nothing is pending.
    pub fn pick_next_word<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&str> {
        if self.words_pending.is_empty() {
            self.current_word = None;
            return None;
        }
        let index = rng.gen_range(0..self.words_pending.len());
        self.current_word = Some(self.words_pending[index].clone());
        self.current_word.as_deref()
    }

    /// Move the current word from pending to done and open its box.
    ///
    /// Returns `None` when there is no current word.
    pub fn complete_current(&mut self) -> Option<Completion> {
        let word = self.current_word.take()?;
        if let Some(pos) = self.words_pending.iter().position(|w| *w == word) {
            self.words_pending.remove(pos);
        }
        self.words_done.push(word.clone());

        let box_index = self
            .words
            .iter()
            .enumerate()
            .position(|(i, w)| *w == word && !self.opened_box_indices.contains(&i));
        if let Some(index) = box_index {
            self.opened_box_indices.insert(index);
        }
        let reward = box_index.and_then(|i| self.animal_by_box.get(&i).cloned());

        Some(Completion {
            word,
            box_index,
            reward,
        })
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn words_pending(&self) -> &[String] {
        &self.words_pending
    }

    pub fn words_done(&self) -> &[String] {
        &self.words_done
    }

    pub fn opened_box_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.opened_box_indices.iter().copied()
    }

    pub fn is_box_open(&self, index: usize) -> bool {
        self.opened_box_indices.contains(&index)
    }

    pub fn reward_for_box(&self, index: usize) -> Option<&str> {
        self.animal_by_box.get(&index).map(String::as_str)
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    /// No words at all: nothing to practice.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every word has been completed. An empty session is never complete.
    pub fn is_complete(&self) -> bool {
        !self.words.is_empty() && self.words_done.len() == self.words.len()
    }

    /// `(done, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.words_done.len(), self.words.len())
    }
}
