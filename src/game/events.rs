//! Typed notifications emitted by the tracker.
//!
//! Handlers run synchronously, in registration order, right after the state
//! change they describe.

use crate::game::view::Notice;
use crate::scoring::RoundResult;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The prompt should be spoken.
    PromptRequested { word: String, rate: f32 },
    /// A keystroke matched the next letter.
    LetterCorrect {
        letter: char,
        position: usize,
        streak: u32,
        milestone: Option<u32>,
        /// The word is now fully typed.
        completed: bool,
    },
    /// A keystroke did not match the next letter.
    LetterWrong {
        expected: char,
        got: char,
        mistakes_for_word: u32,
    },
    /// A submitted answer did not match.
    SubmissionWrong {
        submitted: String,
        mistakes_for_word: u32,
    },
    WordComplete {
        word: String,
        box_index: Option<usize>,
        reward: Option<String>,
        streak: u32,
        milestone: Option<u32>,
        bonus: bool,
    },
    /// A new prompt became current, or `None` when the pool is exhausted.
    WordChanged { word: Option<String> },
    HintRevealed { hint: String },
    Notice(Notice),
    RoundComplete { result: RoundResult },
}

pub type EventHandler = Box<dyn FnMut(&GameEvent) + Send>;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(HandlerId, EventHandler)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + Send + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, event: GameEvent) {
        tracing::trace!(?event, "Game event");
        for (_, handler) in &mut self.handlers {
            handler(&event);
        }
    }
}
