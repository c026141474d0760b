//! Drives one game over one word list.
//!
//! The tracker owns the persisted [`GameSession`], the learner's
//! [`AttemptState`] and the [`Scheduler`]. Input goes through `append`,
//! `backspace`, `set_input` and `submit`; time-based follow-ups (prompt
//! replays, moving on to the next word) run from [`Tracker::tick`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::{SilentSfx, SilentSpeech, SoundCue, SoundEffects, Speech, SpeechOptions};
use crate::game::attempt::{same_letter, AttemptIntent, AttemptReducer, AttemptState};
use crate::game::clock::{Clock, SystemClock};
use crate::game::events::{EventBus, GameEvent, HandlerId};
use crate::game::mvi::Reducer;
use crate::game::policy::{GameKind, GamePolicy, HintStep, InputMode};
use crate::game::scheduler::{ScheduledAction, Scheduler};
use crate::game::view::{mask_word, Notice, PromptView};
use crate::scoring::RoundResult;
use crate::session::{all_animals, FreshReason, GameSession, SessionOrigin, SessionStore};
use crate::storage::SharedStorage;
use crate::store::Settings;
use crate::words::{is_match, normalize_submission, WordItem};

const EMPTY_LIST_NOTICE: &str = "Add words first!";
const EMPTY_INPUT_NOTICE: &str = "Type the word first";
const MISTAKE_NOTICE: &str = "Try again!";

/// What a single input call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// No word to work on, or the input was not usable.
    Ignored,
    /// Input recorded; the word is not finished yet.
    Accepted,
    /// Blank submission.
    Empty,
    Mistake,
    WordComplete,
}

/// Everything a tracker needs besides storage and the word list.
pub struct TrackerOptions {
    pub game: GameKind,
    pub policy: GamePolicy,
    pub settings: Settings,
    /// Multiplier applied to the learner's speech rate for slowed prompts.
    pub slow_rate: f32,
    pub speech: Arc<dyn Speech>,
    pub sfx: Arc<dyn SoundEffects>,
    pub clock: Arc<dyn Clock>,
    /// Fixed seed for word order and reward assignment.
    pub seed: Option<u64>,
    pub reward_pool: Vec<String>,
}

impl TrackerOptions {
    /// Built-in rules for `game`, silent outputs and the wall clock.
    pub fn new(game: GameKind) -> Self {
        Self {
            game,
            policy: game.policy(),
            settings: Settings::default(),
            slow_rate: 0.8,
            speech: Arc::new(SilentSpeech),
            sfx: Arc::new(SilentSfx),
            clock: Arc::new(SystemClock),
            seed: None,
            reward_pool: all_animals(),
        }
    }

    pub fn with_policy(mut self, policy: GamePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_slow_rate(mut self, slow_rate: f32) -> Self {
        self.slow_rate = slow_rate;
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn Speech>) -> Self {
        self.speech = speech;
        self
    }

    pub fn with_sfx(mut self, sfx: Arc<dyn SoundEffects>) -> Self {
        self.sfx = sfx;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_reward_pool(mut self, pool: Vec<String>) -> Self {
        self.reward_pool = pool;
        self
    }
}

pub struct Tracker {
    game: GameKind,
    policy: GamePolicy,
    settings: Settings,
    slow_rate: f32,
    speech: Arc<dyn Speech>,
    sfx: Arc<dyn SoundEffects>,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    reward_pool: Vec<String>,
    sessions: SessionStore,
    session: GameSession,
    origin: SessionOrigin,
    /// Custom hints from the word list, keyed by word text.
    hints: HashMap<String, String>,
    attempt: AttemptState,
    scheduler: Scheduler,
    events: EventBus,
    completed_this_run: u32,
    last_reward: Option<String>,
    started_at: Instant,
    finished: bool,
}

impl Tracker {
    /// Resume or create the session for `list_id`. Nothing is spoken or
    /// emitted until [`Tracker::begin`].
    pub fn start(
        options: TrackerOptions,
        storage: SharedStorage,
        list_id: &str,
        words: &[WordItem],
    ) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let texts: Vec<String> = words.iter().map(|item| item.text().to_string()).collect();
        let hints: HashMap<String, String> = words
            .iter()
            .filter_map(|item| {
                let hint = item.hint.as_deref()?.trim();
                (!hint.is_empty()).then(|| (item.text().to_string(), hint.to_string()))
            })
            .collect();

        let sessions = SessionStore::new(storage, options.game.key());
        let (session, origin) =
            sessions.load_or_create(list_id, &texts, &options.reward_pool, &mut rng);
        let attempt = AttemptReducer::reduce(
            AttemptState::default(),
            AttemptIntent::Start {
                word: session.current_word().map(str::to_string),
            },
        );

        tracing::info!(
            game = options.game.key(),
            list_id,
            words = texts.len(),
            ?origin,
            "Game started"
        );

        Self {
            game: options.game,
            policy: options.policy,
            settings: options.settings,
            slow_rate: options.slow_rate,
            speech: options.speech,
            sfx: options.sfx,
            started_at: options.clock.now(),
            clock: options.clock,
            rng,
            reward_pool: options.reward_pool,
            sessions,
            session,
            origin,
            hints,
            attempt,
            scheduler: Scheduler::new(),
            events: EventBus::new(),
            completed_this_run: 0,
            last_reward: None,
            finished: false,
        }
    }

    /// Announce the current prompt, or report an empty or finished list.
    pub fn begin(&mut self) {
        if self.session.is_empty() {
            self.notify(Notice::info(EMPTY_LIST_NOTICE));
            return;
        }
        if self.session.is_complete() {
            self.finish_round();
            return;
        }
        let word = self.session.current_word().map(str::to_string);
        self.events.emit(GameEvent::WordChanged { word: word.clone() });
        if let Some(word) = word {
            self.speak_prompt(&word, self.settings.tts_rate);
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + Send + 'static) -> HandlerId {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// One keystroke.
    ///
    /// Letter games check it against the next expected letter; submission
    /// games add it to the answer buffer.
    pub fn append(&mut self, ch: char) -> InputOutcome {
        let Some(word) = self.session.current_word().map(str::to_string) else {
            return InputOutcome::Ignored;
        };
        if ch.is_control() {
            return InputOutcome::Ignored;
        }
        if self.policy.input == InputMode::Submit {
            dispatch_mvi!(self, attempt, AttemptReducer, AttemptIntent::Append { ch });
            return InputOutcome::Accepted;
        }

        // Letters only build on the correctly spelled start of the word.
        let prefix_len = self.attempt.correct_prefix_len();
        if prefix_len < self.attempt.typed_len() {
            dispatch_mvi!(
                self,
                attempt,
                AttemptReducer,
                AttemptIntent::SetInput {
                    text: word.chars().take(prefix_len).collect()
                }
            );
        }

        let Some(expected) = self.attempt.expected_next() else {
            return InputOutcome::Ignored;
        };
        if !same_letter(ch, expected) {
            dispatch_mvi!(self, attempt, AttemptReducer, AttemptIntent::Mistake);
            let mistakes_for_word = self.attempt.mistakes_for_word;
            tracing::debug!(%expected, got = %ch, mistakes_for_word, "Wrong letter");
            self.events.emit(GameEvent::LetterWrong {
                expected,
                got: ch,
                mistakes_for_word,
            });
            self.after_mistake(&word);
            return InputOutcome::Mistake;
        }

        let position = self.attempt.typed_len();
        let streak_before = self.attempt.streak;
        dispatch_mvi!(self, attempt, AttemptReducer, AttemptIntent::Append { ch: expected });
        dispatch_mvi!(self, attempt, AttemptReducer, AttemptIntent::Correct);
        dispatch_mvi!(self, attempt, AttemptReducer, AttemptIntent::ClearNotice);

        let streak = self.attempt.streak;
        let completed = is_match(&self.attempt.typed, &word);
        self.events.emit(GameEvent::LetterCorrect {
            letter: expected,
            position,
            streak,
            milestone: self.policy.rewards.milestone(streak),
            completed,
        });

        if completed {
            self.complete_word(streak_before);
            InputOutcome::WordComplete
        } else {
            InputOutcome::Accepted
        }
    }

    pub fn backspace(&mut self) -> InputOutcome {
        if self.session.current_word().is_none() || self.attempt.typed.is_empty() {
            return InputOutcome::Ignored;
        }
        dispatch_mvi!(self, attempt, AttemptReducer, AttemptIntent::Backspace);
        InputOutcome::Accepted
    }

    /// Replace the answer buffer.
    ///
    /// In letter games this is a whole-word draft for [`Tracker::submit`];
    /// only its correctly spelled start counts toward letter input.
    pub fn set_input(&mut self, text: &str) -> InputOutcome {
        if self.session.current_word().is_none() {
            return InputOutcome::Ignored;
        }
        dispatch_mvi!(
            self,
            attempt,
            AttemptReducer,
            AttemptIntent::SetInput {
                text: text.to_string()
            }
        );
        InputOutcome::Accepted
    }

    /// Check the answer buffer against the current word.
    pub fn submit(&mut self) -> InputOutcome {
        let Some(word) = self.session.current_word().map(str::to_string) else {
            return InputOutcome::Ignored;
        };
        let submitted = self.attempt.typed.clone();
        if normalize_submission(&submitted).is_empty() {
            self.notify(Notice::info(EMPTY_INPUT_NOTICE));
            return InputOutcome::Empty;
        }

        if is_match(&submitted, &word) {
            let streak_before = self.attempt.streak;
            if self.policy.input == InputMode::Submit {
                dispatch_mvi!(self, attempt, AttemptReducer, AttemptIntent::Correct);
            }
            self.complete_word(streak_before);
            return InputOutcome::WordComplete;
        }

        dispatch_mvi!(self, attempt, AttemptReducer, AttemptIntent::Mistake);
        if self.policy.input == InputMode::Letters {
            dispatch_mvi!(
                self,
                attempt,
                AttemptReducer,
                AttemptIntent::SetInput {
                    text: String::new()
                }
            );
        }
        let mistakes_for_word = self.attempt.mistakes_for_word;
        tracing::debug!(mistakes_for_word, "Wrong submission");
        self.events.emit(GameEvent::SubmissionWrong {
            submitted,
            mistakes_for_word,
        });
        self.after_mistake(&word);
        InputOutcome::Mistake
    }

    /// Speak the current prompt again at the normal rate.
    pub fn replay_audio(&mut self) {
        if let Some(word) = self.session.current_word().map(str::to_string) {
            self.speak_prompt(&word, self.settings.tts_rate);
        }
    }

    /// Throw away progress on this list and start the round over.
    pub fn replay(&mut self) {
        self.scheduler.cancel_all();
        self.speech.cancel();

        let list_id = self.session.list_id().to_string();
        let words = self.session.words().to_vec();
        self.sessions.clear(&list_id);
        self.session = GameSession::create(&list_id, &words, &self.reward_pool, &mut self.rng);
        self.sessions.save(&self.session);
        self.origin = SessionOrigin::Fresh(FreshReason::Missing);

        self.attempt = AttemptState::default();
        dispatch_mvi!(
            self,
            attempt,
            AttemptReducer,
            AttemptIntent::Start {
                word: self.session.current_word().map(str::to_string)
            }
        );
        self.completed_this_run = 0;
        self.last_reward = None;
        self.finished = false;
        self.started_at = self.clock.now();

        tracing::info!(game = self.game.key(), list_id, "Round restarted");
        self.begin();
    }

    /// Run every scheduled action that is due. Returns how many ran.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let mut ran = 0;
        for task in self.scheduler.take_due(now) {
            match task.action {
                ScheduledAction::ReplayPrompt | ScheduledAction::SlowPrompt => {
                    let current = self.session.current_word();
                    let Some(word) = task.word.filter(|w| Some(w.as_str()) == current) else {
                        tracing::debug!(action = ?task.action, "Skipping prompt for stale word");
                        continue;
                    };
                    let rate = if task.action == ScheduledAction::SlowPrompt {
                        self.settings.tts_rate * self.slow_rate
                    } else {
                        self.settings.tts_rate
                    };
                    self.speak_prompt(&word, rate);
                }
                ScheduledAction::NextWord => {
                    if self.finished || self.session.current_word().is_some() {
                        tracing::debug!("Skipping stale next-word task");
                        continue;
                    }
                    self.advance_word();
                }
            }
            ran += 1;
        }
        ran
    }

    /// When [`Tracker::tick`] next has work to do.
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    /// Time until the next scheduled action, zero if already due.
    pub fn time_until_due(&self) -> Option<Duration> {
        let due = self.next_due()?;
        Some(due.saturating_duration_since(self.clock.now()))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn view(&self) -> PromptView {
        let (progress_done, progress_total) = self.session.progress();
        let empty = self.session.is_empty();
        let masked = match self.attempt.word.as_deref() {
            Some(word) => {
                let shown = if self.session.current_word().is_none() {
                    word.chars().count()
                } else if self.policy.input == InputMode::Letters {
                    self.attempt.correct_prefix_len()
                } else {
                    0
                };
                mask_word(word, shown)
            }
            None => String::new(),
        };
        let notice = match &self.attempt.notice {
            Some(notice) => Some(notice.clone()),
            None if empty => Some(Notice::info(EMPTY_LIST_NOTICE)),
            None => None,
        };

        PromptView {
            masked,
            typed: self.attempt.typed.clone(),
            progress_done,
            progress_total,
            notice,
            hint: self.attempt.hint.clone(),
            last_reward: self.last_reward.clone(),
            streak: self.attempt.streak,
            complete: self.session.is_complete(),
            empty,
        }
    }

    pub fn round_result(&self) -> RoundResult {
        let (correct, total) = self.session.progress();
        let elapsed = self.clock.now().saturating_duration_since(self.started_at);
        RoundResult {
            correct,
            total,
            mistakes: self.attempt.total_mistakes,
            best_streak: self.attempt.best_streak,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    pub fn policy(&self) -> &GamePolicy {
        &self.policy
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn attempt(&self) -> &AttemptState {
        &self.attempt
    }

    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn complete_word(&mut self, streak_before: u32) {
        let Some(completion) = self.session.complete_current() else {
            return;
        };
        self.sessions.save(&self.session);
        self.completed_this_run += 1;

        let bonus = self
            .policy
            .rewards
            .is_bonus(self.completed_this_run, streak_before);
        let streak = self.attempt.streak;
        let milestone = match self.policy.input {
            InputMode::Submit => self.policy.rewards.milestone(streak),
            InputMode::Letters => None,
        };
        if completion.reward.is_some() {
            self.last_reward = completion.reward.clone();
        }

        let (done, total) = self.session.progress();
        tracing::info!(word = %completion.word, box_index = ?completion.box_index, done, total, bonus, "Word complete");
        self.play(self.policy.success_cue);
        self.events.emit(GameEvent::WordComplete {
            word: completion.word,
            box_index: completion.box_index,
            reward: completion.reward,
            streak,
            milestone,
            bonus,
        });
        self.notify(Notice::success(self.game.success_message(bonus)));

        if self.session.is_complete() {
            self.finish_round();
        } else {
            self.scheduler.schedule(
                self.clock.now(),
                self.policy.next_word_delay,
                None,
                ScheduledAction::NextWord,
            );
        }
    }

    fn after_mistake(&mut self, word: &str) {
        self.play(SoundCue::Buzzer);
        self.notify(Notice::error(MISTAKE_NOTICE));

        for step in self.policy.hints.steps_for(self.attempt.mistakes_for_word) {
            match step {
                HintStep::ReplayPrompt => {
                    self.schedule_prompt(word, ScheduledAction::ReplayPrompt);
                }
                HintStep::SlowPrompt => {
                    self.schedule_prompt(word, ScheduledAction::SlowPrompt);
                }
                HintStep::RevealFirstLetter => {
                    if !self.settings.show_hints {
                        tracing::debug!("Hints disabled, not revealing");
                        continue;
                    }
                    let hint = self.hint_for(word);
                    dispatch_mvi!(
                        self,
                        attempt,
                        AttemptReducer,
                        AttemptIntent::RevealHint { hint: hint.clone() }
                    );
                    self.events.emit(GameEvent::HintRevealed { hint });
                }
            }
        }
    }

    fn schedule_prompt(&mut self, word: &str, action: ScheduledAction) {
        self.scheduler.schedule(
            self.clock.now(),
            self.policy.mistake_prompt_delay,
            Some(word.to_string()),
            action,
        );
    }

    fn hint_for(&self, word: &str) -> String {
        let first: String = word.chars().take(1).flat_map(char::to_uppercase).collect();
        match self.hints.get(word) {
            Some(custom) => format!("Starts with: {} ({})", first, custom),
            None => format!("Starts with: {}", first),
        }
    }

    fn advance_word(&mut self) {
        let next = self.session.pick_next_word(&mut self.rng).map(str::to_string);
        self.sessions.save(&self.session);
        dispatch_mvi!(
            self,
            attempt,
            AttemptReducer,
            AttemptIntent::Start { word: next.clone() }
        );
        tracing::debug!(word = ?next, "Next word");
        self.events.emit(GameEvent::WordChanged { word: next.clone() });
        if let Some(word) = next {
            self.speak_prompt(&word, self.settings.tts_rate);
        }
    }

    fn finish_round(&mut self) {
        self.finished = true;
        self.scheduler.cancel_all();
        let result = self.round_result();
        tracing::info!(
            game = self.game.key(),
            correct = result.correct,
            total = result.total,
            mistakes = result.mistakes,
            "Round complete"
        );
        self.play(SoundCue::Confetti);
        self.notify(Notice::success(self.game.finish_message()));
        self.events.emit(GameEvent::RoundComplete { result });
    }

    fn speak_prompt(&mut self, word: &str, rate: f32) {
        self.events.emit(GameEvent::PromptRequested {
            word: word.to_string(),
            rate,
        });
        let options = SpeechOptions {
            rate,
            voice: self.settings.voice_id.clone(),
        };
        if let Err(err) = self.speech.speak(word, &options) {
            tracing::warn!(error = %err, "Unable to speak prompt");
        }
    }

    fn play(&self, cue: SoundCue) {
        if self.settings.sfx {
            self.sfx.play(cue);
        }
    }

    fn notify(&mut self, notice: Notice) {
        dispatch_mvi!(
            self,
            attempt,
            AttemptReducer,
            AttemptIntent::Notice(notice.clone())
        );
        self.events.emit(GameEvent::Notice(notice));
    }
}

impl Drop for Tracker {
    fn drop(&mut self) {
        self.scheduler.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::clock::ManualClock;
    use crate::storage::MemoryStore;
    use parking_lot::Mutex;

    fn items(words: &[&str]) -> Vec<WordItem> {
        words.iter().filter_map(|w| WordItem::new(w)).collect()
    }

    fn tracker(game: GameKind, words: &[&str]) -> (Tracker, ManualClock, Arc<Mutex<Vec<GameEvent>>>) {
        let clock = ManualClock::new();
        let options = TrackerOptions::new(game)
            .with_clock(Arc::new(clock.clone()))
            .with_seed(Some(3));
        let storage: SharedStorage = Some(Arc::new(MemoryStore::new()));
        let mut tracker = Tracker::start(options, storage, "l1", &items(words));
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        tracker.subscribe(move |event| sink.lock().push(event.clone()));
        tracker.begin();
        (tracker, clock, events)
    }

    #[test]
    fn letters_complete_a_word() {
        let (mut tracker, _, events) = tracker(GameKind::AnimalBox, &["cat"]);
        assert_eq!(tracker.append('C'), InputOutcome::Accepted);
        assert_eq!(tracker.view().masked, "C _ _");
        assert_eq!(tracker.append('a'), InputOutcome::Accepted);
        assert_eq!(tracker.append('t'), InputOutcome::WordComplete);
        assert!(tracker.is_finished());
        assert!(tracker.view().complete);
        assert!(events
            .lock()
            .iter()
            .any(|e| matches!(e, GameEvent::RoundComplete { result } if result.correct == 1)));
    }

    #[test]
    fn control_characters_are_ignored() {
        let (mut tracker, _, _) = tracker(GameKind::AnimalBox, &["cat"]);
        assert_eq!(tracker.append('\n'), InputOutcome::Ignored);
        assert_eq!(tracker.attempt().mistakes_for_word, 0);
    }

    #[test]
    fn wrong_letter_is_not_appended() {
        let (mut tracker, _, events) = tracker(GameKind::BlockBuilder, &["cat"]);
        assert_eq!(tracker.append('x'), InputOutcome::Mistake);
        assert_eq!(tracker.attempt().typed, "");
        assert!(events.lock().contains(&GameEvent::LetterWrong {
            expected: 'c',
            got: 'x',
            mistakes_for_word: 1
        }));
    }

    #[test]
    fn next_word_waits_for_delay() {
        let (mut tracker, clock, _) = tracker(GameKind::AnimalBox, &["cat", "dog"]);
        let first = tracker.session().current_word().unwrap().to_string();
        tracker.set_input(&first);
        assert_eq!(tracker.submit(), InputOutcome::WordComplete);
        assert!(tracker.session().current_word().is_none());

        clock.advance(Duration::from_millis(599));
        assert_eq!(tracker.tick(), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(tracker.tick(), 1);
        assert!(tracker.session().current_word().is_some());
        assert_ne!(tracker.session().current_word(), Some(first.as_str()));
    }

    #[test]
    fn custom_hint_follows_first_letter() {
        let clock = ManualClock::new();
        let mut words = items(&["cat"]);
        words[0].hint = Some("meows".into());
        let options = TrackerOptions::new(GameKind::AnimalBox).with_clock(Arc::new(clock));
        let mut tracker = Tracker::start(options, None, "l1", &words);
        tracker.begin();
        for _ in 0..3 {
            tracker.append('z');
        }
        assert_eq!(tracker.view().hint.as_deref(), Some("Starts with: C (meows)"));
    }

    #[test]
    fn draft_text_does_not_count_as_letters() {
        let (mut tracker, _, _) = tracker(GameKind::AnimalBox, &["cat"]);
        assert_eq!(tracker.set_input("zz"), InputOutcome::Accepted);
        assert_eq!(tracker.view().masked, "_ _ _");
        assert_eq!(tracker.append('t'), InputOutcome::Mistake);
        assert_eq!(tracker.attempt().typed, "");
        assert!(tracker.session().words_done().is_empty());

        tracker.set_input("CAx");
        assert_eq!(tracker.view().masked, "C A _");
        assert_eq!(tracker.append('t'), InputOutcome::WordComplete);
        assert_eq!(tracker.session().words_done(), &["cat".to_string()]);
    }

    #[test]
    fn wrong_submission_clears_letter_buffer() {
        let (mut tracker, _, _) = tracker(GameKind::AnimalBox, &["cat"]);
        tracker.set_input("dog");
        assert_eq!(tracker.submit(), InputOutcome::Mistake);
        assert_eq!(tracker.attempt().typed, "");
        assert_eq!(tracker.view().masked, "_ _ _");
        assert_eq!(tracker.append('c'), InputOutcome::Accepted);
        assert_eq!(tracker.view().masked, "C _ _");
    }

    #[test]
    fn replay_cancels_pending_tasks() {
        let (mut tracker, _, _) = tracker(GameKind::AnimalBox, &["cat"]);
        tracker.append('z');
        assert!(tracker.next_due().is_some());
        let generation = tracker.scheduler.generation();
        tracker.replay();
        assert!(tracker.scheduler.generation() > generation);
        assert!(tracker.next_due().is_none());
    }
}
