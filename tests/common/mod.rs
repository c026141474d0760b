//! Shared test utilities and recording doubles.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wordbox::audio::{SoundCue, SoundEffects, Speech, SpeechError, SpeechOptions};
use wordbox::game::{GameEvent, GameKind, ManualClock, Tracker, TrackerOptions};
use wordbox::storage::{MemoryStore, SharedStorage};
use wordbox::words::WordItem;

pub type EventLog = Arc<Mutex<Vec<GameEvent>>>;

/// Write `content` to a config file inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn items(words: &[&str]) -> Vec<WordItem> {
    words
        .iter()
        .map(|w| WordItem::new(w).expect("valid word"))
        .collect()
}

pub fn shared(memory: &Arc<MemoryStore>) -> SharedStorage {
    Some(memory.clone())
}

/// Records every utterance as `(text, rate)`.
#[derive(Default)]
pub struct RecordingSpeech {
    pub spoken: Mutex<Vec<(String, f32)>>,
    pub cancelled: Mutex<usize>,
}

impl Speech for RecordingSpeech {
    fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), SpeechError> {
        self.spoken.lock().push((text.to_string(), options.rate));
        Ok(())
    }

    fn cancel(&self) {
        *self.cancelled.lock() += 1;
    }
}

#[derive(Default)]
pub struct RecordingSfx {
    pub played: Mutex<Vec<SoundCue>>,
}

impl SoundEffects for RecordingSfx {
    fn play(&self, cue: SoundCue) {
        self.played.lock().push(cue);
    }
}

/// A started tracker plus handles on everything it talks to.
pub struct Harness {
    pub tracker: Tracker,
    pub clock: ManualClock,
    pub memory: Arc<MemoryStore>,
    pub speech: Arc<RecordingSpeech>,
    pub sfx: Arc<RecordingSfx>,
    pub events: EventLog,
}

impl Harness {
    pub fn start(game: GameKind, words: &[&str]) -> Self {
        Self::start_with(TrackerOptions::new(game), Arc::new(MemoryStore::new()), words)
    }

    pub fn start_with(options: TrackerOptions, memory: Arc<MemoryStore>, words: &[&str]) -> Self {
        let clock = ManualClock::new();
        let speech = Arc::new(RecordingSpeech::default());
        let sfx = Arc::new(RecordingSfx::default());
        let seed = options.seed.or(Some(7));
        let options = options
            .with_clock(Arc::new(clock.clone()))
            .with_speech(speech.clone())
            .with_sfx(sfx.clone())
            .with_seed(seed);
        let mut tracker = Tracker::start(options, shared(&memory), "list-1", &items(words));

        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        tracker.subscribe(move |event| sink.lock().push(event.clone()));
        tracker.begin();

        Self {
            tracker,
            clock,
            memory,
            speech,
            sfx,
            events,
        }
    }

    /// Advance the clock and run whatever became due.
    pub fn advance(&mut self, ms: u64) -> usize {
        self.clock.advance(Duration::from_millis(ms));
        self.tracker.tick()
    }

    pub fn current(&self) -> String {
        self.tracker
            .session()
            .current_word()
            .expect("a current word")
            .to_string()
    }

    pub fn take_events(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn spoken(&self) -> Vec<(String, f32)> {
        self.speech.spoken.lock().clone()
    }
}
