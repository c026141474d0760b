use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    /// Per-game tuning keyed by game key (e.g. "animal-box").
    #[serde(default)]
    pub game: BTreeMap<String, GameOverrides>,
}

/// Where durable state lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory. Defaults to the platform data dir + "wordbox".
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Text-to-speech program settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// TTS program to spawn (e.g. "espeak-ng", "say"). Speech is silent when unset.
    #[serde(default)]
    pub program: Option<String>,
    /// Extra arguments. `{wpm}` and `{voice}` placeholders are substituted;
    /// the spoken text is appended last.
    #[serde(default)]
    pub args: Vec<String>,
    /// Speaking speed at rate 1.0 (default: 175).
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
    /// Rate multiplier for the slowed prompt (default: 0.8).
    #[serde(default = "default_slow_rate")]
    pub slow_rate: f32,
}

/// Optional overrides for a game's hint and pacing constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameOverrides {
    pub replay_at: Option<u32>,
    pub slow_at: Option<u32>,
    pub reveal_at: Option<u32>,
    pub every_nth_word: Option<u32>,
    pub streak_milestones: Option<Vec<u32>>,
    pub next_word_delay_ms: Option<u64>,
    pub mistake_prompt_delay_ms: Option<u64>,
}

fn default_words_per_minute() -> u32 {
    175
}

fn default_slow_rate() -> f32 {
    0.8
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            words_per_minute: default_words_per_minute(),
            slow_rate: default_slow_rate(),
        }
    }
}
