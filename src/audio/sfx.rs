use std::io::Write;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    /// Wrong letter or answer.
    Buzzer,
    /// Round finished.
    Confetti,
    /// Word completed.
    Pop,
    /// Basket scored.
    Swish,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buzzer => "buzzer",
            Self::Confetti => "confetti",
            Self::Pop => "pop",
            Self::Swish => "swish",
        }
    }
}

pub trait SoundEffects: Send + Sync {
    fn play(&self, cue: SoundCue);
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSfx;

impl SoundEffects for SilentSfx {
    fn play(&self, _cue: SoundCue) {}
}

/// Rings the terminal bell for mistakes and the end of a round.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellSfx;

impl SoundEffects for BellSfx {
    fn play(&self, cue: SoundCue) {
        if !matches!(cue, SoundCue::Buzzer | SoundCue::Confetti) {
            return;
        }
        let mut stderr = std::io::stderr();
        if let Err(err) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            tracing::debug!(error = %err, cue = cue.as_str(), "Unable to ring bell");
        }
    }
}
