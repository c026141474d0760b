//! Speech and sound-effect outputs used by the games.
//!
//! Both are traits so the tracker can run against silent or recording
//! doubles. Failures are never fatal to a game: callers log and move on.

mod sfx;
mod speech;

pub use sfx::{BellSfx, SilentSfx, SoundCue, SoundEffects};
pub use speech::{CommandSpeech, SilentSpeech, Speech, SpeechError, SpeechOptions};
