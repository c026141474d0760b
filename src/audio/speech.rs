use std::process::{Child, Command, Stdio};

use parking_lot::Mutex;
use thiserror::Error;

use crate::config::SpeechConfig;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Failed to start speech program '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// How a prompt should be spoken.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    /// Speed multiplier, 1.0 is normal.
    pub rate: f32,
    pub voice: Option<String>,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            rate: 1.0,
            voice: None,
        }
    }
}

pub trait Speech: Send + Sync {
    /// Speak `text`, interrupting anything still being spoken.
    fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), SpeechError>;

    /// Stop any speech in progress.
    fn cancel(&self);
}

/// Says nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeech;

impl Speech for SilentSpeech {
    fn speak(&self, _text: &str, _options: &SpeechOptions) -> Result<(), SpeechError> {
        Ok(())
    }

    fn cancel(&self) {}
}

/// Speaks through an external TTS program such as `espeak-ng` or `say`.
///
/// `{wpm}` and `{voice}` in the configured arguments are substituted per
/// call; an argument mentioning `{voice}` is left out when no voice is set.
/// The text is passed as the final argument.
pub struct CommandSpeech {
    program: String,
    args: Vec<String>,
    words_per_minute: u32,
    current: Mutex<Option<Child>>,
}

impl CommandSpeech {
    pub fn new(program: impl Into<String>, args: Vec<String>, words_per_minute: u32) -> Self {
        Self {
            program: program.into(),
            args,
            words_per_minute,
            current: Mutex::new(None),
        }
    }

    /// `None` when no speech program is configured.
    pub fn from_config(config: &SpeechConfig) -> Option<Self> {
        let program = config.program.as_deref()?.trim();
        if program.is_empty() {
            return None;
        }
        Some(Self::new(
            program,
            config.args.clone(),
            config.words_per_minute,
        ))
    }

    /// Full argument list for one utterance.
    pub fn command_args(&self, text: &str, options: &SpeechOptions) -> Vec<String> {
        let wpm = (self.words_per_minute as f32 * options.rate).round().max(1.0) as u32;
        let mut args: Vec<String> = Vec::with_capacity(self.args.len() + 1);
        for arg in &self.args {
            if arg.contains("{voice}") {
                let Some(voice) = &options.voice else {
                    continue;
                };
                args.push(arg.replace("{voice}", voice).replace("{wpm}", &wpm.to_string()));
            } else {
                args.push(arg.replace("{wpm}", &wpm.to_string()));
            }
        }
        args.push(text.to_string());
        args
    }

    fn stop_current(current: &mut Option<Child>) {
        let Some(mut child) = current.take() else {
            return;
        };
        match child.try_wait() {
            Ok(Some(_)) => {}
            _ => {
                if let Err(err) = child.kill() {
                    tracing::debug!(error = %err, "Unable to stop speech process");
                }
                let _ = child.wait();
            }
        }
    }
}

impl Speech for CommandSpeech {
    fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), SpeechError> {
        let mut current = self.current.lock();
        Self::stop_current(&mut current);

        let args = self.command_args(text, options);
        tracing::debug!(program = %self.program, rate = options.rate, "Speaking prompt");
        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::SpawnError {
                program: self.program.clone(),
                source: e,
            })?;
        *current = Some(child);
        Ok(())
    }

    fn cancel(&self) {
        Self::stop_current(&mut self.current.lock());
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        Self::stop_current(self.current.get_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speech(args: &[&str]) -> CommandSpeech {
        CommandSpeech::new("espeak-ng", args.iter().map(|a| a.to_string()).collect(), 175)
    }

    #[test]
    fn substitutes_rate_and_voice() {
        let speech = speech(&["-s", "{wpm}", "--voice={voice}"]);
        let options = SpeechOptions {
            rate: 0.8,
            voice: Some("en-us".into()),
        };
        assert_eq!(
            speech.command_args("cat", &options),
            vec!["-s", "140", "--voice=en-us", "cat"]
        );
    }

    #[test]
    fn drops_voice_argument_without_voice() {
        let speech = speech(&["-s", "{wpm}", "--voice={voice}"]);
        assert_eq!(
            speech.command_args("dog", &SpeechOptions::default()),
            vec!["-s", "175", "dog"]
        );
    }

    #[test]
    fn from_config_requires_program() {
        assert!(CommandSpeech::from_config(&SpeechConfig::default()).is_none());
        let config = SpeechConfig {
            program: Some("  ".into()),
            ..SpeechConfig::default()
        };
        assert!(CommandSpeech::from_config(&config).is_none());
        let config = SpeechConfig {
            program: Some("say".into()),
            ..SpeechConfig::default()
        };
        assert!(CommandSpeech::from_config(&config).is_some());
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let speech = CommandSpeech::new("wordbox-no-such-tts-program", Vec::new(), 175);
        let err = speech.speak("cat", &SpeechOptions::default()).unwrap_err();
        assert!(matches!(err, SpeechError::SpawnError { .. }));
    }
}
