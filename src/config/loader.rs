use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::game::GameKind;
use crate::storage::FileStore;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/wordbox/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("wordbox").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path with the same rules as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Every `[game.<key>]` table names a known game
    /// - Hint thresholds and reward intervals are at least 1
    /// - Speech speed and slow rate are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, overrides) in &self.game {
            if GameKind::parse(key).is_none() {
                return Err(ConfigError::ValidationError {
                    message: format!("Unknown game '{}' in [game] section", key),
                });
            }

            let thresholds = [
                ("replay_at", overrides.replay_at),
                ("slow_at", overrides.slow_at),
                ("reveal_at", overrides.reveal_at),
                ("every_nth_word", overrides.every_nth_word),
            ];
            for (name, value) in thresholds {
                if value == Some(0) {
                    return Err(ConfigError::ValidationError {
                        message: format!("game.{}.{} must be at least 1", key, name),
                    });
                }
            }

            if let Some(milestones) = &overrides.streak_milestones {
                if milestones.contains(&0) {
                    return Err(ConfigError::ValidationError {
                        message: format!("game.{}.streak_milestones must be positive", key),
                    });
                }
            }
        }

        if self.speech.words_per_minute == 0 {
            return Err(ConfigError::ValidationError {
                message: "speech.words_per_minute must be positive".to_string(),
            });
        }

        let slow = self.speech.slow_rate;
        if !(slow.is_finite() && slow > 0.0 && slow <= 1.0) {
            return Err(ConfigError::ValidationError {
                message: format!("speech.slow_rate must be in (0, 1], got {}", slow),
            });
        }

        Ok(())
    }

    /// Resolved data directory for durable state.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(FileStore::default_dir)
    }
}
