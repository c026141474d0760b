use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::game::GameKind;

#[derive(Parser, Debug)]
#[command(
    name = "wordbox",
    version,
    about = "Spelling practice games for kids",
    long_about = "Keep spelling word lists and practice them in small typing games.\n\n\
                  Progress is saved after every word, so a round can be resumed later."
)]
pub struct Cli {
    /// Config file (default: platform config dir + wordbox/config.toml).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Where lists, settings and progress are stored.
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is saved.
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show all word lists and the one in use.
    List,

    /// Save words into the current list, creating one if needed.
    Save(SaveArgs),

    /// Switch to another list.
    Use {
        /// List id (see `wordbox list`).
        id: String,
    },

    /// Delete a list.
    Delete {
        /// List id (see `wordbox list`).
        id: String,
    },

    /// Show or change settings.
    Settings(SettingsArgs),

    /// Play a game with the current list.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// List name.
    #[arg(long)]
    pub name: Option<String>,

    /// Words separated by commas or new lines.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub words: Option<String>,

    /// Read words from a file, one per line.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Speech speed, 1.0 is normal.
    #[arg(long = "tts-rate")]
    pub tts_rate: Option<f32>,

    /// Voice passed to the speech program.
    #[arg(long, conflicts_with = "clear_voice")]
    pub voice: Option<String>,

    /// Go back to the speech program's default voice.
    #[arg(long = "clear-voice")]
    pub clear_voice: bool,

    /// Reveal the first letter after repeated mistakes.
    #[arg(long = "show-hints")]
    pub show_hints: Option<bool>,

    #[arg(long = "dyslexic-font")]
    pub dyslexic_font: Option<bool>,

    /// Sound effects.
    #[arg(long)]
    pub sfx: Option<bool>,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// animal-box, basketball, block-builder or green-light-squad.
    #[arg(long, default_value = "animal-box")]
    pub game: GameKind,

    /// Discard saved progress and start the round over.
    #[arg(long)]
    pub restart: bool,

    /// Seed for word order and rewards.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_play_with_game() {
        let cli = Cli::try_parse_from(["wordbox", "--memory", "play", "--game", "basketball"]).unwrap();
        assert!(cli.memory);
        match cli.command {
            Command::Play(args) => {
                assert_eq!(args.game, GameKind::Basketball);
                assert!(!args.restart);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_game() {
        assert!(Cli::try_parse_from(["wordbox", "play", "--game", "chess"]).is_err());
    }

    #[test]
    fn save_needs_words_or_file() {
        assert!(Cli::try_parse_from(["wordbox", "save", "--name", "Week 1"]).is_err());
        assert!(Cli::try_parse_from(["wordbox", "save", "--words", "cat,dog"]).is_ok());
        assert!(
            Cli::try_parse_from(["wordbox", "save", "--words", "cat", "--file", "w.txt"]).is_err()
        );
    }

    #[test]
    fn settings_flags_take_values() {
        let cli = Cli::try_parse_from(["wordbox", "settings", "--show-hints", "false", "--tts-rate", "0.9"])
            .unwrap();
        match cli.command {
            Command::Settings(args) => {
                assert_eq!(args.show_hints, Some(false));
                assert_eq!(args.tts_rate, Some(0.9));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
