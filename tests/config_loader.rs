mod common;

use std::path::PathBuf;

use common::temp_config;
use wordbox::config::{Config, ConfigError};
use wordbox::game::GameKind;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert!(config.storage.data_dir.is_none());
    assert!(config.speech.program.is_none());
    assert!(config.speech.args.is_empty());
    assert_eq!(config.speech.words_per_minute, 175);
    assert_eq!(config.speech.slow_rate, 0.8);
    assert!(config.game.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("wordbox/config.toml"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let (dir, _) = temp_config("");
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_full_config_parses() {
    let (_dir, path) = temp_config(
        r#"
[storage]
data_dir = "/tmp/wordbox-data"

[speech]
program = "espeak-ng"
args = ["-s", "{wpm}", "-v", "{voice}"]
slow_rate = 0.6

[game.basketball]
reveal_at = 4
next_word_delay_ms = 0

[game.green-light-squad]
streak_milestones = [2, 4]
"#,
    );
    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.data_dir(), PathBuf::from("/tmp/wordbox-data"));
    assert_eq!(config.speech.program.as_deref(), Some("espeak-ng"));
    assert_eq!(config.speech.args.len(), 4);
    assert_eq!(config.speech.slow_rate, 0.6);
    assert_eq!(config.speech.words_per_minute, 175);

    let basketball = GameKind::Basketball
        .policy()
        .with_overrides(&config.game["basketball"]);
    assert_eq!(basketball.hints.reveal_at, Some(4));
    assert!(basketball.next_word_delay.is_zero());

    let squad = &config.game["green-light-squad"];
    assert_eq!(squad.streak_milestones, Some(vec![2, 4]));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[speech\nprogram = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_unknown_game_fails_validation() {
    let (_dir, path) = temp_config("[game.chess]\nreplay_at = 1\n");
    let err = Config::load_from(&path).unwrap_err();
    match err {
        ConfigError::ValidationError { message } => assert!(message.contains("chess")),
        other => panic!("expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_zero_threshold_fails_validation() {
    let (_dir, path) = temp_config("[game.animal-box]\nslow_at = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

#[test]
fn test_zero_milestone_fails_validation() {
    let (_dir, path) = temp_config("[game.animal-box]\nstreak_milestones = [3, 0]\n");
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_slow_rate_out_of_range_fails_validation() {
    let (_dir, path) = temp_config("[speech]\nslow_rate = 1.5\n");
    assert!(matches!(
        Config::load_from(&path).unwrap_err(),
        ConfigError::ValidationError { .. }
    ));

    let (_dir, path) = temp_config("[speech]\nwords_per_minute = 0\n");
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_default_data_dir_is_under_wordbox() {
    assert!(Config::default().data_dir().ends_with("wordbox"));
}
