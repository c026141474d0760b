mod common;

use std::io::Cursor;

use common::temp_config;
use wordbox::cli::{
    open_storage, run_delete, run_list, run_play, run_save, run_settings, run_use, PlayArgs,
    SaveArgs, SettingsArgs,
};
use wordbox::config::Config;
use wordbox::game::GameKind;
use wordbox::store::WordListStore;

/// Zero delays so the play loop never sleeps; no speech program so prompts
/// are echoed to the output.
fn fast_config() -> Config {
    let (_dir, path) = temp_config(
        r#"
[game.animal-box]
next_word_delay_ms = 0
mistake_prompt_delay_ms = 0

[game.basketball]
next_word_delay_ms = 0
mistake_prompt_delay_ms = 0
"#,
    );
    Config::load_from(&path).unwrap()
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

fn save_args(name: &str, words: &str) -> SaveArgs {
    SaveArgs {
        name: Some(name.to_string()),
        words: Some(words.to_string()),
        file: None,
    }
}

fn play_args(game: GameKind) -> PlayArgs {
    PlayArgs {
        game,
        restart: false,
        seed: Some(5),
    }
}

#[test]
fn save_then_list_marks_current() {
    let config = Config::default();
    let storage = open_storage(&config, None, true).unwrap();
    let mut store = WordListStore::load(storage);

    let mut out = Vec::new();
    run_save(&mut store, &save_args("Week 1", "cat, dog"), &mut out).unwrap();
    assert!(output(out).starts_with("Saved \"Week 1\" with 2 words"));

    let mut out = Vec::new();
    run_list(&store, &mut out).unwrap();
    let listing = output(out);
    assert!(listing.starts_with("* "));
    assert!(listing.contains("Week 1"));
    assert!(listing.contains("cat, dog"));
}

#[test]
fn save_reads_word_file() {
    let (dir, _) = temp_config("");
    let path = dir.path().join("words.txt");
    std::fs::write(&path, "sun\nrun\n\nsun\n").unwrap();

    let mut store = WordListStore::load(None);
    let args = SaveArgs {
        name: None,
        words: None,
        file: Some(path),
    };
    run_save(&mut store, &args, &mut Vec::new()).unwrap();
    assert_eq!(store.current_list().unwrap().texts(), vec!["sun", "run"]);
}

#[test]
fn unknown_ids_are_errors() {
    let mut store = WordListStore::load(None);
    assert!(run_use(&mut store, "nope", &mut Vec::new()).is_err());
    assert!(run_delete(&mut store, "nope", &mut Vec::new()).is_err());
}

#[test]
fn settings_update_and_print() {
    let mut store = WordListStore::load(None);
    let args = SettingsArgs {
        tts_rate: Some(0.9),
        sfx: Some(false),
        voice: Some("en-gb".to_string()),
        ..SettingsArgs::default()
    };
    let mut out = Vec::new();
    run_settings(&mut store, &args, &mut out).unwrap();
    let printed = output(out);
    assert!(printed.contains("voice: en-gb"));
    assert!(printed.contains("speech rate: 0.9"));
    assert!(printed.contains("sound effects: off"));
    assert!(!store.state().settings.sfx);

    let bad = SettingsArgs {
        tts_rate: Some(-1.0),
        ..SettingsArgs::default()
    };
    assert!(run_settings(&mut store, &bad, &mut Vec::new()).is_err());
    assert_eq!(store.state().settings.tts_rate, 0.9);
}

#[test]
fn play_sample_list_to_the_end() {
    let config = fast_config();
    let storage = open_storage(&config, None, true).unwrap();
    let mut store = WordListStore::load(storage.clone());

    // Four sample words; answer every echoed prompt.
    let mut answers = String::new();
    for _ in 0..4 {
        answers.push_str("cat\ndog\nrun\nsun\n");
    }
    let mut out = Vec::new();
    run_play(
        &mut store,
        &config,
        storage,
        &play_args(GameKind::Basketball),
        Cursor::new(answers),
        &mut out,
    )
    .unwrap();

    let text = output(out);
    assert!(text.starts_with("Basketball: \"Sample List\" (4 words)"));
    assert!(text.contains("Listen: "));
    assert!(text.contains("Round complete: 4/4 words"));
    assert!(text.ends_with("Progress saved. Bye!\n"));
}

#[test]
fn play_quit_and_resume() {
    let config = fast_config();
    let storage = open_storage(&config, None, true).unwrap();
    let mut store = WordListStore::load(storage.clone());
    let mut out = Vec::new();
    run_save(&mut store, &save_args("One", "sun, sun"), &mut out).unwrap();

    let mut out = Vec::new();
    run_play(
        &mut store,
        &config,
        storage.clone(),
        &play_args(GameKind::AnimalBox),
        Cursor::new("x\n:hear\n:quit\n"),
        &mut out,
    )
    .unwrap();
    let text = output(out);
    assert!(text.contains("Try again!"));
    assert_eq!(text.matches("Listen: sun").count(), 3);

    let mut out = Vec::new();
    run_play(
        &mut store,
        &config,
        storage,
        &play_args(GameKind::AnimalBox),
        Cursor::new("sun\n"),
        &mut out,
    )
    .unwrap();
    let text = output(out);
    assert!(text.contains("Welcome back!"));
    assert!(text.contains("Box 1 opened: a "));
    assert!(text.contains("All boxes are open!"));
}
