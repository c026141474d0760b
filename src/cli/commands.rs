use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};

use crate::audio::{BellSfx, CommandSpeech, SilentSpeech, SoundEffects, Speech};
use crate::cli::args::{Cli, Command, PlayArgs, SaveArgs, SettingsArgs};
use crate::cli::play::play_loop;
use crate::config::Config;
use crate::game::{Tracker, TrackerOptions};
use crate::session::{SessionOrigin, SessionStore};
use crate::storage::{FileStore, MemoryStore, SharedStorage};
use crate::store::{Settings, SettingsPatch, WordListStore};

/// Execute a parsed command line against stdin/stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let storage = open_storage(&config, cli.data_dir.as_deref(), cli.memory)?;
    let mut store = WordListStore::load(storage.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::List => run_list(&store, &mut out),
        Command::Save(args) => run_save(&mut store, &args, &mut out),
        Command::Use { id } => run_use(&mut store, &id, &mut out),
        Command::Delete { id } => run_delete(&mut store, &id, &mut out),
        Command::Settings(args) => run_settings(&mut store, &args, &mut out),
        Command::Play(args) => {
            let stdin = io::stdin();
            run_play(&mut store, &config, storage, &args, stdin.lock(), &mut out)
        }
    }
}

/// File storage under the configured (or overridden) data dir, or a
/// throwaway in-memory store.
pub fn open_storage(
    config: &Config,
    data_dir: Option<&Path>,
    memory: bool,
) -> anyhow::Result<SharedStorage> {
    if memory {
        tracing::info!("Using in-memory storage");
        return Ok(Some(Arc::new(MemoryStore::new())));
    }
    let dir = data_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.data_dir());
    let store = FileStore::open(&dir)
        .with_context(|| format!("Failed to open data directory '{}'", dir.display()))?;
    tracing::info!(dir = %dir.display(), "Using file storage");
    Ok(Some(Arc::new(store)))
}

pub fn run_list<W: Write>(store: &WordListStore, out: &mut W) -> anyhow::Result<()> {
    let state = store.state();
    if state.lists.is_empty() {
        writeln!(out, "No word lists yet. Add one with: wordbox save --words \"cat, dog\"")?;
        return Ok(());
    }
    for list in &state.lists {
        let marker = if state.current_list_id.as_deref() == Some(list.id.as_str()) {
            '*'
        } else {
            ' '
        };
        writeln!(
            out,
            "{} {}  {} ({} words)",
            marker,
            list.id,
            list.name,
            list.words.len()
        )?;
        if !list.words.is_empty() {
            writeln!(out, "    {}", list.texts().join(", "))?;
        }
    }
    Ok(())
}

pub fn run_save<W: Write>(
    store: &mut WordListStore,
    args: &SaveArgs,
    out: &mut W,
) -> anyhow::Result<()> {
    let raw = match (&args.words, &args.file) {
        (Some(words), _) => words.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word file '{}'", path.display()))?,
        (None, None) => bail!("Pass --words or --file"),
    };

    store.upsert_word_list(args.name.as_deref().unwrap_or(""), &raw);
    let Some(list) = store.current_list() else {
        bail!("Word list was not saved");
    };
    writeln!(
        out,
        "Saved \"{}\" with {} words ({})",
        list.name,
        list.words.len(),
        list.id
    )?;
    if list.words.is_empty() {
        writeln!(out, "The list is empty; games will ask for words first.")?;
    }
    Ok(())
}

pub fn run_use<W: Write>(store: &mut WordListStore, id: &str, out: &mut W) -> anyhow::Result<()> {
    if !store.set_current_list_id(id) {
        bail!("No word list with id '{}'", id);
    }
    if let Some(list) = store.current_list() {
        writeln!(out, "Now using \"{}\"", list.name)?;
    }
    Ok(())
}

pub fn run_delete<W: Write>(
    store: &mut WordListStore,
    id: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    if !store.delete_list(id) {
        bail!("No word list with id '{}'", id);
    }
    writeln!(out, "Deleted {}", id)?;
    Ok(())
}

pub fn run_settings<W: Write>(
    store: &mut WordListStore,
    args: &SettingsArgs,
    out: &mut W,
) -> anyhow::Result<()> {
    if let Some(rate) = args.tts_rate {
        if !(rate.is_finite() && rate > 0.0) {
            bail!("--tts-rate must be a positive number, got {}", rate);
        }
    }

    let voice_id = if args.clear_voice {
        Some(None)
    } else {
        args.voice.clone().map(Some)
    };
    let patch = SettingsPatch {
        voice_id,
        tts_rate: args.tts_rate,
        show_hints: args.show_hints,
        dyslexic_font: args.dyslexic_font,
        sfx: args.sfx,
    };
    if !patch.is_empty() {
        store.update_settings(patch);
    }
    print_settings(&store.state().settings, out)
}

fn print_settings<W: Write>(settings: &Settings, out: &mut W) -> anyhow::Result<()> {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    writeln!(
        out,
        "voice: {}",
        settings.voice_id.as_deref().unwrap_or("default")
    )?;
    writeln!(out, "speech rate: {}", settings.tts_rate)?;
    writeln!(out, "hints: {}", on_off(settings.show_hints))?;
    writeln!(out, "dyslexic font: {}", on_off(settings.dyslexic_font))?;
    writeln!(out, "sound effects: {}", on_off(settings.sfx))?;
    Ok(())
}

/// Play one game on the current list, creating the sample list on first use.
pub fn run_play<R: BufRead, W: Write>(
    store: &mut WordListStore,
    config: &Config,
    storage: SharedStorage,
    args: &PlayArgs,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    store.ensure_default_list();
    let Some(list) = store.current_list().cloned() else {
        bail!("No word list selected. Pick one with: wordbox use <id>");
    };

    let game = args.game;
    let policy = match config.game.get(game.key()) {
        Some(overrides) => game.policy().with_overrides(overrides),
        None => game.policy(),
    };
    let command_speech = CommandSpeech::from_config(&config.speech);
    let echo_prompts = command_speech.is_none();
    let speech: Arc<dyn Speech> = match command_speech {
        Some(speech) => Arc::new(speech),
        None => Arc::new(SilentSpeech),
    };
    let sfx: Arc<dyn SoundEffects> = Arc::new(BellSfx);

    if args.restart {
        SessionStore::new(storage.clone(), game.key()).clear(&list.id);
    }

    let options = TrackerOptions::new(game)
        .with_policy(policy)
        .with_settings(store.state().settings.clone())
        .with_slow_rate(config.speech.slow_rate)
        .with_speech(speech)
        .with_sfx(sfx)
        .with_seed(args.seed);
    let mut tracker = Tracker::start(options, storage, &list.id, &list.words);

    writeln!(
        out,
        "{}: \"{}\" ({} words)",
        game.label(),
        list.name,
        list.words.len()
    )?;
    if tracker.origin() == SessionOrigin::Resumed {
        writeln!(out, "Welcome back! Picking up where you left off.")?;
    }
    writeln!(out, "Type the word you hear. :hear repeats it, :quit stops.")?;

    play_loop(&mut tracker, input, out, echo_prompts)?;
    Ok(())
}
