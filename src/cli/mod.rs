//! Command-line shell over the word list store and the games.

mod args;
mod commands;
mod play;

pub use args::{Cli, Command, PlayArgs, SaveArgs, SettingsArgs};
pub use commands::{
    open_storage, run, run_delete, run_list, run_play, run_save, run_settings, run_use,
};
pub use play::{play_loop, PlayCommand};
