//! Spelling practice core: word lists kept in local storage, spoken
//! prompts, and small typing games that remember progress per list.

pub mod audio;
pub mod cli;
pub mod config;
pub mod game;
pub mod logging;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod store;
pub mod words;
