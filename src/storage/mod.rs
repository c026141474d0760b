//! Durable key-value storage.
//!
//! The store and the session tracker both persist through a [`KeyValueStore`].
//! When no storage is available the callers keep working purely in memory.

mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read key '{key}' from '{path}': {source}")]
    ReadError {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write key '{key}' to '{path}': {source}")]
    WriteError {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock storage directory '{path}': {source}")]
    LockError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

/// String-valued key-value storage, one record per key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle to a storage backend. `None` means in-memory mode.
pub type SharedStorage = Option<Arc<dyn KeyValueStore>>;
