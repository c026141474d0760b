//! File-backed storage: one file per key under a data directory.
//!
//! Writes go to a temporary sibling and are renamed into place, so a crash
//! mid-write leaves the previous value intact. An advisory lock file
//! serializes writers from concurrent processes.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::{KeyValueStore, StorageError};

const LOCK_FILE: &str = ".lock";
const VALUE_EXT: &str = "json";

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Unavailable {
            message: format!("cannot create '{}': {}", dir.display(), e),
        })?;
        Ok(Self { dir })
    }

    /// Default data directory (`~/.local/share/wordbox` or platform equivalent).
    pub fn default_dir() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("wordbox")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", encode_key(key), VALUE_EXT))
    }

    fn lock(&self) -> Result<File, StorageError> {
        let path = self.dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| StorageError::LockError {
                path: path.clone(),
                source,
            })?;
        file.lock_exclusive()
            .map_err(|source| StorageError::LockError { path, source })?;
        Ok(file)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::ReadError {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{}.tmp", VALUE_EXT));
        let write_err = |source| StorageError::WriteError {
            key: key.to_string(),
            path: path.clone(),
            source,
        };

        let lock = self.lock()?;
        let result = (|| -> io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        })();
        let _ = FileExt::unlock(&lock);

        result.map_err(write_err)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let lock = self.lock()?;
        let result = match fs::remove_file(&path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        };
        let _ = FileExt::unlock(&lock);

        result.map_err(|source| StorageError::WriteError {
            key: key.to_string(),
            path,
            source,
        })
    }
}

/// Map a storage key to a portable file stem.
///
/// Alphanumerics, `-`, `_` and `.` pass through; everything else becomes
/// `%XX` per UTF-8 byte, so distinct keys never share a file.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn roundtrip_and_missing_key() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();

        assert_eq!(store.get("asgs.lists").unwrap(), None);
        store.set("asgs.lists", "[]").unwrap();
        assert_eq!(store.get("asgs.lists").unwrap().as_deref(), Some("[]"));

        store.set("asgs.lists", "[1]").unwrap();
        assert_eq!(store.get("asgs.lists").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn remove_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        store.remove("nothing").unwrap();

        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn keys_with_separators_stay_distinct() {
        assert_eq!(encode_key("animal-box:abc"), "animal-box%3Aabc");
        assert_ne!(encode_key("a:b"), encode_key("a_b"));
        assert_ne!(encode_key("a/b"), encode_key("a%2Fb"));
    }

    #[test]
    fn open_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        store.set("k", "v").unwrap();

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
