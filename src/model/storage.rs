//! Key-value persistence for the shell
//!
//! The browser original keeps everything in `localStorage`. This module
//! abstracts that as a small string key-value store so the filesystem and the
//! contacts log can persist through whichever backend the build provides:
//!
//! - `MemoryStorage`: in-process map, used by tests and as a fallback
//! - `FileStorage`: one JSON file per key under a data directory (native runtime)
//! - `wasm::web_storage::WebStorage`: the browser's `localStorage` (wasm builds)
//!
//! Persistence is best-effort. Callers log failures and carry on in memory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

/// Storage key holding the serialized filesystem tree
pub const FS_KEY: &str = "terminalFS";

/// Storage key holding the append-only list of submitted contacts
pub const CONTACTS_KEY: &str = "terminalContacts";

/// Failure reading or writing persisted state
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store cannot be used at all (private browsing, no data dir, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored value could not be (de)serialized
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string key-value store
pub trait Storage {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Shared handle to the single store used by the filesystem and the contacts log
pub type StorageHandle = Rc<RefCell<dyn Storage>>;

/// Wrap a store into a shared handle
pub fn shared<S: Storage + 'static>(storage: S) -> StorageHandle {
    Rc::new(RefCell::new(storage))
}

/// In-memory storage
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: each key is stored as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform data directory (`~/.local/share/crt-terminal` on Linux)
    pub fn in_data_dir() -> StorageResult<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| StorageError::Unavailable("no data directory".to_string()))?;
        Ok(Self::new(base.join("crt-terminal")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        // Atomic replace through a sibling temp file
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Storage that refuses every read and write, like `localStorage` in private browsing
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStorage;

#[cfg(test)]
impl Storage for FailingStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}
