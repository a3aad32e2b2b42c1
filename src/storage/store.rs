//! Key-value persistence backends.
//!
//! Each top-level collection is stored as one JSON blob under a fixed key.
//! Writes replace the whole blob; the last writer wins.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};

/// Key for posted (monthly) work records.
pub const MONTHLY_RECORDS_KEY: &str = "ac4_monthly_records";
/// Key for draft work records.
pub const DRAFT_RECORDS_KEY: &str = "ac4_draft_records";
/// Key for calendar events.
pub const CALENDAR_EVENTS_KEY: &str = "ac4_calendar_events";
/// Key for shift type definitions.
pub const SHIFT_TYPES_KEY: &str = "ac4_shift_types";

/// Synchronous blob storage keyed by string.
pub trait KeyValueStore {
    /// Reads a blob. Returns `Ok(None)` if the key was never written.
    fn read(&self, key: &str) -> EngineResult<Option<String>>;

    /// Replaces a blob.
    fn write(&mut self, key: &str, value: &str) -> EngineResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn read(&self, key: &str) -> EngineResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> EngineResult<()> {
        (**self).write(key, value)
    }
}

/// Stores each key as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at a directory. The directory is created on
    /// first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> EngineResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EngineError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> EngineResult<()> {
        let storage_error = |e: std::io::Error| EngineError::Storage {
            key: key.to_string(),
            message: e.to_string(),
        };
        fs::create_dir_all(&self.root).map_err(storage_error)?;
        fs::write(self.path_for(key), value).map_err(storage_error)
    }
}

/// In-memory store, used by tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given blobs.
    pub fn with_blobs<I, K, V>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            blobs: blobs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> EngineResult<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
