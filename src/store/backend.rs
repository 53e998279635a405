//! Key/value storage backends
//!
//! Backends move opaque JSON text in and out of durable storage. They know
//! nothing about the shape of the values.

use crate::error::{Result, WidgetError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Namespaced keys of the persisted widget state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Exam list
    Exams,
    /// Widget settings object
    Settings,
    /// Selected exam id
    SelectedExam,
    /// Widget position
    Position,
    /// Quote currently on display
    CurrentQuote,
}

impl StoreKey {
    /// Every key, in a stable order
    pub const ALL: [Self; 5] = [
        Self::Exams,
        Self::Settings,
        Self::SelectedExam,
        Self::Position,
        Self::CurrentQuote,
    ];

    /// Namespaced key name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exams => "fc_exams",
            Self::Settings => "fc_settings",
            Self::SelectedExam => "fc_selected_exam",
            Self::Position => "fc_position",
            Self::CurrentQuote => "fc_current_quote",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable storage for whole-value JSON blobs
///
/// Each key is independent; a write replaces the whole value (last write wins).
pub trait StorageBackend: Send + Sync {
    /// Raw value stored under `key`, `None` when absent
    fn read(&self, key: StoreKey) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&self, key: StoreKey, value: &str) -> Result<()>;

    /// Remove every widget key
    fn clear(&self) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory
///
/// Writes go to a temporary file in the same directory which is then
/// persisted over the target, so a crash never leaves a half-written value.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| WidgetError::StorageError(Box::new(e)))?;
        info!("Opened widget store at {}", dir.display());
        Ok(Self { dir })
    }

    /// Store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl StorageBackend for JsonFileStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WidgetError::StorageError(Box::new(e))),
        }
    }

    fn write(&self, key: StoreKey, value: &str) -> Result<()> {
        let mut temp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| WidgetError::StorageError(Box::new(e)))?;
        temp.write_all(value.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|e| WidgetError::StorageError(Box::new(e)))?;
        temp.persist(self.path_for(key))
            .map_err(|e| WidgetError::StorageError(Box::new(e.error)))?;
        debug!("Wrote {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        for key in StoreKey::ALL {
            match std::fs::remove_file(self.path_for(key)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(WidgetError::StorageError(Box::new(e))),
            }
        }
        info!("Cleared widget store at {}", self.dir.display());
        Ok(())
    }
}

/// Process-local store, used for the simulated host and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw values
    pub fn with_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (StoreKey, S)>,
        S: Into<String>,
    {
        Self {
            values: Mutex::new(values.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl StorageBackend for MemoryStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.values.lock().get(&key).cloned())
    }

    fn write(&self, key: StoreKey, value: &str) -> Result<()> {
        self.values.lock().insert(key, value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.values.lock().clear();
        Ok(())
    }
}
