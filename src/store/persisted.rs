//! Typed access to the persisted widget state
//!
//! Loads never fail: absent, unreadable or malformed values come back as
//! `None` and the caller substitutes its default. Saves are fire-and-forget;
//! a failed write is logged and the in-memory model stays authoritative.

use crate::error::Result;
use crate::store::backend::{StorageBackend, StoreKey};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Explicit store object, constructed once at startup and handed to the widget
#[derive(Clone)]
pub struct PersistedStore {
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for PersistedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedStore").finish_non_exhaustive()
    }
}

impl PersistedStore {
    /// Wrap a backend
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Raw stored text for `key`
    pub fn load_raw(&self, key: StoreKey) -> Option<String> {
        match self.backend.read(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {}, using default: {}", key, e);
                None
            }
        }
    }

    /// Deserialized value for `key`
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let raw = self.load_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding malformed {}: {}", key, e);
                None
            }
        }
    }

    /// Selected exam id
    ///
    /// Older data stored the id as bare text rather than a JSON string; both
    /// forms are accepted.
    pub fn load_selected_exam(&self) -> Option<String> {
        let raw = self.load_raw(StoreKey::SelectedExam)?;
        let id = match serde_json::from_str::<String>(&raw) {
            Ok(id) => id,
            Err(_) => {
                let trimmed = raw.trim();
                if trimmed.starts_with(['"', '{', '[']) {
                    warn!("Discarding malformed {}", StoreKey::SelectedExam);
                    return None;
                }
                trimmed.to_string()
            }
        };
        (!id.is_empty()).then_some(id)
    }

    /// Write `value` under `key`, returning the failure
    pub fn try_save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.write(key, &json)?;
        debug!("Persisted {}", key);
        Ok(())
    }

    /// Write `value` under `key`; failures are logged only
    pub fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            warn!(
                "Failed to persist {}: {}. Continuing with in-memory state.",
                key, e
            );
        }
    }

    /// Remove all persisted widget state
    pub fn clear(&self) -> Result<()> {
        self.backend.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::{Exam, Position, Quote, WidgetSettings};
    use crate::error::{StringError, WidgetError};
    use crate::store::backend::MemoryStore;

    fn store_with(values: &[(StoreKey, &str)]) -> PersistedStore {
        PersistedStore::new(Arc::new(MemoryStore::with_values(
            values.iter().map(|(k, v)| (*k, *v)),
        )))
    }

    struct FailingBackend;

    impl StorageBackend for FailingBackend {
        fn read(&self, _key: StoreKey) -> Result<Option<String>> {
            Err(WidgetError::StorageError(StringError::new("unreadable")))
        }
        fn write(&self, _key: StoreKey, _value: &str) -> Result<()> {
            Err(WidgetError::StorageError(StringError::new("read-only")))
        }
        fn clear(&self) -> Result<()> {
            Err(WidgetError::StorageError(StringError::new("read-only")))
        }
    }

    #[test]
    fn test_load_absent() {
        let store = store_with(&[]);
        assert_eq!(store.load::<Position>(StoreKey::Position), None);
        assert_eq!(store.load_selected_exam(), None);
    }

    #[test]
    fn test_load_malformed_is_none() {
        let store = store_with(&[
            (StoreKey::Position, "{\"x\":"),
            (StoreKey::Exams, "{\"not\":\"a list\"}"),
            (StoreKey::CurrentQuote, "42"),
        ]);
        assert_eq!(store.load::<Position>(StoreKey::Position), None);
        assert_eq!(store.load::<Vec<Exam>>(StoreKey::Exams), None);
        assert_eq!(store.load::<Quote>(StoreKey::CurrentQuote), None);
    }

    #[test]
    fn test_save_then_load() {
        let store = store_with(&[]);
        store.save(StoreKey::Position, &Position::new(12.5, -40.0));
        assert_eq!(
            store.load::<Position>(StoreKey::Position),
            Some(Position::new(12.5, -40.0))
        );
    }

    #[test]
    fn test_selected_exam_accepts_legacy_raw_id() {
        let store = store_with(&[(StoreKey::SelectedExam, "1717171717171")]);
        assert_eq!(store.load_selected_exam().as_deref(), Some("1717171717171"));

        let store = store_with(&[(StoreKey::SelectedExam, "\"gaokao\"")]);
        assert_eq!(store.load_selected_exam().as_deref(), Some("gaokao"));

        let store = store_with(&[(StoreKey::SelectedExam, "\"unterminated")]);
        assert_eq!(store.load_selected_exam(), None);

        let store = store_with(&[(StoreKey::SelectedExam, "\"\"")]);
        assert_eq!(store.load_selected_exam(), None);
    }

    #[test]
    fn test_failing_backend_is_not_fatal() {
        let store = PersistedStore::new(Arc::new(FailingBackend));
        assert_eq!(store.load::<WidgetSettings>(StoreKey::Settings), None);
        assert_eq!(store.load_raw(StoreKey::Settings), None);
        // Fire-and-forget save does not panic
        store.save(StoreKey::Settings, &WidgetSettings::default());
        assert!(store.try_save(StoreKey::Settings, &WidgetSettings::default()).is_err());
        assert!(store.clear().is_err());
    }
}
