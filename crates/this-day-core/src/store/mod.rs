//! Persisted UI state.
//!
//! The [`KeyValueStore`] trait is the storage capability: a flat map of
//! string keys to string blobs, enabling pluggable backends (in-memory for
//! tests, a directory of files for the CLI, browser storage for a WASM
//! front-end).
//!
//! [`StateStore`] keeps one [`PersistedUIState`] as a JSON blob under
//! [`STATE_KEY`]. Saving is a whole-blob replace; loading never fails the
//! caller.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterSet, SortKey};

/// The well-known key under which the UI state blob is stored.
pub const STATE_KEY: &str = "this-day.ui-state";

/// Errors reported by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Abstract string key-value storage.
///
/// `set` must replace the whole value atomically: a concurrent or later
/// `get` sees either the previous value or the new one, never a mix.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Everything about the UI that survives across sessions.
///
/// Missing fields in a stored blob take their defaults: no date, no
/// filters, source-order sort, filters panel expanded. Unknown fields mean
/// the blob belongs to some other schema, and it is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PersistedUIState {
    pub day: Option<u8>,
    pub month: Option<u8>,
    pub year: Option<i64>,
    pub filters: FilterSet,
    pub sort: SortKey,
    pub filters_collapsed: bool,
}

/// Loads and saves [`PersistedUIState`] through a [`KeyValueStore`].
pub struct StateStore<K: KeyValueStore> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> StateStore<K> {
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, STATE_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &K {
        &self.kv
    }

    /// Persist `state`, replacing whatever was stored.
    ///
    /// Failures are logged and swallowed.
    pub fn save(&self, state: &PersistedUIState) {
        let blob = match serde_json::to_string(state) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize UI state");
                return;
            }
        };
        if let Err(e) = self.kv.set(&self.key, &blob) {
            tracing::warn!(key = %self.key, error = %e, "could not save UI state");
        }
    }

    /// The stored state, or `None` if it is missing or unreadable.
    pub fn load(&self) -> Option<PersistedUIState> {
        let blob = match self.kv.get(&self.key) {
            Ok(Some(b)) => b,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read UI state");
                return None;
            }
        };
        match serde_json::from_str(&blob) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable UI state");
                None
            }
        }
    }

    /// Remove the stored state.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryKeyValueStore;
    use super::*;
    use crate::models::{Period, Scale};

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Backend("quota exceeded".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("quota exceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("quota exceeded".into()))
        }
    }

    fn full_state() -> PersistedUIState {
        PersistedUIState {
            day: Some(9),
            month: Some(5),
            year: Some(1945),
            filters: FilterSet {
                country: Some("russia".into()),
                category: Some("war".into()),
                scale: Some(Scale::Global),
                period: Some(Period::Contemporary),
            },
            sort: SortKey::ImportanceDescending,
            filters_collapsed: true,
        }
    }

    #[test]
    fn test_load_missing_is_none() {
        let store = StateStore::new(MemoryKeyValueStore::new());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupted_blob_then_round_trip() {
        let store = StateStore::new(MemoryKeyValueStore::new());
        store.backend().set(STATE_KEY, "{not json").unwrap();
        assert!(store.load().is_none());

        let state = full_state();
        store.save(&state);
        assert_eq!(store.load(), Some(state));
    }

    #[test]
    fn test_schema_mismatch_is_none() {
        let store = StateStore::new(MemoryKeyValueStore::new());
        store
            .backend()
            .set(STATE_KEY, r#"{"day": "first", "sort": 3}"#)
            .unwrap();
        assert!(store.load().is_none());
        store.backend().set(STATE_KEY, "42").unwrap();
        assert!(store.load().is_none());
        store
            .backend()
            .set(STATE_KEY, r#"{"unrelated": true}"#)
            .unwrap();
        assert!(store.load().is_none());
        store
            .backend()
            .set(STATE_KEY, r#"{"day": 1, "filters": {"colour": "red"}}"#)
            .unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_absent_fields_default() {
        let store = StateStore::new(MemoryKeyValueStore::new());
        store.backend().set(STATE_KEY, r#"{"day": 1, "month": 1}"#).unwrap();
        let state = store.load().unwrap();
        assert_eq!(state.day, Some(1));
        assert_eq!(state.year, None);
        assert!(state.filters.is_empty());
        assert_eq!(state.sort, SortKey::Relevance);
        assert!(!state.filters_collapsed);
    }

    #[test]
    fn test_save_replaces_whole_blob() {
        let store = StateStore::new(MemoryKeyValueStore::new());
        store.save(&full_state());
        let smaller = PersistedUIState {
            day: Some(1),
            month: Some(1),
            ..Default::default()
        };
        store.save(&smaller);
        assert_eq!(store.load(), Some(smaller));
    }

    #[test]
    fn test_backend_failures_are_swallowed() {
        let store = StateStore::new(FailingStore);
        store.save(&full_state());
        assert!(store.load().is_none());
        assert!(store.clear().is_err());
    }

    #[test]
    fn test_clear() {
        let store = StateStore::new(MemoryKeyValueStore::new());
        store.save(&full_state());
        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
