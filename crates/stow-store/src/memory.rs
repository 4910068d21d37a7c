use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stow_types::Value;
use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::traits::{validate_key, SettingsStore};

/// In-memory, HashMap-based settings store.
///
/// Intended for tests and embedding. All entries are held in memory behind a
/// `RwLock` for safe concurrent access. Values are cloned on read/write.
pub struct InMemorySettingsStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemorySettingsStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-populated with the given entries.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            entries: RwLock::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.read_map().map(|map| map.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries from the store.
    pub fn clear(&self) -> StoreResult<()> {
        self.write_map()?.clear();
        Ok(())
    }

    /// Return a sorted list of all keys in the store.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        let map = self.read_map()?;
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Copy of every entry, for inspection.
    pub fn snapshot(&self) -> StoreResult<HashMap<String, Value>> {
        Ok(self.read_map()?.clone())
    }

    fn read_map(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Value>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write_map(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Value>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        validate_key(key)?;
        let value = self.read_map()?.get(key).cloned();
        trace!(key, found = value.is_some(), "settings get");
        Ok(value)
    }

    fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        validate_key(key)?;
        trace!(key, kind = %value.kind(), "settings set");
        self.write_map()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        let existed = self.write_map()?.remove(key).is_some();
        trace!(key, existed, "settings remove");
        Ok(existed)
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(self.read_map()?.contains_key(key))
    }
}

impl std::fmt::Debug for InMemorySettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySettingsStore")
            .field("entry_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stow_types::Blob;

    // -----------------------------------------------------------------------
    // Core get / set / remove
    // -----------------------------------------------------------------------

    #[test]
    fn set_and_get_primitive() {
        let store = InMemorySettingsStore::new();
        store.set("greeting", Value::from("hello")).unwrap();
        assert_eq!(store.get("greeting").unwrap(), Some(Value::from("hello")));
    }

    #[test]
    fn set_and_get_container() {
        let store = InMemorySettingsStore::new();
        let value = Value::Array(vec![Value::from(1i64), Value::from(Blob::new(vec![9]))]);
        store.set("list", value.clone()).unwrap();
        assert_eq!(store.get("list").unwrap(), Some(value));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemorySettingsStore::new();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn set_overwrites() {
        let store = InMemorySettingsStore::new();
        store.set("k", Value::from(1i64)).unwrap();
        store.set("k", Value::from(true)).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(Value::from(true)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_present_then_absent() {
        let store = InMemorySettingsStore::new();
        store.set("k", Value::from(1i64)).unwrap();
        assert!(store.remove("k").unwrap()); // was present
        assert!(!store.contains("k").unwrap()); // now gone
        assert!(!store.remove("k").unwrap()); // second remove = false
    }

    #[test]
    fn empty_key_rejected() {
        let store = InMemorySettingsStore::new();
        let err = store.set("", Value::from(1i64)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
        assert!(store.get("").is_err());
        assert!(store.remove("").is_err());
    }

    // -----------------------------------------------------------------------
    // Batch / utility
    // -----------------------------------------------------------------------

    #[test]
    fn get_many_with_missing() {
        let store = InMemorySettingsStore::new();
        store.set("a", Value::from(1i64)).unwrap();
        let results = store.get_many(&["a", "b"]).unwrap();
        assert!(results[0].is_some());
        assert!(results[1].is_none());
    }

    #[test]
    fn with_entries_prepopulates() {
        let store = InMemorySettingsStore::with_entries([
            ("x", Value::from(1i64)),
            ("y", Value::from(2i64)),
        ]);
        assert_eq!(store.keys().unwrap(), vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemorySettingsStore::new();
        store.set("a", Value::from(1i64)).unwrap();
        store.set("b", Value::from(2i64)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn snapshot_is_a_copy() {
        let store = InMemorySettingsStore::new();
        store.set("a", Value::from(1i64)).unwrap();
        let snap = store.snapshot().unwrap();
        store.remove("a").unwrap();
        assert_eq!(snap.len(), 1);
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_writers_last_write_wins() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemorySettingsStore::new());
        let handles: Vec<_> = (0..8i64)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.set("shared", Value::from(i)).unwrap();
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }

        let value = store.get("shared").unwrap().expect("some write landed");
        assert!(matches!(value, Value::Primitive(stow_types::Primitive::Int(0..=7))));
    }

    #[test]
    fn debug_format() {
        let store = InMemorySettingsStore::new();
        store.set("x", Value::from(true)).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemorySettingsStore"));
        assert!(debug.contains("entry_count"));
    }
}
