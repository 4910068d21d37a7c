use stow_types::Value;

use crate::error::{StoreError, StoreResult};

/// Key-value settings store.
///
/// All implementations must satisfy these invariants:
/// - `get` after `set` on the same key returns the value that was set.
/// - `set` overwrites any prior value under the key.
/// - `remove` of an absent key succeeds and returns `false`.
/// - Individual calls are safe to make from multiple threads.
pub trait SettingsStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Store `value` under `key`, replacing any prior value.
    fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Delete the entry for `key`. Returns `true` if an entry existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// Check whether an entry exists for `key`.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Read several keys at once.
    ///
    /// Default implementation calls `get()` for each key.
    fn get_many(&self, keys: &[&str]) -> StoreResult<Vec<Option<Value>>> {
        keys.iter().map(|key| self.get(key)).collect()
    }
}

/// Reject keys the store cannot address.
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
