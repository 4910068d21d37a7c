use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use stow_codec::{from_value, to_value, Storable};
use stow_store::{standard, SettingsStore};
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics, StoreOperation, TracingDiagnostics};

// ---------------------------------------------------------------------------
// Backed
// ---------------------------------------------------------------------------

/// A typed property backed by one key of a settings store.
///
/// The store is read exactly once, when the binding is built. After that
/// reads come from the cached value, and [`set`](Self::set) updates the cache
/// and writes through. None of the operations can fail: decode, encode, and
/// store failures go to the binding's [`Diagnostics`] channel.
pub struct Backed<T: Storable + Clone> {
    key: String,
    default: T,
    value: T,
    store: Arc<dyn SettingsStore>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<T: Storable + Clone> Backed<T> {
    /// Bind `key` in `store`, reporting failures through `tracing`.
    pub fn new(key: impl Into<String>, default: T, store: Arc<dyn SettingsStore>) -> Self {
        Self::builder(key, default).store(store).build()
    }

    /// Start configuring a binding. Without further calls it binds the
    /// process-wide [`standard`] store.
    pub fn builder(key: impl Into<String>, default: T) -> BackedBuilder<T> {
        BackedBuilder {
            key: key.into(),
            default,
            store: None,
            diagnostics: None,
        }
    }

    fn bind(
        key: String,
        default: T,
        store: Arc<dyn SettingsStore>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        let stored = match store.get(&key) {
            Ok(stored) => stored,
            Err(e) => {
                diagnostics.report(&Diagnostic::StoreFailed {
                    key: key.clone(),
                    operation: StoreOperation::Get,
                    error: e.to_string(),
                });
                None
            }
        };

        let value = match stored {
            None => {
                debug!(key = %key, "no stored value, using default");
                default.clone()
            }
            Some(stored) => match from_value::<T>(stored) {
                Ok(value) => {
                    debug!(key = %key, "restored stored value");
                    value
                }
                Err(error) => {
                    diagnostics.report(&Diagnostic::DecodeFailed {
                        key: key.clone(),
                        error,
                    });
                    default.clone()
                }
            },
        };

        Self {
            key,
            default,
            value,
            store,
            diagnostics,
        }
    }

    /// The cached value. Never touches the store.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the cached value and write it through.
    ///
    /// The cache is updated even when encoding or the store write fails, so
    /// the in-memory and persisted values can diverge until a later write
    /// succeeds.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.write_through();
    }

    /// Mutate the cached value in place, then write it through.
    pub fn update<F: FnOnce(&mut T)>(&mut self, f: F) {
        f(&mut self.value);
        self.write_through();
    }

    /// Restore the default and erase the stored entry.
    ///
    /// Erasing an absent entry is a no-op, so clearing twice is the same as
    /// clearing once.
    pub fn clear(&mut self) {
        self.value = self.default.clone();
        if let Err(e) = self.store.remove(&self.key) {
            self.diagnostics.report(&Diagnostic::StoreFailed {
                key: self.key.clone(),
                operation: StoreOperation::Remove,
                error: e.to_string(),
            });
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// The store this binding writes to.
    pub fn store(&self) -> &Arc<dyn SettingsStore> {
        &self.store
    }

    /// Unbind, keeping the cached value.
    pub fn into_inner(self) -> T {
        self.value
    }

    fn write_through(&self) {
        let encoded = match to_value(&self.value) {
            Ok(encoded) => encoded,
            Err(error) => {
                self.diagnostics.report(&Diagnostic::EncodeFailed {
                    key: self.key.clone(),
                    error,
                });
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, encoded) {
            self.diagnostics.report(&Diagnostic::StoreFailed {
                key: self.key.clone(),
                operation: StoreOperation::Set,
                error: e.to_string(),
            });
        }
    }
}

impl<T: Storable + Clone> Backed<Option<T>> {
    /// Bind an optional property whose default is `None`.
    pub fn optional(key: impl Into<String>, store: Arc<dyn SettingsStore>) -> Self {
        Self::new(key, None, store)
    }
}

impl<T: Storable + Clone> Deref for Backed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Storable + Clone + fmt::Debug> fmt::Debug for Backed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backed")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("default", &self.default)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// BackedBuilder
// ---------------------------------------------------------------------------

/// Configuration for a [`Backed`] binding.
///
/// | Setting       | Default                 |
/// |---------------|-------------------------|
/// | `store`       | [`standard()`] store    |
/// | `diagnostics` | [`TracingDiagnostics`]  |
pub struct BackedBuilder<T: Storable + Clone> {
    key: String,
    default: T,
    store: Option<Arc<dyn SettingsStore>>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
}

impl<T: Storable + Clone> BackedBuilder<T> {
    pub fn store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Read the store once and produce the bound property.
    pub fn build(self) -> Backed<T> {
        let store: Arc<dyn SettingsStore> = match self.store {
            Some(store) => store,
            None => standard(),
        };
        let diagnostics: Arc<dyn Diagnostics> = match self.diagnostics {
            Some(diagnostics) => diagnostics,
            None => Arc::new(TracingDiagnostics),
        };
        Backed::bind(self.key, self.default, store, diagnostics)
    }
}
