//! The process-wide shared settings store.

use std::sync::{Arc, OnceLock};

use crate::memory::InMemorySettingsStore;

static STANDARD: OnceLock<Arc<InMemorySettingsStore>> = OnceLock::new();

/// The store used by bindings that are not given one explicitly.
///
/// Every call returns a handle to the same instance, so keys written through
/// one handle are visible through all others for the life of the process.
pub fn standard() -> Arc<InMemorySettingsStore> {
    Arc::clone(STANDARD.get_or_init(|| Arc::new(InMemorySettingsStore::new())))
}
