//! Typed properties persisted through a key-value settings store.
//!
//! Provides a unified API over the stow crates. This is the main entry point
//! for applications.
//!
//! ```
//! use std::sync::Arc;
//!
//! use stow::{Backed, InMemorySettingsStore};
//!
//! let store = Arc::new(InMemorySettingsStore::new());
//! let mut greeting = Backed::new("greeting", "hi".to_string(), store.clone());
//! greeting.set("hello".to_string());
//!
//! let reopened = Backed::new("greeting", "hi".to_string(), store);
//! assert_eq!(*reopened, "hello");
//! ```

pub use stow_binding::{
    Backed, BackedBuilder, Diagnostic, Diagnostics, RecordingDiagnostics, StoreOperation,
    TracingDiagnostics,
};
pub use stow_codec::{
    archive, from_value, raw, record, storable_archive, storable_raw, storable_record, to_value,
    CodecError, CodecResult, Color, KeyedArchiver, KeyedUnarchiver, RawRepresentable, Record,
    RecordFormat, Representation, SecureArchivable, Storable, Url,
};
pub use stow_store::{standard, InMemorySettingsStore, SettingsStore, StoreError, StoreResult};
pub use stow_types::{temporal, Blob, Primitive, PrimitiveKind, Timestamp, TypeError, Value};
