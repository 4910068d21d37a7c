//! Store-backed typed properties for stow.
//!
//! A [`Backed<T>`] pairs a key, a default, and a settings store with a cached
//! typed value. It reads the store once when bound, serves reads from the
//! cache, and writes every assignment through.
//!
//! Bindings never fail. A stored value that cannot be decoded falls back to
//! the default, and a value that cannot be encoded stays in memory only; both
//! are reported to an injectable [`Diagnostics`] channel. Callers that need
//! strict error handling should use `stow-codec` directly.
//!
//! # Concurrency
//!
//! A binding holds no locks. Two bindings over the same key are not kept in
//! sync: each caches its own copy and the store keeps whichever write landed
//! last.

pub mod backed;
pub mod diagnostics;

pub use backed::{Backed, BackedBuilder};
pub use diagnostics::{
    Diagnostic, Diagnostics, RecordingDiagnostics, StoreOperation, TracingDiagnostics,
};
