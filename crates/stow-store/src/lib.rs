//! Key-value settings store interface for stow.
//!
//! A settings store maps string keys to [`Value`](stow_types::Value) trees
//! whose leaves are directly-storable primitives. The store never interprets
//! what it holds; typed conversion lives in `stow-codec`.
//!
//! # Storage Backends
//!
//! All backends implement the [`SettingsStore`] trait:
//!
//! - [`InMemorySettingsStore`] -- `HashMap`-based store for tests and embedding
//! - [`standard()`] -- the process-wide shared store
//!
//! # Design Rules
//!
//! 1. Keys live in a single flat namespace shared by every binding.
//! 2. `set` overwrites; `remove` of an absent key is a no-op.
//! 3. Individual calls are thread-safe. There is no atomicity across a
//!    read-modify-write pair.

pub mod error;
pub mod memory;
pub mod standard;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemorySettingsStore;
pub use standard::standard;
pub use traits::SettingsStore;
