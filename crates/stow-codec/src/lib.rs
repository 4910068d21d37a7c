//! Typed conversion layer for stow.
//!
//! A settings store holds only [`Value`] trees of directly-storable
//! primitives. This crate lets arbitrary Rust types become persistable by
//! converting them, possibly through several hops, into such a tree.
//!
//! # Two tiers
//!
//! - [`Representation`] -- types that map losslessly to and from a [`Value`]:
//!   the seven primitive Rust types plus arrays and string-keyed maps of them.
//! - [`Storable`] -- any type with an `encode`/`decode` pair into some
//!   `Representation`. Each type fixes its own representation, and the chain
//!   is resolved statically through trait bounds.
//!
//! # Composition rules
//!
//! | Type                       | Representation                         |
//! |----------------------------|----------------------------------------|
//! | primitive                  | itself                                 |
//! | `PathBuf`, [`Url`]         | `String`                               |
//! | `Vec<T>`                   | `Vec<T::Repr>`                         |
//! | `BTreeMap<String, T>`      | `BTreeMap<String, T::Repr>`            |
//! | `Option<T>`                | `Vec<T::Repr>` with 0 or 1 elements    |
//! | serde record               | [`Blob`] via [`record`]                |
//! | [`RawRepresentable`] enum  | the raw value's representation         |
//! | [`SecureArchivable`] object| [`Blob`] via [`archive`]               |
//!
//! User types opt in with [`storable_record!`], [`storable_raw!`], or
//! [`storable_archive!`].

pub mod archive;
pub mod color;
pub mod compose;
pub mod error;
mod finite;
pub mod raw;
pub mod record;
pub mod repr;
pub mod storable;

pub use archive::{KeyedArchiver, KeyedUnarchiver, SecureArchivable};
pub use color::Color;
pub use error::{CodecError, CodecResult};
pub use raw::RawRepresentable;
pub use record::{Record, RecordFormat};
pub use repr::Representation;
pub use storable::{from_value, to_value, Storable};

// Re-export the value model so macro expansions and callers need one import.
pub use stow_types::{Blob, Primitive, PrimitiveKind, Timestamp, Value};
pub use url::Url;
