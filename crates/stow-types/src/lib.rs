//! Store-native value model for stow.
//!
//! A settings store physically holds only a narrow set of scalar kinds plus
//! ordered arrays and string-keyed dictionaries of them. This crate defines
//! that model. Every other stow crate depends on `stow-types`.
//!
//! # Key Types
//!
//! - [`Primitive`]: the closed set of directly-storable scalars
//! - [`PrimitiveKind`]: tag naming a primitive (or container) kind
//! - [`Value`]: a property-list tree whose leaves are all primitives
//! - [`Blob`]: opaque byte payload
//! - [`Timestamp`]: UTC instant

pub mod blob;
pub mod error;
pub mod json;
pub mod temporal;
pub mod value;

pub use blob::Blob;
pub use error::TypeError;
pub use temporal::Timestamp;
pub use value::{Primitive, PrimitiveKind, Value};
