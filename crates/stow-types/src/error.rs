use thiserror::Error;

/// Errors produced by value-model operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The value has no store-native counterpart.
    #[error("unsupported primitive type: {0}")]
    UnsupportedPrimitive(String),

    /// A value of one kind was used where another was required.
    #[error("expected {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid hex string: {0}")]
    InvalidHex(String),
}
