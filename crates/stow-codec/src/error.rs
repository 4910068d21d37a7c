use stow_types::TypeError;
use thiserror::Error;

/// Errors from encoding a typed value or decoding a stored one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A value has no directly-storable counterpart.
    #[error("unsupported primitive type: {0}")]
    UnsupportedPrimitiveType(String),

    /// The stored shape does not match the expected representation.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A structured blob could not be encoded or parsed.
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl CodecError {
    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl From<TypeError> for CodecError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::UnsupportedPrimitive(what) => Self::UnsupportedPrimitiveType(what),
            TypeError::KindMismatch { expected, found } => Self::mismatch(expected, found),
            TypeError::InvalidHex(reason) => Self::MalformedRecord(reason),
        }
    }
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
