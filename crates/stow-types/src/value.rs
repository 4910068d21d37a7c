use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blob::Blob;
use crate::error::TypeError;
use crate::temporal::Timestamp;

/// Tag naming the kind of a [`Primitive`] or [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Bool,
    Int,
    Float,
    Double,
    Data,
    String,
    Date,
    /// Ordered container (not a primitive itself).
    Array,
    /// String-keyed container (not a primitive itself).
    Dictionary,
}

impl PrimitiveKind {
    /// Lowercase name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Data => "data",
            Self::String => "string",
            Self::Date => "date",
            Self::Array => "array",
            Self::Dictionary => "dictionary",
        }
    }

    /// Returns `true` for the directly-storable scalar kinds.
    pub const fn is_scalar(self) -> bool {
        !matches!(self, Self::Array | Self::Dictionary)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A directly-storable scalar.
///
/// This is the closed set of kinds a settings store accepts as-is. Values are
/// only ever built through typed constructors, so a non-native value can
/// never be handed to a store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Bool(bool),
    Int(i64),
    Float(f32),
    Double(f64),
    Data(Blob),
    String(String),
    Date(Timestamp),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::Int(_) => PrimitiveKind::Int,
            Self::Float(_) => PrimitiveKind::Float,
            Self::Double(_) => PrimitiveKind::Double,
            Self::Data(_) => PrimitiveKind::Data,
            Self::String(_) => PrimitiveKind::String,
            Self::Date(_) => PrimitiveKind::Date,
        }
    }
}

macro_rules! primitive_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                fn from(v: $ty) -> Self {
                    Primitive::$variant(v)
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Primitive(Primitive::$variant(v))
                }
            }
        )*
    };
}

primitive_from! {
    bool => Bool,
    i64 => Int,
    f32 => Float,
    f64 => Double,
    Blob => Data,
    String => String,
    Timestamp => Date,
}

impl From<&str> for Primitive {
    fn from(v: &str) -> Self {
        Primitive::String(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Primitive(Primitive::String(v.to_string()))
    }
}

/// What a settings store physically holds under a key.
///
/// A property-list tree: scalars at the leaves, arrays and string-keyed
/// dictionaries as the only containers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Primitive(Primitive),
    Array(Vec<Value>),
    Dictionary(BTreeMap<String, Value>),
}

impl Value {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Primitive(p) => p.kind(),
            Self::Array(_) => PrimitiveKind::Array,
            Self::Dictionary(_) => PrimitiveKind::Dictionary,
        }
    }

    /// Returns `true` if this is a scalar leaf.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// An empty array.
    pub fn empty_array() -> Self {
        Self::Array(Vec::new())
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    /// Take the scalar out of this value, failing on containers.
    pub fn into_primitive(self) -> Result<Primitive, TypeError> {
        match self {
            Self::Primitive(p) => Ok(p),
            other => Err(TypeError::KindMismatch {
                expected: "primitive",
                found: other.kind().name(),
            }),
        }
    }

    /// Take the elements out of an array value.
    pub fn into_array(self) -> Result<Vec<Value>, TypeError> {
        match self {
            Self::Array(items) => Ok(items),
            other => Err(TypeError::KindMismatch {
                expected: PrimitiveKind::Array.name(),
                found: other.kind().name(),
            }),
        }
    }

    /// Take the entries out of a dictionary value.
    pub fn into_dictionary(self) -> Result<BTreeMap<String, Value>, TypeError> {
        match self {
            Self::Dictionary(map) => Ok(map),
            other => Err(TypeError::KindMismatch {
                expected: PrimitiveKind::Dictionary.name(),
                found: other.kind().name(),
            }),
        }
    }

    /// Number of primitive leaves in this tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Primitive(_) => 1,
            Self::Array(items) => items.iter().map(Value::leaf_count).sum(),
            Self::Dictionary(map) => map.values().map(Value::leaf_count).sum(),
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Value::Primitive(p)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Dictionary(map)
    }
}
