use std::collections::{BTreeMap, HashMap};

use stow_types::{Blob, Primitive, PrimitiveKind, Timestamp, Value};

use crate::error::{CodecError, CodecResult};

/// A type that maps losslessly to and from a store [`Value`].
///
/// This is the end of every conversion chain: the primitive Rust types map to
/// a single [`Primitive`], and arrays or string-keyed maps of representations
/// map to the corresponding container.
pub trait Representation: Sized {
    fn into_value(self) -> Value;

    /// Interpret a stored value. Fails with `TypeMismatch` on the wrong shape.
    fn from_value(value: Value) -> CodecResult<Self>;
}

macro_rules! scalar_representation {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Representation for $ty {
                fn into_value(self) -> Value {
                    Value::Primitive(Primitive::$variant(self))
                }

                fn from_value(value: Value) -> CodecResult<Self> {
                    match value {
                        Value::Primitive(Primitive::$variant(v)) => Ok(v),
                        other => Err(CodecError::mismatch(
                            PrimitiveKind::$variant.name(),
                            other.kind().name(),
                        )),
                    }
                }
            }
        )*
    };
}

scalar_representation! {
    bool => Bool,
    i64 => Int,
    f32 => Float,
    f64 => Double,
    Blob => Data,
    String => String,
    Timestamp => Date,
}

impl Representation for Value {
    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> CodecResult<Self> {
        Ok(value)
    }
}

impl<R: Representation> Representation for Vec<R> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(R::into_value).collect())
    }

    fn from_value(value: Value) -> CodecResult<Self> {
        value.into_array()?.into_iter().map(R::from_value).collect()
    }
}

impl<R: Representation> Representation for BTreeMap<String, R> {
    fn into_value(self) -> Value {
        Value::Dictionary(self.into_iter().map(|(k, v)| (k, v.into_value())).collect())
    }

    fn from_value(value: Value) -> CodecResult<Self> {
        value
            .into_dictionary()?
            .into_iter()
            .map(|(k, v)| R::from_value(v).map(|v| (k, v)))
            .collect()
    }
}

impl<R: Representation> Representation for HashMap<String, R> {
    fn into_value(self) -> Value {
        Value::Dictionary(self.into_iter().map(|(k, v)| (k, v.into_value())).collect())
    }

    fn from_value(value: Value) -> CodecResult<Self> {
        value
            .into_dictionary()?
            .into_iter()
            .map(|(k, v)| R::from_value(v).map(|v| (k, v)))
            .collect()
    }
}
