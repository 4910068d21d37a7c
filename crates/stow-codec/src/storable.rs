use std::path::PathBuf;

use stow_types::{Blob, Timestamp, Value};
use url::Url;

use crate::error::{CodecError, CodecResult};
use crate::repr::Representation;

/// A type that can be persisted through a settings store.
///
/// `encode` is expected to succeed for every well-formed value; `decode` is
/// partial and must fail cleanly on data written by another type or an older
/// schema. Implementations compose: the representation of a composite is
/// built from the representations of its parts, bottoming out in a
/// [`Representation`].
pub trait Storable: Sized {
    /// What this type encodes into.
    type Repr: Representation;

    fn encode(&self) -> CodecResult<Self::Repr>;

    fn decode(repr: Self::Repr) -> CodecResult<Self>;
}

// The primitive types a store accepts as-is are their own representation.
macro_rules! directly_storable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Storable for $ty {
                type Repr = $ty;

                fn encode(&self) -> CodecResult<Self::Repr> {
                    Ok(self.clone())
                }

                fn decode(repr: Self::Repr) -> CodecResult<Self> {
                    Ok(repr)
                }
            }
        )*
    };
}

directly_storable!(bool, i64, f32, f64, Blob, String, Timestamp);

// The dynamic value tree is storable as-is, for untyped settings.
impl Storable for Value {
    type Repr = Value;

    fn encode(&self) -> CodecResult<Self::Repr> {
        Ok(self.clone())
    }

    fn decode(repr: Self::Repr) -> CodecResult<Self> {
        Ok(repr)
    }
}

// Narrow integers widen losslessly into the `Int` kind and range-check on the
// way back.
macro_rules! narrow_int_storable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Storable for $ty {
                type Repr = i64;

                fn encode(&self) -> CodecResult<Self::Repr> {
                    Ok(i64::from(*self))
                }

                fn decode(repr: Self::Repr) -> CodecResult<Self> {
                    <$ty>::try_from(repr).map_err(|_| {
                        CodecError::mismatch(stringify!($ty), format!("int {repr}"))
                    })
                }
            }
        )*
    };
}

narrow_int_storable!(i8, i16, i32, u8, u16, u32);

// Wide unsigned integers can hold values the store has no kind for.
macro_rules! wide_int_storable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Storable for $ty {
                type Repr = i64;

                fn encode(&self) -> CodecResult<Self::Repr> {
                    i64::try_from(*self).map_err(|_| {
                        CodecError::UnsupportedPrimitiveType(format!(
                            "{} value {} exceeds the int range",
                            stringify!($ty),
                            self
                        ))
                    })
                }

                fn decode(repr: Self::Repr) -> CodecResult<Self> {
                    <$ty>::try_from(repr).map_err(|_| {
                        CodecError::mismatch(stringify!($ty), format!("int {repr}"))
                    })
                }
            }
        )*
    };
}

wide_int_storable!(u64, usize);

impl Storable for PathBuf {
    type Repr = String;

    fn encode(&self) -> CodecResult<Self::Repr> {
        self.to_str().map(str::to_string).ok_or_else(|| {
            CodecError::UnsupportedPrimitiveType(format!(
                "path {} is not valid UTF-8",
                self.display()
            ))
        })
    }

    fn decode(repr: Self::Repr) -> CodecResult<Self> {
        Ok(PathBuf::from(repr))
    }
}

impl Storable for Url {
    type Repr = String;

    fn encode(&self) -> CodecResult<Self::Repr> {
        Ok(self.as_str().to_string())
    }

    fn decode(repr: Self::Repr) -> CodecResult<Self> {
        Url::parse(&repr)
            .map_err(|e| CodecError::mismatch("url", format!("string {repr:?} ({e})")))
    }
}

/// Run the full encode chain down to a store value.
pub fn to_value<T: Storable>(value: &T) -> CodecResult<Value> {
    Ok(value.encode()?.into_value())
}

/// Run the full decode chain up from a store value.
pub fn from_value<T: Storable>(value: Value) -> CodecResult<T> {
    T::decode(T::Repr::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stow_types::temporal;

    fn roundtrip<T: Storable>(value: &T) -> T {
        from_value(to_value(value).unwrap()).unwrap()
    }

    // -----------------------------------------------------------------------
    // Directly-storable identity
    // -----------------------------------------------------------------------

    #[test]
    fn primitives_encode_to_themselves() {
        assert_eq!(to_value(&true).unwrap(), Value::from(true));
        assert_eq!(to_value(&-5i64).unwrap(), Value::from(-5i64));
        assert_eq!(to_value(&0.25f32).unwrap(), Value::from(0.25f32));
        assert_eq!(to_value(&0.5f64).unwrap(), Value::from(0.5f64));
        assert_eq!(
            to_value(&"hello".to_string()).unwrap(),
            Value::from("hello")
        );
    }

    #[test]
    fn timestamp_roundtrip() {
        let ts = temporal::from_millis(1_576_000_000_000).unwrap();
        assert_eq!(roundtrip(&ts), ts);
    }

    #[test]
    fn blob_roundtrip() {
        let blob = Blob::new(vec![0, 255, 7]);
        assert_eq!(roundtrip(&blob), blob);
    }

    // -----------------------------------------------------------------------
    // Integer widths
    // -----------------------------------------------------------------------

    #[test]
    fn narrow_int_widens() {
        assert_eq!(to_value(&200u8).unwrap(), Value::from(200i64));
        assert_eq!(roundtrip(&-30_000i16), -30_000i16);
    }

    #[test]
    fn narrow_int_out_of_range_is_mismatch() {
        let err = from_value::<u8>(Value::from(300i64)).unwrap_err();
        assert_eq!(err, CodecError::mismatch("u8", "int 300"));
        assert!(from_value::<u32>(Value::from(-1i64)).is_err());
    }

    #[test]
    fn huge_u64_is_unsupported() {
        let err = to_value(&u64::MAX).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedPrimitiveType(_)));
        assert_eq!(roundtrip(&(i64::MAX as u64)), i64::MAX as u64);
    }

    #[test]
    fn negative_int_into_usize_is_mismatch() {
        let err = from_value::<usize>(Value::from(-3i64)).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    // -----------------------------------------------------------------------
    // Paths and dynamic values
    // -----------------------------------------------------------------------

    #[test]
    fn path_roundtrip() {
        let path = PathBuf::from("/var/lib/stow/settings");
        assert_eq!(to_value(&path).unwrap(), Value::from("/var/lib/stow/settings"));
        assert_eq!(roundtrip(&path), path);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_is_unsupported() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = PathBuf::from(OsStr::from_bytes(&[0x66, 0x6f, 0x80]));
        let err = to_value(&path).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedPrimitiveType(_)));
    }

    #[test]
    fn url_roundtrip() {
        let url = Url::parse("https://example.com/settings?tab=general#top").unwrap();
        assert_eq!(
            to_value(&url).unwrap(),
            Value::from("https://example.com/settings?tab=general#top")
        );
        assert_eq!(roundtrip(&url), url);

        let file = Url::parse("file:///var/lib/stow/settings.plist").unwrap();
        assert_eq!(roundtrip(&file), file);
    }

    #[test]
    fn unparsable_url_is_mismatch() {
        let err = from_value::<Url>(Value::from("not a url")).unwrap_err();
        match err {
            CodecError::TypeMismatch { expected, found } => {
                assert_eq!(expected, "url");
                assert!(found.contains("not a url"));
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
        assert!(from_value::<Url>(Value::from(3i64)).is_err());
    }

    #[test]
    fn optional_url_roundtrip() {
        let url = Some(Url::parse("https://example.com").unwrap());
        assert_eq!(roundtrip(&url), url);
        assert_eq!(roundtrip(&None::<Url>), None);
    }

    #[test]
    fn dynamic_value_passes_through() {
        let value = Value::Array(vec![Value::from(1i64), Value::from("two")]);
        assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn wrong_primitive_kind_is_mismatch() {
        let err = from_value::<String>(Value::from(1.5f64)).unwrap_err();
        assert_eq!(err, CodecError::mismatch("string", "double"));
    }

    // -----------------------------------------------------------------------
    // Round-trip law
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn bool_roundtrips(v in any::<bool>()) {
            prop_assert_eq!(roundtrip(&v), v);
        }

        #[test]
        fn int_roundtrips(v in any::<i64>()) {
            prop_assert_eq!(roundtrip(&v), v);
        }

        #[test]
        fn float_roundtrips(v in -1.0e30f32..1.0e30f32) {
            prop_assert_eq!(roundtrip(&v), v);
        }

        #[test]
        fn double_roundtrips(v in -1.0e300f64..1.0e300f64) {
            prop_assert_eq!(roundtrip(&v), v);
        }

        #[test]
        fn string_roundtrips(v in any::<String>()) {
            prop_assert_eq!(roundtrip(&v), v);
        }

        #[test]
        fn blob_bytes_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let blob = Blob::new(bytes);
            prop_assert_eq!(roundtrip(&blob), blob);
        }

        #[test]
        fn date_roundtrips(millis in -8_000_000_000_000i64..8_000_000_000_000i64) {
            let ts = temporal::from_millis(millis).unwrap();
            prop_assert_eq!(roundtrip(&ts), ts);
        }

        #[test]
        fn i32_roundtrips(v in any::<i32>()) {
            prop_assert_eq!(roundtrip(&v), v);
        }
    }
}
