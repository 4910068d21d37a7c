//! Raw-value-backed types, chiefly fieldless enums.
//!
//! A type that can be rebuilt from a raw value stores exactly what its raw
//! value stores. Decoding fails with `TypeMismatch` when the stored raw value
//! names no case, which is what happens when a case is removed between
//! releases.

use std::any::type_name;
use std::fmt::Debug;

use crate::error::{CodecError, CodecResult};
use crate::storable::Storable;

/// A type with a total mapping to a raw value and a partial mapping back.
pub trait RawRepresentable: Sized {
    type Raw: Storable + Debug;

    fn raw_value(&self) -> Self::Raw;

    /// Returns `None` if no case corresponds to `raw`.
    fn from_raw(raw: Self::Raw) -> Option<Self>;
}

/// Encode through the raw value.
pub fn encode<T: RawRepresentable>(value: &T) -> CodecResult<<T::Raw as Storable>::Repr> {
    value.raw_value().encode()
}

/// Decode the raw value, then map it to a case.
pub fn decode<T: RawRepresentable>(repr: <T::Raw as Storable>::Repr) -> CodecResult<T> {
    let raw = T::Raw::decode(repr)?;
    let found = format!("raw value {raw:?}");
    T::from_raw(raw).ok_or_else(|| CodecError::mismatch(type_name::<T>(), found))
}

/// Implement [`Storable`](crate::Storable) for a [`RawRepresentable`] type.
///
/// ```
/// use stow_codec::RawRepresentable;
///
/// enum Theme {
///     Light,
///     Dark,
/// }
///
/// impl RawRepresentable for Theme {
///     type Raw = String;
///
///     fn raw_value(&self) -> String {
///         match self {
///             Theme::Light => "light".into(),
///             Theme::Dark => "dark".into(),
///         }
///     }
///
///     fn from_raw(raw: String) -> Option<Self> {
///         match raw.as_str() {
///             "light" => Some(Theme::Light),
///             "dark" => Some(Theme::Dark),
///             _ => None,
///         }
///     }
/// }
///
/// stow_codec::storable_raw!(Theme);
/// ```
#[macro_export]
macro_rules! storable_raw {
    ($ty:ty) => {
        impl $crate::Storable for $ty {
            type Repr = <<$ty as $crate::RawRepresentable>::Raw as $crate::Storable>::Repr;

            fn encode(&self) -> $crate::CodecResult<Self::Repr> {
                $crate::raw::encode(self)
            }

            fn decode(repr: Self::Repr) -> $crate::CodecResult<Self> {
                $crate::raw::decode(repr)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storable::{from_value, to_value};
    use stow_types::Value;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Level {
        Low,
        Medium,
        High,
    }

    impl RawRepresentable for Level {
        type Raw = i32;

        fn raw_value(&self) -> i32 {
            *self as i32
        }

        fn from_raw(raw: i32) -> Option<Self> {
            match raw {
                0 => Some(Level::Low),
                1 => Some(Level::Medium),
                2 => Some(Level::High),
                _ => None,
            }
        }
    }

    crate::storable_raw!(Level);

    /// A URL-like value: a string raw value with validation.
    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Endpoint(String);

    impl RawRepresentable for Endpoint {
        type Raw = String;

        fn raw_value(&self) -> String {
            self.0.clone()
        }

        fn from_raw(raw: String) -> Option<Self> {
            let rest = raw
                .strip_prefix("https://")
                .or_else(|| raw.strip_prefix("http://"))?;
            (!rest.is_empty()).then(|| Endpoint(raw.clone()))
        }
    }

    crate::storable_raw!(Endpoint);

    #[test]
    fn enum_stores_raw_value() {
        assert_eq!(to_value(&Level::High).unwrap(), Value::from(2i64));
    }

    #[test]
    fn enum_roundtrip_all_cases() {
        for level in [Level::Low, Level::Medium, Level::High] {
            let decoded: Level = from_value(to_value(&level).unwrap()).unwrap();
            assert_eq!(decoded, level);
        }
    }

    #[test]
    fn removed_case_fails_cleanly() {
        let err = from_value::<Level>(Value::from(7i64)).unwrap_err();
        match err {
            CodecError::TypeMismatch { expected, found } => {
                assert!(expected.ends_with("Level"));
                assert_eq!(found, "raw value 7");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn raw_kind_mismatch_fails_before_case_lookup() {
        let err = from_value::<Level>(Value::from("high")).unwrap_err();
        assert_eq!(err, CodecError::mismatch("int", "string"));
    }

    #[test]
    fn raw_out_of_range_for_raw_type() {
        let err = from_value::<Level>(Value::from(i64::MAX)).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn string_backed_endpoint() {
        let endpoint = Endpoint("https://example.com/api".into());
        let value = to_value(&endpoint).unwrap();
        assert_eq!(value, Value::from("https://example.com/api"));
        assert_eq!(from_value::<Endpoint>(value).unwrap(), endpoint);
        assert!(from_value::<Endpoint>(Value::from("ftp://nope")).is_err());
    }

    #[test]
    fn optional_enum_composes() {
        let stored = to_value(&Some(Level::Medium)).unwrap();
        assert_eq!(stored, Value::Array(vec![Value::from(1i64)]));
        assert_eq!(from_value::<Option<Level>>(stored).unwrap(), Some(Level::Medium));
    }
}
