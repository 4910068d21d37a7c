//! Generic composition rules: sequences, string-keyed maps, and optionals.
//!
//! Each rule derives its representation mechanically from the element's, so
//! any nesting of these over a [`Storable`] type is itself storable.

use std::collections::{BTreeMap, HashMap};

use crate::error::{CodecError, CodecResult};
use crate::storable::Storable;

impl<T: Storable> Storable for Vec<T> {
    type Repr = Vec<T::Repr>;

    fn encode(&self) -> CodecResult<Self::Repr> {
        self.iter().map(Storable::encode).collect()
    }

    fn decode(repr: Self::Repr) -> CodecResult<Self> {
        repr.into_iter().map(T::decode).collect()
    }
}

impl<T: Storable> Storable for BTreeMap<String, T> {
    type Repr = BTreeMap<String, T::Repr>;

    fn encode(&self) -> CodecResult<Self::Repr> {
        self.iter()
            .map(|(k, v)| v.encode().map(|r| (k.clone(), r)))
            .collect()
    }

    fn decode(repr: Self::Repr) -> CodecResult<Self> {
        repr.into_iter()
            .map(|(k, r)| T::decode(r).map(|v| (k, v)))
            .collect()
    }
}

impl<T: Storable> Storable for HashMap<String, T> {
    type Repr = HashMap<String, T::Repr>;

    fn encode(&self) -> CodecResult<Self::Repr> {
        self.iter()
            .map(|(k, v)| v.encode().map(|r| (k.clone(), r)))
            .collect()
    }

    fn decode(repr: Self::Repr) -> CodecResult<Self> {
        repr.into_iter()
            .map(|(k, r)| T::decode(r).map(|v| (k, v)))
            .collect()
    }
}

/// `None` is an empty array and `Some(v)` a one-element array, so absence
/// survives a store that cannot hold a null.
impl<T: Storable> Storable for Option<T> {
    type Repr = Vec<T::Repr>;

    fn encode(&self) -> CodecResult<Self::Repr> {
        match self {
            Some(value) => Ok(vec![value.encode()?]),
            None => Ok(Vec::new()),
        }
    }

    fn decode(repr: Self::Repr) -> CodecResult<Self> {
        if repr.len() > 1 {
            return Err(CodecError::mismatch(
                "array of 0 or 1 elements",
                format!("array of {} elements", repr.len()),
            ));
        }
        repr.into_iter().next().map(T::decode).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storable::{from_value, to_value};
    use proptest::prelude::*;
    use stow_types::Value;

    fn roundtrip<T: Storable>(value: &T) -> T {
        from_value(to_value(value).unwrap()).unwrap()
    }

    // -----------------------------------------------------------------------
    // Sequences
    // -----------------------------------------------------------------------

    #[test]
    fn vec_encodes_to_array() {
        let value = to_value(&vec![1i64, 2]).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![Value::from(1i64), Value::from(2i64)])
        );
    }

    #[test]
    fn empty_vec_roundtrip() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(roundtrip(&empty), empty);
    }

    #[test]
    fn vec_element_failure_propagates() {
        let err = to_value(&vec![1u64, u64::MAX]).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedPrimitiveType(_)));
    }

    // -----------------------------------------------------------------------
    // Maps
    // -----------------------------------------------------------------------

    #[test]
    fn btree_map_encodes_to_dictionary() {
        let mut map = BTreeMap::new();
        map.insert("volume".to_string(), 11u8);
        let value = to_value(&map).unwrap();
        assert_eq!(value.as_dictionary().unwrap()["volume"], Value::from(11i64));
        assert_eq!(roundtrip(&map), map);
    }

    #[test]
    fn hash_map_of_vec_roundtrip() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), vec![true, false]);
        map.insert("b".to_string(), Vec::new());
        assert_eq!(roundtrip(&map), map);
    }

    #[test]
    fn map_value_mismatch_fails() {
        let mut dict = BTreeMap::new();
        dict.insert("k".to_string(), Value::from("not a number"));
        let err = from_value::<BTreeMap<String, i64>>(Value::Dictionary(dict)).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    // -----------------------------------------------------------------------
    // Optionals
    // -----------------------------------------------------------------------

    #[test]
    fn none_encodes_to_empty_array() {
        let none: Option<String> = None;
        assert_eq!(to_value(&none).unwrap(), Value::empty_array());
        assert_eq!(roundtrip(&none), None);
    }

    #[test]
    fn some_encodes_to_single_element() {
        let some = Some("x".to_string());
        assert_eq!(
            to_value(&some).unwrap(),
            Value::Array(vec![Value::from("x")])
        );
        assert_eq!(roundtrip(&some), some);
    }

    #[test]
    fn two_element_optional_is_rejected() {
        let value = Value::Array(vec![Value::from(1i64), Value::from(2i64)]);
        let err = from_value::<Option<i64>>(value).unwrap_err();
        assert_eq!(
            err,
            CodecError::mismatch("array of 0 or 1 elements", "array of 2 elements")
        );
    }

    #[test]
    fn optional_from_scalar_is_mismatch() {
        let err = from_value::<Option<i64>>(Value::from(1i64)).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn nested_optionals_stay_distinct() {
        let inner_none: Option<Option<i64>> = Some(None);
        let outer_none: Option<Option<i64>> = None;
        assert_eq!(
            to_value(&inner_none).unwrap(),
            Value::Array(vec![Value::empty_array()])
        );
        assert_eq!(roundtrip(&inner_none), inner_none);
        assert_eq!(roundtrip(&outer_none), outer_none);
    }

    #[test]
    fn vec_of_optionals() {
        let values = vec![Some(1i32), None, Some(3)];
        assert_eq!(roundtrip(&values), values);
    }

    // -----------------------------------------------------------------------
    // Round-trip law
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn vec_roundtrips(v in proptest::collection::vec(any::<i64>(), 0..16)) {
            prop_assert_eq!(roundtrip(&v), v);
        }

        #[test]
        fn map_roundtrips(m in proptest::collection::btree_map(".*", any::<String>(), 0..8)) {
            prop_assert_eq!(roundtrip(&m), m);
        }

        #[test]
        fn option_roundtrips(o in proptest::option::of(any::<String>())) {
            prop_assert_eq!(roundtrip(&o), o);
        }

        #[test]
        fn multi_element_optional_always_rejected(
            items in proptest::collection::vec(any::<bool>(), 2..8)
        ) {
            let value = Value::Array(items.into_iter().map(Value::from).collect());
            let is_mismatch = matches!(
                from_value::<Option<bool>>(value),
                Err(CodecError::TypeMismatch { .. })
            );
            prop_assert!(is_mismatch);
        }
    }
}
