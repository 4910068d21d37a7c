//! Bridge between dynamic JSON documents and the store value model.
//!
//! JSON has no `Data` or `Date` kinds, so the mapping is lossy in the
//! outbound direction: blobs become hex strings and dates become RFC 3339
//! strings. Inbound, `null` and unsigned numbers above `i64::MAX` have no
//! store-native counterpart and are rejected.

use std::collections::BTreeMap;

use serde_json::{Map, Number};

use crate::error::TypeError;
use crate::value::{Primitive, Value};

impl Value {
    /// Convert a JSON document into a store value.
    pub fn from_json(json: serde_json::Value) -> Result<Self, TypeError> {
        match json {
            serde_json::Value::Null => Err(TypeError::UnsupportedPrimitive("null".into())),
            serde_json::Value::Bool(b) => Ok(Value::from(b)),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Ok(Value::from(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| Value::from_json(v).map(|v| (k, v)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Value::Dictionary),
        }
    }

    /// Render this value as JSON.
    pub fn to_json(&self) -> Result<serde_json::Value, TypeError> {
        match self {
            Value::Primitive(p) => primitive_to_json(p),
            Value::Array(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(serde_json::Value::Array),
            Value::Dictionary(map) => {
                let mut out = Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), v.to_json()?);
                }
                Ok(serde_json::Value::Object(out))
            }
        }
    }
}

fn number_to_value(n: &Number) -> Result<Value, TypeError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if n.is_u64() {
        return Err(TypeError::UnsupportedPrimitive(format!(
            "unsigned integer {n} exceeds i64 range"
        )));
    }
    n.as_f64()
        .map(Value::from)
        .ok_or_else(|| TypeError::UnsupportedPrimitive(format!("number {n}")))
}

fn primitive_to_json(p: &Primitive) -> Result<serde_json::Value, TypeError> {
    let json = match p {
        Primitive::Bool(b) => serde_json::Value::Bool(*b),
        Primitive::Int(i) => serde_json::Value::Number((*i).into()),
        Primitive::Float(f) => float_to_json(f64::from(*f))?,
        Primitive::Double(d) => float_to_json(*d)?,
        Primitive::Data(blob) => serde_json::Value::String(blob.to_hex()),
        Primitive::String(s) => serde_json::Value::String(s.clone()),
        Primitive::Date(ts) => serde_json::Value::String(ts.to_rfc3339()),
    };
    Ok(json)
}

fn float_to_json(f: f64) -> Result<serde_json::Value, TypeError> {
    Number::from_f64(f)
        .map(serde_json::Value::Number)
        .ok_or_else(|| TypeError::UnsupportedPrimitive(format!("non-finite number {f}")))
}
