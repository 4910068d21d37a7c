//! Structured records stored as opaque blobs.
//!
//! Any serde type can be persisted by serializing it to a [`Blob`]. The
//! value is always wrapped in a single-field envelope before encoding so the
//! root is a container, which keeps bare scalars and unit-like types
//! encodable by every structured format.
//!
//! Every freshly encoded record is decoded once before it is handed back.
//! A record that would not read back fails to encode with `MalformedRecord`,
//! so it never reaches a store.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stow_types::Blob;

use crate::error::{CodecError, CodecResult};
use crate::finite;
use crate::storable::Storable;

/// Structured encoder used for record blobs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFormat {
    /// UTF-8 JSON. Self-describing, so optional, flattened, untagged and
    /// dynamic fields all read back.
    #[default]
    Json,
    /// Compact binary encoding. Needs a fixed field layout: types using
    /// `skip_serializing_if`, `flatten`, `untagged` or `deserialize_any`
    /// fail to encode.
    Bincode,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    value: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    value: T,
}

/// Serialize a record into a blob.
///
/// Fails with `MalformedRecord` when the serializer rejects the value, when
/// a JSON record holds a non-finite float, or when the bytes do not decode
/// back into `T`.
pub fn encode<T>(value: &T, format: RecordFormat) -> CodecResult<Blob>
where
    T: Serialize + DeserializeOwned,
{
    let envelope = EnvelopeRef { value };
    let bytes = match format {
        RecordFormat::Json => {
            finite::check(value)
                .map_err(|e| CodecError::MalformedRecord(format!("json encode: {e}")))?;
            serde_json::to_vec(&envelope)
                .map_err(|e| CodecError::MalformedRecord(format!("json encode: {e}")))?
        }
        RecordFormat::Bincode => bincode::serialize(&envelope)
            .map_err(|e| CodecError::MalformedRecord(format!("bincode encode: {e}")))?,
    };
    let blob = Blob::new(bytes);
    decode::<T>(&blob, format).map_err(|e| {
        CodecError::MalformedRecord(format!("encoded record does not read back: {e}"))
    })?;
    Ok(blob)
}

/// Parse a record out of a blob.
///
/// Corrupt bytes or a schema the type no longer matches fail with
/// `MalformedRecord`.
pub fn decode<T: DeserializeOwned>(blob: &Blob, format: RecordFormat) -> CodecResult<T> {
    let envelope: Envelope<T> = match format {
        RecordFormat::Json => serde_json::from_slice(blob.as_bytes())
            .map_err(|e| CodecError::MalformedRecord(format!("json decode: {e}")))?,
        RecordFormat::Bincode => bincode::deserialize(blob.as_bytes())
            .map_err(|e| CodecError::MalformedRecord(format!("bincode decode: {e}")))?,
    };
    Ok(envelope.value)
}

/// Stores any serde type as a record in the default format.
///
/// Use this for types you cannot implement [`Storable`] on directly; for your
/// own types prefer [`storable_record!`](crate::storable_record).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Record<T>(pub T);

impl<T> Record<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Serialize + DeserializeOwned> Storable for Record<T> {
    type Repr = Blob;

    fn encode(&self) -> CodecResult<Self::Repr> {
        encode(&self.0, RecordFormat::default())
    }

    fn decode(repr: Self::Repr) -> CodecResult<Self> {
        decode(&repr, RecordFormat::default()).map(Record)
    }
}

/// Implement [`Storable`](crate::Storable) for a serde type as a record blob.
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Window {
///     width: u32,
///     height: u32,
/// }
///
/// stow_codec::storable_record!(Window);
/// ```
///
/// A second argument picks the format:
/// `storable_record!(Window, stow_codec::RecordFormat::Bincode)`.
#[macro_export]
macro_rules! storable_record {
    ($ty:ty) => {
        $crate::storable_record!($ty, $crate::RecordFormat::Json);
    };
    ($ty:ty, $format:expr) => {
        impl $crate::Storable for $ty {
            type Repr = $crate::Blob;

            fn encode(&self) -> $crate::CodecResult<Self::Repr> {
                $crate::record::encode(self, $format)
            }

            fn decode(repr: Self::Repr) -> $crate::CodecResult<Self> {
                $crate::record::decode(&repr, $format)
            }
        }
    };
}
