//! Keyed secure archives for legacy object graphs.
//!
//! An archivable type writes its fields under string keys into a
//! [`KeyedArchiver`] and rebuilds itself from a [`KeyedUnarchiver`]. The
//! archive records the class name, and unarchiving refuses an archive written
//! by a different class.
//!
//! Archive layout: `ARCHIVE_MAGIC` followed by a bincode-encoded
//! [`ArchivedObject`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stow_types::{Blob, Value};

use crate::error::{CodecError, CodecResult};
use crate::storable::{from_value, to_value, Storable};

/// Leading bytes of every archive blob.
pub const ARCHIVE_MAGIC: &[u8; 4] = b"STAR";

/// Current archive layout version.
pub const ARCHIVE_VERSION: u32 = 1;

/// The decoded body of an archive blob.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArchivedObject {
    pub version: u32,
    pub class: String,
    pub fields: BTreeMap<String, Value>,
}

/// A type that archives itself field by field.
pub trait SecureArchivable: Sized {
    /// Name checked on unarchive; must be stable across releases.
    const CLASS_NAME: &'static str;

    fn encode_with(&self, archiver: &mut KeyedArchiver);

    fn init_with(unarchiver: &KeyedUnarchiver) -> CodecResult<Self>;
}

/// Collects keyed fields while an object archives itself.
///
/// The first field that fails to encode is remembered and reported when the
/// archive is finished; later writes are still accepted.
#[derive(Debug, Default)]
pub struct KeyedArchiver {
    fields: BTreeMap<String, Value>,
    error: Option<CodecError>,
}

impl KeyedArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any earlier field with that key.
    pub fn encode<T: Storable>(&mut self, key: &str, value: &T) {
        match to_value(value) {
            Ok(v) => {
                self.fields.insert(key.to_string(), v);
            }
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
    }

    /// Store `value` under `key` only when present.
    pub fn encode_if_present<T: Storable>(&mut self, key: &str, value: Option<&T>) {
        if let Some(v) = value {
            self.encode(key, v);
        }
    }

    fn finish(self, class: &str) -> CodecResult<ArchivedObject> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(ArchivedObject {
            version: ARCHIVE_VERSION,
            class: class.to_string(),
            fields: self.fields,
        })
    }
}

/// Read access to the fields of an archive.
#[derive(Debug)]
pub struct KeyedUnarchiver {
    class: String,
    fields: BTreeMap<String, Value>,
}

impl KeyedUnarchiver {
    pub fn class_name(&self) -> &str {
        &self.class
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Decode a required field.
    pub fn decode<T: Storable>(&self, key: &str) -> CodecResult<T> {
        match self.fields.get(key) {
            Some(v) => from_value(v.clone()),
            None => Err(CodecError::mismatch(
                format!("field {key:?} of {}", self.class),
                "missing field",
            )),
        }
    }

    /// Decode a field that may be absent.
    pub fn decode_optional<T: Storable>(&self, key: &str) -> CodecResult<Option<T>> {
        self.fields
            .get(key)
            .map(|v| from_value(v.clone()))
            .transpose()
    }
}

/// Archive an object into a blob.
pub fn archive<T: SecureArchivable>(value: &T) -> CodecResult<Blob> {
    let mut archiver = KeyedArchiver::new();
    value.encode_with(&mut archiver);
    let object = archiver.finish(T::CLASS_NAME)?;

    let body = bincode::serialize(&object)
        .map_err(|e| CodecError::MalformedRecord(format!("archive encode: {e}")))?;
    let mut bytes = Vec::with_capacity(ARCHIVE_MAGIC.len() + body.len());
    bytes.extend_from_slice(ARCHIVE_MAGIC);
    bytes.extend_from_slice(&body);
    Ok(Blob::new(bytes))
}

/// Read the archive body without checking its class.
pub fn read_archive(blob: &Blob) -> CodecResult<ArchivedObject> {
    let body = blob
        .as_bytes()
        .strip_prefix(ARCHIVE_MAGIC.as_slice())
        .ok_or_else(|| CodecError::MalformedRecord("missing archive header".into()))?;
    let object: ArchivedObject = bincode::deserialize(body)
        .map_err(|e| CodecError::MalformedRecord(format!("archive decode: {e}")))?;
    if object.version != ARCHIVE_VERSION {
        return Err(CodecError::MalformedRecord(format!(
            "unsupported archive version {}",
            object.version
        )));
    }
    Ok(object)
}

/// Unarchive an object, refusing archives written by another class.
pub fn unarchive<T: SecureArchivable>(blob: &Blob) -> CodecResult<T> {
    let object = read_archive(blob)?;
    if object.class != T::CLASS_NAME {
        return Err(CodecError::mismatch(
            format!("archive of {}", T::CLASS_NAME),
            format!("archive of {}", object.class),
        ));
    }
    T::init_with(&KeyedUnarchiver {
        class: object.class,
        fields: object.fields,
    })
}

/// Implement [`Storable`](crate::Storable) for a [`SecureArchivable`] type.
#[macro_export]
macro_rules! storable_archive {
    ($ty:ty) => {
        impl $crate::Storable for $ty {
            type Repr = $crate::Blob;

            fn encode(&self) -> $crate::CodecResult<Self::Repr> {
                $crate::archive::archive(self)
            }

            fn decode(repr: Self::Repr) -> $crate::CodecResult<Self> {
                $crate::archive::unarchive(&repr)
            }
        }
    };
}
