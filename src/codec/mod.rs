//! Polymorphic envelope codec.
//!
//! Every record travels inside the same envelope:
//!
//! ```json
//! {"type":"to-do","operation":"create","attributes":{"title":"Milk"}}
//! ```
//!
//! - **Fields**: per-kind tables of wire keys and value shapes
//! - **Envelope**: `type`/`operation`/`id` framing around `attributes`
//! - **Variant**: several kinds sharing one array slot, chosen by `type`
//! - **Date**: pluggable timestamp policy (ISO-8601 by default)
//!
//! # Example
//!
//! ```ignore
//! use tj::codec::Codec;
//! use tj::model::{Container, Todo};
//!
//! let mut doc = Container::new();
//! doc.push(Todo::new("Pick up dry cleaning").with_when("today"));
//!
//! let codec = Codec::default();
//! let text = codec.to_json(&doc)?;
//! assert_eq!(codec.parse(&text)?, doc);
//! ```

pub mod date;
pub mod envelope;
pub mod fields;
mod types;
pub mod variant;

pub use date::{DatePolicy, FALLBACK_PATTERN, FixedFormat, Iso8601};
pub use envelope::Header;
pub use fields::{AttributeReader, AttributeWriter, Field, Shape};
pub use types::{CodecError, CodecResult, json_type_name};

use serde_json::Value;

use crate::model::{Container, ContainerItem, Kind, Operation};

/// A record kind that travels in its own envelope.
///
/// Implementors provide the field table and the two per-field passes; the
/// envelope itself is handled by [`envelope::encode`] and
/// [`envelope::decode`].
pub trait Record: Sized {
    /// Discriminant written to `type`.
    const KIND: Kind;

    /// Field table for `attributes`.
    const FIELDS: &'static [Field];

    fn operation(&self) -> Operation;

    fn id(&self) -> Option<&str>;

    /// Write every present field.
    fn write_attributes(&self, out: &mut AttributeWriter<'_>);

    /// Build the record from its header and attributes.
    ///
    /// # Errors
    ///
    /// Returns `MalformedField` for any present field with the wrong shape.
    fn read_attributes(header: Header, attrs: &AttributeReader<'_>) -> CodecResult<Self>;
}

/// A closed set of record kinds sharing one JSON slot.
pub trait Variant: Sized {
    /// Candidate kinds in decode priority order.
    const CANDIDATES: &'static [Kind];

    /// Kind currently held.
    fn kind(&self) -> Kind;

    /// Encode the held record exactly as it would be encoded on its own.
    fn encode(&self, dates: &dyn DatePolicy) -> Value;

    /// Decode `value` as the candidate `kind`.
    ///
    /// # Errors
    ///
    /// Any error from the record decoder; `UnknownVariant` if `kind` is not
    /// a candidate.
    fn decode_as(kind: Kind, value: &Value, dates: &dyn DatePolicy) -> CodecResult<Self>;
}

/// Encoder/decoder bound to one date policy.
#[derive(Debug)]
pub struct Codec {
    dates: Box<dyn DatePolicy>,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(Iso8601)
    }
}

impl Codec {
    /// Create a codec using `dates` for timestamp fields.
    #[must_use]
    pub fn new(dates: impl DatePolicy + 'static) -> Self {
        Self {
            dates: Box::new(dates),
        }
    }

    /// Create a codec from an already boxed policy.
    #[must_use]
    pub fn with_policy(dates: Box<dyn DatePolicy>) -> Self {
        Self { dates }
    }

    /// The active date policy.
    #[must_use]
    pub fn dates(&self) -> &dyn DatePolicy {
        self.dates.as_ref()
    }

    /// Encode a document as a JSON array.
    #[must_use]
    pub fn encode(&self, doc: &Container) -> Value {
        Value::Array(
            doc.iter()
                .map(|item| item.encode(self.dates.as_ref()))
                .collect(),
        )
    }

    /// Decode a JSON array into a document.
    ///
    /// # Errors
    ///
    /// `NotAnArray` for a non-array root; otherwise the first error raised
    /// by any element.
    pub fn decode(&self, value: &Value) -> CodecResult<Container> {
        let elements = value.as_array().ok_or_else(|| CodecError::NotAnArray {
            found: json_type_name(value),
        })?;
        let items = elements
            .iter()
            .map(|element| variant::decode::<ContainerItem>(element, self.dates.as_ref()))
            .collect::<CodecResult<Vec<_>>>()?;
        tracing::debug!(count = items.len(), "decoded document");
        Ok(Container::from(items))
    }

    /// Encode a single record in its envelope.
    #[must_use]
    pub fn encode_record<R: Record>(&self, record: &R) -> Value {
        envelope::encode(record, self.dates.as_ref())
    }

    /// Decode a single envelope that must hold kind `R`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` when the envelope holds another kind, plus every
    /// structural error.
    pub fn decode_record<R: Record>(&self, value: &Value) -> CodecResult<R> {
        envelope::decode(value, self.dates.as_ref())
    }

    /// Decode a single variant slot.
    ///
    /// # Errors
    ///
    /// `UnknownVariant` when no candidate matches, plus every structural error.
    pub fn decode_variant<V: Variant>(&self, value: &Value) -> CodecResult<V> {
        variant::decode(value, self.dates.as_ref())
    }

    /// Encode a document as compact JSON text.
    ///
    /// # Errors
    ///
    /// Only serializer faults.
    pub fn to_json(&self, doc: &Container) -> CodecResult<String> {
        Ok(serde_json::to_string(&self.encode(doc))?)
    }

    /// Encode a document as indented JSON text.
    ///
    /// # Errors
    ///
    /// Only serializer faults.
    pub fn to_json_pretty(&self, doc: &Container) -> CodecResult<String> {
        Ok(serde_json::to_string_pretty(&self.encode(doc))?)
    }

    /// Parse and decode JSON text.
    ///
    /// # Errors
    ///
    /// `Json` for invalid JSON text, otherwise as [`Codec::decode`].
    pub fn parse(&self, text: &str) -> CodecResult<Container> {
        let value: Value = serde_json::from_str(text)?;
        self.decode(&value)
    }
}

/// serde glue using the default ISO-8601 policy, so records and documents
/// also work with `serde_json::to_string` / `from_str` directly.
macro_rules! impl_serde {
    (record $ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(
                    &$crate::codec::envelope::encode(self, &$crate::codec::Iso8601),
                    serializer,
                )
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                $crate::codec::envelope::decode(&value, &$crate::codec::Iso8601)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
    (variant $ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(
                    &$crate::codec::Variant::encode(self, &$crate::codec::Iso8601),
                    serializer,
                )
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                $crate::codec::variant::decode(&value, &$crate::codec::Iso8601)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
    (document $ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&$crate::codec::Codec::default().encode(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                $crate::codec::Codec::default()
                    .decode(&value)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_serde;
