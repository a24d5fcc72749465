//! Envelope framing shared by every record kind.
//!
//! ```json
//! {"type":"to-do","operation":"update","id":"abc123","attributes":{"completed":true}}
//! ```
//!
//! `operation` may be omitted on input (it defaults to `create`); `id` is
//! written only when the record has one.

use serde_json::{Map, Value};

use super::date::DatePolicy;
use super::fields::{AttributeReader, AttributeWriter};
use super::types::{CodecError, CodecResult, json_type_name};
use super::Record;
use crate::model::Operation;

pub const TYPE_KEY: &str = "type";
pub const OPERATION_KEY: &str = "operation";
pub const ID_KEY: &str = "id";
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Envelope-level values handed to a record's field decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub operation: Operation,
    pub id: Option<String>,
}

/// Frame a record as `{type, operation, id?, attributes}`.
pub fn encode<R: Record>(record: &R, dates: &dyn DatePolicy) -> Value {
    let mut envelope = Map::new();
    envelope.insert(TYPE_KEY.to_string(), Value::from(R::KIND.as_str()));
    envelope.insert(
        OPERATION_KEY.to_string(),
        Value::from(record.operation().as_str()),
    );
    if let Some(id) = record.id() {
        envelope.insert(ID_KEY.to_string(), Value::from(id));
    }

    let mut attributes = AttributeWriter::new(R::FIELDS, dates);
    record.write_attributes(&mut attributes);
    envelope.insert(
        ATTRIBUTES_KEY.to_string(),
        Value::Object(attributes.finish()),
    );

    Value::Object(envelope)
}

/// Read the discriminant of an envelope without touching anything else.
///
/// # Errors
///
/// `NotAnObject` when `value` is not an object, `MissingDiscriminant` when
/// there is no `type` key, `MalformedField` when `type` is not a string.
pub fn peek_type(value: &Value) -> CodecResult<&str> {
    let envelope = as_object(value)?;
    match envelope.get(TYPE_KEY) {
        None => Err(CodecError::MissingDiscriminant),
        Some(Value::String(found)) => Ok(found),
        Some(other) => Err(CodecError::malformed(
            TYPE_KEY,
            format!("expected a string, found {}", json_type_name(other)),
        )),
    }
}

/// Decode an envelope that must hold kind `R`.
///
/// The discriminant is checked before `attributes` is read, so a bad
/// attribute value is always reported as such and never as a mismatch.
///
/// # Errors
///
/// `TypeMismatch` when the envelope holds another kind, plus every
/// structural error listed on [`CodecError`].
pub fn decode<R: Record>(value: &Value, dates: &dyn DatePolicy) -> CodecResult<R> {
    let found = peek_type(value)?;
    if found != R::KIND.as_str() {
        return Err(CodecError::TypeMismatch {
            expected: R::KIND,
            found: found.to_string(),
        });
    }
    let envelope = as_object(value)?;

    let operation = match envelope.get(OPERATION_KEY) {
        None => Operation::default(),
        Some(Value::String(s)) => s
            .parse()
            .map_err(|reason: String| CodecError::malformed(OPERATION_KEY, reason))?,
        Some(other) => {
            return Err(CodecError::malformed(
                OPERATION_KEY,
                format!("expected a string, found {}", json_type_name(other)),
            ));
        }
    };

    let id = match envelope.get(ID_KEY) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(CodecError::malformed(
                ID_KEY,
                format!("expected a string, found {}", json_type_name(other)),
            ));
        }
    };

    let attributes = envelope
        .get(ATTRIBUTES_KEY)
        .ok_or(CodecError::MissingAttributes)?;
    let attributes = as_object(attributes)?;

    tracing::trace!(kind = %R::KIND, %operation, id = id.as_deref(), "decoding envelope");

    let reader = AttributeReader::new(R::FIELDS, attributes, dates);
    for key in reader.unknown_keys() {
        tracing::debug!(kind = %R::KIND, key, "ignoring unknown attribute");
    }

    R::read_attributes(Header { operation, id }, &reader)
}

fn as_object(value: &Value) -> CodecResult<&Map<String, Value>> {
    value.as_object().ok_or_else(|| CodecError::NotAnObject {
        found: json_type_name(value),
    })
}
