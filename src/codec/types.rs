//! Codec error taxonomy.

use crate::model::Kind;

/// Errors raised while decoding a document.
///
/// Encoding builds a `serde_json::Value` directly and cannot fail; only
/// rendering that value to text can, which surfaces as [`CodecError::Json`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The envelope has no `type` key.
    #[error("envelope has no \"type\" key")]
    MissingDiscriminant,

    /// The envelope's `type` differs from the kind being decoded.
    #[error("type mismatch: expected \"{expected}\", found \"{found}\"")]
    TypeMismatch {
        /// Kind the caller asked for.
        expected: Kind,
        /// Value of the `type` key.
        found: String,
    },

    /// The envelope has no `attributes` key.
    #[error("envelope has no \"attributes\" key")]
    MissingAttributes,

    /// No candidate kind of a variant matches the envelope's `type`.
    #[error("unknown record type \"{found}\"")]
    UnknownVariant {
        /// Value of the `type` key.
        found: String,
    },

    /// A present field has the wrong shape.
    #[error("malformed field \"{key}\": {reason}")]
    MalformedField {
        /// Wire key of the offending field.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An envelope or attributes container is not a JSON object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// The document root is not a JSON array.
    #[error("expected a JSON array at the document root, found {found}")]
    NotAnArray {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// The input text is not valid JSON, or the output could not be rendered.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Build a [`CodecError::MalformedField`].
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedField {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Name of a JSON value's type, for error messages.
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
