//! Error types for things-json.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=decode, 3=not_found, 4=validation, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

use crate::codec::CodecError;
use crate::validate::{self, Finding};

/// Result type alias for things-json operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Decode (exit 2)
    MissingDiscriminant,
    TypeMismatch,
    MissingAttributes,
    UnknownVariant,
    MalformedField,
    MalformedDocument,
    InvalidJson,

    // Not Found (exit 3)
    FileNotFound,

    // Validation (exit 4)
    ValidationFailed,
    InvalidArgument,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::MissingDiscriminant => "MISSING_DISCRIMINANT",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::MissingAttributes => "MISSING_ATTRIBUTES",
            Self::UnknownVariant => "UNKNOWN_VARIANT",
            Self::MalformedField => "MALFORMED_FIELD",
            Self::MalformedDocument => "MALFORMED_DOCUMENT",
            Self::InvalidJson => "INVALID_JSON",
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingDiscriminant
            | Self::TypeMismatch
            | Self::MissingAttributes
            | Self::UnknownVariant
            | Self::MalformedField
            | Self::MalformedDocument
            | Self::InvalidJson => 2,
            Self::FileNotFound => 3,
            Self::ValidationFailed | Self::InvalidArgument => 4,
            Self::ConfigError => 7,
            Self::IoError => 8,
        }
    }

    /// Whether fixing the input and running again can succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::IoError)
    }
}

impl From<&CodecError> for ErrorCode {
    fn from(err: &CodecError) -> Self {
        match err {
            CodecError::MissingDiscriminant => Self::MissingDiscriminant,
            CodecError::TypeMismatch { .. } => Self::TypeMismatch,
            CodecError::MissingAttributes => Self::MissingAttributes,
            CodecError::UnknownVariant { .. } => Self::UnknownVariant,
            CodecError::MalformedField { .. } => Self::MalformedField,
            CodecError::NotAnObject { .. } | CodecError::NotAnArray { .. } => {
                Self::MalformedDocument
            }
            CodecError::Json(_) => Self::InvalidJson,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in things-json operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Decode error: {0}")]
    Codec(#[from] CodecError),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("{} validation finding(s)", findings.len())]
    Validation { findings: Vec<Finding> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Codec(err) => ErrorCode::from(err),
            Self::FileNotFound { .. } => ErrorCode::FileNotFound,
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::InvalidJson,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Codec(CodecError::UnknownVariant { found }) => {
                Some(match validate::suggest_kind(found) {
                    Some(kind) => format!("Did you mean \"{kind}\"?"),
                    None => "Top-level entries are \"to-do\" or \"project\"; project items are \
                             \"to-do\" or \"heading\"."
                        .to_string(),
                })
            }

            Self::Codec(CodecError::MissingDiscriminant) => Some(
                "Every entry needs a \"type\" key: to-do, project, heading or checklist-item"
                    .to_string(),
            ),

            Self::Codec(CodecError::MissingAttributes) => Some(
                "Every entry needs an \"attributes\" object (use {} when nothing is set)"
                    .to_string(),
            ),

            Self::Codec(CodecError::MalformedField { reason, .. }) if reason.contains("null") => {
                Some("Omit optional fields instead of setting them to null".to_string())
            }

            Self::Codec(CodecError::NotAnArray { .. }) => {
                Some("A document is a JSON array of to-do and project entries".to_string())
            }

            Self::FileNotFound { .. } => {
                Some("Pass a readable file, or `-` to read from stdin".to_string())
            }

            Self::Validation { findings } => {
                let mut hint = String::new();
                for finding in findings.iter().take(5) {
                    hint.push_str(&format!("    {finding}\n"));
                }
                if findings.len() > 5 {
                    hint.push_str(&format!("    ... and {} more\n", findings.len() - 5));
                }
                hint.push_str("  Run without --strict to treat these as warnings.");
                Some(hint)
            }

            Self::Config(_) => Some(
                "Valid date formats: iso8601, fixed (set via --date-format or TJ_DATE_FORMAT). \
                 A fixed pattern needs the full date, time to the second and a UTC offset, \
                 e.g. %Y-%m-%dT%H:%M:%S%:z"
                    .to_string(),
            ),

            Self::Codec(_) | Self::Io(_) | Self::Json(_) | Self::InvalidArgument(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Self::Validation { findings } = self {
            obj["error"]["findings"] = findings.iter().map(ToString::to_string).collect();
        }

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
