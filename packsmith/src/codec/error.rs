//! Error type for the structured-data codec.

use thiserror::Error;

/// Errors raised while reading or writing the JSON tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Text could not be parsed, or a node has the wrong overall shape.
    #[error("malformed data: {0}")]
    Malformed(String),

    /// A field is present but holds an incompatible type.
    #[error("field '{field}' must be {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },
}

impl CodecError {
    pub fn malformed(message: impl Into<String>) -> Self {
        CodecError::Malformed(message.into())
    }

    pub fn mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        CodecError::TypeMismatch {
            field: field.into(),
            expected,
        }
    }

    /// Qualify the error with the enclosing property, e.g. `pack.pack_format`.
    pub fn within(self, parent: &str) -> Self {
        match self {
            CodecError::Malformed(message) => {
                CodecError::Malformed(format!("in '{}': {}", parent, message))
            }
            CodecError::TypeMismatch { field, expected } => CodecError::TypeMismatch {
                field: format!("{}.{}", parent, field),
                expected,
            },
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Malformed(e.to_string())
    }
}
