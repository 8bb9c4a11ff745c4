//! Error types for pack assembly and serialization.

use thiserror::Error;

use crate::codec::CodecError;
use crate::key::KeyError;

/// Result type for pack operations.
pub type PackResult<T> = Result<T, PackError>;

/// Errors that can occur while assembling, writing or reading a pack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    /// Identifier failed validation.
    #[error("invalid identifier: {0}")]
    InvalidKey(#[from] KeyError),

    /// Caller-supplied path is malformed or escapes the pack root.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Structured data could not be read or written.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Two distinct resources derive the same output path.
    #[error("path collision at '{path}': {first} and {second}")]
    PathCollision {
        path: String,
        first: String,
        second: String,
    },

    /// A file matching a typed convention failed to decode.
    #[error("failed to decode '{path}': {source}")]
    ResourceDecode { path: String, source: CodecError },

    /// Insert-or-fail found an existing resource with the same key.
    #[error("{kind} '{key}' already exists")]
    DuplicateResource { kind: String, key: String },
}

impl PackError {
    /// Path of the offending file, when the error is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            PackError::InvalidPath { path, .. }
            | PackError::PathCollision { path, .. }
            | PackError::ResourceDecode { path, .. } => Some(path),
            _ => None,
        }
    }
}
