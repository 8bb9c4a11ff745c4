//! Namespaced identifiers.
//!
//! Every namespaced resource in a pack is keyed by an [`Identifier`], a
//! `(namespace, value)` pair written as `namespace:value`. The namespace
//! selects the `assets/<namespace>/` directory and the value becomes the
//! relative file stem inside the kind directory.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Namespace used when a key string carries no explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Errors produced when an identifier is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The namespace is empty or contains a disallowed character.
    #[error("invalid namespace '{0}' (expected [a-z0-9_.-]+)")]
    InvalidNamespace(String),

    /// The value is empty or contains a disallowed character.
    #[error("invalid value '{0}' (expected [a-z0-9_.-/]+)")]
    InvalidValue(String),
}

/// Namespaced resource key.
///
/// # Example
///
/// ```
/// use packsmith::Identifier;
///
/// let key = Identifier::new("minecraft", "block/stone").unwrap();
/// assert_eq!(key.to_string(), "minecraft:block/stone");
///
/// let parsed: Identifier = "item/apple".parse().unwrap();
/// assert_eq!(parsed.namespace(), "minecraft");
/// assert_eq!(parsed.value(), "item/apple");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    namespace: String,
    value: String,
}

impl Identifier {
    /// Create an identifier, validating both halves.
    pub fn new(namespace: impl Into<String>, value: impl Into<String>) -> Result<Self, KeyError> {
        let namespace = namespace.into();
        let value = value.into();

        if !is_valid_namespace(&namespace) {
            return Err(KeyError::InvalidNamespace(namespace));
        }
        if !is_valid_value(&value) {
            return Err(KeyError::InvalidValue(value));
        }

        Ok(Self { namespace, value })
    }

    /// Create an identifier in the default namespace.
    pub fn minecraft(value: impl Into<String>) -> Result<Self, KeyError> {
        Self::new(DEFAULT_NAMESPACE, value)
    }

    /// Parse `namespace:value`, or `value` alone for the default namespace.
    pub fn parse(input: &str) -> Result<Self, KeyError> {
        match input.split_once(':') {
            Some((namespace, value)) => Self::new(namespace, value),
            None => Self::new(DEFAULT_NAMESPACE, input),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.value)
    }
}

impl FromStr for Identifier {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Check whether a string is a valid identifier namespace.
///
/// `.` and `..` are rejected since the namespace names a directory.
pub fn is_valid_namespace(namespace: &str) -> bool {
    !matches!(namespace, "" | "." | "..")
        && namespace
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
}

/// Check whether a string is a valid identifier value.
///
/// Besides the character set, every `/`-separated segment must be non-empty
/// and must not be `.` or `..`, so derived paths stay inside their kind
/// directory.
pub fn is_valid_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'))
        && value
            .split('/')
            .all(|segment| !matches!(segment, "" | "." | ".."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let key = Identifier::new("mypack", "textures/ui-icon_2.v1").unwrap();
        assert_eq!(key.namespace(), "mypack");
        assert_eq!(key.value(), "textures/ui-icon_2.v1");
    }

    #[test]
    fn test_rejects_uppercase() {
        assert_eq!(
            Identifier::new("MyPack", "stone"),
            Err(KeyError::InvalidNamespace("MyPack".to_string()))
        );
        assert_eq!(
            Identifier::new("mypack", "Stone"),
            Err(KeyError::InvalidValue("Stone".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert!(Identifier::new("", "stone").is_err());
        assert!(Identifier::new("minecraft", "").is_err());
    }

    #[test]
    fn test_namespace_rejects_dot_segments() {
        assert!(Identifier::new(".", "stone").is_err());
        assert!(Identifier::new("..", "stone").is_err());
        assert!(Identifier::new(".hidden", "stone").is_ok());
    }

    #[test]
    fn test_namespace_rejects_slash() {
        assert!(Identifier::new("my/pack", "stone").is_err());
    }

    #[test]
    fn test_parse_with_and_without_namespace() {
        let explicit = Identifier::parse("custom:item/gem").unwrap();
        assert_eq!(explicit.namespace(), "custom");
        assert_eq!(explicit.value(), "item/gem");

        let implicit = Identifier::parse("item/gem").unwrap();
        assert_eq!(implicit.namespace(), DEFAULT_NAMESPACE);
    }

    #[test]
    fn test_parse_rejects_extra_colon() {
        assert!(Identifier::parse("a:b:c").is_err());
    }

    #[test]
    fn test_ordering_is_by_namespace_then_value() {
        let a = Identifier::new("a", "z").unwrap();
        let b = Identifier::new("b", "a").unwrap();
        let c = Identifier::new("b", "b").unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_display_roundtrip() {
        let key = Identifier::new("pack", "font/default").unwrap();
        let parsed: Identifier = key.to_string().parse().unwrap();
        assert_eq!(key, parsed);
    }
}
