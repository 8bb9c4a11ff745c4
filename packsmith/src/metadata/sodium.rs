//! The `sodium` metadata part: shaders the Sodium renderer should ignore.

use serde_json::{json, Value};

use super::{ExaminedProperty, PartData};
use crate::codec::{self, CodecError};

/// Sodium compatibility hints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SodiumMeta {
    ignored_shaders: Vec<String>,
}

impl SodiumMeta {
    pub fn new(ignored_shaders: Vec<String>) -> Self {
        Self { ignored_shaders }
    }

    pub fn ignored_shaders(&self) -> &[String] {
        &self.ignored_shaders
    }
}

impl PartData for SodiumMeta {
    const PROPERTY: &'static str = "sodium";

    fn examine(&self) -> Vec<ExaminedProperty> {
        vec![("ignored_shaders", format!("{:?}", self.ignored_shaders))]
    }

    fn encode(&self) -> Result<Value, CodecError> {
        Ok(json!({ "ignored_shaders": self.ignored_shaders }))
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "sodium")?;
        Ok(Self::new(codec::get_string_list(object, "ignored_shaders")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let meta = SodiumMeta::new(vec!["clouds".to_string(), "sky".to_string()]);
        let encoded = meta.encode().unwrap();
        assert_eq!(encoded, json!({"ignored_shaders": ["clouds", "sky"]}));
        assert_eq!(SodiumMeta::decode(&encoded).unwrap(), meta);
    }

    #[test]
    fn test_absent_list_is_empty() {
        assert_eq!(SodiumMeta::decode(&json!({})).unwrap(), SodiumMeta::default());
    }

    #[test]
    fn test_examine() {
        let meta = SodiumMeta::new(vec!["a".to_string()]);
        assert_eq!(meta.examine(), vec![("ignored_shaders", "[\"a\"]".to_string())]);
    }
}
