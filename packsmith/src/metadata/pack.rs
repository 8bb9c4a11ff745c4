//! The `pack` metadata part: format version and description.

use serde_json::{json, Value};

use super::{ExaminedProperty, PartData};
use crate::codec::{self, CodecError};

/// Pack format version and human readable description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackMeta {
    format: i32,
    description: String,
}

impl PackMeta {
    pub fn new(format: i32, description: impl Into<String>) -> Self {
        Self {
            format,
            description: description.into(),
        }
    }

    /// Pack format number understood by the consuming runtime.
    pub fn format(&self) -> i32 {
        self.format
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartData for PackMeta {
    const PROPERTY: &'static str = "pack";

    fn examine(&self) -> Vec<ExaminedProperty> {
        vec![
            ("format", self.format.to_string()),
            ("description", self.description.clone()),
        ]
    }

    fn encode(&self) -> Result<Value, CodecError> {
        Ok(json!({
            "pack_format": self.format,
            "description": self.description,
        }))
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "pack")?;
        if !object.contains_key("pack_format") {
            return Err(CodecError::malformed("missing required field 'pack_format'"));
        }
        let format = codec::get_int(object, "pack_format", 0)?;
        let description = codec::get_str(object, "description")?.unwrap_or_default();
        Ok(Self::new(format, description))
    }
}
