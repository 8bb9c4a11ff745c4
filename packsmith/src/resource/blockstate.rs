//! Block state definitions (`blockstates/*.json`).
//!
//! Variant and multipart bodies are kept as opaque JSON nodes; only the
//! container shapes are checked.

use serde_json::{Map, Value};

use super::Resource;
use crate::codec::{self, CodecError};
use crate::key::Identifier;
use crate::path::{path_for, Kind};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockState {
    key: Identifier,
    variants: Map<String, Value>,
    multipart: Vec<Value>,
}

impl BlockState {
    pub fn new(key: Identifier) -> Self {
        Self {
            key,
            variants: Map::new(),
            multipart: Vec::new(),
        }
    }

    /// Add or replace the variant for a property selector such as
    /// `facing=north` (or `""` for the single default variant).
    pub fn with_variant(mut self, selector: impl Into<String>, variant: Value) -> Self {
        self.variants.insert(selector.into(), variant);
        self
    }

    /// Append a multipart case.
    pub fn with_part(mut self, part: Value) -> Self {
        self.multipart.push(part);
        self
    }

    pub fn variants(&self) -> &Map<String, Value> {
        &self.variants
    }

    pub fn multipart(&self) -> &[Value] {
        &self.multipart
    }

    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        if !self.variants.is_empty() || self.multipart.is_empty() {
            object.insert("variants".to_string(), Value::Object(self.variants.clone()));
        }
        if !self.multipart.is_empty() {
            object.insert("multipart".to_string(), Value::Array(self.multipart.clone()));
        }
        Value::Object(object)
    }

    pub fn from_json(key: Identifier, value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "block state")?;
        let variants = match object.get("variants") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(variants)) => variants.clone(),
            Some(_) => return Err(CodecError::mismatch("variants", "an object")),
        };
        let multipart = match object.get("multipart") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(parts)) => parts.clone(),
            Some(_) => return Err(CodecError::mismatch("multipart", "an array")),
        };
        Ok(Self {
            key,
            variants,
            multipart,
        })
    }
}

impl Resource for BlockState {
    type Key = Identifier;
    const LABEL: &'static str = "block state";

    fn key(&self) -> &Identifier {
        &self.key
    }

    fn path(&self) -> String {
        path_for(Kind::BlockState, &self.key)
    }
}
