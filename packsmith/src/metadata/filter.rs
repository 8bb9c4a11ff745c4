//! The `filter` metadata part: hide files from lower-priority packs.
//!
//! Each pattern holds an optional namespace regex and an optional path
//! regex. A resource is filtered when every present regex matches the
//! whole corresponding half of its identifier.

use std::hash::{Hash, Hasher};

use regex::Regex;
use serde_json::{Map, Value};

use super::{ExaminedProperty, PartData};
use crate::codec::{self, CodecError};
use crate::key::Identifier;

/// A regex compiled once, anchored to the whole input, compared by source.
#[derive(Debug, Clone)]
struct Anchored {
    source: String,
    regex: Regex,
}

impl Anchored {
    fn compile(source: &str, field: &'static str) -> Result<Self, CodecError> {
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            CodecError::malformed(format!("invalid {} regex '{}': {}", field, source, e))
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }
}

impl PartialEq for Anchored {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Anchored {}

impl Hash for Anchored {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

/// One `block` entry of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterPattern {
    namespace: Option<Anchored>,
    path: Option<Anchored>,
}

impl FilterPattern {
    /// Create a pattern, compiling both regular expressions.
    pub fn new(namespace: Option<&str>, path: Option<&str>) -> Result<Self, CodecError> {
        Ok(Self {
            namespace: namespace
                .map(|source| Anchored::compile(source, "namespace"))
                .transpose()?,
            path: path
                .map(|source| Anchored::compile(source, "path"))
                .transpose()?,
        })
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_ref().map(|pattern| pattern.source.as_str())
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_ref().map(|pattern| pattern.source.as_str())
    }

    /// Check whether this pattern filters `key`.
    ///
    /// ```
    /// use packsmith::Identifier;
    /// use packsmith::metadata::FilterPattern;
    ///
    /// let pattern = FilterPattern::new(Some("minecraft"), Some("textures/.*")).unwrap();
    /// assert!(pattern.matches(&Identifier::new("minecraft", "textures/a.png").unwrap()));
    /// assert!(!pattern.matches(&Identifier::new("minecraft", "models/a.json").unwrap()));
    /// ```
    pub fn matches(&self, key: &Identifier) -> bool {
        let matches = |pattern: &Option<Anchored>, text: &str| {
            pattern
                .as_ref()
                .map_or(true, |pattern| pattern.regex.is_match(text))
        };
        matches(&self.namespace, key.namespace()) && matches(&self.path, key.value())
    }

    fn encode(&self) -> Value {
        let mut object = Map::new();
        if let Some(namespace) = self.namespace() {
            object.insert("namespace".to_string(), Value::from(namespace));
        }
        if let Some(path) = self.path() {
            object.insert("path".to_string(), Value::from(path));
        }
        Value::Object(object)
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "filter pattern")?;
        Self::new(
            codec::get_str(object, "namespace")?,
            codec::get_str(object, "path")?,
        )
    }
}

/// Filter rules applied to lower-priority packs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterMeta {
    patterns: Vec<FilterPattern>,
}

impl FilterMeta {
    pub fn new(patterns: Vec<FilterPattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[FilterPattern] {
        &self.patterns
    }

    /// Check whether any pattern filters `key`.
    pub fn filters(&self, key: &Identifier) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(key))
    }
}

impl PartData for FilterMeta {
    const PROPERTY: &'static str = "filter";

    fn examine(&self) -> Vec<ExaminedProperty> {
        vec![("patterns", format!("{:?}", self.patterns))]
    }

    fn encode(&self) -> Result<Value, CodecError> {
        let block = self.patterns.iter().map(FilterPattern::encode).collect();
        let mut object = Map::new();
        object.insert("block".to_string(), Value::Array(block));
        Ok(Value::Object(object))
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "filter")?;
        let patterns = match object.get("block") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(FilterPattern::decode)
                .collect::<Result<_, _>>()
                .map_err(|e| e.within("block"))?,
            Some(_) => return Err(CodecError::mismatch("block", "an array")),
        };
        Ok(Self::new(patterns))
    }
}
