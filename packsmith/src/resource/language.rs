//! Translation tables (`lang/<code>.json`).

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::Resource;
use crate::codec::{self, CodecError};
use crate::key::Identifier;
use crate::path::{path_for, Kind};

/// Translation key to translated string, keyed by e.g. `minecraft:en_us`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    key: Identifier,
    translations: BTreeMap<String, String>,
}

impl Language {
    pub fn new(key: Identifier) -> Self {
        Self {
            key,
            translations: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, text);
        self
    }

    /// Add or replace one translation.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.translations.insert(key.into(), text.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.translations.get(key).map(String::as_str)
    }

    pub fn translations(&self) -> &BTreeMap<String, String> {
        &self.translations
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .translations
            .iter()
            .map(|(key, text)| (key.clone(), Value::from(text.as_str())))
            .collect();
        Value::Object(object)
    }

    pub fn from_json(key: Identifier, value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "language")?;
        let translations = object
            .iter()
            .map(|(entry, text)| match text {
                Value::String(text) => Ok((entry.clone(), text.clone())),
                _ => Err(CodecError::mismatch(entry.as_str(), "a string")),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { key, translations })
    }
}

impl Resource for Language {
    type Key = Identifier;
    const LABEL: &'static str = "language";

    fn key(&self) -> &Identifier {
        &self.key
    }

    fn path(&self) -> String {
        path_for(Kind::Language, &self.key)
    }
}
