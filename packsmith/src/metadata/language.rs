//! The `language` metadata part: languages added by the pack.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::{ExaminedProperty, PartData};
use crate::codec::{self, CodecError};

/// Display information for one language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageEntry {
    pub name: String,
    pub region: String,
    pub bidirectional: bool,
}

impl LanguageEntry {
    pub fn new(name: impl Into<String>, region: impl Into<String>, bidirectional: bool) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            bidirectional,
        }
    }

    fn encode(&self) -> Value {
        json!({
            "name": self.name,
            "region": self.region,
            "bidirectional": self.bidirectional,
        })
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "language entry")?;
        Ok(Self {
            name: codec::require_str(object, "name")?.to_string(),
            region: codec::require_str(object, "region")?.to_string(),
            bidirectional: codec::get_bool(object, "bidirectional", false)?,
        })
    }
}

/// Language registry keyed by language code (e.g. `en_us`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LanguageMeta {
    languages: BTreeMap<String, LanguageEntry>,
}

impl LanguageMeta {
    pub fn new(languages: BTreeMap<String, LanguageEntry>) -> Self {
        Self { languages }
    }

    pub fn get(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.get(code)
    }

    /// Add or replace a language.
    pub fn insert(&mut self, code: impl Into<String>, entry: LanguageEntry) -> Option<LanguageEntry> {
        self.languages.insert(code.into(), entry)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &LanguageEntry)> {
        self.languages.iter().map(|(code, entry)| (code.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl PartData for LanguageMeta {
    const PROPERTY: &'static str = "language";

    fn examine(&self) -> Vec<ExaminedProperty> {
        vec![("languages", format!("{:?}", self.languages))]
    }

    fn encode(&self) -> Result<Value, CodecError> {
        let object: Map<String, Value> = self
            .languages
            .iter()
            .map(|(code, entry)| (code.clone(), entry.encode()))
            .collect();
        Ok(Value::Object(object))
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "language")?;
        let mut languages = BTreeMap::new();
        for (code, entry) in object {
            languages.insert(
                code.clone(),
                LanguageEntry::decode(entry).map_err(|e| e.within(code))?,
            );
        }
        Ok(Self { languages })
    }
}
