//! Sound files (`sounds/*.ogg`) and per-namespace sound registries
//! (`assets/<ns>/sounds.json`).
//!
//! # Format
//!
//! ```text
//! {
//!   "block.note.harp": {
//!     "replace": true,
//!     "subtitle": "subtitles.block.note",
//!     "sounds": [ "note/harp", { "name": "note/harp2", "volume": 0.5 } ]
//!   }
//! }
//! ```
//!
//! A sound entry whose settings are all default is written as its bare name.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::Resource;
use crate::codec::{self, CodecError};
use crate::key::{self, Identifier, KeyError};
use crate::path::{path_for, sound_registry_path, Kind};
use crate::source::ByteSource;

const DEFAULT_VOLUME: f32 = 1.0;
const DEFAULT_PITCH: f32 = 1.0;
const DEFAULT_WEIGHT: i32 = 1;
const DEFAULT_ATTENUATION_DISTANCE: i32 = 16;

/// Ogg Vorbis payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundFile {
    key: Identifier,
    data: ByteSource,
}

impl SoundFile {
    pub fn new(key: Identifier, data: impl Into<ByteSource>) -> Self {
        Self {
            key,
            data: data.into(),
        }
    }

    pub fn data(&self) -> &ByteSource {
        &self.data
    }
}

impl Resource for SoundFile {
    type Key = Identifier;
    const LABEL: &'static str = "sound";

    fn key(&self) -> &Identifier {
        &self.key
    }

    fn path(&self) -> String {
        path_for(Kind::Sound, &self.key)
    }
}

/// What a [`SoundEntry`] name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoundEntryType {
    /// A sound file under `sounds/`.
    #[default]
    File,
    /// Another sound event.
    Event,
}

/// One candidate sound of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEntry {
    pub name: Identifier,
    pub volume: f32,
    pub pitch: f32,
    pub weight: i32,
    pub stream: bool,
    pub attenuation_distance: i32,
    pub preload: bool,
    pub kind: SoundEntryType,
}

impl SoundEntry {
    pub fn new(name: Identifier) -> Self {
        Self {
            name,
            volume: DEFAULT_VOLUME,
            pitch: DEFAULT_PITCH,
            weight: DEFAULT_WEIGHT,
            stream: false,
            attenuation_distance: DEFAULT_ATTENUATION_DISTANCE,
            preload: false,
            kind: SoundEntryType::File,
        }
    }

    fn is_plain(&self) -> bool {
        *self == Self::new(self.name.clone())
    }

    pub fn to_json(&self) -> Result<Value, CodecError> {
        let name = Value::from(self.name.to_string());
        if self.is_plain() {
            return Ok(name);
        }

        let mut object = Map::new();
        object.insert("name".to_string(), name);
        if self.volume != DEFAULT_VOLUME {
            object.insert("volume".to_string(), codec::float_value(self.volume)?);
        }
        if self.pitch != DEFAULT_PITCH {
            object.insert("pitch".to_string(), codec::float_value(self.pitch)?);
        }
        if self.weight != DEFAULT_WEIGHT {
            object.insert("weight".to_string(), Value::from(self.weight));
        }
        if self.stream {
            object.insert("stream".to_string(), Value::Bool(true));
        }
        if self.attenuation_distance != DEFAULT_ATTENUATION_DISTANCE {
            object.insert(
                "attenuation_distance".to_string(),
                Value::from(self.attenuation_distance),
            );
        }
        if self.preload {
            object.insert("preload".to_string(), Value::Bool(true));
        }
        if self.kind == SoundEntryType::Event {
            object.insert("type".to_string(), Value::from("event"));
        }
        Ok(Value::Object(object))
    }

    pub fn from_json(value: &Value) -> Result<Self, CodecError> {
        let object = match value {
            Value::String(name) => return Ok(Self::new(codec::parse_identifier(name, "name")?)),
            Value::Object(object) => object,
            _ => return Err(CodecError::mismatch("sound", "a string or an object")),
        };

        let kind = match codec::get_str(object, "type")? {
            None | Some("file") => SoundEntryType::File,
            Some("event") => SoundEntryType::Event,
            Some(_) => return Err(CodecError::mismatch("type", "one of file, event")),
        };

        Ok(Self {
            name: codec::parse_identifier(codec::require_str(object, "name")?, "name")?,
            volume: codec::get_float(object, "volume", DEFAULT_VOLUME)?,
            pitch: codec::get_float(object, "pitch", DEFAULT_PITCH)?,
            weight: codec::get_int(object, "weight", DEFAULT_WEIGHT)?,
            stream: codec::get_bool(object, "stream", false)?,
            attenuation_distance: codec::get_int(
                object,
                "attenuation_distance",
                DEFAULT_ATTENUATION_DISTANCE,
            )?,
            preload: codec::get_bool(object, "preload", false)?,
            kind,
        })
    }
}

/// A named sound event and its candidate sounds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SoundEvent {
    /// Replace the sounds of lower packs instead of adding to them.
    pub replace: bool,
    pub subtitle: Option<String>,
    pub sounds: Vec<SoundEntry>,
}

impl SoundEvent {
    pub fn new(sounds: Vec<SoundEntry>) -> Self {
        Self {
            sounds,
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> Result<Value, CodecError> {
        let mut object = Map::new();
        if self.replace {
            object.insert("replace".to_string(), Value::Bool(true));
        }
        if let Some(subtitle) = &self.subtitle {
            object.insert("subtitle".to_string(), Value::from(subtitle.as_str()));
        }
        let sounds = self
            .sounds
            .iter()
            .map(SoundEntry::to_json)
            .collect::<Result<Vec<_>, _>>()?;
        object.insert("sounds".to_string(), Value::Array(sounds));
        Ok(Value::Object(object))
    }

    pub fn from_json(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "sound event")?;
        let sounds = match object.get("sounds") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    SoundEntry::from_json(item).map_err(|e| e.within(&format!("sounds[{}]", index)))
                })
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(CodecError::mismatch("sounds", "an array")),
        };
        Ok(Self {
            replace: codec::get_bool(object, "replace", false)?,
            subtitle: codec::get_str(object, "subtitle")?.map(str::to_string),
            sounds,
        })
    }
}

/// All sound events of one namespace.
///
/// The namespace follows the same rules as an [`Identifier`] namespace, so
/// the registry path always stays below `assets/`.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRegistry {
    namespace: String,
    events: BTreeMap<String, SoundEvent>,
}

impl SoundRegistry {
    /// Create an empty registry, validating the namespace.
    pub fn new(namespace: impl Into<String>) -> Result<Self, KeyError> {
        let namespace = namespace.into();
        if !key::is_valid_namespace(&namespace) {
            return Err(KeyError::InvalidNamespace(namespace));
        }
        Ok(Self {
            namespace,
            events: BTreeMap::new(),
        })
    }

    /// Empty registry for the namespace of `key`.
    pub fn for_key(key: &Identifier) -> Self {
        Self {
            namespace: key.namespace().to_string(),
            events: BTreeMap::new(),
        }
    }

    pub fn with_event(mut self, name: impl Into<String>, event: SoundEvent) -> Self {
        self.insert(name, event);
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Add or replace one event.
    pub fn insert(&mut self, name: impl Into<String>, event: SoundEvent) -> Option<SoundEvent> {
        self.events.insert(name.into(), event)
    }

    pub fn get(&self, name: &str) -> Option<&SoundEvent> {
        self.events.get(name)
    }

    pub fn events(&self) -> &BTreeMap<String, SoundEvent> {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_json(&self) -> Result<Value, CodecError> {
        let mut object = Map::new();
        for (name, event) in &self.events {
            object.insert(name.clone(), event.to_json().map_err(|e| e.within(name))?);
        }
        Ok(Value::Object(object))
    }

    pub fn from_json(namespace: impl Into<String>, value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "sound registry")?;
        let mut registry =
            Self::new(namespace).map_err(|e| CodecError::malformed(e.to_string()))?;
        for (name, event) in object {
            registry.insert(
                name.clone(),
                SoundEvent::from_json(event).map_err(|e| e.within(name))?,
            );
        }
        Ok(registry)
    }
}

impl Resource for SoundRegistry {
    type Key = String;
    const LABEL: &'static str = "sound registry";

    fn key(&self) -> &String {
        &self.namespace
    }

    fn path(&self) -> String {
        sound_registry_path(&self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(value: &str) -> Identifier {
        Identifier::parse(value).unwrap()
    }

    #[test]
    fn test_plain_entry_written_as_string() {
        let entry = SoundEntry::new(id("note/harp"));
        assert_eq!(entry.to_json().unwrap(), json!("minecraft:note/harp"));
        assert_eq!(SoundEntry::from_json(&json!("note/harp")).unwrap(), entry);
    }

    #[test]
    fn test_entry_non_defaults_only() {
        let mut entry = SoundEntry::new(id("custom:ambient/wind"));
        entry.volume = 0.5;
        entry.stream = true;
        entry.kind = SoundEntryType::Event;

        let encoded = entry.to_json().unwrap();
        assert_eq!(
            encoded,
            json!({"name": "custom:ambient/wind", "volume": 0.5, "stream": true, "type": "event"})
        );
        assert_eq!(SoundEntry::from_json(&encoded).unwrap(), entry);
    }

    #[test]
    fn test_entry_numeric_coercion() {
        let entry = SoundEntry::from_json(&json!({"name": "a", "weight": 2.9, "pitch": 2})).unwrap();
        assert_eq!(entry.weight, 2);
        assert_eq!(entry.pitch, 2.0);
        assert!(SoundEntry::from_json(&json!({"name": "a", "weight": "x"})).is_err());
        assert!(SoundEntry::from_json(&json!(3)).is_err());
    }

    #[test]
    fn test_registry_roundtrip() {
        let event = SoundEvent {
            replace: true,
            subtitle: Some("subtitles.block.note".to_string()),
            sounds: vec![SoundEntry::new(id("note/harp"))],
        };
        let registry = SoundRegistry::new("minecraft")
            .unwrap()
            .with_event("block.note.harp", event);
        let encoded = registry.to_json().unwrap();

        assert_eq!(
            encoded,
            json!({"block.note.harp": {"replace": true, "subtitle": "subtitles.block.note", "sounds": ["minecraft:note/harp"]}})
        );
        assert_eq!(SoundRegistry::from_json("minecraft", &encoded).unwrap(), registry);
        assert_eq!(registry.path(), "assets/minecraft/sounds.json");
    }

    #[test]
    fn test_registry_rejects_invalid_namespace() {
        for namespace in ["..", ".", "Custom", "", "a/b"] {
            assert_eq!(
                SoundRegistry::new(namespace),
                Err(KeyError::InvalidNamespace(namespace.to_string()))
            );
            assert!(SoundRegistry::from_json(namespace, &json!({})).is_err());
        }
    }

    #[test]
    fn test_registry_for_key_uses_namespace() {
        let registry = SoundRegistry::for_key(&id("custom:ambient.wind"));
        assert_eq!(registry.namespace(), "custom");
        assert_eq!(registry.path(), "assets/custom/sounds.json");
    }

    #[test]
    fn test_registry_error_names_event() {
        let err = SoundRegistry::from_json("minecraft", &json!({"e": {"sounds": [{"volume": 1}]}}))
            .unwrap_err();
        assert!(err.to_string().contains("e"));
        assert!(err.to_string().contains("sounds[0]"));
    }

    #[test]
    fn test_sound_file_path() {
        let file = SoundFile::new(id("custom:ambient/wind"), vec![0u8; 4]);
        assert_eq!(file.path(), "assets/custom/sounds/ambient/wind.ogg");
        assert_eq!(file.describe(), "sound custom:ambient/wind");
    }
}
