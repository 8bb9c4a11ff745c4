//! Fonts (`font/*.json`): an ordered list of glyph providers.
//!
//! # Format
//!
//! ```text
//! { "providers": [ { "type": "bitmap", "file": "...", "ascent": 7, "chars": [...] }, ... ] }
//! ```
//!
//! Provider types other than `bitmap`, `space`, `ttf` and `reference` are kept
//! as [`FontProvider::Other`] with their remaining properties untouched.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::Resource;
use crate::codec::{self, CodecError, Vector2Float};
use crate::key::Identifier;
use crate::path::{path_for, Kind};

const DEFAULT_BITMAP_HEIGHT: i32 = 8;
const DEFAULT_TRUETYPE_SIZE: f32 = 11.0;
const DEFAULT_OVERSAMPLE: f32 = 1.0;

/// `type` values decoded into a dedicated [`FontProvider`] variant.
const BUILT_IN_KINDS: [&str; 4] = ["bitmap", "space", "ttf", "reference"];

/// One glyph source of a font.
#[derive(Debug, Clone, PartialEq)]
pub enum FontProvider {
    Bitmap {
        file: Identifier,
        height: i32,
        ascent: i32,
        characters: Vec<String>,
    },
    Space {
        advances: BTreeMap<String, f32>,
    },
    TrueType {
        file: Identifier,
        shift: Vector2Float,
        size: f32,
        oversample: f32,
        skip: Vec<String>,
    },
    Reference {
        id: Identifier,
    },
    /// A provider type without a dedicated variant.
    ///
    /// `kind` must not be one of the built-in types and `properties` must not
    /// hold `type`; [`FontProvider::to_json`] rejects both.
    Other {
        kind: String,
        properties: Map<String, Value>,
    },
}

impl FontProvider {
    pub fn bitmap(file: Identifier, ascent: i32, characters: Vec<String>) -> Self {
        FontProvider::Bitmap {
            file,
            height: DEFAULT_BITMAP_HEIGHT,
            ascent,
            characters,
        }
    }

    pub fn true_type(file: Identifier) -> Self {
        FontProvider::TrueType {
            file,
            shift: Vector2Float::ZERO,
            size: DEFAULT_TRUETYPE_SIZE,
            oversample: DEFAULT_OVERSAMPLE,
            skip: Vec::new(),
        }
    }

    pub fn reference(id: Identifier) -> Self {
        FontProvider::Reference { id }
    }

    /// Value of the `type` property.
    pub fn kind(&self) -> &str {
        match self {
            FontProvider::Bitmap { .. } => "bitmap",
            FontProvider::Space { .. } => "space",
            FontProvider::TrueType { .. } => "ttf",
            FontProvider::Reference { .. } => "reference",
            FontProvider::Other { kind, .. } => kind,
        }
    }

    pub fn to_json(&self) -> Result<Value, CodecError> {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::from(self.kind()));
        match self {
            FontProvider::Bitmap {
                file,
                height,
                ascent,
                characters,
            } => {
                object.insert("file".to_string(), Value::from(file.to_string()));
                if *height != DEFAULT_BITMAP_HEIGHT {
                    object.insert("height".to_string(), Value::from(*height));
                }
                object.insert("ascent".to_string(), Value::from(*ascent));
                object.insert("chars".to_string(), Value::from(characters.clone()));
            }
            FontProvider::Space { advances } => {
                let mut encoded = Map::new();
                for (character, advance) in advances {
                    encoded.insert(character.clone(), codec::float_value(*advance)?);
                }
                object.insert("advances".to_string(), Value::Object(encoded));
            }
            FontProvider::TrueType {
                file,
                shift,
                size,
                oversample,
                skip,
            } => {
                object.insert("file".to_string(), Value::from(file.to_string()));
                if *shift != Vector2Float::ZERO {
                    object.insert("shift".to_string(), shift.to_json()?);
                }
                if *size != DEFAULT_TRUETYPE_SIZE {
                    object.insert("size".to_string(), codec::float_value(*size)?);
                }
                if *oversample != DEFAULT_OVERSAMPLE {
                    object.insert("oversample".to_string(), codec::float_value(*oversample)?);
                }
                if !skip.is_empty() {
                    object.insert("skip".to_string(), Value::from(skip.clone()));
                }
            }
            FontProvider::Reference { id } => {
                object.insert("id".to_string(), Value::from(id.to_string()));
            }
            FontProvider::Other { kind, properties } => {
                if BUILT_IN_KINDS.contains(&kind.as_str()) {
                    return Err(CodecError::malformed(format!(
                        "provider type '{}' has a dedicated variant",
                        kind
                    )));
                }
                if properties.contains_key("type") {
                    return Err(CodecError::malformed(
                        "provider properties must not override 'type'",
                    ));
                }
                for (name, value) in properties {
                    object.insert(name.clone(), value.clone());
                }
            }
        }
        Ok(Value::Object(object))
    }

    pub fn from_json(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "font provider")?;
        let kind = codec::require_str(object, "type")?;

        let provider = match kind {
            "bitmap" => FontProvider::Bitmap {
                file: required_identifier(object, "file")?,
                height: codec::get_int(object, "height", DEFAULT_BITMAP_HEIGHT)?,
                ascent: required_int(object, "ascent")?,
                characters: codec::get_string_list(object, "chars")?,
            },
            "space" => {
                let advances = match object.get("advances") {
                    None | Some(Value::Null) => Map::new(),
                    Some(Value::Object(advances)) => advances.clone(),
                    Some(_) => return Err(CodecError::mismatch("advances", "an object")),
                };
                let advances = advances
                    .iter()
                    .map(|(character, _)| {
                        codec::get_float(&advances, character, 0.0)
                            .map(|advance| (character.clone(), advance))
                            .map_err(|e| e.within("advances"))
                    })
                    .collect::<Result<_, _>>()?;
                FontProvider::Space { advances }
            }
            "ttf" => FontProvider::TrueType {
                file: required_identifier(object, "file")?,
                shift: codec::get_vector2(object, "shift", Vector2Float::ZERO)?,
                size: codec::get_float(object, "size", DEFAULT_TRUETYPE_SIZE)?,
                oversample: codec::get_float(object, "oversample", DEFAULT_OVERSAMPLE)?,
                skip: read_skip(object)?,
            },
            "reference" => FontProvider::Reference {
                id: required_identifier(object, "id")?,
            },
            other => {
                let mut properties = object.clone();
                properties.remove("type");
                FontProvider::Other {
                    kind: other.to_string(),
                    properties,
                }
            }
        };
        Ok(provider)
    }
}

fn required_identifier(object: &codec::Object, key: &str) -> Result<Identifier, CodecError> {
    codec::parse_identifier(codec::require_str(object, key)?, key)
}

fn required_int(object: &codec::Object, key: &str) -> Result<i32, CodecError> {
    if !codec::is_numeric(object, key) {
        return Err(CodecError::mismatch(key, "an integer"));
    }
    codec::get_int(object, key, 0)
}

/// `skip` is either one string or a list of strings.
fn read_skip(object: &codec::Object) -> Result<Vec<String>, CodecError> {
    match object.get("skip") {
        Some(Value::String(text)) => Ok(vec![text.clone()]),
        _ => codec::get_string_list(object, "skip"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    key: Identifier,
    providers: Vec<FontProvider>,
}

impl Font {
    pub fn new(key: Identifier, providers: Vec<FontProvider>) -> Self {
        Self { key, providers }
    }

    pub fn providers(&self) -> &[FontProvider] {
        &self.providers
    }

    /// Append a provider; later providers take precedence at runtime.
    pub fn push(&mut self, provider: FontProvider) {
        self.providers.push(provider);
    }

    pub fn to_json(&self) -> Result<Value, CodecError> {
        let providers = self
            .providers
            .iter()
            .enumerate()
            .map(|(index, provider)| {
                provider
                    .to_json()
                    .map_err(|e| e.within(&format!("providers[{}]", index)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut object = Map::new();
        object.insert("providers".to_string(), Value::Array(providers));
        Ok(Value::Object(object))
    }

    pub fn from_json(key: Identifier, value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "font")?;
        let providers = match object.get("providers") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    FontProvider::from_json(item)
                        .map_err(|e| e.within(&format!("providers[{}]", index)))
                })
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(CodecError::mismatch("providers", "an array")),
        };
        Ok(Self { key, providers })
    }
}

impl Resource for Font {
    type Key = Identifier;
    const LABEL: &'static str = "font";

    fn key(&self) -> &Identifier {
        &self.key
    }

    fn path(&self) -> String {
        path_for(Kind::Font, &self.key)
    }
}
