//! Block and item models (`models/*.json`).
//!
//! Element geometry and item overrides are carried as opaque JSON; the
//! parent, lighting, display transforms and texture map are typed.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::Resource;
use crate::codec::{self, CodecError, Vector3Float};
use crate::key::Identifier;
use crate::path::{path_for, Kind};

/// Lighting used when the model is drawn in an inventory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiLight {
    Front,
    Side,
}

impl GuiLight {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuiLight::Front => "front",
            GuiLight::Side => "side",
        }
    }
}

/// Rotation, translation and scale for one display context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    pub rotation: Vector3Float,
    pub translation: Vector3Float,
    pub scale: Vector3Float,
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self {
            rotation: Vector3Float::ZERO,
            translation: Vector3Float::ZERO,
            scale: Vector3Float::ONE,
        }
    }
}

impl ItemTransform {
    pub fn to_json(&self) -> Result<Value, CodecError> {
        let mut object = Map::new();
        if self.rotation != Vector3Float::ZERO {
            object.insert("rotation".to_string(), self.rotation.to_json()?);
        }
        if self.translation != Vector3Float::ZERO {
            object.insert("translation".to_string(), self.translation.to_json()?);
        }
        if self.scale != Vector3Float::ONE {
            object.insert("scale".to_string(), self.scale.to_json()?);
        }
        Ok(Value::Object(object))
    }

    pub fn from_json(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "display transform")?;
        Ok(Self {
            rotation: codec::get_vector3(object, "rotation", Vector3Float::ZERO)?,
            translation: codec::get_vector3(object, "translation", Vector3Float::ZERO)?,
            scale: codec::get_vector3(object, "scale", Vector3Float::ONE)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    key: Identifier,
    pub parent: Option<Identifier>,
    pub ambient_occlusion: bool,
    pub gui_light: Option<GuiLight>,
    /// Display context (`gui`, `head`, `firstperson_righthand`...) to transform.
    pub display: BTreeMap<String, ItemTransform>,
    /// Texture variable to texture reference (`#var` or identifier).
    pub textures: BTreeMap<String, String>,
    pub elements: Vec<Value>,
    pub overrides: Vec<Value>,
}

impl Model {
    pub fn new(key: Identifier) -> Self {
        Self {
            key,
            parent: None,
            ambient_occlusion: true,
            gui_light: None,
            display: BTreeMap::new(),
            textures: BTreeMap::new(),
            elements: Vec::new(),
            overrides: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: Identifier) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_texture(mut self, variable: impl Into<String>, texture: impl Into<String>) -> Self {
        self.textures.insert(variable.into(), texture.into());
        self
    }

    pub fn with_display(mut self, context: impl Into<String>, transform: ItemTransform) -> Self {
        self.display.insert(context.into(), transform);
        self
    }

    pub fn to_json(&self) -> Result<Value, CodecError> {
        let mut object = Map::new();
        if let Some(parent) = &self.parent {
            object.insert("parent".to_string(), Value::from(parent.to_string()));
        }
        if !self.ambient_occlusion {
            object.insert("ambientocclusion".to_string(), Value::Bool(false));
        }
        if let Some(light) = self.gui_light {
            object.insert("gui_light".to_string(), Value::from(light.as_str()));
        }
        if !self.display.is_empty() {
            let mut display = Map::new();
            for (context, transform) in &self.display {
                let encoded = transform.to_json().map_err(|e| e.within(context))?;
                display.insert(context.clone(), encoded);
            }
            object.insert("display".to_string(), Value::Object(display));
        }
        if !self.textures.is_empty() {
            let textures = self
                .textures
                .iter()
                .map(|(variable, texture)| (variable.clone(), Value::from(texture.as_str())))
                .collect();
            object.insert("textures".to_string(), Value::Object(textures));
        }
        if !self.elements.is_empty() {
            object.insert("elements".to_string(), Value::Array(self.elements.clone()));
        }
        if !self.overrides.is_empty() {
            object.insert("overrides".to_string(), Value::Array(self.overrides.clone()));
        }
        Ok(Value::Object(object))
    }

    pub fn from_json(key: Identifier, value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "model")?;

        let gui_light = match codec::get_str(object, "gui_light")? {
            None => None,
            Some("front") => Some(GuiLight::Front),
            Some("side") => Some(GuiLight::Side),
            Some(_) => return Err(CodecError::mismatch("gui_light", "one of front, side")),
        };

        let mut display = BTreeMap::new();
        if let Some(entries) = optional_object(object, "display")? {
            for (context, transform) in entries {
                let transform = ItemTransform::from_json(transform)
                    .map_err(|e| e.within(&format!("display.{}", context)))?;
                display.insert(context.clone(), transform);
            }
        }

        let mut textures = BTreeMap::new();
        if let Some(entries) = optional_object(object, "textures")? {
            for (variable, texture) in entries {
                let texture = texture
                    .as_str()
                    .ok_or_else(|| CodecError::mismatch(format!("textures.{}", variable), "a string"))?;
                textures.insert(variable.clone(), texture.to_string());
            }
        }

        Ok(Self {
            key,
            parent: codec::get_identifier(object, "parent")?,
            ambient_occlusion: codec::get_bool(object, "ambientocclusion", true)?,
            gui_light,
            display,
            textures,
            elements: optional_array(object, "elements")?,
            overrides: optional_array(object, "overrides")?,
        })
    }
}

fn optional_object<'a>(
    object: &'a codec::Object,
    key: &str,
) -> Result<Option<&'a codec::Object>, CodecError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(_) => Err(CodecError::mismatch(key, "an object")),
    }
}

fn optional_array(object: &codec::Object, key: &str) -> Result<Vec<Value>, CodecError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(CodecError::mismatch(key, "an array")),
    }
}

impl Resource for Model {
    type Key = Identifier;
    const LABEL: &'static str = "model";

    fn key(&self) -> &Identifier {
        &self.key
    }

    fn path(&self) -> String {
        path_for(Kind::Model, &self.key)
    }
}
