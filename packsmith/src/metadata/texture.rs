//! Parts found in texture `.png.mcmeta` companion files.
//!
//! Only non-default values are written, so a part holding defaults encodes
//! to `{}`.

use serde_json::{Map, Value};

use super::{ExaminedProperty, PartData};
use crate::codec::{self, CodecError};

/// Width/height marker meaning "derive from the image".
const UNSET_DIMENSION: i32 = -1;
const DEFAULT_FRAME_TIME: i32 = 1;

/// One frame reference of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationFrame {
    pub index: i32,
    /// Frame duration in ticks; `None` uses the animation's frame time.
    pub time: Option<i32>,
}

impl AnimationFrame {
    pub fn new(index: i32) -> Self {
        Self { index, time: None }
    }

    pub fn timed(index: i32, time: i32) -> Self {
        Self {
            index,
            time: Some(time),
        }
    }

    fn encode(&self) -> Value {
        match self.time {
            None => Value::from(self.index),
            Some(time) => {
                let mut object = Map::new();
                object.insert("index".to_string(), Value::from(self.index));
                object.insert("time".to_string(), Value::from(time));
                Value::Object(object)
            }
        }
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::Number(number) => codec::number_to_i32(number)
                .map(Self::new)
                .ok_or_else(|| CodecError::mismatch("frame", "an integer")),
            Value::Object(object) => {
                if !codec::is_numeric(object, "index") {
                    return Err(CodecError::mismatch("index", "an integer"));
                }
                let index = codec::get_int(object, "index", 0)?;
                let time = if object.contains_key("time") {
                    Some(codec::get_int(object, "time", DEFAULT_FRAME_TIME)?)
                } else {
                    None
                };
                Ok(Self { index, time })
            }
            _ => Err(CodecError::mismatch("frame", "an integer or an object")),
        }
    }
}

/// Animated texture description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnimationMeta {
    pub interpolate: bool,
    pub width: i32,
    pub height: i32,
    pub frame_time: i32,
    pub frames: Vec<AnimationFrame>,
}

impl Default for AnimationMeta {
    fn default() -> Self {
        Self {
            interpolate: false,
            width: UNSET_DIMENSION,
            height: UNSET_DIMENSION,
            frame_time: DEFAULT_FRAME_TIME,
            frames: Vec::new(),
        }
    }
}

impl PartData for AnimationMeta {
    const PROPERTY: &'static str = "animation";

    fn examine(&self) -> Vec<ExaminedProperty> {
        vec![
            ("interpolate", self.interpolate.to_string()),
            ("width", self.width.to_string()),
            ("height", self.height.to_string()),
            ("frame_time", self.frame_time.to_string()),
            ("frames", format!("{:?}", self.frames)),
        ]
    }

    fn encode(&self) -> Result<Value, CodecError> {
        let mut object = Map::new();
        if self.interpolate {
            object.insert("interpolate".to_string(), Value::Bool(true));
        }
        if self.width != UNSET_DIMENSION {
            object.insert("width".to_string(), Value::from(self.width));
        }
        if self.height != UNSET_DIMENSION {
            object.insert("height".to_string(), Value::from(self.height));
        }
        if self.frame_time != DEFAULT_FRAME_TIME {
            object.insert("frametime".to_string(), Value::from(self.frame_time));
        }
        if !self.frames.is_empty() {
            let frames = self.frames.iter().map(AnimationFrame::encode).collect();
            object.insert("frames".to_string(), Value::Array(frames));
        }
        Ok(Value::Object(object))
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "animation")?;
        let frames = match object.get("frames") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(AnimationFrame::decode)
                .collect::<Result<_, _>>()
                .map_err(|e| e.within("frames"))?,
            Some(_) => return Err(CodecError::mismatch("frames", "an array")),
        };

        Ok(Self {
            interpolate: codec::get_bool(object, "interpolate", false)?,
            width: codec::get_int(object, "width", UNSET_DIMENSION)?,
            height: codec::get_int(object, "height", UNSET_DIMENSION)?,
            frame_time: codec::get_int(object, "frametime", DEFAULT_FRAME_TIME)?,
            frames,
        })
    }
}

/// Sampling flags for a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureMeta {
    pub blur: bool,
    pub clamp: bool,
}

impl PartData for TextureMeta {
    const PROPERTY: &'static str = "texture";

    fn examine(&self) -> Vec<ExaminedProperty> {
        vec![
            ("blur", self.blur.to_string()),
            ("clamp", self.clamp.to_string()),
        ]
    }

    fn encode(&self) -> Result<Value, CodecError> {
        let mut object = Map::new();
        if self.blur {
            object.insert("blur".to_string(), Value::Bool(true));
        }
        if self.clamp {
            object.insert("clamp".to_string(), Value::Bool(true));
        }
        Ok(Value::Object(object))
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "texture")?;
        Ok(Self {
            blur: codec::get_bool(object, "blur", false)?,
            clamp: codec::get_bool(object, "clamp", false)?,
        })
    }
}

/// How a villager profession overlay hides the base hat layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VillagerHat {
    #[default]
    None,
    Partial,
    Full,
}

impl VillagerHat {
    pub fn as_str(&self) -> &'static str {
        match self {
            VillagerHat::None => "none",
            VillagerHat::Partial => "partial",
            VillagerHat::Full => "full",
        }
    }
}

/// Villager texture overlay behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VillagerMeta {
    pub hat: VillagerHat,
}

impl PartData for VillagerMeta {
    const PROPERTY: &'static str = "villager";

    fn examine(&self) -> Vec<ExaminedProperty> {
        vec![("hat", self.hat.as_str().to_string())]
    }

    fn encode(&self) -> Result<Value, CodecError> {
        let mut object = Map::new();
        if self.hat != VillagerHat::None {
            object.insert("hat".to_string(), Value::from(self.hat.as_str()));
        }
        Ok(Value::Object(object))
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "villager")?;
        let hat = match codec::get_str(object, "hat")? {
            None | Some("none") => VillagerHat::None,
            Some("partial") => VillagerHat::Partial,
            Some("full") => VillagerHat::Full,
            Some(_) => return Err(CodecError::mismatch("hat", "one of none, partial, full")),
        };
        Ok(Self { hat })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_animation_encodes_empty() {
        assert_eq!(AnimationMeta::default().encode().unwrap(), json!({}));
        assert_eq!(AnimationMeta::decode(&json!({})).unwrap(), AnimationMeta::default());
    }

    #[test]
    fn test_animation_roundtrip() {
        let meta = AnimationMeta {
            interpolate: true,
            width: 16,
            height: 32,
            frame_time: 4,
            frames: vec![AnimationFrame::new(0), AnimationFrame::timed(1, 10)],
        };
        let encoded = meta.encode().unwrap();
        assert_eq!(
            encoded,
            json!({
                "interpolate": true,
                "width": 16,
                "height": 32,
                "frametime": 4,
                "frames": [0, {"index": 1, "time": 10}]
            })
        );
        assert_eq!(AnimationMeta::decode(&encoded).unwrap(), meta);
    }

    #[test]
    fn test_animation_frame_errors() {
        assert!(AnimationMeta::decode(&json!({"frames": ["a"]})).is_err());
        assert!(AnimationMeta::decode(&json!({"frames": [{"time": 2}]})).is_err());
        assert!(AnimationMeta::decode(&json!({"frames": 3})).is_err());
    }

    #[test]
    fn test_texture_meta_legacy_booleans() {
        let meta = TextureMeta::decode(&json!({"blur": "true", "clamp": false})).unwrap();
        assert_eq!(meta, TextureMeta { blur: true, clamp: false });
        assert_eq!(meta.encode().unwrap(), json!({"blur": true}));
    }

    #[test]
    fn test_villager_hat() {
        let meta = VillagerMeta::decode(&json!({"hat": "partial"})).unwrap();
        assert_eq!(meta.hat, VillagerHat::Partial);
        assert_eq!(meta.encode().unwrap(), json!({"hat": "partial"}));
        assert_eq!(VillagerMeta::default().encode().unwrap(), json!({}));
        assert!(VillagerMeta::decode(&json!({"hat": "huge"})).is_err());
    }
}
