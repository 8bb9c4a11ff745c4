//! Fixed-order vector encoding.
//!
//! Vectors are stored as single-precision floats and written as plain JSON
//! arrays: `[x, y]` and `[x, y, z]`. Decoding reads the tree's double
//! precision numbers and narrows them to `f32`.

use std::fmt;

use serde_json::Value;

use super::{float_value, number_to_f32, CodecError, Object};

/// Two-component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2Float {
    pub x: f32,
    pub y: f32,
}

/// Three-component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3Float {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector2Float {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Encode as `[x, y]`.
    pub fn to_json(&self) -> Result<Value, CodecError> {
        Ok(Value::Array(vec![float_value(self.x)?, float_value(self.y)?]))
    }

    /// Decode from an array of exactly two numbers.
    pub fn from_json(value: &Value) -> Result<Self, CodecError> {
        let [x, y] = read_components::<2>(value)?;
        Ok(Self::new(x, y))
    }
}

impl Vector3Float {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Encode as `[x, y, z]`.
    ///
    /// ```
    /// use packsmith::codec::Vector3Float;
    ///
    /// let json = Vector3Float::new(1.5, -2.0, 0.25).to_json().unwrap();
    /// assert_eq!(json.to_string(), "[1.5,-2.0,0.25]");
    /// ```
    pub fn to_json(&self) -> Result<Value, CodecError> {
        Ok(Value::Array(vec![
            float_value(self.x)?,
            float_value(self.y)?,
            float_value(self.z)?,
        ]))
    }

    /// Decode from an array of exactly three numbers.
    pub fn from_json(value: &Value) -> Result<Self, CodecError> {
        let [x, y, z] = read_components::<3>(value)?;
        Ok(Self::new(x, y, z))
    }
}

impl fmt::Display for Vector2Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vector3Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Read an optional 2-component vector field.
pub fn get_vector2(
    object: &Object,
    key: &str,
    default: Vector2Float,
) -> Result<Vector2Float, CodecError> {
    match object.get(key) {
        None => Ok(default),
        Some(value) => Vector2Float::from_json(value).map_err(|e| e.within(key)),
    }
}

/// Read an optional 3-component vector field.
pub fn get_vector3(
    object: &Object,
    key: &str,
    default: Vector3Float,
) -> Result<Vector3Float, CodecError> {
    match object.get(key) {
        None => Ok(default),
        Some(value) => Vector3Float::from_json(value).map_err(|e| e.within(key)),
    }
}

fn read_components<const N: usize>(value: &Value) -> Result<[f32; N], CodecError> {
    let items = value
        .as_array()
        .ok_or_else(|| CodecError::malformed(format!("expected an array of {} numbers", N)))?;

    if items.len() != N {
        return Err(CodecError::malformed(format!(
            "expected exactly {} components, found {}",
            N,
            items.len()
        )));
    }

    let mut components = [0.0f32; N];
    for (index, item) in items.iter().enumerate() {
        let component = match item {
            Value::Number(number) => number_to_f32(number),
            _ => None,
        };
        components[index] =
            component.ok_or_else(|| CodecError::mismatch(format!("[{}]", index), "a float"))?;
    }
    Ok(components)
}
