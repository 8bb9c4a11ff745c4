//! Structured-data codec.
//!
//! Every JSON document in a pack goes through this module. The tree type is
//! [`serde_json::Value`] with insertion-ordered objects, so documents written
//! by this crate keep their property order.
//!
//! # Leniency
//!
//! Older producers write slightly malformed data, so the readers here are
//! deliberately forgiving about *where* data sits but strict about *what* it
//! is:
//!
//! - Surrounding whitespace and a leading UTF-8 byte order mark are ignored
//! - Duplicate object keys resolve to the last occurrence
//! - Booleans may be written as the strings `"true"` / `"false"`
//! - Absent fields take the caller's default; present but incompatible
//!   fields are an error, never a silent default

mod error;
mod vector;

use std::io::Read;

use serde_json::{Map, Number, Value};

use crate::key::Identifier;

pub use error::CodecError;
pub use vector::{get_vector2, get_vector3, Vector2Float, Vector3Float};

/// A JSON object node.
pub type Object = Map<String, Value>;

const BOM: char = '\u{feff}';

/// Parse a JSON document from a string.
///
/// # Examples
///
/// ```
/// use packsmith::codec;
///
/// let tree = codec::parse("  {\"a\": 1}\n\n").unwrap();
/// assert_eq!(tree["a"], 1);
/// assert!(codec::parse("{\"a\": }").is_err());
/// ```
pub fn parse(text: &str) -> Result<Value, CodecError> {
    Ok(serde_json::from_str(text.trim_start_matches(BOM))?)
}

/// Parse a JSON document from raw bytes.
pub fn parse_slice(bytes: &[u8]) -> Result<Value, CodecError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    Ok(serde_json::from_slice(bytes)?)
}

/// Parse a JSON document from a reader.
///
/// Behaves exactly like [`parse`]; the whole reader is one document.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Value, CodecError> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| CodecError::malformed(format!("read failed: {}", e)))?;
    parse_slice(&buffer)
}

/// Iterate over a stream of concatenated JSON documents.
///
/// ```
/// use packsmith::codec;
///
/// let docs: Vec<_> = codec::documents("{\"a\":1} [2]\n3").collect();
/// assert_eq!(docs.len(), 3);
/// assert!(docs.iter().all(|d| d.is_ok()));
/// ```
pub fn documents(text: &str) -> impl Iterator<Item = Result<Value, CodecError>> + '_ {
    serde_json::Deserializer::from_str(text.trim_start_matches(BOM))
        .into_iter::<Value>()
        .map(|document| document.map_err(CodecError::from))
}

/// Serialize a tree to bytes, optionally pretty-printed.
pub fn to_bytes(value: &Value, pretty: bool) -> Result<Vec<u8>, CodecError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    Ok(bytes)
}

/// View a node as an object.
pub fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Object, CodecError> {
    value
        .as_object()
        .ok_or_else(|| CodecError::malformed(format!("{} must be a JSON object", what)))
}

/// Check whether a property is absent or explicitly `null`.
pub fn is_null_or_absent(object: &Object, key: &str) -> bool {
    object.get(key).map_or(true, Value::is_null)
}

/// Read a boolean field.
///
/// Accepts boolean literals and, for legacy producers, the strings `"true"`
/// and `"false"` (case-insensitive).
///
/// ```
/// use packsmith::codec::{self, get_bool};
///
/// let legacy = codec::parse(r#"{"k": "true"}"#).unwrap();
/// assert!(get_bool(legacy.as_object().unwrap(), "k", false).unwrap());
/// ```
pub fn get_bool(object: &Object, key: &str, default: bool) -> Result<bool, CodecError> {
    match object.get(key) {
        None => Ok(default),
        Some(Value::Bool(value)) => Ok(*value),
        Some(Value::String(text)) if text.eq_ignore_ascii_case("true") => Ok(true),
        Some(Value::String(text)) if text.eq_ignore_ascii_case("false") => Ok(false),
        Some(_) => Err(CodecError::mismatch(key, "a boolean")),
    }
}

/// Check whether a property holds a JSON number.
pub fn is_numeric(object: &Object, key: &str) -> bool {
    matches!(object.get(key), Some(Value::Number(_)))
}

/// Read an integer field.
///
/// The value must be a JSON number. Fractional parts are truncated toward
/// zero; values outside the `i32` range are rejected.
///
/// ```
/// use packsmith::codec::{self, get_int, CodecError};
///
/// let tree = codec::parse(r#"{"k": 7, "b": true}"#).unwrap();
/// let object = tree.as_object().unwrap();
/// assert_eq!(get_int(object, "k", 0), Ok(7));
/// assert_eq!(get_int(object, "missing", 0), Ok(0));
/// assert!(matches!(get_int(object, "b", 0), Err(CodecError::TypeMismatch { .. })));
/// ```
pub fn get_int(object: &Object, key: &str, default: i32) -> Result<i32, CodecError> {
    match object.get(key) {
        None => Ok(default),
        Some(Value::Number(number)) => number_to_i32(number)
            .ok_or_else(|| CodecError::mismatch(key, "an integer within 32-bit range")),
        Some(_) => Err(CodecError::mismatch(key, "an integer")),
    }
}

/// Read a single-precision float field.
///
/// The number is read at double precision and narrowed to `f32`.
pub fn get_float(object: &Object, key: &str, default: f32) -> Result<f32, CodecError> {
    match object.get(key) {
        None => Ok(default),
        Some(Value::Number(number)) => number_to_f32(number)
            .ok_or_else(|| CodecError::mismatch(key, "a float within single-precision range")),
        Some(_) => Err(CodecError::mismatch(key, "a float")),
    }
}

/// Read an optional string field. `null` counts as absent.
pub fn get_str<'a>(object: &'a Object, key: &str) -> Result<Option<&'a str>, CodecError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(CodecError::mismatch(key, "a string")),
    }
}

/// Read a required string field.
pub fn require_str<'a>(object: &'a Object, key: &str) -> Result<&'a str, CodecError> {
    get_str(object, key)?
        .ok_or_else(|| CodecError::malformed(format!("missing required field '{}'", key)))
}

/// Read an optional identifier field (`namespace:value` or `value`).
pub fn get_identifier(object: &Object, key: &str) -> Result<Option<Identifier>, CodecError> {
    get_str(object, key)?
        .map(|text| parse_identifier(text, key))
        .transpose()
}

/// Parse an identifier found in a field, mapping failures to a type mismatch.
pub fn parse_identifier(text: &str, field: &str) -> Result<Identifier, CodecError> {
    Identifier::parse(text).map_err(|_| CodecError::mismatch(field, "a namespaced identifier"))
}

/// Read an optional array of strings.
pub fn get_string_list(object: &Object, key: &str) -> Result<Vec<String>, CodecError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| CodecError::mismatch(key, "an array of strings"))
            })
            .collect(),
        Some(_) => Err(CodecError::mismatch(key, "an array of strings")),
    }
}

/// Encode an `f32` as a JSON number.
///
/// The float is widened through its shortest decimal representation, so
/// `0.1f32` is written as `0.1` and reads back to the same `f32`.
pub fn float_value(value: f32) -> Result<Value, CodecError> {
    if !value.is_finite() {
        return Err(CodecError::malformed(format!(
            "cannot encode non-finite float {}",
            value
        )));
    }
    let widened = value.to_string().parse::<f64>().unwrap_or(f64::from(value));
    Number::from_f64(widened)
        .map(Value::Number)
        .ok_or_else(|| CodecError::malformed(format!("cannot encode float {}", value)))
}

pub(crate) fn number_to_i32(number: &Number) -> Option<i32> {
    if let Some(value) = number.as_i64() {
        return i32::try_from(value).ok();
    }
    let value = number.as_f64()?.trunc();
    if value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}

pub(crate) fn number_to_f32(number: &Number) -> Option<f32> {
    let narrowed = number.as_f64()? as f32;
    narrowed.is_finite().then_some(narrowed)
}
