//! Extensible metadata parts.
//!
//! A metadata document (`pack.mcmeta`, or a texture's `.png.mcmeta`) is one
//! JSON object whose top-level properties are independent *parts*. The core
//! does not know the full set of parts: any module can define its own by
//! implementing [`PartData`] and registering it with [`PartCodecs`].
//!
//! # Type Hierarchy
//!
//! ```text
//! PartData (typed, user-implemented)       MetadataPart (object-safe)
//! ├── PackMeta      "pack"           ──►   Typed<P: PartData>
//! ├── FilterMeta    "filter"               OpaquePart (unknown property,
//! ├── LanguageMeta  "language"                         kept as raw JSON)
//! ├── SodiumMeta    "sodium"
//! ├── AnimationMeta "animation"
//! ├── TextureMeta   "texture"
//! └── VillagerMeta  "villager"
//! ```
//!
//! A [`Metadata`] collection holds at most one part per property name;
//! inserting a part replaces whatever held that property before, whether
//! it was typed or opaque.

mod codecs;
mod filter;
mod language;
mod pack;
mod sodium;
mod texture;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::codec::{self, CodecError};

pub use codecs::PartCodecs;
pub use filter::{FilterMeta, FilterPattern};
pub use language::{LanguageEntry, LanguageMeta};
pub use pack::PackMeta;
pub use sodium::SodiumMeta;
pub use texture::{AnimationFrame, AnimationMeta, TextureMeta, VillagerHat, VillagerMeta};

/// A named, displayable property of a part, used for debugging and equality
/// reports.
pub type ExaminedProperty = (&'static str, String);

/// Strongly-typed metadata part.
///
/// Implement this for a plain data type to make it attachable to a pack.
///
/// # Example
///
/// ```
/// use packsmith::codec::{self, CodecError};
/// use packsmith::metadata::{Metadata, PartData};
/// use serde_json::{json, Value};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Credits {
///     author: String,
/// }
///
/// impl PartData for Credits {
///     const PROPERTY: &'static str = "credits";
///
///     fn examine(&self) -> Vec<(&'static str, String)> {
///         vec![("author", self.author.clone())]
///     }
///
///     fn encode(&self) -> Result<Value, CodecError> {
///         Ok(json!({ "author": self.author }))
///     }
///
///     fn decode(value: &Value) -> Result<Self, CodecError> {
///         let object = codec::as_object(value, "credits")?;
///         Ok(Credits { author: codec::require_str(object, "author")?.to_string() })
///     }
/// }
///
/// let mut metadata = Metadata::new();
/// metadata.insert(Credits { author: "me".to_string() });
/// assert_eq!(metadata.get::<Credits>().unwrap().author, "me");
/// ```
pub trait PartData: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Top-level property name in the metadata document.
    const PROPERTY: &'static str;

    /// Stable ordered list of named properties.
    fn examine(&self) -> Vec<ExaminedProperty>;

    /// Encode the part body (the value stored under [`Self::PROPERTY`]).
    fn encode(&self) -> Result<Value, CodecError>;

    /// Decode the part body.
    fn decode(value: &Value) -> Result<Self, CodecError>;
}

/// Registry key of a part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartTag {
    /// A [`PartData`] type.
    Typed(TypeId),
    /// An unknown property preserved as raw JSON.
    Opaque(String),
}

impl PartTag {
    /// Tag of a typed part.
    pub fn of<P: PartData>() -> Self {
        PartTag::Typed(TypeId::of::<P>())
    }
}

/// Object-safe view of a metadata part.
pub trait MetadataPart: fmt::Debug + Send + Sync {
    fn tag(&self) -> PartTag;

    /// Top-level property name.
    fn property(&self) -> &str;

    fn examine(&self) -> Vec<ExaminedProperty>;

    fn encode(&self) -> Result<Value, CodecError>;

    /// The concrete part, for downcasting.
    fn as_any(&self) -> &dyn Any;

    fn clone_part(&self) -> Box<dyn MetadataPart>;

    /// Structural equality against another part.
    fn eq_part(&self, other: &dyn MetadataPart) -> bool;
}

/// Adapter from a [`PartData`] type to [`MetadataPart`].
#[derive(Debug, Clone, PartialEq)]
struct Typed<P>(P);

impl<P: PartData> MetadataPart for Typed<P> {
    fn tag(&self) -> PartTag {
        PartTag::of::<P>()
    }

    fn property(&self) -> &str {
        P::PROPERTY
    }

    fn examine(&self) -> Vec<ExaminedProperty> {
        self.0.examine()
    }

    fn encode(&self) -> Result<Value, CodecError> {
        self.0.encode()
    }

    fn as_any(&self) -> &dyn Any {
        &self.0
    }

    fn clone_part(&self) -> Box<dyn MetadataPart> {
        Box::new(self.clone())
    }

    fn eq_part(&self, other: &dyn MetadataPart) -> bool {
        other.as_any().downcast_ref::<P>() == Some(&self.0)
    }
}

/// A property no registered codec understood, kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaquePart {
    property: String,
    value: Value,
}

impl OpaquePart {
    pub fn new(property: impl Into<String>, value: Value) -> Self {
        Self {
            property: property.into(),
            value,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl MetadataPart for OpaquePart {
    fn tag(&self) -> PartTag {
        PartTag::Opaque(self.property.clone())
    }

    fn property(&self) -> &str {
        &self.property
    }

    fn examine(&self) -> Vec<ExaminedProperty> {
        vec![("value", self.value.to_string())]
    }

    fn encode(&self) -> Result<Value, CodecError> {
        Ok(self.value.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_part(&self) -> Box<dyn MetadataPart> {
        Box::new(self.clone())
    }

    fn eq_part(&self, other: &dyn MetadataPart) -> bool {
        other.as_any().downcast_ref::<OpaquePart>() == Some(self)
    }
}

/// What to do with properties no codec is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownParts {
    /// Keep them as [`OpaquePart`]s so they are written back unchanged.
    #[default]
    Preserve,
    /// Skip them.
    Drop,
}

/// Collection of metadata parts keyed by [`PartTag`].
#[derive(Default)]
pub struct Metadata {
    parts: HashMap<PartTag, Box<dyn MetadataPart>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable form of [`Metadata::insert`].
    pub fn with<P: PartData>(mut self, part: P) -> Self {
        self.insert(part);
        self
    }

    /// Insert a typed part, replacing any part with the same property.
    pub fn insert<P: PartData>(&mut self, part: P) -> &mut Self {
        self.insert_part(Box::new(Typed(part)))
    }

    /// Insert an already boxed part, replacing any part with the same
    /// property.
    ///
    /// An [`OpaquePart`] kept by a reader that lacked the codec is replaced
    /// by a typed part of the same name, and the other way round.
    pub fn insert_part(&mut self, part: Box<dyn MetadataPart>) -> &mut Self {
        self.parts
            .retain(|_, existing| existing.property() != part.property());
        self.parts.insert(part.tag(), part);
        self
    }

    pub fn get<P: PartData>(&self) -> Option<&P> {
        self.parts
            .get(&PartTag::of::<P>())
            .and_then(|part| part.as_any().downcast_ref::<P>())
    }

    pub fn get_tag(&self, tag: &PartTag) -> Option<&dyn MetadataPart> {
        self.parts.get(tag).map(|part| part.as_ref())
    }

    pub fn contains<P: PartData>(&self) -> bool {
        self.parts.contains_key(&PartTag::of::<P>())
    }

    /// Remove a typed part, returning it.
    pub fn remove<P: PartData>(&mut self) -> Option<P> {
        let part = self.parts.remove(&PartTag::of::<P>())?;
        part.as_any().downcast_ref::<P>().cloned()
    }

    /// All parts, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &dyn MetadataPart> {
        self.parts.values().map(|part| part.as_ref())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parts ordered by property name.
    fn sorted(&self) -> Vec<&dyn MetadataPart> {
        let mut parts: Vec<&dyn MetadataPart> = self.all().collect();
        parts.sort_by(|a, b| a.property().cmp(b.property()));
        parts
    }

    /// Encode every part into one JSON object, properties sorted by name.
    pub fn encode(&self) -> Result<Value, CodecError> {
        let mut object = Map::new();
        for part in self.sorted() {
            let property = part.property();
            let body = part.encode().map_err(|e| e.within(property))?;
            if object.insert(property.to_string(), body).is_some() {
                return Err(CodecError::malformed(format!(
                    "two metadata parts claim property '{}'",
                    property
                )));
            }
        }
        Ok(Value::Object(object))
    }

    /// Decode a metadata document.
    ///
    /// Each property is dispatched to the codec registered for its name.
    /// Unknown properties never fail the decode; they are preserved or
    /// dropped according to `unknown`.
    pub fn decode(
        value: &Value,
        codecs: &PartCodecs,
        unknown: UnknownParts,
    ) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "metadata")?;
        let mut metadata = Metadata::new();

        for (property, body) in object {
            match codecs.decode(property, body) {
                Some(part) => {
                    metadata.insert_part(part.map_err(|e| e.within(property))?);
                }
                None => match unknown {
                    UnknownParts::Preserve => {
                        debug!(property = %property, "Preserving unknown metadata part");
                        metadata.insert_part(Box::new(OpaquePart::new(property, body.clone())));
                    }
                    UnknownParts::Drop => {
                        warn!(property = %property, "Dropping unknown metadata part");
                    }
                },
            }
        }

        Ok(metadata)
    }

    /// SHA-256 of the canonical encoding, as lowercase hex.
    ///
    /// Stable across runs and platforms; equal collections have equal
    /// digests.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for part in self.sorted() {
            hasher.update(part.property().as_bytes());
            hasher.update([0u8]);
            hasher.update(canonical_body(part).as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

fn canonical_body(part: &dyn MetadataPart) -> String {
    part.encode()
        .map(|value| value.to_string())
        .unwrap_or_default()
}

impl Clone for Metadata {
    fn clone(&self) -> Self {
        Self {
            parts: self
                .parts
                .iter()
                .map(|(tag, part)| (tag.clone(), part.clone_part()))
                .collect(),
        }
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.parts.len() == other.parts.len()
            && self.parts.iter().all(|(tag, part)| {
                other
                    .parts
                    .get(tag)
                    .is_some_and(|theirs| part.eq_part(theirs.as_ref()))
            })
    }
}

impl Hash for Metadata {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for part in self.sorted() {
            part.property().hash(state);
            canonical_body(part).hash(state);
        }
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for part in self.sorted() {
            map.entry(&part.property(), &part.examine());
        }
        map.finish()
    }
}
