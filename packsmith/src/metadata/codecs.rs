//! Decoder registry for metadata parts.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::{
    AnimationMeta, FilterMeta, LanguageMeta, MetadataPart, PackMeta, PartData, SodiumMeta,
    TextureMeta, Typed, VillagerMeta,
};
use crate::codec::CodecError;

type DecodeFn = fn(&Value) -> Result<Box<dyn MetadataPart>, CodecError>;

fn decode_boxed<P: PartData>(value: &Value) -> Result<Box<dyn MetadataPart>, CodecError> {
    Ok(Box::new(Typed(P::decode(value)?)))
}

/// Maps metadata property names to part decoders.
///
/// The default registry knows every built-in part. Third-party parts are
/// added with [`PartCodecs::register`].
///
/// # Example
///
/// ```
/// use packsmith::metadata::{PackMeta, PartCodecs};
///
/// let empty = PartCodecs::empty();
/// assert!(!empty.knows("pack"));
///
/// let mut codecs = PartCodecs::empty();
/// codecs.register::<PackMeta>();
/// assert!(codecs.knows("pack"));
/// ```
#[derive(Clone)]
pub struct PartCodecs {
    decoders: HashMap<&'static str, DecodeFn>,
}

impl PartCodecs {
    /// A registry with no decoders.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// A registry with every built-in part.
    pub fn builtin() -> Self {
        let mut codecs = Self::empty();
        codecs
            .register::<PackMeta>()
            .register::<FilterMeta>()
            .register::<LanguageMeta>()
            .register::<SodiumMeta>()
            .register::<AnimationMeta>()
            .register::<TextureMeta>()
            .register::<VillagerMeta>();
        codecs
    }

    /// Register the decoder for `P`, replacing any decoder for its property.
    pub fn register<P: PartData>(&mut self) -> &mut Self {
        self.decoders.insert(P::PROPERTY, decode_boxed::<P>);
        self
    }

    /// Check whether a property has a decoder.
    pub fn knows(&self, property: &str) -> bool {
        self.decoders.contains_key(property)
    }

    /// Decode a property body; `None` when no decoder is registered.
    pub fn decode(
        &self,
        property: &str,
        value: &Value,
    ) -> Option<Result<Box<dyn MetadataPart>, CodecError>> {
        self.decoders.get(property).map(|decode| decode(value))
    }

    /// Registered property names, sorted.
    pub fn properties(&self) -> Vec<&'static str> {
        let mut properties: Vec<&'static str> = self.decoders.keys().copied().collect();
        properties.sort_unstable();
        properties
    }
}

impl Default for PartCodecs {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for PartCodecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartCodecs")
            .field("properties", &self.properties())
            .finish()
    }
}
