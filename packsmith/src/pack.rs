//! The resource pack aggregate.
//!
//! A [`ResourcePack`] is a plain value: an optional icon, the pack metadata
//! document, one [`Registry`] per resource kind and a map of extra files
//! stored at caller-chosen paths. It is mutated through the fluent methods
//! in [`crate::builder`] and read by [`crate::serialize`].

use std::collections::BTreeMap;

use crate::metadata::Metadata;
use crate::resource::{
    BlockState, Font, Language, Model, Registry, SoundFile, SoundRegistry, Text, Texture,
};
use crate::source::ByteSource;

/// In-memory resource pack.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourcePack {
    pub(crate) icon: Option<ByteSource>,
    pub(crate) meta: Metadata,
    pub(crate) block_states: Registry<BlockState>,
    pub(crate) fonts: Registry<Font>,
    pub(crate) languages: Registry<Language>,
    pub(crate) models: Registry<Model>,
    pub(crate) sound_registries: Registry<SoundRegistry>,
    pub(crate) sounds: Registry<SoundFile>,
    pub(crate) textures: Registry<Texture>,
    pub(crate) texts: Registry<Text>,
    pub(crate) extra_files: BTreeMap<String, ByteSource>,
}

impl ResourcePack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of typed resources across all registries.
    pub fn resource_count(&self) -> usize {
        self.block_states.len()
            + self.fonts.len()
            + self.languages.len()
            + self.models.len()
            + self.sound_registries.len()
            + self.sounds.len()
            + self.textures.len()
            + self.texts.len()
    }

    /// True when the pack holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.icon.is_none()
            && self.meta.is_empty()
            && self.resource_count() == 0
            && self.extra_files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Identifier;

    #[test]
    fn test_new_pack_is_empty() {
        let pack = ResourcePack::new();
        assert!(pack.is_empty());
        assert_eq!(pack.resource_count(), 0);
    }

    #[test]
    fn test_equality_is_structural() {
        let key = Identifier::new("minecraft", "end").unwrap();
        let mut a = ResourcePack::new();
        let mut b = ResourcePack::new();
        a.texts.put(Text::new(key.clone(), "x"));
        b.texts.put(Text::new(key.clone(), "x"));
        assert_eq!(a, b);

        b.texts.put(Text::new(key, "y"));
        assert_ne!(a, b);
    }
}
