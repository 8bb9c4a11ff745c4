//! Textures (`textures/*.png`) and their optional `.png.mcmeta` metadata.

use super::Resource;
use crate::key::Identifier;
use crate::metadata::Metadata;
use crate::path::{path_for, Kind};
use crate::source::ByteSource;

/// PNG image with optional texture metadata.
///
/// The image bytes are opaque to this crate; only the metadata is decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    key: Identifier,
    data: ByteSource,
    meta: Metadata,
}

impl Texture {
    pub fn new(key: Identifier, data: impl Into<ByteSource>) -> Self {
        Self {
            key,
            data: data.into(),
            meta: Metadata::new(),
        }
    }

    /// Attach metadata written to the `.png.mcmeta` companion file.
    pub fn with_meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }

    pub fn data(&self) -> &ByteSource {
        &self.data
    }

    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub fn has_meta(&self) -> bool {
        !self.meta.is_empty()
    }

    pub(crate) fn set_meta(&mut self, meta: Metadata) {
        self.meta = meta;
    }

    /// Path of the companion metadata file.
    pub fn meta_path(&self) -> String {
        path_for(Kind::TextureMetadata, &self.key)
    }
}

impl Resource for Texture {
    type Key = Identifier;
    const LABEL: &'static str = "texture";

    fn key(&self) -> &Identifier {
        &self.key
    }

    fn path(&self) -> String {
        path_for(Kind::Texture, &self.key)
    }
}
