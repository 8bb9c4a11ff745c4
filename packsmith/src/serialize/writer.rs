//! Forward direction: [`ResourcePack`] to [`FileTree`].

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::WriteOptions;
use crate::codec::{self, CodecError};
use crate::error::{PackError, PackResult};
use crate::pack::ResourcePack;
use crate::path::{PACK_ICON_PATH, PACK_METADATA_PATH};
use crate::resource::{Registry, Resource};
use crate::source::ByteSource;
use crate::tree::FileTree;

/// Accumulates files and remembers which resource produced each path.
struct TreeWriter {
    tree: FileTree,
    origins: HashMap<String, String>,
    pretty: bool,
}

impl TreeWriter {
    fn new(options: &WriteOptions) -> Self {
        Self {
            tree: FileTree::new(),
            origins: HashMap::new(),
            pretty: options.pretty_json,
        }
    }

    fn emit(&mut self, path: String, data: ByteSource, origin: String) -> PackResult<()> {
        if let Some(first) = self.origins.get(&path) {
            return Err(PackError::PathCollision {
                path,
                first: first.clone(),
                second: origin,
            });
        }
        self.tree.insert(path.clone(), data);
        self.origins.insert(path, origin);
        Ok(())
    }

    fn emit_json(
        &mut self,
        path: String,
        value: Result<Value, CodecError>,
        origin: String,
    ) -> PackResult<()> {
        let bytes = value
            .and_then(|value| codec::to_bytes(&value, self.pretty))
            .map_err(|e| PackError::Codec(e.within(&path)))?;
        self.emit(path, ByteSource::from_bytes(bytes), origin)
    }

    fn emit_registry<T: Resource>(
        &mut self,
        registry: &Registry<T>,
        encode: impl Fn(&T) -> Result<Value, CodecError>,
    ) -> PackResult<()> {
        for resource in registry {
            self.emit_json(resource.path(), encode(resource), resource.describe())?;
        }
        Ok(())
    }
}

/// Serialize a pack into a file tree.
///
/// Files are produced in this order: the icon, every registry, the pack
/// metadata document, then extra files. Any two producers of the same path
/// fail the whole write with [`PackError::PathCollision`] naming both.
/// The pack is only read, so writing twice yields equal trees.
pub fn write_pack(pack: &ResourcePack, options: &WriteOptions) -> PackResult<FileTree> {
    let mut writer = TreeWriter::new(options);

    if let Some(icon) = &pack.icon {
        writer.emit(PACK_ICON_PATH.to_string(), icon.clone(), "pack icon".to_string())?;
    }

    writer.emit_registry(&pack.block_states, |state| Ok(state.to_json()))?;
    writer.emit_registry(&pack.fonts, |font| font.to_json())?;
    writer.emit_registry(&pack.languages, |language| Ok(language.to_json()))?;
    writer.emit_registry(&pack.models, |model| model.to_json())?;
    writer.emit_registry(&pack.sound_registries, |registry| registry.to_json())?;

    for sound in &pack.sounds {
        writer.emit(sound.path(), sound.data().clone(), sound.describe())?;
    }

    for texture in &pack.textures {
        writer.emit(texture.path(), texture.data().clone(), texture.describe())?;
        if texture.has_meta() {
            writer.emit_json(
                texture.meta_path(),
                texture.meta().encode(),
                format!("texture metadata {}", texture.key()),
            )?;
        }
    }

    for text in &pack.texts {
        writer.emit(
            text.path(),
            ByteSource::from_bytes(text.to_bytes()),
            text.describe(),
        )?;
    }

    if !pack.meta.is_empty() {
        writer.emit_json(
            PACK_METADATA_PATH.to_string(),
            pack.meta.encode(),
            "pack metadata".to_string(),
        )?;
    }

    for (path, data) in &pack.extra_files {
        writer.emit(path.clone(), data.clone(), format!("extra file {}", path))?;
    }

    debug!(
        files = writer.tree.len(),
        resources = pack.resource_count(),
        extra_files = pack.extra_files.len(),
        "Wrote pack"
    );

    Ok(writer.tree)
}
