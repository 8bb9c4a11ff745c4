//! Reverse direction: [`FileTree`] to [`ResourcePack`].
//!
//! Every path is classified by the layout conventions in [`crate::path`].
//! Matched paths are decoded into their resource kind; everything else is
//! kept verbatim as an extra file.

use serde_json::Value;
use tracing::{debug, warn};

use super::ReadOptions;
use crate::codec::{self, CodecError};
use crate::error::{PackError, PackResult};
use crate::key::Identifier;
use crate::metadata::Metadata;
use crate::pack::ResourcePack;
use crate::path::{classify, Kind, PathClass};
use crate::resource::{
    BlockState, Font, Language, Model, SoundFile, SoundRegistry, Text, Texture,
};
use crate::source::ByteSource;
use crate::tree::FileTree;

/// Result of [`read_pack`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    /// Everything that decoded, plus undecodable files kept as extra files.
    pub pack: ResourcePack,
    /// Decode failures, only ever non-empty in lenient mode.
    pub failures: Vec<PackError>,
}

impl ReadOutcome {
    /// True when every matched file decoded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The pack, or the first failure when any file failed to decode.
    pub fn into_result(self) -> PackResult<ResourcePack> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure),
            None => Ok(self.pack),
        }
    }
}

/// Decode a file tree into a fresh pack.
///
/// In strict mode the first file that matches a typed convention but fails
/// to decode aborts the read with [`PackError::ResourceDecode`]. In lenient
/// mode such failures are collected in [`ReadOutcome::failures`] and the raw
/// bytes are kept as extra files.
///
/// A `.png.mcmeta` file whose texture is absent from the tree is kept as an
/// extra file.
pub fn read_pack(tree: &FileTree, options: &ReadOptions) -> PackResult<ReadOutcome> {
    let mut reader = PackReader {
        pack: ResourcePack::new(),
        failures: Vec::new(),
        options,
    };
    let mut texture_metadata = Vec::new();

    for (path, data) in tree.iter() {
        match classify(path) {
            PathClass::Resource {
                kind: Kind::TextureMetadata,
                key,
            } => texture_metadata.push((path, data, key)),
            class => {
                let decoded = reader.decode(path, data, class);
                reader.settle(path, data, decoded)?;
            }
        }
    }

    // Textures are all known now, so companions can be attached or set aside.
    for (path, data, key) in texture_metadata {
        if !reader.pack.textures.contains(&key) {
            debug!(path = %path, "Texture metadata without texture kept as extra file");
            reader.pack.extra_files.insert(path.to_string(), data.clone());
            continue;
        }
        let decoded = reader.decode_texture_meta(data).map(|meta| {
            if let Some(texture) = reader.pack.textures.get_mut(&key) {
                texture.set_meta(meta);
            }
        });
        reader.settle(path, data, decoded)?;
    }

    debug!(
        files = tree.len(),
        resources = reader.pack.resource_count(),
        extra_files = reader.pack.extra_files.len(),
        failures = reader.failures.len(),
        "Read pack"
    );

    Ok(ReadOutcome {
        pack: reader.pack,
        failures: reader.failures,
    })
}

struct PackReader<'a> {
    pack: ResourcePack,
    failures: Vec<PackError>,
    options: &'a ReadOptions,
}

impl PackReader<'_> {
    /// Record the outcome of decoding one file.
    fn settle(
        &mut self,
        path: &str,
        data: &ByteSource,
        decoded: Result<(), CodecError>,
    ) -> PackResult<()> {
        let Err(source) = decoded else {
            return Ok(());
        };
        let failure = PackError::ResourceDecode {
            path: path.to_string(),
            source,
        };
        if !self.options.lenient {
            return Err(failure);
        }
        warn!(path = %path, error = %failure, "Keeping undecodable file as extra file");
        self.pack.extra_files.insert(path.to_string(), data.clone());
        self.failures.push(failure);
        Ok(())
    }

    fn decode(&mut self, path: &str, data: &ByteSource, class: PathClass) -> Result<(), CodecError> {
        match class {
            PathClass::PackIcon => {
                self.pack.icon = Some(data.clone());
            }
            PathClass::PackMetadata => {
                let value = parse(data)?;
                self.pack.meta =
                    Metadata::decode(&value, &self.options.codecs, self.options.unknown_parts)?;
            }
            PathClass::SoundRegistry { namespace } => {
                let registry = SoundRegistry::from_json(namespace, &parse(data)?)?;
                self.pack.sound_registries.put(registry);
            }
            PathClass::Resource { kind, key } => self.decode_resource(kind, key, data)?,
            PathClass::Extra => {
                self.pack.extra_files.insert(path.to_string(), data.clone());
            }
        }
        Ok(())
    }

    fn decode_resource(
        &mut self,
        kind: Kind,
        key: Identifier,
        data: &ByteSource,
    ) -> Result<(), CodecError> {
        match kind {
            Kind::BlockState => {
                self.pack.block_states.put(BlockState::from_json(key, &parse(data)?)?);
            }
            Kind::Font => {
                self.pack.fonts.put(Font::from_json(key, &parse(data)?)?);
            }
            Kind::Language => {
                self.pack.languages.put(Language::from_json(key, &parse(data)?)?);
            }
            Kind::Model => {
                self.pack.models.put(Model::from_json(key, &parse(data)?)?);
            }
            Kind::Sound => {
                self.pack.sounds.put(SoundFile::new(key, data.clone()));
            }
            Kind::Texture => {
                self.pack.textures.put(Texture::new(key, data.clone()));
            }
            Kind::Text => {
                self.pack.texts.put(Text::from_bytes(key, &data.bytes())?);
            }
            Kind::TextureMetadata => {
                // Attached in a second pass once all textures are known.
            }
        }
        Ok(())
    }

    fn decode_texture_meta(&self, data: &ByteSource) -> Result<Metadata, CodecError> {
        Metadata::decode(&parse(data)?, &self.options.codecs, self.options.unknown_parts)
    }
}

fn parse(data: &ByteSource) -> Result<Value, CodecError> {
    codec::parse_slice(&data.bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetadataPart, OpaquePart, PackMeta, PartTag};

    fn tree(files: &[(&str, &str)]) -> FileTree {
        files
            .iter()
            .map(|(path, content)| (path.to_string(), content.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn test_classifies_and_keeps_extras() {
        let files = tree(&[
            ("pack.mcmeta", r#"{"pack": {"pack_format": 15, "description": "d"}}"#),
            ("assets/minecraft/lang/en_us.json", r#"{"a": "b"}"#),
            ("assets/minecraft/shaders/core/x.vsh", "void main() {}"),
            ("README.md", "hello"),
        ]);
        let outcome = read_pack(&files, &ReadOptions::default()).unwrap();

        assert!(outcome.is_complete());
        assert_eq!(outcome.pack.format(), 15);
        assert_eq!(outcome.pack.languages().len(), 1);
        assert_eq!(outcome.pack.extra_files().len(), 2);
        assert!(outcome.pack.extra_files().contains_key("README.md"));
    }

    #[test]
    fn test_strict_aborts_on_first_failure() {
        let files = tree(&[("assets/minecraft/models/broken.json", "{not json")]);
        let err = read_pack(&files, &ReadOptions::default()).unwrap_err();

        assert!(matches!(err, PackError::ResourceDecode { .. }));
        assert_eq!(err.path(), Some("assets/minecraft/models/broken.json"));
    }

    #[test]
    fn test_lenient_collects_failures() {
        let files = tree(&[
            ("assets/minecraft/models/broken.json", "{not json"),
            ("assets/minecraft/lang/en_us.json", r#"{"a": 1}"#),
            ("assets/minecraft/texts/end.txt", "fine"),
        ]);
        let outcome = read_pack(&files, &ReadOptions::lenient()).unwrap();

        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.pack.texts().len(), 1);
        assert!(outcome
            .pack
            .extra_files()
            .contains_key("assets/minecraft/models/broken.json"));
        assert!(outcome.clone().into_result().is_err());
    }

    #[test]
    fn test_orphan_texture_metadata_is_extra() {
        let files = tree(&[("assets/minecraft/textures/missing.png.mcmeta", "{}")]);
        let outcome = read_pack(&files, &ReadOptions::default()).unwrap();

        assert!(outcome.pack.textures().is_empty());
        assert!(outcome
            .pack
            .extra_files()
            .contains_key("assets/minecraft/textures/missing.png.mcmeta"));
    }

    #[test]
    fn test_unknown_metadata_part_preserved() {
        let files = tree(&[(
            "pack.mcmeta",
            r#"{"pack": {"pack_format": 1}, "overlays": {"entries": []}}"#,
        )]);
        let outcome = read_pack(&files, &ReadOptions::default()).unwrap();
        let meta = outcome.pack.meta();

        assert_eq!(meta.get::<PackMeta>().unwrap().format(), 1);
        let opaque = meta.get_tag(&PartTag::Opaque("overlays".to_string())).unwrap();
        let opaque = opaque.as_any().downcast_ref::<OpaquePart>().unwrap();
        assert_eq!(opaque.value(), &serde_json::json!({"entries": []}));
    }

    #[test]
    fn test_invalid_identifier_path_is_extra() {
        let files = tree(&[("assets/Minecraft/models/Upper.json", "{}")]);
        let outcome = read_pack(&files, &ReadOptions::default()).unwrap();
        assert!(outcome.pack.models().is_empty());
        assert_eq!(outcome.pack.extra_files().len(), 1);
    }
}
