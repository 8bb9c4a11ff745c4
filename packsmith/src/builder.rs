//! Fluent accumulation methods on [`ResourcePack`].
//!
//! Setters take `&mut self` and return it for chaining; getters are plain
//! reads.
//!
//! # Examples
//!
//! ```
//! use packsmith::{Identifier, ResourcePack};
//! use packsmith::resource::Text;
//!
//! let mut pack = ResourcePack::new();
//! pack.pack_meta(15, "My pack")
//!     .text(Text::new(Identifier::minecraft("splashes").unwrap(), "Hello!"));
//!
//! assert_eq!(pack.format(), 15);
//! assert_eq!(pack.description(), Some("My pack"));
//! assert_eq!(pack.texts().len(), 1);
//! ```

use std::collections::BTreeMap;

use crate::error::PackResult;
use crate::key::Identifier;
use crate::metadata::{FilterMeta, LanguageEntry, LanguageMeta, Metadata, PackMeta, PartData};
use crate::pack::ResourcePack;
use crate::path::validate_relative_path;
use crate::resource::{
    BlockState, Font, FontProvider, Language, Model, Registry, SoundEvent, SoundFile,
    SoundRegistry, Text, Texture,
};
use crate::source::ByteSource;

/// Returned by [`ResourcePack::format`] when no pack metadata is set.
pub const NO_FORMAT: i32 = -1;

impl ResourcePack {
    pub fn set_icon(&mut self, icon: impl Into<ByteSource>) -> &mut Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn clear_icon(&mut self) -> &mut Self {
        self.icon = None;
        self
    }

    pub fn icon(&self) -> Option<&ByteSource> {
        self.icon.as_ref()
    }

    /// Pack metadata document (`pack.mcmeta`).
    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }

    /// Replace the whole metadata document.
    pub fn set_meta(&mut self, meta: Metadata) -> &mut Self {
        self.meta = meta;
        self
    }

    pub fn pack_meta(&mut self, format: i32, description: impl Into<String>) -> &mut Self {
        self.meta.insert(PackMeta::new(format, description));
        self
    }

    /// Pack format, or [`NO_FORMAT`] when no `pack` part is set.
    pub fn format(&self) -> i32 {
        self.meta
            .get::<PackMeta>()
            .map_or(NO_FORMAT, PackMeta::format)
    }

    pub fn description(&self) -> Option<&str> {
        self.meta.get::<PackMeta>().map(PackMeta::description)
    }

    /// Replace the languages the pack declares.
    pub fn language_registry(&mut self, languages: LanguageMeta) -> &mut Self {
        self.meta.insert(languages);
        self
    }

    /// Declare one language, keeping the others already declared.
    pub fn language_entry(&mut self, code: impl Into<String>, entry: LanguageEntry) -> &mut Self {
        let mut languages = self.meta.remove::<LanguageMeta>().unwrap_or_default();
        languages.insert(code, entry);
        self.meta.insert(languages);
        self
    }

    /// Languages the pack declares, if any `language` part is set.
    pub fn language_entries(&self) -> Option<&LanguageMeta> {
        self.meta.get::<LanguageMeta>()
    }

    /// Display information declared for one language code.
    pub fn declared_language(&self, code: &str) -> Option<&LanguageEntry> {
        self.language_entries()?.get(code)
    }

    pub fn filter(&mut self, filter: FilterMeta) -> &mut Self {
        self.meta.insert(filter);
        self
    }

    /// Attach any metadata part, replacing one of the same type.
    pub fn metadata_part<P: PartData>(&mut self, part: P) -> &mut Self {
        self.meta.insert(part);
        self
    }

    pub fn block_state(&mut self, state: BlockState) -> &mut Self {
        self.block_states.put(state);
        self
    }

    pub fn font(&mut self, font: Font) -> &mut Self {
        self.fonts.put(font);
        self
    }

    /// Append a provider to the font `key`, creating the font if needed.
    pub fn font_provider(&mut self, key: Identifier, provider: FontProvider) -> &mut Self {
        self.fonts
            .get_or_insert_with(key.clone(), || Font::new(key, Vec::new()))
            .push(provider);
        self
    }

    pub fn language(&mut self, language: Language) -> &mut Self {
        self.languages.put(language);
        self
    }

    pub fn model(&mut self, model: Model) -> &mut Self {
        self.models.put(model);
        self
    }

    /// Replace the sound registry of a namespace.
    pub fn sound_registry(&mut self, registry: SoundRegistry) -> &mut Self {
        self.sound_registries.put(registry);
        self
    }

    /// Add or replace one event in the registry of `key`'s namespace.
    ///
    /// The event name is the identifier value, e.g. `custom:ambient.wind`.
    pub fn sound_event(&mut self, key: &Identifier, event: SoundEvent) -> &mut Self {
        self.sound_registries
            .get_or_insert_with(key.namespace().to_string(), || SoundRegistry::for_key(key))
            .insert(key.value(), event);
        self
    }

    pub fn sound(&mut self, sound: SoundFile) -> &mut Self {
        self.sounds.put(sound);
        self
    }

    pub fn texture(&mut self, texture: Texture) -> &mut Self {
        self.textures.put(texture);
        self
    }

    pub fn text(&mut self, text: Text) -> &mut Self {
        self.texts.put(text);
        self
    }

    /// Store bytes at a caller-chosen path, replacing any earlier file there.
    ///
    /// The path must be relative and free of `.`/`..` segments. It is not
    /// checked against typed resources here; a clash is reported when the
    /// pack is written.
    pub fn file(&mut self, path: &str, data: impl Into<ByteSource>) -> PackResult<&mut Self> {
        validate_relative_path(path)?;
        self.extra_files.insert(path.to_string(), data.into());
        Ok(self)
    }

    pub fn remove_file(&mut self, path: &str) -> Option<ByteSource> {
        self.extra_files.remove(path)
    }

    pub fn extra_files(&self) -> &BTreeMap<String, ByteSource> {
        &self.extra_files
    }

    pub fn block_states(&self) -> &Registry<BlockState> {
        &self.block_states
    }

    pub fn block_states_mut(&mut self) -> &mut Registry<BlockState> {
        &mut self.block_states
    }

    pub fn fonts(&self) -> &Registry<Font> {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut Registry<Font> {
        &mut self.fonts
    }

    pub fn languages(&self) -> &Registry<Language> {
        &self.languages
    }

    pub fn languages_mut(&mut self) -> &mut Registry<Language> {
        &mut self.languages
    }

    pub fn models(&self) -> &Registry<Model> {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut Registry<Model> {
        &mut self.models
    }

    pub fn sound_registries(&self) -> &Registry<SoundRegistry> {
        &self.sound_registries
    }

    pub fn sound_registries_mut(&mut self) -> &mut Registry<SoundRegistry> {
        &mut self.sound_registries
    }

    pub fn sounds(&self) -> &Registry<SoundFile> {
        &self.sounds
    }

    pub fn sounds_mut(&mut self) -> &mut Registry<SoundFile> {
        &mut self.sounds
    }

    pub fn textures(&self) -> &Registry<Texture> {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut Registry<Texture> {
        &mut self.textures
    }

    pub fn texts(&self) -> &Registry<Text> {
        &self.texts
    }

    pub fn texts_mut(&mut self) -> &mut Registry<Text> {
        &mut self.texts
    }
}
