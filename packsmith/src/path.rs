//! Centralized path conventions for pack contents.
//!
//! This module is the single source of truth for where every resource lives
//! inside a pack:
//! - Namespaced resources: `assets/<namespace>/<kind directory>/<value>.<ext>`
//! - Sound registries: `assets/<namespace>/sounds.json`
//! - Pack singletons: `pack.png` and `pack.mcmeta`
//!
//! The writer derives paths with [`path_for`], and the reader maps paths back
//! with [`classify`]. Every [`Kind`] owns a distinct (directory, extension)
//! pair, so two different kinds never derive the same path.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::PackError;
use crate::key::Identifier;

/// Path of the pack icon.
pub const PACK_ICON_PATH: &str = "pack.png";

/// Path of the pack metadata document.
pub const PACK_METADATA_PATH: &str = "pack.mcmeta";

/// Root directory for namespaced assets.
pub const ASSETS_DIR: &str = "assets";

/// Built-in namespaced resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    BlockState,
    Font,
    Language,
    Model,
    Sound,
    Texture,
    /// Per-texture `.mcmeta` companion file.
    TextureMetadata,
    Text,
}

impl Kind {
    /// Every kind, in serialization order.
    pub const ALL: [Kind; 8] = [
        Kind::BlockState,
        Kind::Font,
        Kind::Language,
        Kind::Model,
        Kind::Sound,
        Kind::Texture,
        Kind::TextureMetadata,
        Kind::Text,
    ];

    /// Directory below `assets/<namespace>/` holding this kind.
    pub fn directory(&self) -> &'static str {
        match self {
            Kind::BlockState => "blockstates",
            Kind::Font => "font",
            Kind::Language => "lang",
            Kind::Model => "models",
            Kind::Sound => "sounds",
            Kind::Texture | Kind::TextureMetadata => "textures",
            Kind::Text => "texts",
        }
    }

    /// File extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Kind::BlockState | Kind::Font | Kind::Language | Kind::Model => "json",
            Kind::Sound => "ogg",
            Kind::Texture => "png",
            Kind::TextureMetadata => "png.mcmeta",
            Kind::Text => "txt",
        }
    }

    /// Look up the kind owning a (directory, extension) pair.
    pub fn from_parts(directory: &str, extension: &str) -> Option<Kind> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.directory() == directory && kind.extension() == extension)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Kind::BlockState => "block state",
            Kind::Font => "font",
            Kind::Language => "language",
            Kind::Model => "model",
            Kind::Sound => "sound",
            Kind::Texture => "texture",
            Kind::TextureMetadata => "texture metadata",
            Kind::Text => "text",
        };
        f.write_str(label)
    }
}

/// Derive the canonical path of a namespaced resource.
///
/// # Format
///
/// `assets/{namespace}/{directory}/{value}.{extension}`
///
/// # Examples
///
/// ```
/// use packsmith::{path_for, Identifier, Kind};
///
/// let key = Identifier::new("minecraft", "block/stone").unwrap();
/// assert_eq!(
///     path_for(Kind::Texture, &key),
///     "assets/minecraft/textures/block/stone.png"
/// );
/// assert_eq!(
///     path_for(Kind::TextureMetadata, &key),
///     "assets/minecraft/textures/block/stone.png.mcmeta"
/// );
/// ```
pub fn path_for(kind: Kind, key: &Identifier) -> String {
    format!(
        "{}/{}/{}/{}.{}",
        ASSETS_DIR,
        key.namespace(),
        kind.directory(),
        key.value(),
        kind.extension()
    )
}

/// Path of the sound registry for a namespace.
///
/// ```
/// use packsmith::sound_registry_path;
///
/// assert_eq!(sound_registry_path("minecraft"), "assets/minecraft/sounds.json");
/// ```
pub fn sound_registry_path(namespace: &str) -> String {
    format!("{}/{}/sounds.json", ASSETS_DIR, namespace)
}

/// Validate a caller-supplied relative path.
///
/// Paths use `/` separators and must stay inside the pack root: no absolute
/// roots, no drive prefixes, no empty, `.` or `..` segments.
pub fn validate_relative_path(path: &str) -> Result<(), PackError> {
    let invalid = |reason: &str| PackError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if path.is_empty() {
        return Err(invalid("path is empty"));
    }
    if path.starts_with('/') {
        return Err(invalid("path is absolute"));
    }
    if path.contains('\\') {
        return Err(invalid("path contains a backslash"));
    }
    if path.contains(':') {
        return Err(invalid("path contains a drive or scheme prefix"));
    }

    for segment in path.split('/') {
        match segment {
            "" => return Err(invalid("path contains an empty segment")),
            "." | ".." => return Err(invalid("path contains a relative segment")),
            _ => {}
        }
    }

    Ok(())
}

/// What a path inside a pack represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathClass {
    PackIcon,
    PackMetadata,
    SoundRegistry { namespace: String },
    Resource { kind: Kind, key: Identifier },
    /// Anything not following a typed convention.
    Extra,
}

/// Pattern for namespaced resources.
///
/// We capture:
/// - Group 1: namespace
/// - Group 2: kind directory
/// - Group 3: value (shortest match, so `.png.mcmeta` wins over `.png`)
/// - Group 4: extension
fn resource_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^assets/([^/]+)/([^/]+)/(.+?)\.(png\.mcmeta|json|png|ogg|txt)$")
            .expect("resource path pattern is valid")
    })
}

fn sound_registry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^assets/([^/]+)/sounds\.json$").expect("sound registry pattern is valid")
    })
}

/// Classify a path by the conventions above.
///
/// # Examples
///
/// ```
/// use packsmith::{classify, Identifier, Kind, PathClass};
///
/// assert_eq!(classify("pack.mcmeta"), PathClass::PackMetadata);
/// assert_eq!(
///     classify("assets/minecraft/models/item/apple.json"),
///     PathClass::Resource {
///         kind: Kind::Model,
///         key: Identifier::new("minecraft", "item/apple").unwrap(),
///     }
/// );
/// assert_eq!(classify("assets/minecraft/models/item/apple.png"), PathClass::Extra);
/// ```
pub fn classify(path: &str) -> PathClass {
    match path {
        PACK_ICON_PATH => return PathClass::PackIcon,
        PACK_METADATA_PATH => return PathClass::PackMetadata,
        _ => {}
    }

    if let Some(captures) = sound_registry_pattern().captures(path) {
        let namespace = &captures[1];
        if crate::key::is_valid_namespace(namespace) {
            return PathClass::SoundRegistry {
                namespace: namespace.to_string(),
            };
        }
        return PathClass::Extra;
    }

    let Some(captures) = resource_pattern().captures(path) else {
        return PathClass::Extra;
    };

    let Some(kind) = Kind::from_parts(&captures[2], &captures[4]) else {
        return PathClass::Extra;
    };

    match Identifier::new(&captures[1], &captures[3]) {
        Ok(key) => PathClass::Resource { kind, key },
        Err(_) => PathClass::Extra,
    }
}
