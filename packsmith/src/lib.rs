//! Packsmith - resource pack assembly and serialization
//!
//! This library builds an in-memory model of a Minecraft-style resource pack
//! (typed resources keyed by namespaced identifiers, plus extensible
//! metadata) and converts it to and from a virtual file tree of
//! `relative path -> bytes`.
//!
//! # Overview
//!
//! ```
//! use packsmith::{read_pack, write_pack, Identifier, ReadOptions, ResourcePack, WriteOptions};
//! use packsmith::resource::{Language, Text};
//!
//! let mut pack = ResourcePack::new();
//! pack.pack_meta(15, "Example")
//!     .language(Language::new(Identifier::minecraft("en_us").unwrap()).with("menu.quit", "Leave"))
//!     .text(Text::new(Identifier::minecraft("splashes").unwrap(), "Hello"));
//!
//! let tree = write_pack(&pack, &WriteOptions::default()).unwrap();
//! assert!(tree.contains("assets/minecraft/lang/en_us.json"));
//!
//! let outcome = read_pack(&tree, &ReadOptions::default()).unwrap();
//! assert_eq!(outcome.pack, pack);
//! ```

pub mod builder;
pub mod codec;
pub mod error;
pub mod key;
pub mod metadata;
pub mod pack;
pub mod path;
pub mod resource;
pub mod serialize;
pub mod source;
pub mod tree;

pub use builder::NO_FORMAT;
pub use error::{PackError, PackResult};
pub use key::{Identifier, KeyError};
pub use pack::ResourcePack;
pub use path::{
    classify, path_for, sound_registry_path, validate_relative_path, Kind, PathClass,
    PACK_ICON_PATH, PACK_METADATA_PATH,
};
pub use serialize::{read_pack, write_pack, ReadOptions, ReadOutcome, WriteOptions};
pub use source::ByteSource;
pub use tree::FileTree;
