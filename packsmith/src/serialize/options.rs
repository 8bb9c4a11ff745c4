//! Options for writing and reading packs.

use serde::{Deserialize, Serialize};

use crate::metadata::{PartCodecs, PartData, UnknownParts};

/// Options for [`write_pack`](super::write_pack).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Indent JSON files instead of writing them compactly.
    pub pretty_json: bool,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether JSON files are pretty printed.
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }
}

/// Options for [`read_pack`](super::read_pack).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Collect decode failures instead of stopping at the first one.
    ///
    /// Files that fail to decode are kept as extra files.
    pub lenient: bool,

    /// Policy for metadata properties without a registered codec.
    pub unknown_parts: UnknownParts,

    /// Metadata part decoders. Not part of the serialized form; defaults to
    /// the built-in parts.
    #[serde(skip)]
    pub codecs: PartCodecs,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            lenient: false,
            unknown_parts: UnknownParts::Preserve,
            codecs: PartCodecs::builtin(),
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient reading: collect failures and keep going.
    pub fn lenient() -> Self {
        Self::default().with_lenient(true)
    }

    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn with_unknown_parts(mut self, policy: UnknownParts) -> Self {
        self.unknown_parts = policy;
        self
    }

    /// Replace the metadata part decoders.
    pub fn with_codecs(mut self, codecs: PartCodecs) -> Self {
        self.codecs = codecs;
        self
    }

    /// Register one more metadata part type.
    pub fn with_part<P: PartData>(mut self) -> Self {
        self.codecs.register::<P>();
        self
    }
}
