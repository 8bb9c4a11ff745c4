//! Virtual file tree: the path to bytes mapping produced by the writer and
//! consumed by the reader.
//!
//! Archive writers and filesystem walkers sit on either side of this type;
//! the crate itself performs no I/O.

use std::collections::btree_map::{self, BTreeMap};

use sha2::{Digest, Sha256};

use crate::source::ByteSource;

/// Ordered mapping from relative path to content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileTree {
    files: BTreeMap<String, ByteSource>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file, returning the previous content at that path.
    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<ByteSource>) -> Option<ByteSource> {
        self.files.insert(path.into(), data.into())
    }

    pub fn get(&self, path: &str) -> Option<&ByteSource> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn remove(&mut self, path: &str) -> Option<ByteSource> {
        self.files.remove(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ByteSource)> {
        self.files.iter().map(|(path, data)| (path.as_str(), data))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Total size of all files, materializing deferred content.
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(|data| data.bytes().len()).sum()
    }

    /// SHA-256 over every path and its content, in path order, as lowercase
    /// hex.
    ///
    /// Two trees with the same paths and bytes have the same digest.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (path, data) in &self.files {
            hasher.update(path.as_bytes());
            hasher.update([0u8]);
            let bytes = data.bytes();
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(&bytes);
        }
        format!("{:x}", hasher.finalize())
    }
}

impl<P: Into<String>, D: Into<ByteSource>> FromIterator<(P, D)> for FileTree {
    fn from_iter<I: IntoIterator<Item = (P, D)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (path, data) in iter {
            tree.insert(path, data);
        }
        tree
    }
}

impl IntoIterator for FileTree {
    type Item = (String, ByteSource);
    type IntoIter = btree_map::IntoIter<String, ByteSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}
