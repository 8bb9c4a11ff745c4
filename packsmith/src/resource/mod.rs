//! Typed resources and their registries.
//!
//! Each resource kind lives in its own [`Registry`], keyed by the resource's
//! identifier (or namespace, for sound registries). Inserting a resource with
//! an existing key replaces it; [`Registry::try_put`] is the insert-or-fail
//! alternative.

mod blockstate;
mod font;
mod language;
mod model;
mod sound;
mod text;
mod texture;

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use crate::error::PackError;

pub use blockstate::BlockState;
pub use font::{Font, FontProvider};
pub use language::Language;
pub use model::{GuiLight, ItemTransform, Model};
pub use sound::{SoundEntry, SoundEntryType, SoundEvent, SoundFile, SoundRegistry};
pub use text::Text;
pub use texture::Texture;

/// A resource stored in a [`Registry`].
pub trait Resource: Clone + PartialEq + fmt::Debug {
    type Key: Ord + Clone + fmt::Display;

    /// Human readable kind name, used in error messages.
    const LABEL: &'static str;

    fn key(&self) -> &Self::Key;

    /// Canonical output path.
    fn path(&self) -> String;

    /// `<label> <key>`, naming the resource in collision reports.
    fn describe(&self) -> String {
        format!("{} {}", Self::LABEL, self.key())
    }
}

/// Keyed collection of one resource kind.
#[derive(Clone, PartialEq)]
pub struct Registry<T: Resource> {
    entries: BTreeMap<T::Key, T>,
}

impl<T: Resource> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert a resource, returning the one it replaced.
    pub fn put(&mut self, resource: T) -> Option<T> {
        self.entries.insert(resource.key().clone(), resource)
    }

    /// Insert a resource unless its key is already taken.
    pub fn try_put(&mut self, resource: T) -> Result<(), PackError> {
        match self.entries.entry(resource.key().clone()) {
            btree_map::Entry::Occupied(entry) => Err(PackError::DuplicateResource {
                kind: T::LABEL.to_string(),
                key: entry.key().to_string(),
            }),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(resource);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    /// Get the resource for `key`, inserting `create()` when absent.
    pub fn get_or_insert_with(&mut self, key: T::Key, create: impl FnOnce() -> T) -> &mut T {
        self.entries.entry(key).or_insert_with(create)
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        self.entries.remove(key)
    }

    /// All resources, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &T::Key> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Resource> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.values()).finish()
    }
}

impl<T: Resource> FromIterator<T> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = Self::new();
        for resource in iter {
            registry.put(resource);
        }
        registry
    }
}

impl<'a, T: Resource> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = btree_map::Values<'a, T::Key, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
