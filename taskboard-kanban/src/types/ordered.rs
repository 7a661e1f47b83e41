//! Ordered arenas keyed by id.
//!
//! Columns on a board and tasks in a column are order-sensitive sequences
//! whose members are addressed by id. `Ordered` keeps both: lookup by key,
//! iteration in display order, and positional insert/remove that shifts the
//! rest of the sequence without reordering it.

use indexmap::IndexMap;
use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A value that carries its own arena key
pub trait Keyed {
    type Key: Clone + Eq + Hash + Display + Debug;

    fn key(&self) -> &Self::Key;
}

/// Insertion-ordered arena of `T`, unique by `T::key()`.
///
/// Serializes as a plain sequence; deserializing a sequence with a repeated
/// key fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordered<T: Keyed>(IndexMap<T::Key, T>);

impl<T: Keyed> Ordered<T> {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.0.get_mut(key)
    }

    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.0.get_index(index).map(|(_, v)| v)
    }

    /// Position of `key` in display order
    pub fn index_of(&self, key: &T::Key) -> Option<usize> {
        self.0.get_index_of(key)
    }

    pub fn first(&self) -> Option<&T> {
        self.0.first().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.values_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &T::Key> {
        self.0.keys()
    }

    /// Append at the end. Returns the value back if its key is taken.
    pub fn push(&mut self, value: T) -> Result<usize, T> {
        self.insert_at(self.0.len(), value)
    }

    /// Insert at `index`, clamped to the current length, shifting later
    /// entries down. Returns the value back if its key is taken.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<usize, T> {
        if self.0.contains_key(value.key()) {
            return Err(value);
        }
        let index = index.min(self.0.len());
        self.0.shift_insert(index, value.key().clone(), value);
        Ok(index)
    }

    /// Remove by key, preserving the order of the rest.
    /// Returns the removed value and the index it held.
    pub fn remove(&mut self, key: &T::Key) -> Option<(usize, T)> {
        self.0
            .shift_remove_full(key)
            .map(|(index, _, value)| (index, value))
    }

    /// Move an existing entry to `index` (clamped), preserving everything else
    pub fn move_to(&mut self, key: &T::Key, index: usize) -> Option<usize> {
        let from = self.0.get_index_of(key)?;
        let to = index.min(self.0.len() - 1);
        self.0.move_index(from, to);
        Some(to)
    }
}

impl<T: Keyed> Default for Ordered<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> FromIterator<T> for Ordered<T> {
    /// Later duplicates are dropped
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arena = Self::new();
        for value in iter {
            let _ = arena.push(value);
        }
        arena
    }
}

impl<T: Keyed> IntoIterator for Ordered<T> {
    type Item = T;
    type IntoIter = indexmap::map::IntoValues<T::Key, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl<T: Keyed + Serialize> Serialize for Ordered<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for value in self.0.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T: Keyed + Deserialize<'de>> Deserialize<'de> for Ordered<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<T>::deserialize(deserializer)?;
        let mut arena = Self::new();
        for value in values {
            if let Err(dup) = arena.push(value) {
                return Err(D::Error::custom(format!("duplicate id: {}", dup.key())));
            }
        }
        Ok(arena)
    }
}
