//! Fixed-size per-part storage.
//!
//! Every part always has a slot, so "each active part has an entry" cannot be
//! violated by construction.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::part::Part;

/// Dense map from every [`Part`] to a `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct PartMap<T> {
    values: [T; Part::COUNT],
}

impl<T> PartMap<T> {
    /// Build a map by evaluating `f` for each part.
    pub fn from_fn(mut f: impl FnMut(Part) -> T) -> Self {
        Self {
            values: std::array::from_fn(|i| f(Part::ALL[i])),
        }
    }

    pub fn get(&self, part: Part) -> &T {
        &self.values[part.index()]
    }

    pub fn get_mut(&mut self, part: Part) -> &mut T {
        &mut self.values[part.index()]
    }

    pub fn set(&mut self, part: Part, value: T) {
        self.values[part.index()] = value;
    }

    /// Iterate `(part, value)` pairs in part index order.
    pub fn iter(&self) -> impl Iterator<Item = (Part, &T)> {
        Part::ALL.iter().copied().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Part, &mut T)> {
        Part::ALL.iter().copied().zip(self.values.iter_mut())
    }
}

impl<T: Clone> PartMap<T> {
    /// Map with every slot set to `value`.
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T: Default> Default for PartMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<Part> for PartMap<T> {
    type Output = T;

    fn index(&self, part: Part) -> &T {
        self.get(part)
    }
}

impl<T> IndexMut<Part> for PartMap<T> {
    fn index_mut(&mut self, part: Part) -> &mut T {
        self.get_mut(part)
    }
}

// ---------------------------------------------------------------------------
// Serde support
// ---------------------------------------------------------------------------

impl<T: Serialize> Serialize for PartMap<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for PartMap<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = BTreeMap::<Part, T>::deserialize(deserializer)?;
        Ok(Self::from_fn(|part| entries.remove(&part).unwrap_or_default()))
    }
}
