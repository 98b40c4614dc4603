// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Generic sparse-set storage
//!
//! The sparse set is the one data structure the whole registry is built on:
//! the live-entity set, every component pool, and every system's membership
//! set are all instances of it. Payloads live in a dense, hole-free array for
//! cache-friendly iteration, with a two-way index keeping entity keys and
//! dense slots consistent.

use crate::ecs::Entity;
use std::collections::HashMap;

/// Dense storage of `T` payloads keyed by [`Entity`].
///
/// Insert, remove, and lookup are all O(1). Removal swaps the last slot into
/// the vacated one, so iteration order is only insertion order until the
/// first removal; callers must not rely on slot order surviving a removal.
pub struct SparseSet<T> {
    /// Forward map from entity key to dense slot index
    indices: HashMap<Entity, usize>,
    /// Reverse map from dense slot index back to entity key
    entities: Vec<Entity>,
    /// The payloads, stored densely with no holes
    data: Vec<T>,
}

impl<T> SparseSet<T> {
    /// Create a new empty sparse set
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a sparse set with preallocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        SparseSet {
            indices: HashMap::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }

    /// Insert a payload for `entity`, returning a reference to it.
    ///
    /// If the entity already has a payload it is overwritten in place and no
    /// new slot is created. Never fails.
    pub fn insert(&mut self, entity: Entity, value: T) -> &mut T {
        if let Some(&index) = self.indices.get(&entity) {
            self.data[index] = value;
            &mut self.data[index]
        } else {
            let index = self.data.len();
            self.indices.insert(entity, index);
            self.entities.push(entity);
            self.data.push(value);

            debug_assert_eq!(self.indices.len(), self.entities.len());
            debug_assert_eq!(self.indices.len(), self.data.len());

            &mut self.data[index]
        }
    }

    /// Remove and return the payload for `entity`, if present.
    ///
    /// The last slot's payload and key are relocated into the vacated slot
    /// before the storage shrinks. The `index == last` case is branched on
    /// explicitly so the forward map is never rewritten for a key that was
    /// just erased.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.indices.remove(&entity)?;
        let last = self.data.len() - 1;

        if index != last {
            self.data.swap(index, last);
            self.entities.swap(index, last);
            let moved = self.entities[index];
            self.indices.insert(moved, index);
        }

        self.entities.pop();
        let removed = self.data.pop();

        debug_assert_eq!(self.indices.len(), self.entities.len());
        debug_assert_eq!(self.indices.len(), self.data.len());

        removed
    }

    /// Get a reference to the payload for `entity`
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let index = self.indices.get(&entity)?;
        Some(&self.data[*index])
    }

    /// Get a mutable reference to the payload for `entity`
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let index = self.indices.get(&entity)?;
        Some(&mut self.data[*index])
    }

    /// Check whether `entity` has a payload in this set
    pub fn contains(&self, entity: Entity) -> bool {
        self.indices.contains_key(&entity)
    }

    /// Number of payloads stored
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The dense entity keys, parallel to [`SparseSet::values`]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The dense payload array
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// The dense payload array, mutable
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over `(entity, payload)` pairs in dense order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.data.iter())
    }

    /// Remove every payload
    pub fn clear(&mut self) {
        self.indices.clear();
        self.entities.clear();
        self.data.clear();
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
