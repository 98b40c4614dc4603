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
//! Entity identities and their lifecycle
//!
//! Entities are opaque integer handles with no inherent data; an entity
//! exists exactly while it is a member of the manager's live set. Destroyed
//! ids are recycled first-destroyed-first-reused, which keeps the id space
//! compact under heavy create/destroy churn.

use crate::ecs::SparseSet;
use log::debug;
use std::collections::VecDeque;
use std::fmt;

/// Opaque handle identifying an entity
///
/// A handle says nothing about liveness on its own; validity is a question
/// for [`EntityManager::contains`] (or `Registry::validate_entity`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Reserved sentinel meaning "no entity"; never issued by the manager
    pub const INVALID: Entity = Entity(u32::MAX);

    /// Build an entity handle from a raw id
    ///
    /// Intended for tests and benchmarks; real handles come from
    /// `Registry::create_entity`.
    pub fn from_raw(id: u32) -> Self {
        Entity(id)
    }

    /// The raw integer id of this handle
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Issues, validates, and recycles entity identities
///
/// The live set is a [`SparseSet`] of bare ids, so enumerating live entities
/// is a dense-slice traversal like everything else in the registry.
pub struct EntityManager {
    live: SparseSet<()>,
    recycled: VecDeque<Entity>,
    next_id: u32,
}

impl EntityManager {
    /// Create a manager with no live entities
    pub fn new() -> Self {
        EntityManager {
            live: SparseSet::new(),
            recycled: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Create a new entity and register it as live.
    ///
    /// The least-recently-destroyed id is reused first; a fresh id is minted
    /// only when the free list is empty.
    ///
    /// # Panics
    ///
    /// Panics if the live-id count would reach [`Entity::INVALID`]. Running
    /// out of id space is an invariant violation, not a recoverable error.
    pub fn create(&mut self) -> Entity {
        let entity = match self.recycled.pop_front() {
            Some(entity) => entity,
            None => {
                // Free list empty means every issued id is live, so the live
                // count equals next_id here
                assert!(
                    self.next_id < Entity::INVALID.raw(),
                    "entity id space exhausted: live entity count reached the reserved sentinel"
                );
                let entity = Entity(self.next_id);
                self.next_id += 1;
                entity
            }
        };
        self.live.insert(entity, ());
        debug!("created {entity}");
        entity
    }

    /// Destroy an entity and queue its id for reuse.
    ///
    /// Destroying an id that is not live is a no-op; in particular it never
    /// enqueues the id a second time.
    pub fn destroy(&mut self, entity: Entity) {
        if self.live.remove(entity).is_some() {
            self.recycled.push_back(entity);
            debug!("destroyed {entity}");
        }
    }

    /// Check whether `entity` is currently live
    pub fn contains(&self, entity: Entity) -> bool {
        self.live.contains(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Check if no entities are live
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// The live entities as a dense slice (order not stable across destroys)
    pub fn entities(&self) -> &[Entity] {
        self.live.entities()
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_unique_ids() {
        let mut manager = EntityManager::new();

        let mut ids: Vec<Entity> = (0..200).map(|_| manager.create()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
        assert_eq!(manager.len(), 200);
    }

    #[test]
    fn test_validity_window() {
        let mut manager = EntityManager::new();

        let entity = manager.create();
        assert!(manager.contains(entity));

        manager.destroy(entity);
        assert!(!manager.contains(entity));
    }

    #[test]
    fn test_fifo_reuse() {
        let mut manager = EntityManager::new();

        let a = manager.create();
        let b = manager.create();
        manager.destroy(a);
        manager.destroy(b);

        // Destroyed ids come back in destruction order, before any new id
        assert_eq!(manager.create(), a);
        assert_eq!(manager.create(), b);
        let fresh = manager.create();
        assert_ne!(fresh, a);
        assert_ne!(fresh, b);
    }

    #[test]
    fn test_destroy_idempotent() {
        let mut manager = EntityManager::new();

        let a = manager.create();
        let _b = manager.create();
        manager.destroy(a);
        manager.destroy(a);

        // A double destroy must not enqueue the id twice
        let first = manager.create();
        let second = manager.create();
        assert_eq!(first, a);
        assert_ne!(second, a);
    }

    #[test]
    fn test_destroy_never_created() {
        let mut manager = EntityManager::new();
        manager.destroy(Entity::from_raw(42));
        assert!(manager.is_empty());

        // The bogus id must not enter the reuse queue
        assert_eq!(manager.create().raw(), 0);
    }

    #[test]
    fn test_entities_slice() {
        let mut manager = EntityManager::new();
        let a = manager.create();
        let b = manager.create();
        let c = manager.create();
        manager.destroy(b);

        let live = manager.entities();
        assert_eq!(live.len(), 2);
        assert!(live.contains(&a));
        assert!(live.contains(&c));
    }

    #[test]
    fn test_invalid_sentinel_not_issued() {
        let mut manager = EntityManager::new();
        for _ in 0..1000 {
            assert_ne!(manager.create(), Entity::INVALID);
        }
    }
}
