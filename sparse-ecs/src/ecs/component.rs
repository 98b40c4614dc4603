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
//! Component storage and type-keyed dispatch
//!
//! Each registered component type gets its own [`SparseSet`] pool, stored
//! behind a `TypeId`-keyed table of type-erased handles. The erased surface
//! is deliberately narrow: cross-type broadcasts (entity destruction,
//! membership checks) only ever need "remove if present" and "contains",
//! so that is all [`ErasedPool`] exposes.

use crate::ecs::{EcsError, Entity, SparseSet};
use log::debug;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Marker trait for component payloads
///
/// Components should be plain data; behavior belongs in systems.
pub trait Component: 'static {}

/// The capability surface a component pool exposes once its payload type is
/// erased. Kept minimal on purpose: anything type-specific goes through a
/// downcast instead.
pub(crate) trait ErasedPool {
    /// Remove the entity's payload if present; no-op otherwise
    fn remove_entity(&mut self, entity: Entity);

    /// Check whether the entity has a payload in this pool
    fn contains_entity(&self, entity: Entity) -> bool;

    /// Upcast for downcasting back to the concrete `SparseSet<T>`
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting back to the concrete `SparseSet<T>`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedPool for SparseSet<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn contains_entity(&self, entity: Entity) -> bool {
        self.contains(entity)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn new_pool<T: Component>() -> Box<dyn ErasedPool> {
    Box::new(SparseSet::<T>::new())
}

/// Metadata describing one component type: its identity, display name, and
/// how to build an empty pool for it without knowing the type at the call
/// site.
#[derive(Clone, Copy)]
pub(crate) struct ComponentInfo {
    type_id: TypeId,
    name: &'static str,
    new_pool: fn() -> Box<dyn ErasedPool>,
}

impl ComponentInfo {
    pub(crate) fn of<T: Component>() -> Self {
        ComponentInfo {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            new_pool: new_pool::<T>,
        }
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }
}

/// An ordered, duplicate-free list of component types.
///
/// Systems declare their requirements with one of these. First-occurrence
/// order is preserved and later duplicates are dropped, so the set also
/// fixes the order in which pools get created; beyond pool existence that
/// order has no runtime effect.
#[derive(Clone, Default)]
pub struct ComponentSet {
    entries: Vec<ComponentInfo>,
}

impl ComponentSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add component type `T`, keeping the set duplicate-free
    pub fn with<T: Component>(mut self) -> Self {
        if !self.contains::<T>() {
            self.entries.push(ComponentInfo::of::<T>());
        }
        self
    }

    /// Check whether `T` is in the set
    pub fn contains<T: Component>(&self) -> bool {
        self.contains_id(TypeId::of::<T>())
    }

    /// Number of distinct component types in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn contains_id(&self, type_id: TypeId) -> bool {
        self.entries.iter().any(|info| info.type_id == type_id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ComponentInfo> {
        self.entries.iter()
    }
}

/// Owns one pool per registered component type and routes typed operations
/// to the right pool. Cross-cutting effects (membership recomputation) are
/// sequenced by the registry facade, not here.
pub(crate) struct ComponentManager {
    pools: HashMap<TypeId, Box<dyn ErasedPool>>,
}

impl ComponentManager {
    pub(crate) fn new() -> Self {
        ComponentManager {
            pools: HashMap::new(),
        }
    }

    /// Register `T`, creating its pool if none exists. Idempotent.
    pub(crate) fn register<T: Component>(&mut self) {
        self.register_info(&ComponentInfo::of::<T>());
    }

    /// Register a component type from erased metadata; used when a system's
    /// requirement list drives registration. Idempotent.
    pub(crate) fn register_info(&mut self, info: &ComponentInfo) {
        if !self.pools.contains_key(&info.type_id()) {
            self.pools.insert(info.type_id(), (info.new_pool)());
            debug!("registered component type {}", info.name());
        }
    }

    /// Attach (or overwrite in place) a component for `entity`.
    ///
    /// Fails if `T` has no registered pool; the registry is unchanged in
    /// that case.
    pub(crate) fn insert<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<&mut T, EcsError> {
        Ok(self.pool_mut::<T>()?.insert(entity, component))
    }

    /// Detach the `T` component from `entity`. Absence is a no-op, but an
    /// unregistered type is still a lookup miss.
    pub(crate) fn remove<T: Component>(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.pool_mut::<T>()?.remove(entity);
        Ok(())
    }

    /// Borrow the `T` component of `entity`
    pub(crate) fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.pool::<T>()?
            .get(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: std::any::type_name::<T>(),
            })
    }

    /// Mutably borrow the `T` component of `entity`
    pub(crate) fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.pool_mut::<T>()?
            .get_mut(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: std::any::type_name::<T>(),
            })
    }

    /// Check whether `entity` holds a `T`; false, not an error, when `T`
    /// was never registered
    pub(crate) fn has<T: Component>(&self, entity: Entity) -> bool {
        self.contains_type(TypeId::of::<T>(), entity)
    }

    /// Erased presence check, used by system membership recomputation
    pub(crate) fn contains_type(&self, type_id: TypeId, entity: Entity) -> bool {
        self.pools
            .get(&type_id)
            .is_some_and(|pool| pool.contains_entity(entity))
    }

    /// Broadcast entity destruction across every pool, whether or not the
    /// entity held that component
    pub(crate) fn destroy_entity(&mut self, entity: Entity) {
        for pool in self.pools.values_mut() {
            pool.remove_entity(entity);
        }
    }

    fn pool<T: Component>(&self) -> Result<&SparseSet<T>, EcsError> {
        self.pools
            .get(&TypeId::of::<T>())
            .and_then(|pool| pool.as_any().downcast_ref())
            .ok_or(EcsError::UnregisteredComponent(std::any::type_name::<T>()))
    }

    fn pool_mut<T: Component>(&mut self) -> Result<&mut SparseSet<T>, EcsError> {
        self.pools
            .get_mut(&TypeId::of::<T>())
            .and_then(|pool| pool.as_any_mut().downcast_mut())
            .ok_or(EcsError::UnregisteredComponent(std::any::type_name::<T>()))
    }
}
