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
//! System registration and membership maintenance
//!
//! A system is a plain value: user state plus a declared set of required
//! component types and an update entrypoint. The manager keeps one record
//! per registered system holding that metadata and a membership sparse set
//! of the entities that currently satisfy the requirement conjunction.
//! Membership is recomputed eagerly on every component mutation, so reads
//! never observe a stale eligible-entity set.

use crate::ecs::component::{ComponentManager, ComponentSet};
use crate::ecs::{EcsError, Entity, Registry, SparseSet};
use log::{debug, trace};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// User-defined behavior operating on entities that hold a required set of
/// component types.
///
/// Implementations are plain values owned by the registry; they gain no
/// iteration machinery by inheritance. The registry hands `update` a
/// snapshot of the current membership, taken before user code runs, so the
/// callback may freely mutate components or destroy entities while
/// iterating (see `Registry::update_system`).
pub trait System: 'static {
    /// The component types an entity must hold, all at once, to be handed
    /// to [`System::update`]. Captured once at registration time.
    fn required_components(&self) -> ComponentSet;

    /// Run this system's behavior over the eligible entities.
    ///
    /// `entities` is the membership snapshot; `delta_time` is the elapsed
    /// time the caller chose to advance by. The registry imposes no
    /// ordering between systems beyond what callers request.
    fn update(&mut self, registry: &mut Registry, entities: &[Entity], delta_time: f32);

    /// Name of this system for logs and debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Per-system bookkeeping: the boxed user value, its requirement list, and
/// the membership set of currently-eligible entities.
struct SystemRecord {
    /// `None` only while the system is detached inside its own update call
    system: Option<Box<dyn Any>>,
    name: &'static str,
    required: ComponentSet,
    entities: SparseSet<()>,
}

/// Owns one [`SystemRecord`] per registered system, keyed by system type.
pub(crate) struct SystemManager {
    records: HashMap<TypeId, SystemRecord>,
}

impl SystemManager {
    pub(crate) fn new() -> Self {
        SystemManager {
            records: HashMap::new(),
        }
    }

    /// Register a system, capturing its requirement list and creating its
    /// membership set. Idempotent by system type: a second registration
    /// keeps the original instance and drops the new one.
    ///
    /// Every required component type is registered with `components` first,
    /// so pools always exist before any membership query can run.
    pub(crate) fn register<S: System>(
        &mut self,
        system: S,
        components: &mut ComponentManager,
    ) -> &mut S {
        let type_id = TypeId::of::<S>();
        if !self.records.contains_key(&type_id) {
            let required = system.required_components();
            for info in required.iter() {
                components.register_info(info);
            }
            debug!("registered system {}", system.name());
            self.records.insert(
                type_id,
                SystemRecord {
                    system: Some(Box::new(system)),
                    name: std::any::type_name::<S>(),
                    required,
                    entities: SparseSet::new(),
                },
            );
        }

        self.records
            .get_mut(&type_id)
            .and_then(|record| record.system.as_mut())
            .and_then(|system| system.downcast_mut())
            .expect("system instance is detached during its own update")
    }

    /// Borrow a registered system
    pub(crate) fn get<S: System>(&self) -> Result<&S, EcsError> {
        self.records
            .get(&TypeId::of::<S>())
            .and_then(|record| record.system.as_ref())
            .and_then(|system| system.downcast_ref())
            .ok_or(EcsError::UnknownSystem(std::any::type_name::<S>()))
    }

    /// Mutably borrow a registered system
    pub(crate) fn get_mut<S: System>(&mut self) -> Result<&mut S, EcsError> {
        self.records
            .get_mut(&TypeId::of::<S>())
            .and_then(|record| record.system.as_mut())
            .and_then(|system| system.downcast_mut())
            .ok_or(EcsError::UnknownSystem(std::any::type_name::<S>()))
    }

    /// Check whether system `S` is registered
    pub(crate) fn contains<S: System>(&self) -> bool {
        self.records.contains_key(&TypeId::of::<S>())
    }

    /// The membership of system `S` as a dense slice
    pub(crate) fn entities_of<S: System>(&self) -> Result<&[Entity], EcsError> {
        self.records
            .get(&TypeId::of::<S>())
            .map(|record| record.entities.entities())
            .ok_or(EcsError::UnknownSystem(std::any::type_name::<S>()))
    }

    /// Recompute `entity`'s membership in every system after a component
    /// mutation: present iff it holds every required component type. Both
    /// the insert and the removal are idempotent.
    pub(crate) fn update_entity(&mut self, entity: Entity, components: &ComponentManager) {
        for record in self.records.values_mut() {
            let eligible = record
                .required
                .iter()
                .all(|info| components.contains_type(info.type_id(), entity));

            if eligible {
                if !record.entities.contains(entity) {
                    record.entities.insert(entity, ());
                    trace!("{entity} joined {}", record.name);
                }
            } else if record.entities.remove(entity).is_some() {
                trace!("{entity} left {}", record.name);
            }
        }
    }

    /// Drop `entity` from every membership set unconditionally. Cheaper
    /// than re-evaluating the conjunction, and correct: a destroyed entity
    /// holds no components.
    pub(crate) fn destroy_entity(&mut self, entity: Entity) {
        for record in self.records.values_mut() {
            record.entities.remove(entity);
        }
    }

    /// Detach system `S` for an update call, returning the boxed instance
    /// together with a snapshot of its current membership.
    ///
    /// While detached, `get`/`get_mut`/`take` for the same system report
    /// [`EcsError::UnknownSystem`]; re-entrant updates are refused rather
    /// than aliased.
    pub(crate) fn take<S: System>(&mut self) -> Result<(Box<S>, Vec<Entity>), EcsError> {
        let name = std::any::type_name::<S>();
        let record = self
            .records
            .get_mut(&TypeId::of::<S>())
            .ok_or(EcsError::UnknownSystem(name))?;
        let system = record
            .system
            .take()
            .ok_or(EcsError::UnknownSystem(name))?
            .downcast::<S>()
            .expect("system record keyed by its own TypeId");
        let snapshot = record.entities.entities().to_vec();
        Ok((system, snapshot))
    }

    /// Reattach a system detached by [`SystemManager::take`]
    pub(crate) fn restore<S: System>(&mut self, system: Box<S>) {
        if let Some(record) = self.records.get_mut(&TypeId::of::<S>()) {
            record.system = Some(system);
        }
    }
}
