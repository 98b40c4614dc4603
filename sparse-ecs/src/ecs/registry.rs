//! The registry facade
//!
//! [`Registry`] composes the entity manager, the component pools, and the
//! system records into the single externally-owned object callers interact
//! with. It is the one place that sequences cross-cutting effects: every
//! component mutation is followed, synchronously, by a membership
//! recomputation for the touched entity, and entity destruction cascades
//! through systems, then components, then the identity pool, in that fixed
//! order.
//!
//! The registry is single-threaded by design. No operation blocks or
//! yields, there is no internal sharing or locking, and callers observe a
//! fully consistent registry at every call boundary.

use crate::ecs::component::ComponentManager;
use crate::ecs::system::SystemManager;
use crate::ecs::{Component, EcsError, Entity, EntityManager, System};
use log::debug;

/// The central ECS registry: entity identities, component storage, and
/// system membership behind one facade.
///
/// # Example
///
/// ```
/// use sparse_ecs::ecs::{ComponentSet, Entity, Registry, System};
///
/// struct Hitpoints(u32);
/// impl sparse_ecs::ecs::Component for Hitpoints {}
///
/// struct Decay;
/// impl System for Decay {
///     fn required_components(&self) -> ComponentSet {
///         ComponentSet::new().with::<Hitpoints>()
///     }
///
///     fn update(&mut self, registry: &mut Registry, entities: &[Entity], _delta_time: f32) {
///         for &entity in entities {
///             if let Ok(hp) = registry.get_component_mut::<Hitpoints>(entity) {
///                 hp.0 = hp.0.saturating_sub(1);
///             }
///         }
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.register_system(Decay);
///
/// let entity = registry.create_entity();
/// registry.add_component(entity, Hitpoints(3)).unwrap();
/// registry.update_system::<Decay>(0.016).unwrap();
/// assert_eq!(registry.get_component::<Hitpoints>(entity).unwrap().0, 2);
/// ```
pub struct Registry {
    entities: EntityManager,
    components: ComponentManager,
    systems: SystemManager,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Registry {
            entities: EntityManager::new(),
            components: ComponentManager::new(),
            systems: SystemManager::new(),
        }
    }

    // --- entity lifecycle ---

    /// Create a new entity, reusing the least-recently-destroyed id first
    ///
    /// # Panics
    ///
    /// Panics if the entity id space is exhausted (see
    /// [`EntityManager::create`]).
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Destroy an entity, cascading through system membership, then
    /// component storage, then the identity pool.
    ///
    /// The order matters: systems never observe a membership entry for an
    /// entity whose components are already gone. Destroying an invalid
    /// entity is a no-op.
    pub fn destroy_entity(&mut self, entity: Entity) {
        self.systems.destroy_entity(entity);
        self.components.destroy_entity(entity);
        self.entities.destroy(entity);
    }

    /// Check whether `entity` is currently live
    pub fn validate_entity(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // --- component lifecycle ---

    /// Create the storage pool for component type `T`. Idempotent.
    pub fn register_component<T: Component>(&mut self) {
        self.components.register::<T>();
    }

    /// Attach a component to `entity`, overwriting in place if one is
    /// already attached, and return a reference to the stored payload.
    ///
    /// Requires `T` to be registered. Membership of `entity` in every
    /// system is recomputed before this returns.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        component: T,
    ) -> Result<&mut T, EcsError> {
        self.components.insert(entity, component)?;
        self.systems.update_entity(entity, &self.components);
        // Re-borrow after membership maintenance; the payload was stored above
        self.components.get_mut(entity)
    }

    /// Detach the `T` component from `entity`, then recompute its system
    /// membership. Detaching an absent component is a no-op.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.components.remove::<T>(entity)?;
        self.systems.update_entity(entity, &self.components);
        Ok(())
    }

    /// Borrow the `T` component of `entity`
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.components.get(entity)
    }

    /// Mutably borrow the `T` component of `entity`
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.components.get_mut(entity)
    }

    /// Check whether `entity` holds a `T` component. Total: an unregistered
    /// type simply answers false.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.components.has::<T>(entity)
    }

    // --- system lifecycle ---

    /// Register a system and return a reference to the stored instance.
    ///
    /// Idempotent by system type: registering `S` twice keeps the first
    /// instance. Every component type in the system's requirement list is
    /// registered as a side effect, so a system can never query a pool that
    /// does not exist.
    pub fn register_system<S: System>(&mut self, system: S) -> &mut S {
        self.systems.register(system, &mut self.components)
    }

    /// Borrow a registered system
    pub fn get_system<S: System>(&self) -> Result<&S, EcsError> {
        self.systems.get::<S>()
    }

    /// Mutably borrow a registered system
    pub fn get_system_mut<S: System>(&mut self) -> Result<&mut S, EcsError> {
        self.systems.get_mut::<S>()
    }

    /// Check whether system `S` is registered
    pub fn has_system<S: System>(&self) -> bool {
        self.systems.contains::<S>()
    }

    /// The entities currently eligible for system `S`, as a dense slice
    pub fn system_entities<S: System>(&self) -> Result<&[Entity], EcsError> {
        self.systems.entities_of::<S>()
    }

    /// Invoke system `S` over its current membership.
    ///
    /// The membership is snapshotted before user code runs, so the callback
    /// may add or remove components, or destroy entities, without
    /// invalidating the slice it is iterating. Entities destroyed by the
    /// callback still appear in the remainder of the snapshot; mutating
    /// callbacks should re-check with [`Registry::validate_entity`] or
    /// [`Registry::has_component`].
    ///
    /// While the update runs the system instance is detached from the
    /// registry, so a re-entrant `update_system::<S>` (or `get_system::<S>`)
    /// for the same system reports [`EcsError::UnknownSystem`] instead of
    /// aliasing it.
    pub fn update_system<S: System>(&mut self, delta_time: f32) -> Result<(), EcsError> {
        let (mut system, snapshot) = self.systems.take::<S>()?;
        debug!(
            "updating system {} over {} entities",
            system.name(),
            snapshot.len()
        );
        system.update(self, &snapshot, delta_time);
        self.systems.restore(system);
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
