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
//! Edge cases: idempotence, lookup misses, and mutation during iteration

use sparse_ecs::ecs::{Component, ComponentSet, EcsError, Entity, Registry, System};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Marker(u32);
impl Component for Marker {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tag;
impl Component for Tag {}

struct Sweeper {
    destroyed: u32,
}

impl System for Sweeper {
    fn required_components(&self) -> ComponentSet {
        ComponentSet::new().with::<Marker>()
    }

    fn update(&mut self, registry: &mut Registry, entities: &[Entity], _delta_time: f32) {
        // Destroy while iterating; the snapshot keeps the slice valid, so
        // later entries must be re-validated before use
        for &entity in entities {
            if registry.validate_entity(entity) {
                registry.destroy_entity(entity);
                self.destroyed += 1;
            }
        }
    }
}

struct Detacher;

impl System for Detacher {
    fn required_components(&self) -> ComponentSet {
        ComponentSet::new().with::<Marker>()
    }

    fn update(&mut self, registry: &mut Registry, entities: &[Entity], _delta_time: f32) {
        // Removing the required component mid-iteration must not disturb
        // the snapshot being walked
        for &entity in entities {
            registry.remove_component::<Marker>(entity).unwrap();
        }
    }
}

#[test]
fn test_register_component_twice_keeps_data() {
    let mut registry = Registry::new();
    registry.register_component::<Marker>();

    let e = registry.create_entity();
    registry.add_component(e, Marker(7)).unwrap();

    registry.register_component::<Marker>();
    assert_eq!(registry.get_component::<Marker>(e), Ok(&Marker(7)));
}

#[test]
fn test_unregistered_component_lookups() {
    let mut registry = Registry::new();
    let e = registry.create_entity();

    // Total queries answer false; lookups fail
    assert!(!registry.has_component::<Marker>(e));
    assert!(matches!(
        registry.get_component::<Marker>(e),
        Err(EcsError::UnregisteredComponent(_))
    ));
    assert!(matches!(
        registry.add_component(e, Marker(1)),
        Err(EcsError::UnregisteredComponent(_))
    ));
    assert!(matches!(
        registry.remove_component::<Marker>(e),
        Err(EcsError::UnregisteredComponent(_))
    ));
}

#[test]
fn test_remove_component_twice() {
    let mut registry = Registry::new();
    registry.register_component::<Marker>();

    let e = registry.create_entity();
    registry.add_component(e, Marker(1)).unwrap();
    registry.remove_component::<Marker>(e).unwrap();
    // Second removal is a no-op, not an error
    registry.remove_component::<Marker>(e).unwrap();
}

#[test]
fn test_get_system_before_registration() {
    let registry = Registry::new();
    assert!(!registry.has_system::<Sweeper>());
    assert!(matches!(
        registry.get_system::<Sweeper>(),
        Err(EcsError::UnknownSystem(_))
    ));
    assert!(matches!(
        registry.system_entities::<Sweeper>(),
        Err(EcsError::UnknownSystem(_))
    ));
}

#[test]
fn test_destroy_during_update_is_safe() {
    let mut registry = Registry::new();
    registry.register_system(Sweeper { destroyed: 0 });

    for i in 0..25 {
        let e = registry.create_entity();
        registry.add_component(e, Marker(i)).unwrap();
    }

    registry.update_system::<Sweeper>(0.0).unwrap();

    assert_eq!(registry.get_system::<Sweeper>().unwrap().destroyed, 25);
    assert_eq!(registry.entity_count(), 0);
    assert!(registry.system_entities::<Sweeper>().unwrap().is_empty());
}

#[test]
fn test_remove_required_component_during_update() {
    let mut registry = Registry::new();
    registry.register_system(Detacher);

    let mut entities = Vec::new();
    for i in 0..10 {
        let e = registry.create_entity();
        registry.add_component(e, Marker(i)).unwrap();
        entities.push(e);
    }

    registry.update_system::<Detacher>(0.0).unwrap();

    // Every entity lost its component and its membership, but stays live
    assert!(registry.system_entities::<Detacher>().unwrap().is_empty());
    for e in entities {
        assert!(registry.validate_entity(e));
        assert!(!registry.has_component::<Marker>(e));
    }
}

#[test]
fn test_component_mutation_on_unrelated_entity() {
    let mut registry = Registry::new();
    registry.register_component::<Marker>();
    registry.register_component::<Tag>();

    let a = registry.create_entity();
    let b = registry.create_entity();
    registry.add_component(a, Marker(1)).unwrap();
    registry.add_component(b, Tag).unwrap();

    registry.destroy_entity(b);

    assert_eq!(registry.get_component::<Marker>(a), Ok(&Marker(1)));
    assert!(!registry.has_component::<Tag>(b));
}

#[test]
fn test_recycled_id_starts_clean() {
    let mut registry = Registry::new();
    registry.register_component::<Marker>();

    let a = registry.create_entity();
    registry.add_component(a, Marker(42)).unwrap();
    registry.destroy_entity(a);

    // The recycled handle must not resurrect the old component
    let reborn = registry.create_entity();
    assert_eq!(reborn, a);
    assert!(!registry.has_component::<Marker>(reborn));
}
