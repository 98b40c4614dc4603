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
//! Basic example demonstrating the registry
//!
//! Creates a handful of named, moving entities, runs the two systems, and
//! shows the destroy cascade. Run with `RUST_LOG=debug` to watch the
//! registry's own logging.

use sparse_ecs::ecs::{Component, ComponentSet, Entity, Registry, System};

#[derive(Debug)]
struct Name(String);
impl Component for Name {}

#[derive(Debug, Clone, Copy)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {}

#[derive(Debug, Clone, Copy)]
struct Velocity {
    dx: f32,
    dy: f32,
}
impl Component for Velocity {}

/// Applies each member's velocity to its position
struct Movement;

impl System for Movement {
    fn required_components(&self) -> ComponentSet {
        ComponentSet::new().with::<Position>().with::<Velocity>()
    }

    fn update(&mut self, registry: &mut Registry, entities: &[Entity], delta_time: f32) {
        for &entity in entities {
            let velocity = *registry.get_component::<Velocity>(entity).unwrap();
            let position = registry.get_component_mut::<Position>(entity).unwrap();
            position.x += velocity.dx * delta_time;
            position.y += velocity.dy * delta_time;
        }
    }
}

/// Prints every named entity and, where present, its position
struct Announcer;

impl System for Announcer {
    fn required_components(&self) -> ComponentSet {
        ComponentSet::new().with::<Name>()
    }

    fn update(&mut self, registry: &mut Registry, entities: &[Entity], _delta_time: f32) {
        for &entity in entities {
            let name = registry.get_component::<Name>(entity).unwrap();
            if registry.has_component::<Position>(entity) {
                let position = registry.get_component::<Position>(entity).unwrap();
                println!("  {entity} \"{}\" at ({:.1}, {:.1})", name.0, position.x, position.y);
            } else {
                println!("  {entity} \"{}\"", name.0);
            }
        }
    }
}

fn main() {
    env_logger::init();

    println!("sparse-ecs - Basic Registry Example");
    println!("===================================\n");

    let mut registry = Registry::new();
    registry.register_system(Movement);
    registry.register_system(Announcer);

    let scout = registry.create_entity();
    registry.add_component(scout, Name("scout".into())).unwrap();
    registry.add_component(scout, Position { x: 0.0, y: 0.0 }).unwrap();
    registry.add_component(scout, Velocity { dx: 3.0, dy: 1.0 }).unwrap();

    let tower = registry.create_entity();
    registry.add_component(tower, Name("tower".into())).unwrap();
    registry.add_component(tower, Position { x: 10.0, y: 10.0 }).unwrap();

    println!("Created {} entities:", registry.entity_count());
    registry.update_system::<Announcer>(0.0).unwrap();

    println!("\nAdvancing one second of movement...");
    registry.update_system::<Movement>(1.0).unwrap();
    registry.update_system::<Announcer>(0.0).unwrap();

    println!("\nDestroying the scout...");
    registry.destroy_entity(scout);
    registry.update_system::<Announcer>(0.0).unwrap();

    println!("\n{} entity remains.", registry.entity_count());
}
