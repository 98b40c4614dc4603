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
//! Entity Component System (ECS) core implementation
//!
//! This module provides the registry's building blocks:
//! - Entity identity management with FIFO id recycling
//! - Sparse-set component storage with dense, cache-friendly payloads
//! - Per-system membership sets kept eagerly in sync with component state
//! - The [`Registry`] facade tying the three together

mod component;
mod entity;
mod error;
mod registry;
mod sparse;
mod system;

pub use component::{Component, ComponentSet};
pub use entity::{Entity, EntityManager};
pub use error::EcsError;
pub use registry::Registry;
pub use sparse::SparseSet;
pub use system::System;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = Registry::new();
        assert_eq!(registry.entity_count(), 0);
    }

    #[test]
    fn test_entity_creation() {
        let mut registry = Registry::new();
        let entity = registry.create_entity();
        assert_eq!(registry.entity_count(), 1);
        assert!(registry.validate_entity(entity));
    }
}
