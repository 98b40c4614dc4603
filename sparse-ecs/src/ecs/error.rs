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
//! Registry error types
//!
//! Only lookup misses are recoverable errors. Idempotent no-ops (double
//! registration, removing something already absent) are not errors at all,
//! and entity id exhaustion is a panicking assertion rather than a variant
//! here. A failed call never leaves the registry partially mutated.

use crate::ecs::Entity;
use thiserror::Error;

/// Errors returned by registry lookup operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EcsError {
    /// A component type was used before `register_component` (or a system
    /// requiring it) registered its pool
    #[error("component type `{0}` is not registered")]
    UnregisteredComponent(&'static str),

    /// `get_component` on an entity that does not hold the component
    #[error("{entity} has no `{component}` component")]
    MissingComponent {
        /// The entity that was queried
        entity: Entity,
        /// Type name of the missing component
        component: &'static str,
    },

    /// `get_system` or `update_system` on a system that is not registered
    /// (or is currently detached inside its own update call)
    #[error("system `{0}` is not registered")]
    UnknownSystem(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EcsError::MissingComponent {
            entity: Entity::from_raw(3),
            component: "Position",
        };
        assert_eq!(err.to_string(), "Entity(3) has no `Position` component");

        let err = EcsError::UnregisteredComponent("Velocity");
        assert_eq!(err.to_string(), "component type `Velocity` is not registered");
    }
}
