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
//! # sparse-ecs
//!
//! A sparse-set based Entity-Component-System runtime registry.
//!
//! ## Features
//!
//! - **Opaque entity handles** with FIFO id recycling, bounding id-space
//!   growth under create/destroy churn
//! - **Sparse-set storage** everywhere: dense, hole-free payload arrays with
//!   O(1) insert, swap-remove, and lookup
//! - **Type-keyed component pools** dispatched through a narrow type-erased
//!   interface rather than a closed type hierarchy
//! - **Eager system membership**: every component mutation synchronously
//!   recomputes which systems an entity is eligible for
//!
//! The registry is single-threaded and fully synchronous; see
//! [`ecs::Registry`] for the facade and its sequencing guarantees.
//!
//! ## Example
//!
//! ```rust
//! use sparse_ecs::ecs::{Component, Registry};
//!
//! struct Label(String);
//! impl Component for Label {}
//!
//! let mut registry = Registry::new();
//! registry.register_component::<Label>();
//!
//! let entity = registry.create_entity();
//! registry.add_component(entity, Label("player".into())).unwrap();
//! assert!(registry.has_component::<Label>(entity));
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

pub use ecs::{Entity, Registry};
