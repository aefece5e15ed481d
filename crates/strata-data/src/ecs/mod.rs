// Copyright 2025 eraflo
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

//! Component storage for a single scene.
//!
//! Each scene owns one [`ComponentStorage`], a type-erased map holding one
//! [`SparseSet`] per component type, and one [`EntityStore`] that hands out
//! generational slots. Neither type knows about UUIDs or hierarchy; that is the
//! job of [`Scene`](crate::scene::Scene).
//!
//! The [`ComponentRegistry`] is the runtime capability table listing every
//! component type the engine knows how to copy. Prefab capture and
//! instantiation iterate it instead of hard-coding a type list.

mod component;
pub mod components;
mod entity_store;
mod registry;
mod storage;

pub use component::Component;
pub use components::*;
pub use entity_store::EntityStore;
pub use registry::*;
pub use storage::{ComponentStorage, SparseSet};
