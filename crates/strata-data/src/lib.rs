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

//! # Strata Data
//!
//! The scene graph proper: per-scene component storage, entity handles and
//! views, the engine's component set, prefabs, and the text serializers that
//! persist scenes and prefab assets.
//!
//! Every operation is synchronous and single-threaded. There is no global
//! "active scene": functions that create entities take the target [`Scene`]
//! explicitly.
//!
//! [`Scene`]: scene::Scene

#![warn(missing_docs)]

pub mod ecs;
pub mod prefab;
pub mod scene;
pub mod serialization;

pub use prefab::Prefab;
pub use scene::{
    Entity, EntityMut, EntityRef, HierarchyError, LinkReport, OwnedEntity, Scene, SceneEvent,
    SceneId,
};
pub use serialization::{
    LoadReport, PrefabSerializer, SceneSerializer, SerializationError, SerializerConfig,
};
