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

//! The engine's component set.
//!
//! `IdComponent`, `TagComponent`, `TransformComponent` and
//! `RelationshipComponent` are attached to every entity created through
//! [`Scene::create_entity`](crate::scene::Scene::create_entity). Everything
//! else is optional.

mod audio;
mod camera;
mod id;
mod light;
mod mesh;
mod physics;
mod prefab;
mod relationship;
mod script;
mod tag;
mod transform;

pub use audio::*;
pub use camera::*;
pub use id::*;
pub use light::*;
pub use mesh::*;
pub use physics::*;
pub use prefab::*;
pub use relationship::*;
pub use script::*;
pub use tag::*;
pub use transform::*;

use strata_core::asset::AssetUUID;

use crate::ecs::registry::{AssetReferences, ComponentRegistry, ComponentRole};

impl AssetReferences for MeshComponent {
    fn asset_references(&self) -> Vec<AssetUUID> {
        std::iter::once(self.mesh)
            .chain(self.materials.assets.iter().copied())
            .filter(|id| !id.is_nil())
            .collect()
    }
}

impl AssetReferences for AudioComponent {
    fn asset_references(&self) -> Vec<AssetUUID> {
        if self.sound.is_nil() {
            Vec::new()
        } else {
            vec![self.sound]
        }
    }
}

impl AssetReferences for PrefabComponent {
    fn asset_references(&self) -> Vec<AssetUUID> {
        if self.asset_id.is_nil() {
            Vec::new()
        } else {
            vec![self.asset_id]
        }
    }
}

/// Registers every engine component with `registry`.
///
/// Adding a component type to the engine means adding one line here; prefab
/// capture and instantiation pick it up from the registry.
pub fn register_engine_components(registry: &mut ComponentRegistry) {
    registry.register::<IdComponent>(ComponentRole::Identity);
    registry.register::<RelationshipComponent>(ComponentRole::Hierarchy);

    registry.register::<TagComponent>(ComponentRole::Data);
    registry.register::<TransformComponent>(ComponentRole::Data);
    registry.register_with_assets::<MeshComponent>(ComponentRole::Data);
    registry.register::<CameraComponent>(ComponentRole::Data);
    registry.register::<DirectionalLightComponent>(ComponentRole::Data);
    registry.register::<PointLightComponent>(ComponentRole::Data);
    registry.register::<SkylightComponent>(ComponentRole::Data);
    registry.register::<RigidbodyComponent>(ComponentRole::Data);
    registry.register::<BoxColliderComponent>(ComponentRole::Data);
    registry.register::<SphereColliderComponent>(ComponentRole::Data);
    registry.register::<CapsuleColliderComponent>(ComponentRole::Data);
    registry.register::<PhysicsMaterialComponent>(ComponentRole::Data);
    registry.register_with_assets::<AudioComponent>(ComponentRole::Data);
    registry.register::<ScriptComponent>(ComponentRole::Data);
    registry.register_with_assets::<PrefabComponent>(ComponentRole::Data);
}
