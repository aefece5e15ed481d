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

use serde::{Deserialize, Serialize};
use strata_core::ecs::entity::EntityUuid;

use crate::ecs::{
    AudioComponent, Component, BoxColliderComponent, CameraComponent, CapsuleColliderComponent,
    DirectionalLightComponent, MeshComponent, PhysicsMaterialComponent, PointLightComponent,
    PrefabComponent, RelationshipComponent, RigidbodyComponent, ScriptComponent,
    SkylightComponent, SphereColliderComponent, TransformComponent,
};
use crate::scene::{Entity, EntityRef, Scene};

/// The persisted form of one entity.
///
/// `entity`, `tag`, `transform` and `relationship` are always written. Each
/// optional block is written only when the entity has that component, in the
/// field order below. Unknown keys are ignored when reading and missing blocks
/// are simply absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRecord {
    /// The entity's UUID.
    pub entity: EntityUuid,
    /// The entity's name.
    pub tag: String,
    /// Local transform; rotation in Euler degrees.
    pub transform: TransformComponent,
    /// Parent and ordered children, as UUIDs.
    pub relationship: RelationshipComponent,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub mesh: Option<MeshComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub camera: Option<CameraComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub directional_light: Option<DirectionalLightComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub point_light: Option<PointLightComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub skylight: Option<SkylightComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub rigidbody: Option<RigidbodyComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub box_collider: Option<BoxColliderComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub sphere_collider: Option<SphereColliderComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub capsule_collider: Option<CapsuleColliderComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub physics_material: Option<PhysicsMaterialComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub audio: Option<AudioComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub script: Option<ScriptComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub prefab: Option<PrefabComponent>,
}

impl EntityRecord {
    /// Builds the record of a live entity. Bare slots without an identity
    /// have no record.
    pub fn capture(view: EntityRef<'_>) -> Option<Self> {
        let entity = view.uuid();
        if entity.is_nil() {
            return None;
        }
        Some(Self {
            entity,
            tag: view.tag().to_owned(),
            transform: view.transform().copied().unwrap_or_default(),
            relationship: view.get::<RelationshipComponent>().cloned().unwrap_or_default(),
            mesh: view.get::<MeshComponent>().cloned(),
            camera: view.get::<CameraComponent>().copied(),
            directional_light: view.get::<DirectionalLightComponent>().copied(),
            point_light: view.get::<PointLightComponent>().copied(),
            skylight: view.get::<SkylightComponent>().copied(),
            rigidbody: view.get::<RigidbodyComponent>().copied(),
            box_collider: view.get::<BoxColliderComponent>().copied(),
            sphere_collider: view.get::<SphereColliderComponent>().copied(),
            capsule_collider: view.get::<CapsuleColliderComponent>().copied(),
            physics_material: view.get::<PhysicsMaterialComponent>().copied(),
            audio: view.get::<AudioComponent>().copied(),
            script: view.get::<ScriptComponent>().cloned(),
            prefab: view.get::<PrefabComponent>().copied(),
        })
    }

    /// Creates the entity described by this record in `scene`.
    ///
    /// The recorded UUID is kept; a record without one gets a fresh UUID.
    /// Relationship UUIDs are stored verbatim and never resolved here.
    pub fn spawn(self, scene: &mut Scene) -> Entity {
        let uuid = if self.entity.is_nil() {
            let fresh = EntityUuid::new();
            log::warn!("Record '{}' has no entity UUID; assigned {fresh}.", self.tag);
            fresh
        } else {
            self.entity
        };

        let entity = scene.create_entity_with_uuid(uuid, &self.tag);
        scene.insert_component(entity, self.transform);
        scene.insert_component(entity, self.relationship);

        optional(scene, entity, self.mesh);
        optional(scene, entity, self.camera);
        optional(scene, entity, self.directional_light);
        optional(scene, entity, self.point_light);
        optional(scene, entity, self.skylight);
        optional(scene, entity, self.rigidbody);
        optional(scene, entity, self.box_collider);
        optional(scene, entity, self.sphere_collider);
        optional(scene, entity, self.capsule_collider);
        optional(scene, entity, self.physics_material);
        optional(scene, entity, self.audio);
        optional(scene, entity, self.script);
        optional(scene, entity, self.prefab);
        entity
    }
}

fn optional<T: Component>(scene: &mut Scene, entity: Entity, value: Option<T>) {
    if let Some(value) = value {
        scene.insert_component(entity, value);
    }
}

/// Records for every entity of `scene` with an identity, in slot order.
pub(super) fn capture_all(scene: &Scene) -> Vec<EntityRecord> {
    let mut records = Vec::with_capacity(scene.len());
    scene.each(|view| {
        if let Some(record) = EntityRecord::capture(view) {
            records.push(record);
        } else {
            log::trace!("Skipping bare slot {:?} while serializing.", view.entity());
        }
    });
    records
}
