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

use std::collections::HashSet;

use approx::assert_relative_eq;
use strata_core::asset::AssetUUID;
use strata_core::ecs::entity::EntityUuid;
use strata_core::math::Vec3;
use strata_data::ecs::{
    AudioComponent, BoxColliderComponent, CameraComponent, MeshComponent, PointLightComponent,
    PrefabComponent, RelationshipComponent, RigidbodyComponent, ScriptComponent, TagComponent,
    TransformComponent,
};
use strata_data::{Entity, Scene, SceneSerializer};

fn uuids(scene: &Scene) -> Vec<EntityUuid> {
    scene.iter_entities().filter_map(|e| scene.uuid_of(e)).collect()
}

/// A scene exercising every hierarchy shape and a spread of optional blocks.
fn build_level() -> (Scene, Entity) {
    let mut scene = Scene::new("Level 1");

    let world = scene.create_entity("World");
    let camera = scene.create_entity("Camera");
    let lamp = scene.create_entity("Lamp");
    let crate_a = scene.create_entity("Crate A");
    let crate_b = scene.create_entity("Crate B");
    let speaker = scene.create_entity("Speaker");

    for child in [camera, lamp, crate_a] {
        scene.reparent(child, Some(world)).unwrap();
    }
    scene.reparent(crate_b, Some(crate_a)).unwrap();
    scene.reparent(speaker, Some(crate_a)).unwrap();

    *scene.get_component_mut::<TransformComponent>(camera).unwrap() = TransformComponent {
        position: Vec3::new(0.1, 1.7, -5.3),
        rotation: Vec3::new(-12.5, 33.333, 0.0),
        scale: Vec3::ONE,
    };
    scene.add_component(camera, CameraComponent {
        fov: 62.5,
        ..Default::default()
    });
    scene.add_component(lamp, PointLightComponent {
        radiance: Vec3::new(1.0, 0.9, 0.7),
        intensity: 3.25,
        ..Default::default()
    });

    let mut mesh = MeshComponent::new(AssetUUID::from_u128(0x100));
    mesh.materials.set(1, AssetUUID::from_u128(0x200));
    scene.add_component(crate_a, mesh.clone());
    scene.add_component(crate_a, RigidbodyComponent {
        mass: 12.0,
        ..Default::default()
    });
    scene.add_component(crate_a, BoxColliderComponent::default());
    scene.add_component(crate_b, mesh);
    scene.add_component(crate_b, PrefabComponent {
        asset_id: AssetUUID::from_u128(0x300),
    });
    scene.add_component(speaker, AudioComponent {
        sound: AssetUUID::from_u128(0x400),
        volume: 0.35,
        looping: true,
    });
    scene.add_component(speaker, ScriptComponent {
        class_name: "Game.Speaker".into(),
    });

    (scene, world)
}

#[test]
fn round_trip_preserves_identity_tags_transforms_and_edges() {
    let (original, _) = build_level();
    let serializer = SceneSerializer::new();
    let text = serializer.serialize(&original).unwrap();

    let (loaded, report) = serializer.load(&text).unwrap();
    assert_eq!(report.entities_loaded, original.len());
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(loaded.name(), "Level 1");
    assert_eq!(uuids(&loaded), uuids(&original));

    for entity in original.iter_entities() {
        let before = original.entity(entity).unwrap();
        let after = loaded
            .entity(loaded.find_entity_by_uuid(before.uuid()).unwrap())
            .unwrap();

        assert_eq!(after.tag(), before.tag());
        assert_eq!(after.transform(), before.transform());
        assert_eq!(
            after.get::<RelationshipComponent>(),
            before.get::<RelationshipComponent>()
        );
        assert_eq!(after.get::<MeshComponent>(), before.get::<MeshComponent>());
        assert_eq!(after.get::<AudioComponent>(), before.get::<AudioComponent>());
        assert_eq!(after.get::<ScriptComponent>(), before.get::<ScriptComponent>());
        assert_eq!(after.get::<PrefabComponent>(), before.get::<PrefabComponent>());
        assert_eq!(loaded.component_names(after.entity()), original.component_names(entity));
    }
}

#[test]
fn round_trip_text_is_reproducible() {
    let (original, _) = build_level();
    let serializer = SceneSerializer::new();
    let first = serializer.serialize(&original).unwrap();
    let (loaded, _) = serializer.load(&first).unwrap();
    let second = serializer.serialize(&loaded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn serialized_text_has_the_expected_layout() {
    let mut scene = Scene::new("Tiny");
    let e = scene.create_entity_with_uuid(EntityUuid::from_u128(1), "Only");
    scene.add_component(e, ScriptComponent {
        class_name: "Spin".into(),
    });
    let text = SceneSerializer::new().serialize(&scene).unwrap();

    let version = text.find("version:").unwrap();
    let name = text.find("scene:").unwrap();
    let entities = text.find("entities:").unwrap();
    assert!(version < name && name < entities);
    assert!(text.contains("\"00000000-0000-0000-0000-000000000001\""));
    assert!(text.contains("tag: \"Only\""));
    assert!(text.contains("class_name: \"Spin\""));
    // Absent optional blocks are not written.
    assert!(!text.contains("camera:"));
    assert!(!text.contains("mesh:"));
}

#[test]
fn rotation_is_stored_in_degrees() {
    let mut scene = Scene::new("Angles");
    let e = scene.create_entity("Turned");
    scene
        .get_component_mut::<TransformComponent>(e)
        .unwrap()
        .set_rotation_radians(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));

    let serializer = SceneSerializer::new();
    let (loaded, _) = serializer.load(&serializer.serialize(&scene).unwrap()).unwrap();
    let uuid = scene.uuid_of(e).unwrap();
    let t = loaded
        .get_component::<TransformComponent>(loaded.find_entity_by_uuid(uuid).unwrap())
        .unwrap();
    assert_relative_eq!(t.rotation.y, 90.0, epsilon = 1e-4);
    assert_relative_eq!(
        t.rotation_radians().y,
        std::f32::consts::FRAC_PI_2,
        epsilon = 1e-5
    );
}

#[test]
fn orphan_child_keeps_its_parent_uuid_and_is_reported() {
    let (mut original, world) = build_level();
    let world_uuid = original.uuid_of(world).unwrap();
    let camera = original
        .iter_entities()
        .find(|&e| original.entity(e).unwrap().tag() == "Camera")
        .unwrap();
    let camera_uuid = original.uuid_of(camera).unwrap();

    // Drop the parent's record by removing its slot without unlinking.
    original.remove_handle(world);
    let serializer = SceneSerializer::new();
    let text = serializer.serialize(&original).unwrap();

    let (loaded, report) = serializer.load(&text).unwrap();
    let orphan = loaded.find_entity_by_uuid(camera_uuid).unwrap();
    assert_eq!(loaded.entity(orphan).unwrap().parent(), world_uuid);
    assert!(loaded.parent_of(orphan).is_none());
    assert!(report
        .link
        .unresolved_parents
        .contains(&(camera_uuid, world_uuid)));
    assert_eq!(report.link.unresolved_parents.len(), 3);
    assert!(report.link.unresolved_children.is_empty());
}

#[test]
fn dangling_children_and_assets_are_reported() {
    let text = r#"(
        version: 1,
        scene: "Broken",
        entities: [
            (
                entity: "00000000-0000-0000-0000-000000000001",
                tag: "Parent",
                relationship: (children: ["00000000-0000-0000-0000-0000000000ff"]),
                mesh: (mesh: "00000000-0000-0000-0000-000000000abc"),
            ),
        ],
    )"#;
    let known: HashSet<AssetUUID> = HashSet::new();
    let mut scene = Scene::new("target");
    let report = SceneSerializer::new()
        .deserialize_with_assets(text, &mut scene, &known)
        .unwrap();

    let parent = EntityUuid::from_u128(1);
    assert_eq!(report.entities_loaded, 1);
    assert_eq!(
        report.link.unresolved_children,
        vec![(parent, EntityUuid::from_u128(0xff))]
    );
    assert_eq!(
        report.link.unresolved_assets,
        vec![(parent, AssetUUID::from_u128(0xabc))]
    );
    assert_eq!(scene.name(), "Broken");
}

#[test]
fn every_loaded_entity_has_the_mandatory_components() {
    let (original, _) = build_level();
    let serializer = SceneSerializer::new();
    let (loaded, _) = serializer.load(&serializer.serialize(&original).unwrap()).unwrap();

    for entity in loaded.iter_entities() {
        let view = loaded.entity(entity).unwrap();
        assert!(view.has::<strata_data::ecs::IdComponent>());
        assert!(view.has::<TagComponent>());
        assert!(view.has::<TransformComponent>());
        assert!(view.has::<RelationshipComponent>());
    }
}
