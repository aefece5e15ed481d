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

use strata_core::ecs::entity::EntityUuid;
use strata_core::math::Vec3;

use super::*;
use crate::ecs::{CameraComponent, ScriptComponent};

fn names(scene: &Scene, entities: &[Entity]) -> Vec<String> {
    entities
        .iter()
        .map(|&e| scene.entity(e).map(|v| v.tag().to_owned()).unwrap_or_default())
        .collect()
}

/// Builds `root -> [a -> [a1], b]` with both sides of each edge set.
fn small_tree(scene: &mut Scene) -> (Entity, Entity, Entity, Entity) {
    let root = scene.create_entity("root");
    let a = scene.create_entity("a");
    let a1 = scene.create_entity("a1");
    let b = scene.create_entity("b");
    scene.reparent(a, Some(root)).unwrap();
    scene.reparent(b, Some(root)).unwrap();
    scene.reparent(a1, Some(a)).unwrap();
    (root, a, a1, b)
}

#[test]
fn test_create_entity_attaches_mandatory_components() {
    let mut scene = Scene::new("test");
    let e = scene.create_entity("");

    let view = scene.entity(e).unwrap();
    assert!(view.has::<IdComponent>());
    assert!(view.has::<TagComponent>());
    assert!(view.has::<TransformComponent>());
    assert!(view.has::<RelationshipComponent>());
    assert_eq!(view.tag(), "Unnamed Entity");
    assert!(!view.uuid().is_nil());
    assert!(view.parent().is_nil());
    assert!(view.children().is_empty());
    assert_eq!(scene.find_entity_by_uuid(view.uuid()), Some(e));
}

#[test]
fn test_create_handle_is_bare() {
    let mut scene = Scene::new("test");
    let e = scene.create_handle();
    assert!(scene.is_alive(e));
    assert!(scene.component_names(e).is_empty());
    assert!(scene.remove_handle(e));
    assert!(!scene.is_alive(e));
}

#[test]
#[should_panic(expected = "already has a CameraComponent")]
fn test_add_component_twice_panics() {
    let mut scene = Scene::new("test");
    let e = scene.create_entity("cam");
    scene.add_component(e, CameraComponent::default());
    scene.add_component(e, CameraComponent::default());
}

#[test]
#[should_panic(expected = "has no CameraComponent")]
fn test_component_accessor_panics_when_absent() {
    let mut scene = Scene::new("test");
    let e = scene.create_entity("plain");
    let _ = scene.entity(e).unwrap().component::<CameraComponent>();
}

#[test]
fn test_insert_component_replaces_and_tracks_identity() {
    let mut scene = Scene::new("test");
    let e = scene.create_entity("e");
    let old = scene.uuid_of(e).unwrap();
    let new = EntityUuid::from_u128(77);

    let previous = scene.insert_component(e, IdComponent::new(new));
    assert_eq!(previous.map(|c| c.id), Some(old));
    assert_eq!(scene.find_entity_by_uuid(new), Some(e));
    assert_eq!(scene.find_entity_by_uuid(old), None);

    scene.remove_component::<IdComponent>(e);
    assert_eq!(scene.find_entity_by_uuid(new), None);
}

#[test]
fn test_duplicate_uuid_last_one_wins() {
    let mut scene = Scene::new("test");
    let uuid = EntityUuid::from_u128(5);
    let first = scene.create_entity_with_uuid(uuid, "first");
    let second = scene.create_entity_with_uuid(uuid, "second");

    assert_ne!(first, second);
    assert_eq!(scene.find_entity_by_uuid(uuid), Some(second));
}

#[test]
fn test_query_and_entities_with() {
    let mut scene = Scene::new("test");
    let cam = scene.create_entity("cam");
    scene.create_entity("other");
    scene.add_component(cam, CameraComponent {
        fov: 60.0,
        ..Default::default()
    });

    let cameras: Vec<_> = scene.entities_with::<CameraComponent>().collect();
    assert_eq!(cameras, vec![cam]);
    let fovs: Vec<f32> = scene.query::<CameraComponent>().map(|(_, c)| c.fov).collect();
    assert_eq!(fovs, vec![60.0]);
    // Restartable: a second pass sees the same data.
    assert_eq!(scene.entities_with::<TagComponent>().count(), 2);
    assert_eq!(scene.entities_with::<TagComponent>().count(), 2);
    assert_eq!(scene.entities_with::<ScriptComponent>().count(), 0);
}

#[test]
fn test_each_visits_in_slot_order() {
    let mut scene = Scene::new("test");
    for name in ["a", "b", "c"] {
        scene.create_entity(name);
    }
    let mut seen = Vec::new();
    scene.each(|e| seen.push(e.tag().to_owned()));
    assert_eq!(seen, vec!["a", "b", "c"]);
}

#[test]
fn test_cross_scene_handles_are_rejected() {
    let mut first = Scene::new("first");
    let mut second = Scene::new("second");
    let a = first.create_entity("a");
    let b = second.create_entity("b");

    // Same slot index, different scenes.
    assert_eq!(a.id(), b.id());
    assert!(!second.is_alive(a));
    assert!(second.entity(a).is_none());
    assert!(second.get_component::<TagComponent>(a).is_none());
    assert!(second.entity_mut(a).is_none());
    assert_eq!(
        second.reparent(b, Some(a)),
        Err(HierarchyError::UnknownEntity(a))
    );
}

#[test]
fn test_stale_handle_after_recycle() {
    let mut scene = Scene::new("test");
    let old = scene.create_entity("old");
    assert!(scene.destroy_entity(old));
    let new = scene.create_entity("new");

    assert_eq!(old.id().index, new.id().index);
    assert!(!scene.is_alive(old));
    assert!(scene.get_component::<TagComponent>(old).is_none());
    assert_eq!(scene.entity(new).unwrap().tag(), "new");
}

#[test]
fn test_reparent_updates_both_sides() {
    let mut scene = Scene::new("test");
    let (root, a, _a1, b) = small_tree(&mut scene);
    let a_uuid = scene.uuid_of(a).unwrap();
    let b_uuid = scene.uuid_of(b).unwrap();

    scene.reparent(a, Some(b)).unwrap();
    assert_eq!(scene.entity(root).unwrap().children(), &[b_uuid]);
    assert_eq!(scene.entity(b).unwrap().children(), &[a_uuid]);
    assert_eq!(scene.entity(a).unwrap().parent(), b_uuid);

    scene.reparent(a, None).unwrap();
    assert!(scene.entity(a).unwrap().parent().is_nil());
    assert!(scene.entity(b).unwrap().children().is_empty());
    assert_eq!(names(&scene, &scene.root_entities()), vec!["root", "a"]);
    assert!(scene.link_hierarchy().is_clean());
}

#[test]
fn test_cycles_are_rejected() {
    let mut scene = Scene::new("test");
    let (root, a, a1, _b) = small_tree(&mut scene);
    let root_uuid = scene.uuid_of(root).unwrap();
    let a1_uuid = scene.uuid_of(a1).unwrap();

    assert!(matches!(
        scene.reparent(root, Some(a1)),
        Err(HierarchyError::Cycle { .. })
    ));
    assert!(matches!(
        scene.reparent(a, Some(a)),
        Err(HierarchyError::SelfParent(_))
    ));

    let mut view = scene.entity_mut(root).unwrap();
    assert_eq!(
        view.set_parent(a1_uuid),
        Err(HierarchyError::Cycle {
            child: root_uuid,
            parent: a1_uuid
        })
    );
    assert_eq!(
        view.set_parent(root_uuid),
        Err(HierarchyError::SelfParent(root_uuid))
    );
    // The failed edits left the tree untouched.
    assert!(scene.entity(root).unwrap().parent().is_nil());
    assert!(scene.is_ancestor(root, a1));
    assert!(!scene.is_ancestor(a1, root));
}

#[test]
fn test_set_parent_writes_only_the_child_side() {
    let mut scene = Scene::new("test");
    let parent = scene.create_entity("parent");
    let child = scene.create_entity("child");
    let parent_uuid = scene.uuid_of(parent).unwrap();
    let child_uuid = scene.uuid_of(child).unwrap();

    scene.entity_mut(child).unwrap().set_parent(parent_uuid).unwrap();
    assert_eq!(scene.entity(child).unwrap().parent(), parent_uuid);
    assert!(scene.entity(parent).unwrap().children().is_empty());
    assert_eq!(scene.link_hierarchy().unresolved_count(), 0);

    scene
        .entity_mut(parent)
        .unwrap()
        .children_mut()
        .push(child_uuid);
    assert_eq!(scene.children_of(parent), vec![child]);
}

#[test]
fn test_destroy_entity_unlinks_and_orphans_children() {
    let mut scene = Scene::new("test");
    let (root, a, a1, b) = small_tree(&mut scene);
    let a_uuid = scene.uuid_of(a).unwrap();
    let b_uuid = scene.uuid_of(b).unwrap();

    assert!(scene.destroy_entity(a));
    assert!(!scene.destroy_entity(a));
    assert_eq!(scene.find_entity_by_uuid(a_uuid), None);
    assert_eq!(scene.entity(root).unwrap().children(), &[b_uuid]);
    assert!(scene.entity(a1).unwrap().parent().is_nil());
    assert_eq!(scene.len(), 3);
    assert!(scene.link_hierarchy().is_clean());
}

#[test]
fn test_destroy_hierarchy_removes_descendants() {
    let mut scene = Scene::new("test");
    let (root, a, a1, b) = small_tree(&mut scene);
    let a_uuid = scene.uuid_of(a).unwrap();

    assert_eq!(
        names(&scene, &scene.descendants(root)),
        vec!["root", "a", "a1", "b"]
    );
    assert_eq!(scene.destroy_hierarchy(a), 2);
    assert!(!scene.is_alive(a1));
    assert!(scene.is_alive(b));
    assert!(!scene
        .entity(root)
        .unwrap()
        .children()
        .contains(&a_uuid));
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_lifecycle_events() {
    let mut scene = Scene::new("test");
    let events = scene.subscribe();
    let e = scene.create_entity("watched");
    let uuid = scene.uuid_of(e).unwrap();
    scene.destroy_entity(e);

    let received: Vec<_> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            SceneEvent::EntityCreated { entity: e, uuid },
            SceneEvent::EntityDestroyed { entity: e, uuid },
        ]
    );
}

#[test]
fn test_owned_entity_destroys_on_drop() {
    let mut scene = Scene::new("test");
    let dropped = {
        let owned = scene.spawn_owned("temp");
        owned.entity()
    };
    assert!(!scene.is_alive(dropped));

    let kept = {
        let mut owned = scene.spawn_owned("kept");
        owned.get_mut().insert(TransformComponent::from_position(Vec3::ONE));
        owned.release()
    };
    assert!(scene.is_alive(kept));
    assert_eq!(
        scene.entity(kept).unwrap().transform().map(|t| t.position),
        Some(Vec3::ONE)
    );
}

#[test]
fn test_duplicate_entity_copies_subtree_with_fresh_uuids() {
    let mut scene = Scene::new("test");
    let (root, a, _a1, b) = small_tree(&mut scene);
    scene.add_component(a, ScriptComponent {
        class_name: "Spin".into(),
    });

    let copy = scene.duplicate_entity(a).unwrap();
    let copy_uuid = scene.uuid_of(copy).unwrap();
    let a_uuid = scene.uuid_of(a).unwrap();
    let b_uuid = scene.uuid_of(b).unwrap();
    assert_ne!(copy_uuid, a_uuid);

    let view = scene.entity(copy).unwrap();
    assert_eq!(view.tag(), "a");
    assert_eq!(
        view.get::<ScriptComponent>().map(|s| s.class_name.as_str()),
        Some("Spin")
    );
    assert_eq!(view.children().len(), 1);
    assert_eq!(view.parent_entity(), Some(root));
    assert_eq!(
        scene.entity(root).unwrap().children(),
        &[a_uuid, copy_uuid, b_uuid]
    );
    assert_eq!(scene.len(), 6);
    assert!(scene.link_hierarchy().is_clean());
}

#[test]
fn test_copy_scene_keeps_identities() {
    let mut scene = Scene::new("edit");
    let (root, _a, a1, _b) = small_tree(&mut scene);
    let copy = scene.copy_scene();

    assert_ne!(copy.id(), scene.id());
    assert_eq!(copy.len(), scene.len());
    let root_uuid = scene.uuid_of(root).unwrap();
    let copied_root = copy.find_entity_by_uuid(root_uuid).unwrap();
    assert_eq!(
        copy.entity(copied_root).unwrap().children(),
        scene.entity(root).unwrap().children()
    );
    // Handles are not shared between the two scenes.
    assert!(!copy.is_alive(a1));
    assert!(copy.link_hierarchy().is_clean());
}
