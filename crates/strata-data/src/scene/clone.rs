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

//! Copying entities and subtrees through the component registry.

use std::collections::HashSet;

use strata_core::ecs::entity::EntityUuid;

use super::{Entity, EntityMut, Scene};
use crate::ecs::{ComponentSnapshot, RelationshipComponent, TagComponent};

struct SnapshotNode {
    source: EntityUuid,
    tag: String,
    parent: Option<usize>,
    children: Vec<usize>,
    components: ComponentSnapshot,
}

/// A detached copy of an entity subtree.
///
/// Nodes are stored in depth-first pre-order, so the subtree root is always
/// the first node and parents precede their children. Hierarchy edges are kept
/// as node indices and rewritten to fresh identities on [`spawn`](Self::spawn).
pub(crate) struct SubtreeSnapshot {
    nodes: Vec<SnapshotNode>,
}

impl SubtreeSnapshot {
    /// Captures `root` and its loaded descendants from `scene`.
    ///
    /// Child identities that are not loaded are skipped with a warning, as are
    /// children reached twice through corrupt edges.
    pub(crate) fn capture(scene: &Scene, root: Entity) -> Option<Self> {
        if !scene.is_alive(root) {
            return None;
        }
        let mut snapshot = Self { nodes: Vec::new() };
        let mut visited = HashSet::new();
        snapshot.visit(scene, root, None, &mut visited);
        Some(snapshot)
    }

    fn visit(
        &mut self,
        scene: &Scene,
        entity: Entity,
        parent: Option<usize>,
        visited: &mut HashSet<Entity>,
    ) -> usize {
        visited.insert(entity);
        let view = scene.entity(entity);
        let index = self.nodes.len();
        self.nodes.push(SnapshotNode {
            source: scene.uuid_of(entity).unwrap_or(EntityUuid::NIL),
            tag: view.map(|v| v.tag().to_owned()).unwrap_or_default(),
            parent,
            children: Vec::new(),
            components: scene.registry().snapshot(scene.storage(), entity.id()),
        });

        let children = view.map(|v| v.children().to_vec()).unwrap_or_default();
        for child_uuid in children {
            let Some(child) = scene.find_entity_by_uuid(child_uuid) else {
                log::warn!("Skipping child {child_uuid} of {}: not loaded.", self.nodes[index].source);
                continue;
            };
            if visited.contains(&child) {
                log::warn!("Skipping child {child_uuid}: already captured (cyclic or shared edge).");
                continue;
            }
            let child_index = self.visit(scene, child, Some(index), visited);
            self.nodes[index].children.push(child_index);
        }
        index
    }

    /// Number of captured entities.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Identity of the captured root in the source scene.
    pub(crate) fn source_root(&self) -> Option<EntityUuid> {
        self.nodes.first().map(|n| n.source)
    }

    /// Creates the captured entities in `target` with fresh identities.
    ///
    /// Each node's components are inserted, its parent and children are
    /// rewritten to the new identities, and `decorate` runs on it last. The
    /// root's parent is left nil. Returns the new handles in capture order,
    /// so index 0 is the new root.
    pub(crate) fn spawn(
        self,
        target: &mut Scene,
        mut decorate: impl FnMut(&mut EntityMut<'_>),
    ) -> Vec<Entity> {
        let created: Vec<(Entity, EntityUuid)> = self
            .nodes
            .iter()
            .map(|node| {
                let entity = target.create_entity(&node.tag);
                let uuid = target.uuid_of(entity).unwrap_or(EntityUuid::NIL);
                (entity, uuid)
            })
            .collect();

        for (node, &(entity, _)) in self.nodes.into_iter().zip(&created) {
            node.components.apply(target.storage_mut(), entity.id());
            target.insert_component(
                entity,
                RelationshipComponent {
                    parent: node.parent.map_or(EntityUuid::NIL, |p| created[p].1),
                    children: node.children.iter().map(|&c| created[c].1).collect(),
                },
            );
            if let Some(mut view) = target.entity_mut(entity) {
                decorate(&mut view);
            }
        }

        created.into_iter().map(|(entity, _)| entity).collect()
    }
}

impl Scene {
    /// Copies `entity` and its descendants into this scene with fresh
    /// identities. The copy is attached to the same parent as the original,
    /// directly after it in the parent's children. Returns the copy's root.
    pub fn duplicate_entity(&mut self, entity: Entity) -> Option<Entity> {
        let snapshot = SubtreeSnapshot::capture(self, entity)?;
        let source_uuid = self.uuid_of(entity);
        let parent = self.parent_of(entity);

        let copy = *snapshot.spawn(self, |_| {}).first()?;
        let copy_uuid = self.uuid_of(copy).unwrap_or(EntityUuid::NIL);

        if let (Some(parent), Some(parent_uuid)) = (parent, parent.and_then(|p| self.uuid_of(p))) {
            self.relationship_mut(copy).parent = parent_uuid;
            let siblings = &mut self.relationship_mut(parent).children;
            let at = source_uuid
                .and_then(|s| siblings.iter().position(|&c| c == s))
                .map_or(siblings.len(), |i| i + 1);
            siblings.insert(at, copy_uuid);
        }
        Some(copy)
    }

    /// Produces an independent copy of the scene that keeps every identity.
    ///
    /// Used to run a scene without touching the edited original. Entities are
    /// recreated in slot order, and components that are not in the registry
    /// are not copied.
    pub fn copy_scene(&self) -> Scene {
        let mut copy = Scene::with_registry(self.name.clone(), self.registry.clone());
        for entity in self.iter_entities() {
            let target = match self.uuid_of(entity) {
                Some(uuid) => {
                    let tag = self
                        .get_component::<TagComponent>(entity)
                        .map_or("", |t| t.tag.as_str());
                    copy.create_entity_with_uuid(uuid, tag)
                }
                None => copy.create_handle(),
            };
            self.registry
                .snapshot(&self.components, entity.id())
                .apply(&mut copy.components, target.id());
            if let Some(rel) = self.get_component::<RelationshipComponent>(entity) {
                copy.insert_component(target, rel.clone());
            }
        }
        log::debug!("Copied scene '{}' ({} entities).", self.name, copy.len());
        copy
    }
}
