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

//! Parent/child operations over `RelationshipComponent`.

use std::collections::HashSet;

use strata_core::ecs::entity::EntityUuid;
use thiserror::Error;

use super::{Entity, Scene};
use crate::ecs::RelationshipComponent;

/// Errors raised when an edit would break the forest shape of the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// An entity was asked to become its own parent.
    #[error("entity {0} cannot be its own parent")]
    SelfParent(EntityUuid),
    /// The new parent is a descendant of the child.
    #[error("parenting {child} under {parent} would create a cycle")]
    Cycle {
        /// The entity being reparented.
        child: EntityUuid,
        /// The requested parent.
        parent: EntityUuid,
    },
    /// A handle passed in is dead or belongs to another scene.
    #[error("entity {0:?} is not alive in this scene")]
    UnknownEntity(Entity),
}

impl Scene {
    /// Returns `true` if `ancestor` appears on the parent chain above `uuid`.
    ///
    /// The walk stops at the first identity that is not loaded in the scene
    /// and is bounded by the entity count, so a corrupted chain cannot loop.
    pub(crate) fn is_ancestor_uuid(&self, ancestor: EntityUuid, uuid: EntityUuid) -> bool {
        if ancestor.is_nil() {
            return false;
        }
        let mut current = uuid;
        for _ in 0..=self.len() {
            if current == ancestor {
                return true;
            }
            let Some(entity) = self.find_entity_by_uuid(current) else {
                return false;
            };
            match self.get_component::<RelationshipComponent>(entity) {
                Some(rel) if !rel.parent.is_nil() => current = rel.parent,
                _ => return false,
            }
        }
        false
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `entity`.
    pub fn is_ancestor(&self, ancestor: Entity, entity: Entity) -> bool {
        let (Some(ancestor), Some(start)) = (self.uuid_of(ancestor), self.parent_uuid(entity))
        else {
            return false;
        };
        self.is_ancestor_uuid(ancestor, start)
    }

    fn parent_uuid(&self, entity: Entity) -> Option<EntityUuid> {
        self.get_component::<RelationshipComponent>(entity)
            .map(|r| r.parent)
            .filter(|p| !p.is_nil())
    }

    /// The parent of `entity`, if it has one loaded in this scene.
    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.find_entity_by_uuid(self.parent_uuid(entity)?)
    }

    /// The loaded children of `entity`, in order. Dangling identities are skipped.
    pub fn children_of(&self, entity: Entity) -> Vec<Entity> {
        self.get_component::<RelationshipComponent>(entity)
            .map(|r| {
                r.children
                    .iter()
                    .filter_map(|&c| self.find_entity_by_uuid(c))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Entities without a parent, in slot order.
    pub fn root_entities(&self) -> Vec<Entity> {
        self.iter_entities()
            .filter(|&e| {
                self.get_component::<RelationshipComponent>(e)
                    .is_some_and(RelationshipComponent::is_root)
            })
            .collect()
    }

    /// `entity` followed by all of its loaded descendants, depth first, in
    /// children order. Each entity appears once even if the edges are corrupt.
    pub fn descendants(&self, entity: Entity) -> Vec<Entity> {
        let mut out = Vec::new();
        if !self.is_alive(entity) {
            return out;
        }
        let mut visited = HashSet::new();
        let mut stack = vec![entity];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            out.push(current);
            let mut children = self.children_of(current);
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Removes `entity` from its parent's children list and clears its parent.
    pub(crate) fn detach_from_parent(&mut self, entity: Entity) {
        let Some(uuid) = self.uuid_of(entity) else {
            return;
        };
        if let Some(parent) = self.parent_of(entity) {
            if let Some(rel) = self.get_component_mut::<RelationshipComponent>(parent) {
                rel.remove_child(uuid);
            }
        }
        if let Some(rel) = self.get_component_mut::<RelationshipComponent>(entity) {
            rel.parent = EntityUuid::NIL;
        }
    }

    /// Moves `child` under `new_parent`, or makes it a root with `None`.
    ///
    /// Both sides of the old and new edges are updated. The child is appended
    /// to the end of the new parent's children.
    pub fn reparent(
        &mut self,
        child: Entity,
        new_parent: Option<Entity>,
    ) -> Result<(), HierarchyError> {
        if !self.is_alive(child) {
            return Err(HierarchyError::UnknownEntity(child));
        }
        let child_uuid = self.uuid_of(child).unwrap_or(EntityUuid::NIL);

        let parent_uuid = match new_parent {
            Some(parent) => {
                if !self.is_alive(parent) {
                    return Err(HierarchyError::UnknownEntity(parent));
                }
                if parent == child {
                    return Err(HierarchyError::SelfParent(child_uuid));
                }
                let parent_uuid = self.uuid_of(parent).unwrap_or(EntityUuid::NIL);
                if self.is_ancestor(child, parent) {
                    return Err(HierarchyError::Cycle {
                        child: child_uuid,
                        parent: parent_uuid,
                    });
                }
                Some((parent, parent_uuid))
            }
            None => None,
        };

        self.detach_from_parent(child);
        if let Some((parent, parent_uuid)) = parent_uuid {
            self.relationship_mut(child).parent = parent_uuid;
            self.relationship_mut(parent).add_child(child_uuid);
        }
        Ok(())
    }

    /// Destroys `entity` and every loaded descendant. Returns how many
    /// entities were destroyed.
    pub fn destroy_hierarchy(&mut self, entity: Entity) -> usize {
        if !self.is_alive(entity) {
            log::warn!("Scene '{}': destroy_hierarchy on dead entity {entity:?}.", self.name);
            return 0;
        }
        self.detach_from_parent(entity);
        self.descendants(entity)
            .into_iter()
            .filter(|&e| self.remove_handle(e))
            .count()
    }
}
