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

//! Entity handles and the borrowed views used to work with them.

use std::fmt;
use std::mem;

use strata_core::ecs::entity::{EntityId, EntityUuid};

use super::{HierarchyError, Scene, SceneId};
use crate::ecs::{Component, IdComponent, RelationshipComponent, TagComponent, TransformComponent};

/// A lightweight, copyable reference to an entity slot of one scene.
///
/// Copying an `Entity` aliases the same slot. A handle says nothing about
/// liveness; check it with [`Scene::is_alive`]. Handles issued by one scene are
/// never alive in another.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: EntityId,
    scene: SceneId,
}

impl Entity {
    pub(crate) fn new(id: EntityId, scene: SceneId) -> Self {
        Self { id, scene }
    }

    /// The generational slot id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The scene that issued this handle.
    pub fn scene(&self) -> SceneId {
        self.scene
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entity({}v{}@{:?})",
            self.id.index, self.id.generation, self.scene
        )
    }
}

/// A read-only view of a live entity.
#[derive(Clone, Copy)]
pub struct EntityRef<'s> {
    scene: &'s Scene,
    entity: Entity,
}

impl<'s> EntityRef<'s> {
    pub(crate) fn new(scene: &'s Scene, entity: Entity) -> Self {
        Self { scene, entity }
    }

    /// The underlying handle.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The scene this entity lives in.
    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    /// Returns `true` while the entity is alive.
    pub fn is_valid(&self) -> bool {
        self.scene.is_alive(self.entity)
    }

    /// Returns the entity's `T`.
    pub fn get<T: Component>(&self) -> Option<&'s T> {
        self.scene.get_component::<T>(self.entity)
    }

    /// Returns the entity's `T`.
    ///
    /// # Panics
    ///
    /// Panics if the entity has no `T`.
    pub fn component<T: Component>(&self) -> &'s T {
        match self.get::<T>() {
            Some(value) => value,
            None => panic!("entity {:?} has no {}", self.entity, T::NAME),
        }
    }

    /// Returns `true` if the entity has a `T`.
    pub fn has<T: Component>(&self) -> bool {
        self.scene.has_component::<T>(self.entity)
    }

    /// The entity's identity, or nil for a bare slot.
    pub fn uuid(&self) -> EntityUuid {
        self.get::<IdComponent>().map_or(EntityUuid::NIL, |c| c.id)
    }

    /// The entity's name, or an empty string for a bare slot.
    pub fn tag(&self) -> &'s str {
        self.get::<TagComponent>().map_or("", |t| t.tag.as_str())
    }

    /// The entity's local transform.
    pub fn transform(&self) -> Option<&'s TransformComponent> {
        self.get::<TransformComponent>()
    }

    /// The parent's identity; nil for roots.
    pub fn parent(&self) -> EntityUuid {
        self.get::<RelationshipComponent>()
            .map_or(EntityUuid::NIL, |r| r.parent)
    }

    /// The parent, if it is loaded in the same scene.
    pub fn parent_entity(&self) -> Option<Entity> {
        let parent = self.parent();
        if parent.is_nil() {
            None
        } else {
            self.scene.find_entity_by_uuid(parent)
        }
    }

    /// The ordered child identities.
    pub fn children(&self) -> &'s [EntityUuid] {
        self.get::<RelationshipComponent>()
            .map(|r| r.children.as_slice())
            .unwrap_or_default()
    }
}

impl fmt::Debug for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRef")
            .field("entity", &self.entity)
            .field("uuid", &self.uuid())
            .field("tag", &self.tag())
            .finish()
    }
}

/// A mutable view of a live entity.
pub struct EntityMut<'s> {
    scene: &'s mut Scene,
    entity: Entity,
}

impl<'s> EntityMut<'s> {
    pub(crate) fn new(scene: &'s mut Scene, entity: Entity) -> Self {
        Self { scene, entity }
    }

    /// The underlying handle.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Reborrows as a read-only view.
    pub fn as_readonly(&self) -> EntityRef<'_> {
        EntityRef::new(&*self.scene, self.entity)
    }

    /// The entity's identity, or nil for a bare slot.
    pub fn uuid(&self) -> EntityUuid {
        self.as_readonly().uuid()
    }

    /// Attaches a component the entity does not have yet.
    ///
    /// # Panics
    ///
    /// Panics if the entity already has a `T`.
    pub fn add<T: Component>(&mut self, value: T) -> &mut T {
        self.scene.add_component(self.entity, value)
    }

    /// Attaches or replaces a component, returning the previous value.
    pub fn insert<T: Component>(&mut self, value: T) -> Option<T> {
        self.scene.insert_component(self.entity, value)
    }

    /// Returns the entity's `T`.
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.scene.get_component::<T>(self.entity)
    }

    /// Returns the entity's `T` mutably.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.scene.get_component_mut::<T>(self.entity)
    }

    /// Returns `true` if the entity has a `T`.
    pub fn has<T: Component>(&self) -> bool {
        self.scene.has_component::<T>(self.entity)
    }

    /// Detaches and returns the entity's `T`.
    pub fn remove<T: Component>(&mut self) -> Option<T> {
        self.scene.remove_component::<T>(self.entity)
    }

    /// Renames the entity. An empty name becomes `"Unnamed Entity"`.
    pub fn set_name(&mut self, name: &str) {
        self.scene.insert_component(self.entity, TagComponent::new(name));
    }

    /// Sets the parent identity of this entity.
    ///
    /// Only the child's side of the edge is written: the caller is expected to
    /// add this entity to the parent's [`children_mut`](Self::children_mut)
    /// list. Use [`Scene::reparent`] to update both sides. A nil `parent`
    /// makes the entity a root.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is this entity or one of its descendants.
    pub fn set_parent(&mut self, parent: EntityUuid) -> Result<(), HierarchyError> {
        let me = self.uuid();
        if !parent.is_nil() {
            if parent == me {
                return Err(HierarchyError::SelfParent(me));
            }
            if self.scene.is_ancestor_uuid(me, parent) {
                return Err(HierarchyError::Cycle { child: me, parent });
            }
        }
        self.scene.relationship_mut(self.entity).parent = parent;
        Ok(())
    }

    /// The ordered child identities, for in-place editing.
    pub fn children_mut(&mut self) -> &mut Vec<EntityUuid> {
        &mut self.scene.relationship_mut(self.entity).children
    }

    /// Destroys the entity, consuming the view.
    pub fn destroy(self) -> bool {
        self.scene.destroy_entity(self.entity)
    }
}

impl fmt::Debug for EntityMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_readonly(), f)
    }
}

/// An entity owned by the guard: it is destroyed when the guard drops.
///
/// Call [`OwnedEntity::release`] to keep the entity and get its handle back.
pub struct OwnedEntity<'s> {
    scene: &'s mut Scene,
    entity: Entity,
}

impl<'s> OwnedEntity<'s> {
    pub(crate) fn new(scene: &'s mut Scene, entity: Entity) -> Self {
        Self { scene, entity }
    }

    /// The owned handle.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// A read-only view of the owned entity.
    pub fn get(&self) -> EntityRef<'_> {
        EntityRef::new(&*self.scene, self.entity)
    }

    /// A mutable view of the owned entity.
    pub fn get_mut(&mut self) -> EntityMut<'_> {
        EntityMut::new(&mut *self.scene, self.entity)
    }

    /// Gives up ownership; the entity outlives the guard.
    pub fn release(self) -> Entity {
        let entity = self.entity;
        mem::forget(self);
        entity
    }
}

impl Drop for OwnedEntity<'_> {
    fn drop(&mut self) {
        if self.scene.is_alive(self.entity) {
            self.scene.destroy_entity(self.entity);
        }
    }
}
