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

//! Scenes: the containers that own entities and their components.
//!
//! A [`Scene`] pairs a generational slot allocator with a type-erased
//! component table and keeps an index from [`EntityUuid`] to live handles.
//! Entities are addressed by the `Copy` handle [`Entity`]; typed access goes
//! through the borrowed views [`EntityRef`] and [`EntityMut`].

mod clone;
mod entity;
mod hierarchy;
mod link;

pub use entity::{Entity, EntityMut, EntityRef, OwnedEntity};
pub use hierarchy::HierarchyError;
pub use link::LinkReport;

pub(crate) use clone::SubtreeSnapshot;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use strata_core::ecs::entity::{EntityId, EntityUuid};
use strata_core::event::EventBus;

use crate::ecs::{
    Component, ComponentRegistry, ComponentStorage, EntityStore, IdComponent,
    RelationshipComponent, TagComponent, TransformComponent,
};

/// Identifies one `Scene` instance for the lifetime of the process.
///
/// Every [`Entity`] carries the id of the scene that issued it, so a handle is
/// never mistaken for a slot of another scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u64);

impl SceneId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Entity lifecycle notifications, delivered through [`Scene::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// An entity with an identity was created.
    EntityCreated {
        /// The new handle.
        entity: Entity,
        /// Its identity.
        uuid: EntityUuid,
    },
    /// An entity with an identity was destroyed. The handle is already dead.
    EntityDestroyed {
        /// The dead handle.
        entity: Entity,
        /// The identity it had.
        uuid: EntityUuid,
    },
}

/// A collection of entities and their components.
pub struct Scene {
    id: SceneId,
    name: String,
    entities: EntityStore,
    components: ComponentStorage,
    uuid_index: HashMap<EntityUuid, EntityId>,
    registry: Arc<ComponentRegistry>,
    events: Option<EventBus<SceneEvent>>,
}

impl Scene {
    /// Creates an empty scene using the engine component registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_registry(name, ComponentRegistry::engine_shared())
    }

    /// Creates an empty scene that copies components through `registry`.
    pub fn with_registry(name: impl Into<String>, registry: Arc<ComponentRegistry>) -> Self {
        let scene = Self {
            id: SceneId::next(),
            name: name.into(),
            entities: EntityStore::new(),
            components: ComponentStorage::new(),
            uuid_index: HashMap::new(),
            registry,
            events: None,
        };
        log::debug!("Scene '{}' created ({:?}).", scene.name, scene.id);
        scene
    }

    /// This scene's process-unique id.
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// The scene's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the scene.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The component registry used to copy entities out of this scene.
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the scene has no live entity.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn handle(&self, id: EntityId) -> Entity {
        Entity::new(id, self.id)
    }

    /// Returns `true` if `entity` was issued by this scene and is still alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        entity.scene() == self.id && self.entities.is_alive(entity.id())
    }

    fn assert_alive(&self, entity: Entity) {
        assert!(
            self.is_alive(entity),
            "entity {:?} is not alive in scene '{}'",
            entity,
            self.name
        );
    }

    fn emit(&self, event: SceneEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }

    /// Returns a receiver of this scene's lifecycle events.
    ///
    /// The event bus is created on the first call; events raised before that
    /// are not recorded.
    pub fn subscribe(&mut self) -> flume::Receiver<SceneEvent> {
        self.events.get_or_insert_with(EventBus::new).subscribe()
    }

    // --- Slots ---

    /// Allocates a bare slot with no components.
    pub fn create_handle(&mut self) -> Entity {
        let id = self.entities.create();
        self.handle(id)
    }

    /// Frees the slot of `entity` along with all of its components.
    ///
    /// Relationship edges pointing at the entity are left untouched; use
    /// [`Scene::destroy_entity`] to unlink it first. Removing a dead slot is a
    /// programmer error.
    pub fn remove_handle(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            debug_assert!(false, "remove_handle called with dead entity {entity:?}");
            return false;
        }

        let uuid = self.components.get::<IdComponent>(entity.id()).map(|c| c.id);
        if let Some(uuid) = uuid {
            if self.uuid_index.get(&uuid) == Some(&entity.id()) {
                self.uuid_index.remove(&uuid);
            }
        }
        self.components.remove_all(entity.id());
        self.entities.destroy(entity.id());

        if let Some(uuid) = uuid {
            self.emit(SceneEvent::EntityDestroyed { entity, uuid });
        }
        true
    }

    // --- Components ---

    fn track_identity<T: Component>(&mut self, id: EntityId, value: &T) {
        if let Some(identity) = (value as &dyn Any).downcast_ref::<IdComponent>() {
            self.index_uuid(identity.id, id);
        }
    }

    fn index_uuid(&mut self, uuid: EntityUuid, id: EntityId) {
        if let Some(previous) = self.uuid_index.insert(uuid, id) {
            if previous != id && self.entities.is_alive(previous) {
                log::warn!(
                    "Scene '{}': UUID {uuid} is already used by slot {}; the newest entity wins the lookup.",
                    self.name,
                    previous.index
                );
            }
        }
    }

    /// Attaches `value` to `entity` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is dead or already has a `T`.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> &mut T {
        self.assert_alive(entity);
        assert!(
            !self.components.contains::<T>(entity.id()),
            "entity {:?} already has a {}",
            entity,
            T::NAME
        );
        self.track_identity(entity.id(), &value);
        self.components.emplace(entity.id(), value)
    }

    /// Attaches or replaces the `T` of `entity`, returning the previous value.
    ///
    /// # Panics
    ///
    /// Panics if `entity` is dead.
    pub fn insert_component<T: Component>(&mut self, entity: Entity, value: T) -> Option<T> {
        self.assert_alive(entity);
        self.track_identity(entity.id(), &value);
        let previous = self.components.insert(entity.id(), value);
        self.forget_identity(entity.id(), previous.as_ref());
        previous
    }

    fn forget_identity<T: Component>(&mut self, id: EntityId, previous: Option<&T>) {
        let Some(old) = previous.and_then(|p| (p as &dyn Any).downcast_ref::<IdComponent>()) else {
            return;
        };
        let still_current = self
            .components
            .get::<IdComponent>(id)
            .is_some_and(|c| c.id == old.id);
        if !still_current && self.uuid_index.get(&old.id) == Some(&id) {
            self.uuid_index.remove(&old.id);
        }
    }

    /// Returns the `T` of `entity`.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.components.get::<T>(entity.id())
    }

    /// Returns the `T` of `entity` mutably.
    ///
    /// Changing an `IdComponent` through this reference does not update the
    /// UUID lookup; use [`Scene::insert_component`] for that.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        self.components.get_mut::<T>(entity.id())
    }

    /// Returns `true` if `entity` is alive and has a `T`.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.is_alive(entity) && self.components.contains::<T>(entity.id())
    }

    /// Detaches and returns the `T` of `entity`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.is_alive(entity) {
            return None;
        }
        let removed = self.components.remove::<T>(entity.id());
        self.forget_identity(entity.id(), removed.as_ref());
        removed
    }

    pub(crate) fn relationship_mut(&mut self, entity: Entity) -> &mut RelationshipComponent {
        self.components
            .get_or_insert_with(entity.id(), RelationshipComponent::default)
    }

    // --- Entities ---

    /// Creates an entity with a fresh UUID and the mandatory components.
    ///
    /// An empty `name` becomes `"Unnamed Entity"`.
    pub fn create_entity(&mut self, name: &str) -> Entity {
        self.create_entity_with_uuid(EntityUuid::new(), name)
    }

    /// Creates an entity with an explicit identity and the mandatory components.
    ///
    /// If another live entity already uses `uuid`, lookups by UUID return the
    /// newer entity from now on.
    pub fn create_entity_with_uuid(&mut self, uuid: EntityUuid, name: &str) -> Entity {
        let entity = self.create_handle();
        let id = entity.id();

        self.index_uuid(uuid, id);
        self.components.insert(id, IdComponent::new(uuid));
        self.components.insert(id, TagComponent::new(name));
        self.components.insert(id, TransformComponent::default());
        self.components.insert(id, RelationshipComponent::default());

        log::trace!("Scene '{}': created entity {uuid} at slot {}.", self.name, id.index);
        self.emit(SceneEvent::EntityCreated { entity, uuid });
        entity
    }

    /// Destroys `entity`, unlinking it from its parent's children list.
    ///
    /// Children of the destroyed entity become roots. Returns `false` if the
    /// entity was not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            log::warn!("Scene '{}': destroy_entity on dead entity {entity:?}.", self.name);
            return false;
        }

        self.detach_from_parent(entity);

        let uuid = self.uuid_of(entity);
        let children = self
            .get_component::<RelationshipComponent>(entity)
            .map(|r| r.children.clone())
            .unwrap_or_default();
        for child in children {
            let Some(child) = self.find_entity_by_uuid(child) else {
                continue;
            };
            if let Some(rel) = self.get_component_mut::<RelationshipComponent>(child) {
                if Some(rel.parent) == uuid {
                    rel.parent = EntityUuid::NIL;
                }
            }
        }

        self.remove_handle(entity)
    }

    /// Returns the live entity with identity `uuid`.
    pub fn find_entity_by_uuid(&self, uuid: EntityUuid) -> Option<Entity> {
        let id = *self.uuid_index.get(&uuid)?;
        self.entities.is_alive(id).then(|| self.handle(id))
    }

    /// Returns the identity of `entity`, if it has one.
    pub fn uuid_of(&self, entity: Entity) -> Option<EntityUuid> {
        self.get_component::<IdComponent>(entity).map(|c| c.id)
    }

    /// Iterates over the live entities in slot order.
    pub fn iter_entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().map(|id| self.handle(id))
    }

    /// Iterates over the entities that have a `T`.
    pub fn entities_with<T: Component>(&self) -> impl Iterator<Item = Entity> + '_ {
        self.query::<T>().map(|(entity, _)| entity)
    }

    /// Iterates over `(entity, &T)` for every entity that has a `T`.
    pub fn query<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        let scene = self.id;
        self.components
            .store::<T>()
            .into_iter()
            .flat_map(|store| store.iter())
            .map(move |(id, value)| (Entity::new(id, scene), value))
    }

    /// Calls `f` with a view of every live entity, in slot order.
    pub fn each(&self, mut f: impl FnMut(EntityRef<'_>)) {
        for id in self.entities.iter() {
            f(EntityRef::new(self, self.handle(id)));
        }
    }

    /// A read-only view of `entity`.
    pub fn entity(&self, entity: Entity) -> Option<EntityRef<'_>> {
        self.is_alive(entity).then(|| EntityRef::new(self, entity))
    }

    /// A mutable view of `entity`.
    pub fn entity_mut(&mut self, entity: Entity) -> Option<EntityMut<'_>> {
        if self.is_alive(entity) {
            Some(EntityMut::new(self, entity))
        } else {
            None
        }
    }

    /// Creates an entity owned by the returned guard, which destroys it on drop.
    pub fn spawn_owned(&mut self, name: &str) -> OwnedEntity<'_> {
        let entity = self.create_entity(name);
        OwnedEntity::new(self, entity)
    }

    /// Names of the components attached to `entity`.
    pub fn component_names(&self, entity: Entity) -> Vec<&'static str> {
        if !self.is_alive(entity) {
            return Vec::new();
        }
        self.components.component_names(entity.id())
    }

    pub(crate) fn storage(&self) -> &ComponentStorage {
        &self.components
    }

    pub(crate) fn storage_mut(&mut self) -> &mut ComponentStorage {
        &mut self.components
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Untitled Scene")
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("entities", &self.entities.len())
            .field("components", &self.components)
            .finish()
    }
}

#[cfg(test)]
mod tests;
