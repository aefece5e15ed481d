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

//! The runtime component capability table.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use strata_core::asset::AssetUUID;
use strata_core::ecs::entity::EntityId;

use crate::ecs::components::register_engine_components;
use crate::ecs::{Component, ComponentStorage};

/// How the copy machinery treats a registered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentRole {
    /// The entity's persistent identity. Never copied: a copy gets a fresh one.
    Identity,
    /// Parent/children edges. Rewritten by the copy machinery, never copied raw.
    Hierarchy,
    /// Plain data, copied verbatim.
    Data,
}

/// Implemented by components that point at assets, so the link pass can check
/// them against an [`AssetResolver`](strata_core::asset::AssetResolver).
pub trait AssetReferences {
    /// Every non-nil asset referenced by this value.
    fn asset_references(&self) -> Vec<AssetUUID>;
}

type BoxedComponent = Box<dyn Any + Send + Sync>;
type CloneFn = fn(&ComponentStorage, EntityId) -> Option<BoxedComponent>;
type InsertFn = fn(&mut ComponentStorage, EntityId, BoxedComponent) -> bool;
type HasFn = fn(&ComponentStorage, EntityId) -> bool;
type AssetsFn = fn(&ComponentStorage, EntityId) -> Vec<AssetUUID>;

fn clone_component<T: Component + Clone>(
    storage: &ComponentStorage,
    id: EntityId,
) -> Option<BoxedComponent> {
    storage
        .get::<T>(id)
        .map(|value| Box::new(value.clone()) as BoxedComponent)
}

fn insert_component<T: Component>(
    storage: &mut ComponentStorage,
    id: EntityId,
    value: BoxedComponent,
) -> bool {
    match value.downcast::<T>() {
        Ok(value) => {
            storage.insert(id, *value);
            true
        }
        Err(_) => false,
    }
}

fn has_component<T: Component>(storage: &ComponentStorage, id: EntityId) -> bool {
    storage.contains::<T>(id)
}

fn component_assets<T: Component + AssetReferences>(
    storage: &ComponentStorage,
    id: EntityId,
) -> Vec<AssetUUID> {
    storage
        .get::<T>(id)
        .map(AssetReferences::asset_references)
        .unwrap_or_default()
}

/// One row of the capability table.
#[derive(Clone, Copy)]
pub struct ComponentInfo {
    type_id: TypeId,
    name: &'static str,
    role: ComponentRole,
    clone_fn: CloneFn,
    insert_fn: InsertFn,
    has_fn: HasFn,
    assets_fn: Option<AssetsFn>,
}

impl ComponentInfo {
    /// The `TypeId` of the component.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The component's stable name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How copies treat the component.
    pub fn role(&self) -> ComponentRole {
        self.role
    }

    /// Returns `true` if `id` has this component in `storage`.
    pub fn is_present(&self, storage: &ComponentStorage, id: EntityId) -> bool {
        (self.has_fn)(storage, id)
    }

    /// Returns `true` if this component can reference assets.
    pub fn references_assets(&self) -> bool {
        self.assets_fn.is_some()
    }
}

impl fmt::Debug for ComponentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInfo")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("references_assets", &self.assets_fn.is_some())
            .finish()
    }
}

/// A type-erased copy of one component value, ready to be inserted elsewhere.
pub struct ComponentValue {
    name: &'static str,
    insert_fn: InsertFn,
    value: BoxedComponent,
}

impl ComponentValue {
    /// The name of the captured component.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The copyable components of one entity, captured through the registry.
#[derive(Default)]
pub struct ComponentSnapshot {
    values: Vec<ComponentValue>,
}

impl ComponentSnapshot {
    /// Number of captured components.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the captured components in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentValue> + '_ {
        self.values.iter()
    }

    /// Inserts every captured value into `id`, replacing existing ones.
    /// Returns how many were inserted.
    pub fn apply(self, storage: &mut ComponentStorage, id: EntityId) -> usize {
        let mut inserted = 0;
        for ComponentValue { name, insert_fn, value } in self.values {
            if insert_fn(storage, id, value) {
                inserted += 1;
            } else {
                log::warn!("Captured value for '{name}' has an unexpected type; skipped.");
            }
        }
        inserted
    }
}

impl fmt::Debug for ComponentSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.values.iter().map(|v| v.name))
            .finish()
    }
}

/// The table of every component type the engine knows how to copy.
///
/// Each row carries type-erased clone and insert functions, so prefab capture
/// and entity duplication can copy "every component the entity has" without a
/// hard-coded type list.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: Vec<ComponentInfo>,
    index: HashMap<TypeId, usize>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry containing every engine component.
    pub fn engine() -> Self {
        let mut registry = Self::new();
        register_engine_components(&mut registry);
        log::debug!("Component registry built with {} entries.", registry.len());
        registry
    }

    /// The process-wide engine registry, built on first use.
    pub fn engine_shared() -> Arc<Self> {
        static ENGINE: OnceLock<Arc<ComponentRegistry>> = OnceLock::new();
        ENGINE.get_or_init(|| Arc::new(Self::engine())).clone()
    }

    fn push(&mut self, info: ComponentInfo) {
        if let Some(&slot) = self.index.get(&info.type_id) {
            log::warn!("Component '{}' registered twice; keeping the latest entry.", info.name);
            self.entries[slot] = info;
        } else {
            self.index.insert(info.type_id, self.entries.len());
            self.entries.push(info);
        }
    }

    /// Registers `T` with the given role.
    pub fn register<T: Component + Clone>(&mut self, role: ComponentRole) {
        self.push(ComponentInfo {
            type_id: TypeId::of::<T>(),
            name: T::NAME,
            role,
            clone_fn: clone_component::<T>,
            insert_fn: insert_component::<T>,
            has_fn: has_component::<T>,
            assets_fn: None,
        });
    }

    /// Registers `T` and records that its values reference assets.
    pub fn register_with_assets<T: Component + Clone + AssetReferences>(
        &mut self,
        role: ComponentRole,
    ) {
        self.push(ComponentInfo {
            type_id: TypeId::of::<T>(),
            name: T::NAME,
            role,
            clone_fn: clone_component::<T>,
            insert_fn: insert_component::<T>,
            has_fn: has_component::<T>,
            assets_fn: Some(component_assets::<T>),
        });
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `T` is registered.
    pub fn contains<T: Component>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<T>())
    }

    /// Looks up the row for `T`.
    pub fn info<T: Component>(&self) -> Option<&ComponentInfo> {
        self.index
            .get(&TypeId::of::<T>())
            .map(|&slot| &self.entries[slot])
    }

    /// Iterates over the rows in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentInfo> + '_ {
        self.entries.iter()
    }

    /// Clones every [`ComponentRole::Data`] component present on `id`.
    pub fn snapshot(&self, storage: &ComponentStorage, id: EntityId) -> ComponentSnapshot {
        let values = self
            .entries
            .iter()
            .filter(|info| info.role == ComponentRole::Data)
            .filter_map(|info| {
                (info.clone_fn)(storage, id).map(|value| ComponentValue {
                    name: info.name,
                    insert_fn: info.insert_fn,
                    value,
                })
            })
            .collect();
        ComponentSnapshot { values }
    }

    /// Collects every asset referenced by the components of `id`.
    pub fn asset_references(&self, storage: &ComponentStorage, id: EntityId) -> Vec<AssetUUID> {
        self.entries
            .iter()
            .filter_map(|info| info.assets_fn)
            .flat_map(|assets| assets(storage, id))
            .collect()
    }
}
