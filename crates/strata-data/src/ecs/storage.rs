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

//! Type-erased, per-type sparse-set component storage.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::mem;

use strata_core::ecs::entity::EntityId;

use crate::ecs::Component;

/// Dense storage for one component type, indexed sparsely by entity slot.
///
/// `sparse[slot]` holds the position of the slot's component inside `dense`.
/// `owners[i]` is the full `EntityId` (with generation) that owns `dense[i]`,
/// so a stale handle never reads a recycled slot's data.
#[derive(Debug)]
pub struct SparseSet<T> {
    sparse: Vec<Option<u32>>,
    dense: Vec<T>,
    owners: Vec<EntityId>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            owners: Vec::new(),
        }
    }
}

impl<T> SparseSet<T> {
    fn dense_index(&self, id: EntityId) -> Option<usize> {
        let dense = (*self.sparse.get(id.index as usize)?)? as usize;
        (self.owners[dense] == id).then_some(dense)
    }

    /// Inserts or replaces the value for `id`, returning its dense row and the
    /// previous value.
    fn insert_at(&mut self, id: EntityId, value: T) -> (usize, Option<T>) {
        let slot = id.index as usize;
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, None);
        }

        match self.sparse[slot] {
            Some(dense) if self.owners[dense as usize] == id => {
                let dense = dense as usize;
                (dense, Some(mem::replace(&mut self.dense[dense], value)))
            }
            Some(dense) => {
                // Row left behind by an older generation of this slot.
                let dense = dense as usize;
                self.owners[dense] = id;
                self.dense[dense] = value;
                (dense, None)
            }
            None => {
                let dense = self.dense.len();
                self.sparse[slot] = Some(dense as u32);
                self.dense.push(value);
                self.owners.push(id);
                (dense, None)
            }
        }
    }

    /// Inserts or replaces the value for `id`, returning the previous value.
    pub fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        self.insert_at(id, value).1
    }

    /// Inserts or replaces the value for `id` and returns the stored value.
    pub fn emplace(&mut self, id: EntityId, value: T) -> &mut T {
        let (dense, _) = self.insert_at(id, value);
        &mut self.dense[dense]
    }

    /// Returns the value for `id`, inserting `f()` first if there is none.
    pub fn get_or_insert_with(&mut self, id: EntityId, f: impl FnOnce() -> T) -> &mut T {
        let dense = match self.dense_index(id) {
            Some(dense) => dense,
            None => self.insert_at(id, f()).0,
        };
        &mut self.dense[dense]
    }

    /// Returns a reference to the value for `id`.
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.dense_index(id).map(|i| &self.dense[i])
    }

    /// Returns a mutable reference to the value for `id`.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.dense_index(id).map(move |i| &mut self.dense[i])
    }

    /// Returns `true` if `id` has a value in this set.
    pub fn contains(&self, id: EntityId) -> bool {
        self.dense_index(id).is_some()
    }

    /// Removes and returns the value for `id`.
    ///
    /// The last row is swapped into the hole, so iteration order is not stable
    /// across removals.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let dense = self.dense_index(id)?;
        self.sparse[id.index as usize] = None;

        let value = self.dense.swap_remove(dense);
        self.owners.swap_remove(dense);
        if let Some(moved) = self.owners.get(dense) {
            self.sparse[moved.index as usize] = Some(dense as u32);
        }
        Some(value)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns `true` if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Iterates over `(owner, value)` pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> + '_ {
        self.owners.iter().copied().zip(self.dense.iter())
    }
}

/// An internal helper trait to operate on a `SparseSet<T>` without knowing `T`.
trait AnyStore: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn remove_entity(&mut self, id: EntityId) -> bool;
    fn contains_entity(&self, id: EntityId) -> bool;
    fn component_name(&self) -> &'static str;
}

impl<T: Component> AnyStore for SparseSet<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove_entity(&mut self, id: EntityId) -> bool {
        self.remove(id).is_some()
    }

    fn contains_entity(&self, id: EntityId) -> bool {
        self.contains(id)
    }

    fn component_name(&self) -> &'static str {
        T::NAME
    }
}

/// Heterogeneous component table for one scene: one [`SparseSet`] per
/// component type, created lazily on first insertion.
#[derive(Default)]
pub struct ComponentStorage {
    stores: HashMap<TypeId, Box<dyn AnyStore>>,
}

impl ComponentStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set for `T`, if any value of `T` was ever stored.
    pub fn store<T: Component>(&self) -> Option<&SparseSet<T>> {
        self.stores
            .get(&TypeId::of::<T>())
            .and_then(|store| store.as_any().downcast_ref::<SparseSet<T>>())
    }

    fn store_mut<T: Component>(&mut self) -> Option<&mut SparseSet<T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|store| store.as_any_mut().downcast_mut::<SparseSet<T>>())
    }

    fn store_or_insert<T: Component>(&mut self) -> &mut SparseSet<T> {
        self.stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseSet::<T>::default()))
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
            .expect("component store registered under a foreign TypeId")
    }

    /// Inserts or replaces the `T` of `id`, returning the previous value.
    pub fn insert<T: Component>(&mut self, id: EntityId, value: T) -> Option<T> {
        self.store_or_insert::<T>().insert(id, value)
    }

    /// Inserts or replaces the `T` of `id` and returns the stored value.
    pub fn emplace<T: Component>(&mut self, id: EntityId, value: T) -> &mut T {
        self.store_or_insert::<T>().emplace(id, value)
    }

    /// Returns the `T` of `id`, inserting `f()` first if there is none.
    pub fn get_or_insert_with<T: Component>(
        &mut self,
        id: EntityId,
        f: impl FnOnce() -> T,
    ) -> &mut T {
        self.store_or_insert::<T>().get_or_insert_with(id, f)
    }

    /// Returns the `T` of `id`.
    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        self.store::<T>()?.get(id)
    }

    /// Returns the `T` of `id` mutably.
    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        self.store_mut::<T>()?.get_mut(id)
    }

    /// Returns `true` if `id` has a `T`.
    pub fn contains<T: Component>(&self, id: EntityId) -> bool {
        self.store::<T>().is_some_and(|s| s.contains(id))
    }

    /// Removes and returns the `T` of `id`.
    pub fn remove<T: Component>(&mut self, id: EntityId) -> Option<T> {
        self.store_mut::<T>()?.remove(id)
    }

    /// Removes every component of `id`. Returns how many were removed.
    pub fn remove_all(&mut self, id: EntityId) -> usize {
        self.stores
            .values_mut()
            .filter_map(|store| store.remove_entity(id).then_some(()))
            .count()
    }

    /// Names of the components attached to `id`, sorted for stable output.
    pub fn component_names(&self, id: EntityId) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .stores
            .values()
            .filter(|store| store.contains_entity(id))
            .map(|store| store.component_name())
            .collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ComponentStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.stores.values().map(|s| s.component_name()).collect();
        names.sort_unstable();
        f.debug_struct("ComponentStorage")
            .field("component_types", &names)
            .finish()
    }
}
