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

//! Entity slot allocation and generation tracking.

use strata_core::ecs::entity::EntityId;

/// Manager for entity slots.
///
/// The `EntityStore` maintains a dense list of slot handles and whether each
/// slot is currently alive. It handles slot creation and recycling of indices
/// via a free list. Destroying a slot bumps its generation on reuse, so stale
/// [`EntityId`]s never alias a newer entity.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    /// Every slot that has ever been created, with its current `EntityId`
    /// (including generation) and a liveness flag.
    slots: Vec<(EntityId, bool)>,
    /// Slot indices available for reuse.
    freed: Vec<u32>,
    /// Number of live slots.
    alive: usize,
}

impl EntityStore {
    /// Creates a new, empty `EntityStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new or recycled `EntityId`.
    ///
    /// If there are indices in the free list, one is popped and its generation
    /// is incremented. Otherwise, a new slot is appended.
    pub fn create(&mut self) -> EntityId {
        self.alive += 1;
        if let Some(index) = self.freed.pop() {
            let (id_slot, alive) = &mut self.slots[index as usize];
            id_slot.generation += 1;
            *alive = true;
            *id_slot
        } else {
            let index = self.slots.len() as u32;
            let new_id = EntityId {
                index,
                generation: 0,
            };
            self.slots.push((new_id, true));
            new_id
        }
    }

    /// Frees the slot for `id`. Returns `false` if `id` is not alive.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.slots[id.index as usize].1 = false;
        self.freed.push(id.index);
        self.alive -= 1;
        true
    }

    /// Returns `true` if `id` refers to a live slot of the same generation.
    pub fn is_alive(&self, id: EntityId) -> bool {
        matches!(
            self.slots.get(id.index as usize),
            Some((slot_id, true)) if slot_id.generation == id.generation
        )
    }

    /// Number of live slots.
    pub fn len(&self) -> usize {
        self.alive
    }

    /// Returns `true` if no slot is alive.
    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    /// Iterates over live slots in slot-index order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .filter(|(_, alive)| *alive)
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recycling_bumps_generation() {
        let mut store = EntityStore::new();
        let first = store.create();
        assert_eq!(first, EntityId { index: 0, generation: 0 });

        assert!(store.destroy(first));
        assert!(!store.is_alive(first));
        assert!(!store.destroy(first), "double destroy must be rejected");

        let second = store.create();
        assert_eq!(second.index, 0);
        assert_eq!(second.generation, 1);
        assert!(store.is_alive(second));
        assert!(!store.is_alive(first), "stale handle must stay dead");
    }

    #[test]
    fn test_iter_skips_dead_slots() {
        let mut store = EntityStore::new();
        let a = store.create();
        let b = store.create();
        let c = store.create();
        store.destroy(b);

        assert_eq!(store.iter().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(store.len(), 2);
    }
}
