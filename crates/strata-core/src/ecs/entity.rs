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

//! Defines core types related to entities in the ECS architecture.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A transient identifier for an entity slot inside one scene's storage.
///
/// It combines an index with a generation count to solve the "ABA problem".
/// When an entity is destroyed, its index can be recycled for a new entity,
/// but the generation is incremented. This ensures that old `EntityId` handles
/// pointing to a recycled index become invalid and cannot accidentally affect
/// the new entity.
///
/// An `EntityId` is never persisted; use [`EntityUuid`] for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    /// The index of the entity's slot in the scene's entity store.
    pub index: u32,
    /// A generation counter that is incremented each time the index is recycled.
    pub generation: u32,
}

/// The stable identity of an entity.
///
/// Unlike [`EntityId`], this value survives serialization round trips and is
/// how relationships and cross-references are expressed. Fresh values are
/// random (version 4), so an identity is never handed out twice within a run.
///
/// [`EntityUuid::NIL`] means "no entity" and is what a root entity stores as
/// its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityUuid(Uuid);

impl EntityUuid {
    /// The nil identity.
    pub const NIL: EntityUuid = EntityUuid(Uuid::nil());

    /// Generates a fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Builds an identity from a raw 128-bit value.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Returns the raw 128-bit value.
    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    /// Returns `true` for [`EntityUuid::NIL`].
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for EntityUuid {
    /// Defaults to [`EntityUuid::NIL`] so that a default relationship has no parent.
    fn default() -> Self {
        Self::NIL
    }
}

impl fmt::Display for EntityUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for EntityUuid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fresh_uuids_are_distinct_and_not_nil() {
        let ids: HashSet<EntityUuid> = (0..1000).map(|_| EntityUuid::new()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(!ids.contains(&EntityUuid::NIL));
    }

    #[test]
    fn test_default_is_nil() {
        assert!(EntityUuid::default().is_nil());
        assert_eq!(EntityUuid::from_u128(0), EntityUuid::NIL);
        assert_eq!(EntityUuid::from_u128(42).as_u128(), 42);
    }
}
