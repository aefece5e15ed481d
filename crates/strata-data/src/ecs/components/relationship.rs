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

use serde::{Deserialize, Serialize};
use strata_core::ecs::entity::EntityUuid;
use strata_macros::Component;

/// One node of the scene forest.
///
/// `parent` is [`EntityUuid::NIL`] for roots. `children` is ordered and that
/// order is preserved by serialization and prefab capture. Edges are stored as
/// UUIDs, so a relationship may point at an entity that is not loaded yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct RelationshipComponent {
    /// The parent's UUID, or nil.
    pub parent: EntityUuid,
    /// Child UUIDs in order.
    pub children: Vec<EntityUuid>,
}

impl RelationshipComponent {
    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_nil()
    }

    /// Appends `child` unless it is already listed.
    pub fn add_child(&mut self, child: EntityUuid) -> bool {
        if self.children.contains(&child) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Removes `child`, keeping the order of the others.
    pub fn remove_child(&mut self, child: EntityUuid) -> bool {
        let before = self.children.len();
        self.children.retain(|c| *c != child);
        self.children.len() != before
    }
}
