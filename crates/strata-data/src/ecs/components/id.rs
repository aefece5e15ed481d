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

/// The persistent identity of an entity.
///
/// Attached to every entity built through `Scene::create_entity`, and the only
/// value other components use to point at an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct IdComponent {
    /// The entity's UUID.
    pub id: EntityUuid,
}

impl IdComponent {
    /// Wraps an existing identity.
    pub fn new(id: EntityUuid) -> Self {
        Self { id }
    }
}
