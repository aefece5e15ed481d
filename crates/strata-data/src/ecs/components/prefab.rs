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
use strata_core::asset::AssetUUID;
use strata_macros::Component;

/// Marks an entity as produced from, or captured into, a prefab asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct PrefabComponent {
    /// The prefab asset the entity belongs to.
    pub asset_id: AssetUUID,
}

impl Default for PrefabComponent {
    fn default() -> Self {
        Self {
            asset_id: AssetUUID::NIL,
        }
    }
}
