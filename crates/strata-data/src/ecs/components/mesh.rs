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

/// Per-submesh material assignments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialRegistry {
    /// Material assets, indexed by submesh.
    pub assets: Vec<AssetUUID>,
}

impl MaterialRegistry {
    /// Returns the material bound to submesh `index`.
    pub fn get(&self, index: usize) -> Option<AssetUUID> {
        self.assets.get(index).copied()
    }

    /// Binds `material` to submesh `index`, growing the table with nil entries.
    pub fn set(&mut self, index: usize, material: AssetUUID) {
        if index >= self.assets.len() {
            self.assets.resize(index + 1, AssetUUID::NIL);
        }
        self.assets[index] = material;
    }
}

/// A renderable mesh reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct MeshComponent {
    /// The mesh asset.
    pub mesh: AssetUUID,
    /// Material overrides.
    pub materials: MaterialRegistry,
}

impl MeshComponent {
    /// A mesh with no material overrides.
    pub fn new(mesh: AssetUUID) -> Self {
        Self {
            mesh,
            materials: MaterialRegistry::default(),
        }
    }
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self::new(AssetUUID::NIL)
    }
}
