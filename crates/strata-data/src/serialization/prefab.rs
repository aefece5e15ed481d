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
use strata_core::ecs::entity::EntityUuid;

use super::record::{capture_all, EntityRecord};
use super::{check_version, SerializationError, SerializerConfig, FORMAT_VERSION};
use crate::prefab::Prefab;

/// The top-level shape of a prefab asset file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefabDocument {
    /// Format version the document was written with.
    pub version: u32,
    /// The prefab's asset id.
    pub prefab: Option<AssetUUID>,
    /// UUID of the template root.
    pub root: Option<EntityUuid>,
    /// The template entities, in slot order.
    pub entities: Vec<EntityRecord>,
}

/// Writes prefab assets to text and reads them back.
///
/// Template entities keep their UUIDs across a save/load cycle; fresh
/// identities are only handed out when the prefab is instantiated.
#[derive(Debug, Clone, Default)]
pub struct PrefabSerializer {
    config: SerializerConfig,
}

impl PrefabSerializer {
    /// A serializer with the default output settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A serializer with custom output settings.
    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Writes `prefab` as text.
    pub fn serialize(&self, prefab: &Prefab) -> Result<String, SerializationError> {
        let scene = prefab.scene();
        let document = PrefabDocument {
            version: FORMAT_VERSION,
            prefab: Some(prefab.asset_id()),
            root: prefab.root().and_then(|r| scene.uuid_of(r)),
            entities: capture_all(scene),
        };
        log::debug!(
            "Serializing prefab {} ({} entities).",
            prefab.asset_id(),
            document.entities.len()
        );
        self.config.encode(&document)
    }

    /// Reads a prefab asset. Empty text yields an empty prefab.
    ///
    /// A document without an asset id gets a fresh one.
    pub fn deserialize(&self, text: &str) -> Result<Prefab, SerializationError> {
        if text.trim().is_empty() {
            log::warn!("Prefab text is empty; returning an empty prefab.");
            return Ok(Prefab::new());
        }

        let document: PrefabDocument = SerializerConfig::decode(text)?;
        check_version(document.version);

        let mut prefab = match document.prefab {
            Some(asset_id) => Prefab::with_asset_id(asset_id),
            None => Prefab::new(),
        };
        log::info!("Deserializing prefab {}", prefab.asset_id());

        let scene = prefab.scene_mut();
        for record in document.entities {
            record.spawn(scene);
        }
        let report = scene.link_hierarchy();
        if !report.is_clean() {
            log::warn!(
                "Prefab {} has {} dangling hierarchy reference(s).",
                prefab.asset_id(),
                report.unresolved_count()
            );
        }

        let root = document.root.and_then(|uuid| prefab.scene().find_entity_by_uuid(uuid));
        prefab.set_root(root);
        Ok(prefab)
    }
}
