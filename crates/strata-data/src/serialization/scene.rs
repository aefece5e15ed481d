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
use strata_core::asset::{AcceptAllAssets, AssetResolver};

use super::record::{capture_all, EntityRecord};
use super::{check_version, SerializationError, SerializerConfig, FORMAT_VERSION};
use crate::scene::{LinkReport, Scene};

/// The top-level shape of a scene file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    /// Format version the document was written with.
    pub version: u32,
    /// The scene name. A document without it describes no scene.
    pub scene: Option<String>,
    /// One record per entity, in slot order.
    pub entities: Vec<EntityRecord>,
}

/// What a load produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of entities created.
    pub entities_loaded: usize,
    /// References left unresolved after all records were loaded.
    pub link: LinkReport,
}

impl LoadReport {
    /// Returns `true` if every reference resolved.
    pub fn is_clean(&self) -> bool {
        self.link.is_clean()
    }
}

/// Writes scenes to text and reads them back.
#[derive(Debug, Clone, Default)]
pub struct SceneSerializer {
    config: SerializerConfig,
}

impl SceneSerializer {
    /// A serializer with the default (pretty) output settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A serializer with custom output settings.
    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// The output settings.
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Captures `scene` as a document without encoding it.
    pub fn to_document(&self, scene: &Scene) -> SceneDocument {
        SceneDocument {
            version: FORMAT_VERSION,
            scene: Some(scene.name().to_owned()),
            entities: capture_all(scene),
        }
    }

    /// Writes `scene` as text. Entities are written in slot order.
    pub fn serialize(&self, scene: &Scene) -> Result<String, SerializationError> {
        log::info!("Serializing scene '{}'", scene.name());
        let document = self.to_document(scene);
        log::debug!("Serialized {} entity records.", document.entities.len());
        self.config.encode(&document)
    }

    /// Loads the entities described by `text` into `scene`.
    ///
    /// Equivalent to [`deserialize_with_assets`](Self::deserialize_with_assets)
    /// with a resolver that knows every asset.
    pub fn deserialize(&self, text: &str, scene: &mut Scene) -> Result<LoadReport, SerializationError> {
        self.deserialize_with_assets(text, scene, &AcceptAllAssets)
    }

    /// Loads the entities described by `text` into `scene`, then links them.
    ///
    /// Empty text and documents without a `scene` key load nothing. Every
    /// record keeps its UUID. After all records exist, parent, child and asset
    /// references of the loaded entities are checked and the misses are
    /// returned in the report. Entities already in `scene` are not checked.
    /// The document's scene name is applied only when `scene` starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError::InvalidFormat`] if `text` is not a
    /// well-formed document. Nothing is loaded in that case.
    pub fn deserialize_with_assets(
        &self,
        text: &str,
        scene: &mut Scene,
        assets: &dyn AssetResolver,
    ) -> Result<LoadReport, SerializationError> {
        if text.trim().is_empty() {
            log::warn!("Scene text is empty; nothing to load.");
            return Ok(LoadReport::default());
        }

        let document: SceneDocument = SerializerConfig::decode(text)?;
        check_version(document.version);
        let Some(name) = document.scene else {
            log::warn!("Document has no 'scene' key; nothing to load.");
            return Ok(LoadReport::default());
        };

        log::info!("Deserializing scene '{name}'");
        if scene.is_empty() {
            scene.set_name(name);
        } else {
            log::debug!("Merging into non-empty scene '{}'; keeping its name.", scene.name());
        }
        let loaded: Vec<_> = document
            .entities
            .into_iter()
            .map(|record| record.spawn(scene))
            .collect();

        Ok(LoadReport {
            entities_loaded: loaded.len(),
            link: scene.link_entities(loaded, assets),
        })
    }

    /// Reads `text` into a new scene.
    pub fn load(&self, text: &str) -> Result<(Scene, LoadReport), SerializationError> {
        let mut scene = Scene::default();
        let report = self.deserialize(text, &mut scene)?;
        Ok((scene, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{CameraComponent, TagComponent};
    use strata_core::ecs::entity::EntityUuid;

    #[test]
    fn test_empty_text_loads_nothing() {
        let mut scene = Scene::new("target");
        let report = SceneSerializer::new().deserialize("   \n", &mut scene).unwrap();
        assert_eq!(report.entities_loaded, 0);
        assert!(scene.is_empty());
        assert_eq!(scene.name(), "target");
    }

    #[test]
    fn test_missing_scene_key_loads_nothing() {
        let text = r#"(version: 1, entities: [(entity: "00000000-0000-0000-0000-000000000001", tag: "x")])"#;
        let mut scene = Scene::new("target");
        let report = SceneSerializer::new().deserialize(text, &mut scene).unwrap();
        assert_eq!(report, LoadReport::default());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_malformed_text_is_an_error() {
        let mut scene = Scene::new("target");
        let result = SceneSerializer::new().deserialize("(scene: \"broken\", entities: [", &mut scene);
        assert!(matches!(result, Err(SerializationError::InvalidFormat(_))));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_unknown_keys_and_missing_blocks_are_tolerated() {
        let text = r#"(
            version: 1,
            scene: "Hand written",
            editor_camera: (x: 1),
            entities: [
                (entity: "00000000-0000-0000-0000-00000000000a", tag: "Cam", camera: (fov: 70.0), lightmap: 3),
                (entity: "00000000-0000-0000-0000-00000000000b"),
            ],
        )"#;
        let (scene, report) = SceneSerializer::new().load(text).unwrap();
        assert_eq!(report.entities_loaded, 2);
        assert!(report.is_clean());
        assert_eq!(scene.name(), "Hand written");

        let cam = scene.find_entity_by_uuid(EntityUuid::from_u128(0xa)).unwrap();
        let camera = scene.get_component::<CameraComponent>(cam).unwrap();
        assert_eq!(camera.fov, 70.0);
        assert_eq!(camera.near, CameraComponent::default().near);

        let other = scene.find_entity_by_uuid(EntityUuid::from_u128(0xb)).unwrap();
        assert_eq!(
            scene.get_component::<TagComponent>(other).map(|t| t.tag.as_str()),
            Some("Unnamed Entity")
        );
    }

    #[test]
    fn test_merge_keeps_name_and_links_only_loaded_entities() {
        let mut scene = Scene::new("existing");
        let orphan = scene.create_entity("orphan");
        scene
            .entity_mut(orphan)
            .unwrap()
            .set_parent(EntityUuid::from_u128(0xdead))
            .unwrap();
        assert_eq!(scene.link_hierarchy().unresolved_parents.len(), 1);

        let text = r#"(
            version: 1,
            scene: "Incoming",
            entities: [
                (entity: "00000000-0000-0000-0000-00000000000c", tag: "Loaded"),
            ],
        )"#;
        let report = SceneSerializer::new().deserialize(text, &mut scene).unwrap();
        assert_eq!(report.entities_loaded, 1);
        assert!(report.is_clean());
        assert_eq!(scene.name(), "existing");
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_compact_output_round_trips() {
        let mut scene = Scene::new("compact");
        scene.create_entity("a");
        let serializer = SceneSerializer::with_config(SerializerConfig::compact());
        let text = serializer.serialize(&scene).unwrap();
        assert!(!text.contains('\n'));

        let (loaded, _) = serializer.load(&text).unwrap();
        assert_eq!(serializer.serialize(&loaded).unwrap(), text);
    }
}
