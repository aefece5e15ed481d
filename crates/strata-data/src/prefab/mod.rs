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

//! Prefabs: reusable entity subtrees stored in a private scene.
//!
//! A [`Prefab`] captures an entity and its descendants into a template scene
//! it owns, then stamps copies of that template into other scenes. Every
//! capture and every instance gets fresh identities, and the template is never
//! modified by instantiation.

use strata_core::asset::AssetUUID;
use strata_core::ecs::entity::EntityUuid;

use crate::ecs::{PrefabComponent, RelationshipComponent};
use crate::scene::{Entity, Scene, SubtreeSnapshot};

const PREFAB_SCENE_NAME: &str = "Prefab scene";

/// A reusable template of entities.
#[derive(Debug)]
pub struct Prefab {
    asset_id: AssetUUID,
    scene: Scene,
    root: Option<Entity>,
}

impl Prefab {
    /// Creates an empty prefab with a fresh asset id.
    pub fn new() -> Self {
        Self::with_asset_id(AssetUUID::new())
    }

    /// Creates an empty prefab identified by `asset_id`.
    pub fn with_asset_id(asset_id: AssetUUID) -> Self {
        Self {
            asset_id,
            scene: Scene::new(PREFAB_SCENE_NAME),
            root: None,
        }
    }

    /// Creates a prefab by capturing `entity` and its descendants.
    pub fn from_entity(source: &Scene, entity: Entity) -> Self {
        let mut prefab = Self::new();
        prefab.create_from_entity(source, entity);
        prefab
    }

    /// The asset this prefab is stored as.
    pub fn asset_id(&self) -> AssetUUID {
        self.asset_id
    }

    /// The template scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The template scene, for editing or loading.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The template root recorded by the last capture or load.
    pub fn root(&self) -> Option<Entity> {
        self.root
    }

    /// Records `root` as the template root.
    ///
    /// The handle must belong to [`Prefab::scene`]; a handle from any other
    /// scene is ignored with a warning.
    pub fn set_root(&mut self, root: Option<Entity>) {
        match root {
            Some(entity) if !self.scene.is_alive(entity) => {
                log::warn!("Prefab {}: ignoring root {entity:?} from another scene.", self.asset_id);
            }
            _ => self.root = root,
        }
    }

    /// Replaces the template with a copy of `entity` and its descendants.
    ///
    /// The source scene is only read. Every captured entity gets a fresh UUID
    /// and a `PrefabComponent` naming this prefab. Returns the template root,
    /// or `None` (with an empty template) if `entity` is not alive in `source`.
    pub fn create_from_entity(&mut self, source: &Scene, entity: Entity) -> Option<Entity> {
        self.scene = Scene::with_registry(PREFAB_SCENE_NAME, source.registry().clone());
        self.root = None;

        let Some(snapshot) = SubtreeSnapshot::capture(source, entity) else {
            log::warn!("Prefab {}: source entity {entity:?} is not alive; template left empty.", self.asset_id);
            return None;
        };
        let captured = snapshot.len();
        let source_root = snapshot.source_root();

        let asset_id = self.asset_id;
        let created = snapshot.spawn(&mut self.scene, |e| {
            e.insert(PrefabComponent { asset_id });
        });
        self.root = created.first().copied();

        log::debug!(
            "Prefab {}: captured {captured} entities from {:?}.",
            self.asset_id,
            source_root.unwrap_or(EntityUuid::NIL)
        );
        self.root
    }

    /// The template entity instances are built from: the first parentless
    /// entity in slot order, else the recorded root.
    fn template_root(&self) -> Option<Entity> {
        self.scene
            .iter_entities()
            .find(|&e| {
                self.scene
                    .get_component::<RelationshipComponent>(e)
                    .is_some_and(RelationshipComponent::is_root)
            })
            .or(self.root.filter(|&r| self.scene.is_alive(r)))
    }

    /// Stamps a copy of the template into `target` and returns its root.
    ///
    /// The copy has fresh UUIDs, a `PrefabComponent` on every entity, and the
    /// template's shape and child order. An empty prefab yields a single
    /// entity with the mandatory components and a `PrefabComponent`. The
    /// template itself is not modified.
    pub fn instantiate(&self, target: &mut Scene) -> Entity {
        let asset_id = self.asset_id;
        let snapshot = self
            .template_root()
            .and_then(|root| SubtreeSnapshot::capture(&self.scene, root));

        let Some(snapshot) = snapshot else {
            log::debug!("Prefab {asset_id}: no template, instantiating an empty entity.");
            let entity = target.create_entity("");
            target.insert_component(entity, PrefabComponent { asset_id });
            return entity;
        };

        let created = snapshot.spawn(target, |e| {
            e.insert(PrefabComponent { asset_id });
        });
        log::trace!("Prefab {asset_id}: instantiated {} entities.", created.len());
        match created.first() {
            Some(&root) => root,
            None => {
                let entity = target.create_entity("");
                target.insert_component(entity, PrefabComponent { asset_id });
                entity
            }
        }
    }
}

impl Default for Prefab {
    fn default() -> Self {
        Self::new()
    }
}
