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

//! Deferred reference resolution.
//!
//! Loading a scene never resolves references while records are read: parent,
//! child and asset identities are stored as-is. The link pass runs once all
//! records exist and reports every reference that points at nothing.

use strata_core::asset::{AcceptAllAssets, AssetResolver, AssetUUID};
use strata_core::ecs::entity::EntityUuid;

use super::{Entity, Scene};
use crate::ecs::RelationshipComponent;

/// References left unresolved after loading. Pairs are `(owner, target)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Entities whose parent identity is not loaded.
    pub unresolved_parents: Vec<(EntityUuid, EntityUuid)>,
    /// Entities listing a child identity that is not loaded.
    pub unresolved_children: Vec<(EntityUuid, EntityUuid)>,
    /// `(parent, child)` edges where the child names a different parent.
    pub inconsistent_edges: Vec<(EntityUuid, EntityUuid)>,
    /// Entities referencing an asset the resolver does not know.
    pub unresolved_assets: Vec<(EntityUuid, AssetUUID)>,
}

impl LinkReport {
    /// Returns `true` if every reference resolved.
    pub fn is_clean(&self) -> bool {
        self.unresolved_count() == 0
    }

    /// Total number of problems recorded.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved_parents.len()
            + self.unresolved_children.len()
            + self.inconsistent_edges.len()
            + self.unresolved_assets.len()
    }
}

impl Scene {
    /// Checks hierarchy edges and asset references of every entity.
    pub fn link(&self, assets: &dyn AssetResolver) -> LinkReport {
        self.link_entities(self.iter_entities(), assets)
    }

    /// Checks hierarchy edges and asset references of `entities` only.
    ///
    /// References may point at any entity of the scene; only the owners are
    /// restricted. Dead handles are skipped.
    pub fn link_entities(
        &self,
        entities: impl IntoIterator<Item = Entity>,
        assets: &dyn AssetResolver,
    ) -> LinkReport {
        let mut report = LinkReport::default();

        for entity in entities.into_iter().filter(|&e| self.is_alive(e)) {
            let uuid = self.uuid_of(entity).unwrap_or(EntityUuid::NIL);

            if let Some(rel) = self.get_component::<RelationshipComponent>(entity) {
                if !rel.parent.is_nil() && self.find_entity_by_uuid(rel.parent).is_none() {
                    report.unresolved_parents.push((uuid, rel.parent));
                }
                for &child_uuid in &rel.children {
                    match self.find_entity_by_uuid(child_uuid) {
                        None => report.unresolved_children.push((uuid, child_uuid)),
                        Some(child) => {
                            let child_parent = self
                                .get_component::<RelationshipComponent>(child)
                                .map(|r| r.parent);
                            if child_parent != Some(uuid) {
                                report.inconsistent_edges.push((uuid, child_uuid));
                            }
                        }
                    }
                }
            }

            for asset in self.registry.asset_references(&self.components, entity.id()) {
                if !assets.contains(asset) {
                    report.unresolved_assets.push((uuid, asset));
                }
            }
        }

        if report.is_clean() {
            log::debug!("Scene '{}' linked cleanly.", self.name);
        } else {
            log::warn!(
                "Scene '{}' has {} unresolved reference(s) after linking.",
                self.name,
                report.unresolved_count()
            );
        }
        report
    }

    /// Checks hierarchy edges only; every asset is assumed to exist.
    pub fn link_hierarchy(&self) -> LinkReport {
        self.link(&AcceptAllAssets)
    }
}
