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

// Strata Sandbox
// Builds a small level, turns part of it into a prefab, stamps two copies and
// writes the result as a scene file.

use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use strata_core::asset::AssetUUID;
use strata_core::math::Vec3;
use strata_data::ecs::{
    CameraComponent, DirectionalLightComponent, MeshComponent, PointLightComponent,
    TransformComponent,
};
use strata_data::{Entity, Prefab, PrefabSerializer, Scene, SceneEvent, SceneSerializer};

const LAMP_MESH: AssetUUID = AssetUUID::from_u128(0x1a3f_0001);
const BULB_MESH: AssetUUID = AssetUUID::from_u128(0x1a3f_0002);

/// A lamp post with a bulb child carrying a point light.
fn build_lamp(scene: &mut Scene) -> Result<Entity> {
    let post = scene.create_entity("Lamp Post");
    scene.add_component(post, MeshComponent::new(LAMP_MESH));

    let bulb = scene.create_entity("Bulb");
    scene.add_component(bulb, MeshComponent::new(BULB_MESH));
    scene.add_component(bulb, PointLightComponent {
        radiance: Vec3::new(1.0, 0.85, 0.6),
        intensity: 4.0,
        ..Default::default()
    });
    if let Some(transform) = scene.get_component_mut::<TransformComponent>(bulb) {
        transform.position = Vec3::new(0.0, 3.2, 0.0);
    }
    scene.reparent(bulb, Some(post))?;
    Ok(post)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut level = Scene::new("Sandbox");
    let events = level.subscribe();

    let camera = level.create_entity("Main Camera");
    level.add_component(camera, CameraComponent::default());
    if let Some(transform) = level.get_component_mut::<TransformComponent>(camera) {
        transform.position = Vec3::new(0.0, 2.0, -8.0);
        transform.rotation = Vec3::new(10.0, 0.0, 0.0);
    }
    let sun = level.create_entity("Sun");
    level.add_component(sun, DirectionalLightComponent::default());

    let lamp = build_lamp(&mut level)?;
    let prefab = Prefab::from_entity(&level, lamp);
    level.destroy_hierarchy(lamp);

    for x in [-4.0, 4.0] {
        let copy = prefab.instantiate(&mut level);
        if let Some(transform) = level.get_component_mut::<TransformComponent>(copy) {
            transform.position = Vec3::new(x, 0.0, 0.0);
        }
    }

    let created = events
        .try_iter()
        .filter(|e| matches!(e, SceneEvent::EntityCreated { .. }))
        .count();
    log::info!("Scene '{}' holds {} entities ({created} created).", level.name(), level.len());

    let known_assets: HashSet<AssetUUID> =
        [LAMP_MESH, BULB_MESH, prefab.asset_id()].into_iter().collect();
    let report = level.link(&known_assets);
    if !report.is_clean() {
        bail!("sandbox scene has unresolved references: {report:?}");
    }

    let prefab_text = PrefabSerializer::new()
        .serialize(&prefab)
        .context("failed to serialize the lamp prefab")?;
    log::debug!("Lamp prefab:\n{prefab_text}");

    let serializer = SceneSerializer::new();
    let text = serializer
        .serialize(&level)
        .context("failed to serialize the sandbox scene")?;

    let (reloaded, load) = serializer.load(&text)?;
    if serializer.serialize(&reloaded)? != text {
        bail!("scene text changed across a save/load cycle");
    }
    log::info!("Reloaded {} entities; round trip is stable.", load.entities_loaded);

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, &text).with_context(|| format!("failed to write {path}"))?;
            log::info!("Scene written to {path}");
        }
        None => println!("{text}"),
    }
    Ok(())
}
