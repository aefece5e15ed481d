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

//! Physics description components.
//!
//! These only describe bodies and shapes. Simulation belongs to the physics
//! backend, which reads them through `Scene::query`.

use serde::{Deserialize, Serialize};
use strata_core::math::Vec3;
use strata_macros::Component;

/// A simulated body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct RigidbodyComponent {
    /// Moved by the application rather than by the simulation.
    pub is_kinematic: bool,
    /// Use continuous collision detection.
    pub use_ccd: bool,
    /// Mass in kilograms.
    pub mass: f32,
}

impl Default for RigidbodyComponent {
    fn default() -> Self {
        Self {
            is_kinematic: false,
            use_ccd: false,
            mass: 1.0,
        }
    }
}

/// An axis-aligned box shape in local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct BoxColliderComponent {
    /// Half-size along each axis.
    pub extents: Vec3,
    /// Offset from the entity's origin.
    pub offset: Vec3,
    /// Report overlaps instead of colliding.
    pub is_trigger: bool,
}

impl Default for BoxColliderComponent {
    fn default() -> Self {
        Self {
            extents: Vec3::splat(0.5),
            offset: Vec3::ZERO,
            is_trigger: false,
        }
    }
}

/// A sphere shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct SphereColliderComponent {
    #[allow(missing_docs)]
    pub radius: f32,
    #[allow(missing_docs)]
    pub offset: Vec3,
    #[allow(missing_docs)]
    pub is_trigger: bool,
}

impl Default for SphereColliderComponent {
    fn default() -> Self {
        Self {
            radius: 0.5,
            offset: Vec3::ZERO,
            is_trigger: false,
        }
    }
}

/// A capsule shape aligned with the local Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct CapsuleColliderComponent {
    /// Radius of the hemispherical caps.
    pub radius: f32,
    /// Height of the cylindrical section.
    pub height: f32,
    /// Offset from the entity's origin.
    pub offset: Vec3,
    /// Report overlaps instead of colliding.
    pub is_trigger: bool,
}

impl Default for CapsuleColliderComponent {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.0,
            offset: Vec3::ZERO,
            is_trigger: false,
        }
    }
}

/// Surface response parameters shared by every collider on the entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct PhysicsMaterialComponent {
    #[allow(missing_docs)]
    pub static_friction: f32,
    #[allow(missing_docs)]
    pub dynamic_friction: f32,
    /// Bounciness in `[0, 1]`.
    pub restitution: f32,
}

impl Default for PhysicsMaterialComponent {
    fn default() -> Self {
        Self {
            static_friction: 0.6,
            dynamic_friction: 0.6,
            restitution: 0.0,
        }
    }
}
