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

//! Light source components.
//!
//! Position and orientation come from the entity's `TransformComponent`.

use serde::{Deserialize, Serialize};
use strata_core::math::Vec3;
use strata_macros::Component;

/// An infinitely distant light, such as the sun.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct DirectionalLightComponent {
    /// Linear RGB color.
    pub radiance: Vec3,
    /// Brightness multiplier.
    pub intensity: f32,
    /// Whether the light casts shadows.
    pub cast_shadows: bool,
}

impl Default for DirectionalLightComponent {
    fn default() -> Self {
        Self {
            radiance: Vec3::ONE,
            intensity: 1.0,
            cast_shadows: true,
        }
    }
}

/// A light emitting in every direction from a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct PointLightComponent {
    /// Linear RGB color.
    pub radiance: Vec3,
    /// Brightness multiplier.
    pub intensity: f32,
    /// Distance beyond which the light has no effect.
    pub radius: f32,
    /// Attenuation exponent.
    pub falloff: f32,
}

impl Default for PointLightComponent {
    fn default() -> Self {
        Self {
            radiance: Vec3::ONE,
            intensity: 1.0,
            radius: 10.0,
            falloff: 1.0,
        }
    }
}

/// Environment lighting, either from a procedural sky or a static map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct SkylightComponent {
    /// Use the procedural sky model.
    pub dynamic_sky: bool,
    /// Atmospheric turbidity of the sky model.
    pub turbidity: f32,
    /// Sun azimuth in degrees.
    pub azimuth: f32,
    /// Sun inclination in degrees.
    pub inclination: f32,
}

impl Default for SkylightComponent {
    fn default() -> Self {
        Self {
            dynamic_sky: true,
            turbidity: 2.0,
            azimuth: 0.0,
            inclination: 0.0,
        }
    }
}
