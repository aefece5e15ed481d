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
use strata_core::math::{degrees_to_radians, radians_to_degrees, Quaternion, Vec3};
use strata_macros::Component;

/// Local position, rotation and scale of an entity relative to its parent.
///
/// `rotation` holds Euler angles in **degrees**, applied X, then Y, then Z.
/// That is the unit written to scene files, so a save/load cycle reproduces
/// the exact same bits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct TransformComponent {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    /// Non-uniform scale.
    pub scale: Vec3,
}

impl TransformComponent {
    /// Creates a transform at `position` with no rotation and unit scale.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Rotation as Euler angles in radians.
    pub fn rotation_radians(&self) -> Vec3 {
        self.rotation.map(degrees_to_radians)
    }

    /// Sets the rotation from Euler angles in radians.
    pub fn set_rotation_radians(&mut self, euler: Vec3) {
        self.rotation = euler.map(radians_to_degrees);
    }

    /// Rotation as a unit quaternion.
    pub fn orientation(&self) -> Quaternion {
        Quaternion::from_euler(self.rotation_radians())
    }

    /// Transforms a point from this entity's local space into its parent's.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let scaled = Vec3::new(
            point.x * self.scale.x,
            point.y * self.scale.y,
            point.z * self.scale.z,
        );
        self.orientation().rotate_vec3(scaled) + self.position
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_core::math::EPSILON;

    #[test]
    fn test_radian_accessors() {
        let mut t = TransformComponent::default();
        t.set_rotation_radians(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        assert_relative_eq!(t.rotation.y, 90.0, epsilon = 1e-4);
        assert_relative_eq!(
            t.rotation_radians().y,
            std::f32::consts::FRAC_PI_2,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_transform_point() {
        let t = TransformComponent {
            position: Vec3::new(0.0, 1.0, 0.0),
            rotation: Vec3::new(0.0, 90.0, 0.0),
            scale: Vec3::splat(2.0),
        };
        let p = t.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-4);
        assert_relative_eq!(p.z, -2.0, epsilon = 1e-4);
    }
}
