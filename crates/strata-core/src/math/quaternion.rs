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

//! Provides a Quaternion type for representing 3D rotations.

use serde::{Deserialize, Serialize};
use std::ops::Mul;

use super::{Vec3, EPSILON};

/// Represents a unit quaternion rotation stored as `(x, y, z, w)`.
///
/// Scene components persist rotations as Euler angles; quaternions are
/// produced on demand for collaborators that need them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from its raw components.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion representing a rotation around `axis` by `angle_radians`.
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let axis = axis.normalize();
        let half = angle_radians * 0.5;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    /// Creates a quaternion from Euler angles in radians, applied X, then Y, then Z.
    pub fn from_euler(euler_radians: Vec3) -> Self {
        let qx = Self::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), euler_radians.x);
        let qy = Self::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), euler_radians.y);
        let qz = Self::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), euler_radians.z);
        (qz * qy * qx).normalize()
    }

    /// Calculates the squared magnitude of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Returns a unit-length copy, or the identity if the magnitude is degenerate.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude_squared().sqrt();
        if mag > EPSILON {
            let inv = 1.0 / mag;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Computes the conjugate, which is the inverse for unit quaternions.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotates a 3D vector by this quaternion.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let q_vec = Vec3::new(self.x, self.y, self.z);
        let t = q_vec.cross(v) * 2.0;
        v + t * self.w + q_vec.cross(t)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product: `self * rhs` applies `rhs` first, then `self`.
    fn mul(self, rhs: Self) -> Self {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{degrees_to_radians, PI};
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_about_y() {
        let q = Quaternion::from_axis_angle(Vec3::Y, PI / 2.0);
        let rotated = q.rotate_vec3(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(rotated.z, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_from_euler_single_axis_matches_axis_angle() {
        let euler = Vec3::new(0.0, degrees_to_radians(90.0), 0.0);
        let a = Quaternion::from_euler(euler);
        let b = Quaternion::from_axis_angle(Vec3::Y, PI / 2.0);
        assert_relative_eq!(a.x, b.x, epsilon = EPSILON);
        assert_relative_eq!(a.y, b.y, epsilon = EPSILON);
        assert_relative_eq!(a.z, b.z, epsilon = EPSILON);
        assert_relative_eq!(a.w, b.w, epsilon = EPSILON);
    }

    #[test]
    fn test_zero_euler_is_identity() {
        assert_eq!(Quaternion::from_euler(Vec3::ZERO), Quaternion::IDENTITY);
    }
}
