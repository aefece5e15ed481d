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
use strata_macros::Component;

/// A perspective camera.
///
/// The projection matrix is built by the renderer from these values and the
/// viewport; only the parameters are stored here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct CameraComponent {
    /// Whether this is the camera the scene renders through.
    /// Only one camera should be main at a time.
    pub main_camera: bool,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Distance to the near clipping plane.
    pub near: f32,
    /// Distance to the far clipping plane.
    pub far: f32,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            main_camera: true,
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}
