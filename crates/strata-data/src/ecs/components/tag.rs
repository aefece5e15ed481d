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

/// The display name given to entities created with an empty name.
pub const UNNAMED_ENTITY: &str = "Unnamed Entity";

/// A human-readable name. Not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Component)]
#[serde(default)]
pub struct TagComponent {
    /// The name shown in editors and logs.
    pub tag: String,
}

impl TagComponent {
    /// Creates a tag, substituting [`UNNAMED_ENTITY`] for an empty name.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if tag.is_empty() {
            Self::default()
        } else {
            Self { tag }
        }
    }
}

impl Default for TagComponent {
    fn default() -> Self {
        Self {
            tag: UNNAMED_ENTITY.to_owned(),
        }
    }
}
