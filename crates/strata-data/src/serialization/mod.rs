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

//! Text persistence for scenes and prefab assets.
//!
//! Both formats are RON documents made of a small header followed by one
//! [`EntityRecord`] per entity. Records reference each other only through
//! UUIDs; nothing is resolved while reading. Once every record is loaded a
//! link pass reports references that point at nothing.

mod config;
mod error;
mod prefab;
mod record;
mod scene;

pub use config::SerializerConfig;
pub use error::SerializationError;
pub use prefab::{PrefabDocument, PrefabSerializer};
pub use record::EntityRecord;
pub use scene::{LoadReport, SceneDocument, SceneSerializer};

/// Highest format version this crate reads and the version it writes.
pub const FORMAT_VERSION: u32 = 1;

fn check_version(version: u32) {
    if version > FORMAT_VERSION {
        log::warn!(
            "Document format version {version} is newer than supported version {FORMAT_VERSION}; unknown data is ignored."
        );
    }
}
