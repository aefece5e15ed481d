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

//! Persistent asset identity and the narrow contract the scene graph consumes
//! from the asset system.
//!
//! Components never hold resource pointers. They store an [`AssetUUID`] and
//! leave loading and ownership of the resource to whoever implements
//! [`AssetResolver`].

mod uuid;

pub use self::uuid::*;

use std::collections::{BTreeSet, HashSet};

/// Answers whether an asset identifier refers to a known asset.
///
/// The scene graph only calls this during its link pass, after a scene or
/// prefab has been fully read, to report references that cannot be satisfied.
pub trait AssetResolver {
    /// Returns `true` if the asset system knows about `id`.
    fn contains(&self, id: AssetUUID) -> bool;
}

impl AssetResolver for HashSet<AssetUUID> {
    fn contains(&self, id: AssetUUID) -> bool {
        HashSet::contains(self, &id)
    }
}

impl AssetResolver for BTreeSet<AssetUUID> {
    fn contains(&self, id: AssetUUID) -> bool {
        BTreeSet::contains(self, &id)
    }
}

/// A resolver that accepts every asset. Useful when only the hierarchy matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllAssets;

impl AssetResolver for AcceptAllAssets {
    fn contains(&self, _id: AssetUUID) -> bool {
        true
    }
}
