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

use thiserror::Error;

/// Errors raised while writing or reading scene and prefab documents.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The text is not a well-formed document.
    #[error("invalid document format: {0}")]
    InvalidFormat(#[from] ron::error::SpannedError),
    /// A value could not be encoded.
    #[error("failed to encode document: {0}")]
    Encode(#[from] ron::Error),
}
