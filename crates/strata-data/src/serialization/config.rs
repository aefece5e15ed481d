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

use ron::extensions::Extensions;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use super::SerializationError;

/// Output settings shared by the scene and prefab serializers.
///
/// Reading is unaffected by these settings: any document written with any
/// configuration loads the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Write one field per line. Compact single-line output otherwise.
    pub pretty: bool,
    /// Indentation unit for pretty output.
    pub indent: String,
    /// Prefix structs with their type name.
    pub struct_names: bool,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            struct_names: false,
        }
    }
}

impl SerializerConfig {
    /// Single-line output.
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }

    /// Parses a configuration from RON. Missing fields keep their defaults.
    pub fn from_ron(text: &str) -> Result<Self, SerializationError> {
        Ok(ron::from_str(text)?)
    }

    pub(super) fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub(super) fn encode<T: Serialize>(&self, value: &T) -> Result<String, SerializationError> {
        let options = Self::options();
        let text = if self.pretty {
            let pretty = PrettyConfig::default()
                .indentor(self.indent.clone())
                .struct_names(self.struct_names);
            options.to_string_pretty(value, pretty)?
        } else {
            options.to_string(value)?
        };
        Ok(text)
    }

    pub(super) fn decode<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, SerializationError> {
        Ok(Self::options().from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ron_keeps_defaults_for_missing_fields() {
        let config = SerializerConfig::from_ron("(pretty: false)").unwrap();
        assert!(!config.pretty);
        assert_eq!(config.indent, "  ");
        assert!(!config.struct_names);
    }

    #[test]
    fn test_from_ron_rejects_garbage() {
        assert!(matches!(
            SerializerConfig::from_ron("(pretty: "),
            Err(SerializationError::InvalidFormat(_))
        ));
    }
}
