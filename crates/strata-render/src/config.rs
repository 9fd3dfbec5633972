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

//! Persisted per-entity mesh configuration.

use crate::{error::ConfigError, geometry::MeshKind, render_options::RenderOptions};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use strata_core::asset::{AssetId, AssetLoadBehavior};

/// What is saved with an entity's mesh: the asset, the material override,
/// visibility, the mesh kind and the user-set render options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshRenderConfig {
    pub mesh_asset: Option<AssetId>,
    pub load_behavior: AssetLoadBehavior,
    pub material_override: Option<String>,
    pub visible: bool,
    pub kind: MeshKind,
    pub render_options: RenderOptions,
}

impl Default for MeshRenderConfig {
    fn default() -> Self {
        Self {
            mesh_asset: None,
            load_behavior: AssetLoadBehavior::default(),
            material_override: None,
            visible: true,
            kind: MeshKind::default(),
            render_options: RenderOptions::default(),
        }
    }
}

impl MeshRenderConfig {
    /// Writes the configuration as pretty-printed RON.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    /// Reads a configuration from RON. Missing fields take their defaults.
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::de::from_str(source)?)
    }
}
