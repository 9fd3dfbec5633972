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

//! Engine-wide settings consumed by every render node.

use crate::error::ConfigError;
use crate::frame_lod::MAX_LOD_COUNT;
use serde::{Deserialize, Serialize};

/// Global knobs shared by all render nodes of a scene.
///
/// Missing fields in a settings document fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderNodeSettings {
    /// View distance given to freshly created render options, in meters.
    pub default_max_view_distance: f32,
    /// Whether LOD transitions cross-fade.
    pub dissolve_enabled: bool,
    /// Lower bound of the cross-fade band, in meters.
    pub dissolve_distance_min: f32,
    /// Upper bound of the cross-fade band, in meters.
    pub dissolve_distance_max: f32,
    /// Number of LOD levels a node may pick from.
    pub max_lod_count: u32,
}

impl Default for RenderNodeSettings {
    fn default() -> Self {
        Self {
            default_max_view_distance: 8000.0,
            dissolve_enabled: true,
            dissolve_distance_min: 2.0,
            dissolve_distance_max: 7.5,
            max_lod_count: MAX_LOD_COUNT as u32,
        }
    }
}

impl RenderNodeSettings {
    /// Parses settings from a RON document.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let settings: Self = ron::de::from_str(source)?;
        Ok(settings.validated())
    }

    /// The LOD count, capped to what a node can track.
    pub fn lod_count(&self) -> usize {
        (self.max_lod_count as usize).clamp(1, MAX_LOD_COUNT)
    }

    fn validated(mut self) -> Self {
        if self.dissolve_distance_min > self.dissolve_distance_max {
            log::warn!(
                "Dissolve distance min ({}) is above max ({}); swapping them.",
                self.dissolve_distance_min,
                self.dissolve_distance_max
            );
            std::mem::swap(
                &mut self.dissolve_distance_min,
                &mut self.dissolve_distance_max,
            );
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let settings = RenderNodeSettings::from_ron_str("(dissolve_enabled: false)").unwrap();
        assert!(!settings.dissolve_enabled);
        assert_eq!(settings.dissolve_distance_min, 2.0);
        assert_eq!(settings.max_lod_count, 6);
    }

    #[test]
    fn inverted_dissolve_band_is_swapped() {
        let settings = RenderNodeSettings::from_ron_str(
            "(dissolve_distance_min: 10.0, dissolve_distance_max: 3.0)",
        )
        .unwrap();
        assert_eq!(settings.dissolve_distance_min, 3.0);
        assert_eq!(settings.dissolve_distance_max, 10.0);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = RenderNodeSettings::from_ron_str("(max_lod_count: \"six\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn lod_count_is_capped() {
        let settings = RenderNodeSettings {
            max_lod_count: 40,
            ..Default::default()
        };
        assert_eq!(settings.lod_count(), MAX_LOD_COUNT);
    }
}
