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

//! Per-frame and per-mesh LOD metrics.

/// Number of LOD levels a geometry may carry.
pub const MAX_LOD_COUNT: usize = 6;

/// Frame-global LOD parameters published by the renderer.
///
/// `id` changes whenever any other field changes, which lets nodes cache the
/// values they derive from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLodInfo {
    /// Revision of these parameters.
    pub id: u32,
    /// Global multiplier applied on top of each node's own ratio.
    pub lod_ratio: f32,
    /// Size, in screen units, a LOD should cover before switching.
    pub target_size: f32,
    /// Finest LOD the renderer allows this frame.
    pub min_lod: u8,
    /// Coarsest LOD the renderer allows this frame.
    pub max_lod: u8,
}

impl Default for FrameLodInfo {
    fn default() -> Self {
        Self {
            id: 0,
            lod_ratio: 1.0,
            target_size: 1.0,
            min_lod: 0,
            max_lod: MAX_LOD_COUNT as u8,
        }
    }
}

impl FrameLodInfo {
    /// Returns a copy whose target size is usable as a divisor.
    pub fn sanitized(mut self) -> Self {
        if self.target_size.is_nan() || self.target_size <= 0.0 {
            log::warn!(
                "Frame LOD target size must be positive (got {}); using 1.0.",
                self.target_size
            );
            self.target_size = 1.0;
        }
        if self.min_lod > self.max_lod {
            self.min_lod = self.max_lod;
        }
        self
    }
}

/// A size metric for one sub-mesh or a merged set of them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshLodInfo {
    /// Geometric mean of the triangle areas.
    pub geometric_mean: f32,
    /// Number of faces the mean was taken over.
    pub face_count: u32,
}

impl MeshLodInfo {
    /// Creates a new metric.
    pub const fn new(geometric_mean: f32, face_count: u32) -> Self {
        Self {
            geometric_mean,
            face_count,
        }
    }

    /// Folds `other` into `self`, weighting each mean by its face count.
    ///
    /// Non-positive means carry no information and are skipped.
    pub fn merge(&mut self, other: &MeshLodInfo) {
        if !other.is_usable() {
            return;
        }
        if !self.is_usable() {
            *self = *other;
            return;
        }

        let total = self.face_count + other.face_count;
        let log_sum = self.geometric_mean.ln() * self.face_count as f32
            + other.geometric_mean.ln() * other.face_count as f32;
        self.geometric_mean = (log_sum / total as f32).exp();
        self.face_count = total;
    }

    fn is_usable(&self) -> bool {
        self.geometric_mean > 0.0 && self.face_count > 0
    }

    /// Merges a list of metrics into one.
    pub fn merged<'a>(infos: impl IntoIterator<Item = &'a MeshLodInfo>) -> MeshLodInfo {
        infos.into_iter().fold(MeshLodInfo::default(), |mut acc, info| {
            acc.merge(info);
            acc
        })
    }
}
