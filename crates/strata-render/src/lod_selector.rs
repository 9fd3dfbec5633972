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

//! Distance-based level-of-detail selection with cross-fading.
//!
//! A node derives a base switching distance once per bound geometry, and a
//! scale factor from its own LOD ratio and the frame-global target size. LOD
//! `i` is left behind at `base * scale * (i + 1)` meters. Near a switch the
//! current LOD dissolves into the next one over a band whose width depends on
//! the node's view distance.

use crate::{
    frame_lod::{FrameLodInfo, MAX_LOD_COUNT},
    geometry::MeshGeometry,
    settings::RenderNodeSettings,
};
use strata_core::math::{clamp, saturate};

/// Result of a LOD query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LodValue {
    /// LOD to draw.
    pub lod: u8,
    /// Cross-fade towards `next_lod`, 0 (none) to 255 (complete).
    pub dissolve_ratio: u8,
    /// LOD being faded in, if any.
    pub next_lod: Option<u8>,
}

impl LodValue {
    /// A plain draw of `lod`.
    pub const fn single(lod: u8) -> Self {
        Self {
            lod,
            dissolve_ratio: 0,
            next_lod: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaleKey {
    frame_id: u32,
    target_size: f32,
    frame_ratio: f32,
    lod_ratio: u32,
}

/// Picks LODs for one node.
#[derive(Debug, Clone, Default)]
pub struct LodSelector {
    base_lod_distance: f32,
    scale: f32,
    lod_ratio: u32,
    key: Option<ScaleKey>,
}

impl LodSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_lod_distance(&self) -> f32 {
        self.base_lod_distance
    }

    /// Factor turning the base distance into meters for this node.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Derives the base distance from newly bound geometry and rescales.
    ///
    /// The base is the square root of the geometry's geometric mean, or the
    /// radius of its bounds when `bounds_based` is set or the metric is empty.
    pub fn update_lod_distance(
        &mut self,
        geometry: &MeshGeometry,
        bounds_based: bool,
        lod_ratio: u32,
        frame: &FrameLodInfo,
    ) {
        let mean = geometry.lod_info().geometric_mean;
        self.base_lod_distance = if !bounds_based && mean > 0.0 {
            mean.sqrt()
        } else {
            let radius = geometry.local_aabb.radius();
            if radius.is_finite() {
                radius
            } else {
                0.0
            }
        };
        self.key = None;
        self.sync(lod_ratio, frame);
        log::debug!(
            "LOD base distance {} (scale {}).",
            self.base_lod_distance,
            self.scale
        );
    }

    /// Recomputes the scale if the ratio or the frame parameters changed.
    ///
    /// Returns `true` when a recomputation happened.
    pub fn sync(&mut self, lod_ratio: u32, frame: &FrameLodInfo) -> bool {
        let key = ScaleKey {
            frame_id: frame.id,
            target_size: frame.target_size,
            frame_ratio: frame.lod_ratio,
            lod_ratio,
        };
        if self.key == Some(key) {
            return false;
        }

        let frame = frame.sanitized();
        let ratio = lod_ratio as f32 / 100.0 * frame.lod_ratio;
        self.lod_ratio = lod_ratio;
        self.scale = 1.0 / (ratio * frame.target_size);
        self.key = Some(key);
        true
    }

    /// Distance at which each LOD switches to the next one.
    ///
    /// A LOD ratio of zero never switches: every entry is infinite.
    pub fn lod_distances(&self) -> [f32; MAX_LOD_COUNT] {
        let mut distances = [f32::INFINITY; MAX_LOD_COUNT];
        if self.lod_ratio == 0 || !self.scale.is_finite() {
            return distances;
        }
        for (i, distance) in distances.iter_mut().enumerate() {
            *distance = self.base_lod_distance * self.scale * (i + 1) as f32;
        }
        distances
    }

    /// The LOD a renderer would request at `distance`.
    pub fn lod_for_distance(&self, distance: f32) -> u8 {
        self.lod_distances()
            .iter()
            .take(MAX_LOD_COUNT - 1)
            .filter(|&&switch| distance >= switch)
            .count() as u8
    }

    /// Resolves `requested` against what the geometry has resident and
    /// computes the cross-fade to the next LOD.
    ///
    /// Returns `None` when no LOD of the geometry is resident.
    #[allow(clippy::too_many_arguments)]
    pub fn compute_lod(
        &self,
        requested: u8,
        camera_distance: f32,
        general_pass: bool,
        geometry: &MeshGeometry,
        frame: &FrameLodInfo,
        settings: &RenderNodeSettings,
        max_view_distance: f32,
    ) -> Option<LodValue> {
        let min_usable = geometry.min_usable_lod()?;
        let upper = (frame.max_lod as usize)
            .min(geometry.lod_count() - 1)
            .min(settings.lod_count() - 1);
        let lower = (frame.min_lod as usize).max(min_usable).min(upper);
        let requested = clamp(requested as usize, lower, upper);

        let current = (0..=requested)
            .rev()
            .find(|&lod| geometry.is_lod_loaded(lod))
            .or_else(|| (requested + 1..=upper).find(|&lod| geometry.is_lod_loaded(lod)))?;

        if !settings.dissolve_enabled || !general_pass {
            return Some(LodValue::single(current as u8));
        }

        let next = current + 1;
        if next > upper || !geometry.is_lod_loaded(next) {
            return Some(LodValue::single(current as u8));
        }

        let dissolve_distance = clamp(
            0.1 * max_view_distance,
            settings.dissolve_distance_min,
            settings.dissolve_distance_max,
        );
        let inv_dissolve_distance = 1.0 / dissolve_distance;
        let lod_distance = self.lod_distances()[current];
        let ratio =
            (saturate(1.0 + (camera_distance - lod_distance) * inv_dissolve_distance) * 255.0) as u8;

        log::trace!(
            "LOD {} at {:.2}m (switch at {:.2}m), dissolve {}.",
            current,
            camera_distance,
            lod_distance,
            ratio
        );

        if ratio == u8::MAX {
            return Some(LodValue::single(next as u8));
        }
        Some(LodValue {
            lod: current as u8,
            dissolve_ratio: ratio,
            next_lod: Some(next as u8),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{frame_lod::MeshLodInfo, geometry::MeshLod};
    use approx::assert_relative_eq;
    use strata_core::math::{Aabb, Vec3};

    fn geometry(lods: Vec<MeshLod>) -> MeshGeometry {
        MeshGeometry::new(Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5)))
            .with_submesh(MeshLodInfo::new(100.0, 10))
            .with_lods(lods)
    }

    fn all_loaded() -> MeshGeometry {
        geometry((0..4).map(|_| MeshLod::loaded(10)).collect())
    }

    fn selector_for(geometry: &MeshGeometry, lod_ratio: u32) -> LodSelector {
        let mut selector = LodSelector::new();
        selector.update_lod_distance(geometry, false, lod_ratio, &FrameLodInfo::default());
        selector
    }

    #[test]
    fn base_distance_is_sqrt_of_mean() {
        let selector = selector_for(&all_loaded(), 100);
        assert_relative_eq!(selector.base_lod_distance(), 10.0);
        assert_relative_eq!(selector.scale(), 1.0);
        assert_relative_eq!(selector.lod_distances()[2], 30.0);
    }

    #[test]
    fn zero_ratio_never_switches() {
        let selector = selector_for(&all_loaded(), 0);
        assert!(selector.lod_distances().iter().all(|d| d.is_infinite()));
        assert_eq!(selector.lod_for_distance(1.0e9), 0);
    }

    #[test]
    fn sync_only_on_change() {
        let mut selector = selector_for(&all_loaded(), 100);
        let frame = FrameLodInfo::default();
        assert!(!selector.sync(100, &frame));
        assert!(selector.sync(50, &frame));
        assert_relative_eq!(selector.scale(), 2.0);

        let next_frame = FrameLodInfo {
            id: 1,
            target_size: 2.0,
            ..frame
        };
        assert!(selector.sync(50, &next_frame));
        assert_relative_eq!(selector.scale(), 1.0);
    }

    #[test]
    fn lod_for_distance_counts_thresholds() {
        let selector = selector_for(&all_loaded(), 100);
        assert_eq!(selector.lod_for_distance(5.0), 0);
        assert_eq!(selector.lod_for_distance(10.0), 1);
        assert_eq!(selector.lod_for_distance(25.0), 2);
        assert_eq!(selector.lod_for_distance(1000.0), (MAX_LOD_COUNT - 1) as u8);
    }

    #[test]
    fn falls_back_to_nearest_resident_lod() {
        let geometry = geometry(vec![
            MeshLod::loaded(10),
            MeshLod::unloaded(10),
            MeshLod::unloaded(10),
            MeshLod::loaded(10),
        ]);
        let selector = selector_for(&geometry, 100);
        let settings = RenderNodeSettings::default();
        let frame = FrameLodInfo::default();

        let value = selector
            .compute_lod(2, 0.0, false, &geometry, &frame, &settings, 100.0)
            .unwrap();
        assert_eq!(value, LodValue::single(0));

        let value = selector
            .compute_lod(5, 0.0, false, &geometry, &frame, &settings, 100.0)
            .unwrap();
        assert_eq!(value, LodValue::single(3));
    }

    #[test]
    fn nearest_above_when_nothing_below() {
        let geometry = geometry(vec![
            MeshLod::unloaded(10),
            MeshLod::unloaded(10),
            MeshLod::loaded(10),
        ]);
        let selector = selector_for(&geometry, 100);
        let value = selector
            .compute_lod(
                0,
                0.0,
                false,
                &geometry,
                &FrameLodInfo::default(),
                &RenderNodeSettings::default(),
                100.0,
            )
            .unwrap();
        assert_eq!(value.lod, 2);
    }

    #[test]
    fn nothing_resident_renders_nothing() {
        let geometry = geometry(vec![MeshLod::unloaded(10)]);
        let selector = selector_for(&geometry, 100);
        assert!(selector
            .compute_lod(
                0,
                0.0,
                true,
                &geometry,
                &FrameLodInfo::default(),
                &RenderNodeSettings::default(),
                100.0,
            )
            .is_none());
    }

    #[test]
    fn dissolve_band_and_saturation() {
        let geometry = all_loaded();
        let selector = selector_for(&geometry, 100);
        let settings = RenderNodeSettings::default();
        let frame = FrameLodInfo::default();

        // max view 40 -> dissolve distance clamp(4, 2, 7.5) = 4; LOD 0 leaves at 10.
        let mid = selector
            .compute_lod(0, 8.0, true, &geometry, &frame, &settings, 40.0)
            .unwrap();
        assert_eq!(mid.lod, 0);
        assert_eq!(mid.next_lod, Some(1));
        assert_eq!(mid.dissolve_ratio, 127);

        let before = selector
            .compute_lod(0, 5.0, true, &geometry, &frame, &settings, 40.0)
            .unwrap();
        assert_eq!(before.dissolve_ratio, 0);

        let saturated = selector
            .compute_lod(0, 10.0, true, &geometry, &frame, &settings, 40.0)
            .unwrap();
        assert_eq!(saturated, LodValue::single(1));
    }

    #[test]
    fn dissolve_off_outside_general_pass() {
        let geometry = all_loaded();
        let selector = selector_for(&geometry, 100);
        let value = selector
            .compute_lod(
                0,
                9.0,
                false,
                &geometry,
                &FrameLodInfo::default(),
                &RenderNodeSettings::default(),
                40.0,
            )
            .unwrap();
        assert_eq!(value, LodValue::single(0));
    }

    #[test]
    fn last_lod_has_no_dissolve_target() {
        let geometry = all_loaded();
        let selector = selector_for(&geometry, 100);
        let value = selector
            .compute_lod(
                3,
                1000.0,
                true,
                &geometry,
                &FrameLodInfo::default(),
                &RenderNodeSettings::default(),
                40.0,
            )
            .unwrap();
        assert_eq!(value, LodValue::single(3));
    }
}
