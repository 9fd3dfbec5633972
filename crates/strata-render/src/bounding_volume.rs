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

//! Local and world bounds of a render node.

use strata_core::math::{Aabb, AffineTransform};

/// A local-space box and its world-space image under the last transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    local: Aabb,
    world: Aabb,
    transform: AffineTransform,
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self {
            local: Aabb::INVALID,
            world: Aabb::INVALID,
            transform: AffineTransform::IDENTITY,
        }
    }
}

impl BoundingVolume {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn local(&self) -> Aabb {
        self.local
    }

    pub fn world(&self) -> Aabb {
        self.world
    }

    /// Last transform given to [`BoundingVolume::recompute_world`].
    pub fn transform(&self) -> AffineTransform {
        self.transform
    }

    /// Replaces the local box and re-derives the world box with the last transform.
    pub fn recompute_local(&mut self, local: Aabb) {
        self.local = local;
        self.world = self.local.transform(&self.transform.0);
    }

    /// Re-derives the world box. An empty local box gives an empty world box.
    pub fn recompute_world(&mut self, transform: AffineTransform) {
        self.transform = transform;
        self.world = self.local.transform(&transform.0);
    }

    /// Drops the local box. The last transform is kept.
    pub fn reset(&mut self) {
        self.local = Aabb::INVALID;
        self.world = Aabb::INVALID;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_core::math::Vec3;

    fn unit_cube() -> Aabb {
        Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5))
    }

    #[test]
    fn world_follows_translation() {
        let mut volume = BoundingVolume::new();
        volume.recompute_local(unit_cube());
        volume.recompute_world(AffineTransform::from_translation(Vec3::new(3.0, -2.0, 1.0)));

        let center = volume.world().center();
        assert_relative_eq!(center.x, 3.0);
        assert_relative_eq!(center.y, -2.0);
        assert_relative_eq!(center.z, 1.0);
    }

    #[test]
    fn local_recompute_keeps_last_transform() {
        let mut volume = BoundingVolume::new();
        volume.recompute_world(AffineTransform::from_translation(Vec3::X * 10.0));
        volume.recompute_local(unit_cube());
        assert_relative_eq!(volume.world().min.x, 9.5);
        assert_relative_eq!(volume.world().max.x, 10.5);
    }

    #[test]
    fn empty_local_gives_empty_world() {
        let mut volume = BoundingVolume::new();
        volume.recompute_world(AffineTransform::from_scale(Vec3::splat(2.0)));
        assert!(volume.world().is_empty());

        volume.recompute_local(unit_cube());
        volume.reset();
        assert!(volume.world().is_empty());
        assert!(volume.local().is_empty());
    }
}
