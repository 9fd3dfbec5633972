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

//! Axis-aligned bounding boxes.

use super::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// An Axis-Aligned Bounding Box (AABB) given by its minimum and maximum corners.
///
/// [`Aabb::INVALID`] (min = +inf, max = -inf) stands for "no volume": it is the
/// neutral element of [`Aabb::merge`] and what render nodes hold before any
/// geometry is bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Aabb {
    /// The corner with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// The empty box.
    pub const INVALID: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Creates a box from two corners, in any order.
    #[inline]
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box from its center and half-extents (made non-negative).
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half the size along each axis.
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Radius of the bounding sphere around the box.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.half_extents().length()
    }

    /// Checks that `min <= max` on all axes. Degenerate boxes are valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Returns `true` for a box enclosing nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_valid()
    }

    /// Checks if a point lies inside or on the boundary.
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Smallest box containing both boxes.
    #[inline]
    pub fn merge(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Squared distance from `point` to the box; zero when the point is inside.
    pub fn distance_squared_to_point(&self, point: Vec3) -> f32 {
        let clamped = point.max(self.min).min(self.max);
        (point - clamped).length_squared()
    }

    /// Box enclosing this one after an affine transformation.
    ///
    /// Transforms the center and projects the half-extents onto the absolute
    /// basis columns. An empty box stays empty.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        if self.is_empty() {
            return Self::INVALID;
        }

        let center = matrix.transform_point(self.center());
        let h = self.half_extents();
        let x_axis = matrix.cols[0].truncate().abs();
        let y_axis = matrix.cols[1].truncate().abs();
        let z_axis = matrix.cols[2].truncate().abs();

        Self::from_center_half_extents(center, x_axis * h.x + y_axis * h.y + z_axis * h.z)
    }
}

impl Default for Aabb {
    /// Returns [`Aabb::INVALID`].
    #[inline]
    fn default() -> Self {
        Self::INVALID
    }
}
