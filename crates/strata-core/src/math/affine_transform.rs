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

//! Affine transformations in 3D space.

use crate::math::{approx_eq_eps, Mat4, Vec3};
use std::ops::Mul;

/// A 3D affine transformation (translation, rotation, scale).
///
/// Semantic wrapper around a `Mat4` whose last row is `[0, 0, 0, 1]`.
/// Entity world transforms are carried around as this type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct AffineTransform(pub Mat4);

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    /// Creates a pure translation.
    ///
    /// ```rust
    /// use strata_core::math::{AffineTransform, Vec3};
    ///
    /// let transform = AffineTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0));
    /// ```
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self(Mat4::from_translation(v))
    }

    /// Creates a (possibly non-uniform) scale.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self(Mat4::from_scale(scale))
    }

    /// Creates a rotation around the Y axis.
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        Self(Mat4::from_rotation_y(angle))
    }

    /// Returns the underlying matrix.
    #[inline]
    pub fn to_matrix(&self) -> Mat4 {
        self.0
    }

    /// The translation component.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.0.cols[3].truncate()
    }

    /// Per-axis scale, measured as the length of each basis column.
    #[inline]
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            self.0.cols[0].truncate().length(),
            self.0.cols[1].truncate().length(),
            self.0.cols[2].truncate().length(),
        )
    }

    /// Returns `true` when all three axes carry the same scale (within `1e-3`).
    pub fn has_uniform_scale(&self) -> bool {
        let s = self.scale();
        approx_eq_eps(s.x, s.y, 1e-3) && approx_eq_eps(s.y, s.z, 1e-3)
    }

    /// Returns `true` when every element is finite.
    pub fn is_valid(&self) -> bool {
        self.0
            .cols
            .iter()
            .all(|c| c.x.is_finite() && c.y.is_finite() && c.z.is_finite() && c.w.is_finite())
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for AffineTransform {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl From<AffineTransform> for Mat4 {
    #[inline]
    fn from(transform: AffineTransform) -> Self {
        transform.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn scale_is_column_length() {
        let t = AffineTransform::from_scale(Vec3::new(2.0, 3.0, 4.0));
        let s = t.scale();
        assert!(approx_eq(s.x, 2.0) && approx_eq(s.y, 3.0) && approx_eq(s.z, 4.0));
        assert!(!t.has_uniform_scale());
    }

    #[test]
    fn rotation_keeps_uniform_scale() {
        let t = AffineTransform::from_rotation_y(0.7) * AffineTransform::from_scale(Vec3::splat(2.0));
        assert!(t.has_uniform_scale());
        assert!(t.is_valid());
    }

    #[test]
    fn nan_transform_is_invalid() {
        let t = AffineTransform::from_translation(Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(!t.is_valid());
    }
}
