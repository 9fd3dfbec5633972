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

//! Math primitives used by render nodes for transforms and bounding volumes.
//!
//! Only the subset of linear algebra the render-node subsystem relies on lives
//! here: 3D/4D vectors, a column-major 4x4 matrix, an affine transform wrapper
//! and axis-aligned bounding boxes. All angles are in **radians**.

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::PI;

pub mod affine_transform;
pub mod geometry;
pub mod matrix;
pub mod vector;

pub use self::affine_transform::AffineTransform;
pub use self::geometry::Aabb;
pub use self::matrix::Mat4;
pub use self::vector::{Vec3, Vec4};

/// Clamps a value to a specified minimum and maximum range.
///
/// # Examples
///
/// ```
/// use strata_core::math::clamp;
/// assert_eq!(clamp(1.5, 0.0, 1.0), 1.0);
/// assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
/// ```
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min_val: T, max_val: T) -> T {
    if value < min_val {
        min_val
    } else if value > max_val {
        max_val
    } else {
        value
    }
}

/// Clamps a floating-point value to the `[0.0, 1.0]` range.
///
/// `NaN` saturates to `0.0`.
///
/// # Examples
///
/// ```
/// use strata_core::math::saturate;
/// assert_eq!(saturate(1.5), 1.0);
/// assert_eq!(saturate(-0.5), 0.0);
/// ```
#[inline]
pub fn saturate(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    clamp(value, 0.0, 1.0)
}

/// Approximate equality with a custom tolerance.
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Approximate equality using [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}
