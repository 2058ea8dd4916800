//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec4`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotations are right-handed: a positive angle turns counter-clockwise
//!   when looking down the axis toward the origin
//!
//! # Example
//! ```ignore
//! let view_proj = projection * view; // view applied first
//! let clip = view_proj * vertex.position;
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation by `angle` radians around an arbitrary axis through the origin.
    ///
    /// Rodrigues' formula: `R = cI + (1 - c) a aᵀ + s [a]ₓ`. The axis is
    /// normalized here, so callers may pass a slightly drifted basis vector.
    pub fn rotation_axis(axis: Vec3, angle: f32) -> Self {
        let a = axis.normalize();
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;

        Mat4::new([
            [
                c + t * a.x * a.x,
                t * a.x * a.y - s * a.z,
                t * a.x * a.z + s * a.y,
                0.0,
            ],
            [
                t * a.y * a.x + s * a.z,
                c + t * a.y * a.y,
                t * a.y * a.z - s * a.x,
                0.0,
            ],
            [
                t * a.z * a.x - s * a.y,
                t * a.z * a.y + s * a.x,
                c + t * a.z * a.z,
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x
                + self.data[r][1] * v.y
                + self.data[r][2] * v.z
                + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}
