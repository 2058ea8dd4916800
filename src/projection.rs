//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the
//! perspective parameters (FOV, aspect ratio, near/far planes) and generates
//! the projection matrix used by [`Camera`](crate::camera::Camera).

use crate::math::mat4::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    fov_degrees: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(45.0, 1.0, 0.01, 100.0)
    }
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    ///
    /// Range checks happen in [`Camera::from_config`](crate::camera::Camera::from_config).
    pub fn new(fov_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_degrees,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Generates the perspective matrix.
    ///
    /// Camera-space points map to clip space with `w = z_camera`, so after the
    /// perspective divide `x, y ∈ [-1, 1]` and `z ∈ [0, 1]` between the near
    /// and far planes.
    ///
    /// ```text
    /// | 1/(a·t)  0    0          0          |
    /// | 0        1/t  0          0          |
    /// | 0        0    f/(f-n)   -f·n/(f-n)  |
    /// | 0        0    1          0          |
    /// ```
    ///
    /// with `t = tan(fov/2)`.
    pub fn matrix(&self) -> Mat4 {
        let t = (self.fov_degrees.to_radians() / 2.0).tan();
        let a = self.aspect_ratio;
        let n = self.z_near;
        let f = self.z_far;
        Mat4::new([
            [1.0 / (a * t), 0.0, 0.0, 0.0],
            [0.0, 1.0 / t, 0.0, 0.0],
            [0.0, 0.0, f / (f - n), -f * n / (f - n)],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }
}
