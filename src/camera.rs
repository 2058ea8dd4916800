//! Free-flying camera with an explicit orthonormal basis.
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer, so the default camera looks down -Z
//!
//! # Orientation
//!
//! Orientation is stored directly as the `right`, `up` and `forward` basis
//! vectors (all `w = 0`). Rotations turn two of them about the third and then
//! re-orthonormalize all three, so floating-point drift never accumulates
//! across calls.
//!
//! - **Pitch** ([`Camera::rotate_x`]): about `right`
//! - **Yaw** ([`Camera::rotate_y`]): about `up`
//! - **Roll** ([`Camera::rotate_z`]): about `forward`

use crate::config::{CameraConfig, ConfigError};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::projection::Projection;

/// Tolerance used when validating a configured basis.
const BASIS_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    forward: Vec4,
    right: Vec4,
    up: Vec4,
    position: Vec4,
    projection: Projection,
}

impl Default for Camera {
    /// Camera at `(0, 0, 10)` looking down `-z`, 45° FOV, near 0.01, far 100.
    fn default() -> Self {
        Self {
            forward: Vec4::direction(0.0, 0.0, -1.0),
            right: Vec4::direction(1.0, 0.0, 0.0),
            up: Vec4::direction(0.0, 1.0, 0.0),
            position: Vec4::point(0.0, 0.0, 10.0),
            projection: Projection::default(),
        }
    }
}

impl Camera {
    /// Builds a camera from validated configuration.
    ///
    /// Rejects near/far planes that are not `0 < near < far`, a field of view
    /// outside `(0, 180)` degrees, a non-positive aspect ratio, and a basis
    /// that is not orthonormal.
    pub fn from_config(config: &CameraConfig) -> Result<Self, ConfigError> {
        let CameraConfig {
            position,
            forward,
            right,
            up,
            fov_degrees,
            near_clip,
            far_clip,
            aspect_ratio,
        } = *config;

        if !(near_clip > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "near clip must be positive, got {near_clip}"
            )));
        }
        if !(far_clip > near_clip) {
            return Err(ConfigError::Invalid(format!(
                "far clip ({far_clip}) must exceed near clip ({near_clip})"
            )));
        }
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "field of view must be in (0, 180) degrees, got {fov_degrees}"
            )));
        }
        if !(aspect_ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "aspect ratio must be positive, got {aspect_ratio}"
            )));
        }

        let (f, r, u) = (Vec3::from(forward), Vec3::from(right), Vec3::from(up));
        let unit = |v: Vec3| (v.magnitude() - 1.0).abs() <= BASIS_TOLERANCE;
        let orthogonal = |a: Vec3, b: Vec3| a.dot(b).abs() <= BASIS_TOLERANCE;
        if !(unit(f) && unit(r) && unit(u))
            || !(orthogonal(f, r) && orthogonal(f, u) && orthogonal(r, u))
        {
            return Err(ConfigError::Invalid(
                "camera forward/right/up must be orthonormal".to_string(),
            ));
        }

        Ok(Self {
            forward: Vec4::from_vec3(f, 0.0),
            right: Vec4::from_vec3(r, 0.0),
            up: Vec4::from_vec3(u, 0.0),
            position: Vec4::from_vec3(Vec3::from(position), 1.0),
            projection: Projection::new(fov_degrees, aspect_ratio, near_clip, far_clip),
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec4 {
        self.position
    }

    pub fn forward(&self) -> Vec4 {
        self.forward
    }

    pub fn right(&self) -> Vec4 {
        self.right
    }

    pub fn up(&self) -> Vec4 {
        self.up
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn fov_degrees(&self) -> f32 {
        self.projection.fov_degrees()
    }

    pub fn near_clip(&self) -> f32 {
        self.projection.z_near()
    }

    pub fn far_clip(&self) -> f32 {
        self.projection.z_far()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.projection.aspect_ratio()
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// World space to camera space.
    ///
    /// The basis vectors form the rows of the rotation part. The translation
    /// column holds `-dot(axis, position)` for each axis.
    pub fn view_matrix(&self) -> Mat4 {
        let (r, u, f, p) = (self.right, self.up, self.forward, self.position);
        Mat4::new([
            [r.x, r.y, r.z, -r.dot(p)],
            [u.x, u.y, u.z, -u.dot(p)],
            [f.x, f.y, f.z, -f.dot(p)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Camera space to clip space. See [`Projection::matrix`].
    pub fn persp_proj_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    // =========================================================================
    // Movement (camera-local axes)
    // =========================================================================

    pub fn translate_x(&mut self, delta: f32) {
        self.position += self.right * delta;
    }

    pub fn translate_y(&mut self, delta: f32) {
        self.position += self.up * delta;
    }

    pub fn translate_z(&mut self, delta: f32) {
        self.position += self.forward * delta;
    }

    // =========================================================================
    // Rotation (degrees)
    // =========================================================================

    /// Pitch: turns `up` and `forward` about `right`.
    pub fn rotate_x(&mut self, theta: f32) {
        let m = Mat4::rotation_axis(self.right.xyz(), theta.to_radians());
        self.up = m * self.up;
        self.forward = m * self.forward;
        self.orthonormalize();
    }

    /// Yaw: turns `right` and `forward` about `up`.
    pub fn rotate_y(&mut self, theta: f32) {
        let m = Mat4::rotation_axis(self.up.xyz(), theta.to_radians());
        self.right = m * self.right;
        self.forward = m * self.forward;
        self.orthonormalize();
    }

    /// Roll: turns `right` and `up` about `forward`.
    pub fn rotate_z(&mut self, theta: f32) {
        let m = Mat4::rotation_axis(self.forward.xyz(), theta.to_radians());
        self.right = m * self.right;
        self.up = m * self.up;
        self.orthonormalize();
    }

    /// Gram-Schmidt over (right, up, forward), in that order.
    fn orthonormalize(&mut self) {
        let r = self.right.xyz().normalize();

        let u = self.up.xyz();
        let u = (u - r * r.dot(u)).normalize();

        let f = self.forward.xyz();
        let f = f - u * u.dot(f);
        let f = (f - r * r.dot(f)).normalize();

        self.right = Vec4::from_vec3(r, 0.0);
        self.up = Vec4::from_vec3(u, 0.0);
        self.forward = Vec4::from_vec3(f, 0.0);
    }
}

// =============================================================================
// Tests
// =============================================================================
