//! Color constants and the final shade-and-quantize step.

use image::Rgb;

use crate::math::vec3::Vec3;

pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Light that reaches a surface regardless of its orientation.
pub const AMBIENT: f32 = 0.3;
/// Share of the light that depends on the surface facing the camera.
pub const DIFFUSE: f32 = 0.7;

/// Headlight intensity for a surface normal seen along `view_dir`.
///
/// `view_dir` points from the surface toward the camera (the negated camera
/// forward). Result is in `[AMBIENT, AMBIENT + DIFFUSE]`.
#[inline]
pub fn headlight_intensity(normal: Vec3, view_dir: Vec3) -> f32 {
    normal.dot(view_dir).clamp(0.0, 1.0) * DIFFUSE + AMBIENT
}

/// Scales a [0, 255] color by `intensity`, rounding each channel to the
/// nearest integer and clamping to the 8-bit range.
#[inline]
pub fn modulate(color: Vec3, intensity: f32) -> Rgb<u8> {
    let scaled = color * intensity;
    let channel = |c: f32| c.round().clamp(0.0, 255.0) as u8;
    Rgb([channel(scaled.x), channel(scaled.y), channel(scaled.z)])
}
