//! Pixel shaders for triangle rasterization.
//!
//! The scanline fill decides coverage and depth; a shader turns the
//! interpolator for a covered pixel into its final color.

use image::Rgb;

use crate::colors::{headlight_intensity, modulate};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::polygon::Vertex;
use crate::texture::{sample_color, Sampler};

use super::barycentric::PerspectiveInterpolator;

/// Per-pixel shading computation.
///
/// The rasterizer calls `shade()` only for pixels that passed the depth
/// test.
pub trait PixelShader {
    fn shade(&self, interp: &PerspectiveInterpolator) -> Rgb<u8>;
}

/// Constant color for every pixel.
pub struct FlatShader {
    color: Rgb<u8>,
}

impl FlatShader {
    pub fn new(color: Rgb<u8>) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _interp: &PerspectiveInterpolator) -> Rgb<u8> {
        self.color
    }
}

/// Textured headlight shading.
///
/// Interpolates UV and normal, samples the base color (white without a
/// texture) and scales it by the headlight intensity.
pub struct LambertShader<'a> {
    uvs: [Vec2; 3],
    normals: [Vec4; 3],
    texture: Option<&'a dyn Sampler>,
    /// Unit vector from the surface toward the camera.
    view_dir: Vec3,
}

impl<'a> LambertShader<'a> {
    pub fn new(vertices: &[Vertex; 3], texture: Option<&'a dyn Sampler>, view_dir: Vec3) -> Self {
        Self {
            uvs: vertices.map(|v| v.uv),
            normals: vertices.map(|v| v.normal),
            texture,
            view_dir,
        }
    }
}

impl PixelShader for LambertShader<'_> {
    #[inline]
    fn shade(&self, interp: &PerspectiveInterpolator) -> Rgb<u8> {
        let uv = interp.interpolate(self.uvs);
        let normal = interp.interpolate(self.normals);

        let base = sample_color(uv, self.texture);
        modulate(base, headlight_intensity(normal.xyz(), self.view_dir))
    }
}
