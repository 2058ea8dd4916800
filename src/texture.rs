//! Texture sampling.
//!
//! Decoding image files is not the rasterizer's business: it only needs a
//! 2D color lookup, expressed by the [`Sampler`] trait. [`Texture`] is the
//! stock implementation backed by an [`image::RgbImage`].

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::colors::WHITE;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// A 2D grid of RGB texels addressed with a top-left origin.
pub trait Sampler {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Texel at `(x, y)`. Callers keep `x < width` and `y < height`.
    fn pixel_at(&self, x: u32, y: u32) -> [u8; 3];
}

/// An RGB texture for texture mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, BMP).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let image = image::open(path)?.to_rgb8();
        Ok(Self { image })
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    /// A `width` x `height` texture of one color.
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self::from_image(RgbImage::from_pixel(width, height, Rgb(color)))
    }
}

impl Sampler for Texture {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    fn pixel_at(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }
}

/// Sample `texture` at `uv` with nearest-neighbor filtering.
///
/// # UV Coordinate Convention
/// - UV coordinates are in [0,1] range with v = 0 at the **bottom**
/// - Textures are stored top-left origin, so v is flipped: `y = (1 - v) * h`
/// - Out-of-range UVs clamp to the nearest edge texel
///
/// Returns channel values in [0, 255]. A missing texture samples as opaque
/// white.
#[inline]
pub fn sample_color(uv: Vec2, texture: Option<&dyn Sampler>) -> Vec3 {
    let Some(texture) = texture else {
        return channels(WHITE.0);
    };

    let (w, h) = (texture.width(), texture.height());
    if w == 0 || h == 0 {
        return channels(WHITE.0);
    }

    let x = texel_index(uv.x * w as f32, w);
    let y = texel_index((1.0 - uv.y) * h as f32, h);

    channels(texture.pixel_at(x, y))
}

#[inline]
fn channels([r, g, b]: [u8; 3]) -> Vec3 {
    Vec3::new(r as f32, g as f32, b as f32)
}

/// Truncates a continuous texel coordinate into `[0, size - 1]`.
#[inline]
fn texel_index(coord: f32, size: u32) -> u32 {
    // `as` saturates, so negative coordinates land on 0.
    (coord.min(size as f32 - 1.0) as u32).min(size - 1)
}
