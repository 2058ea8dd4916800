//! Scanline triangle fill.
//!
//! Each covered row is bounded by the crossings of the triangle's three
//! edges. Rows and columns both use half-open `[ceil(lo), ceil(hi))` spans,
//! so triangles sharing an edge split the pixels on it without overlap.

use super::barycentric::{PerspectiveInterpolator, ScreenTriangle};
use super::segment::Segment;
use super::shader::PixelShader;
use super::FillOutcome;
use crate::math::vec2::Vec2;
use crate::polygon::{Triangle, Vertex};
use crate::render::framebuffer::FrameBuffer;

/// Scanline rasterizer with a per-pixel depth test.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Fills one projected triangle.
    ///
    /// `projected` holds the screen-space corners: pixel x and y, the
    /// post-divide depth in z. `triangle` must carry the bounding box of
    /// those corners (see [`Triangle::compute_bounding_box`]).
    pub fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &Triangle,
        projected: &[Vertex; 3],
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> FillOutcome {
        if triangle.off_screen {
            return FillOutcome::OffScreen;
        }

        let points = projected.map(|v| Vec2::new(v.position.x, v.position.y));
        let depths = projected.map(|v| v.position.z);

        let Some(screen) = ScreenTriangle::new(points) else {
            return FillOutcome::Degenerate;
        };
        if depths.iter().any(|z| *z == 0.0 || !z.is_finite()) {
            return FillOutcome::Degenerate;
        }

        let edges = [
            Segment::new(points[0], points[1]),
            Segment::new(points[1], points[2]),
            Segment::new(points[2], points[0]),
        ];

        let bbox = &triangle.bounding_box;
        let width = buffer.width() as i32;
        let height = buffer.height() as i32;

        let y_start = clamp_span(bbox.min_y, height);
        let y_end = clamp_span(bbox.max_y, height);

        let mut pixels = 0;
        for y in y_start..y_end {
            let mut x_left = width as f32;
            let mut x_right = 0.0f32;
            for x in edges
                .iter()
                .filter_map(|edge| edge.intersect_scanline(y))
                .filter(|x| bbox.contains_x(*x))
            {
                x_left = x_left.min(x);
                x_right = x_right.max(x);
            }

            let x_start = clamp_span(x_left, width);
            let x_end = clamp_span(x_right, width);

            for x in x_start..x_end {
                let weights = screen.weights(Vec2::new(x as f32, y as f32));
                let interp = PerspectiveInterpolator::new(weights, depths);

                if !buffer.test_and_set_depth(x, y, interp.depth()) {
                    continue;
                }

                buffer.set_pixel(x, y, shader.shade(&interp));
                pixels += 1;
            }
        }

        FillOutcome::Drawn { pixels }
    }
}

/// `ceil(coord)` clamped to `[0, limit]`.
#[inline]
fn clamp_span(coord: f32, limit: i32) -> i32 {
    (coord.ceil() as i32).clamp(0, limit)
}
