use std::ops::{Add, Mul};

use crate::math::vec2::Vec2;

/// Triangles with less screen area than this (in square pixels) are skipped.
pub const DEGENERATE_AREA: f32 = 1e-6;

/// Unsigned area of the triangle `a`, `b`, `c`.
#[inline]
pub fn triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    0.5 * (b - a).perp_dot(c - a).abs()
}

/// Normalized screen-space weights of a point against a triangle's corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarycentricWeights {
    pub s1: f32,
    pub s2: f32,
    pub s3: f32,
}

impl BarycentricWeights {
    pub fn sum(&self) -> f32 {
        self.s1 + self.s2 + self.s3
    }

    pub fn as_array(&self) -> [f32; 3] {
        [self.s1, self.s2, self.s3]
    }
}

/// A projected triangle reduced to its screen corners.
#[derive(Clone, Copy, Debug)]
pub struct ScreenTriangle {
    points: [Vec2; 3],
    area: f32,
}

impl ScreenTriangle {
    /// Returns `None` when the triangle has no usable area.
    pub fn new(points: [Vec2; 3]) -> Option<Self> {
        let area = triangle_area(points[0], points[1], points[2]);
        if !area.is_finite() || area < DEGENERATE_AREA {
            return None;
        }
        Some(Self { points, area })
    }

    pub fn points(&self) -> [Vec2; 3] {
        self.points
    }

    /// Each weight is the area of the sub-triangle opposite its corner
    /// divided by the whole. Exact at the corners; outside the triangle
    /// the weights no longer sum to one.
    #[inline]
    pub fn weights(&self, p: Vec2) -> BarycentricWeights {
        let [v1, v2, v3] = self.points;
        BarycentricWeights {
            s1: triangle_area(p, v2, v3) / self.area,
            s2: triangle_area(v1, p, v3) / self.area,
            s3: triangle_area(v1, v2, p) / self.area,
        }
    }
}

/// Anything that can be blended linearly across a triangle.
pub trait Attribute: Copy + Add<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Attribute for T where T: Copy + Add<Output = T> + Mul<f32, Output = T> {}

/// Perspective-correct interpolation for one pixel.
///
/// Screen-space weights are divided by each corner's depth, blended, and
/// renormalized by the interpolated depth.
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveInterpolator {
    k: [f32; 3],
    depth: f32,
}

impl PerspectiveInterpolator {
    pub fn new(weights: BarycentricWeights, depths: [f32; 3]) -> Self {
        let k = [
            weights.s1 / depths[0],
            weights.s2 / depths[1],
            weights.s3 / depths[2],
        ];
        let depth = 1.0 / (k[0] + k[1] + k[2]);
        Self { k, depth }
    }

    /// Interpolated depth of the point.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    #[inline]
    pub fn interpolate<T: Attribute>(&self, values: [T; 3]) -> T {
        (values[0] * self.k[0] + values[1] * self.k[1] + values[2] * self.k[2]) * self.depth
    }
}
