//! Triangle edges and their crossings with horizontal scanlines.

use crate::math::vec2::Vec2;

/// Below this, an edge's horizontal extent counts as vertical and its
/// vertical extent as flat.
pub const EDGE_EPSILON: f32 = 1e-3;

/// A screen-space line segment with a cached slope.
///
/// Endpoints are stored top-first (smaller y, ties broken by smaller x),
/// so an edge shared by two triangles yields bit-identical crossings
/// whichever way round each triangle lists it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    start: Vec2,
    end: Vec2,
    /// `dy / dx`, or infinity for near-vertical edges.
    slope: f32,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        let (start, end) = if (a.y, a.x) <= (b.y, b.x) { (a, b) } else { (b, a) };
        let dx = end.x - start.x;
        let slope = if dx.abs() < EDGE_EPSILON {
            f32::INFINITY
        } else {
            (end.y - start.y) / dx
        };
        Self { start, end, slope }
    }

    pub fn slope(&self) -> f32 {
        self.slope
    }

    /// X coordinate where this edge crosses scanline `y`.
    ///
    /// Coverage is the half-open row range `[ceil(y_top), ceil(y_bottom))`,
    /// so a row through a vertex shared by two stacked edges is claimed by
    /// exactly one of them. Flat edges never cross; vertical edges cross at
    /// their fixed x.
    #[inline]
    pub fn intersect_scanline(&self, y: i32) -> Option<f32> {
        if (self.end.y - self.start.y).abs() < EDGE_EPSILON {
            return None;
        }

        if y < self.start.y.ceil() as i32 || y >= self.end.y.ceil() as i32 {
            return None;
        }

        if self.slope.is_infinite() {
            return Some(self.start.x);
        }

        Some((y as f32 - self.start.y) / self.slope + self.start.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn diagonal_edge_crosses_at_interpolated_x() {
        let edge = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 20.0));
        assert_relative_eq!(edge.intersect_scanline(5).unwrap(), 2.5);
        assert_relative_eq!(edge.intersect_scanline(0).unwrap(), 0.0);
    }

    #[test]
    fn coverage_is_half_open() {
        let edge = Segment::new(Vec2::new(3.0, 1.5), Vec2::new(7.0, 4.0));
        assert!(edge.intersect_scanline(1).is_none());
        assert!(edge.intersect_scanline(2).is_some());
        assert!(edge.intersect_scanline(3).is_some());
        assert!(edge.intersect_scanline(4).is_none());
    }

    #[test]
    fn horizontal_edge_never_crosses() {
        let edge = Segment::new(Vec2::new(0.0, 5.0), Vec2::new(100.0, 5.0005));
        assert!((0..10).all(|y| edge.intersect_scanline(y).is_none()));
    }

    #[test]
    fn vertical_edge_crosses_at_fixed_x() {
        let edge = Segment::new(Vec2::new(42.0, 10.0), Vec2::new(42.0005, 0.0));
        assert!(edge.slope().is_infinite());
        assert_eq!(edge.intersect_scanline(3), Some(42.0005));
        assert_eq!(edge.intersect_scanline(9), Some(42.0005));
        assert_eq!(edge.intersect_scanline(10), None);
    }

    #[test]
    fn reversed_endpoints_give_identical_crossings() {
        let a = Vec2::new(12.3, 4.7);
        let b = Vec2::new(88.1, 301.9);
        let forward = Segment::new(a, b);
        let backward = Segment::new(b, a);
        for y in 0..320 {
            assert_eq!(forward.intersect_scanline(y), backward.intersect_scanline(y));
        }
    }
}
