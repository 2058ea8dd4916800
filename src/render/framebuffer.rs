//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a view into an RGB color buffer and a depth buffer with
//! bounds-checked access. The depth buffer enables hidden surface removal
//! via the z-buffer algorithm.

use image::Rgb;

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// Both buffers are row-major with the origin at the top-left, indexed by
/// `y * width + x`. The color buffer holds three bytes per pixel.
///
/// # Depth Buffer
///
/// The depth buffer stores post-divide z for each pixel, `+inf` when nothing
/// has been drawn. Smaller values are closer to the camera.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u8],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    pub fn new(
        color_buffer: &'a mut [u8],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            width as usize * height as usize * 3,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            width as usize * height as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Flat pixel index of `(x, y)`, or `None` outside the buffer.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Depth test with write-through.
    ///
    /// Stores `depth` and returns `true` only if it is strictly less than
    /// the value already at `(x, y)`. Ties keep the earlier write.
    /// Out-of-bounds coordinates always fail.
    #[inline]
    pub fn test_and_set_depth(&mut self, x: i32, y: i32, depth: f32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                true
            }
            _ => false,
        }
    }

    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// Set a pixel without depth testing. Silently ignores out-of-bounds
    /// coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb<u8>) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx * 3..idx * 3 + 3].copy_from_slice(&color.0);
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb<u8>> {
        self.index(x, y).map(|idx| {
            let c = &self.color_buffer[idx * 3..idx * 3 + 3];
            Rgb([c[0], c[1], c[2]])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_is_strict_and_monotonic() {
        let mut color = vec![0u8; 4 * 4 * 3];
        let mut depth = vec![f32::INFINITY; 4 * 4];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 4, 4);

        let candidates = [0.8, 0.9, 0.5, 0.5, 0.7, 0.2];
        let mut stored = f32::INFINITY;
        for z in candidates {
            let wrote = fb.test_and_set_depth(1, 2, z);
            assert_eq!(wrote, z < stored);
            let now = fb.depth_at(1, 2).unwrap();
            assert!(now <= stored);
            stored = now;
        }
        assert_eq!(stored, 0.2);
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut color = vec![0u8; 2 * 2 * 3];
        let mut depth = vec![f32::INFINITY; 2 * 2];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 2, 2);

        assert!(!fb.test_and_set_depth(-1, 0, 0.1));
        assert!(!fb.test_and_set_depth(0, 2, 0.1));
        fb.set_pixel(2, 0, Rgb([9, 9, 9]));
        assert_eq!(fb.get_pixel(5, 5), None);
        assert!(color.iter().all(|&c| c == 0));
    }

    #[test]
    fn pixels_are_row_major_rgb() {
        let mut color = vec![0u8; 3 * 2 * 3];
        let mut depth = vec![f32::INFINITY; 3 * 2];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 3, 2);
        fb.set_pixel(2, 1, Rgb([1, 2, 3]));
        assert_eq!(fb.get_pixel(2, 1), Some(Rgb([1, 2, 3])));
        assert_eq!(&color[15..18], &[1, 2, 3]);
    }
}
