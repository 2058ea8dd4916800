//! Triangle rasterization: edge crossings, barycentric interpolation,
//! per-pixel shaders and the scanline fill that ties them together.

mod barycentric;
mod scanline;
mod segment;
mod shader;

pub use barycentric::{
    triangle_area, Attribute, BarycentricWeights, PerspectiveInterpolator, ScreenTriangle,
    DEGENERATE_AREA,
};
pub use scanline::ScanlineRasterizer;
pub use segment::{Segment, EDGE_EPSILON};
pub use shader::{FlatShader, LambertShader, PixelShader};

/// What happened to a triangle handed to the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillOutcome {
    /// Bounding box entirely outside the frame.
    OffScreen,
    /// No usable area, or a corner with zero or non-finite depth.
    Degenerate,
    /// Scanned; `pixels` is how many passed the depth test.
    Drawn { pixels: usize },
}
