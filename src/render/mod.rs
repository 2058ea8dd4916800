//! Low-level rendering primitives: the frame buffer view and the triangle
//! rasterizer.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{
    BarycentricWeights, FillOutcome, FlatShader, LambertShader, PerspectiveInterpolator,
    PixelShader, ScanlineRasterizer, ScreenTriangle, Segment,
};
