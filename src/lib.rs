//! A CPU scanline rasterizer for flat, textured polygons.
//!
//! Polygons are fan-triangulated, projected through a perspective camera,
//! scan-converted row by row and shaded with a camera-mounted headlight.
//! Depth is resolved per pixel and attributes are interpolated
//! perspective-correctly.
//!
//! # Quick Start
//!
//! ```no_run
//! use polyraster::prelude::*;
//!
//! let mut engine = Engine::default();
//! let square = Polygon::regular("square", 4, Vec3::ONE, Vec3::ZERO, 45.0, Vec3::ONE)?;
//! engine.add_polygon(square);
//! engine.render_scene().save("frame.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod math;
pub mod polygon;
pub mod projection;
pub mod scene;
pub mod texture;

pub mod render;

pub use camera::Camera;
pub use config::{ConfigError, RenderConfig};
pub use engine::{Engine, FrameStats};
pub use polygon::{Polygon, SceneError, Vertex};
pub use scene::Scene;
pub use texture::{Sampler, Texture};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::config::{CameraConfig, ConfigError, RenderConfig};
    pub use crate::engine::{Engine, FrameStats};
    pub use crate::polygon::{Polygon, SceneError, SharedSampler, Vertex};
    pub use crate::projection::Projection;
    pub use crate::scene::Scene;
    pub use crate::texture::{Sampler, Texture};

    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::polygon::{Triangle, Vertex};
    pub use crate::render::{FillOutcome, FlatShader, FrameBuffer, PixelShader, ScanlineRasterizer};
}
