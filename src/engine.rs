//! Core rendering engine.
//!
//! The [`Engine`] owns the scene, the camera and the depth buffer, and turns
//! them into an image one [`render_scene`](Engine::render_scene) call at a
//! time. Scene and camera changes belong between calls.

use image::{Rgb, RgbImage};
use log::{debug, info, trace};

use crate::camera::Camera;
use crate::config::{ConfigError, RenderConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;
use crate::polygon::{Polygon, Vertex};
use crate::render::{FillOutcome, FrameBuffer, LambertShader, ScanlineRasterizer};
use crate::scene::Scene;
use crate::texture::Sampler;

/// Per-frame counters, refreshed by every [`Engine::render_scene`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles considered, skipped or not.
    pub triangles: usize,
    pub off_screen: usize,
    pub degenerate: usize,
    /// Skipped because a corner sits at or behind the near plane.
    pub behind_camera: usize,
    /// Pixels that passed the depth test.
    pub pixels_written: usize,
}

impl FrameStats {
    pub fn drawn(&self) -> usize {
        self.triangles - self.off_screen - self.degenerate - self.behind_camera
    }
}

pub struct Engine {
    scene: Scene,
    camera: Camera,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
    background: Rgb<u8>,
    rasterizer: ScanlineRasterizer,
    last_stats: FrameStats,
}

impl Engine {
    pub fn new(config: &RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let camera = Camera::from_config(&config.camera)?;
        info!(
            "Engine {}x{}, fov {} deg",
            config.width, config.height, config.camera.fov_degrees
        );
        Ok(Self::with_camera(
            camera,
            config.width,
            config.height,
            Rgb(config.background),
        ))
    }

    fn with_camera(camera: Camera, width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            scene: Scene::new(),
            camera,
            depth_buffer: vec![f32::INFINITY; width as usize * height as usize],
            width,
            height,
            background,
            rasterizer: ScanlineRasterizer::new(),
            last_stats: FrameStats::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn set_scene(&mut self, scene: Scene) {
        info!(
            "Scene replaced: {} polygons, {} triangles",
            scene.len(),
            scene.triangle_count()
        );
        self.scene = scene;
    }

    pub fn add_polygon(&mut self, polygon: Polygon) {
        debug!(
            "Added polygon '{}' ({} triangles)",
            polygon.name(),
            polygon.triangles().len()
        );
        self.scene.add(polygon);
    }

    /// Discards every polygon. Camera and buffers are left alone.
    pub fn clear_scene(&mut self) {
        info!("Scene cleared ({} polygons)", self.scene.len());
        self.scene.clear();
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Depth left behind by the last frame, row-major.
    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    pub fn last_frame_stats(&self) -> FrameStats {
        self.last_stats
    }

    pub fn reset_depth_buffer(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
    }

    /// Renders every triangle of every polygon, in scene order, into a
    /// fresh image.
    pub fn render_scene(&mut self) -> RgbImage {
        self.reset_depth_buffer();
        let mut image = RgbImage::from_pixel(self.width, self.height, self.background);

        let Self {
            scene,
            camera,
            depth_buffer,
            width,
            height,
            rasterizer,
            last_stats,
            ..
        } = self;
        let (width, height) = (*width, *height);

        let view_proj = camera.persp_proj_matrix() * camera.view_matrix();
        let near = camera.near_clip();
        let view_dir = (-camera.forward()).xyz().normalize();

        let mut stats = FrameStats::default();
        let mut fb = FrameBuffer::new(&mut image, depth_buffer, width, height);

        for polygon in scene.polygons() {
            let texture = polygon.texture().map(|t| t as &dyn Sampler);

            for triangle in polygon.triangles() {
                stats.triangles += 1;

                let corners = polygon.triangle_vertices(triangle);
                let Some(projected) = project(&corners, &view_proj, near, width, height) else {
                    trace!(
                        "Polygon '{}': triangle {:?} behind the camera",
                        polygon.name(),
                        triangle.indices
                    );
                    stats.behind_camera += 1;
                    continue;
                };

                let mut screen_triangle = *triangle;
                screen_triangle.compute_bounding_box(&projected, width, height);

                let shader = LambertShader::new(&corners, texture, view_dir);
                match rasterizer.fill_triangle(&screen_triangle, &projected, &mut fb, &shader) {
                    FillOutcome::OffScreen => {
                        trace!(
                            "Polygon '{}': triangle {:?} off-screen",
                            polygon.name(),
                            triangle.indices
                        );
                        stats.off_screen += 1;
                    }
                    FillOutcome::Degenerate => {
                        trace!(
                            "Polygon '{}': triangle {:?} is degenerate",
                            polygon.name(),
                            triangle.indices
                        );
                        stats.degenerate += 1;
                    }
                    FillOutcome::Drawn { pixels } => stats.pixels_written += pixels,
                }
            }
        }

        debug!(
            "Frame: {} triangles, {} drawn, {} off-screen, {} degenerate, {} behind camera, {} pixels",
            stats.triangles,
            stats.drawn(),
            stats.off_screen,
            stats.degenerate,
            stats.behind_camera,
            stats.pixels_written
        );
        *last_stats = stats;

        image
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_camera(
            Camera::default(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            crate::colors::BACKGROUND,
        )
    }
}

/// Clip space to pixel space for one triangle.
///
/// Screen x and y land in `position.x/y`, the post-divide depth in
/// `position.z`. Attributes are carried over untouched. Returns `None` when
/// any corner has clip `w <= near`, since those would divide through zero or
/// flip.
fn project(
    corners: &[Vertex; 3],
    view_proj: &Mat4,
    near: f32,
    width: u32,
    height: u32,
) -> Option<[Vertex; 3]> {
    let clip = corners.map(|v| *view_proj * v.position);
    if clip.iter().any(|c| c.w <= near) {
        return None;
    }

    let (w, h) = (width as f32, height as f32);
    let mut projected = *corners;
    for (vertex, clip) in projected.iter_mut().zip(clip) {
        let ndc = clip.perspective_divide();
        vertex.position = Vec4::new(
            (ndc.x + 1.0) * w * 0.5,
            (1.0 - ndc.y) * h * 0.5,
            ndc.z,
            ndc.w,
        );
    }
    Some(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::math::vec3::Vec3;
    use crate::polygon::SharedSampler;
    use crate::texture::Texture;
    use std::sync::Arc;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];
    const YELLOW: [u8; 3] = [255, 255, 0];

    fn vertex(x: f32, y: f32, z: f32, u: f32, v: f32) -> Vertex {
        Vertex::new(
            Vec4::point(x, y, z),
            Vec3::splat(255.0),
            Vec4::direction(0.0, 0.0, 1.0),
            Vec2::new(u, v),
        )
    }

    /// Side-2 square centered on the origin, counter-clockwise from the
    /// bottom-left, with UVs matching its corners.
    fn unit_square(z: f32) -> Polygon {
        Polygon::new(
            "square",
            vec![
                vertex(-1.0, -1.0, z, 0.0, 0.0),
                vertex(1.0, -1.0, z, 1.0, 0.0),
                vertex(1.0, 1.0, z, 1.0, 1.0),
                vertex(-1.0, 1.0, z, 0.0, 1.0),
            ],
        )
        .unwrap()
    }

    fn solid_triangle(name: &str, z: f32, color: [u8; 3]) -> Polygon {
        let mut polygon = Polygon::new(
            name,
            vec![
                vertex(-1.0, -1.0, z, 0.0, 0.0),
                vertex(1.0, -1.0, z, 1.0, 0.0),
                vertex(0.0, 1.0, z, 0.5, 1.0),
            ],
        )
        .unwrap();
        let texture: SharedSampler = Arc::new(Texture::solid(1, 1, color));
        polygon.set_texture(texture);
        polygon
    }

    fn pixel(image: &RgbImage, x: u32, y: u32) -> [u8; 3] {
        image.get_pixel(x, y).0
    }

    #[test]
    fn default_engine_uses_default_camera() {
        let engine = Engine::default();
        assert_eq!(engine.width(), SCREEN_WIDTH);
        assert_eq!(engine.height(), SCREEN_HEIGHT);
        assert_eq!(engine.camera(), &Camera::default());
        assert!(engine.scene().is_empty());
    }

    #[test]
    fn empty_scene_renders_background() {
        let config = RenderConfig {
            width: 8,
            height: 4,
            background: [10, 20, 30],
            ..RenderConfig::default()
        };
        let mut engine = Engine::new(&config).unwrap();
        let image = engine.render_scene();
        assert_eq!(image.dimensions(), (8, 4));
        assert!(image.pixels().all(|p| p.0 == [10, 20, 30]));
        assert_eq!(engine.last_frame_stats(), FrameStats::default());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(Engine::new(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn facing_square_fills_a_centered_block() {
        let mut engine = Engine::default();
        engine.add_polygon(unit_square(0.0));
        let image = engine.render_scene();

        // The square spans about 194.2..317.8 px on both axes.
        let inside = 195..318;
        for (x, y, p) in image.enumerate_pixels() {
            let expected = if inside.contains(&x) && inside.contains(&y) {
                [255, 255, 255]
            } else {
                [0, 0, 0]
            };
            assert_eq!(p.0, expected, "pixel ({x}, {y})");
        }

        let stats = engine.last_frame_stats();
        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.drawn(), 2);
        assert_eq!(stats.pixels_written, 123 * 123);
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_order() {
        for near_first in [false, true] {
            let near = solid_triangle("near", 1.0, BLUE);
            let far = solid_triangle("far", -1.0, RED);
            let scene: Scene = if near_first {
                vec![near, far].into()
            } else {
                vec![far, near].into()
            };

            let mut engine = Engine::default();
            engine.set_scene(scene);
            let image = engine.render_scene();
            assert_eq!(pixel(&image, 256, 256), BLUE, "near_first = {near_first}");
        }
    }

    #[test]
    fn textured_quad_keeps_v_zero_at_the_bottom() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb(RED));
        image.put_pixel(1, 0, Rgb(GREEN));
        image.put_pixel(0, 1, Rgb(BLUE));
        image.put_pixel(1, 1, Rgb(YELLOW));

        let mut quad = unit_square(0.0);
        quad.set_texture(Arc::new(Texture::from_image(image)));

        let mut engine = Engine::default();
        engine.add_polygon(quad);
        let frame = engine.render_scene();

        assert_eq!(pixel(&frame, 197, 314), BLUE);
        assert_eq!(pixel(&frame, 314, 314), YELLOW);
        assert_eq!(pixel(&frame, 197, 197), RED);
        assert_eq!(pixel(&frame, 314, 197), GREEN);
    }

    #[test]
    fn depth_buffer_is_reset_every_frame() {
        let mut engine = Engine::default();
        engine.add_polygon(unit_square(0.0));
        let first = engine.render_scene();
        let second = engine.render_scene();
        assert_eq!(first, second);

        let center = (256 * engine.width() + 256) as usize;
        assert!(engine.depth_buffer()[center].is_finite());

        engine.clear_scene();
        let cleared = engine.render_scene();
        assert!(cleared.pixels().all(|p| p.0 == [0, 0, 0]));
        assert!(engine.depth_buffer().iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn geometry_behind_the_camera_is_skipped() {
        let mut engine = Engine::default();
        engine.add_polygon(unit_square(20.0));
        let image = engine.render_scene();
        assert!(image.pixels().all(|p| p.0 == [0, 0, 0]));
        assert_eq!(engine.last_frame_stats().behind_camera, 2);
    }

    #[test]
    fn triangle_straddling_the_near_plane_is_skipped_whole() {
        let mut engine = Engine::default();
        let straddling = Polygon::new(
            "straddling",
            vec![
                vertex(-1.0, -1.0, 0.0, 0.0, 0.0),
                vertex(1.0, -1.0, 0.0, 1.0, 0.0),
                vertex(0.0, 1.0, 20.0, 0.5, 1.0),
            ],
        )
        .unwrap();
        engine.add_polygon(straddling);
        let image = engine.render_scene();

        let stats = engine.last_frame_stats();
        assert_eq!(stats.triangles, 1);
        assert_eq!(stats.behind_camera, 1);
        assert_eq!(stats.pixels_written, 0);
        assert!(image.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn off_screen_triangles_are_counted() {
        let mut engine = Engine::default();
        let shifted: Vec<Vertex> = unit_square(0.0)
            .vertices()
            .iter()
            .map(|v| Vertex {
                position: v.position + Vec4::direction(50.0, 0.0, 0.0),
                ..*v
            })
            .collect();
        let polygon = Polygon::new("far right", shifted).unwrap();
        engine.add_polygon(polygon);
        engine.render_scene();

        let stats = engine.last_frame_stats();
        assert_eq!(stats.off_screen, 2);
        assert_eq!(stats.pixels_written, 0);
    }

    #[test]
    fn camera_moves_between_frames() {
        let mut engine = Engine::default();
        engine.add_polygon(unit_square(0.0));
        engine.camera_mut().translate_x(3.0);
        let image = engine.render_scene();
        // Square slides left in the frame.
        assert_eq!(pixel(&image, 256, 256), [0, 0, 0]);
        assert!(engine.last_frame_stats().pixels_written > 0);
    }
}
