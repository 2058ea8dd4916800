//! Renders a small demo scene to a PNG.
//!
//! ```text
//! polyraster [OUTPUT.png] [--config PATH] [--texture PATH] [--turn N] [--strafe N]
//! ```
//!
//! `--turn` yaws the camera by `N` rotate steps, `--strafe` slides it right
//! by `N` translate steps.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use polyraster::config::{ROTATE_STEP, TRANSLATE_STEP};
use polyraster::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "polyraster")]
#[command(about = "Render a demo scene of textured polygons to a PNG")]
struct Args {
    /// Output image path
    #[arg(default_value = "frame.png")]
    output: PathBuf,
    /// RON render config; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Image to texture the demo quad with instead of the checkerboard
    #[arg(long)]
    texture: Option<PathBuf>,
    /// Yaw the camera by this many rotate steps
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    turn: i32,
    /// Slide the camera right by this many translate steps
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    strafe: i32,
}

fn demo_vertex(x: f32, y: f32, z: f32, u: f32, v: f32) -> Vertex {
    Vertex::new(
        Vec4::point(x, y, z),
        Vec3::splat(255.0),
        Vec4::direction(0.0, 0.0, 1.0),
        Vec2::new(u, v),
    )
}

fn demo_scene(texture: Option<SharedSampler>) -> Result<Scene, SceneError> {
    let mut quad = Polygon::new(
        "quad",
        vec![
            demo_vertex(-3.0, -1.0, 0.0, 0.0, 0.0),
            demo_vertex(-1.0, -1.0, 0.0, 1.0, 0.0),
            demo_vertex(-1.0, 1.0, 0.0, 1.0, 1.0),
            demo_vertex(-3.0, 1.0, 0.0, 0.0, 1.0),
        ],
    )?;
    let checker: SharedSampler = match texture {
        Some(texture) => texture,
        None => Arc::new(checkerboard()),
    };
    quad.set_texture(checker);

    let pentagon = Polygon::regular(
        "pentagon",
        5,
        Vec3::splat(255.0),
        Vec3::new(2.0, 0.0, -1.0),
        0.0,
        Vec3::splat(1.2),
    )?;

    let mut back = Polygon::new(
        "back",
        vec![
            demo_vertex(-1.5, -2.5, -2.0, 0.0, 0.0),
            demo_vertex(1.5, -2.5, -2.0, 1.0, 0.0),
            demo_vertex(0.0, -0.5, -2.0, 0.5, 1.0),
        ],
    )?;
    back.set_texture(Arc::new(Texture::solid(1, 1, [200, 60, 40])));

    let mut front = Polygon::new(
        "front",
        vec![
            demo_vertex(-0.5, -3.0, 1.0, 0.0, 0.0),
            demo_vertex(1.0, -1.0, 1.0, 1.0, 0.0),
            demo_vertex(-1.0, -1.5, 1.0, 0.5, 1.0),
        ],
    )?;
    front.set_texture(Arc::new(Texture::solid(1, 1, [40, 90, 220])));

    Ok(Scene::from(vec![quad, pentagon, back, front]))
}

fn checkerboard() -> Texture {
    let image = image::RgbImage::from_fn(8, 8, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgb([230, 230, 230])
        } else {
            image::Rgb([30, 30, 30])
        }
    });
    Texture::from_image(image)
}

/// An explicitly requested texture that fails to load is an error.
fn load_texture(path: Option<&Path>) -> Result<Option<SharedSampler>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let texture = Texture::from_file(path)
        .with_context(|| format!("Failed to load texture {}", path.display()))?;
    info!("Loaded texture {} ({}x{})", path.display(), texture.width(), texture.height());
    Ok(Some(Arc::new(texture) as SharedSampler))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            RenderConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };

    let texture = load_texture(args.texture.as_deref())?;

    let mut engine = Engine::new(&config)?;
    engine.set_scene(demo_scene(texture)?);

    let camera = engine.camera_mut();
    camera.rotate_y(args.turn as f32 * ROTATE_STEP);
    camera.translate_x(args.strafe as f32 * TRANSLATE_STEP);

    let frame = engine.render_scene();
    let stats = engine.last_frame_stats();
    info!(
        "Rendered {} of {} triangles, {} pixels",
        stats.drawn(),
        stats.triangles,
        stats.pixels_written
    );

    frame
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    Ok(())
}
