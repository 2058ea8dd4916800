//! Scene geometry: vertices, fan-triangulated polygons and per-triangle
//! screen-space bounds.
//!
//! A [`Polygon`] is built once and never touched by rendering. Every frame
//! the engine copies each triangle's three vertices, projects the copy and
//! recomputes the copy's [`BoundingBox`].

use std::fmt;
use std::sync::Arc;

use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::texture::Sampler;

/// A texture or normal map shared between polygons.
pub type SharedSampler = Arc<dyn Sampler + Send + Sync>;

/// Error type for polygon construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    TooFewVertices {
        polygon: String,
        count: usize,
    },
    TooFewSides {
        polygon: String,
        sides: usize,
    },
    InvalidVertexIndex {
        polygon: String,
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::TooFewVertices { polygon, count } => write!(
                f,
                "polygon '{}' has {} vertices, at least 3 are required",
                polygon, count
            ),
            SceneError::TooFewSides { polygon, sides } => write!(
                f,
                "regular polygon '{}' has {} sides, at least 3 are required",
                polygon, sides
            ),
            SceneError::InvalidVertexIndex {
                polygon,
                triangle,
                index,
                vertex_count,
            } => write!(
                f,
                "triangle {} of polygon '{}' references vertex {} but only {} exist",
                triangle, polygon, index, vertex_count
            ),
        }
    }
}

impl std::error::Error for SceneError {}

/// One corner of a polygon.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    /// Homogeneous position. World space in a [`Polygon`], pixel space
    /// (with post-divide depth in `z`) once projected.
    pub position: Vec4,
    /// Base color, channels in [0, 255].
    pub color: Vec3,
    /// Surface normal, `w = 0`.
    pub normal: Vec4,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec4, color: Vec3, normal: Vec4, uv: Vec2) -> Self {
        Self {
            position,
            color,
            normal,
            uv,
        }
    }
}

/// Axis-aligned screen-space bounds of a triangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl BoundingBox {
    pub fn from_vertices(vertices: &[Vertex; 3]) -> Self {
        let [a, b, c] = vertices.map(|v| v.position);
        Self {
            min_x: a.x.min(b.x).min(c.x),
            max_x: a.x.max(b.x).max(c.x),
            min_y: a.y.min(b.y).min(c.y),
            max_y: a.y.max(b.y).max(c.y),
        }
    }

    /// True when the box lies entirely outside `[0, width) x [0, height)`.
    ///
    /// Conservative: a box that merely touches the screen is kept.
    pub fn is_off_screen(&self, width: u32, height: u32) -> bool {
        self.max_x <= 0.0
            || self.min_x >= width as f32
            || self.max_y <= 0.0
            || self.min_y >= height as f32
    }

    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        self.min_x <= x && x <= self.max_x
    }
}

/// Three indices into the owning polygon's vertex list.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub indices: [usize; 3],
    pub bounding_box: BoundingBox,
    pub off_screen: bool,
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self {
            indices,
            bounding_box: BoundingBox::default(),
            off_screen: false,
        }
    }

    /// Recomputes the box and off-screen flag from projected vertices.
    pub fn compute_bounding_box(&mut self, projected: &[Vertex; 3], width: u32, height: u32) {
        self.bounding_box = BoundingBox::from_vertices(projected);
        self.off_screen = self.bounding_box.is_off_screen(width, height);
    }
}

/// A convex, planar polygon with optional texture and normal map.
#[derive(Clone)]
pub struct Polygon {
    name: String,
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
    texture: Option<SharedSampler>,
    normal_map: Option<SharedSampler>,
}

impl fmt::Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polygon")
            .field("name", &self.name)
            .field("vertices", &self.vertices.len())
            .field("triangles", &self.triangles.len())
            .field("textured", &self.texture.is_some())
            .field("normal_mapped", &self.normal_map.is_some())
            .finish()
    }
}

impl Polygon {
    /// Creates a polygon from an ordered vertex list and fan-triangulates it.
    ///
    /// The vertices must describe a convex polygon. Concave input is not
    /// detected and produces overlapping or missing triangles.
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>) -> Result<Self, SceneError> {
        let name = name.into();
        if vertices.len() < 3 {
            return Err(SceneError::TooFewVertices {
                polygon: name,
                count: vertices.len(),
            });
        }

        let mut polygon = Self::bare(name, vertices);
        polygon.triangulate();
        Ok(polygon)
    }

    /// Creates a polygon with an explicit triangle list.
    ///
    /// Every index is checked here so that rendering can index vertices
    /// without bounds failures.
    pub fn with_triangles(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        triangles: &[[usize; 3]],
    ) -> Result<Self, SceneError> {
        let name = name.into();
        if vertices.len() < 3 {
            return Err(SceneError::TooFewVertices {
                polygon: name,
                count: vertices.len(),
            });
        }

        for (triangle, indices) in triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(SceneError::InvalidVertexIndex {
                    polygon: name,
                    triangle,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let mut polygon = Self::bare(name, vertices);
        polygon.triangles = triangles.iter().copied().map(Triangle::new).collect();
        Ok(polygon)
    }

    /// Creates a regular polygon with `sides` corners of a single color.
    ///
    /// The first corner sits at `(0, 1)` on the unit circle before scaling.
    /// The shape is scaled, rotated by `rotation_degrees` about its center
    /// and moved to `center`. It faces +Z.
    pub fn regular(
        name: impl Into<String>,
        sides: usize,
        color: Vec3,
        center: Vec3,
        rotation_degrees: f32,
        scale: Vec3,
    ) -> Result<Self, SceneError> {
        let name = name.into();
        if sides < 3 {
            return Err(SceneError::TooFewSides {
                polygon: name,
                sides,
            });
        }

        let placement = Mat4::translation(center.x, center.y, center.z)
            * Mat4::rotation_z(rotation_degrees.to_radians())
            * Mat4::scaling(scale.x, scale.y, scale.z);
        let step = 360.0 / sides as f32;
        let normal = Vec4::direction(0.0, 0.0, 1.0);

        let vertices = (0..sides)
            .map(|i| {
                let corner = Mat4::rotation_z((i as f32 * step).to_radians())
                    * Vec4::point(0.0, 1.0, 0.0);
                let uv = Vec2::new((corner.x + 1.0) * 0.5, (corner.y + 1.0) * 0.5);
                Vertex::new(placement * corner, color, normal, uv)
            })
            .collect();

        Self::new(name, vertices)
    }

    fn bare(name: String, vertices: Vec<Vertex>) -> Self {
        Self {
            name,
            vertices,
            triangles: Vec::new(),
            texture: None,
            normal_map: None,
        }
    }

    /// Rebuilds the triangle list as a fan around vertex 0.
    ///
    /// An n-vertex polygon yields the n - 2 triangles `(0, i, i + 1)`.
    pub fn triangulate(&mut self) {
        let count = self.vertices.len().saturating_sub(2);
        self.triangles.clear();
        self.triangles.reserve(count);
        self.triangles
            .extend((1..=count).map(|i| Triangle::new([0, i, i + 1])));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Copies of the three vertices a triangle of this polygon references.
    ///
    /// Indices are validated at construction.
    #[inline]
    pub fn triangle_vertices(&self, triangle: &Triangle) -> [Vertex; 3] {
        triangle.indices.map(|i| self.vertices[i])
    }

    // ============ Texture ============

    pub fn set_texture(&mut self, texture: SharedSampler) {
        self.texture = Some(texture);
    }

    pub fn clear_texture(&mut self) {
        self.texture = None;
    }

    pub fn texture(&self) -> Option<&(dyn Sampler + Send + Sync)> {
        self.texture.as_deref()
    }

    pub fn set_normal_map(&mut self, normal_map: SharedSampler) {
        self.normal_map = Some(normal_map);
    }

    pub fn normal_map(&self) -> Option<&(dyn Sampler + Send + Sync)> {
        self.normal_map.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;
    use approx::assert_relative_eq;

    fn at(x: f32, y: f32) -> Vertex {
        Vertex::new(
            Vec4::point(x, y, 0.0),
            Vec3::splat(255.0),
            Vec4::direction(0.0, 0.0, 1.0),
            Vec2::ZERO,
        )
    }

    fn triangle_area(polygon: &Polygon, t: &Triangle) -> f32 {
        let [a, b, c] = polygon.triangle_vertices(t).map(|v| v.position.xyz());
        (b - a).cross(c - a).magnitude() * 0.5
    }

    /// Shoelace formula over the xy-projection.
    fn polygon_area(vertices: &[Vertex]) -> f32 {
        let n = vertices.len();
        let twice: f32 = (0..n)
            .map(|i| {
                let p = vertices[i].position;
                let q = vertices[(i + 1) % n].position;
                p.x * q.y - q.x * p.y
            })
            .sum();
        twice.abs() * 0.5
    }

    #[test]
    fn fan_triangulation_yields_n_minus_two_triangles() {
        for sides in 3..12 {
            let polygon =
                Polygon::regular("ngon", sides, Vec3::ONE, Vec3::ZERO, 0.0, Vec3::ONE).unwrap();
            assert_eq!(polygon.triangles().len(), sides - 2);
            assert!(polygon.triangles().iter().all(|t| t.indices[0] == 0));
        }
    }

    #[test]
    fn fan_triangle_areas_sum_to_polygon_area() {
        let polygon = Polygon::regular(
            "hexagon",
            6,
            Vec3::ONE,
            Vec3::new(3.0, -2.0, 0.0),
            17.0,
            Vec3::new(2.0, 1.5, 1.0),
        )
        .unwrap();
        let sum: f32 = polygon
            .triangles()
            .iter()
            .map(|t| triangle_area(&polygon, t))
            .sum();
        assert_relative_eq!(sum, polygon_area(polygon.vertices()), epsilon = 1e-4);
    }

    #[test]
    fn quad_triangulates_into_consecutive_fans() {
        let polygon = Polygon::new(
            "quad",
            vec![at(0.0, 0.0), at(1.0, 0.0), at(1.0, 1.0), at(0.0, 1.0)],
        )
        .unwrap();
        let indices: Vec<_> = polygon.triangles().iter().map(|t| t.indices).collect();
        assert_eq!(indices, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn fewer_than_three_vertices_is_rejected() {
        let err = Polygon::new("line", vec![at(0.0, 0.0), at(1.0, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            SceneError::TooFewVertices {
                polygon: "line".into(),
                count: 2
            }
        );
    }

    #[test]
    fn out_of_range_triangle_index_is_rejected() {
        let err = Polygon::with_triangles(
            "broken",
            vec![at(0.0, 0.0), at(1.0, 0.0), at(1.0, 1.0)],
            &[[0, 1, 2], [0, 2, 3]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidVertexIndex {
                triangle: 1,
                index: 3,
                vertex_count: 3,
                ..
            }
        ));
    }

    #[test]
    fn regular_polygon_needs_three_sides() {
        assert!(Polygon::regular("digon", 2, Vec3::ONE, Vec3::ZERO, 0.0, Vec3::ONE).is_err());
    }

    #[test]
    fn regular_polygon_first_corner_points_up() {
        let polygon = Polygon::regular(
            "tri",
            3,
            Vec3::ONE,
            Vec3::new(1.0, 1.0, 0.0),
            0.0,
            Vec3::splat(2.0),
        )
        .unwrap();
        let first = polygon.vertices()[0].position;
        assert_relative_eq!(first.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(first.y, 3.0, epsilon = 1e-5);
        assert_relative_eq!(first.w, 1.0);
    }

    #[test]
    fn bounding_box_spans_projected_vertices() {
        let mut t = Triangle::new([0, 1, 2]);
        t.compute_bounding_box(&[at(10.0, 40.0), at(-5.0, 20.0), at(30.0, 25.0)], 512, 512);
        assert_eq!(
            t.bounding_box,
            BoundingBox {
                min_x: -5.0,
                max_x: 30.0,
                min_y: 20.0,
                max_y: 40.0
            }
        );
        assert!(!t.off_screen);
    }

    #[test]
    fn off_screen_flag_covers_every_side() {
        let cases = [
            [at(-30.0, 10.0), at(-1.0, 20.0), at(-10.0, 30.0)],
            [at(512.0, 10.0), at(600.0, 20.0), at(530.0, 30.0)],
            [at(10.0, -30.0), at(20.0, -1.0), at(30.0, -10.0)],
            [at(10.0, 512.0), at(20.0, 700.0), at(30.0, 600.0)],
        ];
        for vertices in cases {
            let mut t = Triangle::new([0, 1, 2]);
            t.compute_bounding_box(&vertices, 512, 512);
            assert!(t.off_screen, "{:?}", t.bounding_box);
        }
    }

    #[test]
    fn straddling_triangle_is_not_culled() {
        let mut t = Triangle::new([0, 1, 2]);
        t.compute_bounding_box(&[at(-50.0, -50.0), at(600.0, 10.0), at(10.0, 600.0)], 512, 512);
        assert!(!t.off_screen);
    }

    #[test]
    fn texture_is_shared_between_clones() {
        let mut polygon =
            Polygon::regular("tex", 4, Vec3::ONE, Vec3::ZERO, 0.0, Vec3::ONE).unwrap();
        polygon.set_texture(Arc::new(Texture::solid(2, 2, [1, 2, 3])));
        let copy = polygon.clone();
        assert_eq!(copy.texture().map(|t| t.pixel_at(0, 0)), Some([1, 2, 3]));
        assert!(copy.normal_map().is_none());
    }
}
