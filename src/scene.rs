//! Ordered collection of polygons.
//!
//! Render order is insertion order: polygon by polygon, then triangle by
//! triangle within each polygon.

use crate::polygon::Polygon;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    polygons: Vec<Polygon>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Removes every polygon.
    pub fn clear(&mut self) {
        self.polygons.clear();
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// First polygon with the given name. Names are diagnostic and need not
    /// be unique.
    pub fn find(&self, name: &str) -> Option<&Polygon> {
        self.polygons.iter().find(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.polygons.iter().map(|p| p.triangles().len()).sum()
    }
}

impl FromIterator<Polygon> for Scene {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self {
            polygons: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Polygon>> for Scene {
    fn from(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;

    fn ngon(name: &str, sides: usize) -> Polygon {
        Polygon::regular(name, sides, Vec3::ONE, Vec3::ZERO, 0.0, Vec3::ONE).unwrap()
    }

    #[test]
    fn keeps_insertion_order() {
        let scene: Scene = [ngon("a", 3), ngon("b", 5)].into_iter().collect();
        let names: Vec<_> = scene.polygons().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(scene.triangle_count(), 1 + 3);
    }

    #[test]
    fn find_returns_first_match() {
        let mut scene = Scene::new();
        scene.add(ngon("dup", 3));
        scene.add(ngon("dup", 6));
        assert_eq!(scene.find("dup").map(|p| p.vertices().len()), Some(3));
        assert!(scene.find("missing").is_none());
    }

    #[test]
    fn clear_empties_scene() {
        let mut scene = Scene::from(vec![ngon("a", 4)]);
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.triangle_count(), 0);
    }
}
