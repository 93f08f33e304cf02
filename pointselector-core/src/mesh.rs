//! Surface model data structures

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle surface mesh loaded from a model file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceModel {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
}

impl SurfaceModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
        }
    }

    /// Create a model from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the model is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Axis-aligned bounding box as (min, max), or `None` for a model
    /// without vertices.
    pub fn bounding_box(&self) -> Option<(Point3f, Point3f)> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;

        for v in &self.vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);

            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Some((min, max))
    }

    /// Faces whose indices point past the vertex list
    pub fn invalid_faces(&self) -> usize {
        let n = self.vertices.len();
        self.faces
            .iter()
            .filter(|face| face.iter().any(|&i| i >= n))
            .count()
    }
}

impl Default for SurfaceModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> SurfaceModel {
        SurfaceModel::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
                Point3f::new(0.0, 3.0, 0.0),
                Point3f::new(0.0, 0.0, -1.0),
            ],
            vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]],
        )
    }

    #[test]
    fn test_counts() {
        let model = tetrahedron();
        assert_eq!(model.vertex_count(), 4);
        assert_eq!(model.face_count(), 4);
        assert!(!model.is_empty());
        assert!(SurfaceModel::new().is_empty());
    }

    #[test]
    fn test_bounding_box() {
        let (min, max) = tetrahedron().bounding_box().unwrap();
        assert_eq!(min, Point3f::new(0.0, 0.0, -1.0));
        assert_eq!(max, Point3f::new(2.0, 3.0, 0.0));
        assert!(SurfaceModel::new().bounding_box().is_none());
    }

    #[test]
    fn test_set_normals_requires_matching_length() {
        let mut model = tetrahedron();
        model.set_normals(vec![Vector3f::new(0.0, 0.0, 1.0)]);
        assert!(model.normals.is_none());

        model.set_normals(vec![Vector3f::new(0.0, 0.0, 1.0); 4]);
        assert_eq!(model.normals.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_invalid_faces() {
        let mut model = tetrahedron();
        assert_eq!(model.invalid_faces(), 0);
        model.faces.push([0, 1, 9]);
        assert_eq!(model.invalid_faces(), 1);
    }
}
