//! The shared surface mesh container
//!
//! `SurfaceMesh` is the single output object threaded through the whole
//! pipeline: the grid walker appends into it, the sanitizer and the
//! simplifier shrink it in place.

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Fallback normal for vertices with no accumulated face normal
const FALLBACK_NORMAL: [f32; 3] = [1.0, 0.0, 0.0];

/// A triangle mesh with a flat index list
///
/// `indices` has stride 3: each consecutive triple of entries is one
/// triangle, in emitted winding order. `normals` shares the vertex index
/// space but may be shorter than `vertices` until
/// [`compute_default_normals`](SurfaceMesh::compute_default_normals) runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceMesh {
    pub vertices: Vec<Point3f>,
    pub normals: Vec<Vector3f>,
    pub indices: Vec<usize>,
}

impl SurfaceMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertex positions and a flat index list
    pub fn from_vertices_and_indices(vertices: Vec<Point3f>, indices: Vec<usize>) -> Self {
        Self {
            vertices,
            normals: Vec::new(),
            indices,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Add a vertex, returning its index
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Append one triangle to the index list
    pub fn push_triangle(&mut self, a: usize, b: usize, c: usize) {
        self.indices.push(a);
        self.indices.push(b);
        self.indices.push(c);
    }

    /// Corner indices of triangle `t`
    pub fn triangle(&self, t: usize) -> [usize; 3] {
        [
            self.indices[3 * t],
            self.indices[3 * t + 1],
            self.indices[3 * t + 2],
        ]
    }

    /// Check the structural contracts of the index list
    ///
    /// The index list length must be a multiple of 3 and every entry must
    /// reference an existing vertex. A failure here means the caller handed
    /// over a malformed mesh.
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(Error::InvariantViolation(format!(
                "index list length {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        for (pos, &idx) in self.indices.iter().enumerate() {
            if idx >= self.vertices.len() {
                return Err(Error::InvariantViolation(format!(
                    "index {} at position {} exceeds vertex count {}",
                    idx,
                    pos,
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }

    /// Recompute per-vertex normals from face geometry
    ///
    /// Resizes `normals` to match `vertices`, accumulates each triangle's
    /// unit face normal into its three corners (unweighted), then
    /// normalizes. Vertices referenced by no triangle get the fixed
    /// fallback `(1, 0, 0)`.
    pub fn compute_default_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.vertices.len(), Vector3f::zeros());

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            let e1 = self.vertices[b] - self.vertices[a];
            let e2 = self.vertices[c] - self.vertices[a];
            let mut n = e1.cross(&e2);
            if n.norm_squared() > 0.0 {
                n.normalize_mut();
            }
            self.normals[a] += n;
            self.normals[b] += n;
            self.normals[c] += n;
        }

        for n in &mut self.normals {
            if n.norm_squared() > 0.0 {
                n.normalize_mut();
            } else {
                *n = Vector3f::from(FALLBACK_NORMAL);
            }
        }
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
        self.indices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_mesh() {
        let mesh = SurfaceMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_add_vertex_and_triangle() {
        let mut mesh = SurfaceMesh::new();
        let a = mesh.add_vertex(Point3f::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3f::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3f::new(0.0, 1.0, 0.0));
        mesh.push_triangle(a, b, c);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_ragged_index_list() {
        let mut mesh = SurfaceMesh::new();
        mesh.add_vertex(Point3f::origin());
        mesh.indices = vec![0, 0];
        assert!(matches!(
            mesh.validate(),
            Err(crate::Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = SurfaceMesh::new();
        mesh.add_vertex(Point3f::origin());
        mesh.indices = vec![0, 0, 7];
        assert!(matches!(
            mesh.validate(),
            Err(crate::Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_default_normals_single_triangle() {
        let mut mesh = SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        );
        mesh.compute_default_normals();
        assert_eq!(mesh.normals.len(), 3);
        for n in &mesh.normals {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_default_normals_unreferenced_vertex_fallback() {
        let mut mesh = SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(5.0, 5.0, 5.0),
            ],
            vec![0, 1, 2],
        );
        mesh.compute_default_normals();
        assert_eq!(mesh.normals.len(), 4);
        assert_eq!(mesh.normals[3], Vector3f::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_default_normals_resize_overwrites_stale() {
        let mut mesh = SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        );
        mesh.normals.push(Vector3f::new(9.0, 9.0, 9.0));
        mesh.compute_default_normals();
        assert_eq!(mesh.normals.len(), 3);
        assert_relative_eq!(mesh.normals[0].norm(), 1.0, epsilon = 1e-6);
    }
}
