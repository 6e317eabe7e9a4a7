//! Mesh sanitation
//!
//! Removes duplicate vertices and degenerate triangles in place. This runs
//! once after assembly (and always before simplification), so the naive
//! quadratic duplicate scan is acceptable.

use crate::error::Result;
use crate::mesh::SurfaceMesh;
use crate::point::{Point3f, Vector3f};

/// Squared distance below which two vertices count as the same point
pub const DEDUP_EPS_SQ: f32 = 1e-20;

/// Deduplicate vertices and drop degenerate triangles, in place
///
/// Vertices within [`DEDUP_EPS_SQ`] squared distance of an earlier vertex
/// are merged into it (first-seen order is kept). Normals ride along under
/// the same mapping; kept vertices past the end of the normal list simply
/// contribute no normal. Triangles left with two equal corners are deleted
/// by swapping the last index triple into their slot and truncating, so the
/// index list never holes.
///
/// Running this twice in a row is a fixed point.
pub fn sanitize(mesh: &mut SurfaceMesh) -> Result<()> {
    mesh.validate()?;

    // Unique subset of vertices, first-seen order
    let mut remap = vec![0usize; mesh.vertices.len()];
    let mut unique: Vec<Point3f> = Vec::new();
    let mut unique_normals: Vec<Vector3f> = Vec::new();

    for (i, v) in mesh.vertices.iter().enumerate() {
        let existing = unique
            .iter()
            .position(|q| (v - q).norm_squared() < DEDUP_EPS_SQ);
        match existing {
            Some(u) => remap[i] = u,
            None => {
                remap[i] = unique.len();
                unique.push(*v);
                if i < mesh.normals.len() && unique_normals.len() == unique.len() - 1 {
                    unique_normals.push(mesh.normals[i]);
                }
            }
        }
    }
    mesh.vertices = unique;
    mesh.normals = unique_normals;

    // Rewrite every corner through the mapping
    for idx in &mut mesh.indices {
        *idx = remap[*idx];
    }

    // Drop triangles that collapsed to an edge or a point
    let mut t = 0;
    while 3 * t < mesh.indices.len() {
        let [a, b, c] = mesh.triangle(t);
        if a == b || b == c || a == c {
            let last = mesh.indices.len() - 3;
            let base = 3 * t;
            for k in 0..3 {
                mesh.indices[base + k] = mesh.indices[last + k];
            }
            mesh.indices.truncate(last);
        } else {
            t += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles_with_duplicate_seam() -> SurfaceMesh {
        // Vertices 1 and 3 coincide, as do 2 and 4: a shared edge emitted
        // twice without welding.
        SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 3, 5, 4],
        )
    }

    #[test]
    fn test_dedup_merges_coincident_vertices() {
        let mut mesh = two_triangles_with_duplicate_seam();
        sanitize(&mut mesh).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        // Both triangles now reference the same seam vertices
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
        assert_eq!(mesh.triangle(1), [1, 3, 2]);
    }

    #[test]
    fn test_degenerate_triangle_removed() {
        let mut mesh = SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 1, 1],
        );
        sanitize(&mut mesh).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
    }

    #[test]
    fn test_dedup_creates_then_removes_degenerate() {
        // Second triangle has two corners that dedup to the same vertex
        let mut mesh = SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
            ],
            vec![0, 1, 2, 0, 1, 3],
        );
        sanitize(&mut mesh).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let mut mesh = two_triangles_with_duplicate_seam();
        sanitize(&mut mesh).unwrap();
        let vertices = mesh.vertices.clone();
        let indices = mesh.indices.clone();
        sanitize(&mut mesh).unwrap();
        assert_eq!(mesh.vertices, vertices);
        assert_eq!(mesh.indices, indices);
    }

    #[test]
    fn test_normals_follow_mapping() {
        let mut mesh = two_triangles_with_duplicate_seam();
        mesh.compute_default_normals();
        sanitize(&mut mesh).unwrap();
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
    }

    #[test]
    fn test_short_normal_list_is_truncated_not_padded() {
        let mut mesh = two_triangles_with_duplicate_seam();
        mesh.normals = vec![Vector3f::new(0.0, 0.0, 1.0); 2];
        sanitize(&mut mesh).unwrap();
        assert_eq!(mesh.normals.len(), 2);
    }

    #[test]
    fn test_malformed_mesh_rejected() {
        let mut mesh = SurfaceMesh::from_vertices_and_indices(
            vec![Point3f::origin()],
            vec![0, 0, 9],
        );
        assert!(sanitize(&mut mesh).is_err());
    }
}
