//! Edge collapse cost
//!
//! The cost of collapsing an edge to its midpoint is the total tetrahedral
//! volume (times six) swept between the old triangles and the collapsed
//! geometry. Flat neighborhoods sweep almost nothing, so low cost marks an
//! edge as safe to remove.

use crate::adjacency::IncidenceSets;
use isomesh_core::{Point3f, SurfaceMesh};
use nalgebra::Matrix4;

/// Midpoint collapse target for edge `(a, b)`
pub fn collapse_target(mesh: &SurfaceMesh, a: usize, b: usize) -> Point3f {
    Point3f::from((mesh.vertices[a].coords + mesh.vertices[b].coords) * 0.5)
}

/// Six times the volume of the tetrahedron spanned by triangle `t` and `p`
///
/// Absolute value of the determinant of the 4x4 matrix whose columns are
/// the three triangle corners and `p`, each padded with a 1.
fn swept_volume(mesh: &SurfaceMesh, t: usize, p: &Point3f) -> f64 {
    let [a, b, c] = mesh.triangle(t);
    let (v0, v1, v2) = (mesh.vertices[a], mesh.vertices[b], mesh.vertices[c]);
    let m = Matrix4::<f64>::new(
        v0.x as f64, v1.x as f64, v2.x as f64, p.x as f64,
        v0.y as f64, v1.y as f64, v2.y as f64, p.y as f64,
        v0.z as f64, v1.z as f64, v2.z as f64, p.z as f64,
        1.0, 1.0, 1.0, 1.0,
    );
    m.determinant().abs()
}

/// Removal cost of edge `(a, b)`, with `a < b`
///
/// Sums the swept volume of every triangle incident to `a` that does not
/// also touch `b`, plus every triangle incident to `b` unconditionally.
/// Triangles spanning both endpoints are therefore counted once, from the
/// `b` side. Raw summed volume, no normalization; the caller compares it
/// directly against the tolerance.
pub fn collapse_cost(mesh: &SurfaceMesh, incidence: &IncidenceSets, a: usize, b: usize) -> f64 {
    debug_assert!(a < b);
    let target = collapse_target(mesh, a, b);
    let mut cost = 0.0;
    for &t in incidence.set(a) {
        if !incidence.set(b).contains(&t) {
            cost += swept_volume(mesh, t, &target);
        }
    }
    for &t in incidence.set(b) {
        cost += swept_volume(mesh, t, &target);
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_swept_volume_unit_tetrahedron() {
        let mesh = SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        );
        // Apex at unit height over a half-unit base: volume 1/6, so 6V = 1
        let v = swept_volume(&mesh, 0, &Point3f::new(0.0, 0.0, 1.0));
        assert_relative_eq!(v, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_swept_volume_coplanar_is_zero() {
        let mesh = SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        );
        let v = swept_volume(&mesh, 0, &Point3f::new(0.3, 0.3, 0.0));
        assert_relative_eq!(v, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_quad_interior_edge_costs_nothing() {
        let mesh = SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 1, 3, 2],
        );
        let inc = IncidenceSets::from_mesh(&mesh);
        assert_relative_eq!(collapse_cost(&mesh, &inc, 1, 2), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bent_quad_edge_has_positive_cost() {
        // Same quad but folded along the shared edge
        let mesh = SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(1.0, 1.0, 1.0),
            ],
            vec![0, 1, 2, 1, 3, 2],
        );
        let inc = IncidenceSets::from_mesh(&mesh);
        assert!(collapse_cost(&mesh, &inc, 0, 1) > 0.0);
    }
}
