//! Greedy edge collapse
//!
//! Pops the cheapest queued edge, merges its endpoints at the midpoint, and
//! repairs every dependent structure (vertex list, index list, adjacency,
//! incidence, queue) in one transaction. Vertex and triangle removal both
//! use swap-with-last, so the relocated element's identity has to be
//! threaded through all of them before the slot is reused.

use crate::adjacency::{AdjacencyMatrix, IncidenceSets};
use crate::cost::{collapse_cost, collapse_target};
use crate::queue::EdgeQueue;
use isomesh_core::{Error, Result, SurfaceMesh};
use rayon::prelude::*;

/// Tolerance-driven greedy mesh simplifier
///
/// Collapses edges in ascending cost order until no remaining edge costs
/// strictly less than `tolerance`. Termination is tolerance-driven, not
/// count-driven: there is no target vertex or triangle count.
pub struct GreedySimplifier {
    pub tolerance: f64,
}

impl GreedySimplifier {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Simplify `mesh` in place
    ///
    /// Positions survive a collapse but normals do not; the normal list is
    /// cleared and the caller recomputes it afterwards.
    pub fn simplify(&self, mesh: &mut SurfaceMesh) -> Result<()> {
        mesh.validate()?;
        if self.tolerance <= 0.0 {
            return Ok(());
        }
        mesh.normals.clear();

        let mut adj = AdjacencyMatrix::from_mesh(mesh);
        let mut inc = IncidenceSets::from_mesh(mesh);

        // Initial evaluation touches disjoint read-only data per edge
        let edges = adj.edges();
        let costs: Vec<f64> = edges
            .par_iter()
            .map(|&(r, c)| collapse_cost(mesh, &inc, r, c))
            .collect();

        let mut queue = EdgeQueue::new();
        for (&(r, c), &cost) in edges.iter().zip(costs.iter()) {
            if cost < self.tolerance {
                queue.push(r, c, cost);
            }
        }

        // Every collapse removes exactly one vertex
        let max_collapses = mesh.vertex_count();
        let mut collapses = 0usize;

        while let Some(((r, c), _)) = queue.pop() {
            if collapses >= max_collapses {
                return Err(Error::Algorithm(
                    "edge collapse exceeded the vertex budget without draining the queue"
                        .to_string(),
                ));
            }
            collapses += 1;
            self.collapse_edge(mesh, &mut adj, &mut inc, &mut queue, r, c);
        }

        Ok(())
    }

    /// Collapse edge `(r, c)`, `r < c`, merging `c` into `r`
    fn collapse_edge(
        &self,
        mesh: &mut SurfaceMesh,
        adj: &mut AdjacencyMatrix,
        inc: &mut IncidenceSets,
        queue: &mut EdgeQueue,
        r: usize,
        c: usize,
    ) {
        // Evict every queued edge whose cost this collapse invalidates
        let r_neighbors: Vec<usize> = adj.row(r).collect();
        for &n in &r_neighbors {
            queue.remove(r, n);
        }
        let c_neighbors: Vec<usize> = adj.row(c).collect();
        for &n in &c_neighbors {
            queue.remove(c, n);
        }

        // The last vertex will move into slot c; its queued edges keep
        // their costs but need c's identity before the swap happens
        let last_v = mesh.vertex_count() - 1;
        if last_v != c {
            let last_neighbors: Vec<usize> = adj.row(last_v).collect();
            for &n in &last_neighbors {
                queue.rename(last_v, c, n);
            }
        }

        // Midpoint merge, then fill c's slot with the last vertex
        mesh.vertices[r] = collapse_target(mesh, r, c);
        mesh.vertices.swap_remove(c);

        // Corner rewrite: c -> r, then relocated last vertex -> c
        let c_tris: Vec<usize> = inc.set(c).iter().copied().collect();
        for t in c_tris {
            for k in 0..3 {
                if mesh.indices[3 * t + k] == c {
                    mesh.indices[3 * t + k] = r;
                }
            }
        }
        if last_v != c {
            let last_tris: Vec<usize> = inc.set(last_v).iter().copied().collect();
            for t in last_tris {
                for k in 0..3 {
                    if mesh.indices[3 * t + k] == last_v {
                        mesh.indices[3 * t + k] = c;
                    }
                }
            }
        }

        // Adjacency follows the same merge-then-relocate order
        adj.merge_rows(r, c);
        adj.swap_remove_row(c);

        // Triangles incident to both endpoints collapsed to a point
        let mut collapsed = inc.merge(r, c);
        inc.swap_remove_set(c);

        // Delete them physically, highest slot first so pending indices
        // stay valid across the swaps
        collapsed.sort_unstable_by(|a, b| b.cmp(a));
        for t in collapsed {
            remove_triangle_swap(mesh, inc, t);
        }

        // Fresh costs for everything now touching r
        let r_neighbors: Vec<usize> = adj.row(r).collect();
        for &n in &r_neighbors {
            let (a, b) = (r.min(n), r.max(n));
            let cost = collapse_cost(mesh, inc, a, b);
            if cost < self.tolerance {
                queue.push(a, b, cost);
            }
        }
    }
}

/// Delete triangle `t` by moving the last index triple into its slot
///
/// Detaches `t` from its corners' incidence sets and relabels the moved
/// triangle in the sets of every corner it touches.
fn remove_triangle_swap(mesh: &mut SurfaceMesh, inc: &mut IncidenceSets, t: usize) {
    let last_t = mesh.triangle_count() - 1;
    let [a, b, c] = mesh.triangle(t);
    inc.remove(a, t);
    inc.remove(b, t);
    inc.remove(c, t);
    if t != last_t {
        let corners = mesh.triangle(last_t);
        for &v in &corners {
            inc.remove(v, last_t);
        }
        for &v in &corners {
            inc.insert(v, t);
        }
        for k in 0..3 {
            mesh.indices[3 * t + k] = mesh.indices[3 * last_t + k];
        }
    }
    mesh.indices.truncate(3 * last_t);
}

#[cfg(test)]
mod tests {
    use super::*;
    use isomesh_core::Point3f;

    fn plane_grid(size: usize) -> SurfaceMesh {
        let mut mesh = SurfaceMesh::new();
        for y in 0..size {
            for x in 0..size {
                mesh.add_vertex(Point3f::new(x as f32, y as f32, 0.0));
            }
        }
        for y in 0..(size - 1) {
            for x in 0..(size - 1) {
                let tl = y * size + x;
                let tr = tl + 1;
                let bl = (y + 1) * size + x;
                let br = bl + 1;
                mesh.push_triangle(tl, bl, tr);
                mesh.push_triangle(tr, bl, br);
            }
        }
        mesh
    }

    fn curved_grid(size: usize) -> SurfaceMesh {
        let mut mesh = plane_grid(size);
        for (i, v) in mesh.vertices.iter_mut().enumerate() {
            let fx = (i % size) as f32 / (size - 1) as f32 * std::f32::consts::PI;
            let fy = (i / size) as f32 / (size - 1) as f32 * std::f32::consts::PI;
            v.z = fx.sin() * fy.sin() * 2.0;
        }
        mesh
    }

    fn tetrahedron() -> SurfaceMesh {
        SurfaceMesh::from_vertices_and_indices(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.5, 1.0, 0.0),
                Point3f::new(0.5, 0.5, 1.0),
            ],
            vec![0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3],
        )
    }

    fn assert_indices_in_range(mesh: &SurfaceMesh) {
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_zero_tolerance_is_noop() {
        let mut mesh = curved_grid(5);
        let vertices = mesh.vertices.clone();
        let indices = mesh.indices.clone();
        GreedySimplifier::new(0.0).simplify(&mut mesh).unwrap();
        assert_eq!(mesh.vertices, vertices);
        assert_eq!(mesh.indices, indices);
    }

    #[test]
    fn test_flat_grid_collapses_heavily() {
        let mut mesh = plane_grid(6);
        let v0 = mesh.vertex_count();
        let t0 = mesh.triangle_count();
        GreedySimplifier::new(1e-9).simplify(&mut mesh).unwrap();
        assert!(mesh.vertex_count() < v0);
        assert!(mesh.triangle_count() <= t0);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn test_counts_never_increase() {
        let mut mesh = curved_grid(8);
        let v0 = mesh.vertex_count();
        let t0 = mesh.triangle_count();
        GreedySimplifier::new(0.05).simplify(&mut mesh).unwrap();
        assert!(mesh.vertex_count() <= v0);
        assert!(mesh.triangle_count() <= t0);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn test_tiny_tolerance_preserves_tetrahedron() {
        let mut mesh = tetrahedron();
        GreedySimplifier::new(1e-12).simplify(&mut mesh).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_generous_tolerance_terminates() {
        let mut mesh = curved_grid(20);
        assert!(mesh.triangle_count() > 700);
        GreedySimplifier::new(1e6).simplify(&mut mesh).unwrap();
        assert_indices_in_range(&mesh);
        assert!(mesh.vertex_count() < 400);
    }

    #[test]
    fn test_ten_thousand_triangle_mesh_terminates() {
        let mut mesh = curved_grid(72);
        assert!(mesh.triangle_count() > 10_000);
        let v0 = mesh.vertex_count();
        GreedySimplifier::new(0.2).simplify(&mut mesh).unwrap();
        assert_indices_in_range(&mesh);
        assert!(mesh.vertex_count() < v0);
        // Bookkeeping survives thousands of swap-remove relocations: no
        // triangle may be left with a repeated corner
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t);
            assert!(a != b && b != c && a != c, "triangle {t} has repeated corners");
        }
    }

    #[test]
    fn test_simplify_clears_normals() {
        let mut mesh = curved_grid(5);
        mesh.compute_default_normals();
        GreedySimplifier::new(0.01).simplify(&mut mesh).unwrap();
        assert!(mesh.normals.is_empty());
    }

    #[test]
    fn test_malformed_mesh_rejected() {
        let mut mesh = SurfaceMesh::from_vertices_and_indices(
            vec![Point3f::origin()],
            vec![0, 0, 4],
        );
        assert!(GreedySimplifier::new(0.5).simplify(&mut mesh).is_err());
    }
}
