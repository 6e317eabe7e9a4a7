//! Mesh simplification by greedy edge collapse
//!
//! This crate reduces a sanitized triangle mesh in place by repeatedly
//! collapsing the cheapest edge, where an edge's cost is the tetrahedral
//! volume swept by the surrounding triangles when its endpoints merge at
//! their midpoint. Collapsing stops once no edge costs less than the
//! caller's tolerance.

pub mod adjacency;
pub mod cost;
pub mod queue;
pub mod collapse;

pub use adjacency::*;
pub use cost::*;
pub use queue::*;
pub use collapse::*;

use isomesh_core::{Result, SurfaceMesh};

/// Simplify `mesh` in place with the given swept-volume tolerance
///
/// A tolerance of zero (or below) leaves the mesh untouched. The mesh must
/// already be sanitized: duplicate vertices would hide adjacency and
/// degenerate triangles would produce spurious zero-cost edges.
pub fn simplify(mesh: &mut SurfaceMesh, tolerance: f64) -> Result<()> {
    GreedySimplifier::new(tolerance).simplify(mesh)
}
