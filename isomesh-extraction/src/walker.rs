//! Whole-grid traversal
//!
//! `extract_welded` walks every cell in raster order and shares edge
//! vertices between neighboring cells through a cache keyed by the global
//! edge identity, so the assembled mesh has no cracks along cell borders.
//! `extract_triangle_soup` is the parallel flat form: every cell emits
//! independent triangles, duplicates and all, and the caller welds later
//! if needed.

use crate::cell::{triangulate_cell, triangulate_cell_welded, GridCell, CORNER_OFFSETS, EDGE_CORNERS};
use crate::field::ScalarField;
use isomesh_core::SurfaceMesh;
use rayon::prelude::*;
use std::collections::HashMap;

/// Global identity of a cube edge: its lower grid corner plus the axis it
/// runs along (0 = x, 1 = y, 2 = z)
type GlobalEdge = (usize, usize, usize, u8);

fn global_edge(i: usize, j: usize, k: usize, edge: usize) -> GlobalEdge {
    let [a, b] = EDGE_CORNERS[edge];
    let ca = CORNER_OFFSETS[a];
    let cb = CORNER_OFFSETS[b];
    let axis = (0..3)
        .position(|d| ca[d] != cb[d])
        .unwrap_or(0) as u8;
    (
        i + ca[0].min(cb[0]),
        j + ca[1].min(cb[1]),
        k + ca[2].min(cb[2]),
        axis,
    )
}

/// Extract the welded isosurface mesh from `field`
///
/// Sequential by necessity: each cell consults vertex indices resolved by
/// the cells processed before it.
pub fn extract_welded<F: ScalarField + ?Sized>(field: &F, iso_level: f32) -> SurfaceMesh {
    let [nx, ny, nz] = field.dimensions();
    let mut mesh = SurfaceMesh::new();
    let mut resolved: HashMap<GlobalEdge, usize> = HashMap::new();

    for i in 0..nx.saturating_sub(1) {
        for j in 0..ny.saturating_sub(1) {
            for k in 0..nz.saturating_sub(1) {
                let cell = GridCell::from_field(field, i, j, k);
                let mut slots = [None; 12];
                for e in 0..12 {
                    if let Some(&idx) = resolved.get(&global_edge(i, j, k, e)) {
                        slots[e] = Some(idx);
                    }
                }
                triangulate_cell_welded(&cell, iso_level, &mut slots, &mut mesh);
                for (e, slot) in slots.iter().enumerate() {
                    if let Some(idx) = slot {
                        resolved.insert(global_edge(i, j, k, e), *idx);
                    }
                }
            }
        }
    }

    mesh
}

/// Extract an unwelded triangle soup in parallel
///
/// Each cell's output is independent, so cells are processed with rayon
/// and merged with per-cell vertex offsets. Every triangle gets three
/// fresh vertices; run the sanitizer to weld afterwards.
pub fn extract_triangle_soup<F: ScalarField + Sync + ?Sized>(
    field: &F,
    iso_level: f32,
) -> SurfaceMesh {
    let [nx, ny, nz] = field.dimensions();
    let mut cells = Vec::new();
    for i in 0..nx.saturating_sub(1) {
        for j in 0..ny.saturating_sub(1) {
            for k in 0..nz.saturating_sub(1) {
                cells.push((i, j, k));
            }
        }
    }

    let per_cell: Vec<Vec<[isomesh_core::Point3f; 3]>> = cells
        .par_iter()
        .map(|&(i, j, k)| {
            let cell = GridCell::from_field(field, i, j, k);
            let mut triangles = Vec::new();
            triangulate_cell(&cell, iso_level, &mut triangles);
            triangles
        })
        .collect();

    let mut mesh = SurfaceMesh::new();
    for triangles in per_cell {
        for triangle in triangles {
            let base = mesh.vertex_count();
            for p in triangle {
                mesh.add_vertex(p);
            }
            mesh.push_triangle(base, base + 1, base + 2);
        }
    }
    mesh
}
