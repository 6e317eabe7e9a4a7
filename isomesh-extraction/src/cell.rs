//! Per-cell triangulation
//!
//! One cubic cell at a time: compute the corner-sign configuration, look up
//! the crossed edges, interpolate a vertex on each, and connect them into
//! triangles per the case table. Two variants share the interpolation
//! rules: a flat one that emits free-standing triangles, and a welding one
//! that reuses vertex indices already resolved by neighboring cells.

use crate::field::ScalarField;
use crate::tables::{EDGE_TABLE, TRIANGLE_TABLE};
use isomesh_core::{Point3f, SurfaceMesh};

/// Grid offsets of the 8 cube corners, standard Marching Cubes numbering
pub const CORNER_OFFSETS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Corner pair spanned by each of the 12 cube edges
pub const EDGE_CORNERS: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Snap threshold for interpolation against corner values
const SNAP_EPS: f32 = 1e-5;

/// One cubic cell of the scan grid: 8 corner positions and values
///
/// Built fresh for each visited cell and dropped right after
/// triangulation.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub positions: [Point3f; 8],
    pub values: [f32; 8],
}

impl GridCell {
    /// Gather the cell with minimum corner at grid index `(i, j, k)`
    pub fn from_field<F: ScalarField + ?Sized>(field: &F, i: usize, j: usize, k: usize) -> Self {
        let mut positions = [Point3f::origin(); 8];
        let mut values = [0.0f32; 8];
        for (n, [di, dj, dk]) in CORNER_OFFSETS.iter().enumerate() {
            positions[n] = field.position(i + di, j + dj, k + dk);
            values[n] = field.value(i + di, j + dj, k + dk);
        }
        Self { positions, values }
    }
}

/// 8-bit corner-sign configuration: bit `i` set iff corner `i` is strictly
/// below the iso-level
pub fn cube_index(values: &[f32; 8], iso_level: f32) -> usize {
    let mut index = 0usize;
    for (i, &v) in values.iter().enumerate() {
        if v < iso_level {
            index |= 1 << i;
        }
    }
    index
}

/// Locate the iso-crossing on the edge between `(p1, val1)` and `(p2, val2)`
///
/// Corner values within `1e-5` of the iso-level snap to the corner
/// exactly, and a near-flat value slope returns `p1` rather than dividing
/// by it. These thresholds are load-bearing: they decide vertex identity
/// on boundary cases and must not change.
pub fn interpolate_vertex(
    iso_level: f32,
    p1: Point3f,
    p2: Point3f,
    val1: f32,
    val2: f32,
) -> Point3f {
    if (iso_level - val1).abs() < SNAP_EPS {
        return p1;
    }
    if (iso_level - val2).abs() < SNAP_EPS {
        return p2;
    }
    if (val1 - val2).abs() < SNAP_EPS {
        return p1;
    }
    let t = (iso_level - val1) / (val2 - val1);
    p1 + (p2 - p1) * t
}

/// Triangulate one cell into free-standing triangles
///
/// Emits 0 to 5 corner-position triples. Triangles whose cross-product
/// normal has non-positive squared length are dropped.
pub fn triangulate_cell(cell: &GridCell, iso_level: f32, triangles: &mut Vec<[Point3f; 3]>) {
    let config = cube_index(&cell.values, iso_level);
    let crossed = EDGE_TABLE[config];
    if crossed == 0 {
        return;
    }

    let mut edge_vertices = [Point3f::origin(); 12];
    for (e, [a, b]) in EDGE_CORNERS.iter().enumerate() {
        if crossed & (1 << e) != 0 {
            edge_vertices[e] = interpolate_vertex(
                iso_level,
                cell.positions[*a],
                cell.positions[*b],
                cell.values[*a],
                cell.values[*b],
            );
        }
    }

    let row = &TRIANGLE_TABLE[config];
    let mut i = 0;
    while row[i] != -1 {
        let p0 = edge_vertices[row[i] as usize];
        let p1 = edge_vertices[row[i + 1] as usize];
        let p2 = edge_vertices[row[i + 2] as usize];
        if (p1 - p0).cross(&(p2 - p0)).norm_squared() > 0.0 {
            triangles.push([p0, p1, p2]);
        }
        i += 3;
    }
}

/// Triangulate one cell into a shared mesh, welding along resolved edges
///
/// `slots` carries one entry per cube edge: `Some(index)` when a
/// neighboring cell (or an earlier triangle of this cell) already resolved
/// a mesh vertex for that edge, `None` otherwise. Unresolved crossings are
/// interpolated up front but only committed to the mesh the first time a
/// non-degenerate triangle actually references them. Committing a slot
/// also aliases every later slot whose interpolated position is exactly
/// equal, so edges meeting at a shared point weld within the cell too.
pub fn triangulate_cell_welded(
    cell: &GridCell,
    iso_level: f32,
    slots: &mut [Option<usize>; 12],
    mesh: &mut SurfaceMesh,
) {
    let config = cube_index(&cell.values, iso_level);
    let crossed = EDGE_TABLE[config];
    if crossed == 0 {
        return;
    }

    let mut interpolated = [None::<Point3f>; 12];
    for (e, [a, b]) in EDGE_CORNERS.iter().enumerate() {
        if crossed & (1 << e) != 0 && slots[e].is_none() {
            interpolated[e] = Some(interpolate_vertex(
                iso_level,
                cell.positions[*a],
                cell.positions[*b],
                cell.values[*a],
                cell.values[*b],
            ));
        }
    }

    // Resolved slots take precedence; the rest fall back to this cell's
    // own interpolation. A slot with neither is an uncrossed edge, and a
    // triangle naming one is skipped outright.
    let slot_position = |slot: usize, slots: &[Option<usize>; 12], mesh: &SurfaceMesh| {
        slots[slot].map(|idx| mesh.vertices[idx]).or(interpolated[slot])
    };

    let row = &TRIANGLE_TABLE[config];
    let mut i = 0;
    while row[i] != -1 {
        let corners = [row[i] as usize, row[i + 1] as usize, row[i + 2] as usize];
        let found = (
            slot_position(corners[0], slots, mesh),
            slot_position(corners[1], slots, mesh),
            slot_position(corners[2], slots, mesh),
        );
        i += 3;

        let (Some(p0), Some(p1), Some(p2)) = found else {
            continue;
        };
        if (p1 - p0).cross(&(p2 - p0)).norm_squared() <= 0.0 {
            continue;
        }

        let positions = [p0, p1, p2];
        let mut indices = [0usize; 3];
        for (n, &slot) in corners.iter().enumerate() {
            indices[n] = match slots[slot] {
                Some(idx) => idx,
                None => {
                    let position = positions[n];
                    let idx = mesh.add_vertex(position);
                    slots[slot] = Some(idx);
                    // Alias later slots landing on the exact same point
                    for later in (slot + 1)..12 {
                        if slots[later].is_none() && interpolated[later] == Some(position) {
                            slots[later] = Some(idx);
                        }
                    }
                    idx
                }
            };
        }
        mesh.push_triangle(indices[0], indices[1], indices[2]);
    }
}
