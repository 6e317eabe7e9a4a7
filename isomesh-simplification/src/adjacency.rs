//! Vertex adjacency and triangle incidence bookkeeping
//!
//! Both structures are built once from a sanitized mesh and then mutated in
//! lockstep with the mesh during collapsing. Vertex removal uses the same
//! swap-with-last pattern as the mesh itself, and the relocation helpers
//! report which index moved so every dependent structure can follow.

use isomesh_core::SurfaceMesh;
use std::collections::BTreeSet;

/// Sparse symmetric vertex-vertex adjacency
///
/// One ordered set of neighbor indices per vertex. Ordered iteration keeps
/// the collapse sequence deterministic.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMatrix {
    rows: Vec<BTreeSet<usize>>,
}

impl AdjacencyMatrix {
    /// Build adjacency from a mesh's index list
    pub fn from_mesh(mesh: &SurfaceMesh) -> Self {
        let mut adj = Self {
            rows: vec![BTreeSet::new(); mesh.vertex_count()],
        };
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t);
            adj.insert(a, b);
            adj.insert(b, c);
            adj.insert(c, a);
        }
        adj
    }

    /// Number of vertex rows
    pub fn vertex_count(&self) -> usize {
        self.rows.len()
    }

    /// Mark `a` and `b` adjacent (symmetric)
    pub fn insert(&mut self, a: usize, b: usize) {
        if a != b {
            self.rows[a].insert(b);
            self.rows[b].insert(a);
        }
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.rows[a].contains(&b)
    }

    /// Ordered neighbors of `v`
    pub fn row(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.rows[v].iter().copied()
    }

    /// All edges as `(r, c)` pairs with `r < c`
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for (r, row) in self.rows.iter().enumerate() {
            for &c in row.range(r + 1..) {
                edges.push((r, c));
            }
        }
        edges
    }

    /// Union `c`'s neighbors into `r`'s row and clear `c`'s
    ///
    /// Every neighbor of `c` is re-pointed at `r`; the `r`-`c` edge itself
    /// disappears.
    pub fn merge_rows(&mut self, r: usize, c: usize) {
        let c_row = std::mem::take(&mut self.rows[c]);
        for n in c_row {
            self.rows[n].remove(&c);
            if n != r {
                self.rows[n].insert(r);
                self.rows[r].insert(n);
            }
        }
        self.rows[r].remove(&c);
    }

    /// Remove row `c` by moving the last row into its slot
    ///
    /// Row `c` must already be empty. Returns the index the relocated row
    /// came from, or `None` when `c` was the last row.
    pub fn swap_remove_row(&mut self, c: usize) -> Option<usize> {
        debug_assert!(self.rows[c].is_empty());
        let last = self.rows.len() - 1;
        if c == last {
            self.rows.pop();
            return None;
        }
        let moved = std::mem::take(&mut self.rows[last]);
        for &n in &moved {
            self.rows[n].remove(&last);
            self.rows[n].insert(c);
        }
        self.rows[c] = moved;
        self.rows.pop();
        Some(last)
    }
}

/// Per-vertex sets of incident triangle indices
///
/// Triangle index = position in the mesh's flat index list divided by 3.
#[derive(Debug, Clone, Default)]
pub struct IncidenceSets {
    sets: Vec<BTreeSet<usize>>,
}

impl IncidenceSets {
    pub fn from_mesh(mesh: &SurfaceMesh) -> Self {
        let mut inc = Self {
            sets: vec![BTreeSet::new(); mesh.vertex_count()],
        };
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t);
            inc.sets[a].insert(t);
            inc.sets[b].insert(t);
            inc.sets[c].insert(t);
        }
        inc
    }

    /// Triangles incident to `v`
    pub fn set(&self, v: usize) -> &BTreeSet<usize> {
        &self.sets[v]
    }

    pub fn remove(&mut self, v: usize, t: usize) {
        self.sets[v].remove(&t);
    }

    pub fn insert(&mut self, v: usize, t: usize) {
        self.sets[v].insert(t);
    }

    /// Merge `c`'s incident triangles into `r`'s set, clearing `c`'s
    ///
    /// Triangles present in both sets had both endpoints of the collapsed
    /// edge; they have degenerated to a point. They are dropped from `r`'s
    /// set and returned for physical deletion.
    pub fn merge(&mut self, r: usize, c: usize) -> Vec<usize> {
        let c_set = std::mem::take(&mut self.sets[c]);
        let mut collapsed = Vec::new();
        for t in c_set {
            if !self.sets[r].insert(t) {
                self.sets[r].remove(&t);
                collapsed.push(t);
            }
        }
        collapsed
    }

    /// Remove set `c` by moving the last set into its slot
    ///
    /// Set `c` must already be empty. Returns the index the relocated set
    /// came from, or `None` when `c` was the last one.
    pub fn swap_remove_set(&mut self, c: usize) -> Option<usize> {
        debug_assert!(self.sets[c].is_empty());
        let last = self.sets.len() - 1;
        if c == last {
            self.sets.pop();
            return None;
        }
        self.sets.swap(c, last);
        self.sets.pop();
        Some(last)
    }
}
