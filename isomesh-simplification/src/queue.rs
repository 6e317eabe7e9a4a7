//! Indexed edge priority queue
//!
//! Collapse candidates are keyed by their unordered vertex pair and ordered
//! by cost. Costs go stale whenever adjacency changes, so besides pop-min
//! the queue supports removal by key and in-place relabeling of one
//! endpoint (needed when the last vertex is swapped into a freed slot).

use priority_queue::PriorityQueue;
use std::cmp::Ordering;

/// Normalized unordered vertex pair
pub type EdgeKey = (usize, usize);

/// Build the canonical `(min, max)` key for an edge
pub fn edge_key(a: usize, b: usize) -> EdgeKey {
    (a.min(b), a.max(b))
}

/// Edge cost ordered so the cheapest edge has the highest priority
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smallest cost first
        other.0.total_cmp(&self.0)
    }
}

/// Priority queue of collapse candidates with removal by edge identity
#[derive(Debug, Default)]
pub struct EdgeQueue {
    heap: PriorityQueue<EdgeKey, Cost>,
}

impl EdgeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.heap.get(&edge_key(a, b)).is_some()
    }

    /// Queue edge `(a, b)` at `cost`, replacing any stale entry
    pub fn push(&mut self, a: usize, b: usize, cost: f64) {
        self.heap.push(edge_key(a, b), Cost(cost));
    }

    /// Drop edge `(a, b)` if queued; returns whether it was present
    pub fn remove(&mut self, a: usize, b: usize) -> bool {
        self.heap.remove(&edge_key(a, b)).is_some()
    }

    /// Relabel endpoint `old` of queued edge `(old, other)` to `new`
    ///
    /// The cost is carried over unchanged; this is a rename, not a
    /// re-evaluation. No-op if the edge is not queued.
    pub fn rename(&mut self, old: usize, new: usize, other: usize) {
        if let Some((_, cost)) = self.heap.remove(&edge_key(old, other)) {
            self.heap.push(edge_key(new, other), cost);
        }
    }

    /// Pop the cheapest queued edge
    pub fn pop(&mut self) -> Option<(EdgeKey, f64)> {
        self.heap.pop().map(|(key, cost)| (key, cost.0))
    }
}
