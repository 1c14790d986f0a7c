use crate::level::VertexId;

use super::graph::{BoundaryGraph, Walk};

/// Finds the shortest cycle of unvisited edges that leaves and returns to
/// `start`, or `None` if no such cycle exists.
///
/// Depth-first search over every unvisited edge at `start`, backtracking at
/// branch points. A branch is abandoned as soon as it is no shorter than the
/// best cycle found so far. The graph itself is not modified.
pub(super) fn shortest_cycle(graph: &BoundaryGraph, start: VertexId) -> Option<Walk> {
    let mut search = CycleSearch {
        graph,
        start,
        used: graph.visited().to_vec(),
        path: Vec::new(),
        best: Vec::new(),
        best_len: usize::MAX,
    };

    for &first in graph.incident(start) {
        if search.used[first] || search.best.contains(&first) {
            continue;
        }
        search.step(first, start);
    }

    if search.best.is_empty() {
        return None;
    }

    let mut vertices = Vec::with_capacity(search.best.len());
    let mut current = start;
    for &edge in &search.best {
        vertices.push(current);
        current = graph.other_end(edge, current);
    }
    Some(Walk {
        vertices,
        edges: search.best,
        closed: true,
    })
}

struct CycleSearch<'g> {
    graph: &'g BoundaryGraph,
    start: VertexId,
    /// Visited flags of the graph plus the edges on the current path.
    used: Vec<bool>,
    path: Vec<usize>,
    best: Vec<usize>,
    best_len: usize,
}

impl CycleSearch<'_> {
    /// Crosses `edge` away from `from`, then either records a cycle or
    /// explores onwards.
    fn step(&mut self, edge: usize, from: VertexId) {
        self.used[edge] = true;
        self.path.push(edge);

        let graph = self.graph;
        let next = graph.other_end(edge, from);
        if self.path.len() < self.best_len {
            if next == self.start {
                self.best.clone_from(&self.path);
                self.best_len = self.path.len();
            } else {
                for &candidate in graph.incident(next) {
                    if !self.used[candidate] {
                        self.step(candidate, next);
                    }
                }
            }
        }

        self.path.pop();
        self.used[edge] = false;
    }
}
