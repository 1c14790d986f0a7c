use std::collections::BTreeMap;
use std::fmt::Write;

use crate::level::{EdgeId, Level, VertexId};

/// A traversal over boundary edges, in local edge indices.
///
/// Closed walks have as many vertices as edges; open walks one more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Walk {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<usize>,
    pub closed: bool,
}

/// Undirected graph over one room's boundary edges with per-edge visited
/// flags. Scratch state for a single decomposition; never shared.
#[derive(Debug)]
pub(super) struct BoundaryGraph {
    edges: Vec<EdgeId>,
    ends: Vec<(VertexId, VertexId)>,
    incident: BTreeMap<VertexId, Vec<usize>>,
    visited: Vec<bool>,
}

impl BoundaryGraph {
    pub(super) fn new(level: &Level, edges: &[EdgeId]) -> Self {
        let mut ends = Vec::with_capacity(edges.len());
        let mut incident: BTreeMap<VertexId, Vec<usize>> = BTreeMap::new();
        for (local, &id) in edges.iter().enumerate() {
            let edge = level.edge(id);
            ends.push((edge.begin, edge.end));
            incident.entry(edge.begin).or_default().push(local);
            if edge.end != edge.begin {
                incident.entry(edge.end).or_default().push(local);
            }
        }
        Self {
            edges: edges.to_vec(),
            ends,
            incident,
            visited: vec![false; edges.len()],
        }
    }

    /// Maps a local index back to the level's edge id.
    pub(super) fn edge_id(&self, local: usize) -> EdgeId {
        self.edges[local]
    }

    pub(super) fn ends(&self, local: usize) -> (VertexId, VertexId) {
        self.ends[local]
    }

    pub(super) fn other_end(&self, local: usize, vertex: VertexId) -> VertexId {
        let (a, b) = self.ends[local];
        if a == vertex {
            b
        } else {
            a
        }
    }

    /// Local indices of all edges touching `vertex`, visited or not.
    pub(super) fn incident(&self, vertex: VertexId) -> &[usize] {
        self.incident
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(super) fn visited(&self) -> &[bool] {
        &self.visited
    }

    pub(super) fn visit(&mut self, local: usize) {
        self.visited[local] = true;
    }

    /// Number of unvisited edges touching `vertex`.
    pub(super) fn degree(&self, vertex: VertexId) -> usize {
        self.incident(vertex)
            .iter()
            .filter(|&&e| !self.visited[e])
            .count()
    }

    /// Vertices touched by more than two unvisited edges, in index order.
    pub(super) fn shared_vertices(&self) -> Vec<VertexId> {
        self.incident
            .keys()
            .copied()
            .filter(|&v| self.degree(v) > 2)
            .collect()
    }

    pub(super) fn first_unvisited(&self) -> Option<usize> {
        self.visited.iter().position(|&v| !v)
    }

    pub(super) fn next_unvisited(&self, vertex: VertexId) -> Option<usize> {
        self.incident(vertex)
            .iter()
            .copied()
            .find(|&e| !self.visited[e])
    }

    /// Graphviz dump of the edge adjacency, for anomaly reports.
    pub(super) fn to_dot(&self) -> String {
        let mut dot = String::from("graph {");
        for (local, &(a, b)) in self.ends.iter().enumerate() {
            let style = if self.visited[local] { " [style=dotted]" } else { "" };
            let _ = write!(dot, " {a} -- {b}{style};");
        }
        dot.push_str(" }");
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::test_level::LevelBuilder;
    use crate::operations::CollectBoundary;

    fn bowtie() -> (Level, Vec<EdgeId>) {
        let mut b = LevelBuilder::new();
        let room = b.room("FLAT1");
        b.polygon(&[(0, 0), (10, 0), (5, 5)], room);
        b.polygon(&[(5, 5), (10, 10), (0, 10)], room);
        let level = b.build();
        let edges = CollectBoundary::new(room).execute(&level);
        (level, edges)
    }

    #[test]
    fn degree_counts_unvisited_edges() {
        let (level, edges) = bowtie();
        let mut graph = BoundaryGraph::new(&level, &edges);
        let centre = VertexId(2);
        assert_eq!(graph.degree(centre), 4);
        assert_eq!(graph.shared_vertices(), vec![centre]);

        graph.visit(graph.incident(centre)[0]);
        assert_eq!(graph.degree(centre), 3);
        assert_eq!(graph.incident(centre).len(), 4);
    }

    #[test]
    fn next_unvisited_skips_visited() {
        let (level, edges) = bowtie();
        let mut graph = BoundaryGraph::new(&level, &edges);
        let origin = VertexId(0);
        let first = graph.next_unvisited(origin).unwrap_or(usize::MAX);
        graph.visit(first);
        let second = graph.next_unvisited(origin).unwrap_or(usize::MAX);
        assert_ne!(first, second);
        graph.visit(second);
        assert_eq!(graph.next_unvisited(origin), None);
        assert_eq!(graph.first_unvisited(), Some(1));
    }

    #[test]
    fn self_loop_counts_once() {
        let mut b = LevelBuilder::new();
        let room = b.room("FLAT1");
        let e = b.edge((3, 3), (3, 3), Some(room), None);
        let level = b.build();
        let graph = BoundaryGraph::new(&level, &[e]);
        let v = level.edge(e).begin;
        assert_eq!(graph.degree(v), 1);
        assert_eq!(graph.other_end(0, v), v);
    }

    #[test]
    fn dot_lists_every_edge() {
        let (level, edges) = bowtie();
        let dot = BoundaryGraph::new(&level, &edges).to_dot();
        assert!(dot.starts_with("graph {"));
        assert_eq!(dot.matches("--").count(), 6);
        assert!(dot.contains("0 -- 1;"));
    }
}
