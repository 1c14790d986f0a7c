mod cycle;
mod graph;
mod trace;

use tracing::{trace, warn};

use crate::level::{EdgeId, Level, RoomId};
use crate::polygon::Polygon;

use graph::{BoundaryGraph, Walk};

/// Decomposes one room's boundary edges into closed polygons.
///
/// Every boundary edge ends up in exactly one polygon. Vertices where more
/// than two boundary edges meet (a room touching itself, or several loops
/// sharing a point) are resolved first by peeling off the shortest cycle
/// through them; the remaining edges form simple loops that are walked
/// vertex to vertex.
///
/// Malformed boundaries never fail: an unresolvable shared vertex or a walk
/// that dead-ends is logged and the affected edges are still emitted, the
/// latter as an open polygon.
pub struct DecomposeRoom<'a> {
    room: RoomId,
    boundary: &'a [EdgeId],
}

impl<'a> DecomposeRoom<'a> {
    /// Creates a new `DecomposeRoom` operation over the room's boundary
    /// edges (see [`CollectBoundary`](super::CollectBoundary)).
    #[must_use]
    pub fn new(room: RoomId, boundary: &'a [EdgeId]) -> Self {
        Self { room, boundary }
    }

    /// Executes the decomposition. The order of the returned polygons
    /// carries no meaning.
    #[must_use]
    pub fn execute(&self, level: &Level) -> Vec<Polygon> {
        let mut graph = BoundaryGraph::new(level, self.boundary);
        let mut walks = Vec::new();

        for vertex in graph.shared_vertices() {
            while graph.degree(vertex) > 2 {
                let Some(walk) = cycle::shortest_cycle(&graph, vertex) else {
                    warn!(
                        room = %self.room,
                        %vertex,
                        degree = graph.degree(vertex),
                        adjacency = %graph.to_dot(),
                        "cannot disambiguate shared vertex"
                    );
                    break;
                };
                trace!(room = %self.room, %vertex, len = walk.edges.len(), "split cycle at shared vertex");
                for &edge in &walk.edges {
                    graph.visit(edge);
                }
                walks.push(walk);
            }
        }

        while let Some(first) = graph.first_unvisited() {
            let walk = trace::trace_walk(&mut graph, first);
            if !walk.closed {
                warn!(
                    room = %self.room,
                    edges = walk.edges.len(),
                    adjacency = %graph.to_dot(),
                    "boundary walk dead-ended, emitting open polygon"
                );
            }
            walks.push(walk);
        }

        walks
            .into_iter()
            .map(|walk| self.to_polygon(level, &graph, walk))
            .collect()
    }

    fn to_polygon(&self, level: &Level, graph: &BoundaryGraph, walk: Walk) -> Polygon {
        let edges = walk.edges.iter().map(|&e| graph.edge_id(e)).collect();
        Polygon::from_walk(level, self.room, walk.vertices, edges, walk.closed)
    }
}
