use std::collections::VecDeque;

use super::graph::{BoundaryGraph, Walk};

/// Walks from edge `first` across unvisited edges, taking the first
/// unvisited edge at each vertex, until the walk returns to its start
/// vertex. Every crossed edge is marked visited.
///
/// If the walk dead-ends instead, it is also grown backwards from its start
/// so the returned open walk covers the whole connected chain.
pub(super) fn trace_walk(graph: &mut BoundaryGraph, first: usize) -> Walk {
    let (start, mut current) = graph.ends(first);
    graph.visit(first);
    let mut vertices = VecDeque::from([start]);
    let mut edges = VecDeque::from([first]);

    loop {
        if current == start {
            return Walk {
                vertices: vertices.into(),
                edges: edges.into(),
                closed: true,
            };
        }
        vertices.push_back(current);
        let Some(next) = graph.next_unvisited(current) else {
            break;
        };
        graph.visit(next);
        current = graph.other_end(next, current);
        edges.push_back(next);
    }

    let mut current = start;
    while let Some(next) = graph.next_unvisited(current) {
        graph.visit(next);
        current = graph.other_end(next, current);
        edges.push_front(next);
        vertices.push_front(current);
    }

    Walk {
        vertices: vertices.into(),
        edges: edges.into(),
        closed: false,
    }
}
