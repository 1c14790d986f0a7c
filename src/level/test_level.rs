//! Helpers for building small levels in unit tests.

#![allow(clippy::unwrap_used)]

use super::{Edge, EdgeId, Level, Room, RoomId, Side, SideId, Vertex, VertexId};
use crate::archive::MapName;

/// Incrementally builds a level from coordinates. Vertices with equal
/// coordinates are shared.
#[derive(Debug, Default)]
pub(crate) struct LevelBuilder {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    sides: Vec<Side>,
    rooms: Vec<Room>,
}

impl LevelBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn room(&mut self, floor: &str) -> RoomId {
        self.rooms.push(Room::with_floor(floor));
        RoomId(self.rooms.len() - 1)
    }

    pub(crate) fn vertex(&mut self, (x, y): (i16, i16)) -> VertexId {
        let v = Vertex::new(x, y);
        if let Some(i) = self.vertices.iter().position(|&w| w == v) {
            return VertexId(i);
        }
        self.vertices.push(v);
        VertexId(self.vertices.len() - 1)
    }

    fn side(&mut self, room: Option<RoomId>) -> Option<SideId> {
        let room = room?;
        self.sides.push(Side::facing(room));
        Some(SideId(self.sides.len() - 1))
    }

    pub(crate) fn edge(
        &mut self,
        a: (i16, i16),
        b: (i16, i16),
        front: Option<RoomId>,
        back: Option<RoomId>,
    ) -> EdgeId {
        let begin = self.vertex(a);
        let end = self.vertex(b);
        let front = self.side(front);
        let back = self.side(back);
        self.edges.push(Edge::new(begin, end, front, back));
        EdgeId(self.edges.len() - 1)
    }

    /// Adds a closed loop of one-sided edges facing `room`.
    pub(crate) fn polygon(&mut self, points: &[(i16, i16)], room: RoomId) -> Vec<EdgeId> {
        (0..points.len())
            .map(|i| self.edge(points[i], points[(i + 1) % points.len()], Some(room), None))
            .collect()
    }

    pub(crate) fn set_flags(&mut self, edge: EdgeId, flags: u16) {
        self.edges[edge.index()].flags = flags;
    }

    pub(crate) fn build(self) -> Level {
        Level::new(
            MapName::new(1, 1),
            self.vertices,
            self.edges,
            self.sides,
            self.rooms,
        )
        .unwrap()
    }
}
