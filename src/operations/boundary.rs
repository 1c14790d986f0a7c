use crate::level::{EdgeId, Level, RoomId};

/// Collects the edges that bound one room.
///
/// An edge bounds a room if one of its sides faces the room, unless it is a
/// double edge (both sides facing the same room), which is internal to the
/// room and skipped.
pub struct CollectBoundary {
    room: RoomId,
}

impl CollectBoundary {
    /// Creates a new `CollectBoundary` query.
    #[must_use]
    pub fn new(room: RoomId) -> Self {
        Self { room }
    }

    /// Executes the query, returning the boundary edges in edge-table order.
    /// A room with no boundary edges yields an empty list.
    #[must_use]
    pub fn execute(&self, level: &Level) -> Vec<EdgeId> {
        level
            .edges()
            .map(|(id, _)| id)
            .filter(|&id| !level.is_double_edge(id))
            .filter(|&id| level.edge_rooms(id).any(|room| room == self.room))
            .collect()
    }
}
