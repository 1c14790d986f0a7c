/// Declares a typed index into one of a level's tables.
macro_rules! index_type {
    ($(#[$meta:meta])* pub struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub usize);

        impl $name {
            /// Returns the raw table index.
            #[must_use]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub mod edge;
pub mod room;
pub mod side;
pub mod vertex;

#[cfg(test)]
pub(crate) mod test_level;

pub use edge::{Edge, EdgeId};
pub use room::{Room, RoomId};
pub use side::{Side, SideId};
pub use vertex::{Vertex, VertexId};

use std::collections::BTreeSet;

use crate::archive::MapName;
use crate::error::LevelError;
use crate::math::Point2;

/// Axis-aligned bounds of a level's vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// The geometry of one loaded map.
///
/// All tables are immutable after construction and every cross reference
/// (edge to vertex, edge to side, side to room) has been validated, so ids
/// handed out by this level always index successfully.
#[derive(Debug, Clone)]
pub struct Level {
    name: MapName,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    sides: Vec<Side>,
    rooms: Vec<Room>,
}

impl Level {
    /// Assembles a level, validating every index.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::DanglingReference` if an edge names a missing
    /// vertex or side, or a side names a missing room.
    pub fn new(
        name: MapName,
        vertices: Vec<Vertex>,
        edges: Vec<Edge>,
        sides: Vec<Side>,
        rooms: Vec<Room>,
    ) -> Result<Self, LevelError> {
        for (index, edge) in edges.iter().enumerate() {
            for vertex in [edge.begin, edge.end] {
                check_ref("edge", index, "vertex", vertex.index(), vertices.len())?;
            }
            for side in edge.sides() {
                check_ref("edge", index, "side", side.index(), sides.len())?;
            }
        }
        for (index, side) in sides.iter().enumerate() {
            check_ref("side", index, "room", side.room.index(), rooms.len())?;
        }

        Ok(Self {
            name,
            vertices,
            edges,
            sides,
            rooms,
        })
    }

    /// Returns the map this level was loaded from.
    #[must_use]
    pub fn name(&self) -> MapName {
        self.name
    }

    // --- Table access ---
    //
    // The accessors below panic if given an id that did not come from this
    // level.

    #[must_use]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Returns the position of a vertex.
    #[must_use]
    pub fn point(&self, id: VertexId) -> Point2 {
        self.vertex(id).point()
    }

    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[must_use]
    pub fn side(&self, id: SideId) -> &Side {
        &self.sides[id.index()]
    }

    #[must_use]
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Iterates over all edges with their ids.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Iterates over all rooms with their ids.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter().enumerate().map(|(i, r)| (RoomId(i), r))
    }

    // --- Derived queries ---

    /// Iterates over the rooms faced by each side of an edge, front first.
    pub fn edge_rooms(&self, id: EdgeId) -> impl Iterator<Item = RoomId> + '_ {
        self.edge(id).sides().map(|side| self.side(side).room)
    }

    /// Returns `true` if the edge has two sides facing the same room.
    ///
    /// Such edges are internal to the room and never bound it.
    #[must_use]
    pub fn is_double_edge(&self, id: EdgeId) -> bool {
        let edge = self.edge(id);
        match (edge.front, edge.back) {
            (Some(front), Some(back)) => self.side(front).room == self.side(back).room,
            _ => false,
        }
    }

    /// Returns the bounds of all vertices, or `None` for an empty level.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.vertices.first()?.point();
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for v in &self.vertices[1..] {
            let p = v.point();
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Returns the distinct floor flat names, in order of first use.
    #[must_use]
    pub fn referenced_flats(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.rooms
            .iter()
            .map(|r| r.floor.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

fn check_ref(
    from: &'static str,
    index: usize,
    to: &'static str,
    target: usize,
    len: usize,
) -> Result<(), LevelError> {
    if target < len {
        Ok(())
    } else {
        Err(LevelError::DanglingReference {
            from,
            index,
            to,
            target,
            len,
        })
    }
}
