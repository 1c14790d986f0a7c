use slotmap::SlotMap;

use crate::level::{EdgeId, Level, RoomId, VertexId};
use crate::math::polygon_2d::{canonical_start_index, signed_area_2d};
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a polygon in a [`PolygonStore`].
    pub struct PolygonId;
}

/// A boundary loop of one room.
///
/// For a closed polygon `edges[i]` joins `vertices[i]` and
/// `vertices[(i + 1) % n]`. An open polygon (a walk that dead-ended on
/// malformed data) has one more vertex than edges and `edges[i]` joins
/// `vertices[i]` and `vertices[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// The room this loop bounds.
    pub room: RoomId,
    /// Floor flat of the owning room.
    pub floor: String,
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
    /// Vertex positions, parallel to `vertices`.
    pub points: Vec<Point2>,
    /// `false` if the boundary walk could not return to its start.
    pub closed: bool,
    /// Set when another loop of the same room encloses this one.
    pub hole: bool,
}

impl Polygon {
    /// Builds a polygon from a boundary walk and normalises it: the winding is
    /// made counter-clockwise (non-negative signed area) and closed loops are
    /// rotated to start at their leftmost-bottom vertex.
    #[must_use]
    pub fn from_walk(
        level: &Level,
        room: RoomId,
        vertices: Vec<VertexId>,
        edges: Vec<EdgeId>,
        closed: bool,
    ) -> Self {
        let points = vertices.iter().map(|&v| level.point(v)).collect();
        let mut polygon = Self {
            room,
            floor: level.room(room).floor.clone(),
            vertices,
            edges,
            points,
            closed,
            hole: false,
        };
        polygon.normalize();
        polygon
    }

    fn normalize(&mut self) {
        if self.signed_area() < 0.0 {
            self.reverse();
        }
        if self.closed && !self.points.is_empty() {
            let start = canonical_start_index(&self.points);
            self.vertices.rotate_left(start);
            self.edges.rotate_left(start);
            self.points.rotate_left(start);
        }
    }

    /// Reverses the traversal direction, keeping edges aligned with vertices.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
        self.points.reverse();
        self.edges.reverse();
        if self.closed && !self.edges.is_empty() {
            self.edges.rotate_left(1);
        }
    }

    /// Signed area of the loop (counter-clockwise positive). Open polygons
    /// are measured as if closed.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns `true` for polygons with fewer than 3 points, which cannot
    /// enclose anything.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Returns the vertices joined by `edges[i]`.
    #[must_use]
    pub fn edge_ends(&self, i: usize) -> (VertexId, VertexId) {
        let next = if self.closed {
            (i + 1) % self.vertices.len()
        } else {
            i + 1
        };
        (self.vertices[i], self.vertices[next])
    }
}

/// Arena owning the polygons of one map.
#[derive(Debug, Default)]
pub struct PolygonStore {
    polygons: SlotMap<PolygonId, Polygon>,
}

impl PolygonStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a polygon and returns its ID.
    pub fn add(&mut self, polygon: Polygon) -> PolygonId {
        self.polygons.insert(polygon)
    }

    #[must_use]
    pub fn get(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.get(id)
    }

    pub fn get_mut(&mut self, id: PolygonId) -> Option<&mut Polygon> {
        self.polygons.get_mut(id)
    }

    /// Iterates over polygons in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PolygonId, &Polygon)> {
        self.polygons.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
