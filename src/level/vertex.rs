use crate::math::Point2;

index_type! {
    /// Index of a vertex in its level's vertex table.
    pub struct VertexId;
}

/// A map vertex in world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub x: i16,
    pub y: i16,
}

impl Vertex {
    /// Creates a vertex at the given world coordinates.
    #[must_use]
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Returns the vertex position as a floating-point point.
    #[must_use]
    pub fn point(&self) -> Point2 {
        Point2::new(f64::from(self.x), f64::from(self.y))
    }
}
