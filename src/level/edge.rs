use super::side::SideId;
use super::vertex::VertexId;

index_type! {
    /// Index of an edge in its level's edge table.
    pub struct EdgeId;
}

/// An undirected wall segment between two vertices, with up to two sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub begin: VertexId,
    pub end: VertexId,
    /// Raw flag bitmask.
    pub flags: u16,
    /// Action special (type code).
    pub special: u16,
    pub tag: u16,
    /// Side facing right of `begin -> end`.
    pub front: Option<SideId>,
    /// Side facing left of `begin -> end`.
    pub back: Option<SideId>,
}

impl Edge {
    /// Flag bit marking a secret boundary, drawn dashed on the map.
    pub const SECRET: u16 = 0x20;

    /// Creates an edge with no flags or special.
    #[must_use]
    pub fn new(
        begin: VertexId,
        end: VertexId,
        front: Option<SideId>,
        back: Option<SideId>,
    ) -> Self {
        Self {
            begin,
            end,
            flags: 0,
            special: 0,
            tag: 0,
            front,
            back,
        }
    }

    /// Returns `true` if the secret flag is set.
    #[must_use]
    pub fn is_secret(&self) -> bool {
        self.flags & Self::SECRET != 0
    }

    /// Iterates over the sides present on this edge, front first.
    pub fn sides(&self) -> impl Iterator<Item = SideId> {
        self.front.into_iter().chain(self.back)
    }

    /// Returns the endpoint opposite `vertex`. A self-loop returns `vertex`.
    #[must_use]
    pub fn other_end(&self, vertex: VertexId) -> VertexId {
        if self.begin == vertex {
            self.end
        } else {
            self.begin
        }
    }
}
