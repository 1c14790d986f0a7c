use super::room::RoomId;

index_type! {
    /// Index of a side in its level's side table.
    pub struct SideId;
}

/// Per-face data of an edge. Only the room it faces matters for geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Side {
    pub x_offset: i16,
    pub y_offset: i16,
    pub upper: String,
    pub lower: String,
    pub middle: String,
    /// The room this side faces.
    pub room: RoomId,
}

impl Side {
    /// Creates an untextured side facing `room`.
    #[must_use]
    pub fn facing(room: RoomId) -> Self {
        Self {
            x_offset: 0,
            y_offset: 0,
            upper: String::new(),
            lower: String::new(),
            middle: String::new(),
            room,
        }
    }
}
