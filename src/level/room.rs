index_type! {
    /// Index of a room in its level's room table.
    pub struct RoomId;
}

/// A floor region with a single floor texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub floor_height: i16,
    pub ceiling_height: i16,
    /// Floor flat name, used as the fill texture on the map.
    pub floor: String,
    pub ceiling: String,
    pub light: i16,
    pub special: u16,
    pub tag: u16,
}

impl Room {
    /// Creates a room with the given floor flat and default heights.
    #[must_use]
    pub fn with_floor(floor: impl Into<String>) -> Self {
        Self {
            floor_height: 0,
            ceiling_height: 128,
            floor: floor.into(),
            ceiling: String::new(),
            light: 160,
            special: 0,
            tag: 0,
        }
    }
}
