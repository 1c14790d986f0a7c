use std::io;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::ArchiveError;
use crate::level::{Edge, Room, RoomId, Side, SideId, Vertex, VertexId};

/// Side index meaning "no side on this face".
pub const NO_SIDE: u16 = 0xFFFF;

/// A fixed-stride little-endian record stored in a named level lump.
pub trait Record: Sized {
    /// Lump name holding the records.
    const LUMP: &'static str;
    /// Size of one record in bytes.
    const SIZE: usize;

    /// Decodes one record from exactly [`Self::SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `raw` is shorter than a record.
    fn decode(raw: &[u8]) -> io::Result<Self>;
}

/// Decodes every record of a lump.
///
/// # Errors
///
/// Returns `ArchiveError::LumpSize` if the lump is not a whole number of
/// records.
pub fn decode_lump<R: Record>(data: &[u8]) -> Result<Vec<R>, ArchiveError> {
    if data.len() % R::SIZE != 0 {
        return Err(ArchiveError::LumpSize {
            name: R::LUMP,
            size: data.len(),
            stride: R::SIZE,
        });
    }
    data.chunks_exact(R::SIZE)
        .map(|raw| R::decode(raw).map_err(ArchiveError::from))
        .collect()
}

/// Reads an 8-byte NUL-padded lump or texture name, upper-cased.
#[must_use]
pub fn read_name(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).to_ascii_uppercase()
}

fn read_name_at(raw: &[u8], offset: usize) -> io::Result<String> {
    raw.get(offset..offset + 8)
        .map(read_name)
        .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
}

fn side_ref(raw: u16) -> Option<SideId> {
    (raw != NO_SIDE).then(|| SideId(usize::from(raw)))
}

impl Record for Vertex {
    const LUMP: &'static str = "VERTEXES";
    const SIZE: usize = 4;

    fn decode(mut raw: &[u8]) -> io::Result<Self> {
        let x = raw.read_i16::<LittleEndian>()?;
        let y = raw.read_i16::<LittleEndian>()?;
        Ok(Self::new(x, y))
    }
}

impl Record for Edge {
    const LUMP: &'static str = "LINEDEFS";
    const SIZE: usize = 14;

    fn decode(mut raw: &[u8]) -> io::Result<Self> {
        let begin = raw.read_u16::<LittleEndian>()?;
        let end = raw.read_u16::<LittleEndian>()?;
        let flags = raw.read_u16::<LittleEndian>()?;
        let special = raw.read_u16::<LittleEndian>()?;
        let tag = raw.read_u16::<LittleEndian>()?;
        let front = raw.read_u16::<LittleEndian>()?;
        let back = raw.read_u16::<LittleEndian>()?;
        Ok(Self {
            begin: VertexId(usize::from(begin)),
            end: VertexId(usize::from(end)),
            flags,
            special,
            tag,
            front: side_ref(front),
            back: side_ref(back),
        })
    }
}

impl Record for Side {
    const LUMP: &'static str = "SIDEDEFS";
    const SIZE: usize = 30;

    fn decode(raw: &[u8]) -> io::Result<Self> {
        let mut offsets = raw;
        let x_offset = offsets.read_i16::<LittleEndian>()?;
        let y_offset = offsets.read_i16::<LittleEndian>()?;
        let mut room = raw.get(28..).unwrap_or_default();
        Ok(Self {
            x_offset,
            y_offset,
            upper: read_name_at(raw, 4)?,
            lower: read_name_at(raw, 12)?,
            middle: read_name_at(raw, 20)?,
            room: RoomId(usize::from(room.read_u16::<LittleEndian>()?)),
        })
    }
}

impl Record for Room {
    const LUMP: &'static str = "SECTORS";
    const SIZE: usize = 26;

    fn decode(raw: &[u8]) -> io::Result<Self> {
        let mut heights = raw;
        let floor_height = heights.read_i16::<LittleEndian>()?;
        let ceiling_height = heights.read_i16::<LittleEndian>()?;
        let mut rest = raw.get(20..).unwrap_or_default();
        let light = rest.read_i16::<LittleEndian>()?;
        let special = rest.read_u16::<LittleEndian>()?;
        let tag = rest.read_u16::<LittleEndian>()?;
        Ok(Self {
            floor_height,
            ceiling_height,
            floor: read_name_at(raw, 4)?,
            ceiling: read_name_at(raw, 12)?,
            light,
            special,
            tag,
        })
    }
}
