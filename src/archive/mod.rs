mod map_name;
mod records;
mod textures;

#[cfg(test)]
pub(crate) mod test_wad;

pub use map_name::MapName;
pub use records::{decode_lump, read_name, Record, NO_SIDE};
pub use textures::{Palette, Textures, FLAT_SIZE, PALETTE_SIZE};

use std::collections::BTreeMap;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use tracing::{debug, warn};

use crate::error::{ArchiveError, Result};
use crate::level::{Edge, Level, Room, Side, Vertex};

/// Magic marker of the only supported container type.
pub const MAGIC: &[u8; 4] = b"IWAD";

const HEADER_SIZE: usize = 12;
const DIRECTORY_ENTRY_SIZE: usize = 16;

/// One directory entry: a named byte range of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumpEntry {
    pub name: String,
    pub start: i32,
    pub size: i32,
}

/// A WAD archive held in memory.
#[derive(Debug)]
pub struct Wad {
    data: Vec<u8>,
    directory: Vec<LumpEntry>,
}

impl Wad {
    /// Reads an archive from disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or any error of
    /// [`Wad::from_bytes`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Parses the header and directory of an in-memory archive.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::BadMagic` if the archive does not start with
    /// `IWAD`, or `ArchiveError::Truncated` if the header or directory lies
    /// outside the data.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let header = slice(&data, "header", 0, HEADER_SIZE as i64)?;
        let found = [header[0], header[1], header[2], header[3]];
        if &found != MAGIC {
            return Err(ArchiveError::BadMagic { found }.into());
        }

        let mut fields = &header[4..];
        let count = fields.read_i32::<LittleEndian>()?;
        let offset = fields.read_i32::<LittleEndian>()?;
        let raw = slice(
            &data,
            "directory",
            i64::from(offset),
            i64::from(count) * DIRECTORY_ENTRY_SIZE as i64,
        )?;

        let directory = raw
            .chunks_exact(DIRECTORY_ENTRY_SIZE)
            .map(|mut entry| {
                let start = entry.read_i32::<LittleEndian>()?;
                let size = entry.read_i32::<LittleEndian>()?;
                Ok(LumpEntry {
                    name: read_name(entry),
                    start,
                    size,
                })
            })
            .collect::<std::io::Result<Vec<_>>>()?;

        debug!(lumps = directory.len(), "parsed archive directory");
        Ok(Self { data, directory })
    }

    /// Returns the directory entries in archive order.
    #[must_use]
    pub fn directory(&self) -> &[LumpEntry] {
        &self.directory
    }

    /// Finds the first entry named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.find_from(0, name)
    }

    /// Finds the first entry named `name` at or after directory index `from`.
    #[must_use]
    pub fn find_from(&self, from: usize, name: &str) -> Option<usize> {
        self.directory
            .iter()
            .skip(from)
            .position(|e| e.name == name)
            .map(|i| i + from)
    }

    /// Returns the bytes of the entry at directory index `index`.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Truncated` if the entry lies outside the data,
    /// or `ArchiveError::MissingLump` for an out-of-range index.
    pub fn lump_data(&self, index: usize) -> Result<&[u8]> {
        let entry = self
            .directory
            .get(index)
            .ok_or_else(|| ArchiveError::MissingLump(format!("#{index}")))?;
        Ok(slice(
            &self.data,
            "lump",
            i64::from(entry.start),
            i64::from(entry.size),
        )?)
    }

    /// Lists the maps in the archive, in directory order.
    #[must_use]
    pub fn map_names(&self) -> Vec<MapName> {
        self.directory
            .iter()
            .filter_map(|e| MapName::parse(&e.name))
            .collect()
    }

    /// Loads the geometry of one map.
    ///
    /// Level lumps are taken from the first entries of each name after the
    /// map marker.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::UnknownMap` if there is no such marker, an
    /// archive error if a lump is missing or malformed, or a level error if
    /// the records reference each other inconsistently.
    pub fn load_level(&self, map: MapName) -> Result<Level> {
        let marker = self
            .find(&map.to_string())
            .ok_or_else(|| ArchiveError::UnknownMap(map.to_string()))?;

        let vertices: Vec<Vertex> = self.level_records(map, marker)?;
        let edges: Vec<Edge> = self.level_records(map, marker)?;
        let sides: Vec<Side> = self.level_records(map, marker)?;
        let rooms: Vec<Room> = self.level_records(map, marker)?;

        debug!(
            %map,
            vertices = vertices.len(),
            edges = edges.len(),
            sides = sides.len(),
            rooms = rooms.len(),
            "loaded level records"
        );
        Ok(Level::new(map, vertices, edges, sides, rooms)?)
    }

    /// Loads the palette and every floor flat the level references.
    ///
    /// A referenced flat that is not in the archive is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::MissingLump` if there is no `PLAYPAL`, or no
    /// `F_START` marker while the level references flats.
    pub fn load_textures(&self, level: &Level) -> Result<Textures> {
        let playpal = self
            .find("PLAYPAL")
            .ok_or_else(|| ArchiveError::MissingLump("PLAYPAL".to_owned()))?;
        let palette = Palette::decode(self.lump_data(playpal)?)?;

        let names = level.referenced_flats();
        let mut flats = BTreeMap::new();
        if !names.is_empty() {
            let start = self
                .find("F_START")
                .ok_or_else(|| ArchiveError::MissingLump("F_START".to_owned()))?;
            for name in names {
                match self.find_from(start, name) {
                    Some(index) => {
                        flats.insert(name.to_owned(), self.lump_data(index)?.to_vec());
                    }
                    None => warn!(flat = name, "floor flat not found in archive"),
                }
            }
        }

        Ok(Textures { palette, flats })
    }

    fn level_records<R: Record>(&self, map: MapName, marker: usize) -> Result<Vec<R>> {
        let index = self
            .find_from(marker, R::LUMP)
            .ok_or_else(|| ArchiveError::MissingLump(format!("{map}/{}", R::LUMP)))?;
        Ok(decode_lump(self.lump_data(index)?)?)
    }
}

/// Bounds-checked sub-slice with archive-level error reporting.
fn slice<'a>(
    data: &'a [u8],
    what: &'static str,
    offset: i64,
    len: i64,
) -> std::result::Result<&'a [u8], ArchiveError> {
    let truncated = || ArchiveError::Truncated { what, offset, len };
    let start = usize::try_from(offset).map_err(|_| truncated())?;
    let size = usize::try_from(len).map_err(|_| truncated())?;
    let end = start.checked_add(size).ok_or_else(truncated)?;
    data.get(start..end).ok_or_else(truncated)
}
