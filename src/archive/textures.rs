use std::collections::BTreeMap;

use crate::error::ArchiveError;

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 256;

/// Side length of a square flat, in pixels.
pub const FLAT_SIZE: usize = 64;

/// The first palette of `PLAYPAL`: 256 RGB triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Decodes the first 768 bytes of a `PLAYPAL` lump.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::LumpSize` if the lump is shorter than one palette.
    pub fn decode(data: &[u8]) -> Result<Self, ArchiveError> {
        let raw = data
            .get(..PALETTE_SIZE * 3)
            .ok_or(ArchiveError::LumpSize {
                name: "PLAYPAL",
                size: data.len(),
                stride: PALETTE_SIZE * 3,
            })?;
        let colors = raw.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        Ok(Self { colors })
    }

    /// Returns the RGB colour of a palette index.
    #[must_use]
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.colors[usize::from(index)]
    }
}

/// Palette and the floor flats referenced by one level.
#[derive(Debug, Clone)]
pub struct Textures {
    pub palette: Palette,
    /// Raw indexed pixels keyed by flat name.
    pub flats: BTreeMap<String, Vec<u8>>,
}

impl Textures {
    /// Returns the raw pixels of a flat, if it was loaded.
    #[must_use]
    pub fn flat(&self, name: &str) -> Option<&[u8]> {
        self.flats.get(name).map(Vec::as_slice)
    }
}
