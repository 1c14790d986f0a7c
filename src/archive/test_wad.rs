//! Writes small synthetic archives for unit tests.

#![allow(clippy::unwrap_used)]

use byteorder::{LittleEndian, WriteBytesExt};

use super::{FLAT_SIZE, PALETTE_SIZE};

/// Linedef fields: begin, end, flags, front side, back side.
pub(crate) type RawLinedef = (u16, u16, u16, u16, u16);

#[derive(Debug, Default)]
pub(crate) struct TestWad {
    lumps: Vec<(String, Vec<u8>)>,
}

impl TestWad {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lump(&mut self, name: &str, data: Vec<u8>) -> &mut Self {
        self.lumps.push((name.to_owned(), data));
        self
    }

    pub(crate) fn marker(&mut self, name: &str) -> &mut Self {
        self.lump(name, Vec::new())
    }

    /// Adds a grey-ramp palette where index `i` maps to `(i, i, i)`.
    pub(crate) fn palette(&mut self) -> &mut Self {
        let data = (0..PALETTE_SIZE)
            .flat_map(|i| {
                let c = u8::try_from(i).unwrap();
                [c, c, c]
            })
            .collect();
        self.lump("PLAYPAL", data)
    }

    /// Adds a map marker followed by its geometry lumps.
    pub(crate) fn map(
        &mut self,
        name: &str,
        vertices: &[(i16, i16)],
        linedefs: &[RawLinedef],
        sides: &[u16],
        sectors: &[&str],
    ) -> &mut Self {
        let mut things = Vec::new();
        things.write_u16::<LittleEndian>(0).unwrap();

        let mut linedef_data = Vec::new();
        for &(begin, end, flags, front, back) in linedefs {
            for word in [begin, end, flags, 0, 0, front, back] {
                linedef_data.write_u16::<LittleEndian>(word).unwrap();
            }
        }

        let mut side_data = Vec::new();
        for &room in sides {
            side_data.extend_from_slice(&[0; 4]);
            side_data.extend_from_slice(&name8("-"));
            side_data.extend_from_slice(&name8("-"));
            side_data.extend_from_slice(&name8("STARTAN3"));
            side_data.write_u16::<LittleEndian>(room).unwrap();
        }

        let mut vertex_data = Vec::new();
        for &(x, y) in vertices {
            vertex_data.write_i16::<LittleEndian>(x).unwrap();
            vertex_data.write_i16::<LittleEndian>(y).unwrap();
        }

        let mut sector_data = Vec::new();
        for floor in sectors {
            sector_data.write_i16::<LittleEndian>(0).unwrap();
            sector_data.write_i16::<LittleEndian>(128).unwrap();
            sector_data.extend_from_slice(&name8(floor));
            sector_data.extend_from_slice(&name8("CEIL1_1"));
            sector_data.write_i16::<LittleEndian>(160).unwrap();
            sector_data.write_u16::<LittleEndian>(0).unwrap();
            sector_data.write_u16::<LittleEndian>(0).unwrap();
        }

        self.marker(name)
            .lump("THINGS", things)
            .lump("LINEDEFS", linedef_data)
            .lump("SIDEDEFS", side_data)
            .lump("VERTEXES", vertex_data)
            .lump("SECTORS", sector_data)
    }

    /// Adds an `F_START`/`F_END` block of solid-colour flats.
    pub(crate) fn flats(&mut self, flats: &[(&str, u8)]) -> &mut Self {
        self.marker("F_START");
        for &(name, index) in flats {
            self.lump(name, vec![index; FLAT_SIZE * FLAT_SIZE]);
        }
        self.marker("F_END")
    }

    /// Serialises the archive: header, lump data, then the directory.
    pub(crate) fn build(&self, magic: &[u8; 4]) -> Vec<u8> {
        let mut body = Vec::new();
        let mut directory = Vec::new();
        for (name, data) in &self.lumps {
            let start = 12 + body.len();
            directory
                .write_i32::<LittleEndian>(i32::try_from(start).unwrap())
                .unwrap();
            directory
                .write_i32::<LittleEndian>(i32::try_from(data.len()).unwrap())
                .unwrap();
            directory.extend_from_slice(&name8(name));
            body.extend_from_slice(data);
        }

        let mut out = Vec::new();
        out.extend_from_slice(magic);
        out.write_i32::<LittleEndian>(i32::try_from(self.lumps.len()).unwrap())
            .unwrap();
        out.write_i32::<LittleEndian>(i32::try_from(12 + body.len()).unwrap())
            .unwrap();
        out.extend_from_slice(&body);
        out.extend_from_slice(&directory);
        out
    }
}

fn name8(name: &str) -> [u8; 8] {
    let mut raw = [0; 8];
    let bytes = name.as_bytes();
    let n = bytes.len().min(8);
    raw[..n].copy_from_slice(&bytes[..n]);
    raw
}
