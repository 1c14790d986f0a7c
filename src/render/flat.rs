use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::archive::{Palette, FLAT_SIZE};
use crate::error::{RenderError, Result};

/// Side length of a flat, as an image dimension.
pub(super) const SIDE: u32 = 64;

/// A floor flat expanded from palette indices to RGBA pixels.
#[derive(Debug, Clone)]
pub struct FlatImage {
    pixels: RgbaImage,
}

impl FlatImage {
    /// Expands 64x64 indexed pixels through `palette`.
    ///
    /// Returns `None` if `indexed` does not hold exactly one flat.
    #[must_use]
    pub fn from_indexed(indexed: &[u8], palette: &Palette) -> Option<Self> {
        if indexed.len() != FLAT_SIZE * FLAT_SIZE {
            return None;
        }
        let pixels = RgbaImage::from_fn(SIDE, SIDE, |x, y| {
            let [r, g, b] = palette.rgb(indexed[(y * SIDE + x) as usize]);
            Rgba([r, g, b, 255])
        });
        Some(Self { pixels })
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    /// Encodes the flat as PNG.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Image` if encoding fails.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png = Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut png, ImageFormat::Png)
            .map_err(RenderError::from)?;
        Ok(png.into_inner())
    }

    /// Encodes the flat as a `data:` URL suitable for an SVG `<image>`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Image` if PNG encoding fails.
    pub fn data_url(&self) -> Result<String> {
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(self.to_png()?)))
    }
}
