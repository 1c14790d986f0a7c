mod flat;
mod projection;
mod svg_map;

pub use flat::FlatImage;
pub use projection::Projection;
pub use svg_map::RenderSvg;

use crate::error::{RenderError, Result};

/// Parameters controlling the SVG output.
#[derive(Debug, Clone)]
pub struct RenderParams {
    width: f64,
    height: f64,
    stroke_width: f64,
    /// Colour of every edge line.
    pub stroke: String,
    /// Dash pattern applied to secret edges.
    pub secret_dash: String,
    pub background: String,
    /// Fill for polygons whose floor flat could not be loaded.
    pub fallback_fill: String,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            stroke_width: 1.0,
            stroke: "lightgray".to_owned(),
            secret_dash: "2, 2".to_owned(),
            background: "black".to_owned(),
            fallback_fill: "dimgray".to_owned(),
        }
    }
}

impl RenderParams {
    /// Sets the size of the drawing surface.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is not a positive finite number.
    pub fn with_size(mut self, width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RenderError::InvalidParameters(format!(
                "surface size must be positive, got {width}x{height}"
            ))
            .into());
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Sets the edge line width.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not positive.
    pub fn with_stroke_width(mut self, width: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(RenderError::InvalidParameters(
                "stroke width must be positive".to_owned(),
            )
            .into());
        }
        self.stroke_width = width;
        Ok(self)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }
}
