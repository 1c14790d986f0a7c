use std::collections::BTreeMap;

use svg::node::element::{Definitions, Group, Image, Line, Pattern, Polygon as SvgPolygon, Rectangle};
use svg::Document;
use tracing::{debug, warn};

use crate::archive::Textures;
use crate::error::{RenderError, Result};
use crate::level::Level;
use crate::math::Point2;
use crate::operations::MapGeometry;

use super::flat::SIDE;
use super::{FlatImage, Projection, RenderParams};

/// Draws a level as an SVG document: room polygons filled with their floor
/// flats in draw order, then every edge on top.
pub struct RenderSvg<'a> {
    level: &'a Level,
    geometry: &'a MapGeometry,
    textures: Option<&'a Textures>,
    params: RenderParams,
}

impl<'a> RenderSvg<'a> {
    /// Creates a new `RenderSvg` operation with default parameters and no
    /// textures.
    #[must_use]
    pub fn new(level: &'a Level, geometry: &'a MapGeometry) -> Self {
        Self {
            level,
            geometry,
            textures: None,
            params: RenderParams::default(),
        }
    }

    #[must_use]
    pub fn with_textures(mut self, textures: &'a Textures) -> Self {
        self.textures = Some(textures);
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: RenderParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the rendering.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::EmptyLevel` if the level has no vertices, or
    /// `RenderError::Image` if a flat cannot be encoded.
    pub fn execute(&self) -> Result<Document> {
        let bounds = self.level.bounds().ok_or(RenderError::EmptyLevel)?;
        let (width, height) = (self.params.width(), self.params.height());
        let projection = Projection::new(&bounds, width, height);

        let patterns = self.patterns(projection.coef())?;
        let mut defs = Definitions::new();
        for pattern in patterns.values() {
            defs = defs.add(pattern.clone());
        }

        let mut fills = Group::new();
        let mut filled = 0;
        for polygon in self.geometry.draw_list() {
            if polygon.hole || polygon.is_degenerate() {
                continue;
            }
            let fill = if patterns.contains_key(polygon.floor.as_str()) {
                format!("url(#{})", pattern_id(&polygon.floor))
            } else {
                self.params.fallback_fill.clone()
            };
            fills = fills.add(
                SvgPolygon::new()
                    .set("points", points_attr(&projection, &polygon.points))
                    .set("fill", fill),
            );
            filled += 1;
        }

        let mut solid = Group::new()
            .set("stroke", self.params.stroke.as_str())
            .set("stroke-width", self.params.stroke_width());
        let mut secret = Group::new()
            .set("stroke", self.params.stroke.as_str())
            .set("stroke-width", self.params.stroke_width())
            .set("stroke-dasharray", self.params.secret_dash.as_str());
        for (_, edge) in self.level.edges() {
            let a = projection.project(&self.level.point(edge.begin));
            let b = projection.project(&self.level.point(edge.end));
            let line = Line::new()
                .set("x1", a.x)
                .set("y1", a.y)
                .set("x2", b.x)
                .set("y2", b.y);
            if edge.is_secret() {
                secret = secret.add(line);
            } else {
                solid = solid.add(line);
            }
        }

        debug!(
            map = %self.level.name(),
            patterns = patterns.len(),
            filled,
            edges = self.level.edge_count(),
            "rendered svg"
        );

        Ok(Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"))
            .add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", self.params.background.as_str()),
            )
            .add(defs)
            .add(fills)
            .add(solid)
            .add(secret))
    }

    /// Builds one tiling pattern per floor flat in use, keyed by flat name.
    fn patterns(&self, coef: f64) -> Result<BTreeMap<&'a str, Pattern>> {
        let mut patterns = BTreeMap::new();
        let Some(textures) = self.textures else {
            return Ok(patterns);
        };
        let tile = coef * f64::from(SIDE);

        for name in self.level.referenced_flats() {
            let Some(raw) = textures.flat(name) else {
                warn!(flat = name, "floor flat not loaded, using fallback fill");
                continue;
            };
            let Some(image) = FlatImage::from_indexed(raw, &textures.palette) else {
                warn!(flat = name, size = raw.len(), "floor flat has the wrong size");
                continue;
            };
            let pattern = Pattern::new()
                .set("id", pattern_id(name))
                .set("patternUnits", "userSpaceOnUse")
                .set("width", tile)
                .set("height", tile)
                .set("viewBox", format!("0 0 {SIDE} {SIDE}"))
                .add(
                    Image::new()
                        .set("width", SIDE)
                        .set("height", SIDE)
                        .set("href", image.data_url()?),
                );
            patterns.insert(name, pattern);
        }
        Ok(patterns)
    }
}

fn pattern_id(flat: &str) -> String {
    format!("flat-{flat}")
}

fn points_attr(projection: &Projection, points: &[Point2]) -> String {
    points
        .iter()
        .map(|p| {
            let q = projection.project(p);
            format!("{:.2},{:.2}", q.x, q.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
