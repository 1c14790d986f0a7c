use crate::level::Bounds;
use crate::math::{Matrix3, Point2};

/// Maps level coordinates onto a drawing surface.
///
/// A single uniform scale keeps the map's proportions; the y axis is flipped
/// so that north points up on a surface whose origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    transform: Matrix3,
    coef: f64,
}

impl Projection {
    /// Creates a projection fitting `bounds` into a `width` x `height`
    /// surface anchored at its bottom-left corner.
    #[must_use]
    pub fn new(bounds: &Bounds, width: f64, height: f64) -> Self {
        let ratios = [(bounds.width(), width), (bounds.height(), height)];
        let coef = ratios
            .iter()
            .filter(|(extent, _)| *extent > 0.0)
            .map(|(extent, size)| size / extent)
            .fold(f64::INFINITY, f64::min);
        let coef = if coef.is_finite() { coef } else { 1.0 };

        #[rustfmt::skip]
        let transform = Matrix3::new(
            coef, 0.0,   -bounds.min.x * coef,
            0.0,  -coef, height + bounds.min.y * coef,
            0.0,  0.0,   1.0,
        );
        Self { transform, coef }
    }

    /// Surface units per map unit.
    #[must_use]
    pub fn coef(&self) -> f64 {
        self.coef
    }

    #[must_use]
    pub fn project(&self, point: &Point2) -> Point2 {
        self.transform.transform_point(point)
    }
}
