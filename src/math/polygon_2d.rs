use super::distance_2d::point_on_segment;
use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// The last point connects back to the first. Positive for counter-clockwise,
/// negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Winding number of `point` with respect to the closed polygon `verts`.
///
/// Non-zero => inside, zero => outside. Points exactly on the boundary may
/// land on either side; use [`point_in_or_on_polygon_2d`] when that matters.
#[must_use]
pub fn winding_number_2d(point: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];

        if a.y <= point.y {
            if b.y > point.y && is_left(&a, &b, point) > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && is_left(&a, &b, point) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Point-in-polygon test using the winding number. Polygons with fewer than
/// 3 vertices contain nothing.
#[must_use]
pub fn point_in_polygon_2d(point: &Point2, polygon: &[Point2]) -> bool {
    polygon.len() >= 3 && winding_number_2d(point, polygon) != 0
}

/// Like [`point_in_polygon_2d`], but also accepts points lying on an edge.
#[must_use]
pub fn point_in_or_on_polygon_2d(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let on_boundary =
        (0..n).any(|i| point_on_segment(point, &polygon[i], &polygon[(i + 1) % n]));
    on_boundary || winding_number_2d(point, polygon) != 0
}

/// Returns the index of the leftmost vertex (smallest x), breaking ties by
/// smallest y. Used to give closed polygons a deterministic start.
#[must_use]
pub fn canonical_start_index(points: &[Point2]) -> usize {
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if pt.x < b.x - TOLERANCE || (pt.x - b.x).abs() < TOLERANCE && pt.y < b.y {
            best = i;
        }
    }
    best
}

/// Sign test: `> 0` if `p` is left of the directed line `a -> b`,
/// `< 0` if right, `0` if collinear.
#[inline]
fn is_left(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}
