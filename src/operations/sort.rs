use tracing::warn;

use crate::math::polygon_2d::point_in_or_on_polygon_2d;
use crate::math::{Point2, TOLERANCE};
use crate::polygon::{Polygon, PolygonId, PolygonStore};

/// Orders polygons for painter's-algorithm filling: a polygon is never drawn
/// before a polygon that encloses it.
///
/// Each pass emits, in store order, every remaining polygon that no other
/// remaining polygon encloses, so polygons come out by nesting depth.
///
/// Vertices lying on a container's boundary count as enclosed (see
/// [`encloses`]).
pub struct ContainmentSort<'a> {
    store: &'a PolygonStore,
}

impl<'a> ContainmentSort<'a> {
    /// Creates a new `ContainmentSort` over every polygon in the store.
    #[must_use]
    pub fn new(store: &'a PolygonStore) -> Self {
        Self { store }
    }

    /// Executes the sort, returning the draw order.
    #[must_use]
    pub fn execute(&self) -> Vec<PolygonId> {
        let polygons: Vec<(PolygonId, &Polygon)> = self.store.iter().collect();
        let n = polygons.len();
        let boxes: Vec<_> = polygons.iter().map(|(_, p)| bounding_box(&p.points)).collect();

        // enclosed[q * n + p]: polygon q encloses polygon p.
        let mut enclosed = vec![false; n * n];
        for q in 0..n {
            for p in 0..n {
                if p != q && box_within(&boxes[p], &boxes[q]) {
                    enclosed[q * n + p] = encloses(polygons[q].1, polygons[p].1);
                }
            }
        }

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        while order.len() < n {
            let outer: Vec<usize> = (0..n)
                .filter(|&p| !visited[p])
                .filter(|&p| !(0..n).any(|q| !visited[q] && enclosed[q * n + p]))
                .collect();

            if outer.is_empty() {
                warn!(
                    remaining = n - order.len(),
                    "cyclic polygon containment, drawing the rest in store order"
                );
                order.extend((0..n).filter(|&p| !visited[p]).map(|p| polygons[p].0));
                break;
            }

            for p in outer {
                visited[p] = true;
                order.push(polygons[p].0);
            }
        }
        order
    }
}

/// Returns `true` if `outer` encloses `inner`: every point of `inner` lies
/// inside or on `outer`, and the reverse does not hold. Polygons with fewer
/// than 3 points enclose nothing.
#[must_use]
pub fn encloses(outer: &Polygon, inner: &Polygon) -> bool {
    contains_all(outer, inner) && !contains_all(inner, outer)
}

fn contains_all(outer: &Polygon, inner: &Polygon) -> bool {
    !outer.is_degenerate()
        && inner
            .points
            .iter()
            .all(|pt| point_in_or_on_polygon_2d(pt, &outer.points))
}

type Aabb = (Point2, Point2);

fn bounding_box(points: &[Point2]) -> Aabb {
    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

fn box_within(inner: &Aabb, outer: &Aabb) -> bool {
    inner.0.x >= outer.0.x - TOLERANCE
        && inner.0.y >= outer.0.y - TOLERANCE
        && inner.1.x <= outer.1.x + TOLERANCE
        && inner.1.y <= outer.1.y + TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{EdgeId, RoomId, VertexId};

    fn poly(room: usize, points: &[(f64, f64)]) -> Polygon {
        let n = points.len();
        Polygon {
            room: RoomId(room),
            floor: format!("FLAT{room}"),
            vertices: (0..n).map(VertexId).collect(),
            edges: (0..n).map(EdgeId).collect(),
            points: points.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
            closed: true,
            hole: false,
        }
    }

    fn square(room: usize, lo: f64, hi: f64) -> Polygon {
        poly(room, &[(lo, lo), (hi, lo), (hi, hi), (lo, hi)])
    }

    fn sorted_rooms(store: &PolygonStore) -> Vec<usize> {
        ContainmentSort::new(store)
            .execute()
            .into_iter()
            .map(|id| store.get(id).map_or(usize::MAX, |p| p.room.index()))
            .collect()
    }

    #[test]
    fn nested_room_draws_after_its_container() {
        let mut store = PolygonStore::new();
        store.add(square(1, 3.0, 7.0));
        store.add(square(0, 0.0, 10.0));
        assert_eq!(sorted_rooms(&store), vec![0, 1]);
    }

    #[test]
    fn already_ordered_input_is_kept() {
        let mut store = PolygonStore::new();
        store.add(square(0, 0.0, 10.0));
        store.add(square(1, 3.0, 7.0));
        assert_eq!(sorted_rooms(&store), vec![0, 1]);
    }

    #[test]
    fn three_levels_of_nesting() {
        let mut store = PolygonStore::new();
        store.add(square(2, 4.0, 6.0));
        store.add(square(1, 2.0, 8.0));
        store.add(square(0, 0.0, 10.0));
        assert_eq!(sorted_rooms(&store), vec![0, 1, 2]);
    }

    #[test]
    fn siblings_keep_store_order() {
        let mut store = PolygonStore::new();
        store.add(square(0, 0.0, 100.0));
        store.add(square(3, 60.0, 70.0));
        store.add(square(1, 10.0, 20.0));
        store.add(square(2, 30.0, 40.0));
        store.add(poly(4, &[(200.0, 0.0), (210.0, 0.0), (205.0, 5.0)]));
        assert_eq!(sorted_rooms(&store), vec![0, 4, 3, 1, 2]);
    }

    #[test]
    fn adjacent_rooms_do_not_enclose_each_other() {
        let left = square(0, 0.0, 10.0);
        let right = poly(1, &[(10.0, 0.0), (20.0, 0.0), (20.0, 10.0), (10.0, 10.0)]);
        assert!(!encloses(&left, &right));
        assert!(!encloses(&right, &left));
    }

    #[test]
    fn inner_room_touching_container_boundary_is_enclosed() {
        let outer = square(0, 0.0, 10.0);
        let corner = square(1, 0.0, 5.0);
        assert!(encloses(&outer, &corner));
        assert!(!encloses(&corner, &outer));
    }

    #[test]
    fn identical_loops_do_not_deadlock() {
        // A room's hole and the room filling it share the same loop.
        let mut store = PolygonStore::new();
        store.add(square(0, 0.0, 10.0));
        store.add(square(0, 3.0, 7.0));
        store.add(square(1, 3.0, 7.0));
        assert_eq!(sorted_rooms(&store), vec![0, 0, 1]);
    }

    #[test]
    fn degenerate_polygon_never_encloses() {
        let line = poly(0, &[(0.0, 0.0), (10.0, 10.0)]);
        let dot = poly(1, &[(5.0, 5.0)]);
        assert!(!encloses(&line, &dot));

        let mut store = PolygonStore::new();
        store.add(line);
        store.add(square(2, 0.0, 10.0));
        // The segment lies inside the square, so it is drawn after it.
        assert_eq!(sorted_rooms(&store), vec![2, 0]);
    }

    #[test]
    fn empty_store_sorts_to_nothing() {
        assert!(ContainmentSort::new(&PolygonStore::new()).execute().is_empty());
    }
}
