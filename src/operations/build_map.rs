use std::time::Instant;

use tracing::debug;

use crate::level::Level;
use crate::polygon::{Polygon, PolygonId, PolygonStore};

use super::sort::encloses;
use super::{CollectBoundary, ContainmentSort, DecomposeRoom};

/// Polygons of a whole map and the order to fill them in.
#[derive(Debug, Default)]
pub struct MapGeometry {
    pub polygons: PolygonStore,
    /// Every polygon id, outermost first.
    pub draw_order: Vec<PolygonId>,
}

impl MapGeometry {
    /// Iterates over the polygons in draw order.
    pub fn draw_list(&self) -> impl Iterator<Item = &Polygon> {
        self.draw_order
            .iter()
            .filter_map(|&id| self.polygons.get(id))
    }
}

/// Runs the full reconstruction for one level: boundary collection and
/// decomposition per room, hole marking, then the containment sort over all
/// rooms together.
pub struct BuildMap<'a> {
    level: &'a Level,
}

impl<'a> BuildMap<'a> {
    /// Creates a new `BuildMap` operation.
    #[must_use]
    pub fn new(level: &'a Level) -> Self {
        Self { level }
    }

    /// Executes the pipeline.
    #[must_use]
    pub fn execute(&self) -> MapGeometry {
        let started = Instant::now();
        let mut polygons = PolygonStore::new();
        let mut open = 0;

        for (room, _) in self.level.rooms() {
            let boundary = CollectBoundary::new(room).execute(self.level);
            let mut loops = DecomposeRoom::new(room, &boundary).execute(self.level);
            mark_holes(&mut loops);
            for polygon in loops {
                if !polygon.is_closed() {
                    open += 1;
                }
                polygons.add(polygon);
            }
        }

        let draw_order = ContainmentSort::new(&polygons).execute();

        debug!(
            map = %self.level.name(),
            rooms = self.level.room_count(),
            polygons = polygons.len(),
            open,
            elapsed_ms = started.elapsed().as_millis(),
            "built map geometry"
        );
        MapGeometry {
            polygons,
            draw_order,
        }
    }
}

/// Flags the loops of one room that an odd number of the room's other loops
/// enclose. A loop at even depth is another piece of the room, re-entered
/// inside some other room, and is filled.
fn mark_holes(loops: &mut [Polygon]) {
    let holes: Vec<bool> = (0..loops.len())
        .map(|i| {
            let depth = (0..loops.len())
                .filter(|&j| j != i && encloses(&loops[j], &loops[i]))
                .count();
            depth % 2 == 1
        })
        .collect();
    for (polygon, hole) in loops.iter_mut().zip(holes) {
        polygon.hole = hole;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::level::test_level::LevelBuilder;
    use crate::level::RoomId;

    /// Room X is a 10x10 square; room Y a 4x4 square inside it, joined to X
    /// by two-sided edges.
    fn nested_rooms() -> (Level, RoomId, RoomId) {
        let mut b = LevelBuilder::new();
        let x = b.room("FLOOR4_8");
        let y = b.room("NUKAGE1");
        b.polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)], x);
        let inner = [(3, 3), (7, 3), (7, 7), (3, 7)];
        for i in 0..inner.len() {
            b.edge(inner[i], inner[(i + 1) % inner.len()], Some(y), Some(x));
        }
        (b.build(), x, y)
    }

    #[test]
    fn nested_room_draws_after_container() {
        let (level, x, y) = nested_rooms();
        let map = BuildMap::new(&level).execute();

        assert_eq!(map.polygons.len(), 3);
        assert_eq!(map.draw_order.len(), 3);
        let drawn: Vec<_> = map.draw_list().collect();
        assert_eq!(drawn[0].room, x);
        assert!(!drawn[0].hole);
        assert!(drawn[0].points.len() == 4 && drawn[0].signed_area() > 99.0);

        let y_pos = drawn.iter().position(|p| p.room == y).unwrap();
        assert!(y_pos > 0);
        assert!(!drawn[y_pos].hole);
    }

    #[test]
    fn container_loop_around_inner_room_is_a_hole() {
        let (level, x, _) = nested_rooms();
        let map = BuildMap::new(&level).execute();
        let x_loops: Vec<_> = map.draw_list().filter(|p| p.room == x).collect();
        assert_eq!(x_loops.len(), 2);
        assert_eq!(x_loops.iter().filter(|p| p.hole).count(), 1);
        let hole = x_loops.iter().find(|p| p.hole).unwrap();
        assert!((hole.signed_area() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn separate_rooms_are_not_holes() {
        let mut b = LevelBuilder::new();
        let a = b.room("FLAT1");
        let c = b.room("FLAT2");
        b.polygon(&[(0, 0), (10, 0), (10, 10), (0, 10)], a);
        b.polygon(&[(20, 0), (30, 0), (30, 10), (20, 10)], c);
        let level = b.build();

        let map = BuildMap::new(&level).execute();
        let rooms: Vec<_> = map.draw_list().map(|p| p.room).collect();
        assert_eq!(rooms, vec![a, c]);
        assert!(map.draw_list().all(|p| !p.hole));
    }

    #[test]
    fn every_polygon_is_drawn_once() {
        let (level, _, _) = nested_rooms();
        let map = BuildMap::new(&level).execute();
        let mut ids = map.draw_order.clone();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), map.polygons.len());
    }

    #[test]
    fn empty_level_builds_nothing() {
        let level = LevelBuilder::new().build();
        let map = BuildMap::new(&level).execute();
        assert!(map.polygons.is_empty());
        assert!(map.draw_order.is_empty());
    }

    #[test]
    fn room_reentered_inside_another_room_is_filled() {
        // X surrounds a ring of Z, which surrounds an island of X.
        let mut b = LevelBuilder::new();
        let x = b.room("FLAT_X");
        let z = b.room("FLAT_Z");
        b.polygon(&[(0, 0), (100, 0), (100, 100), (0, 100)], x);
        let ring = [(20, 20), (80, 20), (80, 80), (20, 80)];
        let island = [(40, 40), (60, 40), (60, 60), (40, 60)];
        for i in 0..4 {
            b.edge(ring[i], ring[(i + 1) % 4], Some(z), Some(x));
            b.edge(island[i], island[(i + 1) % 4], Some(x), Some(z));
        }
        let level = b.build();

        let map = BuildMap::new(&level).execute();
        let filled: Vec<_> = map
            .draw_list()
            .filter(|p| !p.hole)
            .map(|p| (p.floor.as_str(), p.signed_area().round()))
            .collect();
        assert_eq!(
            filled,
            vec![("FLAT_X", 10000.0), ("FLAT_Z", 3600.0), ("FLAT_X", 400.0)]
        );
    }
}
