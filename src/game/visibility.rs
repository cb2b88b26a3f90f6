//! # Visibility
//!
//! Field-of-view is a collaborator the engine queries rather than owns. The
//! [`FieldOfView`] trait is the port; [`RaycastFov`] is the provider the game
//! ships with, and tests substitute their own.

use crate::game::{Map, Position};
use std::collections::HashSet;

/// Computes which tiles can currently be seen.
pub trait FieldOfView {
    /// Recomputes visibility from `origin` out to `radius` tiles.
    fn compute(&mut self, map: &Map, origin: Position, radius: i32);

    /// Whether `pos` was visible in the last computation.
    fn is_visible(&self, pos: Position) -> bool;
}

/// Straight-line ray casting toward every cell of the radius square.
///
/// A ray stops after the first sight-blocking tile, so walls facing the
/// viewer are lit. Cells beyond the Euclidean radius are never visible.
#[derive(Debug, Clone, Default)]
pub struct RaycastFov {
    visible: HashSet<Position>,
}

impl RaycastFov {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently visible tiles.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    fn cast(&mut self, map: &Map, origin: Position, target: Position, radius: i32) {
        let limit = radius as f64;
        for pos in line(origin, target) {
            if !map.in_bounds(pos) || origin.euclidean_distance(pos) > limit {
                break;
            }
            self.visible.insert(pos);
            if pos != origin && map.is_opaque(pos) {
                break;
            }
        }
    }
}

impl FieldOfView for RaycastFov {
    fn compute(&mut self, map: &Map, origin: Position, radius: i32) {
        self.visible.clear();
        if !map.in_bounds(origin) {
            return;
        }
        self.visible.insert(origin);

        let radius = radius.max(0);
        for offset in -radius..=radius {
            for target in [
                Position::new(origin.x + offset, origin.y - radius),
                Position::new(origin.x + offset, origin.y + radius),
                Position::new(origin.x - radius, origin.y + offset),
                Position::new(origin.x + radius, origin.y + offset),
            ] {
                self.cast(map, origin, target, radius);
            }
        }
    }

    fn is_visible(&self, pos: Position) -> bool {
        self.visible.contains(&pos)
    }
}

/// Bresenham line from `from` to `to`, both ends included.
fn line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut current = from;
    let mut points = Vec::with_capacity((dx.max(-dy) + 1) as usize);

    loop {
        points.push(current);
        if current == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::Room;

    fn open_room() -> Map {
        let mut map = Map::new(30, 30);
        map.carve_room(&Room::new(0, 0, 29, 29));
        map
    }

    #[test]
    fn test_line_endpoints() {
        let points = line(Position::new(0, 0), Position::new(4, 2));
        assert_eq!(points.first(), Some(&Position::new(0, 0)));
        assert_eq!(points.last(), Some(&Position::new(4, 2)));
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn test_open_room_respects_radius() {
        let map = open_room();
        let mut fov = RaycastFov::new();
        fov.compute(&map, Position::new(15, 15), 5);

        assert!(fov.is_visible(Position::new(15, 15)));
        assert!(fov.is_visible(Position::new(20, 15)));
        assert!(!fov.is_visible(Position::new(21, 15)));
        assert!(!fov.is_visible(Position::new(20, 20)));
    }

    #[test]
    fn test_walls_block_sight_but_are_lit() {
        let mut map = open_room();
        if let Some(tile) = map.get_tile_mut(Position::new(12, 10)) {
            tile.blocked = true;
            tile.block_sight = true;
        }
        let mut fov = RaycastFov::new();
        fov.compute(&map, Position::new(10, 10), 8);

        assert!(fov.is_visible(Position::new(12, 10)));
        assert!(!fov.is_visible(Position::new(14, 10)));
    }

    #[test]
    fn test_recompute_clears_previous_view() {
        let map = open_room();
        let mut fov = RaycastFov::new();
        fov.compute(&map, Position::new(5, 5), 3);
        assert!(fov.is_visible(Position::new(6, 6)));
        fov.compute(&map, Position::new(25, 25), 3);
        assert!(!fov.is_visible(Position::new(6, 6)));
        assert!(fov.visible_count() > 1);
    }
}
