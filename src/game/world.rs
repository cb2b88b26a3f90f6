//! # World Representation
//!
//! The tile grid of a single dungeon floor and the carving operations the
//! generator uses to turn solid rock into rooms and corridors.

use crate::game::{Entity, Position};
use crate::generation::Room;
use serde::{Deserialize, Serialize};

/// A single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Whether movement into this tile is impossible
    pub blocked: bool,
    /// Whether light stops at this tile
    pub block_sight: bool,
    /// Whether the player has ever seen this tile
    pub explored: bool,
}

impl Tile {
    /// Creates a tile whose sight blocking follows its movement blocking.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::Tile;
    ///
    /// let wall = Tile::new(true);
    /// assert!(wall.block_sight);
    /// assert!(!wall.explored);
    /// ```
    pub fn new(blocked: bool) -> Self {
        Self::with_sight(blocked, blocked)
    }

    /// Creates a tile with an explicit sight-blocking override.
    pub fn with_sight(blocked: bool, block_sight: bool) -> Self {
        Self {
            blocked,
            block_sight,
            explored: false,
        }
    }

    /// Solid rock.
    pub fn wall() -> Self {
        Self::new(true)
    }
}

/// The tile grid for one dungeon floor.
///
/// Tiles are stored row-major (`tiles[y][x]`). Coordinates outside the grid
/// read as solid, sight-blocking rock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    /// Width in tiles
    pub width: i32,
    /// Height in tiles
    pub height: i32,
    /// Tile rows
    pub tiles: Vec<Vec<Tile>>,
}

impl Map {
    /// Creates a map filled entirely with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{Map, Position};
    ///
    /// let map = Map::new(10, 8);
    /// assert!(map.is_tile_blocked(Position::new(3, 3)));
    /// ```
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![vec![Tile::wall(); width as usize]; height as usize],
        }
    }

    /// Checks whether a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Gets the tile at a position.
    pub fn get_tile(&self, pos: Position) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
    }

    /// Gets the tile at a position mutably.
    pub fn get_tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
    }

    /// Whether the terrain alone blocks movement.
    pub fn is_tile_blocked(&self, pos: Position) -> bool {
        self.get_tile(pos).map_or(true, |tile| tile.blocked)
    }

    /// Whether the terrain blocks line of sight.
    pub fn is_opaque(&self, pos: Position) -> bool {
        self.get_tile(pos).map_or(true, |tile| tile.block_sight)
    }

    /// Whether the tile has been seen at least once.
    pub fn is_explored(&self, pos: Position) -> bool {
        self.get_tile(pos).is_some_and(|tile| tile.explored)
    }

    /// Marks a tile as seen.
    pub fn mark_explored(&mut self, pos: Position) {
        if let Some(tile) = self.get_tile_mut(pos) {
            tile.explored = true;
        }
    }

    /// Opens up the interior of a room, leaving its outer ring as wall.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{Map, Position, Room};
    ///
    /// let mut map = Map::new(20, 20);
    /// map.carve_room(&Room::new(2, 2, 5, 5));
    /// assert!(!map.is_tile_blocked(Position::new(3, 3)));
    /// assert!(map.is_tile_blocked(Position::new(2, 2)));
    /// ```
    pub fn carve_room(&mut self, room: &Room) {
        for y in (room.y1 + 1)..room.y2 {
            for x in (room.x1 + 1)..room.x2 {
                self.carve(Position::new(x, y));
            }
        }
    }

    /// Carves a one-tile-wide horizontal corridor, both ends inclusive.
    pub fn carve_horizontal_tunnel(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.carve(Position::new(x, y));
        }
    }

    /// Carves a one-tile-wide vertical corridor, both ends inclusive.
    pub fn carve_vertical_tunnel(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.carve(Position::new(x, y));
        }
    }

    /// Number of walkable tiles.
    pub fn floor_count(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| !tile.blocked)
            .count()
    }

    fn carve(&mut self, pos: Position) {
        if let Some(tile) = self.get_tile_mut(pos) {
            tile.blocked = false;
            tile.block_sight = false;
        }
    }
}

/// True if the terrain or any movement-blocking entity occupies `pos`.
pub fn is_blocked(map: &Map, entities: &[Entity], pos: Position) -> bool {
    map.is_tile_blocked(pos)
        || entities
            .iter()
            .any(|entity| entity.blocks_movement && entity.position == pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_sight_defaults_to_blocked() {
        assert!(Tile::new(true).block_sight);
        assert!(!Tile::new(false).block_sight);
        let glass = Tile::with_sight(true, false);
        assert!(glass.blocked);
        assert!(!glass.block_sight);
    }

    #[test]
    fn test_out_of_bounds_is_solid() {
        let map = Map::new(5, 5);
        assert!(map.get_tile(Position::new(-1, 0)).is_none());
        assert!(map.is_tile_blocked(Position::new(5, 0)));
        assert!(map.is_opaque(Position::new(0, 99)));
    }

    #[test]
    fn test_carve_room_keeps_border() {
        let mut map = Map::new(20, 20);
        let room = Room::new(2, 3, 6, 4);
        map.carve_room(&room);

        for y in 0..20 {
            for x in 0..20 {
                let pos = Position::new(x, y);
                let interior = x > room.x1 && x < room.x2 && y > room.y1 && y < room.y2;
                assert_eq!(!map.is_tile_blocked(pos), interior, "tile {:?}", pos);
                assert_eq!(!map.is_opaque(pos), interior, "tile {:?}", pos);
            }
        }
    }

    #[test]
    fn test_tunnels_are_inclusive_and_order_independent() {
        let mut forward = Map::new(20, 20);
        let mut backward = Map::new(20, 20);
        forward.carve_horizontal_tunnel(3, 9, 5);
        backward.carve_horizontal_tunnel(9, 3, 5);
        assert_eq!(forward, backward);
        assert!(!forward.is_tile_blocked(Position::new(3, 5)));
        assert!(!forward.is_tile_blocked(Position::new(9, 5)));
        assert!(forward.is_tile_blocked(Position::new(10, 5)));
        assert_eq!(forward.floor_count(), 7);

        let mut vertical = Map::new(20, 20);
        vertical.carve_vertical_tunnel(12, 4, 2);
        assert!(!vertical.is_tile_blocked(Position::new(2, 4)));
        assert!(!vertical.is_tile_blocked(Position::new(2, 12)));
        assert_eq!(vertical.floor_count(), 9);
    }

    #[test]
    fn test_tunnel_skips_out_of_bounds() {
        let mut map = Map::new(5, 5);
        map.carve_horizontal_tunnel(-3, 10, 2);
        assert_eq!(map.floor_count(), 5);
    }

    #[test]
    fn test_is_blocked_considers_entities() {
        let mut map = Map::new(10, 10);
        map.carve_horizontal_tunnel(1, 8, 1);
        let mut rng = rand::thread_rng();
        let mut orc = Entity::new(
            crate::game::new_entity_id(&mut rng),
            Position::new(4, 1),
            'o',
            "orc",
            crate::game::Rgb::WHITE,
            true,
        );
        assert!(is_blocked(&map, std::slice::from_ref(&orc), Position::new(4, 1)));
        assert!(!is_blocked(&map, std::slice::from_ref(&orc), Position::new(5, 1)));

        orc.blocks_movement = false;
        assert!(!is_blocked(&map, std::slice::from_ref(&orc), Position::new(4, 1)));
        assert!(is_blocked(&map, &[], Position::new(4, 2)));
    }
}
