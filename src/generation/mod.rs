//! # Generation Module
//!
//! Procedural content generation for dungeon floors, monsters and items.
//!
//! This module provides the foundation for creating procedural content in
//! Gloom. A [`Generator`] turns a [`GenerationConfig`] and a seeded random
//! source into content; the same seed always produces the same floor.
//! Monster and item frequencies scale with depth through step tables read by
//! [`from_dungeon_level`] and sampled by [`choose_weighted`].

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::config::{MAP_HEIGHT, MAP_WIDTH, MAX_ROOMS, ROOM_MAX_SIZE, ROOM_MIN_SIZE};
use crate::game::{Entity, EntityId, Map, Position};
use crate::{GloomError, GloomResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls the floor size, how many rooms are attempted and how large they
/// may be, and which depth the population tables are read at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Map width in tiles
    pub width: i32,
    /// Map height in tiles
    pub height: i32,
    /// Number of placement attempts
    pub max_rooms: u32,
    /// Minimum room size, walls included
    pub room_min_size: i32,
    /// Maximum room size, walls included
    pub room_max_size: i32,
    /// Depth the population tables are read at
    pub dungeon_level: u32,
    /// Random seed for reproducible generation
    pub seed: u64,
}

impl GenerationConfig {
    /// Creates the standard configuration for the first floor.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert_eq!(config.dungeon_level, 1);
    /// assert!(config.room_max_size >= config.room_min_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            max_rooms: MAX_ROOMS,
            room_min_size: ROOM_MIN_SIZE,
            room_max_size: ROOM_MAX_SIZE,
            dungeon_level: 1,
            seed,
        }
    }

    /// Creates a configuration for testing with smaller, simpler floors.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            width: 40,
            height: 24,
            max_rooms: 12,
            room_min_size: 4,
            room_max_size: 7,
            dungeon_level: 1,
            seed,
        }
    }

    /// The standard configuration for a given depth.
    pub fn for_level(seed: u64, dungeon_level: u32) -> Self {
        Self {
            dungeon_level,
            ..Self::new(seed)
        }
    }

    /// Rejects sizes that can never produce a room.
    pub fn validate(&self) -> GloomResult<()> {
        if self.room_min_size < 3 {
            return Err(GloomError::InvalidConfig(format!(
                "Rooms need at least 3 tiles per side, got {}",
                self.room_min_size
            )));
        }
        if self.room_max_size < self.room_min_size {
            return Err(GloomError::InvalidConfig(format!(
                "Room size range {}..={} is empty",
                self.room_min_size, self.room_max_size
            )));
        }
        if self.room_max_size + 1 > self.width || self.room_max_size + 1 > self.height {
            return Err(GloomError::InvalidConfig(format!(
                "Rooms up to {} tiles do not fit a {}x{} map",
                self.room_max_size, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Represents a rectangular room in the dungeon.
///
/// `x2`/`y2` are exclusive of the carved interior: the interior spans
/// `x1 + 1..x2` and `y1 + 1..y2`, leaving a wall ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Room {
    /// Creates a room from its top-left corner and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{Position, Room};
    ///
    /// let room = Room::new(5, 5, 10, 8);
    /// assert_eq!((room.x2, room.y2), (15, 13));
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// ```
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Checks if this room overlaps with another room.
    ///
    /// Rooms that merely share a wall count as overlapping.
    pub fn intersects(&self, other: &Room) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Checks if a position is on the carved interior of this room.
    pub fn interior_contains(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }

    /// A uniformly random interior position.
    pub fn random_interior_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let x = rng.gen_range(self.x1 + 1..=self.x2 - 1);
        let y = rng.gen_range(self.y1 + 1..=self.y2 - 1);
        Position::new(x, y)
    }
}

/// A freshly generated floor.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLevel {
    pub map: Map,
    /// Monsters, items and stairs, in draw order
    pub entities: Vec<Entity>,
    /// Accepted rooms in placement order
    pub rooms: Vec<Room>,
    /// Center of the first room
    pub player_spawn: Position,
    /// The stairs entity inside `entities`
    pub stairs: EntityId,
}

/// Trait for procedural generators.
///
/// All generation systems in Gloom implement this trait, allowing for
/// consistent interfaces and easy substitution in tests.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GloomResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> GloomResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Reads a depth-scaled step table.
///
/// Entries are `(value, from_level)` in ascending level order. Returns the
/// value of the last entry whose level has been reached, or 0 if none has.
///
/// # Examples
///
/// ```
/// use gloom::from_dungeon_level;
///
/// let table = [(2, 1), (3, 4), (5, 6)];
/// assert_eq!(from_dungeon_level(&table, 1), 2);
/// assert_eq!(from_dungeon_level(&table, 5), 3);
/// assert_eq!(from_dungeon_level(&table, 9), 5);
/// assert_eq!(from_dungeon_level(&[(25, 4)], 3), 0);
/// ```
pub fn from_dungeon_level(table: &[(u32, u32)], level: u32) -> u32 {
    table
        .iter()
        .rev()
        .find(|(_, from_level)| level >= *from_level)
        .map(|(value, _)| *value)
        .unwrap_or(0)
}

/// Picks a choice with probability proportional to its weight.
///
/// Returns `None` if every weight is zero.
pub fn choose_weighted<K: Copy, R: Rng + ?Sized>(choices: &[(K, u32)], rng: &mut R) -> Option<K> {
    let total: u32 = choices.iter().map(|(_, weight)| weight).sum();
    if total == 0 {
        return None;
    }
    let draw = rng.gen_range(1..=total);
    choose_weighted_with_draw(choices, draw)
}

/// The deterministic half of [`choose_weighted`]: the first choice whose
/// running weight total reaches `draw`.
///
/// # Examples
///
/// ```
/// use gloom::choose_weighted_with_draw;
///
/// let choices = [('a', 80), ('b', 20)];
/// assert_eq!(choose_weighted_with_draw(&choices, 80), Some('a'));
/// assert_eq!(choose_weighted_with_draw(&choices, 81), Some('b'));
/// ```
pub fn choose_weighted_with_draw<K: Copy>(choices: &[(K, u32)], draw: u32) -> Option<K> {
    let mut running = 0;
    for (choice, weight) in choices {
        running += weight;
        if draw <= running {
            return Some(*choice);
        }
    }
    None
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Validates that a floor meets basic requirements.
    pub fn validate_level(level: &GeneratedLevel) -> GloomResult<()> {
        if level.rooms.is_empty() {
            return Err(GloomError::GenerationFailed(
                "Level has no rooms".to_string(),
            ));
        }
        if level.map.floor_count() == 0 {
            return Err(GloomError::GenerationFailed(
                "Level has no floor tiles".to_string(),
            ));
        }
        if level.map.is_tile_blocked(level.player_spawn) {
            return Err(GloomError::GenerationFailed(format!(
                "Player spawn {:?} is not walkable",
                level.player_spawn
            )));
        }
        if !level.entities.iter().any(|entity| entity.id == level.stairs) {
            return Err(GloomError::GenerationFailed(
                "Level has no stairs".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.width, MAP_WIDTH);
        assert!(config.room_max_size >= config.room_min_size);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_for_level_keeps_layout_settings() {
        let config = GenerationConfig::for_level(9, 4);
        assert_eq!(config.dungeon_level, 4);
        assert_eq!(config.max_rooms, MAX_ROOMS);
    }

    #[test]
    fn test_config_rejects_rooms_larger_than_map() {
        let mut config = GenerationConfig::new(1);
        config.width = 8;
        assert!(matches!(config.validate(), Err(GloomError::InvalidConfig(_))));

        let mut config = GenerationConfig::new(1);
        config.room_min_size = 9;
        config.room_max_size = 5;
        assert!(matches!(config.validate(), Err(GloomError::InvalidConfig(_))));
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(5, 5, 10, 8);
        assert_eq!(room.center(), Position::new(10, 9));
        assert!(room.interior_contains(Position::new(6, 6)));
        assert!(!room.interior_contains(Position::new(5, 6)));
        assert!(!room.interior_contains(Position::new(15, 6)));
    }

    #[test]
    fn test_room_overlap() {
        let room1 = Room::new(5, 5, 10, 8);
        let room2 = Room::new(10, 8, 6, 6);
        let touching = Room::new(15, 5, 4, 4);
        let apart = Room::new(20, 20, 5, 5);

        assert!(room1.intersects(&room2));
        assert!(room2.intersects(&room1));
        assert!(room1.intersects(&touching));
        assert!(!room1.intersects(&apart));
        assert!(!apart.intersects(&room1));
    }

    #[test]
    fn test_random_interior_point_stays_inside() {
        let room = Room::new(3, 4, 6, 6);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(room.interior_contains(room.random_interior_point(&mut rng)));
        }
    }

    #[test]
    fn test_from_dungeon_level_steps() {
        let table = [(15, 3), (30, 5), (60, 7)];
        assert_eq!(from_dungeon_level(&table, 1), 0);
        assert_eq!(from_dungeon_level(&table, 3), 15);
        assert_eq!(from_dungeon_level(&table, 4), 15);
        assert_eq!(from_dungeon_level(&table, 5), 30);
        assert_eq!(from_dungeon_level(&table, 100), 60);
        assert_eq!(from_dungeon_level(&[], 3), 0);
    }

    #[test]
    fn test_weighted_choice_boundaries() {
        let choices = [("a", 80), ("b", 20)];
        assert_eq!(choose_weighted_with_draw(&choices, 1), Some("a"));
        assert_eq!(choose_weighted_with_draw(&choices, 80), Some("a"));
        assert_eq!(choose_weighted_with_draw(&choices, 81), Some("b"));
        assert_eq!(choose_weighted_with_draw(&choices, 100), Some("b"));
        assert_eq!(choose_weighted_with_draw(&choices, 101), None);
    }

    #[test]
    fn test_weighted_choice_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(8);
        let choices = [("never", 0), ("always", 5)];
        for _ in 0..50 {
            assert_eq!(choose_weighted(&choices, &mut rng), Some("always"));
        }
        assert_eq!(choose_weighted::<&str, _>(&[("none", 0)], &mut rng), None);
    }

    #[test]
    fn test_utils_rng_creation() {
        let config = GenerationConfig::new(12345);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
