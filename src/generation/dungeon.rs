//! # Dungeon Generation
//!
//! Procedural dungeon layout generation using the room-and-corridor algorithm.
//!
//! Rooms are placed at random and rejected when they touch an earlier room.
//! Each accepted room is joined to the one accepted before it with an
//! L-shaped tunnel, so the floor is connected by construction.

use crate::game::{is_blocked, new_entity_id, Entity, Map, Position, Rgb};
use crate::generation::{
    choose_weighted, item_weights, max_items_per_room, max_monsters_per_room, monster_weights,
    spawn_item, spawn_monster, utils, GeneratedLevel, GenerationConfig, Generator, Room,
};
use crate::{GloomError, GloomResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates floors by:
/// 1. Placing rooms randomly with collision detection
/// 2. Tunnelling from each new room to the previous one
/// 3. Populating each room with monsters and items
/// 4. Putting the stairs down in the last room
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Whether rooms receive monsters and items
    pub populate: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{GenerationConfig, Generator, RoomCorridorGenerator};
    /// use rand::SeedableRng;
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// let config = GenerationConfig::new(7);
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(config.seed);
    /// let level = generator.generate(&config, &mut rng).unwrap();
    /// assert!(!level.rooms.is_empty());
    /// ```
    pub fn new() -> Self {
        Self { populate: true }
    }

    /// Creates a generator that carves the layout and stairs only.
    pub fn layout_only() -> Self {
        Self { populate: false }
    }

    /// Draws a candidate room that fits inside the map.
    fn room_candidate(&self, config: &GenerationConfig, rng: &mut StdRng) -> Room {
        let w = rng.gen_range(config.room_min_size..=config.room_max_size);
        let h = rng.gen_range(config.room_min_size..=config.room_max_size);
        let x = rng.gen_range(0..=config.width - w - 1);
        let y = rng.gen_range(0..=config.height - h - 1);
        Room::new(x, y, w, h)
    }

    /// Joins two room centers with an L-shaped tunnel.
    fn connect(&self, map: &mut Map, prev: Position, new: Position, rng: &mut StdRng) {
        if rng.gen_range(0..=1) == 1 {
            map.carve_horizontal_tunnel(prev.x, new.x, prev.y);
            map.carve_vertical_tunnel(prev.y, new.y, new.x);
        } else {
            map.carve_vertical_tunnel(prev.y, new.y, prev.x);
            map.carve_horizontal_tunnel(prev.x, new.x, new.y);
        }
    }

    /// Scatters monsters and items over a room's interior.
    ///
    /// Candidates landing on a blocked tile, a blocking entity or the player
    /// spawn are dropped.
    fn populate_room(
        &self,
        room: &Room,
        map: &Map,
        entities: &mut Vec<Entity>,
        player_spawn: Position,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) {
        let level = config.dungeon_level;

        let monster_count = rng.gen_range(0..=max_monsters_per_room(level));
        let monsters = monster_weights(level);
        for _ in 0..monster_count {
            let pos = room.random_interior_point(rng);
            if pos == player_spawn || is_blocked(map, entities, pos) {
                continue;
            }
            if let Some(kind) = choose_weighted(&monsters, rng) {
                entities.push(spawn_monster(kind, pos, rng));
            }
        }

        let item_count = rng.gen_range(0..=max_items_per_room(level));
        let items = item_weights(level);
        for _ in 0..item_count {
            let pos = room.random_interior_point(rng);
            if pos == player_spawn || is_blocked(map, entities, pos) {
                continue;
            }
            if let Some(kind) = choose_weighted(&items, rng) {
                // Items go underneath whatever shares their tile.
                entities.insert(0, spawn_item(kind, pos, rng));
            }
        }
    }
}

impl Generator<GeneratedLevel> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> GloomResult<GeneratedLevel> {
        config.validate()?;

        let mut map = Map::new(config.width, config.height);
        let mut entities = Vec::new();
        let mut rooms: Vec<Room> = Vec::new();
        let mut player_spawn = Position::new(0, 0);

        for _ in 0..config.max_rooms {
            let room = self.room_candidate(config, rng);
            if rooms.iter().any(|other| room.intersects(other)) {
                continue;
            }

            map.carve_room(&room);
            let center = room.center();
            match rooms.last() {
                None => player_spawn = center,
                Some(prev) => self.connect(&mut map, prev.center(), center, rng),
            }
            if self.populate {
                self.populate_room(&room, &map, &mut entities, player_spawn, config, rng);
            }
            rooms.push(room);
        }

        let Some(last) = rooms.last() else {
            return Err(GloomError::GenerationFailed(format!(
                "No room fit after {} attempts",
                config.max_rooms
            )));
        };

        let stairs = Entity::new(
            new_entity_id(rng),
            last.center(),
            '>',
            "stairs",
            Rgb::WHITE,
            false,
        )
        .always_visible();
        let stairs_id = stairs.id;
        entities.insert(0, stairs);

        debug!(
            "{} placed {} rooms and {} entities",
            self.generator_type(),
            rooms.len(),
            entities.len()
        );

        let level = GeneratedLevel {
            map,
            entities,
            rooms,
            player_spawn,
            stairs: stairs_id,
        };
        self.validate(&level, config)?;

        info!(
            "Generated dungeon level {} ({} rooms)",
            config.dungeon_level,
            level.rooms.len()
        );
        Ok(level)
    }

    fn validate(&self, level: &GeneratedLevel, _config: &GenerationConfig) -> GloomResult<()> {
        utils::validate_level(level)
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    fn generate(config: &GenerationConfig) -> GeneratedLevel {
        let mut rng = utils::create_rng(config);
        RoomCorridorGenerator::new().generate(config, &mut rng).unwrap()
    }

    fn reachable_from(map: &Map, start: Position) -> HashSet<Position> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let next = Position::new(pos.x + dx, pos.y + dy);
                if !map.is_tile_blocked(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn test_generation_with_small_level() {
        let config = GenerationConfig::for_testing(12345);
        let level = generate(&config);

        assert_eq!(level.map.width, config.width);
        assert_eq!(level.map.height, config.height);
        assert!(level.map.floor_count() > 0);
        assert_eq!(level.player_spawn, level.rooms[0].center());
    }

    #[test]
    fn test_rooms_do_not_overlap() {
        let level = generate(&GenerationConfig::new(99));
        for (i, a) in level.rooms.iter().enumerate() {
            for b in &level.rooms[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_every_room_is_reachable() {
        let level = generate(&GenerationConfig::new(2024));
        let reachable = reachable_from(&level.map, level.player_spawn);
        for room in &level.rooms {
            assert!(reachable.contains(&room.center()));
        }
    }

    #[test]
    fn test_stairs_in_last_room_drawn_first() {
        let level = generate(&GenerationConfig::new(5));
        let stairs = &level.entities[0];
        assert_eq!(stairs.id, level.stairs);
        assert_eq!(stairs.glyph, '>');
        assert!(stairs.always_visible);
        assert_eq!(Some(stairs.position), level.rooms.last().map(Room::center));
    }

    #[test]
    fn test_population_respects_rooms_and_spawn() {
        for seed in 0..20 {
            let level = generate(&GenerationConfig::for_level(seed, 6));
            let mut blockers = HashSet::new();
            for entity in &level.entities {
                assert_ne!(
                    (entity.position, entity.blocks_movement),
                    (level.player_spawn, true)
                );
                assert!(level
                    .rooms
                    .iter()
                    .any(|room| room.interior_contains(entity.position)));
                if entity.blocks_movement {
                    assert!(blockers.insert(entity.position), "two blockers share a tile");
                }
            }
        }
    }

    #[test]
    fn test_layout_only_has_just_stairs() {
        let config = GenerationConfig::new(77);
        let mut rng = utils::create_rng(&config);
        let level = RoomCorridorGenerator::layout_only()
            .generate(&config, &mut rng)
            .unwrap();
        assert_eq!(level.entities.len(), 1);
    }

    #[test]
    fn test_same_seed_same_floor() {
        let config = GenerationConfig::new(31337);
        assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn test_no_room_is_an_error() {
        let mut config = GenerationConfig::for_testing(1);
        config.max_rooms = 0;
        let mut rng = utils::create_rng(&config);
        let result = RoomCorridorGenerator::new().generate(&config, &mut rng);
        assert!(matches!(result, Err(GloomError::GenerationFailed(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GenerationConfig::for_testing(1);
        config.height = 5;
        let mut rng = utils::create_rng(&config);
        let result = RoomCorridorGenerator::new().generate(&config, &mut rng);
        assert!(matches!(result, Err(GloomError::InvalidConfig(_))));
    }

    #[test]
    fn test_validation() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::for_testing(12345);
        let mut level = generate(&config);
        assert!(generator.validate(&level, &config).is_ok());

        level.map = Map::new(config.width, config.height);
        assert!(generator.validate(&level, &config).is_err());
    }
}
