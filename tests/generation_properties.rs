//! Property tests for the room-and-corridor floor generator.

use gloom::utils::create_rng;
use gloom::{GeneratedLevel, GenerationConfig, Generator, Map, Position, RoomCorridorGenerator};
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

fn generate(seed: u64, dungeon_level: u32) -> GeneratedLevel {
    let config = GenerationConfig::for_level(seed, dungeon_level);
    let mut rng = create_rng(&config);
    RoomCorridorGenerator::new()
        .generate(&config, &mut rng)
        .expect("generation should succeed for the default config")
}

fn reachable_from(map: &Map, start: Position) -> HashSet<Position> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);
    while let Some(pos) = queue.pop_front() {
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let next = Position::new(pos.x + dx, pos.y + dy);
            if map.in_bounds(next) && !map.is_tile_blocked(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn rooms_never_overlap(seed in any::<u64>(), dungeon_level in 1_u32..=8) {
        let level = generate(seed, dungeon_level);
        for (i, a) in level.rooms.iter().enumerate() {
            for b in level.rooms.iter().skip(i + 1) {
                prop_assert!(!a.intersects(b), "seed={seed}: {a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn every_floor_tile_is_reachable_from_spawn(seed in any::<u64>(), dungeon_level in 1_u32..=8) {
        let level = generate(seed, dungeon_level);
        let reachable = reachable_from(&level.map, level.player_spawn);
        prop_assert_eq!(reachable.len(), level.map.floor_count(), "seed={}", seed);
    }

    #[test]
    fn stairs_sit_in_the_last_room(seed in any::<u64>()) {
        let level = generate(seed, 1);
        let stairs = level
            .entities
            .iter()
            .find(|entity| entity.id == level.stairs)
            .map(|entity| entity.position);
        let last = level.rooms.last().map(|room| room.center());
        prop_assert!(stairs.is_some());
        prop_assert_eq!(stairs, last);
    }

    #[test]
    fn nothing_spawns_on_a_wall_or_on_the_player(seed in any::<u64>(), dungeon_level in 1_u32..=8) {
        let level = generate(seed, dungeon_level);
        for entity in &level.entities {
            prop_assert!(!level.map.is_tile_blocked(entity.position));
            if entity.combatant.is_some() {
                prop_assert_ne!(entity.position, level.player_spawn);
            }
        }
    }
}

#[test]
fn same_seed_same_floor() {
    let first = generate(31337, 3);
    let second = generate(31337, 3);
    assert_eq!(first.map, second.map);
    assert_eq!(first.rooms, second.rooms);
    assert_eq!(first.entities, second.entities);
}
