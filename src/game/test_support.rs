//! Shared fixtures for the `game` submodule test suites.

use crate::game::{new_entity_id, FieldOfView, GameState, Map, Position, RaycastFov, Rgb};
use crate::game::{Entity, EntityId};
use crate::generation::{spawn_item, spawn_monster, spawn_player, ItemKind, MonsterKind, Room};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Sees every tile on the map.
pub(crate) struct AllVisible;

impl FieldOfView for AllVisible {
    fn compute(&mut self, _map: &Map, _origin: Position, _radius: i32) {}

    fn is_visible(&self, _pos: Position) -> bool {
        true
    }
}

/// Sees nothing at all.
pub(crate) struct Blind;

impl FieldOfView for Blind {
    fn compute(&mut self, _map: &Map, _origin: Position, _radius: i32) {}

    fn is_visible(&self, _pos: Position) -> bool {
        false
    }
}

const ARENA_SEED: u64 = 4242;

/// A 40x20 open room with the player at (5, 5) and stairs at (20, 10).
pub(crate) fn arena() -> GameState {
    arena_with_fov(Box::new(RaycastFov::new()))
}

pub(crate) fn arena_with_fov(fov: Box<dyn FieldOfView>) -> GameState {
    // Distinct from the game seed so fixture ids never repeat in `game.rng`.
    let mut rng = StdRng::seed_from_u64(ARENA_SEED ^ 0x5EED);
    let mut map = Map::new(40, 20);
    map.carve_room(&Room::new(0, 0, 39, 19));

    let stairs = Entity::new(
        new_entity_id(&mut rng),
        Position::new(20, 10),
        '>',
        "stairs",
        Rgb::WHITE,
        false,
    )
    .always_visible();
    let mut player = spawn_player(&mut rng);
    player.position = Position::new(5, 5);

    let stairs_id = stairs.id;
    let player_id = player.id;
    let mut game = GameState::from_parts(
        map,
        vec![stairs, player],
        player_id,
        stairs_id,
        ARENA_SEED,
        fov,
    );
    game.update_visibility();
    game
}

/// Adds an orc at `pos`, drawn beneath the player.
pub(crate) fn spawn_orc_at(game: &mut GameState, pos: Position) -> EntityId {
    let orc = spawn_monster(MonsterKind::Orc, pos, &mut game.rng);
    let id = orc.id;
    let player_index = game.index_of(game.player).unwrap_or(game.entities.len());
    game.entities.insert(player_index, orc);
    id
}

/// Adds an item of `kind` lying at `pos`.
pub(crate) fn spawn_item_at(game: &mut GameState, kind: ItemKind, pos: Position) -> EntityId {
    let item = spawn_item(kind, pos, &mut game.rng);
    let id = item.id;
    game.entities.insert(0, item);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_arena_spawns_get_fresh_ids() {
        let mut game = arena();
        let orc = spawn_orc_at(&mut game, Position::new(8, 5));
        let potion = spawn_item_at(&mut game, ItemKind::HealingPotion, Position::new(9, 5));

        assert_ne!(orc, game.player);
        assert_ne!(orc, game.stairs);
        assert_ne!(potion, game.player);
        assert_ne!(potion, game.stairs);

        let ids: HashSet<EntityId> = game.entities.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), game.entities.len());
        assert_eq!(game.entity(orc).map(|e| e.name.as_str()), Some("orc"));
    }
}
