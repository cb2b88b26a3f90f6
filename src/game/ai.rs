//! # Monster Behaviors
//!
//! Each entity with a [`Behavior`](crate::game::Behavior) component acts once
//! per game turn. Dispatch is a plain `match` over [`BehaviorKind`].

use crate::game::{BehaviorKind, EntityId, GameState, Rgb};
use rand::Rng;

impl GameState {
    /// Lets every entity carrying a behavior act, in draw-list order.
    ///
    /// Ids are collected up front because deaths reorder the list.
    pub fn run_behaviors(&mut self) {
        let actors: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|entity| entity.behavior.is_some())
            .map(|entity| entity.id)
            .collect();

        for id in actors {
            self.take_turn(id);
        }
    }

    /// Runs one turn of an entity's behavior.
    pub fn take_turn(&mut self, id: EntityId) {
        let Some(kind) = self
            .entity(id)
            .and_then(|entity| entity.behavior.as_ref())
            .map(|behavior| behavior.kind.clone())
        else {
            return;
        };

        match kind {
            BehaviorKind::Idle => {}
            BehaviorKind::SeekAndMelee => self.seek_and_melee(id),
            BehaviorKind::TemporarilyErratic {
                wrapped,
                remaining_turns,
            } => self.stumble(id, *wrapped, remaining_turns),
        }
    }

    fn seek_and_melee(&mut self, id: EntityId) {
        let Some(monster) = self.entity(id) else {
            return;
        };
        if !self.is_visible(monster.position) {
            return;
        }
        let Some(player) = self.player() else {
            return;
        };
        let player_id = player.id;
        let target = player.position;
        let player_alive = player.is_living_combatant();

        if monster.distance_to(player) >= 2.0 {
            self.move_toward(id, target);
        } else if player_alive {
            self.attack(id, player_id);
        }
    }

    fn stumble(&mut self, id: EntityId, wrapped: BehaviorKind, remaining_turns: u32) {
        if remaining_turns > 0 {
            let dx = self.rng.gen_range(-1..=1);
            let dy = self.rng.gen_range(-1..=1);
            self.move_by(id, dx, dy);
            if let Some(behavior) = self.entity_mut(id).and_then(|e| e.behavior.as_mut()) {
                behavior.kind = BehaviorKind::TemporarilyErratic {
                    wrapped: Box::new(wrapped),
                    remaining_turns: remaining_turns - 1,
                };
            }
            return;
        }

        let Some(monster) = self.entity_mut(id) else {
            return;
        };
        if let Some(behavior) = monster.behavior.as_mut() {
            behavior.kind = wrapped;
        }
        let name = monster.name.clone();
        self.message(format!("The {} is no longer confused!", name), Rgb::RED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::{arena_with_fov, spawn_orc_at, AllVisible, Blind};
    use crate::game::{Behavior, Position};

    fn hp(game: &GameState, id: EntityId) -> i32 {
        game.entity(id)
            .and_then(|e| e.combatant.as_ref())
            .map(|c| c.hp)
            .unwrap_or(0)
    }

    #[test]
    fn test_seeker_approaches_visible_player() {
        let mut game = arena_with_fov(Box::new(AllVisible));
        let orc = spawn_orc_at(&mut game, Position::new(10, 5));
        game.take_turn(orc);
        assert_eq!(game.entity(orc).unwrap().position, Position::new(9, 5));
    }

    #[test]
    fn test_seeker_attacks_when_adjacent() {
        let mut game = arena_with_fov(Box::new(AllVisible));
        let orc = spawn_orc_at(&mut game, Position::new(6, 6));
        let player = game.player;
        let before = hp(&game, player);

        game.take_turn(orc);

        assert_eq!(game.entity(orc).unwrap().position, Position::new(6, 6));
        assert_eq!(before - hp(&game, player), 3);
    }

    #[test]
    fn test_seeker_idles_out_of_view() {
        let mut game = arena_with_fov(Box::new(Blind));
        let orc = spawn_orc_at(&mut game, Position::new(10, 5));
        game.take_turn(orc);
        assert_eq!(game.entity(orc).unwrap().position, Position::new(10, 5));
    }

    #[test]
    fn test_seeker_leaves_dead_player_alone() {
        let mut game = arena_with_fov(Box::new(AllVisible));
        let orc = spawn_orc_at(&mut game, Position::new(6, 5));
        let player = game.player;
        game.apply_damage(player, 1000);
        let messages = game.messages.len();

        game.take_turn(orc);
        assert_eq!(game.messages.len(), messages);
    }

    #[test]
    fn test_erratic_behavior_expires_after_n_turns() {
        let mut game = arena_with_fov(Box::new(Blind));
        let orc = spawn_orc_at(&mut game, Position::new(20, 15));
        let turns = 3;
        let confused = BehaviorKind::TemporarilyErratic {
            wrapped: Box::new(BehaviorKind::SeekAndMelee),
            remaining_turns: turns,
        };
        game.entity_mut(orc).unwrap().behavior = Some(Behavior::new(confused));

        for taken in 1..=turns {
            game.take_turn(orc);
            let kind = &game.entity(orc).unwrap().behavior.as_ref().unwrap().kind;
            assert_eq!(
                kind,
                &BehaviorKind::TemporarilyErratic {
                    wrapped: Box::new(BehaviorKind::SeekAndMelee),
                    remaining_turns: turns - taken,
                }
            );
        }

        game.take_turn(orc);
        let kind = &game.entity(orc).unwrap().behavior.as_ref().unwrap().kind;
        assert_eq!(kind, &BehaviorKind::SeekAndMelee);
        assert!(game
            .messages
            .last()
            .is_some_and(|m| m.text == "The orc is no longer confused!"));
    }

    #[test]
    fn test_erratic_steps_stay_adjacent() {
        let mut game = arena_with_fov(Box::new(Blind));
        let start = Position::new(20, 10);
        let orc = spawn_orc_at(&mut game, start);
        let confused = BehaviorKind::TemporarilyErratic {
            wrapped: Box::new(BehaviorKind::Idle),
            remaining_turns: 1,
        };
        game.entity_mut(orc).unwrap().behavior = Some(Behavior::new(confused));

        game.take_turn(orc);
        let moved = game.entity(orc).unwrap().position;
        assert!((moved.x - start.x).abs() <= 1);
        assert!((moved.y - start.y).abs() <= 1);
    }

    #[test]
    fn test_run_behaviors_moves_every_seeker() {
        let mut game = arena_with_fov(Box::new(AllVisible));
        let a = spawn_orc_at(&mut game, Position::new(15, 5));
        let b = spawn_orc_at(&mut game, Position::new(5, 15));
        game.run_behaviors();
        assert_eq!(game.entity(a).unwrap().position, Position::new(14, 5));
        assert_eq!(game.entity(b).unwrap().position, Position::new(5, 14));
    }
}
