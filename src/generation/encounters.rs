//! # Encounter Generation
//!
//! The player, the monster catalogue and the depth-scaled tables that decide
//! how many monsters a room holds and which kinds appear.

use crate::game::{
    new_entity_id, Behavior, BehaviorKind, Combatant, DeathCallback, Entity, Position, Rgb,
};
use crate::generation::from_dungeon_level;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Most monsters per room, as `(count, from_level)`.
pub const MAX_MONSTERS_TABLE: &[(u32, u32)] = &[(2, 1), (3, 4), (5, 6)];

/// Orc spawn weight by depth.
pub const ORC_WEIGHT_TABLE: &[(u32, u32)] = &[(80, 1)];

/// Troll spawn weight by depth.
pub const TROLL_WEIGHT_TABLE: &[(u32, u32)] = &[(15, 3), (30, 5), (60, 7)];

/// Every monster that can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Orc,
    Troll,
}

impl MonsterKind {
    pub fn glyph(self) -> char {
        match self {
            MonsterKind::Orc => 'o',
            MonsterKind::Troll => 'T',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MonsterKind::Orc => "orc",
            MonsterKind::Troll => "troll",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            MonsterKind::Orc => Rgb::DESATURATED_GREEN,
            MonsterKind::Troll => Rgb::DARKER_GREEN,
        }
    }

    /// Fresh combat stats for this kind.
    pub fn stats(self) -> Combatant {
        match self {
            MonsterKind::Orc => Combatant::new(20, 0, 4, 35, DeathCallback::Monster),
            MonsterKind::Troll => Combatant::new(30, 2, 8, 100, DeathCallback::Monster),
        }
    }
}

/// Most monsters a room may hold at `level`.
pub fn max_monsters_per_room(level: u32) -> u32 {
    from_dungeon_level(MAX_MONSTERS_TABLE, level)
}

/// Monster spawn weights at `level`.
///
/// # Examples
///
/// ```
/// use gloom::{monster_weights, MonsterKind};
///
/// assert_eq!(monster_weights(1), vec![(MonsterKind::Orc, 80), (MonsterKind::Troll, 0)]);
/// assert_eq!(monster_weights(7)[1], (MonsterKind::Troll, 60));
/// ```
pub fn monster_weights(level: u32) -> Vec<(MonsterKind, u32)> {
    vec![
        (MonsterKind::Orc, from_dungeon_level(ORC_WEIGHT_TABLE, level)),
        (MonsterKind::Troll, from_dungeon_level(TROLL_WEIGHT_TABLE, level)),
    ]
}

/// Creates the player at the origin; the caller places them.
pub fn spawn_player<R: Rng + ?Sized>(rng: &mut R) -> Entity {
    Entity::new(
        new_entity_id(rng),
        Position::new(0, 0),
        '@',
        "player",
        Rgb::WHITE,
        true,
    )
    .with_combatant(Combatant::new(100, 1, 4, 0, DeathCallback::Player))
}

/// Creates a monster of `kind` standing at `pos`.
pub fn spawn_monster<R: Rng + ?Sized>(kind: MonsterKind, pos: Position, rng: &mut R) -> Entity {
    Entity::new(
        new_entity_id(rng),
        pos,
        kind.glyph(),
        kind.name(),
        kind.color(),
        true,
    )
    .with_combatant(kind.stats())
    .with_behavior(Behavior::new(BehaviorKind::SeekAndMelee))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_player_stats() {
        let mut rng = StdRng::seed_from_u64(1);
        let player = spawn_player(&mut rng);
        let stats = player.combatant.as_ref().unwrap();
        assert_eq!((stats.hp, stats.defense, stats.power, stats.xp), (100, 1, 4, 0));
        assert_eq!(stats.on_death, DeathCallback::Player);
        assert_eq!(stats.owner, player.id);
        assert!(player.behavior.is_none());
        assert_eq!(player.level, 1);
    }

    #[test]
    fn test_monster_catalogue() {
        let mut rng = StdRng::seed_from_u64(1);
        let troll = spawn_monster(MonsterKind::Troll, Position::new(3, 4), &mut rng);
        assert_eq!(troll.glyph, 'T');
        assert_eq!(troll.position, Position::new(3, 4));
        assert!(troll.blocks_movement);
        let stats = troll.combatant.as_ref().unwrap();
        assert_eq!((stats.max_hp, stats.defense, stats.power, stats.xp), (30, 2, 8, 100));
        assert_eq!(
            troll.behavior.as_ref().map(|b| b.kind.clone()),
            Some(BehaviorKind::SeekAndMelee)
        );
    }

    #[test]
    fn test_monster_tables_scale_with_depth() {
        assert_eq!(max_monsters_per_room(1), 2);
        assert_eq!(max_monsters_per_room(4), 3);
        assert_eq!(max_monsters_per_room(6), 5);
        assert_eq!(monster_weights(3)[1], (MonsterKind::Troll, 15));
        assert_eq!(monster_weights(5)[1], (MonsterKind::Troll, 30));
    }
}
