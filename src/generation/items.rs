//! # Item Generation
//!
//! The item catalogue and the depth-scaled tables for placing items.

use crate::game::{new_entity_id, Entity, Item, ItemEffect, Position, Rgb};
use crate::generation::from_dungeon_level;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Most items per room, as `(count, from_level)`.
pub const MAX_ITEMS_TABLE: &[(u32, u32)] = &[(1, 1), (2, 4)];

pub const HEAL_WEIGHT_TABLE: &[(u32, u32)] = &[(35, 1)];
pub const LIGHTNING_WEIGHT_TABLE: &[(u32, u32)] = &[(25, 4)];
pub const FIREBALL_WEIGHT_TABLE: &[(u32, u32)] = &[(25, 6)];
pub const CONFUSE_WEIGHT_TABLE: &[(u32, u32)] = &[(10, 2)];

/// Every item that can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealingPotion,
    LightningScroll,
    FireballScroll,
    ConfusionScroll,
}

impl ItemKind {
    pub fn glyph(self) -> char {
        match self {
            ItemKind::HealingPotion => '!',
            _ => '#',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::HealingPotion => "healing potion",
            ItemKind::LightningScroll => "scroll of lightning bolt",
            ItemKind::FireballScroll => "scroll of fireball",
            ItemKind::ConfusionScroll => "scroll of confusion",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            ItemKind::HealingPotion => Rgb::VIOLET,
            _ => Rgb::YELLOW,
        }
    }

    pub fn effect(self) -> ItemEffect {
        match self {
            ItemKind::HealingPotion => ItemEffect::Heal,
            ItemKind::LightningScroll => ItemEffect::Lightning,
            ItemKind::FireballScroll => ItemEffect::Fireball,
            ItemKind::ConfusionScroll => ItemEffect::Confuse,
        }
    }
}

/// Most items a room may hold at `level`.
pub fn max_items_per_room(level: u32) -> u32 {
    from_dungeon_level(MAX_ITEMS_TABLE, level)
}

/// Item spawn weights at `level`.
pub fn item_weights(level: u32) -> Vec<(ItemKind, u32)> {
    vec![
        (ItemKind::HealingPotion, from_dungeon_level(HEAL_WEIGHT_TABLE, level)),
        (ItemKind::LightningScroll, from_dungeon_level(LIGHTNING_WEIGHT_TABLE, level)),
        (ItemKind::FireballScroll, from_dungeon_level(FIREBALL_WEIGHT_TABLE, level)),
        (ItemKind::ConfusionScroll, from_dungeon_level(CONFUSE_WEIGHT_TABLE, level)),
    ]
}

/// Creates an item of `kind` lying at `pos`.
pub fn spawn_item<R: Rng + ?Sized>(kind: ItemKind, pos: Position, rng: &mut R) -> Entity {
    Entity::new(
        new_entity_id(rng),
        pos,
        kind.glyph(),
        kind.name(),
        kind.color(),
        false,
    )
    .with_item(Item::new(kind.effect()))
}
