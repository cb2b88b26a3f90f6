//! # Inventory
//!
//! Inventory transitions (pick up, use, drop) and the effects items produce.
//!
//! Effects that need a target do not block. They return
//! [`UseOutcome::NeedsTarget`], the state records a [`Prompt::Target`], and
//! the next [`resolve_target`](GameState::resolve_target) or
//! [`cancel_target`](GameState::cancel_target) finishes the use.

use crate::config::{
    CONFUSE_NUM_TURNS, CONFUSE_RANGE, FIREBALL_DAMAGE, FIREBALL_RADIUS, HEAL_AMOUNT,
    LIGHTNING_DAMAGE, LIGHTNING_RANGE,
};
use crate::game::{
    Behavior, BehaviorKind, EntityId, GameState, ItemEffect, Position, Prompt, Rgb, Targeting,
};
use log::debug;

/// Result of trying to use an inventory item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UseOutcome {
    /// The effect happened and the item was consumed
    Used,
    /// Nothing happened; the item stays in the inventory
    Cancelled,
    /// The item waits for the player to pick a target
    NeedsTarget(Targeting),
}

/// Result of answering a targeting prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetResult {
    /// The effect was applied and the item consumed
    Applied,
    /// The chosen spot is not a valid target; the prompt stays open
    Rejected,
    /// No targeting prompt was pending
    NoPrompt,
}

impl GameState {
    /// The first item lying at `pos`.
    pub fn item_at(&self, pos: Position) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|entity| entity.position == pos && entity.item.is_some())
            .map(|entity| entity.id)
    }

    /// Moves an item from the map into the inventory.
    ///
    /// Fails with a message, leaving the item where it is, when the
    /// inventory is full.
    pub fn pick_up(&mut self, id: EntityId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.entities[index].item.is_none() {
            return false;
        }

        let name = self.entities[index].name.clone();
        if self.is_inventory_full() {
            self.message(
                format!("Your inventory is full, cannot pick up {}.", name),
                Rgb::RED,
            );
            return false;
        }

        let item = self.entities.remove(index);
        self.inventory.push(item);
        self.message(format!("You picked up a {}!", name), Rgb::GREEN);
        true
    }

    /// Uses the item in inventory slot `index`.
    pub fn use_item(&mut self, index: usize) -> UseOutcome {
        let Some(entity) = self.inventory.get(index) else {
            self.message("There is no item in that slot.", Rgb::LIGHT_GREY);
            return UseOutcome::Cancelled;
        };
        let Some(effect) = entity.item.as_ref().map(|item| item.effect) else {
            let name = entity.name.clone();
            self.message(format!("The {} cannot be used.", name), Rgb::WHITE);
            return UseOutcome::Cancelled;
        };

        let outcome = match effect {
            ItemEffect::Heal => self.cast_heal(),
            ItemEffect::Lightning => self.cast_lightning(),
            ItemEffect::Confuse => {
                self.message(
                    "Left-click an enemy to confuse it, or right-click to cancel.",
                    Rgb::LIGHT_CYAN,
                );
                UseOutcome::NeedsTarget(Targeting::Monster {
                    range: CONFUSE_RANGE,
                })
            }
            ItemEffect::Fireball => {
                self.message(
                    "Left-click a target tile for the fireball, or right-click to cancel.",
                    Rgb::LIGHT_CYAN,
                );
                UseOutcome::NeedsTarget(Targeting::Tile { range: None })
            }
        };

        match outcome {
            UseOutcome::Used => {
                self.inventory.remove(index);
            }
            UseOutcome::NeedsTarget(targeting) => {
                self.prompt = Some(Prompt::Target {
                    item_index: index,
                    targeting,
                });
            }
            UseOutcome::Cancelled => {}
        }
        outcome
    }

    /// Answers a pending targeting prompt with a map position.
    pub fn resolve_target(&mut self, pos: Position) -> TargetResult {
        let Some(Prompt::Target {
            item_index,
            targeting,
        }) = self.prompt
        else {
            return TargetResult::NoPrompt;
        };

        if !self.is_visible(pos) {
            self.message("You can't see that spot.", Rgb::LIGHT_GREY);
            return TargetResult::Rejected;
        }
        let distance = self.player_position().euclidean_distance(pos);

        match targeting {
            Targeting::Monster { range } => {
                if distance > range {
                    self.message("That is out of range.", Rgb::LIGHT_GREY);
                    return TargetResult::Rejected;
                }
                let target = self
                    .living_combatant_at(pos)
                    .filter(|id| *id != self.player);
                let Some(target) = target else {
                    self.message("There is no enemy there.", Rgb::LIGHT_GREY);
                    return TargetResult::Rejected;
                };
                self.cast_confuse(target);
            }
            Targeting::Tile { range } => {
                if range.is_some_and(|range| distance > range) {
                    self.message("That is out of range.", Rgb::LIGHT_GREY);
                    return TargetResult::Rejected;
                }
                self.cast_fireball(pos);
            }
        }

        self.prompt = None;
        if item_index < self.inventory.len() {
            self.inventory.remove(item_index);
        }
        TargetResult::Applied
    }

    /// Abandons a pending targeting prompt; the item is kept.
    pub fn cancel_target(&mut self) -> bool {
        if !matches!(self.prompt, Some(Prompt::Target { .. })) {
            return false;
        }
        self.prompt = None;
        self.message("Cancelled.", Rgb::LIGHT_GREY);
        true
    }

    /// Puts the item in inventory slot `index` down at the player's feet.
    pub fn drop_item(&mut self, index: usize) -> bool {
        if index >= self.inventory.len() {
            self.message("There is no item in that slot.", Rgb::LIGHT_GREY);
            return false;
        }
        let mut item = self.inventory.remove(index);
        item.position = self.player_position();
        let name = item.name.clone();
        self.entities.insert(0, item);
        self.message(format!("You dropped a {}.", name), Rgb::YELLOW);
        true
    }

    fn cast_heal(&mut self) -> UseOutcome {
        let Some(combatant) = self.player_mut().and_then(|p| p.combatant.as_mut()) else {
            return UseOutcome::Cancelled;
        };
        if combatant.hp == combatant.max_hp {
            self.message("You are already at full health.", Rgb::RED);
            return UseOutcome::Cancelled;
        }
        combatant.heal(HEAL_AMOUNT);
        self.message("Your wounds start to feel better!", Rgb::LIGHT_VIOLET);
        UseOutcome::Used
    }

    fn cast_lightning(&mut self) -> UseOutcome {
        let Some(target) = self.closest_monster(LIGHTNING_RANGE) else {
            self.message("No enemy is close enough to strike.", Rgb::RED);
            return UseOutcome::Cancelled;
        };
        let name = self
            .entity(target)
            .map(|e| e.name.clone())
            .unwrap_or_default();
        self.message(
            format!(
                "A lightning bolt strikes the {} with a loud thunder! The damage is {} hit points.",
                name, LIGHTNING_DAMAGE
            ),
            Rgb::LIGHT_CYAN,
        );
        self.apply_damage(target, LIGHTNING_DAMAGE);
        UseOutcome::Used
    }

    fn cast_confuse(&mut self, target: EntityId) {
        let Some(monster) = self.entity_mut(target) else {
            return;
        };
        let previous = monster
            .behavior
            .as_ref()
            .map(|behavior| behavior.kind.clone())
            .unwrap_or(BehaviorKind::Idle);
        let confused = BehaviorKind::TemporarilyErratic {
            wrapped: Box::new(previous),
            remaining_turns: CONFUSE_NUM_TURNS,
        };
        if let Some(behavior) = monster.behavior.as_mut() {
            behavior.kind = confused;
        } else {
            let mut behavior = Behavior::new(confused);
            behavior.owner = monster.id;
            monster.behavior = Some(behavior);
        }
        let name = monster.name.clone();
        self.message(
            format!(
                "The eyes of the {} look vacant, as it starts to stumble around!",
                name
            ),
            Rgb::LIGHT_GREEN,
        );
        debug!("Confused {}", name);
    }

    fn cast_fireball(&mut self, center: Position) {
        self.message(
            format!(
                "The fireball explodes, burning everything within {} tiles!",
                FIREBALL_RADIUS
            ),
            Rgb::ORANGE,
        );
        let victims: Vec<(EntityId, String)> = self
            .entities
            .iter()
            .filter(|entity| {
                entity.is_living_combatant() && entity.distance_to_point(center) <= FIREBALL_RADIUS
            })
            .map(|entity| (entity.id, entity.name.clone()))
            .collect();

        for (id, name) in victims {
            self.message(
                format!("The {} gets burned for {} hit points.", name, FIREBALL_DAMAGE),
                Rgb::ORANGE,
            );
            self.apply_damage(id, FIREBALL_DAMAGE);
        }
    }
}
