//! # Entities
//!
//! Every object in the dungeon (the player, monsters, items, the stairs) is
//! an [`Entity`]: a glyph at a position. Capabilities are attached as
//! optional components, each of which remembers the entity that owns it.

use crate::game::{EntityId, Position};
use serde::{Deserialize, Serialize};

/// A display color, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const DARK_RED: Rgb = Rgb::new(191, 0, 0);
    pub const ORANGE: Rgb = Rgb::new(255, 127, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const LIGHT_GREEN: Rgb = Rgb::new(115, 255, 115);
    pub const DESATURATED_GREEN: Rgb = Rgb::new(63, 127, 63);
    pub const DARKER_GREEN: Rgb = Rgb::new(0, 127, 0);
    pub const LIGHT_CYAN: Rgb = Rgb::new(115, 255, 255);
    pub const LIGHT_VIOLET: Rgb = Rgb::new(184, 115, 255);
    pub const VIOLET: Rgb = Rgb::new(127, 0, 255);
    pub const LIGHT_GREY: Rgb = Rgb::new(159, 159, 159);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// What happens when a combatant's hit points reach zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCallback {
    /// Ends the run
    Player,
    /// Leaves a corpse behind
    Monster,
}

/// Hit points, attack and defense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Entity that owns this component; relinked after loading
    #[serde(skip)]
    pub owner: EntityId,
    pub max_hp: i32,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    /// Experience carried by a monster, or earned by the player
    pub xp: i32,
    pub on_death: DeathCallback,
}

impl Combatant {
    /// Creates a combatant at full health.
    pub fn new(hp: i32, defense: i32, power: i32, xp: i32, on_death: DeathCallback) -> Self {
        Self {
            owner: EntityId::nil(),
            max_hp: hp,
            hp,
            defense,
            power,
            xp,
            on_death,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Removes hit points, never going below zero.
    ///
    /// Returns the death callback only on the blow that takes the combatant
    /// from alive to zero, so a corpse never dies twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{Combatant, DeathCallback};
    ///
    /// let mut orc = Combatant::new(10, 0, 3, 35, DeathCallback::Monster);
    /// assert_eq!(orc.take_damage(4), None);
    /// assert_eq!(orc.take_damage(20), Some(DeathCallback::Monster));
    /// assert_eq!(orc.hp, 0);
    /// assert_eq!(orc.take_damage(5), None);
    /// ```
    pub fn take_damage(&mut self, amount: i32) -> Option<DeathCallback> {
        if amount <= 0 || !self.is_alive() {
            return None;
        }
        self.hp = (self.hp - amount).max(0);
        if self.hp == 0 {
            Some(self.on_death)
        } else {
            None
        }
    }

    /// Restores hit points, never going above the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
    }
}

/// The effect an item has when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    Heal,
    Lightning,
    Confuse,
    Fireball,
}

/// Marks an entity as something that can be carried and used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip)]
    pub owner: EntityId,
    pub effect: ItemEffect,
}

impl Item {
    pub fn new(effect: ItemEffect) -> Self {
        Self {
            owner: EntityId::nil(),
            effect,
        }
    }
}

/// Turn-taking strategies for non-player entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorKind {
    /// Never acts
    Idle,
    /// Walks toward a visible player and attacks when adjacent
    SeekAndMelee,
    /// Stumbles randomly, then returns to the wrapped behavior
    TemporarilyErratic {
        wrapped: Box<BehaviorKind>,
        remaining_turns: u32,
    },
}

/// The AI component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    #[serde(skip)]
    pub owner: EntityId,
    pub kind: BehaviorKind,
}

impl Behavior {
    pub fn new(kind: BehaviorKind) -> Self {
        Self {
            owner: EntityId::nil(),
            kind,
        }
    }
}

/// A generic object in the dungeon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub glyph: char,
    pub name: String,
    pub color: Rgb,
    pub blocks_movement: bool,
    /// Drawn on explored tiles even when out of sight
    pub always_visible: bool,
    /// Character level; only meaningful for the player
    pub level: u32,
    pub combatant: Option<Combatant>,
    pub item: Option<Item>,
    pub behavior: Option<Behavior>,
}

impl Entity {
    /// Creates a bare entity with no components.
    pub fn new(
        id: EntityId,
        position: Position,
        glyph: char,
        name: impl Into<String>,
        color: Rgb,
        blocks_movement: bool,
    ) -> Self {
        Self {
            id,
            position,
            glyph,
            name: name.into(),
            color,
            blocks_movement,
            always_visible: false,
            level: 1,
            combatant: None,
            item: None,
            behavior: None,
        }
    }

    /// Attaches a combat component owned by this entity.
    pub fn with_combatant(mut self, mut combatant: Combatant) -> Self {
        combatant.owner = self.id;
        self.combatant = Some(combatant);
        self
    }

    /// Attaches an item component owned by this entity.
    pub fn with_item(mut self, mut item: Item) -> Self {
        item.owner = self.id;
        self.item = Some(item);
        self
    }

    /// Attaches a behavior component owned by this entity.
    pub fn with_behavior(mut self, mut behavior: Behavior) -> Self {
        behavior.owner = self.id;
        self.behavior = Some(behavior);
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.always_visible = true;
        self
    }

    /// Points every attached component back at this entity.
    pub fn relink_components(&mut self) {
        let id = self.id;
        if let Some(combatant) = self.combatant.as_mut() {
            combatant.owner = id;
        }
        if let Some(item) = self.item.as_mut() {
            item.owner = id;
        }
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.owner = id;
        }
    }

    /// True for entities with a combat component and hit points left.
    pub fn is_living_combatant(&self) -> bool {
        self.combatant.as_ref().is_some_and(Combatant::is_alive)
    }

    pub fn distance_to(&self, other: &Entity) -> f64 {
        self.position.euclidean_distance(other.position)
    }

    pub fn distance_to_point(&self, pos: Position) -> f64 {
        self.position.euclidean_distance(pos)
    }
}

/// The unit step from `from` toward `to`.
///
/// Each axis is normalised by the Euclidean distance and rounded, so a
/// target straight along a diagonal yields a diagonal step.
///
/// # Examples
///
/// ```
/// use gloom::{step_toward, Position};
///
/// assert_eq!(step_toward(Position::new(0, 0), Position::new(5, 0)), (1, 0));
/// assert_eq!(step_toward(Position::new(0, 0), Position::new(4, 4)), (1, 1));
/// assert_eq!(step_toward(Position::new(0, 0), Position::new(5, 1)), (1, 0));
/// ```
pub fn step_toward(from: Position, to: Position) -> (i32, i32) {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance == 0.0 {
        return (0, 0);
    }
    ((dx / distance).round() as i32, (dy / distance).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::new_entity_id;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn orc(rng: &mut StdRng) -> Entity {
        Entity::new(
            new_entity_id(rng),
            Position::new(3, 3),
            'o',
            "orc",
            Rgb::DESATURATED_GREEN,
            true,
        )
        .with_combatant(Combatant::new(20, 0, 4, 35, DeathCallback::Monster))
        .with_behavior(Behavior::new(BehaviorKind::SeekAndMelee))
    }

    #[test]
    fn test_components_point_at_owner() {
        let mut rng = StdRng::seed_from_u64(1);
        let orc = orc(&mut rng);
        assert_eq!(orc.combatant.as_ref().map(|c| c.owner), Some(orc.id));
        assert_eq!(orc.behavior.as_ref().map(|b| b.owner), Some(orc.id));
    }

    #[test]
    fn test_relink_restores_owner() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut orc = orc(&mut rng);
        if let Some(combatant) = orc.combatant.as_mut() {
            combatant.owner = EntityId::nil();
        }
        orc.relink_components();
        assert_eq!(orc.combatant.as_ref().map(|c| c.owner), Some(orc.id));
    }

    #[test]
    fn test_hp_is_clamped() {
        let mut fighter = Combatant::new(30, 1, 5, 0, DeathCallback::Player);
        fighter.take_damage(12);
        assert_eq!(fighter.hp, 18);
        fighter.heal(100);
        assert_eq!(fighter.hp, 30);
        fighter.take_damage(100);
        assert_eq!(fighter.hp, 0);
        fighter.heal(5);
        assert_eq!(fighter.hp, 5);
    }

    #[test]
    fn test_non_positive_damage_is_ignored() {
        let mut fighter = Combatant::new(10, 0, 1, 0, DeathCallback::Monster);
        assert_eq!(fighter.take_damage(0), None);
        assert_eq!(fighter.take_damage(-4), None);
        assert_eq!(fighter.hp, 10);
    }

    #[test]
    fn test_step_toward_same_tile() {
        assert_eq!(step_toward(Position::new(2, 2), Position::new(2, 2)), (0, 0));
        assert_eq!(step_toward(Position::new(9, 9), Position::new(2, 9)), (-1, 0));
    }

    #[test]
    fn test_distances() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = orc(&mut rng);
        let mut b = orc(&mut rng);
        b.position = Position::new(6, 7);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.distance_to_point(Position::new(3, 5)), 2.0);
    }
}
