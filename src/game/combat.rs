//! # Combat and Leveling
//!
//! Melee resolution, damage application, death handling and experience.
//!
//! Experience is credited to the player every time a monster takes damage,
//! not only when it dies. Death messages report the monster's reward
//! separately.

use crate::game::turn::StatChoice;
use crate::game::{
    level_up_threshold, Combatant, DeathCallback, EntityId, GameState, Prompt, Rgb, RunState,
};
use log::{debug, info};

/// Damage a melee blow from `attacker` would deal to `defender`.
///
/// May be zero or negative, in which case the blow has no effect.
///
/// # Examples
///
/// ```
/// use gloom::{compute_damage, Combatant, DeathCallback};
///
/// let hero = Combatant::new(30, 2, 5, 0, DeathCallback::Player);
/// let orc = Combatant::new(10, 2, 2, 35, DeathCallback::Monster);
/// assert_eq!(compute_damage(&hero, &orc), 3);
/// assert_eq!(compute_damage(&orc, &hero), 0);
/// ```
pub fn compute_damage(attacker: &Combatant, defender: &Combatant) -> i32 {
    attacker.power - defender.defense
}

impl GameState {
    /// Resolves a melee attack between two combatants.
    ///
    /// Returns the damage dealt; zero when the blow had no effect or either
    /// side is missing its combat component.
    pub fn attack(&mut self, attacker: EntityId, defender: EntityId) -> i32 {
        let (Some(attacking), Some(defending)) = (self.entity(attacker), self.entity(defender))
        else {
            return 0;
        };
        let (Some(attack_stats), Some(defense_stats)) =
            (attacking.combatant.as_ref(), defending.combatant.as_ref())
        else {
            return 0;
        };

        let damage = compute_damage(attack_stats, defense_stats);
        let attacker_name = capitalize(&attacking.name);
        let defender_name = defending.name.clone();

        if damage > 0 {
            self.message(
                format!(
                    "{} attacks {} for {} hit points.",
                    attacker_name, defender_name, damage
                ),
                Rgb::WHITE,
            );
            self.apply_damage(defender, damage);
            damage
        } else {
            self.message(
                format!(
                    "{} attacks {} but it has no effect!",
                    attacker_name, defender_name
                ),
                Rgb::WHITE,
            );
            0
        }
    }

    /// Removes hit points from an entity, credits experience and runs the
    /// death callback when the blow is fatal.
    pub fn apply_damage(&mut self, target: EntityId, amount: i32) {
        if amount <= 0 {
            return;
        }
        let player_id = self.player;
        let Some(combatant) = self.entity_mut(target).and_then(|e| e.combatant.as_mut()) else {
            return;
        };
        if !combatant.is_alive() {
            return;
        }

        let death = combatant.take_damage(amount);
        let reward = combatant.xp;

        if target != player_id {
            if let Some(player) = self.player_mut().and_then(|p| p.combatant.as_mut()) {
                player.xp += reward;
            }
        }

        match death {
            Some(DeathCallback::Player) => self.player_death(target),
            Some(DeathCallback::Monster) => self.monster_death(target),
            None => {}
        }
    }

    fn player_death(&mut self, id: EntityId) {
        self.message("You died!", Rgb::RED);
        self.run_state = RunState::Dead;
        if let Some(player) = self.entity_mut(id) {
            player.glyph = '%';
            player.color = Rgb::DARK_RED;
        }
        info!("Player died on dungeon level {}", self.dungeon_level);
    }

    fn monster_death(&mut self, id: EntityId) {
        let Some(monster) = self.entity_mut(id) else {
            return;
        };
        let reward = monster.combatant.as_ref().map(|c| c.xp).unwrap_or(0);
        let name = monster.name.clone();

        monster.glyph = '%';
        monster.color = Rgb::DARK_RED;
        monster.blocks_movement = false;
        monster.combatant = None;
        monster.behavior = None;
        monster.name = format!("remains of {}", name);

        self.send_to_back(id);
        self.message(
            format!(
                "{} is dead! You gain {} experience points.",
                capitalize(&name),
                reward
            ),
            Rgb::ORANGE,
        );
        debug!("{} died", name);
    }

    /// The once-per-frame experience check.
    ///
    /// Credits one point of experience, then consumes a level's worth if
    /// enough has accumulated, raising the player's level and opening the
    /// stat prompt. Returns whether a level was gained.
    pub fn check_level_up(&mut self) -> bool {
        if self.run_state != RunState::Playing || self.prompt.is_some() {
            return false;
        }
        let Some(player) = self.player_mut() else {
            return false;
        };
        let threshold = level_up_threshold(player.level);
        let Some(combatant) = player.combatant.as_mut() else {
            return false;
        };

        combatant.xp += 1;
        if combatant.xp < threshold {
            return false;
        }
        combatant.xp -= threshold;
        player.level += 1;
        let level = player.level;

        self.message(
            format!(
                "Your battle skills grow stronger! You reached level {}!",
                level
            ),
            Rgb::YELLOW,
        );
        self.prompt = Some(Prompt::LevelUp);
        info!("Player reached level {}", level);
        true
    }

    /// Applies the stat picked from the level-up prompt.
    pub fn apply_level_up(&mut self, choice: StatChoice) {
        let Some(combatant) = self.player_mut().and_then(|p| p.combatant.as_mut()) else {
            return;
        };
        match choice {
            StatChoice::Constitution => {
                combatant.max_hp += 10;
                combatant.hp += 10;
            }
            StatChoice::Strength => combatant.power += 1,
            StatChoice::Agility => combatant.defense += 1,
        }
        if self.prompt == Some(Prompt::LevelUp) {
            self.prompt = None;
        }
    }
}

/// Upper-cases the first letter for the start of a sentence.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
