//! # Game State Module
//!
//! Central game state shared by every system.
//!
//! [`GameState`] is the one value threaded through generation, the turn
//! scheduler, combat and persistence. It owns the current floor's map and
//! entity list, the player's inventory, the message log and the dungeon
//! depth. Entities refer to each other only through [`EntityId`] handles.

use crate::config::{INVENTORY_CAPACITY, LEVEL_UP_BASE, LEVEL_UP_FACTOR, TORCH_RADIUS};
use crate::game::{
    is_blocked, step_toward, Entity, EntityId, FieldOfView, Map, MessageLog, Position,
    RaycastFov, Rgb,
};
use crate::generation::{
    spawn_player, GeneratedLevel, GenerationConfig, Generator, RoomCorridorGenerator,
};
use crate::{GloomError, GloomResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Whether the run can still advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Playing,
    /// Terminal: the world is frozen but can still be inspected
    Dead,
}

/// What a pending targeting prompt is looking for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Targeting {
    /// A visible monster no farther than `range`
    Monster { range: f64 },
    /// Any visible tile, optionally limited to `range`
    Tile { range: Option<f64> },
}

/// A blocking choice the player must resolve before the game continues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prompt {
    /// An item in inventory slot `item_index` is waiting for a target
    Target {
        item_index: usize,
        targeting: Targeting,
    },
    /// A stat must be picked after gaining a level
    LevelUp,
}

/// A glyph the presentation layer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest {
    pub position: Position,
    pub glyph: char,
    pub color: Rgb,
}

/// A map cell the presentation layer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileView {
    pub position: Position,
    /// Sight-blocking tiles are drawn as walls
    pub wall: bool,
    /// Lit now, as opposed to merely remembered
    pub visible: bool,
}

/// Values for the status panel and character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSummary {
    pub hp: i32,
    pub max_hp: i32,
    pub xp: i32,
    pub next_level_xp: i32,
    pub level: u32,
    pub dungeon_level: u32,
    pub power: i32,
    pub defense: i32,
}

/// Experience required to advance from `level` to the next.
///
/// # Examples
///
/// ```
/// use gloom::level_up_threshold;
///
/// assert_eq!(level_up_threshold(1), 350);
/// assert_eq!(level_up_threshold(2), 500);
/// ```
pub fn level_up_threshold(level: u32) -> i32 {
    LEVEL_UP_BASE + level as i32 * LEVEL_UP_FACTOR
}

/// Central game state containing all game data.
pub struct GameState {
    /// Tiles of the current floor
    pub map: Map,
    /// Everything on the current floor, in draw order
    pub entities: Vec<Entity>,
    /// The player entity
    pub player: EntityId,
    /// The stairs leading to the next floor
    pub stairs: EntityId,
    /// Items carried by the player
    pub inventory: Vec<Entity>,
    /// Game message history
    pub messages: MessageLog,
    /// Current depth, starting at 1
    pub dungeon_level: u32,
    /// Playing or dead
    pub run_state: RunState,
    /// A pending blocking choice, if any
    pub prompt: Option<Prompt>,
    /// Turns consumed so far
    pub turn_number: u64,
    /// Seed the run was started with
    pub rng_seed: u64,
    /// Set when the player moved and visibility is stale
    pub fov_recompute: bool,
    fov: Box<dyn FieldOfView>,
    pub(crate) rng: StdRng,
}

impl GameState {
    /// Starts a new run with the built-in visibility provider.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{GameState, RunState};
    ///
    /// let game = GameState::new_game(12345).unwrap();
    /// assert_eq!(game.dungeon_level, 1);
    /// assert_eq!(game.run_state, RunState::Playing);
    /// assert!(game.player().is_some());
    /// ```
    pub fn new_game(seed: u64) -> GloomResult<Self> {
        Self::new_game_with_fov(seed, Box::new(RaycastFov::new()))
    }

    /// Starts a new run with a caller-supplied visibility provider.
    pub fn new_game_with_fov(seed: u64, fov: Box<dyn FieldOfView>) -> GloomResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let player = spawn_player(&mut rng);

        let config = GenerationConfig::for_level(seed, 1);
        let level = RoomCorridorGenerator::new().generate(&config, &mut rng)?;

        let mut state = Self::from_parts(
            Map::new(0, 0),
            Vec::new(),
            player.id,
            player.id,
            seed,
            fov,
        );
        state.rng = rng;
        state.install_level(level, player);
        state.message(
            "Welcome stranger! Prepare to perish in the Tombs of the Ancient Kings.",
            Rgb::RED,
        );
        state.update_visibility();

        info!("Started new game with seed {}", seed);
        Ok(state)
    }

    /// Assembles a state from already-built pieces.
    ///
    /// Used by persistence and by tests that need a hand-made floor. The
    /// caller is responsible for `player` and `stairs` naming entities in
    /// `entities`.
    pub fn from_parts(
        map: Map,
        entities: Vec<Entity>,
        player: EntityId,
        stairs: EntityId,
        seed: u64,
        fov: Box<dyn FieldOfView>,
    ) -> Self {
        Self {
            map,
            entities,
            player,
            stairs,
            inventory: Vec::new(),
            messages: MessageLog::default(),
            dungeon_level: 1,
            run_state: RunState::Playing,
            prompt: None,
            turn_number: 0,
            rng_seed: seed,
            fov_recompute: true,
            fov,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replaces the current floor with a generated one and places the player
    /// at its spawn point.
    fn install_level(&mut self, level: GeneratedLevel, mut player: Entity) {
        player.position = level.player_spawn;
        self.map = level.map;
        self.entities = level.entities;
        self.entities.push(player);
        self.stairs = level.stairs;
        self.fov_recompute = true;
    }

    /// Rests the player and moves them to a freshly generated, deeper floor.
    ///
    /// The old floor is discarded.
    pub fn next_level(&mut self) -> GloomResult<()> {
        self.message(
            "You take a moment to rest, and recover your strength.",
            Rgb::LIGHT_VIOLET,
        );
        if let Some(combatant) = self.player_mut().and_then(|p| p.combatant.as_mut()) {
            let amount = combatant.max_hp / 2;
            combatant.heal(amount);
        }
        self.message(
            "After a rare moment of peace, you descend deeper into the heart of the dungeon...",
            Rgb::RED,
        );

        let index = self
            .index_of(self.player)
            .ok_or_else(|| GloomError::InvalidState("Player not on the map".to_string()))?;
        let player = self.entities.remove(index);

        self.dungeon_level += 1;
        let config = GenerationConfig::for_level(self.rng_seed, self.dungeon_level);
        let level = RoomCorridorGenerator::new().generate(&config, &mut self.rng)?;
        self.install_level(level, player);
        self.update_visibility();

        info!("Descended to dungeon level {}", self.dungeon_level);
        Ok(())
    }

    /// Posts a message to the log.
    pub fn message(&mut self, text: impl Into<String>, color: Rgb) {
        self.messages.add(text, color);
    }

    /// Position of an entity in the draw-order list.
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id == id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entity(self.player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        let id = self.player;
        self.entity_mut(id)
    }

    /// The player's position, or the origin if the player is missing.
    pub fn player_position(&self) -> Position {
        self.player()
            .map(|player| player.position)
            .unwrap_or(Position::new(0, 0))
    }

    pub fn is_inventory_full(&self) -> bool {
        self.inventory.len() >= INVENTORY_CAPACITY
    }

    /// True if the tile is blocked or a blocking entity stands on it.
    pub fn is_blocked(&self, pos: Position) -> bool {
        is_blocked(&self.map, &self.entities, pos)
    }

    /// Moves an entity by a delta unless the destination is blocked.
    ///
    /// Returns whether the entity moved.
    pub fn move_by(&mut self, id: EntityId, dx: i32, dy: i32) -> bool {
        let Some(current) = self.entity(id).map(|entity| entity.position) else {
            return false;
        };
        let destination = current + Position::new(dx, dy);
        if self.is_blocked(destination) {
            return false;
        }
        if let Some(entity) = self.entity_mut(id) {
            entity.position = destination;
        }
        true
    }

    /// Takes one step toward a target point.
    pub fn move_toward(&mut self, id: EntityId, target: Position) -> bool {
        let Some(current) = self.entity(id).map(|entity| entity.position) else {
            return false;
        };
        let (dx, dy) = step_toward(current, target);
        if dx == 0 && dy == 0 {
            return false;
        }
        self.move_by(id, dx, dy)
    }

    /// Moves an entity to the front of the list so everything else on its
    /// tile is drawn over it.
    pub fn send_to_back(&mut self, id: EntityId) {
        if let Some(index) = self.index_of(id) {
            let entity = self.entities.remove(index);
            self.entities.insert(0, entity);
        }
    }

    /// The first living combatant standing on `pos`.
    pub fn living_combatant_at(&self, pos: Position) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|entity| entity.position == pos && entity.is_living_combatant())
            .map(|entity| entity.id)
    }

    /// Recomputes visibility if the player moved since the last query, and
    /// marks every lit tile as explored.
    pub fn update_visibility(&mut self) {
        if !self.fov_recompute {
            return;
        }
        self.fov_recompute = false;

        let origin = self.player_position();
        self.fov.compute(&self.map, origin, TORCH_RADIUS);

        for y in (origin.y - TORCH_RADIUS)..=(origin.y + TORCH_RADIUS) {
            for x in (origin.x - TORCH_RADIUS)..=(origin.x + TORCH_RADIUS) {
                let pos = Position::new(x, y);
                if self.fov.is_visible(pos) {
                    self.map.mark_explored(pos);
                }
            }
        }
        debug!("Visibility recomputed around {:?}", origin);
    }

    /// Whether a tile is in the player's current field of view.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.fov.is_visible(pos)
    }

    /// Closest visible monster within `max_range`.
    pub fn closest_monster(&self, max_range: f64) -> Option<EntityId> {
        let player = self.player()?;
        let mut closest = None;
        let mut closest_distance = f64::INFINITY;

        for entity in &self.entities {
            if entity.id == self.player
                || !entity.is_living_combatant()
                || !self.is_visible(entity.position)
            {
                continue;
            }
            let distance = player.distance_to(entity);
            if distance <= max_range && distance < closest_distance {
                closest = Some(entity.id);
                closest_distance = distance;
            }
        }

        closest
    }

    /// Entities to draw this frame, player last.
    pub fn draw_requests(&self) -> Vec<DrawRequest> {
        let mut requests: Vec<DrawRequest> = self
            .entities
            .iter()
            .filter(|entity| entity.id != self.player)
            .filter(|entity| {
                self.is_visible(entity.position)
                    || (entity.always_visible && self.map.is_explored(entity.position))
            })
            .map(|entity| DrawRequest {
                position: entity.position,
                glyph: entity.glyph,
                color: entity.color,
            })
            .collect();

        if let Some(player) = self.player() {
            requests.push(DrawRequest {
                position: player.position,
                glyph: player.glyph,
                color: player.color,
            });
        }

        requests
    }

    /// Every tile that is lit or remembered.
    pub fn tile_views(&self) -> Vec<TileView> {
        let mut views = Vec::new();
        for y in 0..self.map.height {
            for x in 0..self.map.width {
                let position = Position::new(x, y);
                let visible = self.is_visible(position);
                if visible || self.map.is_explored(position) {
                    views.push(TileView {
                        position,
                        wall: self.map.is_opaque(position),
                        visible,
                    });
                }
            }
        }
        views
    }

    /// Names of visible entities on a tile, for mouse-look.
    pub fn names_at(&self, pos: Position) -> Vec<String> {
        if !self.is_visible(pos) {
            return Vec::new();
        }
        self.entities
            .iter()
            .filter(|entity| entity.position == pos)
            .map(|entity| entity.name.clone())
            .collect()
    }

    /// Player numbers for the status panel.
    pub fn status(&self) -> StatusSummary {
        let player = self.player();
        let level = player.map(|p| p.level).unwrap_or(1);
        let combatant = player.and_then(|p| p.combatant.as_ref());
        StatusSummary {
            hp: combatant.map(|c| c.hp).unwrap_or(0),
            max_hp: combatant.map(|c| c.max_hp).unwrap_or(0),
            xp: combatant.map(|c| c.xp).unwrap_or(0),
            next_level_xp: level_up_threshold(level),
            level,
            dungeon_level: self.dungeon_level,
            power: combatant.map(|c| c.power).unwrap_or(0),
            defense: combatant.map(|c| c.defense).unwrap_or(0),
        }
    }
}
