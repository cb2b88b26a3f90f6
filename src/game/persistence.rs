//! # Persistence
//!
//! Save and restore a run as JSON.
//!
//! The player and stairs are stored as indices into the entity list rather
//! than ids so a tampered file cannot point at something that is not there
//! without failing validation.

use crate::game::{Entity, FieldOfView, GameState, Map, MessageLog, RaycastFov, RunState};
use crate::{GloomError, GloomResult};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Format version written into every save.
pub const SAVE_VERSION: u32 = 1;

/// Everything needed to resume a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub version: u32,
    pub map: Map,
    pub entities: Vec<Entity>,
    pub player_index: usize,
    pub stairs_index: usize,
    pub inventory: Vec<Entity>,
    pub messages: MessageLog,
    pub run_state: RunState,
    pub dungeon_level: u32,
    pub turn_number: u64,
    pub rng_seed: u64,
}

impl SaveRecord {
    /// Snapshots a game state.
    pub fn capture(state: &GameState) -> GloomResult<Self> {
        let player_index = state
            .index_of(state.player)
            .ok_or_else(|| GloomError::InvalidState("Player not on the map".to_string()))?;
        let stairs_index = state
            .index_of(state.stairs)
            .ok_or_else(|| GloomError::InvalidState("Stairs not on the map".to_string()))?;

        Ok(Self {
            version: SAVE_VERSION,
            map: state.map.clone(),
            entities: state.entities.clone(),
            player_index,
            stairs_index,
            inventory: state.inventory.clone(),
            messages: state.messages.clone(),
            run_state: state.run_state,
            dungeon_level: state.dungeon_level,
            turn_number: state.turn_number,
            rng_seed: state.rng_seed,
        })
    }

    /// Rebuilds a game state, validating the record first.
    pub fn restore(self, fov: Box<dyn FieldOfView>) -> GloomResult<GameState> {
        if self.version != SAVE_VERSION {
            return Err(GloomError::InvalidState(format!(
                "Unsupported save version {} (expected {})",
                self.version, SAVE_VERSION
            )));
        }
        if self.player_index >= self.entities.len() || self.stairs_index >= self.entities.len() {
            return Err(GloomError::InvalidState(format!(
                "Save references entity {} or {} but holds only {}",
                self.player_index,
                self.stairs_index,
                self.entities.len()
            )));
        }

        let mut entities = self.entities;
        let mut inventory = self.inventory;
        for entity in entities.iter_mut().chain(inventory.iter_mut()) {
            entity.relink_components();
        }

        let player = entities[self.player_index].id;
        let stairs = entities[self.stairs_index].id;
        if entities[self.player_index].combatant.is_none() {
            return Err(GloomError::InvalidState(
                "Saved player has no combat stats".to_string(),
            ));
        }

        let mut state =
            GameState::from_parts(self.map, entities, player, stairs, self.rng_seed, fov);
        state.inventory = inventory;
        state.messages = self.messages;
        state.run_state = self.run_state;
        state.dungeon_level = self.dungeon_level;
        state.turn_number = self.turn_number;
        state.rng = StdRng::seed_from_u64(resume_seed(
            self.rng_seed,
            self.turn_number,
            self.dungeon_level,
        ));
        state.fov_recompute = true;
        state.update_visibility();
        Ok(state)
    }
}

/// Seed for the generator of a resumed run.
///
/// Differs from the run's own seed, so a resumed stream does not replay the ids
/// handed out since the new game. Descending does not advance the turn, so
/// the depth is mixed in as well.
fn resume_seed(seed: u64, turn_number: u64, dungeon_level: u32) -> u64 {
    const RESUME_SALT: u64 = 0xD1B5_4A32_D192_ED03;
    let mut z = seed
        ^ RESUME_SALT
        ^ turn_number.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ u64::from(dungeon_level).rotate_left(32);
    // splitmix64 finalizer
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl GameState {
    /// Saves the game state to JSON.
    pub fn save_to_json(&self) -> GloomResult<String> {
        let record = SaveRecord::capture(self)?;
        serde_json::to_string_pretty(&record).map_err(GloomError::from)
    }

    /// Loads game state from JSON with the built-in visibility provider.
    pub fn load_from_json(json: &str) -> GloomResult<Self> {
        Self::load_from_json_with_fov(json, Box::new(RaycastFov::new()))
    }

    /// Loads game state from JSON with a caller-supplied visibility provider.
    pub fn load_from_json_with_fov(json: &str, fov: Box<dyn FieldOfView>) -> GloomResult<Self> {
        let record: SaveRecord = serde_json::from_str(json)?;
        record.restore(fov)
    }

    /// Writes the save to a file, replacing any previous one.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> GloomResult<()> {
        let path = path.as_ref();
        let json = self.save_to_json()?;
        fs::write(path, json)?;
        info!("Saved game to {}", path.display());
        Ok(())
    }

    /// Reads a save file.
    ///
    /// A missing file is an [`GloomError::Io`].
    pub fn load_from_path(path: impl AsRef<Path>) -> GloomResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let state = Self::load_from_json(&json)?;
        info!(
            "Loaded game from {} (dungeon level {}, turn {})",
            path.display(),
            state.dungeon_level,
            state.turn_number
        );
        Ok(state)
    }
}
