//! # Gloom
//!
//! A turn-based dungeon crawler: procedural floors, monsters with simple
//! tactics, consumable items and a save file that freezes the whole world.
//!
//! ## Architecture Overview
//!
//! The crate is split into a deterministic simulation core and a thin
//! presentation shell:
//!
//! - **Game State**: a single [`GameState`] value holds the map, the ordered
//!   entity list, the inventory, the message log and the dungeon depth
//! - **Entity Model**: entities carry optional combat, item and behavior
//!   components addressed by [`EntityId`] handles
//! - **Turn Scheduler**: [`GameState::advance`] resolves one [`PlayerAction`]
//!   and lets every monster act
//! - **Generation System**: rooms and corridors with level-scaled spawns
//! - **Persistence**: JSON save records that restore every cross-reference
//! - **Presentation**: macroquad rendering, input mapping and scenes
//!
//! The simulation core (`game` and `generation`) never touches the screen; it
//! exposes draw requests and consumes discrete actions.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;

// Explicit re-exports for commonly used types
pub use game::{
    // From entities
    Behavior,
    BehaviorKind,
    Combatant,
    DeathCallback,
    Direction,
    Entity,
    EntityId,
    Item,
    ItemEffect,
    Position,
    Rgb,
    // From state
    GameState,
    Prompt,
    RunState,
    StatusSummary,
    // From turn
    PlayerAction,
    StatChoice,
    TurnOutcome,
    // From world
    Map,
    Tile,
};

pub use generation::{GeneratedLevel, GenerationConfig, Generator, Room, RoomCorridorGenerator};

pub use scenes::SceneManager;

/// Core error type for the Gloom engine.
#[derive(thiserror::Error, Debug)]
pub enum GloomError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Generation parameters cannot produce a level
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Gloom codebase.
pub type GloomResult<T> = Result<T, GloomError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Dungeon width in tiles
    pub const MAP_WIDTH: i32 = 80;

    /// Dungeon height in tiles
    pub const MAP_HEIGHT: i32 = 43;

    /// Smallest room edge length
    pub const ROOM_MIN_SIZE: i32 = 6;

    /// Largest room edge length
    pub const ROOM_MAX_SIZE: i32 = 10;

    /// Room placement attempts per floor
    pub const MAX_ROOMS: u32 = 30;

    /// Radius passed to the visibility provider
    pub const TORCH_RADIUS: i32 = 10;

    /// One slot per selectable letter
    pub const INVENTORY_CAPACITY: usize = 26;

    /// Base experience needed for the next level
    pub const LEVEL_UP_BASE: i32 = 200;

    /// Extra experience needed per current level
    pub const LEVEL_UP_FACTOR: i32 = 150;

    /// Hit points restored by a healing potion
    pub const HEAL_AMOUNT: i32 = 40;

    /// Damage dealt by a lightning bolt
    pub const LIGHTNING_DAMAGE: i32 = 40;

    /// Maximum reach of a lightning bolt
    pub const LIGHTNING_RANGE: f64 = 5.0;

    /// Maximum reach of a confusion scroll
    pub const CONFUSE_RANGE: f64 = 8.0;

    /// Turns a confused monster wanders
    pub const CONFUSE_NUM_TURNS: u32 = 10;

    /// Blast radius of a fireball
    pub const FIREBALL_RADIUS: f64 = 3.0;

    /// Damage dealt to everything caught in a fireball
    pub const FIREBALL_DAMAGE: i32 = 25;

    /// Messages kept in the log before the oldest is dropped
    pub const MESSAGE_LOG_CAPACITY: usize = 64;

    /// Default save file name
    pub const SAVE_FILE_NAME: &str = "savegame.json";
}
