//! # Rendering Module
//!
//! Macroquad rendering of the dungeon, the status panel and menus.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
