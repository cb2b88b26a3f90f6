//! # Scene Management System
//!
//! A centralized system for managing the screens of the game: the main
//! menu, play, the inventory menus and the character sheet.
//!
//! Level-up and targeting are not scenes of their own. They are prompts on
//! the [`GameState`] and are drawn on top of the play scene while open.

use crate::game::{GameState, PlayerAction, Prompt, StatChoice};
use crate::input::{letter_index, InputHandler, PlayerInput};
use crate::rendering::{
    character_sheet_lines, draw_menu, draw_text_box, inventory_options, level_up_options,
    MacroquadDisplay,
};
use crate::GloomResult;
use log::{info, warn};
use macroquad::prelude::*;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Notice shown when continuing without a usable save file.
pub const NO_SAVE_NOTICE: &str = "No saved game to load.";

/// What the inventory menu does with the chosen item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryMode {
    Use,
    Drop,
}

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Title screen with new, continue and quit
    MainMenu,
    /// Normal gameplay, including open prompts and the death screen
    Playing,
    /// An item menu over the map
    Inventory(InventoryMode),
    /// The character sheet over the map
    CharacterSheet,
    /// The key help over the map
    Help,
}

/// Entries of the main menu, in display order.
pub const MAIN_MENU_OPTIONS: [&str; 3] = ["Play a new game", "Continue last game", "Quit"];

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    game_state: Option<GameState>,
    display: MacroquadDisplay,
    input_handler: InputHandler,
    save_path: PathBuf,
    seed: Option<u64>,
    notice: Option<String>,
}

impl SceneManager {
    /// Creates a scene manager that starts on the main menu.
    ///
    /// `seed` fixes the seed of new games; otherwise the clock is used.
    pub fn new(input_handler: InputHandler, save_path: PathBuf, seed: Option<u64>) -> Self {
        Self {
            current_scene: SceneType::MainMenu,
            game_state: None,
            display: MacroquadDisplay::new(),
            input_handler,
            save_path,
            seed,
            notice: None,
        }
    }

    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> GloomResult<()> {
        loop {
            let exit = match self.current_scene {
                SceneType::MainMenu => self.update_main_menu()?,
                SceneType::Playing => self.update_playing_scene()?,
                SceneType::Inventory(mode) => self.update_inventory_scene(mode)?,
                SceneType::CharacterSheet | SceneType::Help => self.update_overlay_scene(),
            };
            if exit {
                break;
            }
            next_frame().await;
        }
        Ok(())
    }

    /// Updates the main menu, returns true if exit is requested
    fn update_main_menu(&mut self) -> GloomResult<bool> {
        let options: Vec<String> = MAIN_MENU_OPTIONS.iter().map(|o| o.to_string()).collect();
        self.display.render_main_menu(&options, self.notice.as_deref());

        let choice = match self.input_handler.get_menu_input() {
            Some(PlayerInput::Select(letter)) => letter_index(letter),
            Some(PlayerInput::Cancel) => return Ok(true),
            _ => None,
        };
        match choice {
            Some(0) => {
                self.start_new_game()?;
                Ok(false)
            }
            Some(1) => {
                self.continue_game();
                Ok(false)
            }
            Some(2) => Ok(true),
            _ => Ok(false),
        }
    }

    /// Updates the playing scene, returns true if exit is requested
    fn update_playing_scene(&mut self) -> GloomResult<bool> {
        let Some(game) = self.game_state.as_mut() else {
            self.current_scene = SceneType::MainMenu;
            return Ok(false);
        };

        if game.prompt == Some(Prompt::LevelUp) {
            if let Some(PlayerInput::Select(letter)) = self.input_handler.get_menu_input() {
                let choice = match letter_index(letter) {
                    Some(0) => Some(StatChoice::Constitution),
                    Some(1) => Some(StatChoice::Strength),
                    Some(2) => Some(StatChoice::Agility),
                    _ => None,
                };
                if let Some(choice) = choice {
                    game.advance(PlayerAction::ChooseLevelUp(choice))?;
                }
            }
        } else if let Some(input) = self.input_handler.get_input(self.display.hovered_tile()) {
            if let Some(action) = self.input_handler.input_to_action(&input, game) {
                game.advance(action)?;
            } else {
                match input {
                    PlayerInput::Quit => {
                        self.save_and_leave();
                        return Ok(false);
                    }
                    PlayerInput::ShowInventory => {
                        self.current_scene = SceneType::Inventory(InventoryMode::Use)
                    }
                    PlayerInput::DropMenu => {
                        self.current_scene = SceneType::Inventory(InventoryMode::Drop)
                    }
                    PlayerInput::CharacterSheet => self.current_scene = SceneType::CharacterSheet,
                    PlayerInput::Help => self.current_scene = SceneType::Help,
                    _ => {}
                }
            }
        }

        self.render_playing();
        Ok(false)
    }

    /// Updates an inventory menu, returns true if exit is requested
    fn update_inventory_scene(&mut self, mode: InventoryMode) -> GloomResult<bool> {
        self.render_playing();
        let Some(game) = self.game_state.as_mut() else {
            self.current_scene = SceneType::MainMenu;
            return Ok(false);
        };

        let header = match mode {
            InventoryMode::Use => "Press the key next to an item to use it, or Esc to cancel.",
            InventoryMode::Drop => "Press the key next to an item to drop it, or Esc to cancel.",
        };
        draw_menu(
            header,
            &inventory_options(game),
            self.display.tile_size * 50.0,
            self.display.tile_size,
        );

        match self.input_handler.get_menu_input() {
            Some(PlayerInput::Select(letter)) => {
                self.current_scene = SceneType::Playing;
                if let Some(index) = letter_index(letter).filter(|i| *i < game.inventory.len()) {
                    let action = match mode {
                        InventoryMode::Use => PlayerAction::UseItem(index),
                        InventoryMode::Drop => PlayerAction::DropItem(index),
                    };
                    game.advance(action)?;
                }
            }
            Some(PlayerInput::Cancel) => self.current_scene = SceneType::Playing,
            _ => {}
        }
        Ok(false)
    }

    /// Updates the character sheet or help overlay; any key closes it.
    fn update_overlay_scene(&mut self) -> bool {
        self.render_playing();
        match self.current_scene {
            SceneType::Help => self.display.render_help(),
            _ => {
                if let Some(game) = self.game_state.as_ref() {
                    draw_text_box(
                        &character_sheet_lines(&game.status()),
                        self.display.tile_size * 30.0,
                        self.display.tile_size,
                    );
                }
            }
        }

        if get_last_key_pressed().is_some() || is_mouse_button_pressed(MouseButton::Left) {
            self.current_scene = SceneType::Playing;
        }
        false
    }

    /// Draws the world and any open prompt.
    fn render_playing(&mut self) {
        let Some(game) = self.game_state.as_ref() else {
            return;
        };
        self.display.render_game(game);

        if game.prompt == Some(Prompt::LevelUp) {
            draw_menu(
                "Level up! Choose a stat to raise:",
                &level_up_options(&game.status()),
                self.display.tile_size * 40.0,
                self.display.tile_size,
            );
        }
    }

    /// Starts a new game with a fresh dungeon
    fn start_new_game(&mut self) -> GloomResult<()> {
        let seed = self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0)
        });
        info!("Starting new game with seed: {}", seed);

        self.game_state = Some(GameState::new_game(seed)?);
        self.notice = None;
        self.current_scene = SceneType::Playing;
        Ok(())
    }

    /// Loads the save file, or stays on the menu with a notice.
    fn continue_game(&mut self) {
        match GameState::load_from_path(&self.save_path) {
            Ok(game) => {
                self.game_state = Some(game);
                self.notice = None;
                self.current_scene = SceneType::Playing;
            }
            Err(e) => {
                warn!("Could not load {}: {}", self.save_path.display(), e);
                self.notice = Some(NO_SAVE_NOTICE.to_string());
            }
        }
    }

    /// Saves the current game and returns to the main menu.
    fn save_and_leave(&mut self) {
        if let Some(game) = self.game_state.as_ref() {
            if let Err(e) = game.save_to_path(&self.save_path) {
                warn!("Could not save to {}: {}", self.save_path.display(), e);
                self.notice = Some(format!("Saving failed: {}", e));
            }
        }
        self.game_state = None;
        self.current_scene = SceneType::MainMenu;
    }
}
