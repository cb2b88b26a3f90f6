//! # Input Module
//!
//! Input handling for player interactions.
//!
//! [`InputHandler`] polls macroquad for keyboard and mouse events and turns
//! them into [`PlayerInput`]. Which inputs become a [`PlayerAction`] depends
//! on whether a prompt is open; menus are handled by the scene manager.

pub mod commands;

pub use commands::*;

use crate::game::{Direction, GameState, PlayerAction, Position, Prompt};
use macroquad::prelude::*;

/// Input handler for processing player commands.
///
/// Handles keyboard and mouse input and converts it to game actions that
/// can be processed by the game state.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.vi_keys_enabled);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Gets this frame's input, if any.
    ///
    /// `hovered` is the map tile under the mouse; a left click on it
    /// confirms a target.
    pub fn get_input(&self, hovered: Option<Position>) -> Option<PlayerInput> {
        if is_mouse_button_pressed(MouseButton::Right) {
            return Some(PlayerInput::Cancel);
        }
        if is_mouse_button_pressed(MouseButton::Left) {
            if let Some(pos) = hovered {
                return Some(PlayerInput::Confirm(pos));
            }
        }

        let key = get_last_key_pressed()?;
        let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        input_from_key(key, shift, self.vi_keys_enabled)
    }

    /// Gets a letter typed while a menu is open.
    pub fn get_menu_input(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) || is_mouse_button_pressed(MouseButton::Right) {
            return Some(PlayerInput::Cancel);
        }
        get_char_pressed()
            .filter(char::is_ascii_alphabetic)
            .map(PlayerInput::Select)
    }

    /// Converts player input to a game action.
    ///
    /// Returns `None` for inputs the scene manager handles itself (menus,
    /// quitting, help) and for clicks when nothing is being targeted.
    pub fn input_to_action(
        &self,
        input: &PlayerInput,
        game_state: &GameState,
    ) -> Option<PlayerAction> {
        let targeting = matches!(game_state.prompt, Some(Prompt::Target { .. }));
        match *input {
            PlayerInput::Move(direction) => Some(PlayerAction::Move(direction)),
            PlayerInput::Wait => Some(PlayerAction::Wait),
            PlayerInput::PickUp => Some(PlayerAction::PickUp),
            PlayerInput::Descend => Some(PlayerAction::Descend),
            PlayerInput::Confirm(pos) if targeting => Some(PlayerAction::ConfirmTarget(pos)),
            PlayerInput::Cancel | PlayerInput::Quit if targeting => {
                Some(PlayerAction::CancelTarget)
            }
            _ => None,
        }
    }
}

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move or attack in a direction
    Move(Direction),
    /// Wait/rest for one turn
    Wait,
    /// Pick up item at current position
    PickUp,
    /// Show inventory to use an item
    ShowInventory,
    /// Show inventory to drop an item
    DropMenu,
    /// Show the character sheet
    CharacterSheet,
    /// Take the stairs down
    Descend,
    /// Show help information
    Help,
    /// Cancel current action
    Cancel,
    /// Confirm a target tile
    Confirm(Position),
    /// A letter typed in a menu
    Select(char),
    /// Leave to the main menu
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Targeting;

    #[test]
    fn test_movement_maps_to_actions() {
        let handler = InputHandler::new();
        let game = GameState::new_game(3).unwrap();
        assert_eq!(
            handler.input_to_action(&PlayerInput::Move(Direction::East), &game),
            Some(PlayerAction::Move(Direction::East))
        );
        assert_eq!(handler.input_to_action(&PlayerInput::Wait, &game), Some(PlayerAction::Wait));
        assert_eq!(handler.input_to_action(&PlayerInput::ShowInventory, &game), None);
    }

    #[test]
    fn test_clicks_only_matter_while_targeting() {
        let handler = InputHandler::new();
        let mut game = GameState::new_game(3).unwrap();
        let click = PlayerInput::Confirm(Position::new(4, 4));
        assert_eq!(handler.input_to_action(&click, &game), None);
        assert_eq!(handler.input_to_action(&PlayerInput::Quit, &game), None);

        game.prompt = Some(Prompt::Target {
            item_index: 0,
            targeting: Targeting::Tile { range: None },
        });
        assert_eq!(
            handler.input_to_action(&click, &game),
            Some(PlayerAction::ConfirmTarget(Position::new(4, 4)))
        );
        assert_eq!(
            handler.input_to_action(&PlayerInput::Quit, &game),
            Some(PlayerAction::CancelTarget)
        );
    }
}
