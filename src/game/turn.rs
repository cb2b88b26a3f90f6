//! # Turn Scheduler
//!
//! Converts one player action into a state transition.
//!
//! [`GameState::advance`] is the single entry point the presentation layer
//! calls. It reports through [`TurnOutcome`] whether the action consumed a
//! turn, was rejected, or is waiting on a prompt.

use crate::game::{Direction, GameState, Position, Prompt, Rgb, RunState, TargetResult, UseOutcome};
use crate::GloomResult;
use log::trace;
use serde::{Deserialize, Serialize};

/// Stat offered by the level-up prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatChoice {
    /// +10 maximum and current hit points
    Constitution,
    /// +1 attack power
    Strength,
    /// +1 defense
    Agility,
}

/// Everything the player can ask the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Step or attack in a direction
    Move(Direction),
    /// Let a turn pass
    Wait,
    /// Pick up the item under the player
    PickUp,
    /// Use the item in an inventory slot
    UseItem(usize),
    /// Drop the item in an inventory slot
    DropItem(usize),
    /// Take the stairs down
    Descend,
    /// Answer a targeting prompt
    ConfirmTarget(Position),
    /// Abandon a targeting prompt
    CancelTarget,
    /// Answer the level-up prompt
    ChooseLevelUp(StatChoice),
    OpenInventory,
    ShowCharacterSheet,
}

/// What became of a [`PlayerAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The action consumed a turn and monsters acted
    TookTurn,
    /// The action was handled without consuming a turn
    NoTurn,
    /// A targeting prompt is open
    AwaitingTarget,
    /// The level-up prompt is open
    AwaitingLevelUp,
    /// The run is over; nothing happened
    Ignored,
}

impl GameState {
    /// Handles one player action.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::{GameState, PlayerAction, TurnOutcome};
    ///
    /// let mut game = GameState::new_game(7).unwrap();
    /// let outcome = game.advance(PlayerAction::Wait).unwrap();
    /// assert_eq!(outcome, TurnOutcome::TookTurn);
    /// assert_eq!(game.turn_number, 1);
    /// ```
    pub fn advance(&mut self, action: PlayerAction) -> GloomResult<TurnOutcome> {
        if self.run_state == RunState::Dead {
            return Ok(TurnOutcome::Ignored);
        }
        trace!("Player action {:?}", action);

        let outcome = match self.prompt {
            Some(Prompt::LevelUp) => self.answer_level_up(action),
            Some(Prompt::Target { .. }) => self.answer_target(action),
            None => self.act(action)?,
        };

        if outcome == TurnOutcome::TookTurn && self.run_state == RunState::Playing {
            self.turn_number += 1;
            self.update_visibility();
            self.run_behaviors();
        }

        self.update_visibility();
        self.check_level_up();
        Ok(outcome)
    }

    fn answer_level_up(&mut self, action: PlayerAction) -> TurnOutcome {
        match action {
            PlayerAction::ChooseLevelUp(choice) => {
                self.apply_level_up(choice);
                TurnOutcome::NoTurn
            }
            _ => TurnOutcome::AwaitingLevelUp,
        }
    }

    fn answer_target(&mut self, action: PlayerAction) -> TurnOutcome {
        match action {
            PlayerAction::ConfirmTarget(pos) => match self.resolve_target(pos) {
                TargetResult::Applied => TurnOutcome::TookTurn,
                TargetResult::Rejected => TurnOutcome::AwaitingTarget,
                TargetResult::NoPrompt => TurnOutcome::NoTurn,
            },
            PlayerAction::CancelTarget => {
                self.cancel_target();
                TurnOutcome::NoTurn
            }
            _ => TurnOutcome::AwaitingTarget,
        }
    }

    fn act(&mut self, action: PlayerAction) -> GloomResult<TurnOutcome> {
        let outcome = match action {
            PlayerAction::Move(direction) => {
                self.move_or_attack(direction);
                TurnOutcome::TookTurn
            }
            PlayerAction::Wait => TurnOutcome::TookTurn,
            PlayerAction::PickUp => {
                if let Some(item) = self.item_at(self.player_position()) {
                    self.pick_up(item);
                }
                TurnOutcome::NoTurn
            }
            PlayerAction::UseItem(index) => match self.use_item(index) {
                UseOutcome::Used => TurnOutcome::TookTurn,
                UseOutcome::Cancelled => TurnOutcome::NoTurn,
                UseOutcome::NeedsTarget(_) => TurnOutcome::AwaitingTarget,
            },
            PlayerAction::DropItem(index) => {
                if self.drop_item(index) {
                    TurnOutcome::TookTurn
                } else {
                    TurnOutcome::NoTurn
                }
            }
            PlayerAction::Descend => {
                let on_stairs = self
                    .entity(self.stairs)
                    .is_some_and(|stairs| stairs.position == self.player_position());
                if on_stairs {
                    self.next_level()?;
                } else {
                    self.message("There are no stairs here.", Rgb::LIGHT_GREY);
                }
                TurnOutcome::NoTurn
            }
            PlayerAction::ConfirmTarget(_)
            | PlayerAction::CancelTarget
            | PlayerAction::ChooseLevelUp(_)
            | PlayerAction::OpenInventory
            | PlayerAction::ShowCharacterSheet => TurnOutcome::NoTurn,
        };
        Ok(outcome)
    }

    fn move_or_attack(&mut self, direction: Direction) {
        let player = self.player;
        let delta = direction.to_delta();
        let destination = self.player_position() + delta;

        let target = self
            .living_combatant_at(destination)
            .filter(|id| *id != player);
        match target {
            Some(target) => {
                self.attack(player, target);
            }
            None => {
                self.move_by(player, delta.x, delta.y);
            }
        }
        self.fov_recompute = true;
    }
}
