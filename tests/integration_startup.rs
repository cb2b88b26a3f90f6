//! Integration test to ensure a new game starts in a playable state.

use gloom::{GameState, GloomResult, PlayerAction, RunState, TurnOutcome};

#[test]
fn test_basic_startup() -> GloomResult<()> {
    let game = GameState::new_game(12345)?;

    assert_eq!(game.turn_number, 0);
    assert_eq!(game.dungeon_level, 1);
    assert_eq!(game.run_state, RunState::Playing);
    assert!(game.prompt.is_none());
    assert!(game.inventory.is_empty());

    let player = game.player().expect("player should exist");
    assert!(player.is_living_combatant());
    assert!(!game.map.is_tile_blocked(player.position));
    assert!(game.is_visible(player.position));
    assert!(game.entity(game.stairs).is_some());
    Ok(())
}

#[test]
fn test_welcome_message_is_posted() -> GloomResult<()> {
    let game = GameState::new_game(1)?;
    assert!(!game.messages.is_empty());
    Ok(())
}

#[test]
fn test_player_starting_stats() -> GloomResult<()> {
    let game = GameState::new_game(2)?;
    let status = game.status();
    assert_eq!(status.hp, 100);
    assert_eq!(status.max_hp, 100);
    assert_eq!(status.power, 4);
    assert_eq!(status.defense, 1);
    assert_eq!(status.level, 1);
    assert_eq!(status.xp, 0);
    Ok(())
}

#[test]
fn test_same_seed_builds_same_game() -> GloomResult<()> {
    let first = GameState::new_game(777)?;
    let second = GameState::new_game(777)?;
    assert_eq!(first.map, second.map);
    assert_eq!(first.entities, second.entities);
    assert_eq!(first.player, second.player);
    Ok(())
}

#[test]
fn test_waiting_advances_the_clock() -> GloomResult<()> {
    let mut game = GameState::new_game(99)?;
    for _ in 0..3 {
        assert_eq!(game.advance(PlayerAction::Wait)?, TurnOutcome::TookTurn);
    }
    assert_eq!(game.turn_number, 3);
    Ok(())
}
