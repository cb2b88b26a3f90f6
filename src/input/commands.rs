//! # Command Definitions
//!
//! Key bindings: which key produces which [`PlayerInput`].
//!
//! Kept free of macroquad's event polling so the table can be tested
//! without a window.

use crate::game::Direction;
use crate::input::PlayerInput;
use macroquad::prelude::KeyCode;

/// One line of the in-game key help.
pub const KEY_HELP: &[&str] = &[
    "Arrows/numpad/hjklyubn: move or attack",
    "Space/.: wait   g/,: pick up",
    "i: use item   d: drop item",
    "c: character   >/2: descend",
    "Click: target   Right-click/Esc: cancel",
];

/// Maps a pressed key to an input.
///
/// `shift` distinguishes `>` from `.` on layouts where they share a key.
///
/// # Examples
///
/// ```
/// use gloom::{input_from_key, Direction, PlayerInput};
/// use macroquad::prelude::KeyCode;
///
/// assert_eq!(input_from_key(KeyCode::Up, false, true), Some(PlayerInput::Move(Direction::North)));
/// assert_eq!(input_from_key(KeyCode::Period, true, true), Some(PlayerInput::Descend));
/// ```
pub fn input_from_key(key: KeyCode, shift: bool, vi_keys: bool) -> Option<PlayerInput> {
    let input = match key {
        KeyCode::Escape => PlayerInput::Quit,

        KeyCode::Up | KeyCode::Kp8 => PlayerInput::Move(Direction::North),
        KeyCode::Down | KeyCode::Kp2 => PlayerInput::Move(Direction::South),
        KeyCode::Left | KeyCode::Kp4 => PlayerInput::Move(Direction::West),
        KeyCode::Right | KeyCode::Kp6 => PlayerInput::Move(Direction::East),
        KeyCode::Home | KeyCode::Kp7 => PlayerInput::Move(Direction::Northwest),
        KeyCode::PageUp | KeyCode::Kp9 => PlayerInput::Move(Direction::Northeast),
        KeyCode::End | KeyCode::Kp1 => PlayerInput::Move(Direction::Southwest),
        KeyCode::PageDown | KeyCode::Kp3 => PlayerInput::Move(Direction::Southeast),

        KeyCode::H if vi_keys => PlayerInput::Move(Direction::West),
        KeyCode::J if vi_keys => PlayerInput::Move(Direction::South),
        KeyCode::K if vi_keys => PlayerInput::Move(Direction::North),
        KeyCode::L if vi_keys => PlayerInput::Move(Direction::East),
        KeyCode::Y if vi_keys => PlayerInput::Move(Direction::Northwest),
        KeyCode::U if vi_keys => PlayerInput::Move(Direction::Northeast),
        KeyCode::B if vi_keys => PlayerInput::Move(Direction::Southwest),
        KeyCode::N if vi_keys => PlayerInput::Move(Direction::Southeast),

        KeyCode::Period if shift => PlayerInput::Descend,
        KeyCode::Key2 => PlayerInput::Descend,
        KeyCode::Space | KeyCode::Period | KeyCode::Kp5 => PlayerInput::Wait,

        KeyCode::G | KeyCode::Comma => PlayerInput::PickUp,
        KeyCode::I => PlayerInput::ShowInventory,
        KeyCode::D => PlayerInput::DropMenu,
        KeyCode::C => PlayerInput::CharacterSheet,
        KeyCode::F1 => PlayerInput::Help,
        _ => return None,
    };
    Some(input)
}

/// Menu slot for a letter key: `a` is 0.
///
/// # Examples
///
/// ```
/// use gloom::letter_index;
///
/// assert_eq!(letter_index('a'), Some(0));
/// assert_eq!(letter_index('C'), Some(2));
/// assert_eq!(letter_index('1'), None);
/// ```
pub fn letter_index(letter: char) -> Option<usize> {
    let lower = letter.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        Some((lower as u8 - b'a') as usize)
    } else {
        None
    }
}

/// Letter shown next to menu slot `index`.
pub fn index_letter(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}
