//! # User Interface Elements
//!
//! Menus, bars and panels drawn on top of the map.
//!
//! Layout helpers that do not touch the screen are kept separate from the
//! drawing calls so they can be unit tested.

use crate::game::{GameState, Rgb, StatusSummary};
use crate::input::index_letter;
use macroquad::prelude::*;

/// Converts a game color to a macroquad color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

/// Darkens a color for remembered but unlit tiles.
pub fn dimmed(color: Color) -> Color {
    Color::new(color.r * 0.4, color.g * 0.4, color.b * 0.4, color.a)
}

/// Width in pixels of the filled part of a bar.
///
/// # Examples
///
/// ```
/// use gloom::bar_fill;
///
/// assert_eq!(bar_fill(50, 100, 200.0), 100.0);
/// assert_eq!(bar_fill(0, 100, 200.0), 0.0);
/// assert_eq!(bar_fill(5, 0, 200.0), 0.0);
/// ```
pub fn bar_fill(value: i32, maximum: i32, width: f32) -> f32 {
    if maximum <= 0 {
        return 0.0;
    }
    (value.clamp(0, maximum) as f32 / maximum as f32) * width
}

/// Lettered lines for a menu: `(a) first`, `(b) second`, ...
pub fn menu_lines<S: AsRef<str>>(options: &[S]) -> Vec<String> {
    options
        .iter()
        .enumerate()
        .map(|(index, option)| format!("({}) {}", index_letter(index), option.as_ref()))
        .collect()
}

/// Inventory menu entries, or the empty-inventory notice.
pub fn inventory_options(game: &GameState) -> Vec<String> {
    if game.inventory.is_empty() {
        vec!["Inventory is empty.".to_string()]
    } else {
        game.inventory.iter().map(|item| item.name.clone()).collect()
    }
}

/// Level-up menu entries, naming the current stat values.
pub fn level_up_options(status: &StatusSummary) -> Vec<String> {
    vec![
        format!("Constitution (+10 HP, from {})", status.max_hp),
        format!("Strength (+1 attack, from {})", status.power),
        format!("Agility (+1 defense, from {})", status.defense),
    ]
}

/// Lines of the character sheet.
pub fn character_sheet_lines(status: &StatusSummary) -> Vec<String> {
    vec![
        "Character Information".to_string(),
        String::new(),
        format!("Level: {}", status.level),
        format!("Experience: {}", status.xp),
        format!("Experience to level up: {}", status.next_level_xp),
        String::new(),
        format!("Maximum HP: {}", status.max_hp),
        format!("Attack: {}", status.power),
        format!("Defense: {}", status.defense),
    ]
}

/// Draws a boxed menu centered on the screen.
pub fn draw_menu(header: &str, options: &[String], width: f32, font_size: f32) {
    let line_height = font_size * 1.2;
    let header_lines = if header.is_empty() { 0 } else { 2 };
    let height = (options.len() + header_lines) as f32 * line_height + line_height;
    let x = (screen_width() - width) / 2.0;
    let y = (screen_height() - height) / 2.0;

    draw_rectangle(x, y, width, height, Color::new(0.0, 0.0, 0.0, 0.85));
    draw_rectangle_lines(x, y, width, height, 2.0, GRAY);

    let mut line_y = y + line_height;
    if !header.is_empty() {
        draw_text(header, x + 10.0, line_y, font_size, WHITE);
        line_y += line_height * 2.0;
    }
    for line in menu_lines(options) {
        draw_text(&line, x + 10.0, line_y, font_size, WHITE);
        line_y += line_height;
    }
}

/// Draws a plain text box centered on the screen.
pub fn draw_text_box(lines: &[String], width: f32, font_size: f32) {
    let line_height = font_size * 1.2;
    let height = (lines.len() as f32 + 1.0) * line_height;
    let x = (screen_width() - width) / 2.0;
    let y = (screen_height() - height) / 2.0;

    draw_rectangle(x, y, width, height, Color::new(0.0, 0.0, 0.0, 0.85));
    draw_rectangle_lines(x, y, width, height, 2.0, GRAY);
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, x + 10.0, y + line_height * (i as f32 + 1.0), font_size, WHITE);
    }
}

/// Draws a labelled bar such as the HP bar.
#[allow(clippy::too_many_arguments)]
pub fn draw_bar(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    label: &str,
    value: i32,
    maximum: i32,
    fill: Color,
    back: Color,
) {
    draw_rectangle(x, y, width, height, back);
    draw_rectangle(x, y, bar_fill(value, maximum, width), height, fill);
    let text = format!("{}: {}/{}", label, value, maximum);
    let size = measure_text(&text, None, (height * 0.8) as u16, 1.0);
    draw_text(
        &text,
        x + (width - size.width) / 2.0,
        y + height * 0.8,
        height * 0.8,
        WHITE,
    );
}
