//! # Display Management
//!
//! Screen layout and 2D rendering of the dungeon using macroquad.
//!
//! The map fills the top of the window one cell per tile; a status panel
//! with the HP bar and the message log sits underneath.

use crate::config::{MAP_HEIGHT, MAP_WIDTH};
use crate::game::{GameState, Position, Rgb};
use crate::input::KEY_HELP;
use crate::rendering::{dimmed, draw_bar, to_color};
use macroquad::prelude::*;

/// Rows of tiles reserved for the status panel.
pub const PANEL_ROWS: i32 = 7;

/// Width of the HP bar, in tiles.
pub const BAR_WIDTH: i32 = 20;

const DARK_WALL: Rgb = Rgb::new(0, 0, 100);
const LIGHT_WALL: Rgb = Rgb::new(130, 110, 50);
const DARK_GROUND: Rgb = Rgb::new(50, 50, 150);
const LIGHT_GROUND: Rgb = Rgb::new(200, 180, 50);

/// Macroquad display manager for the game.
///
/// Handles all 2D graphics rendering operations including map display,
/// UI elements, and screen management.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroquadDisplay {
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    /// Tile size in pixels
    pub tile_size: f32,
    /// Map width in tiles
    pub map_width: i32,
    /// Map height in tiles
    pub map_height: i32,
}

impl MacroquadDisplay {
    /// Creates a display sized to the current window.
    pub fn new() -> Self {
        Self::with_dimensions(screen_width(), screen_height())
    }

    /// Creates a display for a window of the given pixel size.
    ///
    /// # Examples
    ///
    /// ```
    /// use gloom::MacroquadDisplay;
    ///
    /// let display = MacroquadDisplay::with_dimensions(800.0, 500.0);
    /// assert_eq!(display.tile_size, 10.0);
    /// ```
    pub fn with_dimensions(screen_width: f32, screen_height: f32) -> Self {
        let tile_size = (screen_width / MAP_WIDTH as f32)
            .min(screen_height / (MAP_HEIGHT + PANEL_ROWS) as f32)
            .floor()
            .max(1.0);
        Self {
            screen_width,
            screen_height,
            tile_size,
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
        }
    }

    /// Top edge of the status panel in pixels.
    pub fn panel_top(&self) -> f32 {
        self.map_height as f32 * self.tile_size
    }

    /// Pixel position of a tile's top-left corner.
    pub fn tile_origin(&self, pos: Position) -> Vec2 {
        vec2(pos.x as f32 * self.tile_size, pos.y as f32 * self.tile_size)
    }

    /// The map tile under a pixel, if the pixel is over the map.
    pub fn tile_at(&self, pixel: Vec2) -> Option<Position> {
        if pixel.x < 0.0 || pixel.y < 0.0 {
            return None;
        }
        let x = (pixel.x / self.tile_size) as i32;
        let y = (pixel.y / self.tile_size) as i32;
        if x < self.map_width && y < self.map_height {
            Some(Position::new(x, y))
        } else {
            None
        }
    }

    /// The map tile under the mouse cursor.
    pub fn hovered_tile(&self) -> Option<Position> {
        let (x, y) = mouse_position();
        self.tile_at(vec2(x, y))
    }

    /// Renders the complete game screen: map, entities, panel and messages.
    pub fn render_game(&mut self, game: &GameState) {
        if screen_width() != self.screen_width || screen_height() != self.screen_height {
            *self = Self::with_dimensions(screen_width(), screen_height());
        }

        clear_background(BLACK);
        self.render_map(game);
        self.render_entities(game);
        self.render_panel(game);
    }

    /// Renders lit and remembered tiles.
    fn render_map(&self, game: &GameState) {
        for view in game.tile_views() {
            let color = match (view.wall, view.visible) {
                (true, true) => to_color(LIGHT_WALL),
                (true, false) => to_color(DARK_WALL),
                (false, true) => to_color(LIGHT_GROUND),
                (false, false) => to_color(DARK_GROUND),
            };
            let origin = self.tile_origin(view.position);
            draw_rectangle(origin.x, origin.y, self.tile_size, self.tile_size, color);
        }
    }

    /// Renders entity glyphs, player last.
    fn render_entities(&self, game: &GameState) {
        for request in game.draw_requests() {
            let color = if game.is_visible(request.position) {
                to_color(request.color)
            } else {
                dimmed(to_color(request.color))
            };
            self.draw_glyph(request.position, request.glyph, color);
        }
    }

    fn draw_glyph(&self, pos: Position, glyph: char, color: Color) {
        let origin = self.tile_origin(pos);
        let mut buffer = [0u8; 4];
        let text: &str = glyph.encode_utf8(&mut buffer);
        let size = measure_text(text, None, self.tile_size as u16, 1.0);
        draw_text(
            text,
            origin.x + (self.tile_size - size.width) / 2.0,
            origin.y + self.tile_size * 0.8,
            self.tile_size,
            color,
        );
    }

    /// Renders the HP bar, depth, names under the mouse and recent messages.
    fn render_panel(&self, game: &GameState) {
        let top = self.panel_top();
        let tile = self.tile_size;
        let status = game.status();
        draw_rectangle(0.0, top, self.screen_width, self.screen_height - top, BLACK);

        if let Some(pos) = self.hovered_tile() {
            let names = game.names_at(pos);
            if !names.is_empty() {
                draw_text(&names.join(", "), tile, top + tile * 0.8, tile, LIGHTGRAY);
            }
        }

        draw_bar(
            tile,
            top + tile,
            BAR_WIDTH as f32 * tile,
            tile,
            "HP",
            status.hp,
            status.max_hp,
            to_color(Rgb::RED),
            to_color(Rgb::DARK_RED),
        );
        draw_text(
            &format!("Dungeon level {}", status.dungeon_level),
            tile,
            top + tile * 3.0,
            tile,
            LIGHTGRAY,
        );
        draw_text(
            &format!("XP {}/{}", status.xp, status.next_level_xp),
            tile,
            top + tile * 4.0,
            tile,
            LIGHTGRAY,
        );

        let message_x = (BAR_WIDTH + 2) as f32 * tile;
        let rows = (PANEL_ROWS - 1) as usize;
        for (i, message) in game.messages.recent(rows).enumerate() {
            draw_text(
                &message.text,
                message_x,
                top + tile * (i as f32 + 1.8),
                tile,
                to_color(message.color),
            );
        }
    }

    /// Renders the help lines over the panel.
    pub fn render_help(&self) {
        let lines: Vec<String> = KEY_HELP.iter().map(|line| line.to_string()).collect();
        crate::rendering::draw_text_box(&lines, self.tile_size * 40.0, self.tile_size);
    }

    /// Renders the title screen with a menu and an optional notice.
    pub fn render_main_menu(&self, options: &[String], notice: Option<&str>) {
        clear_background(BLACK);
        let title = "GLOOM";
        let size = self.tile_size * 3.0;
        let measured = measure_text(title, None, size as u16, 1.0);
        draw_text(
            title,
            (self.screen_width - measured.width) / 2.0,
            self.screen_height * 0.25,
            size,
            to_color(Rgb::YELLOW),
        );
        crate::rendering::draw_menu("", options, self.tile_size * 24.0, self.tile_size * 1.2);
        if let Some(notice) = notice {
            let measured = measure_text(notice, None, self.tile_size as u16, 1.0);
            draw_text(
                notice,
                (self.screen_width - measured.width) / 2.0,
                self.screen_height * 0.8,
                self.tile_size,
                to_color(Rgb::RED),
            );
        }
    }
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::with_dimensions(MAP_WIDTH as f32 * 12.0, (MAP_HEIGHT + PANEL_ROWS) as f32 * 12.0)
    }
}
