//! Terminal rendering. Reads game state, never mutates it.

pub mod dash_scene;
pub mod game_common;

use crate::game::GameState;
use ratatui::Frame;

/// Draw one frame of the game screen.
pub fn draw_ui(frame: &mut Frame, game: &GameState) {
    let area = frame.size();
    dash_scene::render_dash_scene(frame, area, game);
}
