//! Cube Dash game UI rendering.
//!
//! The play field is drawn into a cell buffer scaled from world units to
//! whatever area the terminal gives us, then stamped row-by-row as
//! Paragraph widgets.

use super::game_common::{
    create_game_layout, format_game_time, render_game_over_banner, render_info_panel_frame,
    render_status_bar,
};
use crate::constants::*;
use crate::game::{GameState, Obstacle, ObstacleKind, Rect as WorldRect};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;

// ── Palette ──────────────────────────────────────────────────────────
const GRID_COLOR: Color = Color::Rgb(50, 50, 80);
const GROUND_COLOR: Color = Color::Rgb(45, 45, 70);
const GROUND_LINE_COLOR: Color = Color::Rgb(60, 60, 90);
const PLAYER_COLOR: Color = Color::Rgb(0, 200, 255);
const PLAYER_DETAIL_COLOR: Color = Color::Rgb(200, 240, 255);
const OBSTACLE_COLOR: Color = Color::Rgb(255, 50, 50);
const OBSTACLE_INNER_COLOR: Color = Color::Rgb(255, 100, 100);
const GLOW_COLOR: Color = Color::Rgb(100, 200, 255);

const GROUND_CHAR: char = '▓';
/// Spinner glyphs for the cube, one per quarter turn.
const ROTATION_GLYPHS: [char; 4] = ['◢', '◣', '◤', '◥'];

/// Render the game screen.
pub fn render_dash_scene(frame: &mut Frame, area: Rect, game: &GameState) {
    let layout = create_game_layout(frame, area, " Cube Dash ", PLAYER_COLOR, 10, 22);

    render_play_field(frame, layout.content, game);

    if game.is_game_over() {
        render_game_over_banner(
            frame,
            layout.content,
            "GAME OVER",
            &format!("Final Score: {}", game.score),
            "Press R to restart",
        );
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl Cell {
    fn fg(ch: char, fg: Color) -> Self {
        Self {
            ch,
            fg,
            bg: Color::Reset,
        }
    }
}

/// World-to-cell projection for one frame.
struct Projection {
    x_scale: f64,
    y_scale: f64,
    width: usize,
    height: usize,
}

impl Projection {
    fn new(width: u16, height: u16) -> Self {
        Self {
            x_scale: width as f64 / SCREEN_WIDTH,
            y_scale: height as f64 / SCREEN_HEIGHT,
            width: width as usize,
            height: height as usize,
        }
    }

    /// Cell containing the world point, if on screen.
    fn point(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let col = (x * self.x_scale).floor();
        let row = (y * self.y_scale).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((col, row))
    }

    fn cols(&self, x: f64, width: f64) -> Range<usize> {
        span(x, width, self.x_scale, self.width)
    }

    fn rows(&self, y: f64, height: f64) -> Range<usize> {
        span(y, height, self.y_scale, self.height)
    }

    /// First row that belongs to the ground strip.
    fn ground_row(&self) -> usize {
        ((GROUND_Y * self.y_scale).ceil() as usize).min(self.height)
    }
}

/// Cells covered by `[start, start + len)`, at least one cell wide so
/// small sprites never vanish, clipped to `0..limit`.
fn span(start: f64, len: f64, scale: f64, limit: usize) -> Range<usize> {
    let first = (start * scale).floor();
    let last = ((start + len) * scale).ceil().max(first + 1.0);
    let first = first.clamp(0.0, limit as f64) as usize;
    let last = last.clamp(0.0, limit as f64) as usize;
    first..last.max(first)
}

/// Render the play field: grid, ground, obstacles, effects, cube, HUD.
fn render_play_field(frame: &mut Frame, area: Rect, game: &GameState) {
    if area.height < 4 || area.width < 20 {
        return;
    }

    let proj = Projection::new(area.width, area.height);
    let mut buffer: Vec<Vec<Cell>> = vec![vec![Cell::default(); proj.width]; proj.height];

    draw_background(&mut buffer, &proj, game.bg_offset);
    for obstacle in &game.obstacles {
        draw_obstacle(&mut buffer, &proj, obstacle);
    }
    draw_particles(&mut buffer, &proj, game);
    draw_player(&mut buffer, &proj, game);
    draw_hud(&mut buffer, &proj, game);

    // ── Render buffer to terminal ─────────────────────────────────────
    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn draw_background(buffer: &mut [Vec<Cell>], proj: &Projection, bg_offset: f64) {
    let ground_row = proj.ground_row();

    // Scrolling grid: vertical lines every 100 units from the offset,
    // horizontal lines every 100 units
    let mut x = bg_offset;
    while x < SCREEN_WIDTH {
        if let Some((col, _)) = proj.point(x, 0.0) {
            for row in buffer.iter_mut().take(ground_row) {
                row[col] = Cell::fg('┆', GRID_COLOR);
            }
        }
        x += BG_SCROLL_PERIOD;
    }
    let mut y = 0.0;
    while y < GROUND_Y {
        if let Some((_, row)) = proj.point(0.0, y) {
            if row < ground_row {
                for cell in buffer[row].iter_mut() {
                    cell.ch = if cell.ch == '┆' { '┼' } else { '┄' };
                    cell.fg = GRID_COLOR;
                }
            }
        }
        y += BG_SCROLL_PERIOD;
    }

    // Ground strip with a fixed pattern every 50 units
    for row in buffer.iter_mut().skip(ground_row) {
        for cell in row.iter_mut() {
            *cell = Cell {
                ch: GROUND_CHAR,
                fg: GROUND_COLOR,
                bg: Color::Reset,
            };
        }
    }
    let mut x = 0.0;
    while x < SCREEN_WIDTH {
        if let Some((col, _)) = proj.point(x, 0.0) {
            for row in buffer.iter_mut().skip(ground_row) {
                row[col] = Cell::fg('│', GROUND_LINE_COLOR);
            }
        }
        x += 50.0;
    }
}

fn draw_obstacle(buffer: &mut [Vec<Cell>], proj: &Projection, obstacle: &Obstacle) {
    let cols = proj.cols(obstacle.x, obstacle.width());
    let rows = proj.rows(obstacle.y, obstacle.height());
    let rows = rows.start..rows.end.min(proj.ground_row());
    if cols.is_empty() || rows.is_empty() {
        return;
    }

    match obstacle.kind {
        ObstacleKind::Spike => {
            // Tip on the top row, full base below
            let center = (obstacle.x + obstacle.width() / 2.0) * proj.x_scale;
            let tip_col = (center.floor().max(0.0) as usize).min(proj.width - 1);
            for row in rows.clone() {
                if row == rows.start {
                    if cols.contains(&tip_col) {
                        buffer[row][tip_col] = Cell::fg('▲', OBSTACLE_COLOR);
                    }
                    continue;
                }
                for col in cols.clone() {
                    let inner = col != cols.start && col + 1 != cols.end;
                    let color = if inner {
                        OBSTACLE_INNER_COLOR
                    } else {
                        OBSTACLE_COLOR
                    };
                    buffer[row][col] = Cell::fg('█', color);
                }
            }
        }
        ObstacleKind::Block => {
            for row in rows.clone() {
                for col in cols.clone() {
                    let edge = row == rows.start
                        || row + 1 == rows.end
                        || col == cols.start
                        || col + 1 == cols.end;
                    let color = if edge {
                        OBSTACLE_COLOR
                    } else {
                        OBSTACLE_INNER_COLOR
                    };
                    buffer[row][col] = Cell::fg('█', color);
                }
            }
        }
    }
}

fn draw_particles(buffer: &mut [Vec<Cell>], proj: &Projection, game: &GameState) {
    for p in &game.player.jump_particles {
        if let Some((col, row)) = proj.point(p.x, p.y) {
            let ch = if p.radius > 10.0 { 'o' } else { '·' };
            buffer[row][col] = Cell::fg(ch, GLOW_COLOR);
        }
    }

    for p in &game.particles {
        if let Some((col, row)) = proj.point(p.x, p.y) {
            let fade = p.fade();
            let (r, g, b) = p.color;
            let color = Color::Rgb(
                (r as f64 * fade) as u8,
                (g as f64 * fade) as u8,
                (b as f64 * fade) as u8,
            );
            let ch = if fade > 0.5 { '*' } else { '.' };
            buffer[row][col] = Cell::fg(ch, color);
        }
    }
}

fn draw_player(buffer: &mut [Vec<Cell>], proj: &Projection, game: &GameState) {
    let WorldRect {
        x,
        y,
        width,
        height,
    } = game.player.bounds();
    let cols = proj.cols(x, width);
    let rows = proj.rows(y, height);
    let rows = rows.start..rows.end.min(proj.ground_row());

    for row in rows.clone() {
        for col in cols.clone() {
            buffer[row][col] = Cell {
                ch: '█',
                fg: PLAYER_COLOR,
                bg: Color::Reset,
            };
        }
    }

    // Spinning detail in the middle of the cube
    let (cx, cy) = game.player.center();
    if let Some((col, row)) = proj.point(cx, cy) {
        if rows.contains(&row) && cols.contains(&col) {
            let glyph = ROTATION_GLYPHS[(game.player.rotation / 90) as usize % 4];
            buffer[row][col] = Cell {
                ch: glyph,
                fg: PLAYER_DETAIL_COLOR,
                bg: PLAYER_COLOR,
            };
        }
    }
}

fn draw_hud(buffer: &mut [Vec<Cell>], proj: &Projection, game: &GameState) {
    write_text(buffer, 0, 1, &format!("Score: {}", game.score), Color::White);

    if proj.height > 1 {
        write_text(
            buffer,
            proj.height - 1,
            1,
            "SPACE/UP: Jump | R: Restart",
            Color::White,
        );
    }
}

fn write_text(buffer: &mut [Vec<Cell>], row: usize, start_col: usize, text: &str, fg: Color) {
    let Some(line) = buffer.get_mut(row) else {
        return;
    };
    for (i, ch) in text.chars().enumerate() {
        if let Some(cell) = line.get_mut(start_col + i) {
            *cell = Cell::fg(ch, fg);
        }
    }
}

/// Render the status bar below the play field.
fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &GameState) {
    if game.is_game_over() {
        render_status_bar(
            frame,
            area,
            "Crashed!",
            Color::Red,
            &[("[R]", "Restart"), ("[Q]", "Quit")],
        );
        return;
    }

    let status = if game.player.is_jumping {
        "Airborne"
    } else {
        "Run!"
    };
    render_status_bar(
        frame,
        area,
        status,
        PLAYER_COLOR,
        &[("[Space/Up]", "Jump"), ("[Q]", "Quit")],
    );
}

/// Render the info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, game: &GameState) {
    let inner = render_info_panel_frame(frame, area);

    let next_spawn = game
        .next_spawn_interval
        .saturating_sub(game.obstacle_timer);

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.best_score.max(game.score).to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format_game_time(game.tick_count, TICKS_PER_SECOND),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Next: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ticks", next_spawn),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(PLAYER_COLOR)),
            Span::styled("Cube", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" ▲ ", Style::default().fg(OBSTACLE_COLOR)),
            Span::styled("Spike", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(OBSTACLE_COLOR)),
            Span::styled("Block", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
