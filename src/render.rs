//! Draws a [`Snapshot`]. Reads state only.

use macroquad::prelude::*;

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::Snapshot;
use crate::input::CONTROLS;

const BOARD_X: f32 = 300.0;
const BOARD_Y: f32 = 50.0;
const TILE_SIZE: f32 = 25.0;

const PANEL_X: f32 = 50.0;
const LEGEND_X: f32 = 600.0;

const BLACK_COLOR: Color = BLACK;
const LIGHT_GRAY: Color = Color::new(0.75, 0.75, 0.75, 1.0);
const SHADOW_GRAY: Color = Color::new(0.25, 0.25, 0.25, 1.0);
const OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.5);

pub fn draw(state: &Snapshot) {
    clear_background(BLACK_COLOR);

    let board_w = BOARD_WIDTH as f32 * TILE_SIZE;
    let board_h = BOARD_HEIGHT as f32 * TILE_SIZE;
    draw_rectangle(BOARD_X, BOARD_Y, board_w, board_h, BLACK_COLOR);
    draw_rectangle_lines(BOARD_X, BOARD_Y, board_w, board_h, 2.0, WHITE);

    for (y, row) in state.board.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(color) = cell {
                draw_cell(x as i32, y as i32, *color);
            }
        }
    }

    if !state.game_over {
        if let Some(piece) = state.piece {
            for (x, y) in piece.cells() {
                draw_cell(x, y, piece.color());
            }
        }
    }

    draw_stats(state);
    draw_legend();

    if let Some(overlay) = overlay_for(state) {
        draw_overlay(&overlay);
    }
}

/// Full-screen banner drawn over the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Overlay {
    title: &'static str,
    font_size: u16,
    hint: &'static str,
}

const GAME_OVER_OVERLAY: Overlay = Overlay {
    title: "GAME OVER",
    font_size: 72,
    hint: "PRESS R TO RESTART",
};

const PAUSED_OVERLAY: Overlay = Overlay {
    title: "PAUSED",
    font_size: 96,
    hint: "Press P to Resume",
};

/// Game over wins over pause.
fn overlay_for(state: &Snapshot) -> Option<Overlay> {
    if state.game_over {
        Some(GAME_OVER_OVERLAY)
    } else if state.paused {
        Some(PAUSED_OVERLAY)
    } else {
        None
    }
}

/// Board cell at `(x, y)`; cells above the visible board are skipped.
fn draw_cell(x: i32, y: i32, color: Color) {
    if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
        return;
    }
    let px = BOARD_X + x as f32 * TILE_SIZE;
    let py = BOARD_Y + y as f32 * TILE_SIZE;
    draw_snes_block(px, py, TILE_SIZE, color);
}

fn draw_snes_block(x: f32, y: f32, size: f32, color: Color) {
    draw_rectangle(x, y, size, size, color);
    let highlight = Color::new(
        (color.r + 0.4).min(1.0),
        (color.g + 0.4).min(1.0),
        (color.b + 0.4).min(1.0),
        1.0,
    );
    let shadow = Color::new(color.r * 0.5, color.g * 0.5, color.b * 0.5, 1.0);
    let border = size * 0.15;
    draw_rectangle(x, y, size, border, highlight);
    draw_rectangle(x, y, border, size, highlight);
    draw_rectangle(x, y + size - border, size, border, shadow);
    draw_rectangle(x + size - border, y, border, size, shadow);
}

fn draw_stats(state: &Snapshot) {
    let rows = [
        ("SCORE", format!("{:06}", state.score)),
        ("LINES", format!("{:03}", state.lines)),
        ("LEVEL", format!("{:02}", state.level)),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = 120.0 + i as f32 * 80.0;
        draw_text(label, PANEL_X, y, 36.0, WHITE);
        draw_text(value, PANEL_X, y + 30.0, 36.0, WHITE);
    }
}

fn draw_legend() {
    for (i, line) in CONTROLS.iter().enumerate() {
        draw_text(line, LEGEND_X, 110.0 + i as f32 * 25.0, 20.0, LIGHT_GRAY);
    }
}

fn draw_overlay(overlay: &Overlay) {
    let Overlay { title, font_size: size, hint } = *overlay;
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), OVERLAY);

    let measure = measure_text(title, None, size, 1.0);
    let x = (screen_width() - measure.width) / 2.0;
    let y = screen_height() / 2.0;
    draw_text(title, x + 3.0, y + 3.0, size as f32, SHADOW_GRAY);
    draw_text(title, x, y, size as f32, WHITE);

    let measure = measure_text(hint, None, 30, 1.0);
    let x = (screen_width() - measure.width) / 2.0;
    draw_text(hint, x, y + 60.0, 30.0, LIGHT_GRAY);
}
