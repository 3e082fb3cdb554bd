//! The 10x20 playfield and the collision, lock and line-clear rules.
//!
//! Coordinates are `(x, y)` with `x` in `0..BOARD_WIDTH` (left to right) and
//! `y` in `0..BOARD_HEIGHT` (top to bottom). Pieces may hang above row 0.

use macroquad::prelude::Color;

use crate::tetromino::TetrominoType;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// `None` for empty, otherwise the color of the piece that locked there.
pub type Cell = Option<Color>;
pub type Row = [Cell; BOARD_WIDTH];

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Cell at `(x, y)`, or `None` when the coordinate is off the board.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Overwrites one cell. Returns false for coordinates off the board.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if !Self::in_bounds(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = cell;
        true
    }

    pub fn rows(&self) -> &[Row; BOARD_HEIGHT] {
        &self.cells
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        y < BOARD_HEIGHT && self.cells[y].iter().all(|cell| cell.is_some())
    }

    pub fn filled_cells(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }

    fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_WIDTH as i32 && y >= 0 && y < BOARD_HEIGHT as i32
    }

    /// True when every cell of the shape is inside the side walls, above the
    /// floor and not on an occupied cell. Cells above row 0 never collide, so
    /// pieces can spawn and rotate partly off the top.
    pub fn is_valid_position(&self, t_type: TetrominoType, rotation: usize, x: i32, y: i32) -> bool {
        t_type.shape(rotation).iter().all(|&[dx, dy]| {
            let cx = x + dx;
            let cy = y + dy;
            if cx < 0 || cx >= BOARD_WIDTH as i32 || cy >= BOARD_HEIGHT as i32 {
                return false;
            }
            cy < 0 || self.cells[cy as usize][cx as usize].is_none()
        })
    }

    /// Writes the shape into the grid. Cells that land above row 0 are dropped.
    pub fn lock_piece(&mut self, t_type: TetrominoType, rotation: usize, x: i32, y: i32, color: Color) {
        for &[dx, dy] in t_type.shape(rotation) {
            self.set(x + dx, y + dy, Some(color));
        }
    }

    /// Removes every full row, shifts the remaining rows down in order and
    /// refills the top with empty rows. Returns how many rows were removed.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut write = BOARD_HEIGHT;
        let mut cleared = 0;
        for read in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read) {
                cleared += 1;
                continue;
            }
            write -= 1;
            if write != read {
                self.cells[write] = self.cells[read];
            }
        }
        for row in &mut self.cells[..write] {
            *row = [None; BOARD_WIDTH];
        }
        cleared
    }
}
