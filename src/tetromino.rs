//! The seven tetrominoes: rotation tables, colors and the falling piece.

use macroquad::prelude::Color;

/// Four `[dx, dy]` offsets from the pivot cell. Negative `dy` is above the pivot.
pub type Shape = [[i32; 2]; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

const I_ROTATIONS: [Shape; 2] = [
    [[0, 1], [0, 0], [0, -1], [0, -2]],  // vertical
    [[-1, 0], [0, 0], [1, 0], [2, 0]],   // horizontal
];

const O_ROTATIONS: [Shape; 1] = [
    [[0, 0], [1, 0], [0, 1], [1, 1]],
];

const T_ROTATIONS: [Shape; 4] = [
    [[0, 0], [-1, 0], [1, 0], [0, -1]],
    [[0, 0], [0, -1], [0, 1], [1, 0]],
    [[0, 0], [-1, 0], [1, 0], [0, 1]],
    [[0, 0], [0, -1], [0, 1], [-1, 0]],
];

const S_ROTATIONS: [Shape; 2] = [
    [[0, 0], [-1, 0], [0, -1], [1, -1]],
    [[0, 0], [0, -1], [1, 0], [1, 1]],
];

const Z_ROTATIONS: [Shape; 2] = [
    [[0, 0], [1, 0], [0, -1], [-1, -1]],
    [[0, 0], [0, 1], [1, 0], [1, -1]],
];

const J_ROTATIONS: [Shape; 4] = [
    [[0, 0], [-1, 0], [1, 0], [-1, -1]],
    [[0, 0], [0, -1], [0, 1], [1, -1]],
    [[0, 0], [-1, 0], [1, 0], [1, 1]],
    [[0, 0], [0, -1], [0, 1], [-1, 1]],
];

const L_ROTATIONS: [Shape; 4] = [
    [[0, 0], [-1, 0], [1, 0], [1, -1]],
    [[0, 0], [0, -1], [0, 1], [1, 1]],
    [[0, 0], [-1, 0], [1, 0], [-1, 1]],
    [[0, 0], [0, -1], [0, 1], [-1, -1]],
];

pub const NES_COLORS: [Color; 7] = [
    Color { r: 0.0,    g: 1.0,    b: 1.0,    a: 1.0 }, // I
    Color { r: 1.0,    g: 1.0,    b: 0.0,    a: 1.0 }, // O
    Color { r: 0.502,  g: 0.0,    b: 0.502,  a: 1.0 }, // T
    Color { r: 0.0,    g: 1.0,    b: 0.0,    a: 1.0 }, // S
    Color { r: 1.0,    g: 0.0,    b: 0.0,    a: 1.0 }, // Z
    Color { r: 0.0,    g: 0.0,    b: 1.0,    a: 1.0 }, // J
    Color { r: 1.0,    g: 0.647,  b: 0.0,    a: 1.0 }, // L
];

/// Pivot column a fresh piece spawns at (board width / 2, biased left).
pub const SPAWN_X: i32 = 4;
pub const SPAWN_Y: i32 = 0;

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::J,
        TetrominoType::L,
    ];

    pub fn rotations(self) -> &'static [Shape] {
        match self {
            TetrominoType::I => &I_ROTATIONS,
            TetrominoType::O => &O_ROTATIONS,
            TetrominoType::T => &T_ROTATIONS,
            TetrominoType::S => &S_ROTATIONS,
            TetrominoType::Z => &Z_ROTATIONS,
            TetrominoType::J => &J_ROTATIONS,
            TetrominoType::L => &L_ROTATIONS,
        }
    }

    pub fn rotation_count(self) -> usize {
        self.rotations().len()
    }

    /// Shape for a rotation index; the index wraps around the rotation count.
    pub fn shape(self, rotation: usize) -> &'static Shape {
        let rotations = self.rotations();
        &rotations[rotation % rotations.len()]
    }

    pub fn color(self) -> Color {
        NES_COLORS[self as usize]
    }
}

/// The falling piece. Created on spawn, dropped when it locks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivePiece {
    pub t_type: TetrominoType,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    pub fn spawn(t_type: TetrominoType) -> Self {
        ActivePiece {
            t_type,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn shape(&self) -> &'static Shape {
        self.t_type.shape(self.rotation)
    }

    pub fn color(&self) -> Color {
        self.t_type.color()
    }

    /// Absolute `(x, y)` board cells covered by the piece. Rows may be negative.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape().iter().map(move |&[dx, dy]| (self.x + dx, self.y + dy))
    }

    /// Rotation index after one clockwise step.
    pub fn next_rotation(&self) -> usize {
        (self.rotation + 1) % self.t_type.rotation_count()
    }
}
