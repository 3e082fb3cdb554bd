//! Retro Tetris: a classic falling-block game.
//!
//! [`board`] and [`tetromino`] hold the playfield rules, [`game`] is the
//! engine. [`render`], [`input`] and [`sound`] are the macroquad and rodio
//! glue around it.

pub mod board;
pub mod config;
pub mod game;
pub mod input;
pub mod render;
pub mod scoring;
pub mod sound;
pub mod tetromino;
pub mod timestep;

pub use board::{Board, Cell, BOARD_HEIGHT, BOARD_WIDTH};
pub use config::{AudioBackend, AudioConfig, GameConfig, RulesConfig};
pub use game::{Game, GameStatus, Intent, Snapshot};
pub use sound::{AudioCue, AudioNotifier, Effect};
pub use tetromino::{ActivePiece, TetrominoType};
