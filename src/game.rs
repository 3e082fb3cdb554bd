//! The game-state engine: spawn, fall, lock, clear, respawn and game over.
//!
//! Everything here is synchronous and deterministic for a given RNG. The
//! engine talks to audio only through fire-and-forget [`AudioCue`]s.

use macroquad::logging::info;
use rand::rngs::StdRng;
use rand::Rng;

use crate::board::Board;
use crate::config::RulesConfig;
use crate::scoring::{fall_speed_for_level, level_for_lines, line_clear_points};
use crate::sound::{AudioCue, AudioNotifier, Effect};
use crate::tetromino::{ActivePiece, TetrominoType};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Falling,
    Paused,
    GameOver,
}

/// Player intents produced by the input mapper, one per key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    TogglePause,
    Restart,
    /// Handled by the main loop; the engine ignores it.
    Quit,
}

/// Read-only view handed to the renderer each frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub piece: Option<ActivePiece>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub fall_speed: f32,
    pub paused: bool,
    pub game_over: bool,
}

pub struct Game<R = StdRng> {
    board: Board,
    piece: Option<ActivePiece>,
    status: GameStatus,
    score: u32,
    lines: u32,
    level: u32,
    fall_speed: f32,
    fall_time: f32,
    rules: RulesConfig,
    rng: R,
    audio: Box<dyn AudioNotifier>,
}

impl<R: Rng> Game<R> {
    /// Starts a game on an empty board and cues the music.
    pub fn new(rules: RulesConfig, rng: R, audio: Box<dyn AudioNotifier>) -> Self {
        Self::with_board(rules, Board::new(), rng, audio)
    }

    /// Starts a game on a prepared board. Used for fixtures.
    pub fn with_board(rules: RulesConfig, board: Board, rng: R, audio: Box<dyn AudioNotifier>) -> Self {
        let mut game = Game {
            board,
            piece: None,
            status: GameStatus::Falling,
            score: 0,
            lines: 0,
            level: 0,
            fall_speed: rules.initial_fall_speed,
            fall_time: 0.0,
            rules,
            rng,
            audio,
        };
        if game.spawn() {
            game.audio.notify(AudioCue::StartMusic);
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_piece(&self) -> Option<ActivePiece> {
        self.piece
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    pub fn fall_time(&self) -> f32 {
        self.fall_time
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            piece: self.piece,
            score: self.score,
            lines: self.lines,
            level: self.level,
            fall_speed: self.fall_speed,
            paused: self.is_paused(),
            game_over: self.is_game_over(),
        }
    }

    /// Applies one intent, honoring the pause/game-over gating.
    /// Returns whether the intent changed anything.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match (self.status, intent) {
            (_, Intent::Quit) => false,
            (GameStatus::GameOver, Intent::Restart) => self.restart(),
            (GameStatus::GameOver, _) => false,
            (_, Intent::TogglePause) => self.toggle_pause(),
            (GameStatus::Paused, _) => false,
            (GameStatus::Falling, Intent::MoveLeft) => self.try_move(-1, 0),
            (GameStatus::Falling, Intent::MoveRight) => self.try_move(1, 0),
            (GameStatus::Falling, Intent::SoftDrop) => self.soft_drop(),
            (GameStatus::Falling, Intent::Rotate) => self.rotate(),
            (GameStatus::Falling, Intent::Restart) => false,
        }
    }

    /// Shifts the active piece if the target position is free.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.status != GameStatus::Falling {
            return false;
        }
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        if !self
            .board
            .is_valid_position(piece.t_type, piece.rotation, piece.x + dx, piece.y + dy)
        {
            return false;
        }
        piece.x += dx;
        piece.y += dy;
        true
    }

    /// One step down, worth `soft_drop_points` when it succeeds. Never locks.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.score = self.score.saturating_add(self.rules.soft_drop_points);
        }
        moved
    }

    /// Advances the rotation in place. No wall kicks: a blocked rotation is a no-op.
    pub fn rotate(&mut self) -> bool {
        if self.status != GameStatus::Falling {
            return false;
        }
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        let next = piece.next_rotation();
        if next == piece.rotation
            || !self.board.is_valid_position(piece.t_type, next, piece.x, piece.y)
        {
            return false;
        }
        piece.rotation = next;
        true
    }

    /// Gravity. Accumulates `dt` seconds and, once a full fall interval has
    /// passed, moves the piece down or locks it where it stands.
    pub fn tick(&mut self, dt: f32) {
        if self.status != GameStatus::Falling {
            return;
        }
        self.fall_time += dt;
        if self.fall_time < self.fall_speed {
            return;
        }
        self.fall_time = 0.0;
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
    }

    /// Pauses or resumes. Has no effect after game over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Falling => {
                self.status = GameStatus::Paused;
                self.audio.notify(AudioCue::StopMusic);
                self.audio.notify(AudioCue::PlayEffect(Effect::Pause));
                true
            }
            GameStatus::Paused => {
                self.status = GameStatus::Falling;
                self.audio.notify(AudioCue::StartMusic);
                true
            }
            GameStatus::GameOver => false,
        }
    }

    /// Starts over with an empty board. Only allowed after game over.
    pub fn restart(&mut self) -> bool {
        if self.status != GameStatus::GameOver {
            return false;
        }
        self.board = Board::new();
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.fall_speed = self.rules.initial_fall_speed;
        self.fall_time = 0.0;
        self.status = GameStatus::Falling;
        if self.spawn() {
            self.audio.notify(AudioCue::StartMusic);
        }
        true
    }

    /// Places a random piece at the spawn point, or ends the game when the
    /// spawn point is blocked.
    fn spawn(&mut self) -> bool {
        let t_type = TetrominoType::ALL[self.rng.random_range(0..TetrominoType::ALL.len())];
        let piece = ActivePiece::spawn(t_type);
        if !self
            .board
            .is_valid_position(piece.t_type, piece.rotation, piece.x, piece.y)
        {
            self.piece = None;
            self.status = GameStatus::GameOver;
            info!("game over: score {} lines {} level {}", self.score, self.lines, self.level);
            self.audio.notify(AudioCue::StopMusic);
            self.audio.notify(AudioCue::PlayEffect(Effect::GameOver));
            return false;
        }
        self.piece = Some(piece);
        true
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.piece.take() else {
            return;
        };
        self.board
            .lock_piece(piece.t_type, piece.rotation, piece.x, piece.y, piece.color());
        let cleared = self.board.clear_full_lines();
        if cleared > 0 {
            self.award_lines(cleared);
        }
        self.spawn();
    }

    fn award_lines(&mut self, cleared: u32) {
        self.audio.notify(AudioCue::PlayEffect(Effect::LineClear));
        self.score = self
            .score
            .saturating_add(line_clear_points(cleared, self.level));
        self.lines = self.lines.saturating_add(cleared);

        let level = level_for_lines(self.lines, &self.rules);
        if level > self.level {
            self.level = level;
            self.fall_speed = fall_speed_for_level(level, &self.rules);
            info!("level {} (fall speed {:.2}s)", level, self.fall_speed);
        }
    }
}
