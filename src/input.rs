//! Keyboard to [`Intent`] mapping. One intent per key-down, no auto-repeat.

use macroquad::prelude::{is_key_pressed, KeyCode};

use crate::game::Intent;

/// Key bindings in the order they are polled each frame.
pub const BINDINGS: [(KeyCode, Intent); 7] = [
    (KeyCode::Left, Intent::MoveLeft),
    (KeyCode::Right, Intent::MoveRight),
    (KeyCode::Down, Intent::SoftDrop),
    (KeyCode::Up, Intent::Rotate),
    (KeyCode::P, Intent::TogglePause),
    (KeyCode::R, Intent::Restart),
    (KeyCode::Escape, Intent::Quit),
];

/// Legend lines shown next to the board.
pub const CONTROLS: [&str; 6] = [
    "LEFT/RIGHT MOVE",
    "DOWN DROP",
    "UP ROTATE",
    "P PAUSE",
    "R RESTART",
    "ESC QUIT",
];

pub fn intent_for_key(key: KeyCode) -> Option<Intent> {
    BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|&(_, intent)| intent)
}

/// Intents for every bound key that went down this frame. Holding a key does
/// not repeat.
pub fn pressed_intents() -> Vec<Intent> {
    BINDINGS
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|&(_, intent)| intent)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_move_and_rotate() {
        assert_eq!(intent_for_key(KeyCode::Left), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key(KeyCode::Right), Some(Intent::MoveRight));
        assert_eq!(intent_for_key(KeyCode::Down), Some(Intent::SoftDrop));
        assert_eq!(intent_for_key(KeyCode::Up), Some(Intent::Rotate));
    }

    #[test]
    fn control_keys() {
        assert_eq!(intent_for_key(KeyCode::P), Some(Intent::TogglePause));
        assert_eq!(intent_for_key(KeyCode::R), Some(Intent::Restart));
        assert_eq!(intent_for_key(KeyCode::Escape), Some(Intent::Quit));
        assert_eq!(intent_for_key(KeyCode::Space), None);
    }

    #[test]
    fn each_intent_bound_once() {
        for (i, (_, a)) in BINDINGS.iter().enumerate() {
            assert!(BINDINGS[i + 1..].iter().all(|(_, b)| a != b));
        }
    }
}
