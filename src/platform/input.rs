//! Keyboard mapping
//!
//! Key presses set held state, releases clear it. The simulation only ever
//! sees the resulting [`TickInput`].

use crate::sim::TickInput;

/// What a key does in this game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    MoveLeft,
    MoveRight,
    /// Start a session from the start screen
    Start,
}

impl KeyAction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(KeyAction::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(KeyAction::MoveRight),
            "Enter" => Some(KeyAction::Start),
            _ => None,
        }
    }
}

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Record a key press, returning the action it maps to
    pub fn key_down(&mut self, key: &str) -> Option<KeyAction> {
        let action = KeyAction::from_key(key)?;
        match action {
            KeyAction::MoveLeft => self.left = true,
            KeyAction::MoveRight => self.right = true,
            KeyAction::Start => {}
        }
        Some(action)
    }

    pub fn key_up(&mut self, key: &str) {
        match KeyAction::from_key(key) {
            Some(KeyAction::MoveLeft) => self.left = false,
            Some(KeyAction::MoveRight) => self.right = false,
            _ => {}
        }
    }

    /// Drop all held keys (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = KeyState::default();
        assert_eq!(keys.key_down("ArrowLeft"), Some(KeyAction::MoveLeft));
        assert!(keys.tick_input().left);

        keys.key_down("ArrowRight");
        keys.key_up("ArrowLeft");
        assert_eq!(
            keys.tick_input(),
            TickInput {
                left: false,
                right: true
            }
        );
    }

    #[test]
    fn test_enter_does_not_move() {
        let mut keys = KeyState::default();
        assert_eq!(keys.key_down("Enter"), Some(KeyAction::Start));
        assert_eq!(keys, KeyState::default());
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut keys = KeyState::default();
        assert_eq!(keys.key_down("Escape"), None);
        keys.key_up("Escape");
        assert_eq!(keys, KeyState::default());
    }

    #[test]
    fn test_clear() {
        let mut keys = KeyState::default();
        keys.key_down("a");
        keys.key_down("d");
        keys.clear();
        assert_eq!(keys.tick_input(), TickInput::default());
    }
}
