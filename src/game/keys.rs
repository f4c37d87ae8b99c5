//! Keyboard input handling for the game.
//!
//! This module defines the [`GameKey`] enum for abstracting game actions from
//! physical keys, and [`KeyState`] for tracking which of them are held. It
//! also includes the mapping from winit key events to game actions.

use crate::game::movement::MovementInput;
use std::collections::HashSet;
use winit::keyboard;

/// All in-game actions that can be triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Move player forward (W or Up Arrow).
    MoveForward,
    /// Move player backward (S or Down Arrow).
    MoveBackward,
    /// Move player left (A or Left Arrow).
    MoveLeft,
    /// Move player right (D or Right Arrow).
    MoveRight,
    /// Escape key (toggle mouse capture).
    Escape,
    /// Quit the game (`).
    Quit,
}

/// Tracks the set of currently pressed game keys.
#[derive(Debug, Default)]
pub struct KeyState {
    /// Set of currently pressed keys.
    pub pressed_keys: HashSet<GameKey>,
}

impl KeyState {
    /// Creates a new, empty [`KeyState`]
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
        }
    }

    /// Marks a key as pressed.
    pub fn press_key(&mut self, key: GameKey) {
        self.pressed_keys.insert(key);
    }

    /// Marks a key as released.
    pub fn release_key(&mut self, key: GameKey) {
        self.pressed_keys.remove(&key);
    }

    /// Checks if a key is currently pressed.
    pub fn is_pressed(&self, key: GameKey) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Releases everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed_keys.clear();
    }

    /// Samples the four movement keys for this frame.
    pub fn movement_input(&self) -> MovementInput {
        MovementInput {
            forward: self.is_pressed(GameKey::MoveForward),
            backward: self.is_pressed(GameKey::MoveBackward),
            left: self.is_pressed(GameKey::MoveLeft),
            right: self.is_pressed(GameKey::MoveRight),
        }
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Converts a winit [`keyboard::Key`] to a [`GameKey`] if it maps to an action.
///
/// Supports named keys (arrows, escape) and character keys (WASD, backtick).
pub fn winit_key_to_game_key(key: &keyboard::Key) -> Option<GameKey> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            ArrowUp => GameKey::MoveForward,
            ArrowDown => GameKey::MoveBackward,
            ArrowLeft => GameKey::MoveLeft,
            ArrowRight => GameKey::MoveRight,
            Escape => GameKey::Escape,
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "w" => GameKey::MoveForward,
            "s" => GameKey::MoveBackward,
            "a" => GameKey::MoveLeft,
            "d" => GameKey::MoveRight,
            "`" => GameKey::Quit,
        }),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{Key, NamedKey, SmolStr};

    #[test]
    fn test_key_mapping() {
        let char_key = |s: &str| Key::Character(SmolStr::new(s));
        assert_eq!(winit_key_to_game_key(&char_key("W")), Some(GameKey::MoveForward));
        assert_eq!(winit_key_to_game_key(&char_key("a")), Some(GameKey::MoveLeft));
        assert_eq!(winit_key_to_game_key(&char_key("`")), Some(GameKey::Quit));
        assert_eq!(winit_key_to_game_key(&char_key("q")), None);
        assert_eq!(
            winit_key_to_game_key(&Key::Named(NamedKey::ArrowRight)),
            Some(GameKey::MoveRight)
        );
        assert_eq!(
            winit_key_to_game_key(&Key::Named(NamedKey::Escape)),
            Some(GameKey::Escape)
        );
        assert_eq!(winit_key_to_game_key(&Key::Named(NamedKey::Shift)), None);
    }

    #[test]
    fn test_movement_input() {
        let mut keys = KeyState::new();
        keys.press_key(GameKey::MoveForward);
        keys.press_key(GameKey::MoveLeft);
        keys.press_key(GameKey::MoveLeft);
        let input = keys.movement_input();
        assert!(input.forward && input.left && !input.right && !input.backward);

        keys.release_key(GameKey::MoveLeft);
        assert!(!keys.movement_input().left);
        keys.clear();
        assert_eq!(keys.movement_input(), MovementInput::default());
    }
}
