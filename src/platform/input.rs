//! Keyboard input handling

use crate::sim::{HeldKeys, InputSource, Key};

/// Map a DOM `KeyboardEvent.key` value to a logical key
pub fn key_from_name(name: &str) -> Option<Key> {
    match name {
        "ArrowLeft" | "a" | "A" => Some(Key::MoveLeft),
        "ArrowRight" | "d" | "D" => Some(Key::MoveRight),
        " " | "Spacebar" | "ArrowUp" | "w" | "W" => Some(Key::Jump),
        "r" | "R" => Some(Key::Reset),
        _ => None,
    }
}

/// Held keys, tracked from key-down/key-up events
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardState {
    held: HeldKeys,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key down event. Returns true if the key is one we use.
    pub fn key_down(&mut self, name: &str) -> bool {
        match key_from_name(name) {
            Some(key) => {
                self.held.press(key);
                true
            }
            None => false,
        }
    }

    /// Handle key up event. Returns true if the key is one we use.
    pub fn key_up(&mut self, name: &str) -> bool {
        match key_from_name(name) {
            Some(key) => {
                self.held.release(key);
                true
            }
            None => false,
        }
    }

    /// Drop everything (window lost focus, key-ups will never arrive)
    pub fn release_all(&mut self) {
        self.held = HeldKeys::NONE;
    }

    pub fn held(&self) -> HeldKeys {
        self.held
    }
}

impl InputSource for KeyboardState {
    fn is_held(&self, key: Key) -> bool {
        self.held.is_held(key)
    }
}
