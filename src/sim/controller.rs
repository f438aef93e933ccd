//! Input-to-impulse mapping
//!
//! The controller never reads the keyboard itself. It asks an `InputSource`,
//! so live keyboards and scripted replays drive it the same way.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::state::WorldConfig;
use super::vector::Vector2;

/// Logical inputs the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Jump,
    Reset,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::MoveLeft, Key::MoveRight, Key::Jump, Key::Reset];

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Key::MoveLeft => 1 << 0,
            Key::MoveRight => 1 << 1,
            Key::Jump => 1 << 2,
            Key::Reset => 1 << 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::MoveLeft => "Left",
            Key::MoveRight => "Right",
            Key::Jump => "Jump",
            Key::Reset => "Reset",
        }
    }
}

/// "Is key K held this frame?"
pub trait InputSource {
    fn is_held(&self, key: Key) -> bool;
}

/// Set of currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub const NONE: HeldKeys = HeldKeys(0);

    pub fn of(keys: &[Key]) -> Self {
        let mut held = Self::NONE;
        for &key in keys {
            held.press(key);
        }
        held
    }

    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Held keys in a stable order
    pub fn iter(&self) -> impl Iterator<Item = Key> {
        let held = *self;
        Key::ALL.into_iter().filter(move |k| held.is_held(*k))
    }
}

impl InputSource for HeldKeys {
    #[inline]
    fn is_held(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }
}

/// Frame-indexed input replay
///
/// Each segment holds a key set for a number of frames; frames past the end
/// of the script have nothing held.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    segments: Vec<(u32, HeldKeys)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `frames` frames holding `keys`
    pub fn hold(mut self, keys: &[Key], frames: u32) -> Self {
        self.segments.push((frames, HeldKeys::of(keys)));
        self
    }

    /// Append `frames` frames with nothing held
    pub fn idle(self, frames: u32) -> Self {
        self.hold(&[], frames)
    }

    pub fn len(&self) -> u32 {
        self.segments.iter().map(|(n, _)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys_at(&self, frame: u32) -> HeldKeys {
        let mut start = 0;
        for &(frames, keys) in &self.segments {
            if frame < start + frames {
                return keys;
            }
            start += frames;
        }
        HeldKeys::NONE
    }
}

/// Result of sampling the controller for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlOutput {
    /// Velocity added on every tick of the frame
    pub vector: Vector2,
    /// A jump impulse was applied; audio should play the jump cue
    pub jump_cue: bool,
}

/// Turns held keys into the per-frame control vector
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerController {
    pub move_speed: f64,
    control_vector: Vector2,
}

impl PlayerController {
    pub fn new(move_speed: f64) -> Self {
        Self {
            move_speed,
            control_vector: Vector2::ZERO,
        }
    }

    /// Control vector from the most recent update
    pub fn control_vector(&self) -> Vector2 {
        self.control_vector
    }

    /// Recompute the control vector from this frame's input.
    ///
    /// Jump only fires while the ball touches the floor. Holding the key keeps
    /// firing on every grounded frame, which gives the arcade-style hop chain.
    pub fn update(
        &mut self,
        input: &impl InputSource,
        body: &Body,
        world: &WorldConfig,
    ) -> ControlOutput {
        let left = input.is_held(Key::MoveLeft);
        let right = input.is_held(Key::MoveRight);

        let x = match (left, right) {
            (true, false) => -self.move_speed,
            (false, true) => self.move_speed,
            _ => 0.0,
        };

        let jump = input.is_held(Key::Jump) && body.floor_contact(world.floor_level);
        let y = if jump { world.jump_impulse() } else { 0.0 };
        if jump {
            log::debug!("Jump impulse {:.1} at x={:.1}", y, body.pos.x);
        }

        self.control_vector = Vector2::new(x, y);
        ControlOutput {
            vector: self.control_vector,
            jump_cue: jump,
        }
    }
}
