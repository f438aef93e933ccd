//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Input arrives through `InputSource`, time through plain `Duration`s
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod controller;
pub mod game_loop;
pub mod state;
pub mod tick;
pub mod vector;

pub use body::Body;
pub use clock::{ManualClock, PhysicsClock, TimeSource};
pub use controller::{ControlOutput, HeldKeys, InputSource, Key, PlayerController, ScriptedInput};
pub use game_loop::{FrameReport, GameLoop};
pub use state::{BodySnapshot, GameEvent, GameState, WorldConfig};
pub use tick::{TickReport, tick};
pub use vector::{Vector2, VectorExt};
