//! Kolobok - a bouncing, jumping ball
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fixed-step physics, input mapping, frame loop)
//! - `renderer`: WebGPU rendering pipeline and scene geometry
//! - `platform`: Browser/native input and clock adapters
//! - `settings`: Tunable physics/audio/quality configuration
//! - `audio`: Jump cue gating and Web Audio synthesis

pub mod audio;
pub mod error;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::StartupError;
pub use settings::{PhysicsSettings, QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Window size in screen pixels
    pub const SCREEN_WIDTH: f64 = 1280.0;
    pub const SCREEN_HEIGHT: f64 = 720.0;
    /// World units per screen pixel
    pub const GLOBAL_SCALE: f64 = 0.5;

    /// World dimensions
    pub const WORLD_WIDTH: f64 = SCREEN_WIDTH * GLOBAL_SCALE;
    pub const WORLD_HEIGHT: f64 = SCREEN_HEIGHT * GLOBAL_SCALE;
    /// Share of the world height taken by the ground
    pub const FLOOR_RATIO: f64 = 0.2;

    /// Fixed simulation rate (60 Hz)
    pub const PHYSICS_HZ: f64 = 60.0;
    /// Longest frame delta fed to the accumulator (spiral of death guard)
    pub const MAX_FRAME_DELTA: f64 = 0.25;

    /// Gravity magnitude, multiplied by FORCE_SCALE to get px/s²
    pub const GRAVITY: f64 = 9.8;
    pub const FORCE_SCALE: f64 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 16;
    /// Vertical velocity kept (and flipped) on floor contact
    pub const BALL_RESTITUTION: f64 = 0.3;
    /// Horizontal velocity kept per tick
    pub const HORIZONTAL_DAMPING: f64 = 0.8;

    /// Player horizontal control speed
    pub const MOVE_SPEED: f64 = 150.0;

    /// Tolerance for floor contact and edge wrapping
    pub const CONTACT_EPSILON: f64 = 1e-6;
    pub const WRAP_EPSILON: f64 = 0.5;
}
