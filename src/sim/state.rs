//! World configuration and the single owned simulation state

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::controller::{ControlOutput, PlayerController};
use super::vector::Vector2;
use crate::consts::*;

/// Immutable world constants the simulation runs against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    /// Y coordinate of the floor surface (y grows downward)
    pub floor_level: f64,
    pub gravity: f64,
    pub force_scale: f64,
    /// Simulation step length
    pub fixed_step: Duration,
    /// Largest frame delta fed to the accumulator
    pub max_frame_delta: Duration,
    pub move_speed: f64,
    pub ball_radius: i32,
    pub restitution: f64,
    /// Horizontal velocity kept per tick
    pub horizontal_damping: f64,
    pub wrap_epsilon: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::with_dimensions(WORLD_WIDTH, WORLD_HEIGHT, FLOOR_RATIO)
    }
}

impl WorldConfig {
    /// Default physics in a world of the given size
    pub fn with_dimensions(width: f64, height: f64, floor_ratio: f64) -> Self {
        Self {
            width,
            height,
            floor_level: height - floor_ratio * height,
            gravity: GRAVITY,
            force_scale: FORCE_SCALE,
            fixed_step: Duration::from_secs_f64(1.0 / PHYSICS_HZ),
            max_frame_delta: Duration::from_secs_f64(MAX_FRAME_DELTA),
            move_speed: MOVE_SPEED,
            ball_radius: BALL_RADIUS,
            restitution: BALL_RESTITUTION,
            horizontal_damping: HORIZONTAL_DAMPING,
            wrap_epsilon: WRAP_EPSILON,
        }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Step length in seconds
    #[inline]
    pub fn dt(&self) -> f64 {
        self.fixed_step.as_secs_f64()
    }

    /// Constant downward acceleration
    pub fn gravity_accel(&self) -> Vector2 {
        Vector2::new(0.0, self.gravity * self.force_scale)
    }

    /// Vertical velocity added by a jump (negative is up)
    pub fn jump_impulse(&self) -> f64 {
        -(0.5 * self.gravity * self.force_scale)
    }

    /// Fresh ball at the world center
    pub fn spawn_body(&self) -> Body {
        Body::new(self.center(), self.ball_radius, self.restitution)
    }
}

/// Things that happened during a frame, consumed by audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Jump impulse applied this frame
    Jump,
    /// Ball hit the floor with the given downward speed
    Bounce { speed: f64 },
    /// Ball left one side of the world and came back on the other
    Wrapped,
    /// Ball put back at the world center
    Reset,
}

/// Read-only copy of the ball handed to the renderer and overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub pos: Vector2,
    pub vel: Vector2,
    pub accel: Vector2,
    pub control: Vector2,
    pub radius: i32,
    pub on_floor: bool,
    pub tick: u64,
}

/// Complete simulation state, owned by the frame loop
#[derive(Debug, Clone)]
pub struct GameState {
    pub body: Body,
    pub controller: PlayerController,
    /// Control output sampled at the start of the current frame
    pub control: ControlOutput,
    /// Fixed ticks simulated so far
    pub time_ticks: u64,
    /// Events produced by the last frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(world: &WorldConfig) -> Self {
        Self {
            body: world.spawn_body(),
            controller: PlayerController::new(world.move_speed),
            control: ControlOutput::default(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn snapshot(&self, world: &WorldConfig) -> BodySnapshot {
        BodySnapshot {
            pos: self.body.pos,
            vel: self.body.vel,
            accel: self.body.accel,
            control: self.control.vector,
            radius: self.body.radius,
            on_floor: self.body.floor_contact(world.floor_level),
            tick: self.time_ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_world() {
        let world = WorldConfig::default();
        assert_eq!(world.width, 640.0);
        assert_eq!(world.height, 360.0);
        assert!((world.floor_level - 288.0).abs() < 1e-9);
        assert_eq!(world.center(), Vector2::new(320.0, 180.0));
    }

    #[test]
    fn test_floor_level_from_ratio() {
        let world = WorldConfig::with_dimensions(640.0, 480.0, 0.2);
        assert!((world.floor_level - 384.0).abs() < 1e-9);
    }

    #[test]
    fn test_forces() {
        let world = WorldConfig::default();
        assert!((world.gravity_accel().y - 980.0).abs() < 1e-9);
        assert!((world.jump_impulse() + 490.0).abs() < 1e-9);
        assert!((world.dt() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_new_state_spawns_centered() {
        let world = WorldConfig::default();
        let state = GameState::new(&world);
        assert_eq!(state.body.pos, world.center());
        assert_eq!(state.body.vel, Vector2::ZERO);
        assert_eq!(state.body.radius, BALL_RADIUS);

        let snap = state.snapshot(&world);
        assert!(!snap.on_floor);
        assert_eq!(snap.tick, 0);
    }
}
