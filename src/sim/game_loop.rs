//! Per-frame orchestration
//!
//! Order within a frame: sample controller, apply reset, drain the physics
//! clock one fixed tick at a time, then expose a snapshot for rendering.

use std::time::Duration;

use super::clock::PhysicsClock;
use super::controller::{InputSource, Key};
use super::state::{BodySnapshot, GameEvent, GameState, WorldConfig};
use super::tick::tick;

/// Downward speed below which a floor contact is resting, not a bounce
const BOUNCE_EVENT_MIN_SPEED: f64 = 50.0;

/// Summary of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Fixed ticks simulated this frame
    pub ticks: u32,
    /// Audio should play the jump cue
    pub jump_cue: bool,
    /// Ball was reset before ticking
    pub reset: bool,
}

/// Owns the world, the simulation state and the physics clock
#[derive(Debug, Clone)]
pub struct GameLoop {
    world: WorldConfig,
    state: GameState,
    clock: PhysicsClock,
}

impl GameLoop {
    /// Create the loop with the clock started at `now`
    pub fn new(world: WorldConfig, now: Duration) -> Self {
        Self {
            state: GameState::new(&world),
            clock: PhysicsClock::new(now, world.fixed_step, world.max_frame_delta),
            world,
        }
    }

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &PhysicsClock {
        &self.clock
    }

    /// Events from the last frame
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn snapshot(&self) -> BodySnapshot {
        self.state.snapshot(&self.world)
    }

    /// Put the ball back at the world center with zero velocity
    pub fn reset(&mut self) {
        self.state.body.reset(self.world.center());
        self.state.events.push(GameEvent::Reset);
        log::info!("Ball reset to {:?}", self.world.center());
    }

    /// Run one render frame at monotonic time `now`
    pub fn frame(&mut self, input: &impl InputSource, now: Duration) -> FrameReport {
        self.state.events.clear();

        // Jump decision uses the contact state left by the previous tick
        let mut control = self
            .state
            .controller
            .update(input, &self.state.body, &self.world);

        let reset = input.is_held(Key::Reset);
        if reset {
            self.reset();
        }

        let ticks = self.clock.advance(now);

        // The impulse only lands if a tick runs this frame
        control.jump_cue &= ticks > 0;
        if control.jump_cue {
            self.state.events.push(GameEvent::Jump);
        }
        self.state.control = control;
        self.run_ticks(ticks);

        FrameReport {
            ticks,
            jump_cue: control.jump_cue,
            reset,
        }
    }

    /// Simulate `count` fixed ticks with the current control vector
    pub fn run_ticks(&mut self, count: u32) {
        let dt = self.world.dt();
        for _ in 0..count {
            let report = tick(&mut self.state.body, self.state.control.vector, &self.world, dt);
            self.state.time_ticks += 1;

            if report.contact && report.impact_speed >= BOUNCE_EVENT_MIN_SPEED {
                log::debug!(
                    "Bounce at tick {}: {:.1} -> {:.1}",
                    self.state.time_ticks,
                    report.impact_speed,
                    self.state.body.vel.y
                );
                self.state.events.push(GameEvent::Bounce {
                    speed: report.impact_speed,
                });
            }
            if report.wrapped {
                self.state.events.push(GameEvent::Wrapped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::controller::HeldKeys;
    use crate::sim::vector::Vector2;

    fn frame_dt() -> Duration {
        Duration::from_millis(17)
    }

    #[test]
    fn test_first_frame_at_start_time_runs_nothing() {
        let start = Duration::from_secs(42);
        let mut game = GameLoop::new(WorldConfig::default(), start);
        let report = game.frame(&HeldKeys::NONE, start);
        assert_eq!(report.ticks, 0);
        assert_eq!(game.snapshot().pos, game.world().center());
    }

    #[test]
    fn test_frame_drains_clock() {
        let mut game = GameLoop::new(WorldConfig::default(), Duration::ZERO);
        let report = game.frame(&HeldKeys::NONE, Duration::from_millis(60));
        assert_eq!(report.ticks, 3);
        assert_eq!(game.state().time_ticks, 3);
        assert!(game.clock().accumulator() < game.world().fixed_step);
        assert!(game.snapshot().pos.y > game.world().center().y);
    }

    #[test]
    fn test_reset_before_ticks() {
        let mut game = GameLoop::new(WorldConfig::default(), Duration::ZERO);
        let mut now = Duration::ZERO;
        for _ in 0..60 {
            now += frame_dt();
            game.frame(&HeldKeys::of(&[Key::MoveRight]), now);
        }
        assert_ne!(game.snapshot().pos, game.world().center());

        // Zero-delta frame: reset applies, no tick moves the ball afterwards
        let report = game.frame(&HeldKeys::of(&[Key::Reset]), now);
        assert!(report.reset);
        assert_eq!(report.ticks, 0);
        assert_eq!(game.snapshot().pos, game.world().center());
        assert_eq!(game.snapshot().vel, Vector2::ZERO);
        assert!(game.events().contains(&GameEvent::Reset));
    }

    #[test]
    fn test_reset_then_tick_starts_from_center() {
        let world = WorldConfig::default();
        let mut game = GameLoop::new(world, Duration::ZERO);
        game.frame(&HeldKeys::NONE, Duration::from_millis(200));

        let report = game.frame(
            &HeldKeys::of(&[Key::Reset]),
            Duration::from_millis(200) + world.fixed_step,
        );
        assert!(report.ticks >= 1);

        let mut expected = world.spawn_body();
        for _ in 0..report.ticks {
            tick(&mut expected, Vector2::ZERO, &world, world.dt());
        }
        assert_eq!(game.state().body.pos, expected.pos);
        assert_eq!(game.state().body.vel, expected.vel);
    }

    #[test]
    fn test_jump_after_landing() {
        let mut game = GameLoop::new(WorldConfig::default(), Duration::ZERO);
        let mut now = Duration::ZERO;
        for _ in 0..120 {
            now += frame_dt();
            game.frame(&HeldKeys::NONE, now);
        }
        assert!(game.snapshot().on_floor);

        now += frame_dt();
        let report = game.frame(&HeldKeys::of(&[Key::Jump]), now);
        assert!(report.jump_cue);
        assert!(game.events().contains(&GameEvent::Jump));
        assert!(game.snapshot().vel.y < 0.0);
        assert!(!game.snapshot().on_floor);

        // Airborne: holding jump does nothing
        now += frame_dt();
        let report = game.frame(&HeldKeys::of(&[Key::Jump]), now);
        assert!(!report.jump_cue);
    }

    #[test]
    fn test_jump_cue_needs_a_tick() {
        let mut game = GameLoop::new(WorldConfig::default(), Duration::ZERO);
        let mut now = Duration::ZERO;
        for _ in 0..120 {
            now += frame_dt();
            game.frame(&HeldKeys::NONE, now);
        }
        assert!(game.snapshot().on_floor);
        let vel_before = game.snapshot().vel;

        // Same timestamp: no tick, so no impulse and no cue
        let report = game.frame(&HeldKeys::of(&[Key::Jump]), now);
        assert_eq!(report.ticks, 0);
        assert!(!report.jump_cue);
        assert!(!game.events().contains(&GameEvent::Jump));
        assert_eq!(game.snapshot().vel, vel_before);

        // Released before the next tick: still nothing
        now += frame_dt();
        let report = game.frame(&HeldKeys::NONE, now);
        assert!(!report.jump_cue);
        assert!(game.snapshot().vel.y >= 0.0);
        assert!(game.snapshot().on_floor);

        // Held across a tick: cue and impulse together
        now += frame_dt();
        let report = game.frame(&HeldKeys::of(&[Key::Jump]), now);
        assert!(report.ticks > 0);
        assert!(report.jump_cue);
        assert!(game.snapshot().vel.y < 0.0);
    }

    #[test]
    fn test_landing_emits_bounce() {
        let mut game = GameLoop::new(WorldConfig::default(), Duration::ZERO);
        let mut now = Duration::ZERO;
        let mut bounced = false;
        for _ in 0..120 {
            now += frame_dt();
            game.frame(&HeldKeys::NONE, now);
            bounced |= game
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::Bounce { .. }));
        }
        assert!(bounced);
    }
}
