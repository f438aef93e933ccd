//! Fixed timestep accumulator
//!
//! Decouples the render frame rate from the simulation rate. Timestamps are
//! `Duration`s since an arbitrary monotonic origin chosen by the time source.

use std::time::Duration;

/// Monotonic time, sampled once per frame
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Hand-driven clock for tests and headless replays
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Accumulates real time and hands it out in fixed steps
#[derive(Debug, Clone)]
pub struct PhysicsClock {
    last_time: Duration,
    accumulator: Duration,
    fixed_step: Duration,
    max_frame_delta: Duration,
}

impl PhysicsClock {
    /// Start the clock at `now` so the first frame sees only its own delta
    pub fn new(now: Duration, fixed_step: Duration, max_frame_delta: Duration) -> Self {
        Self {
            last_time: now,
            accumulator: Duration::ZERO,
            fixed_step,
            max_frame_delta,
        }
    }

    pub fn fixed_step(&self) -> Duration {
        self.fixed_step
    }

    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Feed the time since the last frame and return how many fixed steps
    /// to simulate. Leaves `0 <= accumulator < fixed_step`.
    pub fn advance(&mut self, now: Duration) -> u32 {
        // Time going backwards counts as no time
        let mut delta = now.saturating_sub(self.last_time);
        self.last_time = now;

        if delta > self.max_frame_delta {
            log::warn!(
                "Frame took {:.1} ms, clamping to {:.1} ms",
                delta.as_secs_f64() * 1000.0,
                self.max_frame_delta.as_secs_f64() * 1000.0
            );
            delta = self.max_frame_delta;
        }
        self.accumulator += delta;

        if self.fixed_step.is_zero() {
            return 0;
        }

        let mut steps = 0;
        while self.accumulator >= self.fixed_step {
            self.accumulator -= self.fixed_step;
            steps += 1;
        }
        steps
    }
}
