//! Monotonic clocks

use std::time::Duration;

use crate::sim::TimeSource;

/// Native clock, measured from construction
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TimeSource for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Browser clock backed by `performance.now()`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

#[cfg(target_arch = "wasm32")]
impl PerformanceClock {
    pub fn new() -> Self {
        let performance = web_sys::window().and_then(|w| w.performance());
        if performance.is_none() {
            log::warn!("performance.now() unavailable, falling back to Date.now()");
        }
        Self { performance }
    }

    /// Convert a requestAnimationFrame timestamp (ms) to a `Duration`
    pub fn from_millis(ms: f64) -> Duration {
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }
}

#[cfg(target_arch = "wasm32")]
impl TimeSource for PerformanceClock {
    fn now(&self) -> Duration {
        let ms = match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        };
        Self::from_millis(ms)
    }
}
