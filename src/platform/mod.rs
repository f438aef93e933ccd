//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic clock per platform)
//! - Input events (key names to logical keys)

pub mod input;
pub mod time;

pub use input::{KeyboardState, key_from_name};
#[cfg(not(target_arch = "wasm32"))]
pub use time::SystemClock;
#[cfg(target_arch = "wasm32")]
pub use time::PerformanceClock;
