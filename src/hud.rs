//! Debug text overlay

use crate::sim::{BodySnapshot, HeldKeys, VectorExt};

pub const CONTROLS_HINT: &str = "Press [LEFT/RIGHT] to move, [SPACE] to jump, [R] to reset!";

/// Held keys as `[Left, Jump]`
pub fn format_keys(held: HeldKeys) -> String {
    let names: Vec<&str> = held.iter().map(|k| k.as_str()).collect();
    format!("[{}]", names.join(", "))
}

/// Multi-line overlay text for the current frame
pub fn overlay_text(snapshot: &BodySnapshot, held: HeldKeys) -> String {
    format!(
        "{}\n Ball Coords: {}\n Velocity: {}\n Accel: {}\n Control: {}\n Key pressed: {}",
        CONTROLS_HINT,
        snapshot.pos.describe(),
        snapshot.vel.describe(),
        snapshot.accel.describe(),
        snapshot.control.describe(),
        format_keys(held),
    )
}
