//! Fixed timestep simulation tick
//!
//! Advances the ball by one step. Pure and deterministic: the same body,
//! control vector and `dt` always produce the same result.

use super::body::Body;
use super::state::WorldConfig;
use super::vector::{Vector2, VectorExt};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Ball was on the floor at the start of the tick
    pub contact: bool,
    /// Downward speed absorbed by the bounce (0 without contact)
    pub impact_speed: f64,
    /// Ball wrapped around a side edge
    pub wrapped: bool,
}

/// Advance the ball by one fixed timestep
///
/// `control` is added to the velocity as-is (not scaled by `dt`), once per
/// tick, so it acts as an impulse rather than a force.
pub fn tick(body: &mut Body, control: Vector2, world: &WorldConfig, dt: f64) -> TickReport {
    let incoming = body.vel.y;
    let contact = body.resolve_floor_contact(world.floor_level);

    // Gravity is set fresh each tick, never accumulated
    body.accel = world.gravity_accel();

    body.vel.add_in_place(body.accel.scaled(dt));
    body.vel.add_in_place(control);
    body.vel.x *= world.horizontal_damping;

    body.pos.add_in_place(body.vel.scaled(dt));
    body.clamp_to_floor(world.floor_level);

    let wrapped = body.wrap_horizontal(world.width, world.wrap_epsilon);

    TickReport {
        contact,
        impact_speed: if contact { incoming.max(0.0) } else { 0.0 },
        wrapped,
    }
}
