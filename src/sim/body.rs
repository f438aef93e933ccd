//! The ball: a point mass with a radius

use serde::{Deserialize, Serialize};

use super::vector::Vector2;
use crate::consts::CONTACT_EPSILON;

/// Ball state, mutated in place every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vector2,
    pub vel: Vector2,
    /// Acceleration applied on the last tick (kept for the debug overlay)
    pub accel: Vector2,
    /// Collider radius, fixed at creation (half the sprite width)
    pub radius: i32,
    /// Share of vertical speed kept when bouncing off the floor
    pub restitution: f64,
}

impl Body {
    pub fn new(pos: Vector2, radius: i32, restitution: f64) -> Self {
        Self {
            pos,
            vel: Vector2::ZERO,
            accel: Vector2::ZERO,
            radius,
            restitution,
        }
    }

    #[inline]
    pub fn radius_f64(&self) -> f64 {
        f64::from(self.radius)
    }

    /// Put the ball back at `center` with zero velocity
    pub fn reset(&mut self, center: Vector2) {
        self.pos = center;
        self.vel = Vector2::ZERO;
    }

    /// True if the ball rests on or overlaps the floor
    pub fn floor_contact(&self, floor_level: f64) -> bool {
        self.pos.y + self.radius_f64() >= floor_level - CONTACT_EPSILON
    }

    /// Clamp onto the floor and bounce. Returns true on contact.
    pub fn resolve_floor_contact(&mut self, floor_level: f64) -> bool {
        if !self.floor_contact(floor_level) {
            return false;
        }
        self.pos.y = floor_level - self.radius_f64();
        self.vel.y *= -self.restitution;
        true
    }

    /// Push the ball back above the floor without touching its velocity
    pub fn clamp_to_floor(&mut self, floor_level: f64) -> bool {
        let limit = floor_level - self.radius_f64();
        if self.pos.y > limit {
            self.pos.y = limit;
            true
        } else {
            false
        }
    }

    /// Wrap around the left/right world edges. Only `pos.x` changes.
    pub fn wrap_horizontal(&mut self, world_width: f64, epsilon: f64) -> bool {
        let r = self.radius_f64();
        if self.pos.x > world_width + r + epsilon {
            self.pos.x = -r;
            true
        } else if self.pos.x < -r - epsilon {
            self.pos.x = world_width + r;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f64, y: f64) -> Body {
        Body::new(Vector2::new(x, y), 16, 0.3)
    }

    #[test]
    fn test_floor_contact() {
        assert!(!ball_at(320.0, 300.0).floor_contact(384.0));
        assert!(ball_at(320.0, 368.0).floor_contact(384.0));
        assert!(ball_at(320.0, 380.0).floor_contact(384.0));
    }

    #[test]
    fn test_resolve_floor_contact_flips_and_damps() {
        let mut ball = ball_at(320.0, 375.0);
        ball.vel = Vector2::new(12.0, 200.0);

        assert!(ball.resolve_floor_contact(384.0));
        assert_eq!(ball.pos.y, 368.0);
        assert!((ball.vel.y + 60.0).abs() < 1e-9);
        assert_eq!(ball.vel.x, 12.0);
    }

    #[test]
    fn test_resolve_floor_contact_in_air() {
        let mut ball = ball_at(320.0, 100.0);
        ball.vel = Vector2::new(0.0, 50.0);
        assert!(!ball.resolve_floor_contact(384.0));
        assert_eq!(ball.vel.y, 50.0);
        assert_eq!(ball.pos.y, 100.0);
    }

    #[test]
    fn test_reset() {
        let mut ball = ball_at(12.0, 360.0);
        ball.vel = Vector2::new(-300.0, 80.0);
        ball.reset(Vector2::new(320.0, 180.0));
        assert_eq!(ball.pos, Vector2::new(320.0, 180.0));
        assert_eq!(ball.vel, Vector2::ZERO);
        assert_eq!(ball.radius, 16);
    }

    #[test]
    fn test_wrap_right_edge() {
        let mut ball = ball_at(657.0, 200.0);
        ball.vel = Vector2::new(400.0, -10.0);
        assert!(ball.wrap_horizontal(640.0, 0.5));
        assert_eq!(ball.pos, Vector2::new(-16.0, 200.0));
        assert_eq!(ball.vel, Vector2::new(400.0, -10.0));
    }

    #[test]
    fn test_wrap_left_edge() {
        let mut ball = ball_at(-17.0, 200.0);
        assert!(ball.wrap_horizontal(640.0, 0.5));
        assert_eq!(ball.pos.x, 656.0);
    }

    #[test]
    fn test_wrap_within_tolerance() {
        let mut ball = ball_at(656.2, 200.0);
        assert!(!ball.wrap_horizontal(640.0, 0.5));
        assert_eq!(ball.pos.x, 656.2);
    }
}
