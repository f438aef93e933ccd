//! 2D vector helpers
//!
//! `Vector2` is glam's double-precision vector. The extension trait adds the
//! in-place operations the simulation is written against.

use glam::DVec2;

/// Double-precision 2D vector used throughout the simulation
pub type Vector2 = DVec2;

/// In-place vector operations
pub trait VectorExt {
    /// Add `other` component-wise into `self`
    fn add_in_place(&mut self, other: Vector2);
    /// Copy of `self` scaled by `k`
    fn scaled(&self, k: f64) -> Vector2;
    /// Euclidean norm
    fn len(&self) -> f64;
    /// Scale `self` to unit length. Zero-length vectors are left untouched.
    fn normalize_in_place(&mut self);
    /// Debug string, e.g. `[x: 1.00, y: 2.00]`
    fn describe(&self) -> String;
}

impl VectorExt for DVec2 {
    #[inline]
    fn add_in_place(&mut self, other: Vector2) {
        *self += other;
    }

    #[inline]
    fn scaled(&self, k: f64) -> Vector2 {
        *self * k
    }

    #[inline]
    fn len(&self) -> f64 {
        self.length()
    }

    fn normalize_in_place(&mut self) {
        let len = self.length();
        if len > 0.0 {
            *self /= len;
        }
    }

    fn describe(&self) -> String {
        format!("[x: {:.2}, y: {:.2}]", self.x, self.y)
    }
}
