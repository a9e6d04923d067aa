//! 2-D point/displacement type.
//!
//! `glam::Vec2` already provides the value algebra (`+`, `-`, `* f32`,
//! `length`, `lerp`). This module adds the few in-place helpers the particle
//! code leans on.

pub use glam::Vec2 as Vector2;

pub trait Vector2Ext {
    /// Move `self` a fraction `t` of the way towards `other`.
    fn lerp_to(&mut self, other: Vector2, t: f32) -> &mut Self;
    /// Unit vector in the same direction; the zero vector stays zero.
    fn normalized(self) -> Vector2;
    /// Heading in radians, `atan2(y, x)`.
    fn heading(self) -> f32;
}

impl Vector2Ext for Vector2 {
    #[inline]
    fn lerp_to(&mut self, other: Vector2, t: f32) -> &mut Self {
        *self += (other - *self) * t;
        self
    }

    #[inline]
    fn normalized(self) -> Vector2 {
        let len = self.length();
        if len > 0.0 {
            self / len
        } else {
            self
        }
    }

    #[inline]
    fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }
}

/// Displacement from `b` to `a`.
#[inline]
pub fn sub(a: Vector2, b: Vector2) -> Vector2 {
    a - b
}

/// Unit vector at `angle` radians, scaled by `speed`.
#[inline]
pub fn from_angle(angle: f32, speed: f32) -> Vector2 {
    Vector2::new(angle.cos(), angle.sin()) * speed
}
