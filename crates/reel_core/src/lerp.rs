//! Interpolation primitives
//!
//! `t` is deliberately left unclamped: easing curves such as `Back` or
//! `Elastic` produce values outside 0..=1 and the overshoot must reach the
//! interpolated value.

use crate::geometry::{Color, Vec2};

/// Linear blend of two scalars
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Values that can be linearly blended toward another value of the same type
pub trait Lerp {
    fn lerp(&self, end: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, end: &Self, t: f32) -> Self {
        lerp(*self, *end, t)
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp(&self, end: &Self, t: f32) -> Self {
        Vec2::new(lerp(self.x, end.x, t), lerp(self.y, end.y, t))
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp(&self, end: &Self, t: f32) -> Self {
        Color::rgba(
            lerp(self.r, end.r, t),
            lerp(self.g, end.g, t),
            lerp(self.b, end.b, t),
            lerp(self.a, end.a, t),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_overshoot_is_not_clamped() {
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_eq!(lerp(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn test_vec2_componentwise() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(400.0, 200.0);
        assert_eq!(a.lerp(&b, 0.5), Vec2::new(250.0, 150.0));
    }

    #[test]
    fn test_color_componentwise() {
        let a = Color::rgba(0.0, 0.0, 0.0, 1.0);
        let b = Color::rgba(1.0, 0.5, 0.0, 0.0);
        assert_eq!(a.lerp(&b, 0.5), Color::rgba(0.5, 0.25, 0.0, 0.5));
    }
}
