//! Math utilities and types
//!
//! Provides the fundamental 2D math types for path authoring, tessellation,
//! and collision. Everything is `f32` so tessellated buffers can be handed to
//! a rendering backend without conversion.

pub use nalgebra::{Matrix3, Point2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 matrix type (homogeneous 2D affine)
pub type Mat3 = Matrix3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Extension trait for [`Vec2`] with the 2D-specific operations nalgebra
/// does not provide directly.
///
/// Copy-returning methods never mutate their receiver; the `*_mut` family
/// mutates in place and is the explicit replacement for call-site aliasing
/// conventions. Degenerate inputs (zero-length vectors) produce the zero
/// vector, never a division by zero.
pub trait Vec2Ext {
    /// 2D cross product (z component of the 3D cross product)
    fn cross2(&self, other: &Vec2) -> f32;

    /// Rotate 90 degrees counter-clockwise.
    ///
    /// Named to stay clear of nalgebra's inherent `Vector2::perp`, which is
    /// the 2D cross product and would shadow a trait method of the same name.
    fn perp_ccw(&self) -> Vec2;

    /// Rotate 90 degrees counter-clockwise in place
    fn perp_ccw_mut(&mut self);

    /// Distance to another point
    fn distance_to(&self, other: &Vec2) -> f32;

    /// Unit vector in the same direction, or zero for a zero-length input
    fn normalize_or_zero(&self) -> Vec2;

    /// Normalize in place; zero-length input becomes the zero vector
    fn normalize_or_zero_mut(&mut self);

    /// Rotate by an angle in radians (counter-clockwise)
    fn rotate_by(&self, angle: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    fn cross2(&self, other: &Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    fn perp_ccw(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    fn perp_ccw_mut(&mut self) {
        let x = self.x;
        self.x = -self.y;
        self.y = x;
    }

    fn distance_to(&self, other: &Vec2) -> f32 {
        (self - other).norm()
    }

    fn normalize_or_zero(&self) -> Vec2 {
        self.try_normalize(f32::EPSILON).unwrap_or_else(Vec2::zeros)
    }

    fn normalize_or_zero_mut(&mut self) {
        *self = self.normalize_or_zero();
    }

    fn rotate_by(&self, angle: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

/// Unit vector for a heading angle in radians
pub fn heading(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos, sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_cross2_sign() {
        let x = Vec2::new(1.0, 0.0);
        let y = Vec2::new(0.0, 1.0);
        assert_relative_eq!(x.cross2(&y), 1.0, epsilon = EPSILON);
        assert_relative_eq!(y.cross2(&x), -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_perp_ccw_is_ccw() {
        let v = Vec2::new(1.0, 0.0);
        let p = v.perp_ccw();
        assert_relative_eq!(p.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(p.y, 1.0, epsilon = EPSILON);
        // Two quarter turns reverse the vector
        assert_relative_eq!(p.perp_ccw().x, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_perp_ccw_does_not_shadow_inherent_perp() {
        // nalgebra's own `perp` is the 2D cross product and must stay
        // reachable alongside the trait method
        let x = Vec2::new(1.0, 0.0);
        let y = Vec2::new(0.0, 1.0);
        assert_relative_eq!(x.perp(&y), 1.0, epsilon = EPSILON);
        assert_relative_eq!(x.perp_ccw(), y, epsilon = EPSILON);
    }

    #[test]
    fn test_perp_ccw_mut_matches_perp_ccw() {
        let v = Vec2::new(3.0, -2.0);
        let mut m = v;
        m.perp_ccw_mut();
        assert_relative_eq!(m, v.perp_ccw(), epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_or_zero_degenerate() {
        let zero = Vec2::zeros();
        assert_eq!(zero.normalize_or_zero(), Vec2::zeros());
        let v = Vec2::new(3.0, 4.0);
        assert_relative_eq!(v.normalize_or_zero().norm(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_by_quarter_turn() {
        let v = Vec2::new(1.0, 0.0);
        let r = v.rotate_by(constants::HALF_PI);
        assert_relative_eq!(r.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(r.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_heading() {
        let h = heading(0.0);
        assert_relative_eq!(h, Vec2::new(1.0, 0.0), epsilon = EPSILON);
        let up = heading(constants::HALF_PI);
        assert_relative_eq!(up.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_lerp() {
        assert_relative_eq!(utils::lerp(2.0, 4.0, 0.5), 3.0, epsilon = EPSILON);
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
    }
}
