//! 2D half-plane type
//!
//! A [`Plane`] is an implicit line: `dot(normal, p) + constant` gives the
//! signed distance of `p` from the line. Planes annotate stroked vertices for
//! edge antialiasing and drive the half-plane containment tests used by
//! triangulation.

use serde::{Deserialize, Serialize};

use super::math::{Vec2, Vec2Ext};

/// An implicit 2D line / half-plane with a unit-length normal.
///
/// Positive signed distance lies on the side the normal points toward. For
/// [`Plane::from_points`], that is the left side when walking `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit-length plane normal
    pub normal: Vec2,
    /// Plane offset: `dot(normal, p) + constant` is the signed distance
    pub constant: f32,
}

impl Plane {
    /// Create a plane through two points.
    ///
    /// The normal is the unit CCW perpendicular of `b - a`, so points to the
    /// left of the directed segment measure positive. Coincident points yield
    /// the degenerate zero plane rather than dividing by zero.
    pub fn from_points(a: Vec2, b: Vec2) -> Self {
        let normal = (b - a).perp_ccw().normalize_or_zero();
        if normal == Vec2::zeros() {
            log::debug!("degenerate plane from coincident points {a:?}");
            return Self {
                normal,
                constant: 0.0,
            };
        }
        Self {
            normal,
            constant: -normal.dot(&a),
        }
    }

    /// Create a plane through a point with the given normal direction.
    ///
    /// The normal is normalized; a zero-length normal yields the zero plane.
    pub fn from_point_normal(point: Vec2, normal: Vec2) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            constant: -normal.dot(&point),
        }
    }

    /// Signed distance from the plane (positive on the normal's side)
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        self.normal.dot(&point) + self.constant
    }

    /// The same line with the normal reversed
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            constant: -self.constant,
        }
    }

    /// Reverse the normal in place
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.constant = -self.constant;
    }
}
