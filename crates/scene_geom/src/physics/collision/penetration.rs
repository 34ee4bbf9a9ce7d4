//! Penetration kernels
//!
//! Two branch-heavy, allocation-free primitives underlie every composite
//! collision query: the point/point test and the segment side test. Both work
//! on thickness-padded features (circles and capsules) and return resolution
//! vectors that push the first argument out of contact.

use crate::foundation::math::{utils::lerp, Vec2, Vec2Ext};

const EPSILON: f32 = 1e-6;

/// One per-feature contact collected by `get_penetration` when the caller
/// supplies an output list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Resolution vector pushing the source geometry out of contact
    pub penetration: Vec2,
    /// Vertex index of the contact anchor in the source geometry
    pub source: usize,
    /// Vertex index of the contact anchor in the target geometry
    pub target: usize,
}

/// Where along the segment the side test resolved its contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRegion {
    /// Clamped to the segment start (or the segment is degenerate)
    Start,
    /// Perpendicular contact between the endpoints
    Interior,
    /// Clamped to the segment end
    End,
}

/// Result of the segment side test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideResult {
    /// Resolution vector pushing the point out of the segment's capsule,
    /// zero when there is no contact
    pub penetration: Vec2,
    /// True when the point lies fully beyond the segment's outward
    /// (right-hand) side, thickness included. Polygon tests use this to
    /// short-circuit: a point only penetrates a convex CCW polygon when it
    /// fails the outward test for every edge.
    pub outside: bool,
    /// Which part of the segment anchored the contact; lets callers report
    /// the correct endpoint index when the projection clamped
    pub region: SegmentRegion,
}

/// Penetration of a padded point against another padded point.
///
/// Returns the vector that moves `point` out of contact, with length
/// `radius + other_radius - distance`; zero when the circles do not overlap.
/// Coincident points have no defined direction and resolve to zero.
pub fn point_point(point: Vec2, radius: f32, other: Vec2, other_radius: f32) -> Vec2 {
    let delta = point - other;
    let distance = delta.norm();
    let depth = radius + other_radius - distance;
    if depth <= 0.0 || distance < EPSILON {
        return Vec2::zeros();
    }
    delta * (depth / distance)
}

/// Side test: a padded point against a segment with per-endpoint thickness.
///
/// Projects the point onto the segment; a projection outside `[0, 1]`
/// degrades to a point/point test against the nearer endpoint. Within the
/// segment the contact depth is the interpolated thickness plus the point
/// radius minus the perpendicular distance, and the resolution direction is
/// the perpendicular toward the point's own side.
///
/// A zero-length segment degrades to a point/point test using the larger
/// endpoint thickness; its `outside` flag is false since the segment has no
/// defined sides.
pub fn point_segment(
    point: Vec2,
    radius: f32,
    a: Vec2,
    thickness_a: f32,
    b: Vec2,
    thickness_b: f32,
) -> SideResult {
    let segment = b - a;
    let length_sq = segment.norm_squared();
    if length_sq < EPSILON * EPSILON {
        return SideResult {
            penetration: point_point(point, radius, a, thickness_a.max(thickness_b)),
            outside: false,
            region: SegmentRegion::Start,
        };
    }

    let direction = segment / length_sq.sqrt();
    let relative = point - a;
    let t = relative.dot(&segment) / length_sq;
    // Positive on the left of a -> b; for a CCW polygon the left is inward
    let signed = direction.cross2(&relative);
    let local = lerp(thickness_a, thickness_b, t.clamp(0.0, 1.0));
    let outside = -signed >= radius + local;

    let (penetration, region) = if t < 0.0 {
        (point_point(point, radius, a, thickness_a), SegmentRegion::Start)
    } else if t > 1.0 {
        (point_point(point, radius, b, thickness_b), SegmentRegion::End)
    } else {
        let depth = radius + local - signed.abs();
        let penetration = if depth <= 0.0 {
            Vec2::zeros()
        } else if signed >= 0.0 {
            direction.perp_ccw() * depth
        } else {
            direction.perp_ccw() * -depth
        };
        (penetration, SegmentRegion::Interior)
    };

    SideResult {
        penetration,
        outside,
        region,
    }
}
