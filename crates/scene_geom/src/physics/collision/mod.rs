//! Thickness-aware collision geometry
//!
//! A [`CollisionGeometry`] owns a flat vertex buffer plus descriptors slicing
//! it into point/polyline/loop paths and convex polygons. Every vertex carries
//! a thickness (capsule radius) that pads the boundary for both queries and
//! mass properties. All pairwise queries reduce to two kernels in
//! [`penetration`]: point/point and the segment side test.

mod geometry;
mod mass;
mod penetration;

pub use geometry::{CollisionError, CollisionGeometry, CollisionPath, CollisionPolygon};
pub use mass::MassProperties;
pub use penetration::{point_point, point_segment, Contact, SegmentRegion, SideResult};
