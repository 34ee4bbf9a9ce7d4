//! Foundation module - Core math types
//!
//! This module provides the fundamental math used throughout the engine:
//! - Vector types and operations
//! - 2D half-planes
//! - Affine transforms with cached derived matrices

pub mod math;
pub mod plane;
pub mod transform;

pub use math::{Mat3, Vec2, Vec2Ext};
pub use plane::Plane;
pub use transform::Transform;
