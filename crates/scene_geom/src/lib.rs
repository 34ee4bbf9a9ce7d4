//! # Scene Geom
//!
//! A 2D procedural geometry engine for scene editors: turtle-graphics path
//! authoring, tessellation into GPU-ready triangle buffers, and thickness-aware
//! collision geometry sharing the same data model.
//!
//! ## Features
//!
//! - **Turtle Path Builder**: author paths and filled shapes with relative
//!   cursor commands (`advance`, `pivot`, `arc`, `curve`)
//! - **Tessellation**: exact-size vertex/index buffers with mitered
//!   variable-thickness extrusion and antialiasing-ready plane attributes
//! - **Collision Geometry**: penetration vectors between thickness-padded
//!   points, segments, and convex polygons
//! - **Mass Properties**: closed-form area, centroid, and moment of inertia
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_geom::prelude::*;
//!
//! let mut list = ShapeList::new();
//! list.pen_down(true);
//! for _ in 0..4 {
//!     list.advance(1.0);
//!     list.pivot(90.0);
//! }
//! list.pen_up(true);
//!
//! let geometry = list.create_geometry(8.0).unwrap();
//! assert!(geometry.vertex_count() >= 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod physics;
pub mod tessellation;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Mat3, Vec2, Vec2Ext},
            plane::Plane,
            transform::Transform,
        },
        physics::collision::{
            CollisionError, CollisionGeometry, CollisionPath, CollisionPolygon, Contact,
            MassProperties,
        },
        tessellation::{
            attributes::{AttributeLayout, AttributeMap},
            geometry::{Geometry, GeometryError},
            path::{Path, PathCommand, Shape},
            shape_list::ShapeList,
        },
    };
}
