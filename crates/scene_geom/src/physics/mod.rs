//! Physics-facing geometry queries
//!
//! Collision geometry shares the tessellation vocabulary (points, paths,
//! polygons, per-vertex thickness) but answers queries instead of producing
//! triangles: penetration vectors, containment, nearest features, and mass
//! properties.

pub mod collision;
