//! Path and shape tessellation engine
//!
//! Turtle-style path authoring ([`shape_list::ShapeList`]) producing
//! [`path::Path`]/[`path::Shape`] command sequences, tessellated into
//! GPU-ready triangle buffers with configurable density and per-vertex
//! attribute interpolation.
//!
//! # Module Organization
//!
//! - [`attributes`] - Named per-vertex attribute sets and buffer layout
//! - [`path`] - Tagged path commands, paths, and filled shapes
//! - [`shape_list`] - The turtle-graphics builder
//! - [`geometry`] - Stats/populate tessellation passes and the output buffers

pub mod attributes;
pub mod geometry;
pub mod path;
pub mod shape_list;
mod triangulate;

pub use attributes::{AttributeLayout, AttributeMap};
pub use geometry::{Geometry, GeometryError};
pub use path::{Path, PathCommand, Shape};
pub use shape_list::ShapeList;
