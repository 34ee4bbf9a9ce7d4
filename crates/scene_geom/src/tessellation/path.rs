//! Path commands, paths, and filled shapes
//!
//! A [`Path`] is an ordered sequence of [`PathCommand`]s plus a loop flag. A
//! [`Shape`] wraps one exterior path describing a filled, simple
//! (non-self-intersecting) polygon boundary. Commands form a tagged sum type;
//! the tessellation walk dispatches on them with `match`.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

use super::attributes::AttributeMap;

/// One path command, always expressed in absolute coordinates.
///
/// Each command carries the sparse attribute set in effect when it was
/// recorded; tessellation interpolates between successive commands' sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Start a new subpath at `dest`
    MoveTo {
        /// Destination point
        dest: Vec2,
        /// Attributes in effect at this command
        attrs: AttributeMap,
    },
    /// Straight segment to `dest`
    LineTo {
        /// Destination point
        dest: Vec2,
        /// Attributes in effect at this command
        attrs: AttributeMap,
    },
    /// Circular arc to `dest`.
    ///
    /// The radius sign selects the turn direction (positive turns left /
    /// counter-clockwise). Arcs are at most a half turn; the builder splits
    /// longer sweeps so the arc through two points is unambiguous.
    ArcTo {
        /// Destination point
        dest: Vec2,
        /// Signed arc radius
        radius: f32,
        /// Attributes in effect at this command
        attrs: AttributeMap,
    },
    /// Cubic Bezier to `dest` with two absolute control points
    CurveTo {
        /// Destination point
        dest: Vec2,
        /// First control point
        c1: Vec2,
        /// Second control point
        c2: Vec2,
        /// Attributes in effect at this command
        attrs: AttributeMap,
    },
}

impl PathCommand {
    /// The command's destination point
    pub fn dest(&self) -> Vec2 {
        match self {
            Self::MoveTo { dest, .. }
            | Self::LineTo { dest, .. }
            | Self::ArcTo { dest, .. }
            | Self::CurveTo { dest, .. } => *dest,
        }
    }

    /// The attribute set recorded with the command
    pub fn attrs(&self) -> &AttributeMap {
        match self {
            Self::MoveTo { attrs, .. }
            | Self::LineTo { attrs, .. }
            | Self::ArcTo { attrs, .. }
            | Self::CurveTo { attrs, .. } => attrs,
        }
    }
}

/// Ordered command sequence with a loop flag.
///
/// Invariant: the first command is always `MoveTo`; [`Path::push`] synthesizes
/// one at the origin when a drawing command arrives first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    /// Command sequence
    pub commands: Vec<PathCommand>,
    /// Closed loop (true) versus open polyline (false)
    pub closed: bool,
}

impl Path {
    /// Create an empty open path
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command, synthesizing a leading `MoveTo` at the origin if the
    /// path would otherwise start with a drawing command
    pub fn push(&mut self, command: PathCommand) {
        if self.commands.is_empty() && !matches!(command, PathCommand::MoveTo { .. }) {
            self.commands.push(PathCommand::MoveTo {
                dest: Vec2::zeros(),
                attrs: command.attrs().clone(),
            });
        }
        self.commands.push(command);
    }

    /// True when the path holds no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// A filled shape bounded by one exterior path.
///
/// The boundary must be simple (non-self-intersecting); it may be non-convex.
/// Holes are a documented extension and not supported by the triangulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Exterior boundary, treated as a closed loop
    pub exterior: Path,
}

impl Shape {
    /// Wrap a boundary path; the loop flag is forced on
    pub fn new(mut exterior: Path) -> Self {
        exterior.closed = true;
        Self { exterior }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_synthesizes_move_to() {
        let mut path = Path::new();
        path.push(PathCommand::LineTo {
            dest: Vec2::new(1.0, 0.0),
            attrs: AttributeMap::new(),
        });
        assert_eq!(path.commands.len(), 2);
        assert!(matches!(path.commands[0], PathCommand::MoveTo { .. }));
        assert_eq!(path.commands[0].dest(), Vec2::zeros());
    }

    #[test]
    fn test_push_keeps_leading_move_to() {
        let mut path = Path::new();
        path.push(PathCommand::MoveTo {
            dest: Vec2::new(2.0, 3.0),
            attrs: AttributeMap::new(),
        });
        path.push(PathCommand::LineTo {
            dest: Vec2::new(4.0, 3.0),
            attrs: AttributeMap::new(),
        });
        assert_eq!(path.commands.len(), 2);
        assert_eq!(path.commands[0].dest(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_shape_forces_closed() {
        let mut path = Path::new();
        path.push(PathCommand::MoveTo {
            dest: Vec2::zeros(),
            attrs: AttributeMap::new(),
        });
        assert!(!path.closed);
        let shape = Shape::new(path);
        assert!(shape.exterior.closed);
    }
}
