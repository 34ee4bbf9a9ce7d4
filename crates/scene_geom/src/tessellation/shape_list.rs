//! Turtle-graphics builder for paths and shapes
//!
//! [`ShapeList`] holds a turtle cursor (position and heading), an accumulating
//! attribute set, and the shapes and paths produced so far. Movement commands
//! append to the currently open path while the pen is down. The builder is a
//! plain mutable value owned by one caller at a time; finished lists are
//! consumed read-only by `create_geometry`.

use crate::foundation::math::{constants::PI, heading, utils::deg_to_rad, Vec2, Vec2Ext};

use super::attributes::{merge_attributes, AttributeMap};
use super::path::{Path, PathCommand, Shape};

/// What the open path will become when the pen lifts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PenTarget {
    /// Stroked open/closed polyline, appended to `paths`
    Stroke,
    /// Filled shape boundary, wrapped in a [`Shape`]
    Fill,
}

/// Turtle-style builder producing [`Shape`]s and [`Path`]s.
///
/// All movement methods return `&mut Self` for chaining. Attribute values set
/// with [`ShapeList::attr`] carry forward and are snapshotted into every
/// subsequent command until overridden.
#[derive(Debug, Clone)]
pub struct ShapeList {
    position: Vec2,
    rotation: f32,
    attrs: AttributeMap,
    current: Option<(Path, PenTarget)>,
    /// Finished filled shapes
    pub shapes: Vec<Shape>,
    /// Finished stroked paths
    pub paths: Vec<Path>,
}

impl Default for ShapeList {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeList {
    /// Create a builder with the cursor at the origin, heading along +x
    pub fn new() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            attrs: AttributeMap::new(),
            current: None,
            shapes: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// Current cursor position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current heading in radians
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Merge one attribute into the running set carried by later commands
    pub fn attr(&mut self, name: &str, values: &[f32]) -> &mut Self {
        self.attrs.insert(name.to_string(), values.to_vec());
        self
    }

    /// Merge a whole attribute set into the running set
    pub fn attrs(&mut self, attrs: &AttributeMap) -> &mut Self {
        merge_attributes(&mut self.attrs, attrs);
        self
    }

    /// Turn in place by an angle in degrees (positive turns left)
    pub fn pivot(&mut self, degrees: f32) -> &mut Self {
        self.rotate(deg_to_rad(degrees))
    }

    /// Turn in place by an angle in radians (positive turns left)
    pub fn rotate(&mut self, radians: f32) -> &mut Self {
        self.rotation += radians;
        self
    }

    /// Move forward along the heading, recording a line if the pen is down
    pub fn advance(&mut self, distance: f32) -> &mut Self {
        let dest = self.position + heading(self.rotation) * distance;
        self.line_to(dest)
    }

    /// Move forward with extra attributes merged in first
    pub fn advance_with(&mut self, distance: f32, attrs: &AttributeMap) -> &mut Self {
        self.attrs(attrs).advance(distance)
    }

    /// Move the cursor to an absolute position, recording a line if the pen
    /// is down
    pub fn jump(&mut self, x: f32, y: f32) -> &mut Self {
        self.line_to(Vec2::new(x, y))
    }

    /// Absolute move with extra attributes merged in first
    pub fn jump_with(&mut self, x: f32, y: f32, attrs: &AttributeMap) -> &mut Self {
        self.attrs(attrs).jump(x, y)
    }

    /// Sweep a circular arc, angle in degrees.
    ///
    /// The radius sign selects the turn direction: positive turns left.
    pub fn turn(&mut self, degrees: f32, radius: f32) -> &mut Self {
        self.arc(deg_to_rad(degrees), radius)
    }

    /// Degree-based arc with extra attributes merged in first
    pub fn turn_with(&mut self, degrees: f32, radius: f32, attrs: &AttributeMap) -> &mut Self {
        self.attrs(attrs).turn(degrees, radius)
    }

    /// Sweep a circular arc, angle in radians (non-negative).
    ///
    /// The radius sign selects the turn direction: positive turns left.
    /// Sweeps over a half turn split into two half arcs so the recorded
    /// `ArcTo` is never ambiguous.
    pub fn arc(&mut self, radians: f32, radius: f32) -> &mut Self {
        debug_assert!(radians >= 0.0, "arc sweep must be non-negative");
        if radians > PI {
            let half = radians * 0.5;
            self.arc(half, radius);
            return self.arc(radians - half, radius);
        }

        let center = self.position + heading(self.rotation).perp_ccw() * radius;
        let sweep = radians.copysign(radius);
        let dest = center + (self.position - center).rotate_by(sweep);
        self.position = dest;
        self.rotation += sweep;
        self.record(PathCommand::ArcTo {
            dest,
            radius,
            attrs: self.attrs.clone(),
        });
        self
    }

    /// Radian-based arc with extra attributes merged in first
    pub fn arc_with(&mut self, radians: f32, radius: f32, attrs: &AttributeMap) -> &mut Self {
        self.attrs(attrs).arc(radians, radius)
    }

    /// Lay down a cubic Bezier using two intermediate turtle moves.
    ///
    /// Advances `d1` to the first control point, turns by `a1` radians,
    /// advances `d2` to the second control point, turns by `a2` radians, and
    /// advances `d3` to the destination. The cursor ends at the destination
    /// with the final heading.
    pub fn curve(&mut self, d1: f32, a1: f32, d2: f32, a2: f32, d3: f32) -> &mut Self {
        let c1 = self.position + heading(self.rotation) * d1;
        self.rotation += a1;
        let c2 = c1 + heading(self.rotation) * d2;
        self.rotation += a2;
        let dest = c2 + heading(self.rotation) * d3;
        self.position = dest;
        self.record(PathCommand::CurveTo {
            dest,
            c1,
            c2,
            attrs: self.attrs.clone(),
        });
        self
    }

    /// Cubic Bezier with extra attributes merged in first
    pub fn curve_with(
        &mut self,
        d1: f32,
        a1: f32,
        d2: f32,
        a2: f32,
        d3: f32,
        attrs: &AttributeMap,
    ) -> &mut Self {
        self.attrs(attrs).curve(d1, a1, d2, a2, d3)
    }

    /// Put the pen down, opening a new path at the cursor.
    ///
    /// With `as_shape` the path becomes a filled [`Shape`] boundary when the
    /// pen lifts; otherwise it is appended to [`ShapeList::paths`] for
    /// stroking. An already-open path is finished (un-closed) first.
    pub fn pen_down(&mut self, as_shape: bool) -> &mut Self {
        if self.current.is_some() {
            self.pen_up(false);
        }
        let mut path = Path::new();
        path.push(PathCommand::MoveTo {
            dest: self.position,
            attrs: self.attrs.clone(),
        });
        let target = if as_shape {
            PenTarget::Fill
        } else {
            PenTarget::Stroke
        };
        self.current = Some((path, target));
        self
    }

    /// Lift the pen, finishing the open path.
    ///
    /// `close_loop` marks a stroked path as a closed loop; shape boundaries
    /// are always closed. Lifting an already-up pen is a no-op.
    pub fn pen_up(&mut self, close_loop: bool) -> &mut Self {
        if let Some((mut path, target)) = self.current.take() {
            match target {
                PenTarget::Fill => self.shapes.push(Shape::new(path)),
                PenTarget::Stroke => {
                    path.closed = close_loop;
                    self.paths.push(path);
                }
            }
        }
        self
    }

    /// True while the pen is down
    pub fn pen_is_down(&self) -> bool {
        self.current.is_some()
    }

    fn line_to(&mut self, dest: Vec2) -> &mut Self {
        self.position = dest;
        self.record(PathCommand::LineTo {
            dest,
            attrs: self.attrs.clone(),
        });
        self
    }

    fn record(&mut self, command: PathCommand) {
        if let Some((path, _)) = self.current.as_mut() {
            path.push(command);
        }
    }
}
