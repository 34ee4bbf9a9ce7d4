//! Tessellation passes and output buffers
//!
//! `create_geometry` walks every path and shape twice: a stats pass computes
//! exact vertex/index counts and the attribute layout, buffers are allocated
//! once, then a populate pass writes interpolated attribute values and
//! triangle indices. Stroked paths emit two coincident vertex rows per sample
//! carrying opposite miter planes so a vertex shader can extrude a
//! constant-thickness ribbon; filled shapes emit one row per boundary sample
//! and ear-clipped triangle indices.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::foundation::math::{constants::TAU, utils::lerp, Vec2, Vec2Ext};
use crate::foundation::plane::Plane;

use super::attributes::{AttributeLayout, AttributeMap, ATTR_PLANE, ATTR_VERTEX};
use super::path::{Path, PathCommand};
use super::shape_list::ShapeList;
use super::triangulate::triangulate;

const EPSILON: f32 = 1e-6;

/// Coincident sample positions closer than this are merged when a loop's last
/// point returns to its first.
const WELD_DISTANCE: f32 = 1e-5;

/// Tessellation input errors
#[derive(Error, Debug)]
pub enum GeometryError {
    /// The tessellation density must be positive and finite; zero would
    /// produce zero subdivision counts.
    #[error("invalid tessellation density {0}; must be positive and finite")]
    InvalidTessellation(f32),
}

/// Tessellated triangle buffers plus the attribute layout describing them.
///
/// Vertices are interleaved floats with the stride and offsets reported by
/// [`Geometry::layout`]; indices are 32-bit triangle lists. The byte views are
/// the seam toward a rendering backend, which is out of scope here.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    layout: AttributeLayout,
}

impl Geometry {
    /// Interleaved vertex data
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Triangle list indices
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Attribute offsets and stride
    pub fn layout(&self) -> &AttributeLayout {
        &self.layout
    }

    /// Number of vertices in the buffer
    pub fn vertex_count(&self) -> usize {
        if self.layout.stride() == 0 {
            0
        } else {
            self.vertices.len() / self.layout.stride()
        }
    }

    /// Number of triangles in the index buffer
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as bytes for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Position of one vertex row
    pub fn position(&self, row: usize) -> Vec2 {
        let base = row * self.layout.stride();
        Vec2::new(self.vertices[base], self.vertices[base + 1])
    }
}

impl ShapeList {
    /// Tessellate every finished path and shape into one [`Geometry`].
    ///
    /// `tessellation` is the subdivision density in vertices per unit arc
    /// length; arcs and curves subdivide proportionally to their length so
    /// visual error is independent of radius or curvature.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidTessellation`] for a non-positive or
    /// non-finite density.
    ///
    /// # Panics
    ///
    /// Panics on caller invariant violations: a hand-built path whose
    /// `ArcTo`/`CurveTo` has no preceding point, or a self-intersecting shape
    /// boundary that ear clipping cannot reduce.
    pub fn create_geometry(&self, tessellation: f32) -> Result<Geometry, GeometryError> {
        if !tessellation.is_finite() || tessellation <= 0.0 {
            return Err(GeometryError::InvalidTessellation(tessellation));
        }

        let mut pieces: Vec<Piece<'_>> = self
            .paths
            .iter()
            .map(|path| Piece::stroke(path, tessellation))
            .collect();
        pieces.extend(
            self.shapes
                .iter()
                .map(|shape| Piece::fill(&shape.exterior, tessellation)),
        );

        // Stats pass: attribute union and exact buffer sizes.
        let mut custom_sizes = BTreeMap::new();
        for piece in &pieces {
            for command in &piece.path.commands {
                for (name, values) in command.attrs() {
                    if name == ATTR_VERTEX || name == ATTR_PLANE {
                        continue;
                    }
                    let size = custom_sizes.entry(name.clone()).or_insert(0);
                    *size = (*size).max(values.len());
                }
            }
        }
        let layout = AttributeLayout::new(&custom_sizes);

        let mut vertex_rows = 0;
        let mut index_count = 0;
        for piece in &pieces {
            let (rows, indices) = piece.counts();
            vertex_rows += rows;
            index_count += indices;
        }

        let mut vertices = vec![0.0f32; vertex_rows * layout.stride()];
        let mut indices = Vec::with_capacity(index_count);

        // Populate pass.
        let mut row = 0;
        for piece in &pieces {
            row = piece.populate(&mut vertices, &mut indices, &layout, row);
        }
        debug_assert_eq!(row, vertex_rows);
        debug_assert_eq!(indices.len(), index_count);

        Ok(Geometry {
            vertices,
            indices,
            layout,
        })
    }
}

/// One tessellated sample point with its source command and the 0..=1
/// parameter along that command's subdivided run
#[derive(Debug, Clone, Copy)]
struct Sample {
    position: Vec2,
    command: usize,
    t: f32,
}

#[derive(Debug, Clone, Copy)]
enum PieceKind {
    Stroke { closed: bool },
    Fill,
}

struct Piece<'a> {
    path: &'a Path,
    kind: PieceKind,
    samples: Vec<Sample>,
    resolved: Vec<AttributeMap>,
}

impl<'a> Piece<'a> {
    fn stroke(path: &'a Path, tessellation: f32) -> Self {
        let mut samples = sample_path(path, tessellation);
        if path.closed {
            weld_loop(&mut samples);
        }
        Self {
            path,
            kind: PieceKind::Stroke {
                closed: path.closed,
            },
            samples,
            resolved: resolve_attrs(path),
        }
    }

    fn fill(path: &'a Path, tessellation: f32) -> Self {
        let mut samples = sample_path(path, tessellation);
        weld_loop(&mut samples);
        Self {
            path,
            kind: PieceKind::Fill,
            samples,
            resolved: resolve_attrs(path),
        }
    }

    /// Exact (vertex row, index) counts for this piece
    fn counts(&self) -> (usize, usize) {
        let count = self.samples.len();
        match self.kind {
            PieceKind::Stroke { closed } => {
                let pairs = if closed && count >= 2 {
                    count
                } else {
                    count.saturating_sub(1)
                };
                (count * 2, pairs * 6)
            }
            PieceKind::Fill => {
                let triangles = count.saturating_sub(2);
                (count, triangles * 3)
            }
        }
    }

    fn populate(
        &self,
        vertices: &mut [f32],
        indices: &mut Vec<u32>,
        layout: &AttributeLayout,
        first_row: usize,
    ) -> usize {
        match self.kind {
            PieceKind::Stroke { closed } => self.populate_stroke(vertices, indices, layout, first_row, closed),
            PieceKind::Fill => self.populate_fill(vertices, indices, layout, first_row),
        }
    }

    fn populate_stroke(
        &self,
        vertices: &mut [f32],
        indices: &mut Vec<u32>,
        layout: &AttributeLayout,
        first_row: usize,
        closed: bool,
    ) -> usize {
        let count = self.samples.len();
        for (i, sample) in self.samples.iter().enumerate() {
            let prev = if i > 0 {
                Some(self.samples[i - 1].position)
            } else if closed && count > 1 {
                Some(self.samples[count - 1].position)
            } else {
                None
            };
            let next = if i + 1 < count {
                Some(self.samples[i + 1].position)
            } else if closed && count > 1 {
                Some(self.samples[0].position)
            } else {
                None
            };
            let plane = miter_plane(sample.position, prev, next);

            let row = first_row + i * 2;
            self.write_vertex(vertices, layout, row, sample, Some(&plane));
            self.write_vertex(vertices, layout, row + 1, sample, Some(&plane.flipped()));
        }

        let pairs = if closed && count >= 2 {
            count
        } else {
            count.saturating_sub(1)
        };
        for k in 0..pairs {
            let i = k;
            let j = (k + 1) % count;
            let left_i = (first_row + i * 2) as u32;
            let right_i = left_i + 1;
            let left_j = (first_row + j * 2) as u32;
            let right_j = left_j + 1;
            indices.extend_from_slice(&[left_i, right_i, left_j, right_i, right_j, left_j]);
        }

        first_row + count * 2
    }

    fn populate_fill(
        &self,
        vertices: &mut [f32],
        indices: &mut Vec<u32>,
        layout: &AttributeLayout,
        first_row: usize,
    ) -> usize {
        for (i, sample) in self.samples.iter().enumerate() {
            self.write_vertex(vertices, layout, first_row + i, sample, None);
        }

        if self.samples.len() >= 3 {
            let ring: Vec<Vec2> = self.samples.iter().map(|s| s.position).collect();
            for tri in triangulate(&ring) {
                for local in tri {
                    indices.push((first_row as u32) + local);
                }
            }
        }

        first_row + self.samples.len()
    }

    fn write_vertex(
        &self,
        vertices: &mut [f32],
        layout: &AttributeLayout,
        row: usize,
        sample: &Sample,
        plane: Option<&Plane>,
    ) {
        let base = row * layout.stride();
        vertices[base] = sample.position.x;
        vertices[base + 1] = sample.position.y;
        if let Some(plane) = plane {
            vertices[base + 2] = plane.normal.x;
            vertices[base + 3] = plane.normal.y;
            vertices[base + 4] = plane.constant;
        }

        let command = sample.command;
        for (name, offset, size) in layout.custom_attributes() {
            let current = self.resolved[command].get(name);
            let previous = if command == 0 {
                current
            } else {
                // A name first appearing at this command holds its first
                // value over the whole run instead of ramping from zero.
                self.resolved[command - 1].get(name).or(current)
            };
            for k in 0..size {
                let from = previous.and_then(|v| v.get(k)).copied().unwrap_or(0.0);
                let to = current.and_then(|v| v.get(k)).copied().unwrap_or(0.0);
                vertices[base + offset + k] = lerp(from, to, sample.t);
            }
        }
    }
}

/// Miter plane at a stroked sample: the half-plane through the point whose
/// normal is the CCW perpendicular of the averaged neighbor tangent
fn miter_plane(position: Vec2, prev: Option<Vec2>, next: Option<Vec2>) -> Plane {
    let dir_in = prev.map_or_else(Vec2::zeros, |q| (position - q).normalize_or_zero());
    let dir_out = next.map_or_else(Vec2::zeros, |q| (q - position).normalize_or_zero());
    let sum = dir_in + dir_out;
    let tangent = if sum.norm() > EPSILON {
        sum.normalize_or_zero()
    } else if dir_in != Vec2::zeros() {
        // 180 degree reversal: keep the incoming direction
        dir_in
    } else if dir_out != Vec2::zeros() {
        dir_out
    } else {
        Vec2::new(1.0, 0.0)
    };
    Plane::from_point_normal(position, tangent.perp_ccw())
}

/// Cumulative attribute sets per command (later commands inherit earlier
/// values until overridden)
fn resolve_attrs(path: &Path) -> Vec<AttributeMap> {
    let mut running = AttributeMap::new();
    let mut resolved = Vec::with_capacity(path.commands.len());
    for command in &path.commands {
        for (name, values) in command.attrs() {
            running.insert(name.clone(), values.clone());
        }
        resolved.push(running.clone());
    }
    resolved
}

/// Drop the final sample when a loop explicitly returns to its first point
fn weld_loop(samples: &mut Vec<Sample>) {
    if samples.len() >= 2 {
        let first = samples[0].position;
        let last = samples[samples.len() - 1].position;
        if first.distance_to(&last) < WELD_DISTANCE {
            samples.pop();
        }
    }
}

/// Subdivision count for a run of the given arc length
fn divisions(length: f32, tessellation: f32) -> usize {
    ((length * tessellation).ceil() as usize).max(1)
}

/// Walk a path's commands into sample points.
///
/// # Panics
///
/// Panics when an `ArcTo`/`CurveTo` has no preceding point, which can only
/// happen on a hand-built command list.
fn sample_path(path: &Path, tessellation: f32) -> Vec<Sample> {
    let mut samples = Vec::new();
    let mut cursor: Option<Vec2> = None;

    for (index, command) in path.commands.iter().enumerate() {
        match command {
            PathCommand::MoveTo { dest, .. } | PathCommand::LineTo { dest, .. } => {
                samples.push(Sample {
                    position: *dest,
                    command: index,
                    t: 1.0,
                });
                cursor = Some(*dest);
            }
            PathCommand::ArcTo { dest, radius, .. } => {
                let start = cursor.expect("ArcTo with no preceding point");
                if let Some(arc) = ArcGeom::through(start, *dest, *radius) {
                    let steps = divisions(arc.length(), tessellation);
                    for k in 1..=steps {
                        let t = k as f32 / steps as f32;
                        samples.push(Sample {
                            position: arc.point(t),
                            command: index,
                            t,
                        });
                    }
                } else {
                    // Coincident endpoints: nothing to sweep
                    samples.push(Sample {
                        position: *dest,
                        command: index,
                        t: 1.0,
                    });
                }
                cursor = Some(*dest);
            }
            PathCommand::CurveTo { dest, c1, c2, .. } => {
                let start = cursor.expect("CurveTo with no preceding point");
                let curve = CubicBezier::new(start, *c1, *c2, *dest);
                let total = curve.arc_length(1.0);
                let steps = divisions(total, tessellation);
                for k in 1..=steps {
                    let t = k as f32 / steps as f32;
                    let parameter = curve.parameter_at_length(total * t, total);
                    samples.push(Sample {
                        position: curve.point(parameter),
                        command: index,
                        t,
                    });
                }
                cursor = Some(*dest);
            }
        }
    }
    samples
}

/// Circular arc reconstructed from its endpoints and signed radius.
///
/// The center sits on the chord's perpendicular bisector; the radius sign
/// picks the side (positive = CCW sweep). Sweeps never exceed a half turn,
/// matching what the builder records.
#[derive(Debug, Clone, Copy)]
struct ArcGeom {
    center: Vec2,
    start_angle: f32,
    sweep: f32,
    radius: f32,
}

impl ArcGeom {
    fn through(p0: Vec2, p1: Vec2, signed_radius: f32) -> Option<Self> {
        let chord = p1 - p0;
        let len = chord.norm();
        if len < EPSILON {
            return None;
        }
        let half = len * 0.5;
        let r = signed_radius.abs();
        // An impossible radius (shorter than half the chord) clamps to the
        // half-circle through both points.
        let rise = (r * r - half * half).max(0.0).sqrt();
        let center = (p0 + p1) * 0.5 + (chord / len).perp_ccw() * rise * signed_radius.signum();

        let v0 = p0 - center;
        let v1 = p1 - center;
        let start_angle = v0.y.atan2(v0.x);
        let mut sweep = v1.y.atan2(v1.x) - start_angle;
        if signed_radius >= 0.0 {
            if sweep <= 0.0 {
                sweep += TAU;
            }
        } else if sweep >= 0.0 {
            sweep -= TAU;
        }

        Some(Self {
            center,
            start_angle,
            sweep,
            radius: v0.norm(),
        })
    }

    fn length(&self) -> f32 {
        self.sweep.abs() * self.radius
    }

    fn point(&self, t: f32) -> Vec2 {
        let angle = self.start_angle + self.sweep * t;
        self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
    }
}

/// Gauss-Legendre 8-point quadrature abscissae/weights on [-1, 1]
const GAUSS_X: [f32; 8] = [
    -0.960_289_9,
    -0.796_666_5,
    -0.525_532_4,
    -0.183_434_64,
    0.183_434_64,
    0.525_532_4,
    0.796_666_5,
    0.960_289_9,
];
const GAUSS_W: [f32; 8] = [
    0.101_228_54,
    0.222_381_03,
    0.313_706_65,
    0.362_683_78,
    0.362_683_78,
    0.313_706_65,
    0.222_381_03,
    0.101_228_54,
];

/// Cubic Bezier with precomputed quartic speed-squared coefficients.
///
/// Sampling is by uniform arc length: the inverse arc-length function is
/// approximated per sample with three Newton iterations, using the
/// closed-form quartic polynomial `|B'(t)|^2` for the speed and
/// Gauss-Legendre quadrature for the length integral.
#[derive(Debug, Clone, Copy)]
struct CubicBezier {
    p0: Vec2,
    p1: Vec2,
    p2: Vec2,
    p3: Vec2,
    /// Coefficients of `|B'(t)|^2`, ascending powers of t
    speed_sq: [f32; 5],
}

impl CubicBezier {
    fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        // B'(t) = a t^2 + b t + c
        let a = (p3 - p2 * 3.0 + p1 * 3.0 - p0) * 3.0;
        let b = (p0 - p1 * 2.0 + p2) * 6.0;
        let c = (p1 - p0) * 3.0;
        let speed_sq = [
            c.dot(&c),
            2.0 * b.dot(&c),
            2.0 * a.dot(&c) + b.dot(&b),
            2.0 * a.dot(&b),
            a.dot(&a),
        ];
        Self {
            p0,
            p1,
            p2,
            p3,
            speed_sq,
        }
    }

    fn point(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }

    fn speed(&self, t: f32) -> f32 {
        let q = &self.speed_sq;
        let sq = q[0] + t * (q[1] + t * (q[2] + t * (q[3] + t * q[4])));
        sq.max(EPSILON).sqrt()
    }

    /// Arc length from 0 to `t` by Gauss-Legendre quadrature
    fn arc_length(&self, t: f32) -> f32 {
        let half = t * 0.5;
        let mut sum = 0.0;
        for (x, w) in GAUSS_X.iter().zip(GAUSS_W.iter()) {
            sum += w * self.speed(half * (x + 1.0));
        }
        sum * half
    }

    /// Solve `arc_length(t) == target` with three Newton iterations, clamped
    /// to [0, 1] to guard against non-convergence at the segment extremes
    fn parameter_at_length(&self, target: f32, total: f32) -> f32 {
        if total < EPSILON {
            return 1.0;
        }
        let mut t = (target / total).clamp(0.0, 1.0);
        for _ in 0..3 {
            let error = self.arc_length(t) - target;
            t = (t - error / self.speed(t)).clamp(0.0, 1.0);
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use approx::assert_relative_eq;

    fn stroke_rows(geometry: &Geometry) -> usize {
        geometry.vertex_count()
    }

    #[test]
    fn test_invalid_tessellation_density() {
        let list = ShapeList::new();
        assert!(matches!(
            list.create_geometry(0.0),
            Err(GeometryError::InvalidTessellation(_))
        ));
        assert!(list.create_geometry(f32::NAN).is_err());
        assert!(list.create_geometry(-2.0).is_err());
    }

    #[test]
    fn test_open_polyline_buffers() {
        let mut list = ShapeList::new();
        list.pen_down(false);
        list.advance(1.0).advance(1.0);
        list.pen_up(false);

        let geometry = list.create_geometry(4.0).unwrap();
        // Three samples, two rows each
        assert_eq!(geometry.vertex_count(), 6);
        // Two quads
        assert_eq!(geometry.triangle_count(), 4);
        // No custom attributes: stride is vertex + plane
        assert_eq!(geometry.layout().stride(), 5);

        // Coincident row pairs
        assert_relative_eq!(geometry.position(0), geometry.position(1), epsilon = 1e-6);
        assert_relative_eq!(geometry.position(2), Vec2::new(1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_straight_stroke_planes_oppose() {
        let mut list = ShapeList::new();
        list.pen_down(false);
        list.advance(2.0);
        list.pen_up(false);

        let geometry = list.create_geometry(1.0).unwrap();
        let v = geometry.vertices();
        let stride = geometry.layout().stride();
        // Heading +x, so the first row's plane normal is +y
        assert_relative_eq!(v[2], 0.0, epsilon = 1e-6);
        assert_relative_eq!(v[3], 1.0, epsilon = 1e-6);
        // The twin row is flipped
        assert_relative_eq!(v[stride + 3], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_closed_square_stroke_welds_loop() {
        let mut list = ShapeList::new();
        list.pen_down(false);
        for _ in 0..4 {
            list.advance(1.0);
            list.pivot(90.0);
        }
        list.pen_up(true);

        let geometry = list.create_geometry(4.0).unwrap();
        // Five samples weld to four corners, two rows each
        assert_eq!(geometry.vertex_count(), 8);
        // Four quads around the loop
        assert_eq!(geometry.triangle_count(), 8);
    }

    #[test]
    fn test_filled_square_triangulation() {
        let mut list = ShapeList::new();
        list.pen_down(true);
        for _ in 0..4 {
            list.advance(1.0);
            list.pivot(90.0);
        }
        list.pen_up(true);

        let geometry = list.create_geometry(4.0).unwrap();
        assert_eq!(geometry.vertex_count(), 4);
        // n - 2 triangles
        assert_eq!(geometry.triangle_count(), 2);

        // Triangle areas sum to the unit square
        let mut area = 0.0;
        for tri in geometry.indices().chunks(3) {
            let a = geometry.position(tri[0] as usize);
            let b = geometry.position(tri[1] as usize);
            let c = geometry.position(tri[2] as usize);
            area += ((b - a).cross2(&(c - a)) * 0.5).abs();
        }
        assert_relative_eq!(area, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_arc_vertex_count_scales_with_density() {
        let count_at = |density: f32| {
            let mut list = ShapeList::new();
            list.pen_down(false);
            list.arc(PI, 1.0);
            list.pen_up(false);
            stroke_rows(&list.create_geometry(density).unwrap())
        };

        // divisions = ceil(pi * density), plus the MoveTo sample, two rows each
        assert_eq!(count_at(10.0), 2 * (1 + (PI * 10.0).ceil() as usize));
        assert_eq!(count_at(20.0), 2 * (1 + (PI * 20.0).ceil() as usize));
    }

    #[test]
    fn test_arc_length_approaches_pi() {
        let mut list = ShapeList::new();
        list.pen_down(false);
        list.arc(PI, 1.0);
        list.pen_up(false);

        let geometry = list.create_geometry(200.0).unwrap();
        let mut length = 0.0;
        // Walk the left row of the ribbon (every second vertex row)
        let rows = geometry.vertex_count() / 2;
        for i in 1..rows {
            length += geometry
                .position(i * 2)
                .distance_to(&geometry.position((i - 1) * 2));
        }
        assert_relative_eq!(length, PI, epsilon = 1e-3);
    }

    #[test]
    fn test_curve_samples_spaced_by_arc_length() {
        let mut list = ShapeList::new();
        list.pen_down(false);
        list.curve(1.0, PI * 0.5, 1.0, PI * 0.5, 1.0);
        list.pen_up(false);

        let geometry = list.create_geometry(16.0).unwrap();
        let rows = geometry.vertex_count() / 2;
        assert!(rows > 8);

        let mut spacings = Vec::new();
        for i in 1..rows {
            spacings.push(
                geometry
                    .position(i * 2)
                    .distance_to(&geometry.position((i - 1) * 2)),
            );
        }
        let min = spacings.iter().copied().fold(f32::INFINITY, f32::min);
        let max = spacings.iter().copied().fold(0.0f32, f32::max);
        // Uniform arc-length parameterization keeps spacing nearly even
        assert!(max / min < 1.25, "spacing ratio {}", max / min);
    }

    #[test]
    fn test_attribute_interpolation_along_arc() {
        let mut list = ShapeList::new();
        list.attr("thickness", &[0.2]);
        list.pen_down(false);
        list.attr("thickness", &[1.0]);
        list.arc(PI * 0.5, 1.0);
        list.pen_up(false);

        let geometry = list.create_geometry(8.0).unwrap();
        let stride = geometry.layout().stride();
        let offset = geometry.layout().offset_of("thickness").unwrap();
        let v = geometry.vertices();

        // First sample carries the starting value, the last the final value
        assert_relative_eq!(v[offset], 0.2, epsilon = 1e-6);
        let last_row = geometry.vertex_count() - 1;
        assert_relative_eq!(v[last_row * stride + offset], 1.0, epsilon = 1e-6);

        // Interior samples ramp monotonically
        let rows = geometry.vertex_count() / 2;
        for i in 1..rows {
            let before = v[(i - 1) * 2 * stride + offset];
            let after = v[i * 2 * stride + offset];
            assert!(after >= before - 1e-6);
        }
    }

    #[test]
    fn test_bezier_arc_length_parameterization_clamps() {
        let curve = CubicBezier::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        );
        let total = curve.arc_length(1.0);
        assert!(total > 1.9 && total < 2.3);
        assert_relative_eq!(curve.parameter_at_length(0.0, total), 0.0, epsilon = 1e-3);
        assert_relative_eq!(curve.parameter_at_length(total, total), 1.0, epsilon = 1e-3);
        // Half the length lands at the symmetric midpoint
        let mid = curve.point(curve.parameter_at_length(total * 0.5, total));
        assert_relative_eq!(mid.y, 0.5, epsilon = 1e-2);
    }

    #[test]
    #[should_panic(expected = "no preceding point")]
    fn test_arc_without_predecessor_panics() {
        let path = Path {
            commands: vec![PathCommand::ArcTo {
                dest: Vec2::new(1.0, 0.0),
                radius: 1.0,
                attrs: AttributeMap::new(),
            }],
            closed: false,
        };
        sample_path(&path, 4.0);
    }
}
