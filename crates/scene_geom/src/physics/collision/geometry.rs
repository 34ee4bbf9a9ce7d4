//! Collision geometry container and composite queries
//!
//! A `CollisionGeometry` is built once from a flat vertex buffer and a set of
//! path/polygon descriptors, then queried read-only. Composite queries walk
//! every feature pair and combine per-feature results by largest penetration
//! magnitude (deepest contact wins, a single-contact approximation). Mass
//! properties are computed lazily on first access and cached.

use std::cell::OnceCell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::{utils::lerp, Vec2, Vec2Ext};
use crate::foundation::transform::Transform;

use super::mass::{self, MassProperties};
use super::penetration::{point_point, point_segment, Contact, SegmentRegion};

/// Reserved attribute holding the 2D position (2 floats)
const ATTR_VERTEX: &str = "vertex";

/// Reserved attribute holding the capsule radius (1 float)
const ATTR_THICKNESS: &str = "thickness";

/// Collision geometry construction errors
#[derive(Error, Debug)]
pub enum CollisionError {
    /// A required attribute is absent from the size mapping
    #[error("missing required attribute `{0}`")]
    MissingAttribute(&'static str),
    /// A required attribute is narrower than the engine needs
    #[error("attribute `{name}` needs at least {required} floats, got {actual}")]
    AttributeTooNarrow {
        /// Attribute name
        name: &'static str,
        /// Minimum width in floats
        required: usize,
        /// Width supplied by the caller
        actual: usize,
    },
    /// The vertex buffer does not divide evenly into vertices
    #[error("vertex buffer length {length} is not a multiple of stride {stride}")]
    BufferSizeMismatch {
        /// Buffer length in floats
        length: usize,
        /// Vertex stride in floats
        stride: usize,
    },
    /// A descriptor references a vertex past the end of the buffer
    #[error("vertex index {index} out of range for {count} vertices")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Number of vertices in the buffer
        count: usize,
    },
    /// A path descriptor's range is inverted
    #[error("path first index {first} exceeds last index {last}")]
    InvalidPathRange {
        /// First vertex index
        first: usize,
        /// Last vertex index
        last: usize,
    },
    /// A polygon descriptor has too few vertices
    #[error("polygon needs at least three vertices, got {0}")]
    DegeneratePolygon(usize),
}

/// A contiguous vertex run interpreted as a point (length 1), open polyline,
/// or closed loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionPath {
    /// First vertex index, inclusive
    pub first: usize,
    /// Last vertex index, inclusive
    pub last: usize,
    /// Closed loop (true) versus open polyline (false)
    pub closed: bool,
}

/// An ordered vertex index list forming a convex, CCW-wound polygon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionPolygon {
    /// Vertex indices in CCW order
    pub indices: Vec<usize>,
}

/// Shared vertex buffer plus the path/polygon descriptors slicing it.
///
/// Read-only after construction apart from the lazy mass-property cache;
/// the `OnceCell` makes the type `!Sync`, so compute the mass properties
/// before sharing across threads if concurrent reads are needed.
#[derive(Debug)]
pub struct CollisionGeometry {
    vertices: Vec<f32>,
    stride: usize,
    vertex_offset: usize,
    thickness_offset: usize,
    paths: Vec<CollisionPath>,
    polygons: Vec<CollisionPolygon>,
    mass: OnceCell<MassProperties>,
}

impl CollisionGeometry {
    /// Build a geometry from a flat vertex buffer and descriptors.
    ///
    /// `attribute_sizes` maps attribute names to widths in floats and must
    /// include `vertex` (>= 2) and `thickness` (>= 1). Offsets place `vertex`
    /// first and the remaining attributes in name order, matching the
    /// tessellation layout convention.
    ///
    /// # Errors
    ///
    /// Returns a [`CollisionError`] for a missing or too-narrow required
    /// attribute, a buffer that does not divide into whole vertices, or a
    /// descriptor that is empty, inverted, or out of range.
    pub fn new(
        vertices: Vec<f32>,
        attribute_sizes: &BTreeMap<String, usize>,
        paths: Vec<CollisionPath>,
        polygons: Vec<CollisionPolygon>,
    ) -> Result<Self, CollisionError> {
        let vertex_size = *attribute_sizes
            .get(ATTR_VERTEX)
            .ok_or(CollisionError::MissingAttribute(ATTR_VERTEX))?;
        if vertex_size < 2 {
            return Err(CollisionError::AttributeTooNarrow {
                name: ATTR_VERTEX,
                required: 2,
                actual: vertex_size,
            });
        }
        let thickness_size = *attribute_sizes
            .get(ATTR_THICKNESS)
            .ok_or(CollisionError::MissingAttribute(ATTR_THICKNESS))?;
        if thickness_size < 1 {
            return Err(CollisionError::AttributeTooNarrow {
                name: ATTR_THICKNESS,
                required: 1,
                actual: thickness_size,
            });
        }

        // Offsets: vertex first, then everything else in name order.
        let mut stride = vertex_size;
        let mut thickness_offset = 0;
        for (name, &size) in attribute_sizes {
            if name == ATTR_VERTEX {
                continue;
            }
            if name == ATTR_THICKNESS {
                thickness_offset = stride;
            }
            stride += size;
        }

        if vertices.len() % stride != 0 {
            return Err(CollisionError::BufferSizeMismatch {
                length: vertices.len(),
                stride,
            });
        }
        let count = vertices.len() / stride;

        for path in &paths {
            if path.first > path.last {
                return Err(CollisionError::InvalidPathRange {
                    first: path.first,
                    last: path.last,
                });
            }
            if path.last >= count {
                return Err(CollisionError::IndexOutOfRange {
                    index: path.last,
                    count,
                });
            }
        }
        for polygon in &polygons {
            if polygon.indices.len() < 3 {
                return Err(CollisionError::DegeneratePolygon(polygon.indices.len()));
            }
            for &index in &polygon.indices {
                if index >= count {
                    return Err(CollisionError::IndexOutOfRange { index, count });
                }
            }
        }

        Ok(Self {
            vertices,
            stride,
            vertex_offset: 0,
            thickness_offset,
            paths,
            polygons,
            mass: OnceCell::new(),
        })
    }

    /// Number of vertices in the buffer
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.stride
    }

    /// Position of one vertex
    pub fn position(&self, index: usize) -> Vec2 {
        let base = index * self.stride + self.vertex_offset;
        Vec2::new(self.vertices[base], self.vertices[base + 1])
    }

    /// Thickness (capsule radius) of one vertex
    pub fn thickness(&self, index: usize) -> f32 {
        self.vertices[index * self.stride + self.thickness_offset]
    }

    /// Path descriptors
    pub fn paths(&self) -> &[CollisionPath] {
        &self.paths
    }

    /// Polygon descriptors
    pub fn polygons(&self) -> &[CollisionPolygon] {
        &self.polygons
    }

    /// Deepest penetration of this geometry into `other`.
    ///
    /// `transform` is applied to this geometry's vertices before comparison,
    /// so `other` supplies the comparison space; pass `None` when both share
    /// one space. The returned vector moves this geometry out of contact;
    /// zero means no contact. When `contacts` is supplied every non-zero
    /// per-feature penetration is appended, for callers that need a full
    /// contact list rather than a single resolved vector.
    pub fn get_penetration(
        &self,
        other: &Self,
        transform: Option<&Transform>,
        mut contacts: Option<&mut Vec<Contact>>,
    ) -> Vec2 {
        let this = View {
            geometry: self,
            transform,
        };
        let that = View {
            geometry: other,
            transform: None,
        };

        let mut best = Vec2::zeros();
        let mut emit = |penetration: Vec2, source: usize, target: usize| {
            if penetration == Vec2::zeros() {
                return;
            }
            if let Some(list) = contacts.as_deref_mut() {
                list.push(Contact {
                    penetration,
                    source,
                    target,
                });
            }
            if penetration.norm_squared() > best.norm_squared() {
                best = penetration;
            }
        };

        for source in this.features() {
            for target in that.features() {
                feature_feature(&this, source, &that, target, &mut emit);
            }
            for polygon in &other.polygons {
                feature_polygon(&this, source, &that, polygon, &mut emit);
            }
        }
        for polygon in &self.polygons {
            for target in that.features() {
                // Other's feature against our polygon, pushed the other way
                feature_polygon(&that, target, &this, polygon, &mut |p, s, t| {
                    emit(-p, t, s)
                });
            }
            for other_polygon in &other.polygons {
                for &index in &polygon.indices {
                    feature_polygon(&this, Feature::Point(index), &that, other_polygon, &mut emit);
                }
                for &index in &other_polygon.indices {
                    feature_polygon(&that, Feature::Point(index), &this, polygon, &mut |p, s, t| {
                        emit(-p, t, s)
                    });
                }
            }
        }
        best
    }

    /// True when any feature pair is in contact
    pub fn intersects(&self, other: &Self, transform: Option<&Transform>) -> bool {
        self.get_penetration(other, transform, None) != Vec2::zeros()
    }

    /// True when the point lies inside (or on) some polygon's
    /// thickness-expanded boundary
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.polygons.iter().any(|polygon| {
            polygon_edges(polygon).all(|(i, j)| {
                !point_segment(
                    point,
                    0.0,
                    self.position(i),
                    self.thickness(i),
                    self.position(j),
                    self.thickness(j),
                )
                .outside
            })
        })
    }

    /// Closest point on any feature whose surface lies within `radius` of
    /// `point` (distance minus local thickness), or `None` when nothing is
    /// close enough
    pub fn nearest_feature_position(&self, point: Vec2, radius: f32) -> Option<Vec2> {
        let view = View {
            geometry: self,
            transform: None,
        };
        let mut best: Option<(f32, Vec2)> = None;

        let mut consider = |distance: f32, position: Vec2| {
            if distance < radius && best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, position));
            }
        };

        for feature in view.features() {
            match feature {
                Feature::Point(i) => {
                    let p = self.position(i);
                    consider(point.distance_to(&p) - self.thickness(i), p);
                }
                Feature::Segment(i, j) => {
                    let (distance, closest) = self.segment_distance(point, i, j);
                    consider(distance, closest);
                }
            }
        }
        for polygon in &self.polygons {
            for (i, j) in polygon_edges(polygon) {
                let (distance, closest) = self.segment_distance(point, i, j);
                consider(distance, closest);
            }
        }

        best.map(|(_, position)| position)
    }

    /// Total area of all thick paths and polygons
    pub fn area(&self) -> f32 {
        self.mass_properties().area
    }

    /// Area centroid shared by all features
    pub fn center_of_mass(&self) -> Vec2 {
        self.mass_properties().centroid
    }

    /// Polar second moment of area about the centroid, density-independent
    /// (multiply by density for a physical moment of inertia)
    pub fn moment_of_inertia(&self) -> f32 {
        self.mass_properties().moment
    }

    fn mass_properties(&self) -> &MassProperties {
        self.mass.get_or_init(|| mass::compute(self))
    }

    /// Distance from `point` to a segment's padded surface and the closest
    /// point on its centerline
    fn segment_distance(&self, point: Vec2, i: usize, j: usize) -> (f32, Vec2) {
        let a = self.position(i);
        let b = self.position(j);
        let segment = b - a;
        let length_sq = segment.norm_squared();
        if length_sq < f32::EPSILON {
            return (
                point.distance_to(&a) - self.thickness(i).max(self.thickness(j)),
                a,
            );
        }
        let t = ((point - a).dot(&segment) / length_sq).clamp(0.0, 1.0);
        let closest = a + segment * t;
        let local = lerp(self.thickness(i), self.thickness(j), t);
        (point.distance_to(&closest) - local, closest)
    }
}

/// One primitive feature of a path: a lone point or a centerline segment
#[derive(Debug, Clone, Copy)]
enum Feature {
    Point(usize),
    Segment(usize, usize),
}

/// A geometry with an optional transform applied to its vertices
struct View<'a> {
    geometry: &'a CollisionGeometry,
    transform: Option<&'a Transform>,
}

impl View<'_> {
    fn position(&self, index: usize) -> Vec2 {
        let p = self.geometry.position(index);
        self.transform.map_or(p, |t| t.transform_point(p))
    }

    fn thickness(&self, index: usize) -> f32 {
        self.geometry.thickness(index)
    }

    fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.geometry.paths.iter().flat_map(|path| PathFeatures {
            first: path.first,
            last: path.last,
            closed: path.closed,
            cursor: path.first,
            done: false,
        })
    }
}

/// Iterator over a path's point or segment features
struct PathFeatures {
    first: usize,
    last: usize,
    closed: bool,
    cursor: usize,
    done: bool,
}

impl Iterator for PathFeatures {
    type Item = Feature;

    fn next(&mut self) -> Option<Feature> {
        if self.done {
            return None;
        }
        if self.first == self.last {
            self.done = true;
            return Some(Feature::Point(self.first));
        }
        if self.cursor < self.last {
            let i = self.cursor;
            self.cursor += 1;
            return Some(Feature::Segment(i, i + 1));
        }
        self.done = true;
        if self.closed {
            return Some(Feature::Segment(self.last, self.first));
        }
        None
    }
}

/// Directed edges of a polygon's index cycle
fn polygon_edges(polygon: &CollisionPolygon) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = polygon.indices.len();
    (0..n).map(move |k| (polygon.indices[k], polygon.indices[(k + 1) % n]))
}

/// The vertex index anchoring a segment-side contact: the projection's
/// endpoint when it clamped, the segment's first index otherwise
fn segment_anchor(region: SegmentRegion, first: usize, last: usize) -> usize {
    match region {
        SegmentRegion::End => last,
        SegmentRegion::Start | SegmentRegion::Interior => first,
    }
}

/// Penetration of one path feature into another, pushing `a`'s feature out.
/// Every non-zero candidate contact is passed to `emit` with its anchor
/// vertex indices on each side.
fn feature_feature(
    a: &View<'_>,
    fa: Feature,
    b: &View<'_>,
    fb: Feature,
    emit: &mut impl FnMut(Vec2, usize, usize),
) {
    match (fa, fb) {
        (Feature::Point(i), Feature::Point(j)) => {
            emit(
                point_point(a.position(i), a.thickness(i), b.position(j), b.thickness(j)),
                i,
                j,
            );
        }
        (Feature::Point(i), Feature::Segment(j, k)) => {
            let side = point_segment(
                a.position(i),
                a.thickness(i),
                b.position(j),
                b.thickness(j),
                b.position(k),
                b.thickness(k),
            );
            emit(side.penetration, i, segment_anchor(side.region, j, k));
        }
        (Feature::Segment(i, j), Feature::Point(k)) => {
            let side = point_segment(
                b.position(k),
                b.thickness(k),
                a.position(i),
                a.thickness(i),
                a.position(j),
                a.thickness(j),
            );
            emit(-side.penetration, segment_anchor(side.region, i, j), k);
        }
        (Feature::Segment(i, j), Feature::Segment(k, l)) => {
            // Any of the four endpoints may anchor a contact, so test both
            // directions and surface every hit
            for &p in &[i, j] {
                let side = point_segment(
                    a.position(p),
                    a.thickness(p),
                    b.position(k),
                    b.thickness(k),
                    b.position(l),
                    b.thickness(l),
                );
                emit(side.penetration, p, segment_anchor(side.region, k, l));
            }
            for &p in &[k, l] {
                let side = point_segment(
                    b.position(p),
                    b.thickness(p),
                    a.position(i),
                    a.thickness(i),
                    a.position(j),
                    a.thickness(j),
                );
                emit(-side.penetration, segment_anchor(side.region, i, j), p);
            }
        }
    }
}

/// Penetration of a path feature into a convex polygon's thick boundary,
/// pushing the feature out. A point only counts as penetrating when it fails
/// the outward test for every edge.
fn feature_polygon(
    a: &View<'_>,
    feature: Feature,
    b: &View<'_>,
    polygon: &CollisionPolygon,
    emit: &mut impl FnMut(Vec2, usize, usize),
) {
    match feature {
        Feature::Point(i) => point_polygon(a, i, b, polygon, emit),
        Feature::Segment(i, j) => {
            point_polygon(a, i, b, polygon, emit);
            point_polygon(a, j, b, polygon, emit);
            // Polygon vertices may also anchor against the segment
            for &index in &polygon.indices {
                let side = point_segment(
                    b.position(index),
                    b.thickness(index),
                    a.position(i),
                    a.thickness(i),
                    a.position(j),
                    a.thickness(j),
                );
                emit(-side.penetration, segment_anchor(side.region, i, j), index);
            }
        }
    }
}

fn point_polygon(
    a: &View<'_>,
    index: usize,
    b: &View<'_>,
    polygon: &CollisionPolygon,
    emit: &mut impl FnMut(Vec2, usize, usize),
) {
    let point = a.position(index);
    let radius = a.thickness(index);
    let side_at = |i: usize, j: usize| {
        point_segment(
            point,
            radius,
            b.position(i),
            b.thickness(i),
            b.position(j),
            b.thickness(j),
        )
    };
    // Fully beyond one edge: no polygon contact at all
    if polygon_edges(polygon).any(|(i, j)| side_at(i, j).outside) {
        return;
    }
    for (i, j) in polygon_edges(polygon) {
        let side = side_at(i, j);
        emit(side.penetration, index, segment_anchor(side.region, i, j));
    }
}
