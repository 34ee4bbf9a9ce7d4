//! Closed-form mass properties for thick paths and polygons
//!
//! Everything reduces to shoelace ring integrals: polygons contribute their
//! exterior ring, thick segments contribute the quad swept by their endpoint
//! thicknesses, loose path ends contribute full disks, and polygon edges on
//! the outward boundary contribute a one-sided extruded quad. Overlapping
//! parts sum without overlap subtraction.

use std::collections::HashSet;

use crate::foundation::math::{constants::PI, Vec2, Vec2Ext};

use super::geometry::{CollisionGeometry, CollisionPath};

/// Area, centroid, and polar second moment of area about the centroid.
///
/// Density-independent: multiply area and moment by a density for mass and
/// moment of inertia.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassProperties {
    /// Total covered area
    pub area: f32,
    /// Area centroid
    pub centroid: Vec2,
    /// Polar second moment of area about the centroid
    pub moment: f32,
}

/// Shoelace accumulators about the origin; shifted to the centroid once at
/// the end via the parallel-axis theorem
#[derive(Debug)]
struct Accumulator {
    area: f32,
    first: Vec2,
    second: f32,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            area: 0.0,
            first: Vec2::zeros(),
            second: 0.0,
        }
    }

    /// One directed ring edge's Green's-theorem contribution
    fn edge(&mut self, a: Vec2, b: Vec2) {
        let c = a.cross2(&b);
        self.area += c * 0.5;
        self.first += (a + b) * (c / 6.0);
        self.second += c / 12.0
            * (a.x * a.x + a.x * b.x + b.x * b.x + a.y * a.y + a.y * b.y + b.y * b.y);
    }

    /// A CCW-ordered quad ring
    fn quad(&mut self, corners: [Vec2; 4]) {
        for k in 0..4 {
            self.edge(corners[k], corners[(k + 1) % 4]);
        }
    }

    /// A full disk; `0.5 * area * r^2` about its own center, shifted to the
    /// origin frame
    fn disk(&mut self, center: Vec2, radius: f32) {
        let area = PI * radius * radius;
        if area <= 0.0 {
            return;
        }
        self.area += area;
        self.first += center * area;
        self.second += 0.5 * area * radius * radius + area * center.norm_squared();
    }
}

pub(super) fn compute(geometry: &CollisionGeometry) -> MassProperties {
    let mut sum = Accumulator::new();

    for path in geometry.paths() {
        accumulate_path(geometry, path, &mut sum);
    }

    // Every directed polygon edge; an edge is on the outward boundary when
    // its reversal is absent, so shared internal edges gain thickness once
    let mut directed: HashSet<(usize, usize)> = HashSet::new();
    for polygon in geometry.polygons() {
        let n = polygon.indices.len();
        for k in 0..n {
            directed.insert((polygon.indices[k], polygon.indices[(k + 1) % n]));
        }
    }

    for polygon in geometry.polygons() {
        let n = polygon.indices.len();
        for k in 0..n {
            let i = polygon.indices[k];
            let j = polygon.indices[(k + 1) % n];
            let a = geometry.position(i);
            let b = geometry.position(j);
            sum.edge(a, b);

            if !directed.contains(&(j, i)) {
                // CCW winding puts the interior on the left, so outward is
                // the negated perpendicular
                let outward = -(b - a).normalize_or_zero().perp_ccw();
                sum.quad([
                    a + outward * geometry.thickness(i),
                    b + outward * geometry.thickness(j),
                    b,
                    a,
                ]);
            }
        }
    }

    if sum.area.abs() < f32::EPSILON {
        log::debug!("collision geometry has zero area; mass properties default to zero");
        return MassProperties {
            area: 0.0,
            centroid: Vec2::zeros(),
            moment: 0.0,
        };
    }

    let centroid = sum.first / sum.area;
    MassProperties {
        area: sum.area,
        centroid,
        moment: sum.second - sum.area * centroid.norm_squared(),
    }
}

fn accumulate_path(geometry: &CollisionGeometry, path: &CollisionPath, sum: &mut Accumulator) {
    if path.first == path.last {
        sum.disk(
            geometry.position(path.first),
            geometry.thickness(path.first),
        );
        return;
    }

    let mut segment_quad = |i: usize, j: usize| {
        let a = geometry.position(i);
        let b = geometry.position(j);
        let normal = (b - a).normalize_or_zero().perp_ccw();
        let ra = geometry.thickness(i);
        let rb = geometry.thickness(j);
        sum.quad([
            a - normal * ra,
            b - normal * rb,
            b + normal * rb,
            a + normal * ra,
        ]);
    };

    for i in path.first..path.last {
        segment_quad(i, i + 1);
    }
    if path.closed {
        segment_quad(path.last, path.first);
    } else {
        sum.disk(
            geometry.position(path.first),
            geometry.thickness(path.first),
        );
        sum.disk(geometry.position(path.last), geometry.thickness(path.last));
    }
}
