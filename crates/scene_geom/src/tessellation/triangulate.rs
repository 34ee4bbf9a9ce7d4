//! Ear-clipping triangulation for filled shapes
//!
//! Classifies each boundary vertex as convex or reflex by cross-product sign,
//! then repeatedly removes a convex vertex whose ear triangle contains no
//! other boundary vertex, reclassifying the freed neighbors. A simple
//! `n`-vertex ring always reduces to exactly `n - 2` triangles; failing to
//! find an ear means the input self-intersects, which is a caller error.

use crate::foundation::math::{Vec2, Vec2Ext};
use crate::foundation::plane::Plane;

const EPSILON: f32 = 1e-6;

/// Triangulate a simple polygon ring into `n - 2` triangles of local indices.
///
/// Accepts either winding; emitted triangles follow the ring's own winding.
/// Rings with fewer than three points produce no triangles.
///
/// # Panics
///
/// Panics when no ear can be removed, which indicates a self-intersecting
/// boundary.
pub(crate) fn triangulate(points: &[Vec2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    // Normalize to CCW; remember to emit original indices either way.
    let ccw = signed_area(points) >= 0.0;
    let index_at = |i: usize| -> usize {
        if ccw {
            i
        } else {
            n - 1 - i
        }
    };
    let point_at = |i: usize| points[index_at(i)];

    let mut next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
    let mut prev: Vec<usize> = (0..n).map(|i| (i + n - 1) % n).collect();
    let mut removed = vec![false; n];
    let mut triangles = Vec::with_capacity(n - 2);

    let mut remaining = n;
    let mut cursor = 0;
    while remaining > 3 {
        let mut found = false;
        let mut scanned = 0;
        let mut i = cursor;
        while scanned < remaining {
            if !removed[i]
                && !reflex(i, &prev, &next, &point_at)
                && is_ear(i, &prev, &next, &removed, &point_at)
            {
                triangles.push([
                    index_at(prev[i]) as u32,
                    index_at(i) as u32,
                    index_at(next[i]) as u32,
                ]);
                removed[i] = true;
                next[prev[i]] = next[i];
                prev[next[i]] = prev[i];
                cursor = prev[i];
                remaining -= 1;
                found = true;
                break;
            }
            i = next[i];
            scanned += 1;
        }
        assert!(
            found,
            "ear clipping failed: shape boundary is self-intersecting"
        );
    }

    // The final triangle
    let i = (0..n).find(|&i| !removed[i]).unwrap_or(0);
    triangles.push([
        index_at(prev[i]) as u32,
        index_at(i) as u32,
        index_at(next[i]) as u32,
    ]);

    if !ccw {
        for tri in &mut triangles {
            tri.swap(0, 2);
        }
    }
    triangles
}

/// Signed (shoelace) area of a ring; positive for CCW winding
pub(crate) fn signed_area(points: &[Vec2]) -> f32 {
    let mut sum = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        sum += a.cross2(&b);
    }
    sum * 0.5
}

/// Reflex classification against the current ring neighbors
fn reflex(i: usize, prev: &[usize], next: &[usize], point_at: &impl Fn(usize) -> Vec2) -> bool {
    let a = point_at(prev[i]);
    let b = point_at(i);
    let c = point_at(next[i]);
    (b - a).cross2(&(c - b)) < -EPSILON
}

fn is_ear(
    i: usize,
    prev: &[usize],
    next: &[usize],
    removed: &[bool],
    point_at: &impl Fn(usize) -> Vec2,
) -> bool {
    let a = point_at(prev[i]);
    let b = point_at(i);
    let c = point_at(next[i]);

    // Half-planes of the candidate triangle. Only reflex vertices can block
    // an ear, and one sitting exactly on the triangle boundary still blocks,
    // so the containment test is non-strict. The plane through the two
    // neighbors (c -> a) is the separating diagonal.
    let planes = [
        Plane::from_points(a, b),
        Plane::from_points(b, c),
        Plane::from_points(c, a),
    ];

    let mut j = next[next[i]];
    while j != prev[i] {
        if !removed[j] && reflex(j, prev, next, point_at) {
            let p = point_at(j);
            let inside = planes
                .iter()
                .all(|plane| plane.signed_distance(p) >= -EPSILON);
            if inside {
                return false;
            }
        }
        j = next[j];
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle_area(points: &[Vec2], tri: [u32; 3]) -> f32 {
        let [a, b, c] = tri.map(|i| points[i as usize]);
        (b - a).cross2(&(c - a)) * 0.5
    }

    fn assert_triangulation(points: &[Vec2]) {
        let triangles = triangulate(points);
        assert_eq!(triangles.len(), points.len() - 2);
        let sum: f32 = triangles
            .iter()
            .map(|&tri| triangle_area(points, tri).abs())
            .sum();
        assert_relative_eq!(sum, signed_area(points).abs(), epsilon = 1e-4);
    }

    #[test]
    fn test_square() {
        assert_triangulation(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]);
    }

    #[test]
    fn test_square_clockwise() {
        assert_triangulation(&[
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ]);
    }

    #[test]
    fn test_concave_polygon() {
        // Arrowhead with a deep notch
        assert_triangulation(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(1.0, 0.5),
            Vec2::new(2.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]);
    }

    #[test]
    fn test_collinear_vertices() {
        // Midpoint on the bottom edge is collinear
        assert_triangulation(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]);
    }

    #[test]
    fn test_too_few_points() {
        assert!(triangulate(&[Vec2::zeros(), Vec2::new(1.0, 0.0)]).is_empty());
    }

    #[test]
    fn test_star_polygon() {
        // Four-pointed star, alternating convex and reflex vertices
        let mut points = Vec::new();
        for i in 0..8 {
            let angle = std::f32::consts::PI * 0.25 * i as f32;
            let radius = if i % 2 == 0 { 1.0 } else { 0.35 };
            points.push(Vec2::new(angle.cos(), angle.sin()) * radius);
        }
        assert_triangulation(&points);
    }
}
