//! End-to-end check: the same square authored with the turtle builder both
//! tessellates cleanly and reports textbook mass properties as collision
//! geometry.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use scene_geom::prelude::*;

#[test]
fn square_roundtrip_tessellation_and_mass() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Author a unit square with the turtle: four advances with 90 degree
    // pivots, closed as a filled shape
    let mut list = ShapeList::new();
    list.pen_down(true);
    for _ in 0..4 {
        list.advance(1.0);
        list.pivot(90.0);
    }
    list.pen_up(true);

    let geometry = list.create_geometry(8.0).unwrap();
    assert_eq!(geometry.vertex_count(), 4);
    assert_eq!(geometry.triangle_count(), 2);

    // The same four corners as zero-thickness collision geometry
    let mut vertices = Vec::new();
    for row in 0..geometry.vertex_count() {
        let p = geometry.position(row);
        vertices.extend_from_slice(&[p.x, p.y, 0.0]);
    }
    let mut sizes = BTreeMap::new();
    sizes.insert("vertex".to_string(), 2);
    sizes.insert("thickness".to_string(), 1);

    let collision = CollisionGeometry::new(
        vertices,
        &sizes,
        Vec::new(),
        vec![CollisionPolygon {
            indices: vec![0, 1, 2, 3],
        }],
    )
    .unwrap();

    assert_relative_eq!(collision.area(), 1.0, epsilon = 1e-4);
    assert_relative_eq!(
        collision.center_of_mass(),
        Vec2::new(0.5, 0.5),
        epsilon = 1e-4
    );
}
