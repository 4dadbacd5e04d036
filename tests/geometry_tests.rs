//! Geometry Generator Tests
//!
//! Tests for:
//! - Heart curve closure and extruded heart solids
//! - Parametric heart surface grid and seam closure
//! - Bevelled extrusion vertex/index bookkeeping
//! - Cap triangulation (convex, concave, with holes)
//! - Vertex normal computation (area-weighted)
//! - Attribute read/update and version bumps

use glam::{Vec2, Vec3};
use wgpu::VertexFormat;

use heartfield::resources::geometry::{Attribute, Geometry};
use heartfield::resources::primitives::extrude::{ExtrudeOptions, Shape, extrude_shape};
use heartfield::resources::primitives::triangulate::{signed_area, triangulate_shape};
use heartfield::resources::primitives::{
    create_heart_extruded, create_heart_surface, heart_curve, heart_surface_point,
};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec2_approx(a: Vec2, b: Vec2) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y)
}

fn square() -> Vec<Vec2> {
    vec![
        Vec2::new(-1.0, -1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
    ]
}

// ============================================================================
// Heart curve
// ============================================================================

#[test]
fn heart_curve_is_closed() {
    for size in [0.3, 1.0, 2.5, 10.0] {
        let start = heart_curve(0.0, size);
        let end = heart_curve(1.0, size);
        assert!(
            vec2_approx(start, end),
            "Curve should close for size {size}: {start:?} vs {end:?}"
        );
    }
}

#[test]
fn heart_curve_scales_linearly() {
    let p1 = heart_curve(0.13, 1.0);
    let p2 = heart_curve(0.13, 2.0);
    assert!(vec2_approx(p2, p1 * 2.0));
}

#[test]
fn heart_extruded_has_positions_normals_indices() {
    let geom = create_heart_extruded(1.0, 50);
    assert!(geom.get_attribute("position").is_some());
    assert!(geom.get_attribute("normal").is_some());
    let index = geom.index_attribute().expect("extrusion is indexed");
    assert_eq!(index.count % 3, 0, "index count must form whole triangles");
    assert!(geom.vertex_count() > 0);
}

// ============================================================================
// Parametric heart surface
// ============================================================================

#[test]
fn heart_surface_grid_counts() {
    let geom = create_heart_surface(1.0, 24);
    assert_eq!(geom.vertex_count(), 25 * 25);
    assert_eq!(geom.draw_count(), 24 * 24 * 6);
}

#[test]
fn heart_surface_closes_around_v() {
    for u in [0.1, 0.35, 0.8] {
        let a = heart_surface_point(u, 0.0, 1.0);
        let b = heart_surface_point(u, 1.0, 1.0);
        assert!(
            (a - b).length() < EPSILON,
            "surface seam should close at u = {u}"
        );
    }
}

#[test]
fn heart_surface_normals_are_unit_or_zero() {
    let geom = create_heart_surface(1.0, 12);
    let normals = geom.get_attribute("normal").expect("normals derived");
    for i in 0..normals.count {
        let n = normals.read_vec3(i).unwrap();
        let len = n.length();
        assert!(
            len < EPSILON || (len - 1.0).abs() < 1e-2,
            "normal {i} has length {len}"
        );
    }
}

// ============================================================================
// Extrusion bookkeeping
// ============================================================================

#[test]
fn extrude_square_with_bevel_counts() {
    let geom = extrude_shape(
        &Shape::new(square()),
        &ExtrudeOptions {
            depth: 1.0,
            bevel_enabled: true,
            bevel_thickness: 0.1,
            bevel_size: 0.1,
            bevel_segments: 3,
        },
    );

    // Layers: 4 front bevel rings, body back ring, 3 back bevel rings.
    let rings: u32 = 2 * 3 + 2;
    assert_eq!(geom.vertex_count(), rings * 4);

    // Walls: (rings-1) quads per edge; caps: two triangles each.
    let wall_triangles = (rings - 1) * 4 * 2;
    assert_eq!(geom.draw_count(), (wall_triangles + 4) * 3);
}

#[test]
fn extrude_square_without_bevel_counts() {
    let geom = extrude_shape(
        &Shape::new(square()),
        &ExtrudeOptions {
            depth: 2.0,
            bevel_enabled: false,
            bevel_thickness: 0.0,
            bevel_size: 0.0,
            bevel_segments: 0,
        },
    );

    assert_eq!(geom.vertex_count(), 8);
    assert_eq!(geom.draw_count(), (4 * 2 + 4) * 3);
}

#[test]
fn extrude_spans_expected_depth_range() {
    let geom = extrude_shape(
        &Shape::new(square()),
        &ExtrudeOptions {
            depth: 1.0,
            bevel_enabled: true,
            bevel_thickness: 0.2,
            bevel_size: 0.1,
            bevel_segments: 2,
        },
    );

    let positions = geom.get_attribute("position").unwrap();
    let mut min_z = f32::INFINITY;
    let mut max_z = f32::NEG_INFINITY;
    for i in 0..positions.count {
        let z = positions.read_vec3(i).unwrap().z;
        min_z = min_z.min(z);
        max_z = max_z.max(z);
    }
    assert!(approx(min_z, -0.2));
    assert!(approx(max_z, 1.2));
}

// ============================================================================
// Cap triangulation
// ============================================================================

#[test]
fn triangulate_square() {
    let tris = triangulate_shape(&square(), &[]);
    assert_eq!(tris.len(), 2);
}

#[test]
fn triangulate_concave_heart_outline() {
    let outline: Vec<Vec2> = (0..50).map(|i| heart_curve(i as f32 / 50.0, 1.0)).collect();
    let tris = triangulate_shape(&outline, &[]);
    // A simple polygon always decomposes into n - 2 triangles.
    assert_eq!(tris.len(), 48);
}

#[test]
fn triangulate_square_with_hole() {
    let hole = vec![
        Vec2::new(-0.5, -0.5),
        Vec2::new(0.5, -0.5),
        Vec2::new(0.5, 0.5),
        Vec2::new(-0.5, 0.5),
    ];
    let tris = triangulate_shape(&square(), &[hole]);
    // Bridging duplicates two vertices: (4 + 4 + 2) - 2 triangles.
    assert_eq!(tris.len(), 8);

    // Every triangle references valid vertices of the concatenated list.
    for tri in &tris {
        for &idx in tri {
            assert!(idx < 8);
        }
    }
}

#[test]
fn triangulated_area_matches_polygon_area() {
    let outline: Vec<Vec2> = (0..50).map(|i| heart_curve(i as f32 / 50.0, 2.0)).collect();
    let polygon_area = signed_area(&outline).abs();

    let tris = triangulate_shape(&outline, &[]);
    let tri_area: f32 = tris
        .iter()
        .map(|t| {
            signed_area(&[
                outline[t[0] as usize],
                outline[t[1] as usize],
                outline[t[2] as usize],
            ])
            .abs()
        })
        .sum();

    assert!(
        (polygon_area - tri_area).abs() < polygon_area * 1e-3,
        "triangulation should cover the polygon exactly: {polygon_area} vs {tri_area}"
    );
}

// ============================================================================
// Vertex normals
// ============================================================================

#[test]
fn compute_normals_single_triangle_facing_z() {
    let mut geom = Geometry::new();

    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    geom.set_attribute(
        "position",
        Attribute::new_planar(&positions, VertexFormat::Float32x3),
    );

    geom.compute_vertex_normals();

    let normal_attr = geom.get_attribute("normal").expect("Should have normals");
    for i in 0..3 {
        let n = normal_attr.read_vec3(i).unwrap();
        assert!(
            n.z.abs() > 0.9,
            "Normal {i} should be approximately ±Z, got {n:?}"
        );
    }
}

#[test]
fn compute_normals_indexed_quad() {
    let mut geom = Geometry::new();

    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    geom.set_attribute(
        "position",
        Attribute::new_planar(&positions, VertexFormat::Float32x3),
    );
    geom.set_indices(&[0u16, 1, 2, 0, 2, 3]);

    geom.compute_vertex_normals();

    let normal_attr = geom.get_attribute("normal").expect("Should have normals");
    for i in 0..4 {
        let n = normal_attr.read_vec3(i).unwrap();
        assert!(n.z > 0.9, "Normal {i} should point +Z, got {n:?}");
    }
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn attribute_read_vec3() {
    let positions = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let attr = Attribute::new_planar(&positions, VertexFormat::Float32x3);

    assert_eq!(attr.count, 2);
    assert!(attr.read_vec3(0).unwrap().abs_diff_eq(positions[0], EPSILON));
    assert!(attr.read_vec3(1).unwrap().abs_diff_eq(positions[1], EPSILON));
    assert!(attr.read_vec3(2).is_none());
}

#[test]
fn attribute_update_bumps_version_keeps_count() {
    let sizes = vec![1.0f32, 2.0, 3.0];
    let mut attr = Attribute::new_planar(&sizes, VertexFormat::Float32);
    let v0 = attr.version();

    attr.update_data(&[4.0f32, 5.0, 6.0]);

    assert!(attr.version() > v0, "update must bump the version");
    assert_eq!(attr.count, 3);
    assert!(approx(attr.read_f32(1).unwrap(), 5.0));
}
