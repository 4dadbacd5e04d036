//! Procedural heart geometry, two ways: a bevelled extrusion of the classic
//! closed-form heart curve, and a parametric heart surface sampled on a grid.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use wgpu::VertexFormat;

use crate::resources::geometry::{Attribute, Geometry};
use crate::resources::primitives::extrude::{ExtrudeOptions, Shape, extrude_shape};

/// Evaluates the closed-form heart curve at `t ∈ [0, 1]`.
///
/// `x = 16·sin³(2πt)`, `y = 13·cos(2πt) − 5·cos(4πt) − 2·cos(6πt) − cos(8πt)`,
/// both scaled by `size / 16`, with y flipped so the lobes sit at the top in
/// the scene's screen orientation. The curve is closed:
/// `heart_curve(0, s) == heart_curve(1, s)`.
#[must_use]
pub fn heart_curve(t: f32, size: f32) -> Vec2 {
    let t = t * 2.0 * PI;
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec2::new(x * size / 16.0, -y * size / 16.0)
}

/// Samples the heart curve into a closed outline (no duplicated end point).
#[must_use]
pub fn heart_shape(size: f32, segments: u32) -> Shape {
    let segments = segments.max(3);
    let contour = (0..segments)
        .map(|i| heart_curve(i as f32 / segments as f32, size))
        .collect();
    Shape::new(contour)
}

/// Heart solid built by extruding the heart curve with a bevelled rim.
#[must_use]
pub fn create_heart_extruded(size: f32, segments: u32) -> Geometry {
    let shape = heart_shape(size, segments);
    extrude_shape(
        &shape,
        &ExtrudeOptions {
            depth: size * 0.5,
            bevel_enabled: true,
            bevel_thickness: size * 0.1,
            bevel_size: size * 0.1,
            bevel_segments: 3,
        },
    )
}

/// Evaluates the parametric heart surface at `(u, v) ∈ [0, 1]²`.
///
/// A sphere-like closed surface pinched by the shape factor `1 − 0.5·sin(πu)`
/// on x/z, with a lobed y term and a downward offset.
#[must_use]
pub fn heart_surface_point(u: f32, v: f32, size: f32) -> Vec3 {
    let u = u * PI;
    let v = v * 2.0 * PI;

    let x = u.sin() * v.cos();
    let y = 0.8 * u.cos() + 0.2 * (2.0 * u).cos() * (3.0 * v).cos();
    let z = u.sin() * v.sin();

    let scale = 1.0 - 0.5 * u.sin();
    Vec3::new(
        x * scale * size,
        y * size * 1.2 - size * 0.5,
        z * scale * size,
    )
}

/// Heart solid built from the parametric surface on a `segments × segments`
/// grid. Adjacent cells become two triangles each with consistent winding;
/// normals are derived from the triangle mesh rather than analytically.
#[must_use]
pub fn create_heart_surface(size: f32, segments: u32) -> Geometry {
    let segments = segments.max(3);

    let mut positions = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        for j in 0..=segments {
            let v = j as f32 / segments as f32;
            positions.push(heart_surface_point(u, v, size));
        }
    }

    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    let stride = segments + 1;
    for i in 0..segments {
        for j in 0..segments {
            let a = i * stride + j;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;

            indices.push(a);
            indices.push(c);
            indices.push(b);

            indices.push(c);
            indices.push(d);
            indices.push(b);
        }
    }

    let mut geometry = Geometry::new();
    geometry.set_attribute(
        "position",
        Attribute::new_planar(&positions, VertexFormat::Float32x3),
    );
    geometry.set_indices_u32(&indices);
    geometry.compute_vertex_normals();
    geometry
}
