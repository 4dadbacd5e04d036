//! Bevelled extrusion of 2D outlines along +Z.
//!
//! Takes closed outlines (optionally with holes), sweeps them through a stack
//! of offset/depth layers — inset bevel rings, straight body, mirrored back
//! bevel — and stitches walls plus triangulated caps into one indexed
//! geometry. Smooth normals are derived from the result.

use glam::{Vec2, Vec3};
use wgpu::VertexFormat;

use crate::resources::geometry::{Attribute, Geometry};
use crate::resources::primitives::triangulate::{signed_area, triangulate_shape};

/// A closed 2D outline with optional holes, in outline coordinates.
#[derive(Debug, Clone)]
pub struct Shape {
    pub contour: Vec<Vec2>,
    pub holes: Vec<Vec<Vec2>>,
}

impl Shape {
    #[must_use]
    pub fn new(contour: Vec<Vec2>) -> Self {
        Self {
            contour,
            holes: Vec::new(),
        }
    }

    /// Normalizes winding: contour counter-clockwise, holes clockwise.
    /// The extruder and triangulator both rely on this orientation.
    fn normalized(&self) -> Shape {
        let mut contour = self.contour.clone();
        if signed_area(&contour) < 0.0 {
            contour.reverse();
        }
        let holes = self
            .holes
            .iter()
            .map(|h| {
                let mut h = h.clone();
                if signed_area(&h) > 0.0 {
                    h.reverse();
                }
                h
            })
            .collect();
        Shape { contour, holes }
    }

    /// All rings (contour first, then holes), in triangulation order.
    fn rings(&self) -> impl Iterator<Item = &[Vec2]> {
        std::iter::once(self.contour.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    fn vertex_count(&self) -> usize {
        self.contour.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExtrudeOptions {
    /// Extrusion depth along +Z.
    pub depth: f32,
    pub bevel_enabled: bool,
    /// How far the bevel extends beyond the depth range on each side.
    pub bevel_thickness: f32,
    /// How far the outline is inset at the bevelled rim.
    pub bevel_size: f32,
    pub bevel_segments: u32,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 1.0,
            bevel_enabled: true,
            bevel_thickness: 0.1,
            bevel_size: 0.1,
            bevel_segments: 3,
        }
    }
}

/// Extrudes a single shape. See [`extrude_shapes`].
#[must_use]
pub fn extrude_shape(shape: &Shape, options: &ExtrudeOptions) -> Geometry {
    extrude_shapes(std::slice::from_ref(shape), options)
}

/// Extrudes one or more shapes into a single geometry.
///
/// Each shape contributes its own caps and walls; a glyph like `B` arrives as
/// one contour with two holes, a glyph like `i` as two independent shapes.
#[must_use]
pub fn extrude_shapes(shapes: &[Shape], options: &ExtrudeOptions) -> Geometry {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let layers = build_layers(options);

    for shape in shapes {
        let shape = shape.normalized();
        if shape.contour.len() < 3 {
            continue;
        }

        let base = positions.len() as u32;
        let ring_len = shape.vertex_count() as u32;

        // Per-vertex outward offset directions, shared by every layer.
        let offset_dirs: Vec<Vec2> = shape.rings().flat_map(vertex_normals).collect();
        let flat: Vec<Vec2> = shape.rings().flatten().copied().collect();

        for &(offset, z) in &layers {
            for (p, dir) in flat.iter().zip(&offset_dirs) {
                let q = *p + *dir * offset;
                positions.push(Vec3::new(q.x, q.y, z));
            }
        }

        // Caps reuse the flat triangulation on the first and last layers.
        let cap = triangulate_shape(&shape.contour, &shape.holes);
        let last = (layers.len() as u32 - 1) * ring_len;
        for tri in &cap {
            // Front cap faces -Z, so its winding is reversed.
            indices.extend_from_slice(&[base + tri[0], base + tri[2], base + tri[1]]);
            indices.extend_from_slice(&[
                base + last + tri[0],
                base + last + tri[1],
                base + last + tri[2],
            ]);
        }

        // Walls between consecutive layers, ring by ring.
        let mut ring_start = 0u32;
        for ring in shape.rings() {
            let n = ring.len() as u32;
            for layer in 0..layers.len() as u32 - 1 {
                let lower = base + layer * ring_len + ring_start;
                let upper = lower + ring_len;
                for i in 0..n {
                    let j = (i + 1) % n;
                    let a = lower + i;
                    let b = lower + j;
                    let c = upper + j;
                    let d = upper + i;
                    indices.extend_from_slice(&[a, b, c]);
                    indices.extend_from_slice(&[a, c, d]);
                }
            }
            ring_start += n;
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

/// Layer stack `(outline offset, z)` front-to-back. Offsets are negative
/// (inset) at the bevelled rims and zero along the body.
fn build_layers(options: &ExtrudeOptions) -> Vec<(f32, f32)> {
    if !options.bevel_enabled || options.bevel_segments == 0 {
        return vec![(0.0, 0.0), (0.0, options.depth)];
    }

    let bs = options.bevel_segments;
    let mut layers = Vec::with_capacity(2 * bs as usize + 2);

    for s in 0..=bs {
        let t = s as f32 / bs as f32;
        let offset = -options.bevel_size * (1.0 - (t * std::f32::consts::FRAC_PI_2).sin());
        let z = -options.bevel_thickness * (1.0 - t);
        layers.push((offset, z));
    }
    layers.push((0.0, options.depth));
    for s in 1..=bs {
        let t = s as f32 / bs as f32;
        let offset = -options.bevel_size * (1.0 - ((1.0 - t) * std::f32::consts::FRAC_PI_2).sin());
        let z = options.depth + options.bevel_thickness * t;
        layers.push((offset, z));
    }

    layers
}

/// Per-vertex miter directions for offsetting a ring outward.
///
/// With the normalized winding (contour CCW, holes CW) the same formula moves
/// every boundary outward from the solid, so a negative offset uniformly
/// shrinks the solid: outer rim pulls in, holes widen.
fn vertex_normals(ring: &[Vec2]) -> Vec<Vec2> {
    let n = ring.len();
    let mut normals = Vec::with_capacity(n);

    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let curr = ring[i];
        let next = ring[(i + 1) % n];

        let edge_normal = |a: Vec2, b: Vec2| -> Vec2 {
            let d = (b - a).normalize_or_zero();
            Vec2::new(d.y, -d.x)
        };

        let n1 = edge_normal(prev, curr);
        let n2 = edge_normal(curr, next);
        let sum = n1 + n2;

        if sum.length_squared() < 1e-8 {
            // Hairpin corner; fall back to one edge normal.
            normals.push(n1);
            continue;
        }

        let dir = sum.normalize();
        // Miter scale so edges (not corners) move by the offset amount,
        // clamped to keep spike corners bounded.
        let scale = 1.0 / dir.dot(n1).max(0.35);
        normals.push(dir * scale);
    }

    normals
}
