//! Particle field generation.

use rand::Rng;
use wgpu::VertexFormat;

use crate::resources::geometry::{Attribute, Geometry};

pub struct ParticleFieldOptions {
    /// Number of points. Fixed for the lifetime of the geometry.
    pub count: u32,
    /// Radius of the spherical volume.
    pub radius: f32,
    /// Base size range; sizes are later re-modulated every animation tick.
    pub size_range: (f32, f32),
}

impl Default for ParticleFieldOptions {
    fn default() -> Self {
        Self {
            count: 2000,
            radius: 30.0,
            size_range: (0.5, 2.5),
        }
    }
}

/// Builds a point cloud distributed uniformly *by volume* inside a sphere.
///
/// Sampling: radius `r = R·∛u` (so `r³` is uniform on `[0, R³]`), azimuth
/// uniform on `[0, 2π)`, and the cosine of the inclination uniform on
/// `[−1, 1]` — the standard recipe that avoids clustering at the poles and
/// at the center.
///
/// Colors interpolate from pink toward white with an independent uniform
/// factor; sizes start uniform in `size_range`.
///
/// The returned geometry carries parallel `position` (n×3), `color` (n×3)
/// and `size` (n) attributes whose lengths never change afterwards.
#[must_use]
pub fn create_particle_field(options: &ParticleFieldOptions, rng: &mut impl Rng) -> Geometry {
    let count = options.count as usize;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(count);
    let mut colors: Vec<[f32; 3]> = Vec::with_capacity(count);
    let mut sizes: Vec<f32> = Vec::with_capacity(count);

    for _ in 0..count {
        let radius = options.radius * rng.random::<f32>().cbrt();
        let theta = rng.random::<f32>() * std::f32::consts::TAU;
        let phi = (2.0 * rng.random::<f32>() - 1.0f32).acos();

        positions.push([
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        ]);

        let factor = rng.random::<f32>();
        colors.push([1.0, 0.6 + 0.4 * factor, 0.7 + 0.3 * factor]);

        sizes.push(rng.random_range(options.size_range.0..options.size_range.1));
    }

    let mut geometry = Geometry::new();
    geometry.set_attribute(
        "position",
        Attribute::new_planar(&positions, VertexFormat::Float32x3),
    );
    geometry.set_attribute("color", Attribute::new_planar(&colors, VertexFormat::Float32x3));
    geometry.set_attribute("size", Attribute::new_planar(&sizes, VertexFormat::Float32));
    geometry
}
