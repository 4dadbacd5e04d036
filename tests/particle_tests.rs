//! Particle Field Tests
//!
//! Tests for:
//! - Parallel array length invariants
//! - Volume-uniform spherical sampling (statistical)
//! - Color and size value ranges

use rand::SeedableRng;
use rand::rngs::SmallRng;

use heartfield::resources::primitives::particles::{
    ParticleFieldOptions, create_particle_field,
};

#[test]
fn particle_arrays_have_equal_length() {
    let mut rng = SmallRng::seed_from_u64(7);
    let geom = create_particle_field(
        &ParticleFieldOptions {
            count: 500,
            radius: 10.0,
            size_range: (0.5, 2.5),
        },
        &mut rng,
    );

    let positions = geom.get_attribute("position").unwrap();
    let colors = geom.get_attribute("color").unwrap();
    let sizes = geom.get_attribute("size").unwrap();

    assert_eq!(positions.count, 500);
    assert_eq!(colors.count, 500);
    assert_eq!(sizes.count, 500);
}

#[test]
fn particles_stay_inside_radius() {
    let mut rng = SmallRng::seed_from_u64(11);
    let radius = 30.0;
    let geom = create_particle_field(
        &ParticleFieldOptions {
            count: 2000,
            radius,
            size_range: (0.5, 2.5),
        },
        &mut rng,
    );

    let positions = geom.get_attribute("position").unwrap();
    for i in 0..positions.count {
        let p = positions.read_vec3(i).unwrap();
        assert!(p.length() <= radius + 1e-3, "particle {i} escaped: {p:?}");
    }
}

/// For volume-uniform sampling, radius³ must be uniform on [0, R³]: each
/// decile of r³/R³ should hold about a tenth of the samples.
#[test]
fn radius_cubed_is_uniform() {
    let mut rng = SmallRng::seed_from_u64(42);
    let count = 100_000;
    let radius = 30.0f32;
    let geom = create_particle_field(
        &ParticleFieldOptions {
            count,
            radius,
            size_range: (0.5, 2.5),
        },
        &mut rng,
    );

    let positions = geom.get_attribute("position").unwrap();
    let mut bins = [0usize; 10];
    for i in 0..positions.count {
        let r = positions.read_vec3(i).unwrap().length();
        let fraction = (r / radius).powi(3);
        let bin = ((fraction * 10.0) as usize).min(9);
        bins[bin] += 1;
    }

    let expected = count as f32 / 10.0;
    for (bin, &hits) in bins.iter().enumerate() {
        let deviation = (hits as f32 - expected).abs() / count as f32;
        assert!(
            deviation < 0.015,
            "bin {bin} holds {hits} of {count} samples (deviation {deviation})"
        );
    }
}

#[test]
fn particle_colors_run_white_to_pink() {
    let mut rng = SmallRng::seed_from_u64(3);
    let geom = create_particle_field(
        &ParticleFieldOptions {
            count: 1000,
            radius: 5.0,
            size_range: (0.5, 2.5),
        },
        &mut rng,
    );

    let colors = geom.get_attribute("color").unwrap();
    for i in 0..colors.count {
        let c = colors.read_vec3(i).unwrap();
        assert!((c.x - 1.0).abs() < 1e-6, "red channel is fixed at 1");
        assert!((0.6..=1.0).contains(&c.y), "green out of range: {}", c.y);
        assert!((0.7..=1.0).contains(&c.z), "blue out of range: {}", c.z);
    }
}

#[test]
fn particle_sizes_start_in_range() {
    let mut rng = SmallRng::seed_from_u64(5);
    let geom = create_particle_field(
        &ParticleFieldOptions {
            count: 1000,
            radius: 5.0,
            size_range: (0.5, 2.5),
        },
        &mut rng,
    );

    let sizes = geom.get_attribute("size").unwrap();
    for i in 0..sizes.count {
        let s = sizes.read_f32(i).unwrap();
        assert!((0.5..2.5).contains(&s), "size out of range: {s}");
    }
}
