//! Heart-scene construction.
//!
//! Pure assembly: generators produce geometry, this module places it. All
//! randomness flows through the caller's RNG so a seeded view builds a
//! deterministic scene.

use glam::Vec3;
use rand::Rng;

use crate::assets::AssetServer;
use crate::assets::font::Font;
use crate::config::HeartSceneConfig;
use crate::resources::material::{Material, hex_color, hsl_color};
use crate::resources::mesh::Mesh;
use crate::resources::primitives::{
    ParticleFieldOptions, SphereOptions, TextOptions, create_glyph, create_heart_extruded,
    create_heart_surface, create_particle_field, create_sphere,
};
use crate::scene::{Camera, Light, NodeKey, Scene};
use crate::view::{AnimatedEntity, ParticleField, SceneResources};

/// Uniform in `[-extent/2, extent/2]`.
fn rand_spread(rng: &mut impl Rng, extent: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * extent
}

/// Random point on a spherical band: radius uniform in `[min_r, max_r]`,
/// direction uniform over the sphere (cosine-uniform inclination, so no
/// pole clustering).
fn random_position(rng: &mut impl Rng, min_r: f32, max_r: f32) -> Vec3 {
    let radius = min_r + rng.random::<f32>() * (max_r - min_r);
    let theta = rng.random::<f32>() * std::f32::consts::TAU;
    let phi = (2.0 * rng.random::<f32>() - 1.0f32).acos();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Camera at the configured distance on +Z, aimed at the origin.
pub(crate) fn build_camera(scene: &mut Scene, config: &HeartSceneConfig, aspect: f32) -> NodeKey {
    let camera = Camera::new_perspective(config.camera_fov, aspect, 0.1, 1000.0);
    let camera_node = scene.add_camera(camera);

    if let Some(node) = scene.get_node_mut(camera_node) {
        node.transform.position = Vec3::new(0.0, 0.0, config.camera_distance);
        node.transform.look_at(Vec3::ZERO, Vec3::Y);
    }
    scene.active_camera = Some(camera_node);

    camera_node
}

/// Overall illumination independent of the scattered point lights: a dim
/// red ambient plus a white key light and two colored fills.
pub(crate) fn build_lighting(scene: &mut Scene) {
    scene.ambient_color = hex_color(0x331122);
    scene.ambient_intensity = 0.4;

    let rig: [(u32, f32, Vec3); 3] = [
        (0xffffff, 1.0, Vec3::new(2.0, 2.0, 5.0)),
        (0xffcccc, 0.8, Vec3::new(-5.0, 1.0, -2.0)),
        (0xccccff, 0.5, Vec3::new(0.0, -5.0, 2.0)),
    ];

    for (color, intensity, position) in rig {
        let key = scene.add_light(Light::new_directional(hex_color(color), intensity));
        if let Some(node) = scene.get_node_mut(key) {
            node.transform.position = position;
        }
    }
}

/// Scatters the heart solids around the title, biased away from the center.
pub(crate) fn build_hearts(
    scene: &mut Scene,
    assets: &AssetServer,
    resources: &mut SceneResources,
    group: NodeKey,
    config: &HeartSceneConfig,
    rng: &mut impl Rng,
) -> Vec<AnimatedEntity> {
    let mut entities = Vec::with_capacity(config.heart_count as usize);

    for _ in 0..config.heart_count {
        let size = rng.random_range(config.heart_size.0..config.heart_size.1);

        // Half the hearts use the extruded curve, half the parametric
        // surface.
        let geometry = if rng.random::<f32>() > 0.5 {
            create_heart_surface(size, config.surface_segments)
        } else {
            create_heart_extruded(size, config.outline_segments)
        };
        let geometry = resources.track_geometry(assets.add_geometry(geometry));

        let base_color = config.heart_palette[rng.random_range(0..config.heart_palette.len())];
        let material = Material::new_standard(
            base_color,
            0.2,
            0.3,
            base_color * config.heart_emissive_factor,
        );
        let material = resources.track_material(assets.add_material(material));

        // Two-band placement: the center stays clear for the letter group.
        let position = if rng.random::<f32>() < config.outer_probability {
            random_position(rng, config.outer_band.0, config.outer_band.1)
        } else {
            random_position(rng, config.inner_band.0, config.inner_band.1)
        };

        let tilt = Vec3::new(
            rng.random::<f32>() * std::f32::consts::TAU,
            rng.random::<f32>() * std::f32::consts::TAU,
            rng.random::<f32>() * std::f32::consts::TAU,
        );
        let scale = rng.random_range(config.heart_scale.0..config.heart_scale.1);

        let node = scene
            .build_node("Heart")
            .with_mesh(Mesh::new(geometry, material).with_name("Heart"))
            .with_position(position)
            .with_rotation_euler(tilt.x, tilt.y, tilt.z)
            .with_scale(scale)
            .with_parent(group)
            .build();

        entities.push(AnimatedEntity::new(
            node,
            Vec3::new(
                rand_spread(rng, 0.03),
                rand_spread(rng, 0.03),
                rand_spread(rng, 0.03),
            ),
            0.2 + rng.random::<f32>() * 0.8,
            position.y,
            tilt,
        ));
    }

    entities
}

/// Scattered glowing point lights, each visualized by a small emissive
/// sphere, plus one white center light aimed at the letters.
pub(crate) fn build_point_lights(
    scene: &mut Scene,
    assets: &AssetServer,
    resources: &mut SceneResources,
    group: NodeKey,
    config: &HeartSceneConfig,
    rng: &mut impl Rng,
) {
    let glow = hex_color(0xff8888);

    let sphere = create_sphere(&SphereOptions {
        radius: 0.2,
        width_segments: 16,
        height_segments: 16,
    });
    let sphere = resources.track_geometry(assets.add_geometry(sphere));
    let gizmo_material =
        resources.track_material(assets.add_material(Material::new_standard(glow, 0.0, 0.5, glow)));

    for _ in 0..config.point_light_count {
        let position = random_position(rng, config.light_band.0, config.light_band.1);

        let light = scene.add_light_to_parent(Light::new_point(glow, 0.8, 10.0), group);
        if let Some(node) = scene.get_node_mut(light) {
            node.transform.position = position;
        }

        scene
            .build_node("LightGizmo")
            .with_mesh(Mesh::new(sphere, gizmo_material).with_name("LightGizmo"))
            .with_position(position)
            .with_parent(group)
            .build();
    }

    let center = scene.add_light_to_parent(Light::new_point(Vec3::ONE, 1.5, 20.0), group);
    if let Some(node) = scene.get_node_mut(center) {
        node.transform.position = Vec3::new(0.0, 0.0, 5.0);
    }
}

/// The particle field, added at the scene root: it spins independently of
/// the heart group and is animated by its own rule.
pub(crate) fn build_particles(
    scene: &mut Scene,
    assets: &AssetServer,
    resources: &mut SceneResources,
    config: &HeartSceneConfig,
    rng: &mut impl Rng,
) -> ParticleField {
    let geometry = create_particle_field(
        &ParticleFieldOptions {
            count: config.particle_count,
            radius: config.particle_radius,
            size_range: config.particle_size,
        },
        rng,
    );
    let geometry = resources.track_geometry(assets.add_geometry(geometry));
    let material = resources.track_material(assets.add_material(Material::new_points(0.1, 0.6)));

    let node = scene
        .build_node("Particles")
        .with_mesh(Mesh::new(geometry, material).with_name("Particles"))
        .build();

    ParticleField {
        node,
        geometry,
        count: config.particle_count,
    }
}

/// Inserts the letter solids at the scene center with small random tilts.
///
/// Letters are centered by the symmetric index-offset rule
/// `x = (i − (len−1)/2) · pitch`. Runs whenever the glyph resource
/// resolves, which may be well after the first rendered frame.
pub(crate) fn build_letters(
    scene: &mut Scene,
    assets: &AssetServer,
    resources: &mut SceneResources,
    font: &Font,
    config: &HeartSceneConfig,
    rng: &mut impl Rng,
) -> Vec<AnimatedEntity> {
    let options = TextOptions {
        size: config.letter_size,
        depth: config.letter_depth,
        curve_segments: config.curve_segments,
        ..Default::default()
    };

    let count = config.letters.chars().count();
    let mut entities = Vec::with_capacity(count);

    for (i, ch) in config.letters.chars().enumerate() {
        let Some(geometry) = create_glyph(font, ch, &options) else {
            log::warn!("Font has no outline for {ch:?}; skipping");
            continue;
        };
        let geometry = resources.track_geometry(assets.add_geometry(geometry));

        let hue = rng.random::<f32>();
        let mut material = Material::new_phong(
            hsl_color(hue, 0.8, 0.5),
            hsl_color(hue, 0.8, 0.3),
            0.5,
            100.0,
        );
        if let crate::resources::material::MaterialKind::Phong(ref mut phong) = material.kind {
            phong.double_sided = true;
        }
        let material = resources.track_material(assets.add_material(material));

        let x = (i as f32 - (count as f32 - 1.0) / 2.0) * config.letter_pitch;
        let position = Vec3::new(x, 0.0, 0.0);
        let tilt = Vec3::new(
            rand_spread(rng, 0.2),
            rand_spread(rng, 0.2),
            rand_spread(rng, 0.2),
        );

        let node = scene
            .build_node("Letter")
            .with_mesh(Mesh::new(geometry, material).with_name("Letter"))
            .with_position(position)
            .with_rotation_euler(tilt.x, tilt.y, tilt.z)
            .build();

        entities.push(AnimatedEntity::new(
            node,
            Vec3::new(
                rand_spread(rng, 0.01),
                rand_spread(rng, 0.01),
                rand_spread(rng, 0.01),
            ),
            0.1 + rng.random::<f32>() * 0.2,
            position.y,
            tilt,
        ));
    }

    entities
}
