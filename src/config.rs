//! Scene configuration.
//!
//! Every tunable of the heart scene lives here with the reference defaults.
//! The builders and the animation driver read these values instead of
//! hard-coding constants, so tests (and downstream users) can shrink the
//! scene or re-seed it without touching the build code.

use glam::Vec3;

use crate::resources::material::hex_color;

/// Configuration for the heart scene: object counts, placement bands,
/// animation rates, and the glyph resource.
#[derive(Debug, Clone)]
pub struct HeartSceneConfig {
    // === Hearts ===
    /// Number of heart solids to scatter around the title.
    pub heart_count: u32,
    /// Geometry size range for individual hearts.
    pub heart_size: (f32, f32),
    /// Extra uniform node scale range applied on top of geometry size.
    pub heart_scale: (f32, f32),
    /// Outer placement band (radius range); most hearts land here.
    pub outer_band: (f32, f32),
    /// Inner placement band, used with probability `1 - outer_probability`.
    pub inner_band: (f32, f32),
    /// Probability a heart lands in the outer band.
    pub outer_probability: f32,
    /// Red-family base colors for heart materials.
    pub heart_palette: Vec<Vec3>,
    /// Self-illumination as a fraction of the base color.
    pub heart_emissive_factor: f32,
    /// Sample count for the 2D heart outline.
    pub outline_segments: u32,
    /// Grid resolution for the parametric heart surface (per axis).
    pub surface_segments: u32,

    // === Lights ===
    /// Number of scattered point lights (each paired with a gizmo sphere).
    pub point_light_count: u32,
    /// Placement band for scattered point lights.
    pub light_band: (f32, f32),

    // === Particles ===
    /// Number of points in the particle field.
    pub particle_count: u32,
    /// Radius of the spherical particle volume.
    pub particle_radius: f32,
    /// Base size range for particles; re-randomized every tick.
    pub particle_size: (f32, f32),

    // === Letters ===
    /// Glyphs extruded at the scene center.
    pub letters: String,
    /// Glyph size in world units.
    pub letter_size: f32,
    /// Extrusion depth of each glyph.
    pub letter_depth: f32,
    /// Horizontal pitch between glyph centers.
    pub letter_pitch: f32,
    /// Subdivisions used when flattening glyph outline curves.
    pub curve_segments: u32,
    /// URL of the typeface.json glyph resource. `None` skips the letter group.
    pub font_url: Option<String>,

    // === Animation ===
    /// Fixed time increment per tick (not wall-clock derived).
    pub time_step: f32,
    /// Vertical floating amplitude for animated entities.
    pub float_amplitude: f32,
    /// Yaw added to the heart group every tick.
    pub group_yaw_step: f32,
    /// Yaw added to the particle field every tick.
    pub particle_yaw_step: f32,

    // === Camera & atmosphere ===
    /// Vertical field of view in degrees.
    pub camera_fov: f32,
    /// Camera distance from the origin along +Z.
    pub camera_distance: f32,
    /// Background color.
    pub background: Vec3,
    /// Exponential-squared fog density.
    pub fog_density: f32,
    /// Device-pixel-ratio ceiling for the backing buffer.
    pub max_pixel_ratio: f64,
}

impl Default for HeartSceneConfig {
    fn default() -> Self {
        Self {
            heart_count: 120,
            heart_size: (0.4, 1.2),
            heart_scale: (0.5, 2.0),
            outer_band: (8.0, 25.0),
            inner_band: (3.0, 7.0),
            outer_probability: 0.9,
            heart_palette: vec![
                hex_color(0xff0000),
                hex_color(0xff1a1a),
                hex_color(0xff3333),
                hex_color(0xcc0000),
                hex_color(0xff6666),
            ],
            heart_emissive_factor: 0.2,
            outline_segments: 50,
            surface_segments: 24,

            point_light_count: 8,
            light_band: (5.0, 15.0),

            particle_count: 2000,
            particle_radius: 30.0,
            particle_size: (0.5, 2.5),

            letters: "BKB".to_string(),
            letter_size: 2.5,
            letter_depth: 0.8,
            letter_pitch: 3.0,
            curve_segments: 5,
            font_url: Some(
                "https://threejs.org/examples/fonts/helvetiker_regular.typeface.json".to_string(),
            ),

            time_step: 0.01,
            float_amplitude: 0.5,
            group_yaw_step: 0.001,
            particle_yaw_step: 0.0005,

            camera_fov: 75.0,
            camera_distance: 30.0,
            background: hex_color(0x080010),
            fog_density: 0.02,
            max_pixel_ratio: 2.0,
        }
    }
}
