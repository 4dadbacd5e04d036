//! Extruded glyph solids from parsed typeface outlines.

use crate::assets::font::Font;
use crate::resources::geometry::Geometry;
use crate::resources::primitives::extrude::{ExtrudeOptions, extrude_shapes};

#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Glyph size in world units (cap height scale).
    pub size: f32,
    /// Extrusion depth.
    pub depth: f32,
    /// Subdivisions per outline curve segment.
    pub curve_segments: u32,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_segments: u32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: 2.5,
            depth: 0.8,
            curve_segments: 5,
            bevel_thickness: 0.2,
            bevel_size: 0.1,
            bevel_segments: 3,
        }
    }
}

/// Builds the extruded solid for one glyph, or `None` when the font has no
/// outline for `ch` (whitespace, missing glyphs).
#[must_use]
pub fn create_glyph(font: &Font, ch: char, options: &TextOptions) -> Option<Geometry> {
    let shapes = font.glyph_shapes(ch, options.size, options.curve_segments)?;
    if shapes.is_empty() {
        return None;
    }

    Some(extrude_shapes(
        &shapes,
        &ExtrudeOptions {
            depth: options.depth,
            bevel_enabled: true,
            bevel_thickness: options.bevel_thickness,
            bevel_size: options.bevel_size,
            bevel_segments: options.bevel_segments,
        },
    ))
}
