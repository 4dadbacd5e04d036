//! Typeface font parsing.
//!
//! Parses the JSON glyph format used by three.js-style typeface fonts: each
//! glyph carries a horizontal advance and an outline command string
//! (`m`/`l`/`q`/`b` with end points first, then control points). Outlines are
//! flattened into closed polylines on demand and classified into contours and
//! holes by containment, ready for extrusion.

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::errors::{HeartfieldError, Result};
use crate::resources::primitives::Shape;
use crate::resources::primitives::triangulate::{point_in_polygon, signed_area};

#[derive(Debug, Clone, Copy)]
enum OutlineCmd {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, end: Vec2 },
    CubicTo { c1: Vec2, c2: Vec2, end: Vec2 },
    Close,
}

/// One glyph: horizontal advance plus outline commands, both in font units.
#[derive(Debug, Clone)]
pub struct Glyph {
    pub advance: f32,
    commands: Vec<OutlineCmd>,
}

/// A parsed typeface font.
#[derive(Debug, Clone)]
pub struct Font {
    glyphs: FxHashMap<char, Glyph>,
    resolution: f32,
    pub family: Option<String>,
}

#[derive(Deserialize)]
struct RawTypeface {
    glyphs: std::collections::HashMap<String, RawGlyph>,
    #[serde(default)]
    resolution: Option<f32>,
    #[serde(default, rename = "familyName")]
    family_name: Option<String>,
}

#[derive(Deserialize)]
struct RawGlyph {
    #[serde(default)]
    ha: f32,
    #[serde(default)]
    o: Option<String>,
}

impl Font {
    /// Parses typeface JSON bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let raw: RawTypeface = serde_json::from_slice(bytes)?;

        let resolution = raw.resolution.unwrap_or(1000.0);
        if resolution <= 0.0 {
            return Err(HeartfieldError::FontParseFailed(format!(
                "invalid resolution {resolution}"
            )));
        }

        let mut glyphs = FxHashMap::default();
        for (key, glyph) in raw.glyphs {
            let Some(ch) = key.chars().next() else {
                continue;
            };
            let commands = match &glyph.o {
                Some(outline) => parse_outline(outline)?,
                None => Vec::new(),
            };
            glyphs.insert(
                ch,
                Glyph {
                    advance: glyph.ha,
                    commands,
                },
            );
        }

        Ok(Self {
            glyphs,
            resolution,
            family: raw.family_name,
        })
    }

    #[must_use]
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Horizontal advance of `ch` scaled to `size`, if the glyph exists.
    #[must_use]
    pub fn advance(&self, ch: char, size: f32) -> Option<f32> {
        Some(self.glyphs.get(&ch)?.advance * size / self.resolution)
    }

    /// Flattens a glyph's outline into extrudable shapes at the given size.
    ///
    /// Returns `None` when the font has no entry for `ch`; an empty vector
    /// means the glyph exists but draws nothing (whitespace).
    #[must_use]
    pub fn glyph_shapes(&self, ch: char, size: f32, curve_segments: u32) -> Option<Vec<Shape>> {
        let glyph = self.glyphs.get(&ch)?;
        let scale = size / self.resolution;
        let paths = flatten_outline(&glyph.commands, scale, curve_segments.max(1));
        Some(classify_shapes(paths))
    }
}

/// Tokenizes an outline command string into typed commands.
///
/// The data order follows the typeface convention: curve commands list the
/// end point before the control point(s).
fn parse_outline(outline: &str) -> Result<Vec<OutlineCmd>> {
    let mut tokens = outline.split_whitespace();
    let mut commands = Vec::new();

    let read = |tokens: &mut std::str::SplitWhitespace<'_>| -> Result<f32> {
        tokens
            .next()
            .ok_or_else(|| {
                HeartfieldError::FontParseFailed("truncated outline command".to_string())
            })?
            .parse::<f32>()
            .map_err(|e| HeartfieldError::FontParseFailed(format!("bad outline number: {e}")))
    };

    while let Some(cmd) = tokens.next() {
        match cmd {
            "m" => {
                let x = read(&mut tokens)?;
                let y = read(&mut tokens)?;
                commands.push(OutlineCmd::MoveTo(Vec2::new(x, y)));
            }
            "l" => {
                let x = read(&mut tokens)?;
                let y = read(&mut tokens)?;
                commands.push(OutlineCmd::LineTo(Vec2::new(x, y)));
            }
            "q" => {
                let x = read(&mut tokens)?;
                let y = read(&mut tokens)?;
                let cx = read(&mut tokens)?;
                let cy = read(&mut tokens)?;
                commands.push(OutlineCmd::QuadTo {
                    ctrl: Vec2::new(cx, cy),
                    end: Vec2::new(x, y),
                });
            }
            "b" => {
                let x = read(&mut tokens)?;
                let y = read(&mut tokens)?;
                let c1x = read(&mut tokens)?;
                let c1y = read(&mut tokens)?;
                let c2x = read(&mut tokens)?;
                let c2y = read(&mut tokens)?;
                commands.push(OutlineCmd::CubicTo {
                    c1: Vec2::new(c1x, c1y),
                    c2: Vec2::new(c2x, c2y),
                    end: Vec2::new(x, y),
                });
            }
            "z" => commands.push(OutlineCmd::Close),
            other => {
                return Err(HeartfieldError::FontParseFailed(format!(
                    "unknown outline command '{other}'"
                )));
            }
        }
    }

    Ok(commands)
}

/// Flattens commands into closed polylines, subdividing curves.
fn flatten_outline(commands: &[OutlineCmd], scale: f32, curve_segments: u32) -> Vec<Vec<Vec2>> {
    let mut paths: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    let mut finish = |current: &mut Vec<Vec2>| {
        // Drop a duplicated closing point, then keep only real polygons.
        if current.len() > 1
            && (current[0] - current[current.len() - 1]).length_squared() < 1e-12
        {
            current.pop();
        }
        if current.len() >= 3 {
            paths.push(std::mem::take(current));
        } else {
            current.clear();
        }
    };

    for cmd in commands {
        match *cmd {
            OutlineCmd::MoveTo(p) => {
                finish(&mut current);
                current.push(p * scale);
            }
            OutlineCmd::LineTo(p) => current.push(p * scale),
            OutlineCmd::QuadTo { ctrl, end } => {
                let start = current.last().copied().unwrap_or(ctrl * scale);
                let (c, e) = (ctrl * scale, end * scale);
                for s in 1..=curve_segments {
                    let t = s as f32 / curve_segments as f32;
                    let inv = 1.0 - t;
                    current.push(start * (inv * inv) + c * (2.0 * inv * t) + e * (t * t));
                }
            }
            OutlineCmd::CubicTo { c1, c2, end } => {
                let start = current.last().copied().unwrap_or(c1 * scale);
                let (c1, c2, e) = (c1 * scale, c2 * scale, end * scale);
                for s in 1..=curve_segments {
                    let t = s as f32 / curve_segments as f32;
                    let inv = 1.0 - t;
                    current.push(
                        start * (inv * inv * inv)
                            + c1 * (3.0 * inv * inv * t)
                            + c2 * (3.0 * inv * t * t)
                            + e * (t * t * t),
                    );
                }
            }
            OutlineCmd::Close => finish(&mut current),
        }
    }
    finish(&mut current);

    paths
}

/// Splits closed paths into outer contours and their holes.
///
/// A path contained in an odd number of other paths is a hole; it is
/// assigned to the smallest contour that contains it (the letter `B` yields
/// one contour with two holes).
fn classify_shapes(paths: Vec<Vec<Vec2>>) -> Vec<Shape> {
    let containment: Vec<Vec<usize>> = paths
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let probe = path[0];
            paths
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && point_in_polygon(probe, other))
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    let mut shapes: Vec<(usize, Shape)> = Vec::new();
    let mut holes: Vec<(usize, usize)> = Vec::new(); // (path index, owner index)

    for (i, containers) in containment.iter().enumerate() {
        if containers.len() % 2 == 0 {
            shapes.push((i, Shape::new(paths[i].clone())));
        } else {
            // Owner: the containing path with the smallest absolute area.
            let owner = containers
                .iter()
                .copied()
                .min_by(|&a, &b| {
                    signed_area(&paths[a])
                        .abs()
                        .partial_cmp(&signed_area(&paths[b]).abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .expect("odd containment count implies a container");
            holes.push((i, owner));
        }
    }

    for (hole_idx, owner_idx) in holes {
        if let Some((_, shape)) = shapes.iter_mut().find(|(i, _)| *i == owner_idx) {
            shape.holes.push(paths[hole_idx].clone());
        }
    }

    shapes.into_iter().map(|(_, s)| s).collect()
}
