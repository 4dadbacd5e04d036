use glam::Vec3;
use uuid::Uuid;

/// PBR-leaning surface material (metalness/roughness workflow).
#[derive(Debug, Clone)]
pub struct StandardMaterial {
    pub color: Vec3,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Vec3,
}

/// Classic Blinn-Phong surface material.
#[derive(Debug, Clone)]
pub struct PhongMaterial {
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub specular: Vec3,
    pub shininess: f32,
    pub double_sided: bool,
}

/// Point-sprite material for particle fields.
#[derive(Debug, Clone)]
pub struct PointsMaterial {
    /// World-space base size, multiplied by the per-particle `size` attribute.
    pub base_size: f32,
    pub opacity: f32,
    /// Use the geometry's per-vertex `color` attribute.
    pub vertex_colors: bool,
    /// Additive blending for a glow-like accumulation.
    pub additive: bool,
}

/// A surface description referenced by meshes through a
/// [`MaterialHandle`](crate::assets::MaterialHandle).
#[derive(Debug, Clone)]
pub enum MaterialKind {
    Standard(StandardMaterial),
    Phong(PhongMaterial),
    Points(PointsMaterial),
}

#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub kind: MaterialKind,
}

impl Material {
    #[must_use]
    pub fn new_standard(color: Vec3, metalness: f32, roughness: f32, emissive: Vec3) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind: MaterialKind::Standard(StandardMaterial {
                color,
                metalness,
                roughness,
                emissive,
            }),
        }
    }

    #[must_use]
    pub fn new_phong(color: Vec3, emissive: Vec3, emissive_intensity: f32, shininess: f32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind: MaterialKind::Phong(PhongMaterial {
                color,
                emissive,
                emissive_intensity,
                specular: Vec3::ONE,
                shininess,
                double_sided: false,
            }),
        }
    }

    #[must_use]
    pub fn new_points(base_size: f32, opacity: f32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            kind: MaterialKind::Points(PointsMaterial {
                base_size,
                opacity,
                vertex_colors: true,
                additive: true,
            }),
        }
    }

    /// Whether this material renders as point sprites rather than triangles.
    #[must_use]
    pub fn is_points(&self) -> bool {
        matches!(self.kind, MaterialKind::Points(_))
    }
}

/// Converts a `0xRRGGBB` integer into a linear-ish `Vec3` color.
#[must_use]
pub fn hex_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Converts HSL (all components in `[0, 1]`) to RGB.
#[must_use]
pub fn hsl_color(h: f32, s: f32, l: f32) -> Vec3 {
    fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    if s == 0.0 {
        return Vec3::splat(l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Vec3::new(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}
