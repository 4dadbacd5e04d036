use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use rustc_hash::FxHashMap;
use uuid::Uuid;
use wgpu::VertexFormat;

/// A single planar vertex attribute: CPU-side bytes plus metadata.
///
/// The `version` counter is the renderer's dirty signal: every mutation bumps
/// it, and the GPU buffer cache re-uploads when the versions diverge.
#[derive(Debug, Clone)]
pub struct Attribute {
    data: Vec<u8>,
    version: u64,

    pub format: VertexFormat,
    pub count: u32,
    pub stride: u64,
}

static NEXT_ATTR_VERSION: AtomicU64 = AtomicU64::new(1);

impl Attribute {
    /// Creates a planar (non-interleaved) attribute from a typed slice.
    pub fn new_planar<T: bytemuck::Pod>(data: &[T], format: VertexFormat) -> Self {
        Self {
            data: bytemuck::cast_slice(data).to_vec(),
            version: NEXT_ATTR_VERSION.fetch_add(1, Ordering::Relaxed),
            format,
            count: data.len() as u32,
            stride: size_of::<T>() as u64,
        }
    }

    /// Overwrites the attribute contents in place, keeping GPU identity.
    pub fn update_data<T: bytemuck::Pod>(&mut self, new_data: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(new_data);
        if self.data.len() != bytes.len() {
            self.data.resize(bytes.len(), 0);
        }
        self.data.copy_from_slice(bytes);

        self.count = new_data.len() as u32;
        self.version = NEXT_ATTR_VERSION.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Reads element `i` as a `Vec3`. Returns `None` on format mismatch or
    /// out-of-range index.
    #[must_use]
    pub fn read_vec3(&self, i: u32) -> Option<Vec3> {
        if self.format != VertexFormat::Float32x3 {
            return None;
        }
        let offset = (i as usize) * self.stride as usize;
        let slice = self.data.get(offset..offset + 12)?;
        let vals: &[f32; 3] = bytemuck::cast_ref(slice.try_into().ok()?);
        Some(Vec3::from_array(*vals))
    }

    /// Reads element `i` as an `f32`.
    #[must_use]
    pub fn read_f32(&self, i: u32) -> Option<f32> {
        if self.format != VertexFormat::Float32 {
            return None;
        }
        let offset = (i as usize) * self.stride as usize;
        let slice = self.data.get(offset..offset + 4)?;
        Some(f32::from_le_bytes(slice.try_into().ok()?))
    }
}

/// Mesh data as named vertex attributes plus an optional index buffer.
///
/// Geometry is renderer-agnostic CPU data; the renderer mirrors it into GPU
/// buffers keyed by [`Geometry::uuid`] and attribute versions.
#[derive(Debug)]
pub struct Geometry {
    pub uuid: Uuid,

    attributes: FxHashMap<String, Attribute>,
    index_attribute: Option<Attribute>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            attributes: FxHashMap::default(),
            index_attribute: None,
        }
    }

    pub fn set_attribute(&mut self, name: &str, attr: Attribute) {
        self.attributes.insert(name.to_string(), attr);
    }

    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn get_attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.get_mut(name)
    }

    #[must_use]
    pub fn attributes(&self) -> &FxHashMap<String, Attribute> {
        &self.attributes
    }

    #[must_use]
    pub fn index_attribute(&self) -> Option<&Attribute> {
        self.index_attribute.as_ref()
    }

    /// Vertex count, taken from the `position` attribute.
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.attributes.get("position").map_or(0, |a| a.count)
    }

    /// Number of indices to draw, or the vertex count for non-indexed
    /// geometry.
    #[must_use]
    pub fn draw_count(&self) -> u32 {
        self.index_attribute
            .as_ref()
            .map_or_else(|| self.vertex_count(), |a| a.count)
    }

    pub fn set_indices(&mut self, indices: &[u16]) {
        self.index_attribute = Some(Attribute::new_planar(indices, VertexFormat::Uint16));
    }

    pub fn set_indices_u32(&mut self, indices: &[u32]) {
        self.index_attribute = Some(Attribute::new_planar(indices, VertexFormat::Uint32));
    }

    /// Computes smooth per-vertex normals from the triangle mesh.
    ///
    /// Face normals are accumulated area-weighted (the cross product's length
    /// is twice the triangle area) and normalized at the end. Works for both
    /// indexed and non-indexed triangle lists; requires a `Float32x3`
    /// `position` attribute.
    pub fn compute_vertex_normals(&mut self) {
        let Some(pos_attr) = self.attributes.get("position") else {
            return;
        };
        if pos_attr.format != VertexFormat::Float32x3 {
            return;
        }

        let pos_count = pos_attr.count as usize;
        let mut normals = vec![Vec3::ZERO; pos_count];

        let positions: &[f32] = bytemuck::cast_slice(pos_attr.bytes());
        let get_pos = |i: usize| -> Vec3 {
            Vec3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2])
        };

        let mut accumulate_triangle = |i0: usize, i1: usize, i2: usize| {
            if i0 >= pos_count || i1 >= pos_count || i2 >= pos_count {
                return;
            }

            let v0 = get_pos(i0);
            let v1 = get_pos(i1);
            let v2 = get_pos(i2);

            let face_normal = (v1 - v0).cross(v2 - v0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        };

        if let Some(index_attr) = &self.index_attribute {
            match index_attr.format {
                VertexFormat::Uint16 => {
                    let u16s: &[u16] = bytemuck::cast_slice(index_attr.bytes());
                    for chunk in u16s.chunks_exact(3) {
                        accumulate_triangle(
                            chunk[0] as usize,
                            chunk[1] as usize,
                            chunk[2] as usize,
                        );
                    }
                }
                VertexFormat::Uint32 => {
                    let u32s: &[u32] = bytemuck::cast_slice(index_attr.bytes());
                    for chunk in u32s.chunks_exact(3) {
                        accumulate_triangle(
                            chunk[0] as usize,
                            chunk[1] as usize,
                            chunk[2] as usize,
                        );
                    }
                }
                _ => {}
            }
        } else {
            for i in (0..pos_count).step_by(3) {
                if i + 2 < pos_count {
                    accumulate_triangle(i, i + 1, i + 2);
                }
            }
        }

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }

        let normal_attr = Attribute::new_planar(&normals, VertexFormat::Float32x3);
        self.set_attribute("normal", normal_attr);
    }
}
