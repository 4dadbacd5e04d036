//! Asset storage and loading.
//!
//! [`AssetServer`] owns the geometry and material pools behind strongly
//! typed handles. Scene meshes reference assets by handle only; teardown
//! releases the handles it created, and every release step is a no-op on
//! absent resources.

pub mod fetch;
pub mod font;
pub mod storage;

use slotmap::new_key_type;

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use storage::AssetStorage;

pub use fetch::fetch_font;
pub use font::{Font, Glyph};

new_key_type! {
    pub struct GeometryHandle;
    pub struct MaterialHandle;
}

/// Central asset storage for geometries and materials.
#[derive(Default)]
pub struct AssetServer {
    pub geometries: AssetStorage<GeometryHandle, Geometry>,
    pub materials: AssetStorage<MaterialHandle, Material>,
}

impl AssetServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_geometry(&self, geometry: Geometry) -> GeometryHandle {
        self.geometries.add(geometry)
    }

    pub fn add_material(&self, material: Material) -> MaterialHandle {
        self.materials.add(material)
    }

    /// Total number of stored assets, used by leak checks.
    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.geometries.len() + self.materials.len()
    }
}
