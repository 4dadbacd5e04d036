use crate::assets::{GeometryHandle, MaterialHandle};

/// A renderable unit: a geometry handle paired with a material handle.
///
/// Meshes live in the scene's component pool and are attached to nodes; the
/// referenced resources live in the [`AssetServer`](crate::assets::AssetServer)
/// and are released explicitly at teardown.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub visible: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            name: "Mesh".to_string(),
            geometry,
            material,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}
