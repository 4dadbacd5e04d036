use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeKey};
use glam::Affine3A;

/// A scene node: hierarchy links, a transform, and optional component keys.
///
/// Nodes form a tree through parent-child relationships; `Mesh`, `Camera`,
/// and `Light` data live in the scene's component pools and are referenced by
/// key so the per-frame hierarchy walk only touches small, contiguous data.
#[derive(Debug, Clone)]
pub struct Node {
    /// Display name, mostly for logs.
    pub name: String,

    /// Parent node key (`None` for root nodes).
    pub(crate) parent: Option<NodeKey>,
    /// Child node keys.
    pub(crate) children: Vec<NodeKey>,

    /// Transform component (hot data accessed every frame).
    pub transform: Transform,

    /// Visibility flag; invisible nodes are skipped by the renderer.
    pub visible: bool,

    // === Component keys ===
    pub mesh: Option<MeshKey>,
    pub camera: Option<CameraKey>,
    pub light: Option<LightKey>,
}

impl Node {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            mesh: None,
            camera: None,
            light: None,
        }
    }

    /// Returns the parent node key, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Returns a read-only slice of child node keys.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Returns the world transformation matrix, updated by
    /// [`Scene::update_world_matrices`](crate::scene::Scene::update_world_matrices).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
