use glam::Affine3A;
use slotmap::SlotMap;

use crate::resources::mesh::Mesh;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeKey};

/// Exponential-squared fog.
#[derive(Debug, Clone, Copy)]
pub struct Fog {
    pub color: glam::Vec3,
    pub density: f32,
}

/// The scene graph container.
///
/// `Scene` is a pure data layer: a node arena plus component pools for
/// meshes, cameras, and lights, along with scene-wide atmosphere state
/// (ambient light, background color, fog). Geometry and material *contents*
/// live in the [`AssetServer`](crate::assets::AssetServer); meshes only hold
/// handles.
pub struct Scene {
    pub(crate) nodes: SlotMap<NodeKey, Node>,
    pub(crate) root_nodes: Vec<NodeKey>,

    // === Component pools ===
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub cameras: SlotMap<CameraKey, Camera>,
    pub lights: SlotMap<LightKey, Light>,

    // === Atmosphere ===
    pub ambient_color: glam::Vec3,
    pub ambient_intensity: f32,
    pub background: glam::Vec3,
    pub fog: Option<Fog>,

    /// Node carrying the camera used for rendering.
    pub active_camera: Option<NodeKey>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),

            ambient_color: glam::Vec3::ZERO,
            ambient_intensity: 0.0,
            background: glam::Vec3::ZERO,
            fog: None,

            active_camera: None,
        }
    }

    /// Starts building a node with the fluent [`NodeBuilder`] API.
    pub fn build_node(&'_ mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Adds a node at the root of the scene.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        let key = self.nodes.insert(node);
        self.root_nodes.push(key);
        key
    }

    /// Adds a node as a child of `parent_key`.
    pub fn add_to_parent(&mut self, child: Node, parent_key: NodeKey) -> NodeKey {
        let key = self.nodes.insert(child);

        if let Some(p) = self.nodes.get_mut(parent_key) {
            p.children.push(key);
        }
        if let Some(c) = self.nodes.get_mut(key) {
            c.parent = Some(parent_key);
        }

        key
    }

    /// Removes a node and, recursively, all of its children, along with any
    /// components they carry. Missing keys are ignored.
    pub fn remove_node(&mut self, key: NodeKey) {
        let children = if let Some(node) = self.nodes.get(key) {
            node.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        let parent_opt = self.nodes.get(key).and_then(|n| n.parent);
        if let Some(parent_key) = parent_opt {
            if let Some(parent) = self.nodes.get_mut(parent_key)
                && let Some(pos) = parent.children.iter().position(|&x| x == key)
            {
                parent.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&x| x == key) {
            self.root_nodes.remove(pos);
        }

        if let Some(node) = self.nodes.get(key) {
            if let Some(mesh_key) = node.mesh {
                self.meshes.remove(mesh_key);
            }
            if let Some(cam_key) = node.camera {
                self.cameras.remove(cam_key);
            }
            if let Some(light_key) = node.light {
                self.lights.remove(light_key);
            }
        }

        self.nodes.remove(key);
    }

    /// Re-parents `child_key` under `parent_key`.
    pub fn attach(&mut self, child_key: NodeKey, parent_key: NodeKey) {
        if child_key == parent_key {
            log::warn!("Cannot attach node to itself!");
            return;
        }

        // Detach from the old parent (or the root list).
        let old_parent = self.nodes.get(child_key).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child_key)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child_key) {
            self.root_nodes.remove(i);
        }

        if let Some(p) = self.nodes.get_mut(parent_key) {
            p.children.push(child_key);
        } else {
            log::error!("Parent node not found during attach!");
            self.root_nodes.push(child_key);
            return;
        }

        if let Some(c) = self.nodes.get_mut(child_key) {
            c.parent = Some(parent_key);
            c.transform.mark_dirty();
        }
    }

    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // Component helpers
    // ========================================================================

    /// Inserts `mesh` into the pool and wraps it in a root node.
    pub fn add_mesh(&mut self, mesh: Mesh) -> NodeKey {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_node(node)
    }

    /// Inserts `mesh` into the pool and wraps it in a child node of `parent`.
    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeKey) -> NodeKey {
        let mut node = Node::new(&mesh.name);
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_to_parent(node, parent)
    }

    pub fn add_camera(&mut self, camera: Camera) -> NodeKey {
        let mut node = Node::new("Camera");
        node.camera = Some(self.cameras.insert(camera));
        self.add_node(node)
    }

    pub fn add_light(&mut self, light: Light) -> NodeKey {
        let mut node = Node::new("Light");
        node.light = Some(self.lights.insert(light));
        self.add_node(node)
    }

    pub fn add_light_to_parent(&mut self, light: Light, parent: NodeKey) -> NodeKey {
        let mut node = Node::new("Light");
        node.light = Some(self.lights.insert(light));
        self.add_to_parent(node, parent)
    }

    /// Iterates visible nodes that carry a visible mesh.
    pub fn iter_visible_meshes(&self) -> impl Iterator<Item = (NodeKey, &Node, &Mesh)> {
        self.nodes.iter().filter_map(move |(key, node)| {
            if !node.visible {
                return None;
            }
            let mesh = self.meshes.get(node.mesh?)?;
            if !mesh.visible {
                return None;
            }
            Some((key, node, mesh))
        })
    }

    /// Iterates all lights with the world matrix of their carrying node.
    pub fn iter_active_lights(&self) -> impl Iterator<Item = (&Light, &Affine3A)> {
        self.nodes.iter().filter_map(move |(_, node)| {
            let light = self.lights.get(node.light?)?;
            Some((light, &node.transform.world_matrix))
        })
    }

    /// Returns the transform and camera of the active camera node.
    pub fn query_active_camera(&mut self) -> Option<(&mut crate::scene::Transform, &mut Camera)> {
        let node_key = self.active_camera?;
        let camera_key = self.nodes.get(node_key)?.camera?;
        let camera = self.cameras.get_mut(camera_key)?;
        let transform = &mut self.nodes.get_mut(node_key)?.transform;
        Some((transform, camera))
    }

    /// Read-only view of the active camera, for the renderer.
    #[must_use]
    pub fn active_camera_component(&self) -> Option<&Camera> {
        let node_key = self.active_camera?;
        let camera_key = self.nodes.get(node_key)?.camera?;
        self.cameras.get(camera_key)
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Updates every node's world matrix, parents before children.
    ///
    /// Must run once per frame before rendering. Iterative (explicit stack)
    /// so deep hierarchies cannot overflow the call stack. The active
    /// camera's view matrix is refreshed from its node as part of the walk.
    pub fn update_world_matrices(&mut self) {
        let mut stack: Vec<(NodeKey, Affine3A)> = self
            .root_nodes
            .iter()
            .map(|&k| (k, Affine3A::IDENTITY))
            .collect();

        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };

            node.transform.update_local_matrix();
            let world = parent_world * node.transform.local_matrix;
            node.transform.set_world_matrix(world);

            if let Some(camera_key) = node.camera
                && let Some(camera) = self.cameras.get_mut(camera_key)
            {
                camera.update_view(&world);
            }

            // Re-borrow immutably to push children.
            if let Some(node) = self.nodes.get(key) {
                for &child in &node.children {
                    stack.push((child, world));
                }
            }
        }
    }
}

/// Fluent builder for inserting configured nodes, used by the scene builder.
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    node: Node,
    parent: Option<NodeKey>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            node: Node::new(name),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: glam::Vec3) -> Self {
        self.node.transform.position = position;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, s: f32) -> Self {
        self.node.transform.scale = glam::Vec3::splat(s);
        self
    }

    #[must_use]
    pub fn with_rotation_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.set_rotation_euler(x, y, z);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeKey) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.node.mesh = Some(self.scene.meshes.insert(mesh));
        self
    }

    /// Inserts the node into the scene and returns its key.
    pub fn build(self) -> NodeKey {
        let key = self.scene.nodes.insert(self.node);

        if let Some(parent_key) = self.parent {
            if let Some(p) = self.scene.nodes.get_mut(parent_key) {
                p.children.push(key);
            }
            if let Some(c) = self.scene.nodes.get_mut(key) {
                c.parent = Some(parent_key);
            }
        } else {
            self.scene.root_nodes.push(key);
        }

        key
    }
}
