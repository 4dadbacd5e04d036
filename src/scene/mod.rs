//! Scene graph system.
//!
//! - `Node`: scene node with parent/child links and a transform
//! - `Transform`: TRS component with matrix caching and dirty checks
//! - `Scene`: node arena + component pools + atmosphere state
//! - `Camera`: perspective camera component
//! - `Light`: directional/point light components

pub mod camera;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::Camera;
pub use light::{Light, LightKind};
pub use node::Node;
pub use scene::{Fog, NodeBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
}
