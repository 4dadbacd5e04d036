//! CPU-side render resources: geometry, materials, meshes, and the
//! procedural primitives that build them.

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod primitives;

pub use geometry::{Attribute, Geometry};
pub use material::{Material, MaterialKind, PhongMaterial, PointsMaterial, StandardMaterial};
pub use mesh::Mesh;
