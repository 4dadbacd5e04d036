pub mod extrude;
pub mod heart;
pub mod particles;
pub mod sphere;
pub mod text;
pub mod triangulate;

pub use extrude::{ExtrudeOptions, Shape, extrude_shape, extrude_shapes};
pub use heart::{create_heart_extruded, create_heart_surface, heart_curve, heart_surface_point};
pub use particles::{ParticleFieldOptions, create_particle_field};
pub use sphere::{SphereOptions, create_sphere};
pub use text::{TextOptions, create_glyph};
pub use triangulate::triangulate_shape;
