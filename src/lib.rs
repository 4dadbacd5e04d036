#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod app;
pub mod assets;
pub mod config;
pub mod errors;
pub mod menu;
pub mod render;
pub mod resources;
pub mod scene;
pub mod view;

pub use app::App;
pub use assets::{AssetServer, Font};
pub use config::HeartSceneConfig;
pub use errors::HeartfieldError;
pub use menu::{MenuNode, MenuState, RouteDescriptor, project_menu};
pub use render::Renderer;
pub use resources::primitives::*;
pub use resources::{Geometry, Material, Mesh};
pub use scene::{Camera, Light, Node, Scene};
pub use view::{AnimatedEntity, HeartView, ViewState};
