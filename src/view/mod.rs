//! The heart-scene view: lifecycle controller plus animation driver.
//!
//! [`HeartView`] owns the scene graph, the animated-entity list, the pending
//! glyph fetch, and the RNG. It is a three-state machine:
//!
//! ```text
//! Uninitialized ──mount──▶ Running ──dispose──▶ Disposed (terminal)
//! ```
//!
//! Every per-frame mutation happens inside [`HeartView::tick`], which checks
//! the state at the top; the asynchronous font result is drained from a
//! channel there, never applied from the fetch callback itself. Dispose
//! releases every asset handle the mount created and is safe to call at any
//! point, any number of times.

pub mod build;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::assets::font::Font;
use crate::assets::{AssetServer, GeometryHandle, MaterialHandle, fetch_font};
use crate::config::HeartSceneConfig;
use crate::errors::Result;
use crate::scene::{Fog, NodeKey, Scene};

/// A scene object driven by the per-tick animation rules.
#[derive(Debug, Clone)]
pub struct AnimatedEntity {
    pub node: NodeKey,
    /// Per-axis Euler increment applied every tick.
    pub rotation_speed: Vec3,
    /// Frequency of the vertical float oscillation.
    pub float_speed: f32,
    /// Baseline for the float; captured at creation, never mutated.
    initial_y: f32,
    /// Accumulated Euler rotation (unbounded; rotation is periodic).
    euler: Vec3,
}

impl AnimatedEntity {
    #[must_use]
    pub fn new(
        node: NodeKey,
        rotation_speed: Vec3,
        float_speed: f32,
        initial_y: f32,
        initial_euler: Vec3,
    ) -> Self {
        Self {
            node,
            rotation_speed,
            float_speed,
            initial_y,
            euler: initial_euler,
        }
    }

    #[inline]
    #[must_use]
    pub fn initial_y(&self) -> f32 {
        self.initial_y
    }
}

/// The particle field's scene node and geometry handle.
#[derive(Debug, Clone, Copy)]
pub struct ParticleField {
    pub node: NodeKey,
    pub geometry: GeometryHandle,
    pub count: u32,
}

/// Asset handles created by a mount, released by the matching dispose.
#[derive(Debug, Default)]
pub(crate) struct SceneResources {
    geometries: Vec<GeometryHandle>,
    materials: Vec<MaterialHandle>,
}

impl SceneResources {
    fn track_geometry(&mut self, handle: GeometryHandle) -> GeometryHandle {
        self.geometries.push(handle);
        handle
    }

    fn track_material(&mut self, handle: MaterialHandle) -> MaterialHandle {
        self.materials.push(handle);
        handle
    }

    /// Removes every tracked asset. Handles that are already gone (or were
    /// never created) are skipped silently, so this can run against
    /// partially built state and run more than once.
    fn release_all(&mut self, assets: &AssetServer) {
        for handle in self.geometries.drain(..) {
            assets.geometries.remove(handle);
        }
        for handle in self.materials.drain(..) {
            assets.materials.remove(handle);
        }
    }
}

/// Lifecycle states. `Disposed` is terminal: a fresh mount needs a fresh
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Uninitialized,
    Running,
    Disposed,
}

pub struct HeartView {
    state: ViewState,
    config: HeartSceneConfig,

    scene: Scene,
    group: Option<NodeKey>,
    camera_node: Option<NodeKey>,
    particles: Option<ParticleField>,
    entities: Vec<AnimatedEntity>,
    resources: SceneResources,

    font_rx: Option<flume::Receiver<Result<Font>>>,

    rng: SmallRng,
    time: f32,
    group_yaw: f32,
    particle_yaw: f32,
}

impl HeartView {
    #[must_use]
    pub fn new(config: HeartSceneConfig) -> Self {
        Self::from_rng(config, SmallRng::from_os_rng())
    }

    /// Deterministic view for tests and reproducible captures.
    #[must_use]
    pub fn with_seed(config: HeartSceneConfig, seed: u64) -> Self {
        Self::from_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(config: HeartSceneConfig, rng: SmallRng) -> Self {
        Self {
            state: ViewState::Uninitialized,
            config,
            scene: Scene::new(),
            group: None,
            camera_node: None,
            particles: None,
            entities: Vec::new(),
            resources: SceneResources::default(),
            font_rx: None,
            rng,
            time: 0.0,
            group_yaw: 0.0,
            particle_yaw: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    #[must_use]
    pub fn entities(&self) -> &[AnimatedEntity] {
        &self.entities
    }

    #[inline]
    #[must_use]
    pub fn particle_field(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Builds the scene and starts the glyph fetch. Only valid from
    /// `Uninitialized`; anything else is a logged no-op.
    pub fn mount(&mut self, assets: &AssetServer, aspect: f32) {
        if self.state != ViewState::Uninitialized {
            log::warn!("mount() called on a {:?} view; ignoring", self.state);
            return;
        }

        let config = self.config.clone();

        self.scene.background = config.background;
        self.scene.fog = Some(Fog {
            color: config.background,
            density: config.fog_density,
        });

        self.camera_node = Some(build::build_camera(&mut self.scene, &config, aspect));
        build::build_lighting(&mut self.scene);

        let group = self.scene.build_node("HeartGroup").build();
        self.group = Some(group);

        self.entities = build::build_hearts(
            &mut self.scene,
            assets,
            &mut self.resources,
            group,
            &config,
            &mut self.rng,
        );
        build::build_point_lights(
            &mut self.scene,
            assets,
            &mut self.resources,
            group,
            &config,
            &mut self.rng,
        );
        self.particles = Some(build::build_particles(
            &mut self.scene,
            assets,
            &mut self.resources,
            &config,
            &mut self.rng,
        ));

        // The letters arrive asynchronously; the scene renders fine without
        // them until (or even if never) the fetch resolves.
        if let Some(url) = &config.font_url {
            self.font_rx = Some(fetch_font(url));
        }

        self.scene.update_world_matrices();
        self.state = ViewState::Running;

        log::info!(
            "Heart scene mounted: {} nodes, {} animated entities",
            self.scene.node_count(),
            self.entities.len()
        );
    }

    /// Supplies glyph results from a custom source. The channel is drained
    /// by `tick` under the same Running-only guard as the built-in fetch.
    pub fn attach_font_channel(&mut self, rx: flume::Receiver<Result<Font>>) {
        self.font_rx = Some(rx);
    }

    /// Advances the animation by one fixed step and refreshes world
    /// matrices. No-op unless the view is `Running`.
    ///
    /// The elapsed-time accumulator advances by `time_step` per call
    /// regardless of wall-clock frame duration — a fixed-step design.
    pub fn tick(&mut self, assets: &AssetServer) {
        if self.state != ViewState::Running {
            return;
        }

        self.poll_font(assets);

        self.time += self.config.time_step;
        let t = self.time;

        // The whole heart group slowly yaws.
        self.group_yaw += self.config.group_yaw_step;
        if let Some(group) = self.group
            && let Some(node) = self.scene.get_node_mut(group)
        {
            node.transform.set_rotation_euler(0.0, self.group_yaw, 0.0);
        }

        // Per-entity tumble and float around the captured baseline.
        let amplitude = self.config.float_amplitude;
        for entity in &mut self.entities {
            entity.euler += entity.rotation_speed;
            if let Some(node) = self.scene.get_node_mut(entity.node) {
                node.transform
                    .set_rotation_euler(entity.euler.x, entity.euler.y, entity.euler.z);
                node.transform.position.y =
                    entity.initial_y + (t * entity.float_speed).sin() * amplitude;
            }
        }

        self.animate_particles(assets, t);

        // The camera orbits a small circle, always aimed at the origin.
        if let Some(camera_node) = self.camera_node
            && let Some(node) = self.scene.get_node_mut(camera_node)
        {
            node.transform.position.x = (t * 0.1).sin() * 2.0;
            node.transform.position.y = (t * 0.1).cos() * 2.0;
            node.transform.look_at(Vec3::ZERO, Vec3::Y);
        }

        self.scene.update_world_matrices();
    }

    /// Recomputes the camera aspect ratio after a viewport change.
    pub fn resize(&mut self, aspect: f32) {
        if self.state != ViewState::Running || aspect <= 0.0 {
            return;
        }
        if let Some((_, camera)) = self.scene.query_active_camera() {
            camera.set_aspect(aspect);
        }
    }

    /// Tears the view down: drops the pending glyph channel and releases
    /// every asset created by the mount. Safe to call in any state and any
    /// number of times; `Disposed` is terminal.
    pub fn dispose(&mut self, assets: &AssetServer) {
        if self.state == ViewState::Disposed {
            return;
        }

        // A late font result now has nowhere to land; the sender's send
        // fails and the result is discarded.
        self.font_rx = None;

        self.resources.release_all(assets);
        self.entities.clear();
        self.particles = None;
        self.group = None;
        self.camera_node = None;

        self.state = ViewState::Disposed;
        log::info!("Heart scene disposed");
    }

    /// Pulse-and-twinkle: every particle's size is recomputed from a
    /// deterministic per-index oscillation times a fresh random factor.
    /// The re-randomization each tick is the intended flicker, not noise
    /// smoothing gone wrong.
    fn animate_particles(&mut self, assets: &AssetServer, t: f32) {
        let Some(field) = self.particles else {
            return;
        };

        self.particle_yaw += self.config.particle_yaw_step;
        if let Some(node) = self.scene.get_node_mut(field.node) {
            node.transform.set_rotation_euler(0.0, self.particle_yaw, 0.0);
        }

        let (lo, hi) = self.config.particle_size;
        let mut sizes = Vec::with_capacity(field.count as usize);
        for i in 0..field.count {
            let wave = 0.5 + (t * 0.3 + i as f32 * 0.1).sin() * 0.5;
            sizes.push(wave * self.rng.random_range(lo..hi));
        }

        if let Some(mut geometry) = assets.geometries.get_mut(field.geometry)
            && let Some(attr) = geometry.get_attribute_mut("size")
        {
            // Length is unchanged; only contents and version move.
            attr.update_data(&sizes);
        }
    }

    fn poll_font(&mut self, assets: &AssetServer) {
        let Some(rx) = &self.font_rx else {
            return;
        };

        let message = match rx.try_recv() {
            Err(flume::TryRecvError::Empty) => return,
            Err(flume::TryRecvError::Disconnected) => None,
            Ok(message) => Some(message),
        };
        self.font_rx = None;

        match message {
            Some(Ok(font)) => {
                let letters = build::build_letters(
                    &mut self.scene,
                    assets,
                    &mut self.resources,
                    &font,
                    &self.config,
                    &mut self.rng,
                );
                log::info!("Font resolved; {} letter solids added", letters.len());
                self.entities.extend(letters);
            }
            Some(Err(err)) => {
                log::warn!("Glyph resource failed ({err}); rendering without letters");
            }
            None => {
                log::warn!("Glyph channel closed without a result; rendering without letters");
            }
        }
    }
}
