//! Windowed application shell.
//!
//! Owns the window, the renderer, and the [`HeartView`] lifecycle: mount on
//! first resume, resize forwarding with a device-pixel-ratio ceiling, one
//! tick + render per redraw, dispose on close. A missing window or zero-size
//! surface makes each step a no-op rather than a fault.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::AssetServer;
use crate::config::HeartSceneConfig;
use crate::errors::Result;
use crate::render::Renderer;
use crate::view::HeartView;

pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    assets: AssetServer,
    view: HeartView,

    pub title: String,
    max_pixel_ratio: f64,
}

impl App {
    #[must_use]
    pub fn new(config: HeartSceneConfig) -> Self {
        let max_pixel_ratio = config.max_pixel_ratio;
        Self {
            window: None,
            renderer: None,
            assets: AssetServer::new(),
            view: HeartView::new(config),
            title: "Heartfield".to_string(),
            max_pixel_ratio,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    /// Backing-buffer size: the window's physical size with the device
    /// pixel ratio clamped to the configured ceiling, bounding GPU memory
    /// on very dense displays.
    fn surface_size(&self, window: &Window) -> (u32, u32) {
        let size = window.inner_size();
        let scale = window.scale_factor();
        clamp_surface_size(size.width, size.height, scale, self.max_pixel_ratio)
    }
}

/// Scales physical dimensions down when the scale factor exceeds `ceiling`.
#[must_use]
pub fn clamp_surface_size(width: u32, height: u32, scale: f64, ceiling: f64) -> (u32, u32) {
    if scale <= ceiling || scale <= 0.0 {
        return (width, height);
    }
    let factor = ceiling / scale;
    (
        (f64::from(width) * factor).round() as u32,
        (f64::from(height) * factor).round() as u32,
    )
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("No host window available: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("Initializing renderer backend...");
        let (width, height) = self.surface_size(&window);
        match pollster::block_on(Renderer::new(window.clone(), width, height)) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(err) => {
                log::error!("Fatal renderer error: {err}");
                event_loop.exit();
                return;
            }
        }

        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        self.view.mount(&self.assets, aspect);

        // First frame before the animation loop starts ticking.
        if let Some(renderer) = &mut self.renderer {
            renderer.render(self.view.scene(), &self.assets);
        }
        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.view.dispose(&self.assets);
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                let Some(window) = self.window.clone() else {
                    return;
                };
                let (width, height) = self.surface_size(&window);
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(width, height);
                }
                if height > 0 {
                    self.view.resize(width as f32 / height as f32);
                }
            }
            WindowEvent::RedrawRequested => {
                self.view.tick(&self.assets);
                if let Some(renderer) = &mut self.renderer {
                    renderer.render(self.view.scene(), &self.assets);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
