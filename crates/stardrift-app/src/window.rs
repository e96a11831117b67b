//! Window creation and event handling via winit.
//!
//! [`FlythroughApp`] implements winit's [`ApplicationHandler`]: the window
//! and GPU come up in `resumed`, input and resizes arrive as window events,
//! and each `RedrawRequested` runs fixed simulation ticks then renders one
//! frame (starfield first, ship on top).

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use stardrift_config::Config;
use stardrift_input::{FlightAction, FlightBindings, KeyboardState};
use stardrift_render::{
    Camera, DepthBuffer, FrameEncoder, MeshBuffer, RenderContext, RenderPassBuilder, ShipPipeline,
    SurfaceError, SurfaceWrapper, create_mesh, generate_cone, init_render_context_blocking,
};
use stardrift_ship::{FlightTuning, ShipState, advance};
use stardrift_space::{StarfieldGenerator, StarfieldRenderer};

use crate::error::AppError;
use crate::game_loop::{FramePacer, GameLoop};
use crate::state::LoopState;

/// Ship cone: base radius, length nose-to-base, and tessellation.
const SHIP_BASE_RADIUS: f32 = 0.5;
const SHIP_HEIGHT: f32 = 1.5;
const SHIP_SLICES: u32 = 16;
const SHIP_STACKS: u32 = 8;
/// Steel blue hull color.
const SHIP_COLOR: [f32; 4] = [0.2, 0.4, 0.8, 1.0];

/// Window attributes derived from configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ))
}

/// Application state: window, GPU resources, simulation, and input.
pub struct FlythroughApp {
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    surface_wrapper: SurfaceWrapper,
    depth_buffer: Option<DepthBuffer>,
    camera: Camera,
    starfield: Option<StarfieldRenderer>,
    ship_pipeline: Option<ShipPipeline>,
    ship_mesh: Option<MeshBuffer>,
    ship: ShipState,
    tuning: FlightTuning,
    bindings: FlightBindings,
    keyboard: KeyboardState,
    game_loop: GameLoop,
    /// Sleeps out the frame budget when the surface is not vsynced.
    pacer: Option<FramePacer>,
    state: LoopState,
    config: Config,
    fatal: Option<AppError>,
}

impl FlythroughApp {
    pub fn new(config: Config) -> Self {
        let mut bindings = FlightBindings::default();
        bindings.apply_overrides(&config.input.keybindings);

        let tuning = FlightTuning {
            speed: config.ship.speed,
            turn_rate: config.ship.turn_rate_deg,
        };

        let mut camera = Camera::default();
        camera.set_aspect_ratio(config.window.width as f32, config.window.height as f32);

        // target_fps 0 means uncapped: no pacer, vsync (if on) is the only cap.
        let pacer = (!config.window.vsync && config.render.target_fps > 0)
            .then(|| FramePacer::new(config.render.target_fps));

        Self {
            window: None,
            gpu: None,
            surface_wrapper: SurfaceWrapper::new(config.window.width, config.window.height, 1.0),
            depth_buffer: None,
            camera,
            starfield: None,
            ship_pipeline: None,
            ship_mesh: None,
            ship: ShipState::default(),
            tuning,
            bindings,
            keyboard: KeyboardState::new(),
            game_loop: GameLoop::new(),
            pacer,
            state: LoopState::default(),
            config,
            fatal: None,
        }
    }

    fn abort(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.fatal = Some(err);
        self.state.stop();
        event_loop.exit();
    }

    /// Propagate new surface dimensions to the GPU surface, depth buffer,
    /// camera, and both camera uniform buffers.
    fn apply_resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect_ratio(width as f32, height as f32);

        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
        }
        if let (Some(depth), Some(gpu)) = (&mut self.depth_buffer, &self.gpu) {
            depth.resize(&gpu.device, width, height);
        }
        if let Some(gpu) = &self.gpu {
            let uniform = self.camera.to_uniform(width as f32, height as f32);
            if let Some(starfield) = &self.starfield {
                starfield.update_camera(&gpu.queue, &uniform);
            }
            if let Some(pipeline) = &self.ship_pipeline {
                pipeline.update_camera(&gpu.queue, &uniform);
            }
        }

        info!("Window resized to {width}x{height}");
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.state.is_running() {
            return;
        }

        let actions = self.bindings.resolve(&self.keyboard);
        if actions.is_active(FlightAction::Quit) {
            info!("Quit requested");
            self.state.stop();
            event_loop.exit();
            return;
        }

        let tuning = self.tuning;
        let ship = &mut self.ship;
        self.game_loop.tick(|| {
            *ship = advance(*ship, &actions, &tuning);
        });

        if let (Some(gpu), Some(depth), Some(starfield), Some(pipeline), Some(mesh)) = (
            &self.gpu,
            &self.depth_buffer,
            &self.starfield,
            &self.ship_pipeline,
            &self.ship_mesh,
        ) {
            pipeline.update_model(&gpu.queue, self.ship.model_matrix());

            match gpu.get_current_texture() {
                Ok(surface_texture) => {
                    let mut encoder = FrameEncoder::new(&gpu.device, surface_texture);
                    let builder = RenderPassBuilder::new()
                        .depth(depth.view.clone())
                        .label("scene-pass");
                    {
                        let mut pass = encoder.begin_render_pass(&builder);
                        starfield.render(&mut pass);
                        pipeline.draw(&mut pass, mesh);
                    }
                    encoder.finish(&gpu.queue);
                }
                Err(SurfaceError::OutOfMemory) => {
                    self.abort(event_loop, AppError::Runtime("GPU out of memory".into()));
                    return;
                }
                Err(e) => {
                    warn!("Skipping frame: {e}");
                }
            }
        }

        self.keyboard.clear_transients();

        if let Some(pacer) = &mut self.pacer {
            pacer.wait();
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for FlythroughApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.abort(
                    event_loop,
                    AppError::Runtime(format!("window creation failed: {e}")),
                );
                return;
            }
        };

        let scale_factor = window.scale_factor();
        let inner_size = window.inner_size();
        self.surface_wrapper =
            SurfaceWrapper::new(inner_size.width, inner_size.height, scale_factor);

        let gpu = match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.abort(event_loop, e.into());
                return;
            }
        };

        let width = self.surface_wrapper.physical_width();
        let height = self.surface_wrapper.physical_height();
        self.camera.set_aspect_ratio(width as f32, height as f32);

        let depth_buffer = DepthBuffer::new(&gpu.device, width, height);

        // A configured seed gives a reproducible sky; otherwise draw one
        // from entropy and log it so a run can be replayed.
        let seed = self
            .config
            .scene
            .seed
            .unwrap_or_else(|| rand::random::<u64>());
        info!(
            "Generating starfield: {} stars, seed {seed}",
            self.config.scene.star_count
        );
        let stars = StarfieldGenerator::new(seed, self.config.scene.star_count).generate();

        let starfield = StarfieldRenderer::new(&gpu.device, gpu.surface_format, &stars);
        let ship_pipeline = ShipPipeline::new(&gpu.device, gpu.surface_format);

        let (vertices, indices) = generate_cone(
            SHIP_BASE_RADIUS,
            SHIP_HEIGHT,
            SHIP_SLICES,
            SHIP_STACKS,
            SHIP_COLOR,
        );
        let ship_mesh = create_mesh(&gpu.device, "ship-cone", &vertices, &indices);

        let uniform = self.camera.to_uniform(width as f32, height as f32);
        starfield.update_camera(&gpu.queue, &uniform);
        ship_pipeline.update_camera(&gpu.queue, &uniform);
        ship_pipeline.update_model(&gpu.queue, self.ship.model_matrix());

        info!("Stardrift initialized: {width}x{height} (scale {scale_factor:.2})");

        self.depth_buffer = Some(depth_buffer);
        self.starfield = Some(starfield);
        self.ship_pipeline = Some(ship_pipeline);
        self.ship_mesh = Some(ship_mesh);
        self.gpu = Some(gpu);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                self.state.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some((w, h)) = self
                    .surface_wrapper
                    .handle_resize(new_size.width, new_size.height)
                {
                    self.apply_resize(w, h);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let inner = window.inner_size();
                    if let Some((w, h)) = self.surface_wrapper.handle_scale_factor_changed(
                        scale_factor,
                        inner.width,
                        inner.height,
                    ) {
                        self.apply_resize(w, h);
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

/// Run the flythrough until the window closes or Escape is pressed.
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = FlythroughApp::new(config);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_attributes_carry_config() {
        let config = Config::default();
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Stardrift");
    }

    #[test]
    fn test_pacer_only_without_vsync() {
        let mut config = Config::default();
        config.window.vsync = true;
        assert!(FlythroughApp::new(config).pacer.is_none());

        let mut config = Config::default();
        config.window.vsync = false;
        assert!(FlythroughApp::new(config).pacer.is_some());
    }

    #[test]
    fn test_zero_target_fps_runs_uncapped() {
        // target_fps 0 must not create a pacer; FramePacer::new clamps the
        // divisor, so constructing one here would sleep a full second per
        // frame instead of running uncapped.
        let mut config = Config::default();
        config.window.vsync = false;
        config.render.target_fps = 0;
        assert!(FlythroughApp::new(config).pacer.is_none());
    }

    #[test]
    fn test_tuning_comes_from_config() {
        let mut config = Config::default();
        config.ship.speed = 0.25;
        config.ship.turn_rate_deg = 5.0;
        let app = FlythroughApp::new(config);
        assert!((app.tuning.speed - 0.25).abs() < 1e-6);
        assert!((app.tuning.turn_rate - 5.0).abs() < 1e-6);
    }
}
