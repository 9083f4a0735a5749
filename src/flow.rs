//! Demo trait and application event loop.
//!
//! A [`Demo`] owns the GPU resources of one program and describes each frame.
//! [`run`] loads the configuration, opens the window, brings up the GPU and
//! drives the demo until the window is closed.
//!
//! # Lifecycle
//!
//! Each iteration of the loop:
//! 1. Forward window events to the GUI (if any), then to the loop: Escape or a
//!    close request moves the [`FrameLoop`] to `Closing`
//! 2. Read the elapsed time and update the demo's uniforms
//! 3. Clear and draw the scene, then draw the GUI in its own pass
//! 4. Present, then let the [`FrameLoop`] decide whether to go on
//!
//! On exit the demo's resources are released first, then the GUI, then the
//! depth buffer and the window.

use std::{iter, process::ExitCode, sync::Arc};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{
    config::{AppConfig, LoggingConfig},
    context::{Context, ContextOptions, Gpu, RenderTarget},
    error::InitError,
    gui::GuiOverlay,
    logging::init_logging,
    params::{RenderParams, Shortcut},
    render::{Scene, begin_scene_pass, draw_scene},
    resources::ledger::Audit,
};

/// One demo program.
pub trait Demo: Sized {
    const NAME: &'static str;
    /// Whether the scene pass needs a depth buffer.
    const DEPTH: bool;
    const HAS_GUI: bool;

    /// Configuration the layered files and environment are merged onto.
    fn defaults() -> AppConfig;

    /// Create every GPU resource the demo draws with.
    fn setup(gpu: &Gpu, target: &RenderTarget, config: &AppConfig) -> anyhow::Result<Self>;

    fn params(&self) -> &RenderParams;

    fn params_mut(&mut self) -> &mut RenderParams;

    fn on_shortcut(&mut self, shortcut: Shortcut) {
        self.params_mut().apply(shortcut);
    }

    /// Write this frame's uniforms. `elapsed` is in seconds since the context was created.
    fn update(&mut self, gpu: &Gpu, elapsed: f32, target: &RenderTarget);

    fn clear_colour(&self) -> wgpu::Color {
        self.params().clear_colour()
    }

    fn scene(&self) -> Scene<'_>;

    /// Issue the frame's draw calls; returns how many were issued.
    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) -> usize {
        draw_scene(render_pass, &self.scene())
    }

    /// Release the program, stages, buffers, textures and vertex array, in that order.
    fn teardown(self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// A close was requested; the iteration in progress still presents.
    Closing,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Running/Closing state of the frame loop.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Completed (presented) iterations.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn request_close(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("Close requested after {} frames", self.frames);
            self.state = LoopState::Closing;
        }
    }

    /// Whether the current iteration may still draw.
    pub fn can_draw(&self) -> bool {
        self.state != LoopState::Exited
    }

    /// Called once the iteration presented its frame.
    pub fn finish_iteration(&mut self) -> LoopControl {
        match self.state {
            LoopState::Running => {
                self.frames += 1;
                LoopControl::Continue
            }
            LoopState::Closing => {
                self.frames += 1;
                self.state = LoopState::Exited;
                LoopControl::Exit
            }
            LoopState::Exited => LoopControl::Exit,
        }
    }
}

/// What a pressed key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Close,
    Shortcut(Shortcut),
    Ignore,
}

/// Route a pressed key. Escape closes even while the GUI has focus; keys the
/// GUI consumed never reach the shortcuts.
pub fn route_key(key: &Key, gui_consumed: bool) -> KeyAction {
    match key {
        Key::Named(NamedKey::Escape) => KeyAction::Close,
        Key::Character(text) if !gui_consumed => Shortcut::from_text(text.as_str())
            .map(KeyAction::Shortcut)
            .unwrap_or(KeyAction::Ignore),
        _ => KeyAction::Ignore,
    }
}

struct Running<D> {
    ctx: Context,
    demo: D,
    gui: Option<GuiOverlay>,
}

impl<D: Demo> Running<D> {
    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let elapsed = self.ctx.elapsed();
        let target = self.ctx.target();
        let wireframe_supported = self.ctx.gpu.supports_wireframe();

        // Acquire before the GUI runs, so a skipped frame lays nothing out.
        let output = self.ctx.surface.get_current_texture()?;

        // The GUI edits the parameters before they are turned into uniforms.
        let gui_frame = self
            .gui
            .as_mut()
            .map(|gui| gui.prepare(&self.ctx.window, self.demo.params_mut(), wireframe_supported));
        self.demo.update(&self.ctx.gpu, elapsed, &target);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let depth_view = self.ctx.depth_texture.as_ref().map(|depth| &depth.view);
            let mut render_pass =
                begin_scene_pass(&mut encoder, &view, depth_view, self.demo.clear_colour());
            self.demo.draw(&mut render_pass);
        }

        let gui_commands = match (self.gui.as_mut(), gui_frame) {
            (Some(gui), Some(frame)) => gui.paint(&self.ctx.gpu, &mut encoder, &view, &target, frame),
            _ => Vec::new(),
        };

        self.ctx
            .gpu
            .queue
            .submit(gui_commands.into_iter().chain(iter::once(encoder.finish())));
        self.ctx.window.pre_present_notify();
        output.present();
        Ok(())
    }

    fn teardown(self) -> Audit {
        let Running { ctx, demo, gui } = self;
        demo.teardown();
        if let Some(gui) = gui {
            gui.shutdown();
        }
        ctx.teardown()
    }
}

pub struct App<D: Demo> {
    config: AppConfig,
    state: Option<Running<D>>,
    frame_loop: FrameLoop,
    failure: Option<InitError>,
    audit: Option<Audit>,
}

impl<D: Demo> App<D> {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            frame_loop: FrameLoop::new(),
            failure: None,
            audit: None,
        }
    }

    /// The first initialization failure, if any.
    pub fn take_failure(&mut self) -> Option<InitError> {
        self.failure.take()
    }

    /// Ledger audit taken at teardown.
    pub fn audit(&self) -> Option<&Audit> {
        self.audit.as_ref()
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<Running<D>, InitError> {
        let window_config = &self.config.window;
        let window_attributes = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height))
            .with_resizable(window_config.resizable);
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let ctx = Context::new(
            window,
            ContextOptions {
                depth: D::DEPTH,
                vsync: window_config.vsync,
            },
        )?;
        let demo = D::setup(&ctx.gpu, &ctx.target(), &self.config).map_err(InitError::Setup)?;
        let gui = (D::HAS_GUI && self.config.gui.enabled)
            .then(|| GuiOverlay::new(&ctx.window, &ctx.gpu, &ctx.target()));

        Ok(Running { ctx, demo, gui })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.state else {
            return;
        };
        if !self.frame_loop.can_draw() {
            return;
        }
        match running.render_frame() {
            Ok(()) => {}
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => running.ctx.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory while rendering, closing");
                self.frame_loop.request_close();
            }
            Err(e) => log::warn!("Unable to render {}", e),
        }
        if self.frame_loop.finish_iteration() == LoopControl::Exit {
            event_loop.exit();
        }
    }
}

impl<D: Demo> ApplicationHandler for App<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.failure.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(running) => {
                log::info!("{} running", D::NAME);
                running.ctx.window.request_redraw();
                self.state = Some(running);
            }
            Err(e) => {
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(running) = &mut self.state else {
            return;
        };
        let consumed = match running.gui.as_mut() {
            Some(gui) => gui.on_window_event(&running.ctx.window, &event),
            None => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                self.frame_loop.request_close();
                running.ctx.window.request_redraw();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match route_key(&logical_key, consumed) {
                KeyAction::Close => {
                    self.frame_loop.request_close();
                    running.ctx.window.request_redraw();
                }
                KeyAction::Shortcut(shortcut) => running.demo.on_shortcut(shortcut),
                KeyAction::Ignore => {}
            },
            WindowEvent::Resized(size) => running.ctx.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &self.state else {
            return;
        };
        match self.frame_loop.state() {
            // A minimized window gets no redraws, so finish the closing iteration here.
            LoopState::Closing if running.ctx.window.is_minimized() == Some(true) => {
                if self.frame_loop.finish_iteration() == LoopControl::Exit {
                    event_loop.exit();
                }
            }
            LoopState::Running | LoopState::Closing => running.ctx.window.request_redraw(),
            LoopState::Exited => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(running) = self.state.take() else {
            return;
        };
        let audit = running.teardown();
        if audit.is_balanced() {
            log::debug!("Released all {} GPU resources", audit.released);
        } else {
            log::warn!(
                "GPU resources left after teardown: {} live, {} double releases: {:?}",
                audit.live.len(),
                audit.double_releases,
                audit.live
            );
        }
        self.audit = Some(audit);
    }
}

fn try_run<D: Demo>() -> Result<(), InitError> {
    let config = match AppConfig::load(D::defaults()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&LoggingConfig::default());
            return Err(e.into());
        }
    };
    init_logging(&config.logging);
    log::info!("Starting {}", D::NAME);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::<D>::new(config);
    event_loop.run_app(&mut app)?;

    match app.take_failure() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Run demo `D` to completion and map the outcome to a process exit code.
pub fn run<D: Demo>() -> ExitCode {
    match try_run::<D>() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
