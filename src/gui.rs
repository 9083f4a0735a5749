//! Tweak overlay.
//!
//! [`GuiOverlay`] owns the egui context, its winit integration and the wgpu
//! renderer. Each frame is split in two: [`GuiOverlay::prepare`] lays out the
//! widgets (editing the [`RenderParams`] in place) before the scene is
//! updated, and [`GuiOverlay::paint`] draws the result in a pass of its own
//! after the scene pass.

use winit::{event::WindowEvent, window::Window};

use crate::{
    context::{Gpu, RenderTarget},
    params::{AMP_RANGE, FORCE_RANGE, MIX_RANGE, RenderParams, SIZE_RANGE},
};

pub const HELP_TEXT: &str = "Tweak the textured quad. Shortcuts: [w] toggles wireframe, \
                             [f]/[F] change the distortion force, [a]/[A] the amplitude.";

/// Lay out the "TweakBar" window.
pub fn tweak_bar(ctx: &egui::Context, params: &mut RenderParams, wireframe_supported: bool) {
    egui::Window::new("TweakBar")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(HELP_TEXT);
            ui.separator();

            ui.add_enabled(
                wireframe_supported,
                egui::Checkbox::new(&mut params.wireframe, "Wireframe mode"),
            )
            .on_hover_text("Toggle wireframe display mode.")
            .on_disabled_hover_text("Not supported by this adapter.");

            ui.horizontal(|ui| {
                ui.color_edit_button_rgb(&mut params.background);
                ui.label("Background color");
            });

            ui.add(
                egui::Slider::new(&mut params.force, FORCE_RANGE.range())
                    .min_decimals(2)
                    .text("Rot speed"),
            )
            .on_hover_text("Distortion force");
            ui.add(
                egui::Slider::new(&mut params.amp, AMP_RANGE.range())
                    .min_decimals(2)
                    .text("Amplitude"),
            )
            .on_hover_text("sin amplitude");
            ui.add(
                egui::Slider::new(&mut params.size, SIZE_RANGE.range())
                    .min_decimals(2)
                    .text("Size"),
            )
            .on_hover_text("Size of scale");
            ui.add(
                egui::Slider::new(&mut params.mix, MIX_RANGE.range())
                    .min_decimals(2)
                    .text("Mix"),
            );

            ui.horizontal(|ui| {
                for angle in params.rotation.iter_mut() {
                    ui.add(egui::DragValue::new(angle).speed(1.0).suffix("°"));
                }
                ui.label("Rotation");
            });
            ui.horizontal(|ui| {
                for component in params.camera_position.iter_mut() {
                    ui.add(egui::DragValue::new(component).speed(0.1));
                }
                ui.label("Camera Position");
            });
        });
}

/// Tessellated output of one GUI frame, ready to paint.
pub struct GuiFrame {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    pixels_per_point: f32,
}

/// Texture uploads and frees egui has handed out but the renderer has not
/// applied yet.
///
/// egui reports each texture change once, so a frame that is laid out but
/// never painted must not lose its changes; they carry over to the next
/// painted frame.
#[derive(Default)]
pub struct PendingTextures(egui::TexturesDelta);

impl PendingTextures {
    pub fn push(&mut self, delta: egui::TexturesDelta) {
        self.0.append(delta);
    }

    pub fn take(&mut self) -> egui::TexturesDelta {
        std::mem::take(&mut self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct GuiOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    pending: PendingTextures,
}

impl GuiOverlay {
    pub fn new(window: &Window, gpu: &Gpu, target: &RenderTarget) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        // The GUI pass has no depth attachment.
        let renderer = egui_wgpu::Renderer::new(&gpu.device, target.format, None, 1, false);
        log::debug!("GUI initialised");
        Self {
            ctx,
            state,
            renderer,
            pending: PendingTextures::default(),
        }
    }

    /// Forward a window event; returns whether the GUI consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn prepare(&mut self, window: &Window, params: &mut RenderParams, wireframe_supported: bool) -> GuiFrame {
        let raw_input = self.state.take_egui_input(window);
        let output = self
            .ctx
            .run(raw_input, |ctx| tweak_bar(ctx, params, wireframe_supported));
        self.state.handle_platform_output(window, output.platform_output);
        self.pending.push(output.textures_delta);

        GuiFrame {
            paint_jobs: self.ctx.tessellate(output.shapes, output.pixels_per_point),
            pixels_per_point: output.pixels_per_point,
        }
    }

    /// Record the GUI pass on top of `view`, loading what the scene drew.
    ///
    /// The returned command buffers must be submitted before the encoder.
    pub fn paint(
        &mut self,
        gpu: &Gpu,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        target: &RenderTarget,
        frame: GuiFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [target.width, target.height],
            pixels_per_point: frame.pixels_per_point,
        };
        let textures_delta = self.pending.take();
        for (id, delta) in &textures_delta.set {
            self.renderer.update_texture(&gpu.device, &gpu.queue, *id, delta);
        }
        let commands = self
            .renderer
            .update_buffers(&gpu.device, &gpu.queue, encoder, &frame.paint_jobs, &screen);

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("GUI Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();
            self.renderer.render(&mut render_pass, &frame.paint_jobs, &screen);
        }

        for id in &textures_delta.free {
            self.renderer.free_texture(id);
        }
        commands
    }

    pub fn shutdown(self) {
        log::debug!("GUI shut down");
    }
}
