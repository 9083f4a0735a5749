use crate::{
    config::AppConfig,
    context::{Gpu, RenderTarget},
    data_structures::{geometry::TRIANGLES, vertex::ColorVertex},
    demos::{GeometryBuffers, upload_geometry},
    flow::Demo,
    params::{RenderParams, Shortcut},
    pipelines::{Program, Stages, VertexArray, triangles},
    render::{Draw, Scene},
    resources::{create_buffer, ledger::Tracked},
    uniforms::{OffsetUniform, array_offset, element_offset},
};

/// Two wobbling triangles: one drawn from the raw vertex array, one through
/// the element buffer, each with its own offset.
#[derive(Debug)]
pub struct Triangles {
    params: RenderParams,
    program: Program,
    stages: Stages,
    geometry: GeometryBuffers,
    uniform_buffer: Tracked<wgpu::Buffer>,
    uniform_stride: wgpu::BufferAddress,
    vertex_array: VertexArray,
}

impl Triangles {
    /// Slot 0 feeds the raw array draw, slot 1 the element draw.
    pub fn draws() -> Vec<Draw> {
        vec![
            Draw::Arrays {
                vertices: 0..3,
                uniform_slot: 0,
            },
            Draw::Elements {
                indices: 0..TRIANGLES.index_count(),
                uniform_slot: 1,
            },
        ]
    }

    /// The per-slot uniform values at `elapsed` seconds.
    pub fn offsets(elapsed: f32) -> [OffsetUniform; triangles::UNIFORM_SLOTS as usize] {
        [
            OffsetUniform::new(array_offset(elapsed)),
            OffsetUniform::new(element_offset(elapsed)),
        ]
    }
}

impl Demo for Triangles {
    const NAME: &'static str = "triangles";
    const DEPTH: bool = false;
    const HAS_GUI: bool = false;

    fn defaults() -> AppConfig {
        AppConfig::default()
    }

    fn setup(gpu: &Gpu, target: &RenderTarget, config: &AppConfig) -> anyhow::Result<Self> {
        let geometry = upload_geometry(gpu, "triangles", &TRIANGLES, &ColorVertex::layout())?;
        let uniform_stride = triangles::uniform_stride(gpu);
        let uniform_buffer = create_buffer(
            gpu,
            "offset uniform buffer",
            uniform_stride * triangles::UNIFORM_SLOTS,
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let vertex_array = triangles::mk_vertex_array(gpu, &uniform_buffer);
        let stages = triangles::mk_stages(gpu);
        let program = triangles::mk_program(gpu, &vertex_array, &stages, target);

        Ok(Self {
            params: RenderParams::from(&config.scene),
            program,
            stages,
            geometry,
            uniform_buffer,
            uniform_stride,
            vertex_array,
        })
    }

    fn params(&self) -> &RenderParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut RenderParams {
        &mut self.params
    }

    // No tweakable parameters here.
    fn on_shortcut(&mut self, _shortcut: Shortcut) {}

    fn update(&mut self, gpu: &Gpu, elapsed: f32, _target: &RenderTarget) {
        for (slot, uniform) in Self::offsets(elapsed).iter().enumerate() {
            gpu.queue.write_buffer(
                &self.uniform_buffer,
                slot as wgpu::BufferAddress * self.uniform_stride,
                bytemuck::bytes_of(uniform),
            );
        }
    }

    fn scene(&self) -> Scene<'_> {
        Scene {
            program: &self.program,
            vertex_array: &self.vertex_array,
            vertex_buffer: &self.geometry.vertex,
            index_buffer: &self.geometry.index,
            uniform_stride: Some(self.uniform_stride),
            wireframe: false,
            draws: Self::draws(),
        }
    }

    fn teardown(self) {
        let Self {
            program,
            stages,
            geometry,
            uniform_buffer,
            vertex_array,
            ..
        } = self;
        drop(program);
        drop(stages);
        drop(geometry);
        drop(uniform_buffer);
        drop(vertex_array);
        log::debug!("{} resources released", Self::NAME);
    }
}
