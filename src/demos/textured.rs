use crate::{
    config::{AppConfig, SceneConfig, WindowConfig},
    context::{Gpu, RenderTarget},
    data_structures::{
        geometry::TEXTURED_QUAD,
        texture::{Sampling, Texture},
        vertex::TexturedVertex,
    },
    demos::{GeometryBuffers, upload_geometry},
    flow::Demo,
    params::RenderParams,
    pipelines::{Program, Stages, VertexArray, textured},
    render::{Draw, Scene},
    resources::{create_buffer, ledger::Tracked, texture::load_texture_or_fallback},
    uniforms::TexturedUniforms,
};

/// A spinning quad blending a base image with a wave-distorted second image.
#[derive(Debug)]
pub struct Textured {
    params: RenderParams,
    program: Program,
    stages: Stages,
    geometry: GeometryBuffers,
    uniform_buffer: Tracked<wgpu::Buffer>,
    base: Texture,
    distort: Texture,
    vertex_array: VertexArray,
}

impl Textured {
    pub fn draws() -> Vec<Draw> {
        vec![Draw::Elements {
            indices: 0..TEXTURED_QUAD.index_count(),
            uniform_slot: 0,
        }]
    }
}

impl Demo for Textured {
    const NAME: &'static str = "textured";
    const DEPTH: bool = true;
    const HAS_GUI: bool = true;

    fn defaults() -> AppConfig {
        AppConfig {
            window: WindowConfig {
                resizable: true,
                ..WindowConfig::default()
            },
            scene: SceneConfig {
                background: [0.1, 0.2, 0.4],
                ..SceneConfig::default()
            },
            ..AppConfig::default()
        }
    }

    fn setup(gpu: &Gpu, target: &RenderTarget, config: &AppConfig) -> anyhow::Result<Self> {
        let geometry = upload_geometry(gpu, "textured", &TEXTURED_QUAD, &TexturedVertex::layout())?;
        let uniform_buffer = create_buffer(
            gpu,
            "textured uniform buffer",
            std::mem::size_of::<TexturedUniforms>() as wgpu::BufferAddress,
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        // Decoded pixels are dropped as soon as each upload is queued.
        let base = load_texture_or_fallback(gpu, &config.assets.base_path(), Sampling::NEAREST_REPEAT);
        let distort = load_texture_or_fallback(gpu, &config.assets.distort_path(), Sampling::LINEAR_REPEAT);

        let vertex_array = textured::mk_vertex_array(gpu, &uniform_buffer, &base, &distort)?;
        let stages = textured::mk_stages(gpu);
        let program = textured::mk_program(gpu, &vertex_array, &stages, target);

        Ok(Self {
            params: RenderParams::from(&config.scene),
            program,
            stages,
            geometry,
            uniform_buffer,
            base,
            distort,
            vertex_array,
        })
    }

    fn params(&self) -> &RenderParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut RenderParams {
        &mut self.params
    }

    fn update(&mut self, gpu: &Gpu, elapsed: f32, target: &RenderTarget) {
        let uniforms = TexturedUniforms::compute(&self.params, elapsed, target.aspect_ratio());
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    fn scene(&self) -> Scene<'_> {
        Scene {
            program: &self.program,
            vertex_array: &self.vertex_array,
            vertex_buffer: &self.geometry.vertex,
            index_buffer: &self.geometry.index,
            uniform_stride: None,
            wireframe: self.params.wireframe,
            draws: Self::draws(),
        }
    }

    fn teardown(self) {
        let Self {
            program,
            stages,
            geometry,
            uniform_buffer,
            base,
            distort,
            vertex_array,
            ..
        } = self;
        drop(program);
        drop(stages);
        drop(geometry);
        drop(uniform_buffer);
        drop(base);
        drop(distort);
        drop(vertex_array);
        log::debug!("{} resources released", Self::NAME);
    }
}
