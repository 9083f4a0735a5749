use anyhow::Context as _;

use crate::{
    context::{Gpu, RenderTarget},
    data_structures::{texture::Texture, vertex::TexturedVertex},
    pipelines::{PipelineState, Program, Stages, VertexArray, mk_render_pipeline},
    resources::{ledger::ResourceKind, shader::link_program},
    uniforms::TexturedUniforms,
};

pub const VERTEX_SOURCE: &str = include_str!("textured_vs.wgsl");
pub const FRAGMENT_SOURCE: &str = include_str!("textured_fs.wgsl");

pub fn mk_stages(gpu: &Gpu) -> Stages {
    Stages::compile(gpu, "textured", VERTEX_SOURCE, FRAGMENT_SOURCE)
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// Group 0 holds the uniform block, group 1 the base and distortion textures
/// (texture unit 0 and 1 respectively).
pub fn mk_vertex_array(
    gpu: &Gpu,
    uniform_buffer: &wgpu::Buffer,
    base: &Texture,
    distort: &Texture,
) -> anyhow::Result<VertexArray> {
    let globals_layout = gpu
        .device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<TexturedUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });
    let texture_layout = gpu
        .device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                texture_entry(2),
                sampler_entry(3),
            ],
        });

    let globals = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("globals_bind_group"),
        layout: &globals_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    let base_sampler = base.sampler.as_deref().context("base texture has no sampler")?;
    let distort_sampler = distort
        .sampler
        .as_deref()
        .context("distortion texture has no sampler")?;
    let textures = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("texture_bind_group"),
        layout: &texture_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&base.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(base_sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&distort.view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(distort_sampler),
            },
        ],
    });

    let pipeline_layout = gpu
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &texture_layout],
            push_constant_ranges: &[],
        });

    Ok(VertexArray {
        layout: TexturedVertex::layout(),
        bind_groups: vec![
            gpu.ledger.track(ResourceKind::BindGroup, "globals_bind_group", globals),
            gpu.ledger.track(ResourceKind::BindGroup, "texture_bind_group", textures),
        ],
        pipeline_layout: gpu
            .ledger
            .track(ResourceKind::VertexArray, "textured vertex array", pipeline_layout),
    })
}

/// Link the filled program, plus a line variant when the adapter supports it.
pub fn mk_program(gpu: &Gpu, vertex_array: &VertexArray, stages: &Stages, target: &RenderTarget) -> Program {
    let state = PipelineState {
        topology: wgpu::PrimitiveTopology::TriangleStrip,
        strip_index_format: Some(wgpu::IndexFormat::Uint32),
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        polygon_mode: wgpu::PolygonMode::Fill,
    };
    let fill = link_program(gpu, "textured program", |device| {
        mk_render_pipeline(device, "textured program", vertex_array, stages, target, state)
    });
    let wireframe = gpu.supports_wireframe().then(|| {
        let state = PipelineState {
            polygon_mode: wgpu::PolygonMode::Line,
            ..state
        };
        link_program(gpu, "textured wireframe program", |device| {
            mk_render_pipeline(device, "textured wireframe program", vertex_array, stages, target, state)
        })
    });
    if wireframe.is_none() {
        log::info!("Adapter has no line polygon mode, wireframe is unavailable");
    }

    Program { fill, wireframe }
}
