use crate::{
    context::{Gpu, RenderTarget},
    data_structures::vertex::ColorVertex,
    pipelines::{PipelineState, Program, Stages, VertexArray, mk_render_pipeline},
    resources::{ledger::ResourceKind, shader::link_program},
    uniforms::OffsetUniform,
};

pub const VERTEX_SOURCE: &str = include_str!("triangles_vs.wgsl");
pub const FRAGMENT_SOURCE: &str = include_str!("triangles_fs.wgsl");

/// Number of distinct offsets one frame writes: the raw array draws and the
/// element draw.
pub const UNIFORM_SLOTS: u64 = 2;

/// Distance in bytes between two uniform slots.
pub fn uniform_stride(gpu: &Gpu) -> wgpu::BufferAddress {
    let size = std::mem::size_of::<OffsetUniform>() as wgpu::BufferAddress;
    size.div_ceil(gpu.uniform_alignment()) * gpu.uniform_alignment()
}

pub fn mk_stages(gpu: &Gpu) -> Stages {
    Stages::compile(gpu, "triangles", VERTEX_SOURCE, FRAGMENT_SOURCE)
}

/// Layout and bind group of the offset uniform, read with a dynamic offset.
pub fn mk_vertex_array(gpu: &Gpu, uniform_buffer: &wgpu::Buffer) -> VertexArray {
    let uniform_size = wgpu::BufferSize::new(std::mem::size_of::<OffsetUniform>() as u64);
    let bind_group_layout = gpu
        .device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("offset_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: uniform_size,
                },
                count: None,
            }],
        });
    let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("offset_bind_group"),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: uniform_buffer,
                offset: 0,
                size: uniform_size,
            }),
        }],
    });
    let pipeline_layout = gpu
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangles_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

    VertexArray {
        layout: ColorVertex::layout(),
        bind_groups: vec![gpu.ledger.track(ResourceKind::BindGroup, "offset_bind_group", bind_group)],
        pipeline_layout: gpu
            .ledger
            .track(ResourceKind::VertexArray, "triangles vertex array", pipeline_layout),
    }
}

pub fn mk_program(gpu: &Gpu, vertex_array: &VertexArray, stages: &Stages, target: &RenderTarget) -> Program {
    let state = PipelineState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        blend: Some(wgpu::BlendState::REPLACE),
        polygon_mode: wgpu::PolygonMode::Fill,
    };
    let fill = link_program(gpu, "triangles program", |device| {
        mk_render_pipeline(device, "triangles program", vertex_array, stages, target, state)
    });

    Program {
        fill,
        wireframe: None,
    }
}
