//! Programs and binding state of the two demos.
//!
//! A demo's GPU setup is split the way the draw path consumes it:
//! [`Stages`] (one compiled module per shader stage), a [`VertexArray`]
//! (attribute layout plus the bind groups captured for every draw) and a
//! [`Program`] (the linked pipelines).

pub mod textured;
pub mod triangles;

use crate::{
    context::{Gpu, RenderTarget},
    data_structures::vertex::VertexLayout,
    resources::{
        ledger::Tracked,
        shader::{CompiledStage, LinkedPipeline, Stage, compile_stage},
    },
};

/// The vertex and fragment stage of one program.
#[derive(Debug)]
pub struct Stages {
    pub vertex: CompiledStage,
    pub fragment: CompiledStage,
}

impl Stages {
    pub fn compile(gpu: &Gpu, label: &str, vertex_source: &str, fragment_source: &str) -> Self {
        Self {
            vertex: compile_stage(gpu, Stage::Vertex, &format!("{} vertex shader", label), vertex_source),
            fragment: compile_stage(
                gpu,
                Stage::Fragment,
                &format!("{} fragment shader", label),
                fragment_source,
            ),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.vertex.is_ok() && self.fragment.is_ok()
    }
}

/// Attribute layout plus the bind groups every draw of the program uses.
///
/// Group 0 is the uniform block; its dynamic offset (if any) is passed to
/// [`VertexArray::bind`]. The bind groups are released before the layout
/// they were created for.
#[derive(Debug)]
pub struct VertexArray {
    pub layout: VertexLayout,
    pub bind_groups: Vec<Tracked<wgpu::BindGroup>>,
    pub pipeline_layout: Tracked<wgpu::PipelineLayout>,
}

impl VertexArray {
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>, uniform_offsets: &[wgpu::DynamicOffset]) {
        for (index, group) in self.bind_groups.iter().enumerate() {
            let offsets = if index == 0 { uniform_offsets } else { &[] };
            render_pass.set_bind_group(index as u32, &**group, offsets);
        }
    }
}

/// Linked pipelines: always a filled one, a line one where supported.
#[derive(Debug)]
pub struct Program {
    pub fill: LinkedPipeline,
    pub wireframe: Option<LinkedPipeline>,
}

impl Program {
    /// The pipeline to draw with, or `None` when linking failed.
    ///
    /// Falls back to the filled pipeline when no line pipeline exists.
    pub fn pipeline(&self, wireframe: bool) -> Option<&wgpu::RenderPipeline> {
        let linked = match (&self.wireframe, wireframe) {
            (Some(line), true) => line,
            _ => &self.fill,
        };
        linked.is_linked().then(|| &*linked.pipeline)
    }

    pub fn is_linked(&self) -> bool {
        self.fill.is_linked()
    }
}

/// Fixed-function state of a program.
#[derive(Debug, Clone, Copy)]
pub struct PipelineState {
    pub topology: wgpu::PrimitiveTopology,
    pub strip_index_format: Option<wgpu::IndexFormat>,
    pub blend: Option<wgpu::BlendState>,
    pub polygon_mode: wgpu::PolygonMode,
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    label: &str,
    vertex_array: &VertexArray,
    stages: &Stages,
    target: &RenderTarget,
    state: PipelineState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(label),
        layout: Some(&vertex_array.pipeline_layout),
        vertex: wgpu::VertexState {
            module: &stages.vertex.module,
            entry_point: Some(stages.vertex.stage.entry_point()),
            buffers: &[vertex_array.layout.desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &stages.fragment.module,
            entry_point: Some(stages.fragment.stage.entry_point()),
            targets: &[Some(wgpu::ColorTargetState {
                format: target.format,
                blend: state.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: state.topology,
            strip_index_format: state.strip_index_format,
            front_face: wgpu::FrontFace::Ccw,
            // the demos show both faces
            cull_mode: None,
            polygon_mode: state.polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: target.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
