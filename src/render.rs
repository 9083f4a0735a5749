//! Scene pass and draw calls.
//!
//! A demo describes its frame as a [`Scene`]: the program, vertex array and
//! buffers to bind plus an ordered list of [`Draw`] calls. [`draw_scene`]
//! issues them into a pass opened by [`begin_scene_pass`].

use std::ops::Range;

use crate::pipelines::{Program, VertexArray};

/// One draw call.
///
/// `uniform_slot` selects which per-draw uniform value the call sees; it only
/// matters for programs whose uniform block is bound with a dynamic offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    /// Vertices taken straight from the vertex buffer.
    Arrays { vertices: Range<u32>, uniform_slot: u32 },
    /// Vertices picked through the element buffer.
    Elements { indices: Range<u32>, uniform_slot: u32 },
}

impl Draw {
    pub fn uniform_slot(&self) -> u32 {
        match self {
            Draw::Arrays { uniform_slot, .. } | Draw::Elements { uniform_slot, .. } => *uniform_slot,
        }
    }
}

/// Everything bound for one frame of a demo.
#[derive(Debug)]
pub struct Scene<'a> {
    pub program: &'a Program,
    pub vertex_array: &'a VertexArray,
    pub vertex_buffer: &'a wgpu::Buffer,
    pub index_buffer: &'a wgpu::Buffer,
    /// Byte distance between uniform slots, `None` when the uniform block has
    /// a single static binding.
    pub uniform_stride: Option<wgpu::BufferAddress>,
    pub wireframe: bool,
    pub draws: Vec<Draw>,
}

impl Scene<'_> {
    /// Dynamic offsets for a draw, empty when the block is bound statically.
    pub fn uniform_offsets(&self, draw: &Draw) -> Vec<wgpu::DynamicOffset> {
        self.uniform_stride
            .map(|stride| vec![(draw.uniform_slot() as wgpu::BufferAddress * stride) as wgpu::DynamicOffset])
            .unwrap_or_default()
    }
}

/// Open the pass that clears the frame (and depth, when present) and draws the scene.
pub fn begin_scene_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    depth_view: Option<&wgpu::TextureView>,
    clear_colour: wgpu::Color,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Scene Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear_colour),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
            view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    })
}

/// Issue the scene's draws and return how many were issued.
///
/// Nothing is drawn through a program that failed to link; the pass then only
/// clears.
pub fn draw_scene(render_pass: &mut wgpu::RenderPass<'_>, scene: &Scene<'_>) -> usize {
    let Some(pipeline) = scene.program.pipeline(scene.wireframe) else {
        return 0;
    };
    render_pass.set_pipeline(pipeline);
    render_pass.set_vertex_buffer(0, scene.vertex_buffer.slice(..));
    render_pass.set_index_buffer(scene.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

    for draw in &scene.draws {
        scene.vertex_array.bind(render_pass, &scene.uniform_offsets(draw));
        match draw {
            Draw::Arrays { vertices, .. } => render_pass.draw(vertices.clone(), 0..1),
            Draw::Elements { indices, .. } => render_pass.draw_indexed(indices.clone(), 0, 0..1),
        }
    }
    scene.draws.len()
}
