//! The two demo programs.

pub mod textured;
pub mod triangles;

use anyhow::{Context as _, ensure};

use crate::{
    context::Gpu,
    data_structures::{geometry::Geometry, vertex::VertexLayout},
    resources::{create_buffer_init, ledger::Tracked},
};

pub use textured::Textured;
pub use triangles::Triangles;

/// Vertex and element buffers of one demo.
#[derive(Debug)]
pub struct GeometryBuffers {
    pub vertex: Tracked<wgpu::Buffer>,
    pub index: Tracked<wgpu::Buffer>,
}

/// Check `geometry` against `layout` and upload it.
///
/// Fails when an index points past the vertices or when the vertex bytes do
/// not split into whole vertices of the layout's stride.
pub fn upload_geometry<V: bytemuck::Pod>(
    gpu: &Gpu,
    name: &str,
    geometry: &Geometry<V>,
    layout: &VertexLayout,
) -> anyhow::Result<GeometryBuffers> {
    geometry
        .validate()
        .with_context(|| format!("{} element buffer", name))?;
    let vertex_count = layout
        .check_buffer(geometry.vertex_bytes().len())
        .with_context(|| format!("{} vertex buffer", name))?;
    ensure!(
        vertex_count == geometry.vertex_count(),
        "{} vertex layout describes {} vertices, geometry has {}",
        name,
        vertex_count,
        geometry.vertex_count()
    );

    Ok(GeometryBuffers {
        vertex: create_buffer_init(
            gpu,
            &format!("{} vertex buffer", name),
            geometry.vertex_bytes(),
            wgpu::BufferUsages::VERTEX,
        ),
        index: create_buffer_init(
            gpu,
            &format!("{} element buffer", name),
            geometry.index_bytes(),
            wgpu::BufferUsages::INDEX,
        ),
    })
}
