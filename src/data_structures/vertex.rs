//! Interleaved vertex formats and their attribute layouts.
//!
//! A [`VertexLayout`] is derived from an ordered attribute list: each
//! attribute starts where the previous one ended and the stride is the sum of
//! all attribute sizes. The vertex structs below are `#[repr(C)]` with only
//! `f32` fields, so their memory layout is exactly that packing.

use std::fmt;

/// One named attribute of an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub format: wgpu::VertexFormat,
}

impl AttributeSpec {
    pub const fn new(name: &'static str, format: wgpu::VertexFormat) -> Self {
        Self { name, format }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The buffer length is not a whole number of vertices.
    Misaligned { byte_len: usize, stride: u64 },
    /// A vertex layout without attributes cannot describe a buffer.
    NoAttributes,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Misaligned { byte_len, stride } => write!(
                f,
                "vertex buffer of {} bytes is not a multiple of the {} byte stride",
                byte_len, stride
            ),
            LayoutError::NoAttributes => write!(f, "vertex layout has no attributes"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Attribute pointers for one interleaved vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexLayout {
    names: Vec<&'static str>,
    attributes: Vec<wgpu::VertexAttribute>,
    stride: wgpu::BufferAddress,
}

impl VertexLayout {
    /// Pack `specs` back to back; shader locations follow declaration order.
    pub fn interleaved(specs: &[AttributeSpec]) -> Self {
        let mut offset = 0;
        let mut attributes = Vec::with_capacity(specs.len());
        for (location, spec) in specs.iter().enumerate() {
            attributes.push(wgpu::VertexAttribute {
                format: spec.format,
                offset,
                shader_location: location as u32,
            });
            offset += spec.format.size();
        }
        Self {
            names: specs.iter().map(|s| s.name).collect(),
            attributes,
            stride: offset,
        }
    }

    pub fn stride(&self) -> wgpu::BufferAddress {
        self.stride
    }

    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&wgpu::VertexAttribute> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|i| &self.attributes[i])
    }

    pub fn offset_of(&self, name: &str) -> Option<wgpu::BufferAddress> {
        self.attribute(name).map(|a| a.offset)
    }

    /// Number of vertices in a buffer of `byte_len` bytes laid out this way.
    pub fn check_buffer(&self, byte_len: usize) -> Result<u32, LayoutError> {
        if self.stride == 0 {
            return Err(LayoutError::NoAttributes);
        }
        if byte_len as u64 % self.stride != 0 {
            return Err(LayoutError::Misaligned {
                byte_len,
                stride: self.stride,
            });
        }
        Ok((byte_len as u64 / self.stride) as u32)
    }

    pub fn desc(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

/// 2D position with an RGBA colour.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ColorVertex {
    pub const ATTRIBUTES: [AttributeSpec; 2] = [
        AttributeSpec::new("position", wgpu::VertexFormat::Float32x2),
        AttributeSpec::new("color", wgpu::VertexFormat::Float32x4),
    ];

    pub const fn new(position: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    pub fn layout() -> VertexLayout {
        VertexLayout::interleaved(&Self::ATTRIBUTES)
    }
}

/// 3D position, RGBA colour and texture coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub tex_coords: [f32; 2],
}

impl TexturedVertex {
    pub const ATTRIBUTES: [AttributeSpec; 3] = [
        AttributeSpec::new("position", wgpu::VertexFormat::Float32x3),
        AttributeSpec::new("color", wgpu::VertexFormat::Float32x4),
        AttributeSpec::new("texcoord", wgpu::VertexFormat::Float32x2),
    ];

    pub const fn new(position: [f32; 3], color: [f32; 4], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            color,
            tex_coords,
        }
    }

    pub fn layout() -> VertexLayout {
        VertexLayout::interleaved(&Self::ATTRIBUTES)
    }
}
