//! Hardcoded geometry uploaded once at start-up.

use std::fmt;

use super::vertex::{ColorVertex, TexturedVertex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    NoVertices,
    /// `indices[position]` points past the end of the vertex list.
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NoVertices => write!(f, "geometry has no vertices"),
            GeometryError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            } => write!(
                f,
                "index {} at position {} is out of range for {} vertices",
                index, position, vertex_count
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Vertices plus the element list that reuses them.
#[derive(Debug, Clone, Copy)]
pub struct Geometry<V: 'static> {
    pub vertices: &'static [V],
    pub indices: &'static [u32],
}

impl<V: bytemuck::Pod> Geometry<V> {
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.is_empty() {
            return Err(GeometryError::NoVertices);
        }
        let vertex_count = self.vertices.len();
        match self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertex_count)
        {
            Some((position, &index)) => Err(GeometryError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.indices)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// The first three are drawn as a raw vertex array, the last three through
/// the element list.
pub const TRIANGLE_VERTICES: [ColorVertex; 6] = [
    ColorVertex::new([0.0, 0.5], RED),
    ColorVertex::new([0.5, -0.5], GREEN),
    ColorVertex::new([-0.5, -0.5], [0.0, 0.3, 1.0, 1.0]),
    ColorVertex::new([0.0, 0.5], RED),
    ColorVertex::new([0.5, -0.5], GREEN),
    ColorVertex::new([-0.25, -0.5], [0.0, 0.0, 1.0, 1.0]),
];

pub const TRIANGLE_INDICES: [u32; 3] = [3, 4, 5];

pub const TRIANGLES: Geometry<ColorVertex> = Geometry {
    vertices: &TRIANGLE_VERTICES,
    indices: &TRIANGLE_INDICES,
};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Corners of a unit cube; texture coordinates use a bottom-left origin.
pub const CUBE_VERTICES: [TexturedVertex; 8] = [
    TexturedVertex::new([-0.5, -0.5, -0.5], WHITE, [0.0, 0.0]),
    TexturedVertex::new([-0.5, 0.5, -0.5], RED, [0.0, 1.0]),
    TexturedVertex::new([0.5, -0.5, -0.5], BLUE, [1.0, 0.0]),
    TexturedVertex::new([0.5, 0.5, -0.5], GREEN, [1.0, 1.0]),
    TexturedVertex::new([-0.5, -0.5, 0.5], WHITE, [0.0, 0.0]),
    TexturedVertex::new([-0.5, 0.5, 0.5], RED, [0.0, 1.0]),
    TexturedVertex::new([0.5, -0.5, 0.5], BLUE, [1.0, 0.0]),
    TexturedVertex::new([0.5, 0.5, 0.5], GREEN, [1.0, 1.0]),
];

/// One quad on the back face, drawn as a triangle strip.
pub const QUAD_STRIP_INDICES: [u32; 4] = [0, 1, 2, 3];

pub const TEXTURED_QUAD: Geometry<TexturedVertex> = Geometry {
    vertices: &CUBE_VERTICES,
    indices: &QUAD_STRIP_INDICES,
};
