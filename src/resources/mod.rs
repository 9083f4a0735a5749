/**
 * This module contains all logic for creating, loading and releasing GPU
 * resources: scoped ownership (`ledger`), shader compilation (`shader`) and
 * image loading (`texture`).
 */
pub mod ledger;
pub mod shader;
pub mod texture;

use wgpu::util::DeviceExt;

use crate::{
    context::Gpu,
    resources::ledger::{ResourceKind, Tracked},
};

/// Create a buffer initialised with `contents` and register it with the ledger.
pub fn create_buffer_init(
    gpu: &Gpu,
    label: &str,
    contents: &[u8],
    usage: wgpu::BufferUsages,
) -> Tracked<wgpu::Buffer> {
    let buffer = gpu
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        });
    gpu.ledger.track(ResourceKind::Buffer, label, buffer)
}

/// Create an uninitialised buffer of `size` bytes and register it with the ledger.
pub fn create_buffer(
    gpu: &Gpu,
    label: &str,
    size: wgpu::BufferAddress,
    usage: wgpu::BufferUsages,
) -> Tracked<wgpu::Buffer> {
    let buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage,
        mapped_at_creation: false,
    });
    gpu.ledger.track(ResourceKind::Buffer, label, buffer)
}
