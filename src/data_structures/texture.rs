//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around a tracked GPU texture
//! with its view and optional sampler, plus helpers for depth buffers, image
//! uploads and the fallback used when an image cannot be loaded.

use crate::{
    context::Gpu,
    resources::{
        ledger::{ResourceKind, Tracked},
        texture::Pixels,
    },
};

/// Fixed wrap and filter modes of one texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampling {
    pub filter: wgpu::FilterMode,
    pub wrap: wgpu::AddressMode,
}

impl Sampling {
    pub const LINEAR_REPEAT: Sampling = Sampling {
        filter: wgpu::FilterMode::Linear,
        wrap: wgpu::AddressMode::Repeat,
    };

    pub const NEAREST_REPEAT: Sampling = Sampling {
        filter: wgpu::FilterMode::Nearest,
        wrap: wgpu::AddressMode::Repeat,
    };

    fn create_sampler(&self, device: &wgpu::Device, label: &str) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: self.wrap,
            address_mode_v: self.wrap,
            address_mode_w: self.wrap,
            mag_filter: self.filter,
            min_filter: self.filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    }
}

/// A GPU texture with a view and optional sampler.
///
/// The texture itself is [`Tracked`], so dropping a `Texture` destroys the
/// GPU memory and records the release.
#[derive(Debug)]
pub struct Texture {
    pub texture: Tracked<wgpu::Texture>,
    pub view: wgpu::TextureView,
    pub sampler: Option<Tracked<wgpu::Sampler>>,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// Uploaded image data is plain 8-bit RGBA without sRGB decoding.
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// `size` is [width, height] in pixels; zero dimensions are clamped to 1
    /// so a minimized window still gets a valid attachment.
    pub fn create_depth_texture(gpu: &Gpu, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture: gpu.ledger.track(ResourceKind::Texture, label, texture),
            view,
            sampler: None,
        }
    }

    /// Upload decoded pixels. The source buffer can be dropped right after.
    pub fn from_pixels(gpu: &Gpu, pixels: &Pixels, sampling: Sampling, label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: pixels.width,
            height: pixels.height,
            depth_or_array_layers: 1,
        };
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &pixels.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * pixels.width),
                rows_per_image: Some(pixels.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = sampling.create_sampler(&gpu.device, label);

        Self {
            texture: gpu.ledger.track(ResourceKind::Texture, label, texture),
            view,
            sampler: Some(gpu.ledger.track(ResourceKind::Sampler, label, sampler)),
        }
    }

    /// A 1x1 opaque white texture standing in for an image that failed to load.
    pub fn create_fallback(gpu: &Gpu, sampling: Sampling, label: &str) -> Self {
        let pixels = Pixels {
            width: 1,
            height: 1,
            data: vec![255, 255, 255, 255],
        };
        Self::from_pixels(gpu, &pixels, sampling, label)
    }
}
