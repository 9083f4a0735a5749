use std::path::Path;

use anyhow::{Context as _, bail};

use crate::{
    context::Gpu,
    data_structures::texture::{Sampling, Texture},
};

/// Decoded RGBA8 pixels with the bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Pixels {
    /// The four channels of pixel (x, y), where y = 0 is the bottom row.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = ((y * self.width + x) * 4) as usize;
        let mut px = [0; 4];
        px.copy_from_slice(&self.data[start..start + 4]);
        Some(px)
    }
}

/// Decode image file contents into bottom-to-top RGBA8 rows.
///
/// Decoders hand out rows top-first, while the demos' texture coordinates
/// put v = 0 at the bottom of the image, so the rows are reversed here.
pub fn decode_flipped(bytes: &[u8]) -> anyhow::Result<Pixels> {
    let img = image::load_from_memory(bytes)?;
    let mut rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        bail!("image has no pixels ({}x{})", width, height);
    }
    image::imageops::flip_vertical_in_place(&mut rgba);
    Ok(Pixels {
        width,
        height,
        data: rgba.into_raw(),
    })
}

pub fn load_image(path: &Path) -> anyhow::Result<Pixels> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    decode_flipped(&bytes).with_context(|| format!("decoding {}", path.display()))
}

/// Reject images the device cannot hold in a single 2D texture.
pub fn check_dimensions(pixels: Pixels, max_dimension: u32) -> anyhow::Result<Pixels> {
    if pixels.width > max_dimension || pixels.height > max_dimension {
        bail!(
            "image is {}x{}, the device allows at most {} per side",
            pixels.width,
            pixels.height,
            max_dimension
        );
    }
    Ok(pixels)
}

/// Load `path` into a texture, or substitute a 1x1 white texture.
///
/// A missing, broken or oversized image is not fatal: the failure is logged
/// and the demo renders with the fallback.
pub fn load_texture_or_fallback(gpu: &Gpu, path: &Path, sampling: Sampling) -> Texture {
    let label = path.display().to_string();
    let max_dimension = gpu.device.limits().max_texture_dimension_2d;
    match load_image(path).and_then(|pixels| check_dimensions(pixels, max_dimension)) {
        Ok(pixels) => {
            log::debug!(
                "Loaded image {} ({}x{})",
                label,
                pixels.width,
                pixels.height
            );
            Texture::from_pixels(gpu, &pixels, sampling, &label)
        }
        Err(e) => {
            log::error!("Error loading image {}: {:#}", label, e);
            Texture::create_fallback(gpu, sampling, &format!("{} (fallback)", label))
        }
    }
}
