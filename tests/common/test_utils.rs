use std::{io::Cursor, path::PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

/// Encode an RGBA image whose rows are given top to bottom.
pub fn png_bytes(rows: &[&[[u8; 4]]]) -> Vec<u8> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let mut img = RgbaImage::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, px) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, Rgba(*px));
        }
    }
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .expect("Failed to encode test image");
    bytes.into_inner()
}

/// A fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spin-demos-{}-{}", name, std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("Failed to clear scratch dir");
    }
    std::fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {} but got {}",
        expected,
        actual
    );
}

#[cfg(feature = "integration-tests")]
pub fn headless_gpu() -> spin_demos::context::Gpu {
    spin_demos::context::Gpu::headless().expect("No GPU adapter available for integration test")
}

#[cfg(feature = "integration-tests")]
pub fn offscreen_target(depth: bool) -> spin_demos::context::RenderTarget {
    spin_demos::context::RenderTarget {
        format: wgpu::TextureFormat::Rgba8Unorm,
        depth_format: depth.then_some(spin_demos::data_structures::texture::Texture::DEPTH_FORMAT),
        width: 64,
        height: 48,
    }
}
