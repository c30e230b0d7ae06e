//! Uncompressed 24-bit Truevision TGA output.

use std::fs;
use std::path::Path;

use crate::error::{RenderError, Result};
use crate::render::PixelBuffer;

const HEADER_LEN: usize = 18;
const IMAGE_TYPE_TRUECOLOR: u8 = 2;
const BITS_PER_PIXEL: u8 = 24;

/// Encode `buffer` as TGA bytes: an 18-byte header, then rows from the
/// bottom up with each pixel as blue, green, red.
///
/// The header's X/Y origin fields carry the width and height, as readers of
/// earlier renders expect.
pub fn encode_tga(buffer: &PixelBuffer) -> Vec<u8> {
    let (width, height) = (buffer.width(), buffer.height());
    let mut bytes = vec![0u8; HEADER_LEN];
    bytes.reserve(width * height * 3);

    let w = (width as u16).to_le_bytes();
    let h = (height as u16).to_le_bytes();

    bytes[2] = IMAGE_TYPE_TRUECOLOR;
    bytes[8..10].copy_from_slice(&w);
    bytes[10..12].copy_from_slice(&h);
    bytes[12..14].copy_from_slice(&w);
    bytes[14..16].copy_from_slice(&h);
    bytes[16] = BITS_PER_PIXEL;
    bytes[17] = 0;

    for y in 0..height {
        for x in 0..width {
            let pixel = buffer.get(x, y);
            bytes.extend_from_slice(&[channel(pixel.z), channel(pixel.y), channel(pixel.x)]);
        }
    }

    return bytes;
}

pub fn write_tga(path: impl AsRef<Path>, buffer: &PixelBuffer) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_tga(buffer);
    fs::write(path, &bytes).map_err(|source| RenderError::Export { path: path.to_path_buf(), source })?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    return Ok(());
}

fn channel(value: f32) -> u8 {
    return (255.0 * value.clamp(0.0, 1.0)).round() as u8;
}
