//! Captured frames and their PNG encoding.

use crate::error::{Error, Result};
use image::ImageEncoder;
use image::codecs::png::PngEncoder;

/// A raw RGBA raster as produced by a platform capture call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, top row first.
    pub rgba: Vec<u8>,
}

impl Frame {
    /// Wrap an RGBA buffer, checking that it matches the dimensions.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::CaptureFailed(format!(
                "captured an empty {}x{} image",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Error::CaptureFailed(format!(
                "pixel buffer holds {} bytes, expected {} for {}x{}",
                rgba.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Build a frame from BGRA rows that may carry padding (`stride` bytes per
    /// row). Alpha is forced opaque since desktop captures leave it undefined.
    pub fn from_bgra(width: u32, height: u32, stride: usize, bgra: &[u8]) -> Result<Self> {
        let row_len = width as usize * 4;
        if stride < row_len || bgra.len() < stride * (height as usize).saturating_sub(1) + row_len {
            return Err(Error::CaptureFailed(format!(
                "pixel buffer too small for {}x{} (stride {}, {} bytes)",
                width,
                height,
                stride,
                bgra.len()
            )));
        }

        let mut rgba = Vec::with_capacity(row_len * height as usize);
        for row in bgra.chunks(stride).take(height as usize) {
            for px in row[..row_len].chunks_exact(4) {
                rgba.extend_from_slice(&[px[2], px[1], px[0], 0xFF]);
            }
        }
        Self::from_rgba(width, height, rgba)
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(
                &self.rgba,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| Error::EncodingFailed(format!("failed to encode PNG: {}", e)))?;
        Ok(buffer)
    }
}
