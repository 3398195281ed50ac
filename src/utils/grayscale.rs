//! Convert raw pixel buffers to 8-bit luminance
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
//!
//! Alpha is composited onto a white background, so transparent regions of a
//! rendered QR code read as light modules.

use rayon::prelude::*;

use crate::error::{Result, VcsError};

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Layout of an interleaved 8-bit pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 1 byte per pixel
    Luma,
    /// 2 bytes per pixel: luma, alpha
    LumaAlpha,
    /// 3 bytes per pixel
    Rgb,
    /// 4 bytes per pixel
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Luma => 1,
            PixelFormat::LumaAlpha => 2,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Convert `pixels` to one luminance byte per pixel
///
/// Fails with `InvalidImage` on a zero dimension, a size that overflows
/// `usize`, or a buffer whose length does not match
/// `width * height * channels`.
pub fn to_luminance(
    pixels: &[u8],
    width: usize,
    height: usize,
    format: PixelFormat,
) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(VcsError::InvalidImage(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    let channels = format.channels();
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            VcsError::InvalidImage(format!("{width}x{height} {format:?} overflows a buffer"))
        })?;
    if pixels.len() != expected {
        return Err(VcsError::InvalidImage(format!(
            "expected {expected} bytes for {width}x{height} {format:?}, got {}",
            pixels.len()
        )));
    }

    if format == PixelFormat::Luma {
        return Ok(pixels.to_vec());
    }

    let mut gray = vec![0u8; width * height];
    if width * height >= crate::config::parallel_min_pixels() {
        // Rows in parallel
        gray.par_chunks_mut(width)
            .zip(pixels.par_chunks(width * channels))
            .for_each(|(out, src)| convert_row(src, out, format));
    } else {
        convert_row(pixels, &mut gray, format);
    }
    Ok(gray)
}

fn convert_row(src: &[u8], out: &mut [u8], format: PixelFormat) {
    let channels = format.channels();
    for (dst, px) in out.iter_mut().zip(src.chunks_exact(channels)) {
        *dst = match format {
            PixelFormat::Luma => px[0],
            PixelFormat::LumaAlpha => over_white(px[0], px[1]),
            PixelFormat::Rgb => luma(px[0], px[1], px[2]),
            PixelFormat::Rgba => over_white(luma(px[0], px[1], px[2]), px[3]),
        };
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8;
    lum.min(255) as u8
}

#[inline]
fn over_white(value: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((value as u32 * a + 255 * (255 - a) + 127) / 255) as u8
}
