//! Raster I/O and storage around the codec
//!
//! The codec itself only sees in-memory pixel grids; everything that touches
//! files, PNG bytes or QR symbol rendering lives here.

pub mod qr;
pub mod store;

pub use qr::{QrOptions, render_qr};
pub use store::ShareStore;

use crate::error::{Result, VcsError};
use crate::models::{BinaryImage, ShareImage};
use crate::utils::binarization::{Threshold, binarize};
use crate::utils::grayscale::PixelFormat;
use image::{DynamicImage, GrayImage, ImageFormat, ImageOutputFormat, Luma};
use std::io::Cursor;
use std::path::Path;

/// Load any raster the `image` crate understands and binarize it
pub fn load_binary<P: AsRef<Path>>(path: P, threshold: Threshold) -> Result<BinaryImage> {
    let img = image::open(path)?;
    from_dynamic(&img, threshold)
}

/// Binarize an already decoded image
pub fn from_dynamic(img: &DynamicImage, threshold: Threshold) -> Result<BinaryImage> {
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    binarize(rgba.as_raw(), width, height, PixelFormat::Rgba, threshold)
}

/// Load a share written by [`save_binary`]
///
/// Shares are pure black/white, so the fixed mid-gray cutoff reads them back
/// exactly.
pub fn load_share<P: AsRef<Path>>(path: P) -> Result<ShareImage> {
    ShareImage::try_from(load_binary(path, Threshold::Fixed(128))?)
}

/// Render as an 8-bit grayscale image (black = 0, white = 255)
pub fn to_gray_image(image: &BinaryImage) -> Result<GrayImage> {
    let width = u32::try_from(image.width())
        .map_err(|_| VcsError::InvalidImage("width exceeds u32".into()))?;
    let height = u32::try_from(image.height())
        .map_err(|_| VcsError::InvalidImage("height exceeds u32".into()))?;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        if image.is_black(x as usize, y as usize) {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    }))
}

/// Write to `path`; the extension must name a lossless format
pub fn save_binary<P: AsRef<Path>>(image: &BinaryImage, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    if !is_lossless(format) {
        return Err(VcsError::LossyFormat(path.to_path_buf()));
    }
    to_gray_image(image)?.save_with_format(path, format)?;

    if cfg!(debug_assertions) && crate::debug::debug_enabled() {
        eprintln!(
            "SAVE: {}x{} -> {}",
            image.width(),
            image.height(),
            path.display()
        );
    }
    Ok(())
}

/// PNG bytes, e.g. for an HTTP response body
pub fn encode_png(image: &BinaryImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(to_gray_image(image)?)
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)?;
    Ok(buf)
}

/// Decode PNG (or any supported raster) bytes into a share
pub fn decode_share_bytes(bytes: &[u8]) -> Result<ShareImage> {
    let img = image::load_from_memory(bytes)?;
    ShareImage::try_from(from_dynamic(&img, Threshold::Fixed(128))?)
}

fn is_lossless(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff | ImageFormat::Pnm
    )
}

/// Summary statistics for a binary image.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of black pixels.
    pub black_pixels: usize,
    /// Total pixels in the image.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute black pixel stats for a binary image.
pub fn binary_stats(image: &BinaryImage) -> BinaryStats {
    let black = image.count_black();
    let total = image.width() * image.height();
    BinaryStats {
        black_pixels: black,
        total_pixels: total,
        black_ratio: black as f64 / total as f64,
    }
}
