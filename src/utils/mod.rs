//! Image normalization helpers
//!
//! - Grayscale conversion (luma/RGB/RGBA, alpha over white)
//! - Binarization (fixed, mean and Otsu cutoffs)

pub mod binarization;
pub mod grayscale;

pub use binarization::{Threshold, binarize, binarize_luma};
pub use grayscale::PixelFormat;
