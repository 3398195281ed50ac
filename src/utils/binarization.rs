//! Collapse arbitrary-depth images to strict black/white.

use super::grayscale::{PixelFormat, to_luminance};
use crate::error::Result;
use crate::models::BinaryImage;

/// How the black/white cutoff is chosen; a pixel is black iff luminance < cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Threshold {
    /// The process default (`VCS_THRESHOLD`, normally 128)
    #[default]
    Default,
    /// A fixed cutoff
    Fixed(u8),
    /// Rounded mean luminance of the image
    Mean,
    /// Otsu's between-class variance maximizer
    Otsu,
}

/// Binarize an interleaved pixel buffer
pub fn binarize(
    pixels: &[u8],
    width: usize,
    height: usize,
    format: PixelFormat,
    threshold: Threshold,
) -> Result<BinaryImage> {
    let gray = to_luminance(pixels, width, height, format)?;
    Ok(apply_threshold(&gray, width, height, threshold))
}

/// Binarize a one-byte-per-pixel luminance buffer
pub fn binarize_luma(
    gray: &[u8],
    width: usize,
    height: usize,
    threshold: Threshold,
) -> Result<BinaryImage> {
    let gray = to_luminance(gray, width, height, PixelFormat::Luma)?;
    Ok(apply_threshold(&gray, width, height, threshold))
}

fn apply_threshold(gray: &[u8], width: usize, height: usize, threshold: Threshold) -> BinaryImage {
    let cutoff = resolve_threshold(gray, threshold);
    let data = gray.iter().map(|&v| (v < cutoff) as u8).collect();
    BinaryImage::from_parts(width, height, data)
}

/// The concrete cutoff `threshold` selects for `gray`
pub fn resolve_threshold(gray: &[u8], threshold: Threshold) -> u8 {
    match threshold {
        Threshold::Default => crate::config::default_threshold(),
        Threshold::Fixed(t) => t,
        Threshold::Mean => mean_threshold(gray),
        Threshold::Otsu => otsu_threshold(gray),
    }
}

fn mean_threshold(gray: &[u8]) -> u8 {
    if gray.is_empty() {
        return crate::config::DEFAULT_THRESHOLD;
    }
    let sum: u64 = gray.iter().map(|&v| v as u64).sum();
    let n = gray.len() as u64;
    ((sum + n / 2) / n) as u8
}

/// Otsu's optimal cutoff, computed from running class sums in one pass
fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &v in gray {
        histogram[v as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut below_count = 0f64;
    let mut below_sum = 0f64;
    let mut best_variance = 0f64;
    let mut best = None;

    // Candidate cutoff t puts intensities < t in the dark class
    for t in 1..256usize {
        below_count += histogram[t - 1] as f64;
        below_sum += (t - 1) as f64 * histogram[t - 1] as f64;
        let above_count = total - below_count;
        if below_count == 0.0 || above_count == 0.0 {
            continue;
        }
        let mean_below = below_sum / below_count;
        let mean_above = (total_sum - below_sum) / above_count;
        let variance = below_count * above_count * (mean_below - mean_above).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best = Some(t as u8);
        }
    }

    best.unwrap_or(crate::config::DEFAULT_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VcsError;

    #[test]
    fn test_fixed_threshold() {
        let gray = vec![100, 150, 200, 50]; // 2x2 image
        let binary = binarize_luma(&gray, 2, 2, Threshold::Fixed(128)).unwrap();

        // Pixels < 128 should be black
        assert!(binary.is_black(0, 0)); // 100 < 128
        assert!(!binary.is_black(1, 0)); // 150 >= 128
        assert!(!binary.is_black(0, 1)); // 200 >= 128
        assert!(binary.is_black(1, 1)); // 50 < 128
    }

    #[test]
    fn test_otsu_separates_two_classes() {
        let mut gray = vec![50u8; 50]; // Dark class
        gray.extend(vec![200u8; 50]); // Light class

        let cutoff = resolve_threshold(&gray, Threshold::Otsu);
        assert!(cutoff > 50 && cutoff <= 200);

        let binary = binarize_luma(&gray, 10, 10, Threshold::Otsu).unwrap();
        assert!(binary.is_black(0, 0)); // Dark
        assert!(!binary.is_black(0, 7)); // Light
        assert_eq!(binary.count_black(), 50);
    }

    #[test]
    fn test_mean_threshold() {
        let gray = vec![10, 10, 250, 250];
        assert_eq!(resolve_threshold(&gray, Threshold::Mean), 130);
        let binary = binarize_luma(&gray, 4, 1, Threshold::Mean).unwrap();
        assert_eq!(binary.count_black(), 2);
    }

    #[test]
    fn test_uniform_image_is_deterministic() {
        let gray = vec![90u8; 16];
        let a = binarize_luma(&gray, 4, 4, Threshold::Otsu).unwrap();
        let b = binarize_luma(&gray, 4, 4, Threshold::Otsu).unwrap();
        assert_eq!(a, b);
        assert_eq!(resolve_threshold(&gray, Threshold::Otsu), 128);
    }

    #[test]
    fn test_rgb_input() {
        // black, white, dark red, light gray
        let rgb = vec![0, 0, 0, 255, 255, 255, 120, 0, 0, 220, 220, 220];
        let binary = binarize(&rgb, 2, 2, PixelFormat::Rgb, Threshold::Fixed(128)).unwrap();
        assert!(binary.is_black(0, 0));
        assert!(!binary.is_black(1, 0));
        assert!(binary.is_black(0, 1));
        assert!(!binary.is_black(1, 1));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            binarize(&[], 0, 0, PixelFormat::Rgb, Threshold::Default),
            Err(VcsError::InvalidImage(_))
        ));
        assert!(binarize_luma(&[1, 2, 3], 2, 2, Threshold::Mean).is_err());
    }
}
