//! Recombine two shares by stacking them (cell-wise OR).

use rayon::prelude::*;

use super::patterns::PatternTable;
use crate::error::{Result, VcsError};
use crate::models::{BinaryImage, Pixel, ShareImage};

/// How a stacked pair is turned into an output image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rendering {
    /// One pixel per block: solid black block → black, anything lighter → white.
    /// Output has the secret's dimensions.
    #[default]
    HighContrast,
    /// The raw overlay at share resolution; white pixels show as 50% gray
    /// blocks, exactly like two stacked transparencies.
    Stacked,
}

/// Reconstruct the secret from a matched pair ([`Rendering::HighContrast`])
///
/// Fails with `DimensionMismatch` when the shares differ in size. Odd or
/// zero share dimensions are rejected earlier, with `InvalidShareDimensions`,
/// when the [`ShareImage`] is built.
pub fn decode(first: &ShareImage, second: &ShareImage) -> Result<BinaryImage> {
    decode_with(first, second, Rendering::HighContrast)
}

/// Reconstruct with an explicit rendering mode
pub fn decode_with(
    first: &ShareImage,
    second: &ShareImage,
    rendering: Rendering,
) -> Result<BinaryImage> {
    check_pair(first, second)?;

    let image = match rendering {
        Rendering::HighContrast => collapse(first, second),
        Rendering::Stacked => overlay(first, second),
    };

    if cfg!(debug_assertions) && crate::debug::debug_enabled() {
        eprintln!(
            "DECODE: {}x{} shares -> {}x{} ({:?})",
            first.width(),
            first.height(),
            image.width(),
            image.height(),
            rendering
        );
    }

    Ok(image)
}

/// The raw OR overlay of two shares at share resolution
pub fn stack(first: &ShareImage, second: &ShareImage) -> Result<BinaryImage> {
    decode_with(first, second, Rendering::Stacked)
}

/// True if every block of `share` is one of the table's two patterns
pub fn is_well_formed(share: &ShareImage, table: &PatternTable) -> bool {
    (0..share.blocks_tall())
        .all(|by| (0..share.blocks_wide()).all(|bx| table.contains(share.block(bx, by))))
}

// `ShareImage` already guarantees positive, even dimensions
fn check_pair(first: &ShareImage, second: &ShareImage) -> Result<()> {
    if first.dimensions() != second.dimensions() {
        return Err(VcsError::DimensionMismatch {
            first: first.dimensions(),
            second: second.dimensions(),
        });
    }
    Ok(())
}

fn overlay(first: &ShareImage, second: &ShareImage) -> BinaryImage {
    let (width, height) = first.dimensions();
    let a = first.as_image().as_bytes();
    let b = second.as_image().as_bytes();

    let data: Vec<u8> = if use_parallel(first) {
        a.par_iter().zip(b.par_iter()).map(|(&x, &y)| x | y).collect()
    } else {
        a.iter().zip(b.iter()).map(|(&x, &y)| x | y).collect()
    };

    BinaryImage::from_parts(width, height, data)
}

fn collapse(first: &ShareImage, second: &ShareImage) -> BinaryImage {
    let (width, height) = (first.blocks_wide(), first.blocks_tall());
    let mut data = vec![0u8; width * height];

    let collapse_row = |by: usize, row: &mut [u8]| {
        for (bx, cell) in row.iter_mut().enumerate() {
            let stacked = first.block(bx, by).union(second.block(bx, by));
            *cell = Pixel::from(stacked.is_solid()).to_bit();
        }
    };

    if use_parallel(first) {
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(by, row)| collapse_row(by, row));
    } else {
        for (by, row) in data.chunks_mut(width).enumerate() {
            collapse_row(by, row);
        }
    }

    BinaryImage::from_parts(width, height, data)
}

fn use_parallel(share: &ShareImage) -> bool {
    share.blocks_wide() * share.blocks_tall() >= crate::config::parallel_min_pixels()
}
