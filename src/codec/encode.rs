//! Split a secret image into two shares.
//!
//! Each secret pixel draws one fair coin. The coin picks which table pattern
//! share A receives; share B receives the same pattern for a white pixel and
//! the complement for a black one. Share A alone is therefore a sequence of
//! independent fair coins, and so is share B, whatever the secret holds.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use super::patterns::{BLOCK_SIZE, PatternTable};
use crate::error::Result;
use crate::models::{BinaryImage, Pixel, ShareImage, SharePair};

/// Encode with an injected random source, one block row after another
pub fn encode<R: Rng + ?Sized>(
    secret: &BinaryImage,
    table: &PatternTable,
    rng: &mut R,
) -> Result<SharePair> {
    let (width, height) = secret.dimensions();
    let stride = width * BLOCK_SIZE * BLOCK_SIZE;
    let mut first = vec![0u8; stride * height];
    let mut second = vec![0u8; stride * height];

    for (by, (rows_a, rows_b)) in first
        .chunks_mut(stride)
        .zip(second.chunks_mut(stride))
        .enumerate()
    {
        fill_block_row(secret.row(by), table, || rng.r#gen(), rows_a, rows_b);
    }

    log_encode(width, height, "sequential");
    Ok(into_pair(width, height, first, second))
}

/// Reproducible encode: block row `r` draws from ChaCha20 stream `r` of `seed`
///
/// The per-row streams make the output independent of scheduling, so large
/// images are split row-parallel and still match a sequential run bit for bit.
pub fn encode_seeded(secret: &BinaryImage, table: &PatternTable, seed: u64) -> Result<SharePair> {
    let (width, height) = secret.dimensions();
    let stride = width * BLOCK_SIZE * BLOCK_SIZE;
    let mut first = vec![0u8; stride * height];
    let mut second = vec![0u8; stride * height];

    let encode_row = |by: usize, rows_a: &mut [u8], rows_b: &mut [u8]| {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(by as u64);
        fill_block_row(secret.row(by), table, || rng.r#gen(), rows_a, rows_b);
    };

    let parallel = width * height >= crate::config::parallel_min_pixels();
    if parallel {
        first
            .par_chunks_mut(stride)
            .zip(second.par_chunks_mut(stride))
            .enumerate()
            .for_each(|(by, (rows_a, rows_b))| encode_row(by, rows_a, rows_b));
    } else {
        for (by, (rows_a, rows_b)) in first
            .chunks_mut(stride)
            .zip(second.chunks_mut(stride))
            .enumerate()
        {
            encode_row(by, rows_a, rows_b);
        }
    }

    log_encode(width, height, if parallel { "parallel" } else { "seeded" });
    Ok(into_pair(width, height, first, second))
}

/// Write one row of secret pixels as two sub-pixel rows in each share
fn fill_block_row<F: FnMut() -> bool>(
    secret_row: &[u8],
    table: &PatternTable,
    mut coin: F,
    rows_a: &mut [u8],
    rows_b: &mut [u8],
) {
    let share_width = secret_row.len() * BLOCK_SIZE;
    for (bx, &bit) in secret_row.iter().enumerate() {
        let (pa, pb) = table.assign(Pixel::from_bit(bit), coin());
        for dy in 0..BLOCK_SIZE {
            for dx in 0..BLOCK_SIZE {
                let idx = dy * share_width + bx * BLOCK_SIZE + dx;
                rows_a[idx] = pa.cell(dx, dy) as u8;
                rows_b[idx] = pb.cell(dx, dy) as u8;
            }
        }
    }
}

fn into_pair(width: usize, height: usize, first: Vec<u8>, second: Vec<u8>) -> SharePair {
    let (sw, sh) = (width * BLOCK_SIZE, height * BLOCK_SIZE);
    SharePair {
        first: ShareImage::from_image_unchecked(BinaryImage::from_parts(sw, sh, first)),
        second: ShareImage::from_image_unchecked(BinaryImage::from_parts(sw, sh, second)),
    }
}

fn log_encode(width: usize, height: usize, mode: &str) {
    if cfg!(debug_assertions) && crate::debug::debug_enabled() {
        eprintln!(
            "ENCODE: {}x{} secret -> two {}x{} shares ({})",
            width,
            height,
            width * BLOCK_SIZE,
            height * BLOCK_SIZE,
            mode
        );
    }
}
