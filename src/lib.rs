//! RustVCS - (2,2) visual cryptography for QR codes
//!
//! Splits a black/white secret image into two shares that each look like
//! uniform noise. Overlaying the shares (logical OR per sub-pixel) reveals
//! the secret: black pixels come back as solid 2×2 blocks, white pixels as
//! half-filled ones.
//!
//! ```
//! use rust_vcs::{BinaryImage, Pixel, ShareCodec};
//!
//! let secret = BinaryImage::from_rows(&[
//!     [Pixel::Black, Pixel::White],
//!     [Pixel::White, Pixel::Black],
//! ])?;
//! let codec = ShareCodec::new();
//! let pair = codec.split(&secret)?;
//! assert_eq!(codec.combine(&pair.first, &pair.second)?, secret);
//! # Ok::<(), rust_vcs::VcsError>(())
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Share codec (block patterns, encode, decode)
pub mod codec;
/// Process-wide configuration from environment variables
pub mod config;
mod debug;
/// Error type
pub mod error;
/// Core data structures (Pixel, BinaryImage, ShareImage)
pub mod models;
/// Raster I/O, QR rendering and share storage
pub mod tools;
/// Utility functions (grayscale, binarization)
pub mod utils;

pub use codec::{BlockPattern, PatternTable, Rendering};
pub use error::{Result, VcsError};
pub use models::{BinaryImage, Pixel, ShareImage, SharePair};
pub use utils::{PixelFormat, Threshold};

use rand::Rng;

/// Split `secret` into a matched share pair with the default pattern table
pub fn split(secret: &BinaryImage) -> Result<SharePair> {
    ShareCodec::new().split(secret)
}

/// Reconstruct the secret from a matched share pair
pub fn reconstruct(first: &ShareImage, second: &ShareImage) -> Result<BinaryImage> {
    codec::decode(first, second)
}

/// Codec with a fixed pattern table and rendering mode
///
/// Holds no mutable state; one instance can be shared across threads and
/// every [`ShareCodec::split`] call draws its own seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShareCodec {
    table: PatternTable,
    rendering: Rendering,
}

impl ShareCodec {
    /// Horizontal pattern table, high-contrast reconstruction
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific pattern table
    pub fn with_table(table: PatternTable) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    /// Change how [`ShareCodec::combine`] renders the overlay
    pub fn rendering(mut self, rendering: Rendering) -> Self {
        self.rendering = rendering;
        self
    }

    /// The pattern table in use
    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Split with a fresh seed from the thread-local generator
    pub fn split(&self, secret: &BinaryImage) -> Result<SharePair> {
        let seed = rand::thread_rng().r#gen::<u64>();
        codec::encode_seeded(secret, &self.table, seed)
    }

    /// Split reproducibly from `seed`
    pub fn split_seeded(&self, secret: &BinaryImage, seed: u64) -> Result<SharePair> {
        codec::encode_seeded(secret, &self.table, seed)
    }

    /// Split drawing coins from a caller-supplied generator
    pub fn split_with_rng<R: Rng + ?Sized>(
        &self,
        secret: &BinaryImage,
        rng: &mut R,
    ) -> Result<SharePair> {
        codec::encode(secret, &self.table, rng)
    }

    /// Stack two shares using this codec's rendering mode
    pub fn combine(&self, first: &ShareImage, second: &ShareImage) -> Result<BinaryImage> {
        codec::decode_with(first, second, self.rendering)
    }

    /// True if every block of `share` comes from this codec's table
    pub fn is_well_formed(&self, share: &ShareImage) -> bool {
        codec::is_well_formed(share, &self.table)
    }
}
