//! Error type shared by the codec, the binarizer and the I/O tools.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while binarizing, splitting, stacking or persisting images.
#[derive(Error, Debug)]
pub enum VcsError {
    /// Zero dimension, truncated pixel buffer or non-binary cell values.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The two shares handed to decode are not the same size.
    #[error("share dimensions differ: {}x{} vs {}x{}", first.0, first.1, second.0, second.1)]
    DimensionMismatch {
        /// Width and height of the first share.
        first: (usize, usize),
        /// Width and height of the second share.
        second: (usize, usize),
    },

    /// A share dimension is zero or not a multiple of the block size.
    #[error("share dimensions {width}x{height} are not positive multiples of 2")]
    InvalidShareDimensions {
        /// Offending width.
        width: usize,
        /// Offending height.
        height: usize,
    },

    /// A custom block pattern table does not form a valid (2,2) scheme.
    #[error("invalid pattern table: {0}")]
    InvalidPatternTable(&'static str),

    /// Filesystem failure from a storage collaborator.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster decode/encode failure from the image crate.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Shares must round-trip losslessly; this format would not.
    #[error("refusing to write share in a lossy format: {}", .0.display())]
    LossyFormat(PathBuf),

    /// The QR symbol encoder rejected the payload.
    #[error("QR encoding failed: {0}")]
    QrEncode(String),

    /// Store keys must be plain file-name fragments.
    #[error("invalid record id: {0:?}")]
    InvalidRecordId(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, VcsError>;
