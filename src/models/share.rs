use super::BinaryImage;
use crate::codec::patterns::{BLOCK_SIZE, BlockPattern};
use crate::error::{Result, VcsError};

/// One half of a split secret: a binary image made of 2×2 sub-pixel blocks
///
/// Both dimensions are positive multiples of [`BLOCK_SIZE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareImage {
    image: BinaryImage,
}

impl ShareImage {
    /// Share width in sub-pixels
    pub fn width(&self) -> usize {
        self.image.width()
    }

    /// Share height in sub-pixels
    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// (width, height) in sub-pixels
    pub fn dimensions(&self) -> (usize, usize) {
        self.image.dimensions()
    }

    /// Number of block columns (secret width)
    pub fn blocks_wide(&self) -> usize {
        self.image.width() / BLOCK_SIZE
    }

    /// Number of block rows (secret height)
    pub fn blocks_tall(&self) -> usize {
        self.image.height() / BLOCK_SIZE
    }

    /// The 2×2 pattern at block position (bx, by)
    pub fn block(&self, bx: usize, by: usize) -> BlockPattern {
        let x = bx * BLOCK_SIZE;
        let y = by * BLOCK_SIZE;
        BlockPattern::from_cells([
            [self.image.is_black(x, y), self.image.is_black(x + 1, y)],
            [self.image.is_black(x, y + 1), self.image.is_black(x + 1, y + 1)],
        ])
    }

    /// Borrow the underlying pixel grid
    pub fn as_image(&self) -> &BinaryImage {
        &self.image
    }

    /// Take the underlying pixel grid
    pub fn into_image(self) -> BinaryImage {
        self.image
    }

    pub(crate) fn from_image_unchecked(image: BinaryImage) -> Self {
        debug_assert!(image.width() % BLOCK_SIZE == 0 && image.height() % BLOCK_SIZE == 0);
        Self { image }
    }
}

impl TryFrom<BinaryImage> for ShareImage {
    type Error = VcsError;

    fn try_from(image: BinaryImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width % BLOCK_SIZE != 0 || height % BLOCK_SIZE != 0 {
            return Err(VcsError::InvalidShareDimensions { width, height });
        }
        Ok(Self { image })
    }
}

/// The two shares produced by a single encode call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePair {
    /// Share A
    pub first: ShareImage,
    /// Share B
    pub second: ShareImage,
}

impl SharePair {
    /// Split into (share A, share B)
    pub fn into_parts(self) -> (ShareImage, ShareImage) {
        (self.first, self.second)
    }
}
