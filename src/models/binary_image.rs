use super::Pixel;
use crate::error::{Result, VcsError};

/// Two-level pixel grid, row-major, one byte per cell (1 = black, 0 = white)
///
/// Dimensions are always non-zero. The grid is immutable through the public
/// API; only the codec and binarizer fill cells while building a new image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BinaryImage {
    /// All-white image of the given size
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; width * height],
        })
    }

    /// Build from a raw 0/1 buffer of exactly `width * height` bytes
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        if data.len() != width * height {
            return Err(VcsError::InvalidImage(format!(
                "expected {} cells for {}x{}, got {}",
                width * height,
                width,
                height,
                data.len()
            )));
        }
        if let Some(bad) = data.iter().find(|&&v| v > 1) {
            return Err(VcsError::InvalidImage(format!(
                "cell value {bad} is neither 0 nor 1"
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from rows of pixels; every row must have the same length
    pub fn from_rows<R: AsRef<[Pixel]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        check_dimensions(width, height)?;

        let mut data = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(VcsError::InvalidImage(format!(
                    "row {y} has {} pixels, expected {width}",
                    row.len()
                )));
            }
            data.extend(row.iter().map(|p| p.to_bit()));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build by evaluating `f(x, y)` for every cell
    pub fn from_fn<F: FnMut(usize, usize) -> Pixel>(
        width: usize,
        height: usize,
        mut f: F,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y).to_bit());
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height
    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Pixel at (x, y), or `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Pixel::from_bit(self.data[y * self.width + x]))
    }

    /// True if (x, y) is black; out-of-bounds reads as white
    pub fn is_black(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(Pixel::is_black)
    }

    /// One row of raw cells
    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Raw row-major cells
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of black cells
    pub fn count_black(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    /// Rows as pixel vectors (handy for comparisons in tests and tools)
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        self.data
            .chunks(self.width)
            .map(|row| row.iter().map(|&v| Pixel::from_bit(v)).collect())
            .collect()
    }

    /// Wrap a buffer the caller has already validated
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(VcsError::InvalidImage(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    if width.checked_mul(height).is_none() {
        return Err(VcsError::InvalidImage(format!(
            "{width}x{height} overflows a buffer"
        )));
    }
    Ok(())
}
