/// A single cell of a two-level image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
    /// Ink / dark module
    Black,
    /// Paper / light module
    White,
}

impl Pixel {
    /// Raw cell value used in pixel buffers (1 = black, 0 = white)
    pub fn to_bit(self) -> u8 {
        match self {
            Pixel::Black => 1,
            Pixel::White => 0,
        }
    }

    /// Inverse of [`Pixel::to_bit`]; any non-zero value is black
    pub fn from_bit(bit: u8) -> Self {
        if bit != 0 { Pixel::Black } else { Pixel::White }
    }

    /// True for [`Pixel::Black`]
    pub fn is_black(self) -> bool {
        self == Pixel::Black
    }
}

impl From<bool> for Pixel {
    fn from(is_black: bool) -> Self {
        if is_black { Pixel::Black } else { Pixel::White }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_conversion() {
        assert_eq!(Pixel::Black.to_bit(), 1);
        assert_eq!(Pixel::White.to_bit(), 0);
        assert_eq!(Pixel::from_bit(1), Pixel::Black);
        assert_eq!(Pixel::from_bit(0), Pixel::White);
        assert_eq!(Pixel::from(true), Pixel::Black);
    }
}
