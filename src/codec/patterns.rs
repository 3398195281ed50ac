//! Sub-pixel block patterns and the pattern table that defines the scheme.
//!
//! Every secret pixel becomes a 2×2 block in each share. A table holds two
//! complementary half-black patterns; a white pixel gives both shares the
//! same pattern (stacked: half black), a black pixel gives them complementary
//! patterns (stacked: solid black). Which of the two patterns lands in share
//! A is a fair coin, so either share on its own is uniform noise.

use crate::error::{Result, VcsError};
use crate::models::Pixel;

/// Side length of a sub-pixel block (block expansion factor)
pub const BLOCK_SIZE: usize = 2;

/// A 2×2 sub-pixel mask; bit `dy * 2 + dx` is set when that cell is black
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPattern(u8);

impl BlockPattern {
    /// No black cells
    pub const EMPTY: Self = Self(0b0000);
    /// All four cells black
    pub const SOLID: Self = Self(0b1111);
    /// Top row black
    pub const TOP: Self = Self(0b0011);
    /// Bottom row black
    pub const BOTTOM: Self = Self(0b1100);
    /// Left column black
    pub const LEFT: Self = Self(0b0101);
    /// Right column black
    pub const RIGHT: Self = Self(0b1010);
    /// Top-left and bottom-right black
    pub const DIAGONAL: Self = Self(0b1001);
    /// Top-right and bottom-left black
    pub const ANTI_DIAGONAL: Self = Self(0b0110);

    /// Build from `cells[dy][dx]` (true = black)
    pub fn from_cells(cells: [[bool; 2]; 2]) -> Self {
        let mut bits = 0u8;
        for (dy, row) in cells.iter().enumerate() {
            for (dx, &black) in row.iter().enumerate() {
                if black {
                    bits |= 1 << (dy * BLOCK_SIZE + dx);
                }
            }
        }
        Self(bits)
    }

    /// Raw 4-bit mask
    pub fn bits(self) -> u8 {
        self.0
    }

    /// True if cell (dx, dy) is black
    pub fn cell(self, dx: usize, dy: usize) -> bool {
        debug_assert!(dx < BLOCK_SIZE && dy < BLOCK_SIZE);
        (self.0 >> (dy * BLOCK_SIZE + dx)) & 1 == 1
    }

    /// Number of black cells (0..=4)
    pub fn black_cells(self) -> u32 {
        self.0.count_ones()
    }

    /// Swap black and white in every cell
    pub fn complement(self) -> Self {
        Self(!self.0 & Self::SOLID.0)
    }

    /// Cell-wise OR: what two transparencies look like stacked
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True if all four cells are black
    pub fn is_solid(self) -> bool {
        self == Self::SOLID
    }
}

/// The two complementary patterns a share block may take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternTable {
    primary: BlockPattern,
    secondary: BlockPattern,
}

impl PatternTable {
    /// Validate a custom pair: each half black, and each the other's complement
    pub fn new(primary: BlockPattern, secondary: BlockPattern) -> Result<Self> {
        if primary.black_cells() != 2 || secondary.black_cells() != 2 {
            return Err(VcsError::InvalidPatternTable(
                "patterns must have exactly two black cells",
            ));
        }
        if secondary != primary.complement() {
            return Err(VcsError::InvalidPatternTable(
                "patterns must be complements of each other",
            ));
        }
        Ok(Self { primary, secondary })
    }

    /// Top row / bottom row (default)
    pub const fn horizontal() -> Self {
        Self {
            primary: BlockPattern::TOP,
            secondary: BlockPattern::BOTTOM,
        }
    }

    /// Left column / right column
    pub const fn vertical() -> Self {
        Self {
            primary: BlockPattern::LEFT,
            secondary: BlockPattern::RIGHT,
        }
    }

    /// Main diagonal / anti-diagonal
    pub const fn diagonal() -> Self {
        Self {
            primary: BlockPattern::DIAGONAL,
            secondary: BlockPattern::ANTI_DIAGONAL,
        }
    }

    /// Pattern C1
    pub fn primary(&self) -> BlockPattern {
        self.primary
    }

    /// Pattern C2
    pub fn secondary(&self) -> BlockPattern {
        self.secondary
    }

    /// True if `pattern` is one of the table's two patterns
    pub fn contains(&self, pattern: BlockPattern) -> bool {
        pattern == self.primary || pattern == self.secondary
    }

    /// Blocks for (share A, share B) given the secret pixel and a fair coin
    pub fn assign(&self, pixel: Pixel, coin: bool) -> (BlockPattern, BlockPattern) {
        let first = if coin { self.primary } else { self.secondary };
        match pixel {
            Pixel::White => (first, first),
            Pixel::Black => (first, first.complement()),
        }
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::horizontal()
    }
}

impl std::str::FromStr for PatternTable {
    type Err = VcsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::horizontal()),
            "vertical" | "v" => Ok(Self::vertical()),
            "diagonal" | "d" => Ok(Self::diagonal()),
            _ => Err(VcsError::InvalidPatternTable(
                "expected horizontal, vertical or diagonal",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_and_bits() {
        let p = BlockPattern::from_cells([[true, false], [false, true]]);
        assert_eq!(p, BlockPattern::DIAGONAL);
        assert!(p.cell(0, 0));
        assert!(!p.cell(1, 0));
        assert!(p.cell(1, 1));
        assert_eq!(p.black_cells(), 2);
    }

    #[test]
    fn test_complement_and_union() {
        assert_eq!(BlockPattern::TOP.complement(), BlockPattern::BOTTOM);
        assert_eq!(BlockPattern::LEFT.complement(), BlockPattern::RIGHT);
        assert_eq!(BlockPattern::EMPTY.complement(), BlockPattern::SOLID);
        assert!(BlockPattern::TOP.union(BlockPattern::BOTTOM).is_solid());
        assert_eq!(BlockPattern::TOP.union(BlockPattern::TOP).black_cells(), 2);
    }

    #[test]
    fn test_presets_are_valid() {
        for table in [
            PatternTable::horizontal(),
            PatternTable::vertical(),
            PatternTable::diagonal(),
        ] {
            assert_eq!(
                PatternTable::new(table.primary(), table.secondary()).unwrap(),
                table
            );
        }
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(PatternTable::new(BlockPattern::TOP, BlockPattern::LEFT).is_err());
        assert!(PatternTable::new(BlockPattern::SOLID, BlockPattern::EMPTY).is_err());
    }

    #[test]
    fn test_assign_stacks_correctly() {
        let table = PatternTable::default();
        for coin in [false, true] {
            let (a, b) = table.assign(Pixel::Black, coin);
            assert!(table.contains(a) && table.contains(b));
            assert!(a.union(b).is_solid());

            let (a, b) = table.assign(Pixel::White, coin);
            assert!(table.contains(a) && table.contains(b));
            assert_eq!(a.union(b).black_cells(), 2);
        }
    }

    #[test]
    fn test_parse_table_name() {
        assert_eq!("vertical".parse::<PatternTable>().unwrap(), PatternTable::vertical());
        assert!("checker".parse::<PatternTable>().is_err());
    }
}
