//! Glyphs, screen geometry and the slot table
//!
//! Everything here is static data: the controller's counter space, the
//! 7-column font and the sixteen fixed positions the animation visits.

pub mod font;
pub mod slot;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use font::{glyph_for, ASCII_7, ASCII_BASE, ASCII_LAST};
pub use slot::{Line, Slot, SLOT_COUNT};

/// Screen width in pixels (X counter range)
pub const SCREEN_WIDTH: usize = 84;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 48;

/// Number of 8-pixel banks (Y counter range)
pub const BANKS: usize = SCREEN_HEIGHT / 8;

/// Bytes in a full screen of display RAM
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT / 8;

/// Column bytes per glyph
pub const GLYPH_WIDTH: usize = 7;

/// Display RAM byte with every pixel off
pub const BLANK_BYTE: u8 = 0x00;

/// Position of the controller's write counters
///
/// `row` selects the 8-pixel bank (0-5) and `col` the pixel column (0-83).
/// [`Coordinate::new`] does not validate; the driver sends whatever it is
/// given, so callers writing text should take coordinates from [`Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    /// Top-left corner of the screen
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a coordinate without range checks
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Create a coordinate, rejecting positions outside the counter range
    pub const fn checked(row: u8, col: u8) -> Option<Self> {
        let at = Self::new(row, col);
        if at.is_on_screen() {
            Some(at)
        } else {
            None
        }
    }

    /// Bank (Y counter) value
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Column (X counter) value
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Whether both counters are inside the controller's range
    pub const fn is_on_screen(&self) -> bool {
        (self.row as usize) < BANKS && (self.col as usize) < SCREEN_WIDTH
    }
}

/// Fixed-width pixel pattern, one byte per column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Glyph([u8; GLYPH_WIDTH]);

impl Glyph {
    /// Glyph with no pixels set
    pub const BLANK: Self = Self([BLANK_BYTE; GLYPH_WIDTH]);

    /// Create a glyph from raw column bytes
    pub const fn from_columns(columns: [u8; GLYPH_WIDTH]) -> Self {
        Self(columns)
    }

    /// Centre a 5-column pattern between two blank columns
    pub const fn padded(base: [u8; 5]) -> Self {
        Self([
            BLANK_BYTE, base[0], base[1], base[2], base[3], base[4], BLANK_BYTE,
        ])
    }

    /// Column bytes as sent to display RAM
    pub const fn columns(&self) -> &[u8; GLYPH_WIDTH] {
        &self.0
    }
}

/// Dollar sign sprite carried around the screen by the animation
pub const DOLLAR: Glyph = Glyph::from_columns([0x00, 0x24, 0x2a, 0x7f, 0x2a, 0x12, 0x00]);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_screen_size() {
        assert_eq!(SCREEN_SIZE, 504);
        assert_eq!(BANKS, 6);
    }

    #[test]
    fn test_padded_glyph() {
        let glyph = Glyph::padded([1, 2, 3, 4, 5]);
        assert_eq!(glyph.columns(), &[0, 1, 2, 3, 4, 5, 0]);
    }

    #[test]
    fn test_checked_coordinate_edges() {
        assert!(Coordinate::checked(5, 83).is_some());
        assert!(Coordinate::checked(6, 0).is_none());
        assert!(Coordinate::checked(0, 84).is_none());
    }

    #[test]
    fn test_unchecked_coordinate_keeps_values() {
        // Raw bitmap writes may use any counter value
        let at = Coordinate::new(9, 200);
        assert_eq!(at.row(), 9);
        assert_eq!(at.col(), 200);
        assert!(!at.is_on_screen());
    }

    proptest! {
        #[test]
        fn checked_agrees_with_range(row in 0u8..16, col in 0u8..128) {
            let expected = (row as usize) < BANKS && (col as usize) < SCREEN_WIDTH;
            prop_assert_eq!(Coordinate::checked(row, col).is_some(), expected);
        }
    }
}
