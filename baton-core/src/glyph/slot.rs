//! Slot table
//!
//! Sixteen fixed screen positions grouped into six lines, one line per
//! bank. Lines 1 and 6 span the full width with two interior slots; the
//! middle lines only have their left (origin) and right (end) slots.

use super::{Coordinate, GLYPH_WIDTH, SCREEN_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of slots in the table
pub const SLOT_COUNT: usize = 16;

/// Column of the right-most slot, flush with the screen edge
const END_COL: u8 = (SCREEN_WIDTH - GLYPH_WIDTH) as u8;

/// Logical screen position
///
/// Discriminants follow reading order, so iterating a line's slots in
/// discriminant order goes origin to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Slot {
    Line1Origin = 0,
    Line1Second = 1,
    Line1Third = 2,
    Line1End = 3,
    Line2Origin = 4,
    Line2End = 5,
    Line3Origin = 6,
    Line3End = 7,
    Line4Origin = 8,
    Line4End = 9,
    Line5Origin = 10,
    Line5End = 11,
    Line6Origin = 12,
    Line6Second = 13,
    Line6Third = 14,
    Line6End = 15,
}

/// Coordinate of every slot, indexed by discriminant
const SLOT_COORDINATES: [Coordinate; SLOT_COUNT] = [
    Coordinate::new(0, 0),
    Coordinate::new(0, 25),
    Coordinate::new(0, 51),
    Coordinate::new(0, END_COL),
    Coordinate::new(1, 0),
    Coordinate::new(1, END_COL),
    Coordinate::new(2, 0),
    Coordinate::new(2, END_COL),
    Coordinate::new(3, 0),
    Coordinate::new(3, END_COL),
    Coordinate::new(4, 0),
    Coordinate::new(4, END_COL),
    Coordinate::new(5, 0),
    Coordinate::new(5, 25),
    Coordinate::new(5, 51),
    Coordinate::new(5, END_COL),
];

impl Slot {
    /// All slots in discriminant order
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::Line1Origin,
        Slot::Line1Second,
        Slot::Line1Third,
        Slot::Line1End,
        Slot::Line2Origin,
        Slot::Line2End,
        Slot::Line3Origin,
        Slot::Line3End,
        Slot::Line4Origin,
        Slot::Line4End,
        Slot::Line5Origin,
        Slot::Line5End,
        Slot::Line6Origin,
        Slot::Line6Second,
        Slot::Line6Third,
        Slot::Line6End,
    ];

    /// Position in the slot table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot for a table index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Controller coordinate bound to this slot
    pub const fn coordinate(self) -> Coordinate {
        SLOT_COORDINATES[self as usize]
    }

    /// Line this slot belongs to
    pub const fn line(self) -> Line {
        match self {
            Slot::Line1Origin | Slot::Line1Second | Slot::Line1Third | Slot::Line1End => {
                Line::First
            }
            Slot::Line2Origin | Slot::Line2End => Line::Second,
            Slot::Line3Origin | Slot::Line3End => Line::Third,
            Slot::Line4Origin | Slot::Line4End => Line::Fourth,
            Slot::Line5Origin | Slot::Line5End => Line::Fifth,
            Slot::Line6Origin | Slot::Line6Second | Slot::Line6Third | Slot::Line6End => {
                Line::Sixth
            }
        }
    }
}

/// Group of slots sharing a bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Line {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
}

impl Line {
    /// All lines, top to bottom
    pub const ALL: [Line; 6] = [
        Line::First,
        Line::Second,
        Line::Third,
        Line::Fourth,
        Line::Fifth,
        Line::Sixth,
    ];

    /// Slots of this line, origin to end
    pub const fn slots(self) -> &'static [Slot] {
        match self {
            Line::First => &[
                Slot::Line1Origin,
                Slot::Line1Second,
                Slot::Line1Third,
                Slot::Line1End,
            ],
            Line::Second => &[Slot::Line2Origin, Slot::Line2End],
            Line::Third => &[Slot::Line3Origin, Slot::Line3End],
            Line::Fourth => &[Slot::Line4Origin, Slot::Line4End],
            Line::Fifth => &[Slot::Line5Origin, Slot::Line5End],
            Line::Sixth => &[
                Slot::Line6Origin,
                Slot::Line6Second,
                Slot::Line6Third,
                Slot::Line6End,
            ],
        }
    }

    /// Left-most slot
    pub const fn origin(self) -> Slot {
        self.slots()[0]
    }

    /// Right-most slot
    pub const fn end(self) -> Slot {
        let slots = self.slots();
        slots[slots.len() - 1]
    }
}
