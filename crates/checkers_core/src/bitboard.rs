//! Bitboard representation and operations for the checkers board.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the board.
//! Bit index = row * 8 + col, with row 0 at the top (black's home row) and
//! row 7 at the bottom (red's home row). Only dark squares are playable.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::types::Side;

/// A bitboard representing a set of squares on the checkers board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);

    // Columns
    pub const COL_0: Bitboard = Bitboard(0x0101010101010101);
    pub const COL_7: Bitboard = Bitboard(0x8080808080808080);

    // Rows
    pub const ROW_0: Bitboard = Bitboard(0x00000000000000FF);
    pub const ROW_7: Bitboard = Bitboard(0xFF00000000000000);

    /// Dark squares, where `(row + col)` is odd.
    pub const PLAYABLE: Bitboard = Bitboard(0x55AA55AA55AA55AA);

    // Starting layouts
    pub const RED_START: Bitboard = Bitboard(0x55AA550000000000);
    pub const BLACK_START: Bitboard = Bitboard(0x0000000000AA55AA);

    // Useful masks
    pub const NOT_COL_0: Bitboard = Bitboard(!0x0101010101010101);
    pub const NOT_COL_7: Bitboard = Bitboard(!0x8080808080808080);

    /// Create a bitboard with a single square set.
    #[inline(always)]
    pub const fn from_square(sq: u8) -> Self {
        Bitboard(1u64 << sq)
    }

    /// Check if the bitboard is empty.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if a specific square is set.
    #[inline(always)]
    pub const fn contains(self, sq: u8) -> bool {
        (self.0 & (1u64 << sq)) != 0
    }

    /// Set a square in the bitboard.
    #[inline(always)]
    pub fn set(&mut self, sq: u8) {
        self.0 |= 1u64 << sq;
    }

    /// Clear a square in the bitboard.
    #[inline(always)]
    pub fn clear(&mut self, sq: u8) {
        self.0 &= !(1u64 << sq);
    }

    /// Count the number of set bits (population count).
    #[inline(always)]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Get the index of the least significant bit (0-63), or None if empty.
    #[inline(always)]
    pub const fn lsb(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }

    /// Get and remove the least significant bit. Returns the square index.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            let sq = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1; // Clear the LSB
            Some(sq)
        }
    }

    /// Shift toward row 0 and column 0.
    #[inline(always)]
    pub const fn up_left(self) -> Bitboard {
        Bitboard((self.0 >> 9) & Self::NOT_COL_7.0)
    }

    /// Shift toward row 0 and column 7.
    #[inline(always)]
    pub const fn up_right(self) -> Bitboard {
        Bitboard((self.0 >> 7) & Self::NOT_COL_0.0)
    }

    /// Shift toward row 7 and column 0.
    #[inline(always)]
    pub const fn down_left(self) -> Bitboard {
        Bitboard((self.0 << 7) & Self::NOT_COL_7.0)
    }

    /// Shift toward row 7 and column 7.
    #[inline(always)]
    pub const fn down_right(self) -> Bitboard {
        Bitboard((self.0 << 9) & Self::NOT_COL_0.0)
    }

    /// Union of the squares reachable by one diagonal step in any of `dirs`.
    #[inline]
    pub fn step_all(self, dirs: &[Diagonal]) -> Bitboard {
        dirs.iter()
            .fold(Bitboard::EMPTY, |acc, d| acc | d.shift(self))
    }
}

/// One of the four diagonal directions a piece can travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagonal {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Diagonal {
    pub const ALL: [Diagonal; 4] = [
        Diagonal::UpLeft,
        Diagonal::UpRight,
        Diagonal::DownLeft,
        Diagonal::DownRight,
    ];
    pub const UP: [Diagonal; 2] = [Diagonal::UpLeft, Diagonal::UpRight];
    pub const DOWN: [Diagonal; 2] = [Diagonal::DownLeft, Diagonal::DownRight];

    /// Directions a man of `side` may travel.
    pub fn forward(side: Side) -> &'static [Diagonal] {
        match side {
            Side::Red => &Self::UP,
            Side::Black => &Self::DOWN,
        }
    }

    /// Directions available to a piece, kings using all four.
    pub fn for_piece(side: Side, king: bool) -> &'static [Diagonal] {
        if king { &Self::ALL } else { Self::forward(side) }
    }

    #[inline(always)]
    pub const fn shift(self, bb: Bitboard) -> Bitboard {
        match self {
            Diagonal::UpLeft => bb.up_left(),
            Diagonal::UpRight => bb.up_right(),
            Diagonal::DownLeft => bb.down_left(),
            Diagonal::DownRight => bb.down_right(),
        }
    }
}

// Operator implementations for convenient bitwise operations
impl BitAnd for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

/// Iterator over set bits in a bitboard.
impl Iterator for Bitboard {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop_lsb()
    }
}

#[cfg(test)]
#[path = "bitboard_tests.rs"]
mod bitboard_tests;
