//! Zobrist hashing for checkers positions.
//!
//! The hash XORs together one random value per (piece class, square) for
//! every occupied square, plus one value for the side-relative flag. It depends
//! only on the red, black and king bitboards and the flag, so equal boards hash
//! equally no matter which move sequence produced them.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::types::Side;

/// Piece classes: red man, red king, black man, black king.
const PIECE_CLASSES: usize = 4;

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Indexed by [class][square], class = side * 2 + king.
    pub pieces: [[u64; 64]; PIECE_CLASSES],
    /// XORed in when the side-relative flag is set.
    pub side_relative: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate keys with xorshift64 from a fixed seed.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x2545F4914F6CDD1Du64; // Fixed seed

        let mut pieces = [[0u64; 64]; PIECE_CLASSES];
        let mut class = 0;
        while class < PIECE_CLASSES {
            let mut sq = 0;
            while sq < 64 {
                state = xorshift64(state);
                pieces[class][sq] = state;
                sq += 1;
            }
            class += 1;
        }

        state = xorshift64(state);
        let side_relative = state;

        ZobristKeys {
            pieces,
            side_relative,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, side: Side, king: bool, sq: u8) -> u64 {
        self.pieces[side.idx() * 2 + king as usize][sq as usize]
    }

    fn fold(&self, bb: Bitboard, side: Side, king: bool) -> u64 {
        bb.fold(0, |h, sq| h ^ self.piece_key(side, king, sq))
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// 64-bit fingerprint of `board` with the side-relative flag folded in.
///
/// The flag lets one physical board occupy two table slots, one per
/// perspective of the side to move.
pub fn position_hash(board: &Board, side_relative: bool) -> u64 {
    let mut h = 0u64;
    for side in Side::BOTH {
        h ^= ZOBRIST.fold(board.men_of(side), side, false);
        h ^= ZOBRIST.fold(board.kings_of(side), side, true);
    }
    if side_relative {
        h ^= ZOBRIST.side_relative;
    }
    h
}

impl Board {
    /// See [`position_hash`].
    #[inline]
    pub fn hash_key(&self, side_relative: bool) -> u64 {
        position_hash(self, side_relative)
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
