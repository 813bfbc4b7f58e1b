use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::error::BoardError;
use crate::movegen::legal_moves_with;
use crate::moves::Move;
use crate::types::*;

const BLANK_TOKEN: char = '.';
const RED_TOKEN: char = 'o';
const BLACK_TOKEN: char = 'x';

/// Checkers position as three bitboards.
///
/// `red` and `black` hold every piece of that side, men and kings alike;
/// `kings` marks which of the occupied squares carry a king. A board is never
/// changed in place: [`Board::perform_move`] returns the successor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    red: Bitboard,
    black: Bitboard,
    kings: Bitboard,
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    /// Twelve men per side on the dark squares of the three home rows.
    pub const fn startpos() -> Self {
        Board {
            red: Bitboard::RED_START,
            black: Bitboard::BLACK_START,
            kings: Bitboard::EMPTY,
        }
    }

    /// Build a board from raw occupancy, checking the representation
    /// invariants.
    pub fn from_bitboards(red: u64, black: u64, kings: u64) -> Result<Self, BoardError> {
        let overlap = red & black;
        if overlap != 0 {
            return Err(BoardError::Overlap(overlap));
        }
        let orphans = kings & !(red | black);
        if orphans != 0 {
            return Err(BoardError::OrphanKings(orphans));
        }
        let light = (red | black) & !Bitboard::PLAYABLE.0;
        if light != 0 {
            return Err(BoardError::LightSquares(light));
        }
        Ok(Board {
            red: Bitboard(red),
            black: Bitboard(black),
            kings: Bitboard(kings),
        })
    }

    /// Play `moves` from the starting layout, red first, sides alternating.
    /// Every move must be one the generator offers at that point.
    pub fn from_moves(moves: &[Move]) -> Result<Self, BoardError> {
        let mut board = Board::startpos();
        let mut side = Side::Red;
        for (index, mv) in moves.iter().enumerate() {
            if !board.compute_moves(side).contains(mv) {
                return Err(BoardError::IllegalMove {
                    index,
                    text: mv.to_string(),
                });
            }
            board = board.perform_move(mv, side);
            side = side.other();
        }
        Ok(board)
    }

    #[inline]
    pub fn red(&self) -> Bitboard {
        self.red
    }

    #[inline]
    pub fn black(&self) -> Bitboard {
        self.black
    }

    #[inline]
    pub fn kings(&self) -> Bitboard {
        self.kings
    }

    /// Every piece of `side`.
    #[inline]
    pub fn pieces(&self, side: Side) -> Bitboard {
        match side {
            Side::Red => self.red,
            Side::Black => self.black,
        }
    }

    #[inline]
    pub fn kings_of(&self, side: Side) -> Bitboard {
        self.pieces(side) & self.kings
    }

    #[inline]
    pub fn men_of(&self, side: Side) -> Bitboard {
        self.pieces(side) & !self.kings
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.red | self.black
    }

    /// Playable squares with nothing on them.
    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        Bitboard::PLAYABLE & !self.occupied()
    }

    pub fn piece_count(&self) -> u32 {
        self.occupied().popcount()
    }

    /// Owner and king flag of the piece on `sq`, if any.
    pub fn piece_at(&self, sq: u8) -> Option<(Side, bool)> {
        let king = self.kings.contains(sq);
        if self.red.contains(sq) {
            Some((Side::Red, king))
        } else if self.black.contains(sq) {
            Some((Side::Black, king))
        } else {
            None
        }
    }

    /// Representation invariants: disjoint colors, kings only on occupied
    /// squares, nothing on light squares.
    pub fn is_consistent(&self) -> bool {
        (self.red & self.black).is_empty()
            && (self.kings & !self.occupied()).is_empty()
            && (self.occupied() & !Bitboard::PLAYABLE).is_empty()
    }

    /// Every move for `side`; captures are offered next to quiet moves.
    pub fn compute_moves(&self, side: Side) -> Vec<Move> {
        legal_moves_with(self, side, CaptureRule::Optional)
    }

    pub fn compute_moves_with(&self, side: Side, rule: CaptureRule) -> Vec<Move> {
        legal_moves_with(self, side, rule)
    }

    /// Return the board after `side` plays `mv`.
    ///
    /// The move is trusted: it must come from [`Board::compute_moves`] for the
    /// same side.
    pub fn perform_move(&self, mv: &Move, side: Side) -> Board {
        debug_assert!(
            self.pieces(side).contains(mv.from),
            "move {mv} does not start on a {side} piece"
        );
        debug_assert_ne!(mv.from, mv.to, "move {mv} does not go anywhere");

        let mut own = self.pieces(side);
        let mut opp = self.pieces(side.other());
        let was_king = self.kings.contains(mv.from);
        let captured = mv.captured_bb();

        own ^= mv.from_bb() | mv.to_bb();
        opp &= !captured;

        let mut kings = self.kings & !(mv.from_bb() | captured);
        if mv.promoted || was_king {
            kings |= mv.to_bb();
        }

        match side {
            Side::Red => Board {
                red: own,
                black: opp,
                kings,
            },
            Side::Black => Board {
                red: opp,
                black: own,
                kings,
            },
        }
    }

    /// A side with no legal move loses, whether blocked or out of pieces.
    /// Draws are not detected.
    pub fn get_state(&self, side: Side) -> GameState {
        if self.compute_moves(side).is_empty() {
            GameState::Winner(side.other())
        } else {
            GameState::Ongoing
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_WIDTH {
            write!(f, "{} ", BOARD_WIDTH - row)?;
            for col in 0..BOARD_WIDTH {
                let s = row * BOARD_WIDTH + col;
                let piece = match self.piece_at(s) {
                    Some((Side::Red, false)) => RED_TOKEN,
                    Some((Side::Red, true)) => RED_TOKEN.to_ascii_uppercase(),
                    Some((Side::Black, false)) => BLACK_TOKEN,
                    Some((Side::Black, true)) => BLACK_TOKEN.to_ascii_uppercase(),
                    None => BLANK_TOKEN,
                };
                write!(f, "{piece} ")?;
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for col in 0..BOARD_WIDTH {
            write!(f, " {}", col + 1)?;
        }
        writeln!(f)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse a 64-token grid, top row first. Whitespace is ignored;
    /// `.` is empty, `o` red, `x` black, uppercase for kings.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if tokens.len() != BOARD_SIZE as usize {
            return Err(BoardError::WrongSize(tokens.len()));
        }

        let (mut red, mut black, mut kings) = (0u64, 0u64, 0u64);
        for (i, &key) in tokens.iter().enumerate() {
            let mask = 1u64 << i;
            match key.to_ascii_lowercase() {
                BLANK_TOKEN => continue,
                RED_TOKEN => red |= mask,
                BLACK_TOKEN => black |= mask,
                _ => return Err(BoardError::BadToken(key)),
            }
            if key.is_ascii_uppercase() {
                kings |= mask;
            }
        }
        Board::from_bitboards(red, black, kings)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
