//! Single-ply move value and its shorthand text form.
//!
//! Shorthand: `<k|o>:<from>[,x<capture>]*,<to>`, each square written as the
//! row digit (`8 - row`) followed by the column digit (`col + 1`). The flag is
//! `k` when the piece is a king once the move is played.

use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::error::MoveParseError;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    /// Origin square.
    pub from: u8,
    /// Final landing square.
    pub to: u8,
    /// Captured piece squares in the order they are jumped.
    pub captures: Vec<u8>,
    /// The piece is a king after this move, whether it promoted here or was
    /// one already.
    pub promoted: bool,
}

impl Move {
    pub fn new(from: u8, to: u8, captures: Vec<u8>, promoted: bool) -> Self {
        Self {
            from,
            to,
            captures,
            promoted,
        }
    }

    /// A non-capturing step.
    pub fn simple(from: u8, to: u8, promoted: bool) -> Self {
        Self::new(from, to, Vec::new(), promoted)
    }

    /// An empty chain sitting on `from`, grown with [`Move::push_landing`].
    pub fn start(from: u8) -> Self {
        Self::simple(from, from, false)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    pub fn from_bb(&self) -> Bitboard {
        Bitboard::from_square(self.from)
    }

    pub fn to_bb(&self) -> Bitboard {
        Bitboard::from_square(self.to)
    }

    pub fn captured_bb(&self) -> Bitboard {
        self.captures
            .iter()
            .fold(Bitboard::EMPTY, |acc, &c| acc | Bitboard::from_square(c))
    }

    /// Squares the piece lands on, in order, ending with `to`.
    ///
    /// Only captured squares are stored, so each intermediate landing is the
    /// square diagonally behind its capture as seen from the previous landing.
    pub fn landings(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.captures.len().max(1));
        let mut at = self.from;
        if let Some((_, intermediate)) = self.captures.split_last() {
            for &cap in intermediate {
                match jump_landing(at, cap) {
                    Some(land) => {
                        out.push(land);
                        at = land;
                    }
                    None => break,
                }
            }
        }
        out.push(self.to);
        out
    }

    /// Extend the move by one landing square.
    ///
    /// A landing two diagonal steps away records the jumped square as a
    /// capture; a single diagonal step is only accepted as the first landing.
    pub fn push_landing(&mut self, square: u8) -> Result<(), MoveParseError> {
        if square >= BOARD_SIZE {
            return Err(MoveParseError::BadSquare(square.to_string()));
        }
        if !is_playable(square) {
            return Err(MoveParseError::LightSquare(sq_to_coord(square)));
        }
        let prev = self.to;
        let dr = row_of(square) - row_of(prev);
        let dc = col_of(square) - col_of(prev);
        let bad = || MoveParseError::BadLanding {
            from: sq_to_coord(prev),
            to: sq_to_coord(square),
        };
        let stepped = self.captures.is_empty() && self.to != self.from;

        match (dr.abs(), dc.abs()) {
            (1, 1) if self.to == self.from => {
                self.to = square;
            }
            (2, 2) if !stepped => {
                let mid = sq(row_of(prev) + dr / 2, col_of(prev) + dc / 2).ok_or_else(bad)?;
                self.captures.push(mid);
                self.to = square;
            }
            _ => return Err(bad()),
        }
        Ok(())
    }

    /// True when `partial` starts at the same square and follows this move's
    /// path so far, i.e. it is an exact or strict prefix of the chain.
    /// The king flag is not compared.
    pub fn subset_equal(&self, partial: &Move) -> bool {
        if partial.from != self.from {
            return false;
        }
        if partial.captures.is_empty() {
            // Only the piece selected, or the same quiet step.
            return partial.to == partial.from
                || (self.captures.is_empty() && self.to == partial.to);
        }
        if !self.captures.starts_with(&partial.captures) {
            return false;
        }
        self.landings()
            .get(partial.captures.len() - 1)
            .is_some_and(|&land| land == partial.to)
    }

    /// Debug dump: the `from | to` grid, then capture and king flags.
    pub fn repr(&self) -> String {
        let marks = self.from_bb() | self.to_bb();
        let mut out = String::with_capacity(80);
        for s in 0..BOARD_SIZE {
            out.push(if marks.contains(s) { 'o' } else { '.' });
            if s % BOARD_WIDTH == BOARD_WIDTH - 1 {
                out.push('\n');
            }
        }
        out.push(if self.is_capture() { 'x' } else { 'o' });
        out.push(if self.promoted { 'k' } else { 'o' });
        out
    }
}

/// Square reached by jumping from `at` over `over`.
fn jump_landing(at: u8, over: u8) -> Option<u8> {
    sq(
        2 * row_of(over) - row_of(at),
        2 * col_of(over) - col_of(at),
    )
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            if self.promoted { 'k' } else { 'o' },
            sq_to_coord(self.from)
        )?;
        for &cap in &self.captures {
            write!(f, ",x{}", sq_to_coord(cap))?;
        }
        write!(f, ",{}", sq_to_coord(self.to))
    }
}

fn parse_square(text: &str) -> Result<u8, MoveParseError> {
    if text.is_empty() {
        return Err(MoveParseError::Truncated);
    }
    let square = coord_to_sq(text).ok_or_else(|| MoveParseError::BadSquare(text.to_string()))?;
    if !is_playable(square) {
        return Err(MoveParseError::LightSquare(text.to_string()));
    }
    Ok(square)
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let flag = text.chars().next().ok_or(MoveParseError::Empty)?;
        let promoted = match flag {
            'k' => true,
            'o' => false,
            other => return Err(MoveParseError::BadFlag(other)),
        };
        let rest = text[flag.len_utf8()..]
            .strip_prefix(':')
            .ok_or(MoveParseError::MissingColon)?;

        let mut parts = rest.split(',');
        let from = parse_square(parts.next().unwrap_or(""))?;

        let mut captures = Vec::new();
        let mut to = None;
        for part in parts.by_ref() {
            match part.strip_prefix('x') {
                Some(cap) => captures.push(parse_square(cap)?),
                None => {
                    to = Some(parse_square(part)?);
                    break;
                }
            }
        }
        let to = to.ok_or(MoveParseError::Truncated)?;

        let trailing: Vec<&str> = parts.collect();
        if !trailing.is_empty() {
            return Err(MoveParseError::Trailing(trailing.join(",")));
        }

        Ok(Move {
            from,
            to,
            captures,
            promoted,
        })
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
