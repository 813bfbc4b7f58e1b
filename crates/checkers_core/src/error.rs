//! Errors raised while reading caller-supplied boards and moves.

use thiserror::Error;

/// A move shorthand string that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("empty move text")]
    Empty,
    #[error("unknown king flag '{0}', expected 'k' or 'o'")]
    BadFlag(char),
    #[error("expected ':' after the king flag")]
    MissingColon,
    #[error("move text ends before the landing square")]
    Truncated,
    #[error("invalid square '{0}'")]
    BadSquare(String),
    #[error("square {0} is not a playable dark square")]
    LightSquare(String),
    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
    #[error("landing {to} is not a diagonal step or jump from {from}")]
    BadLanding { from: String, to: String },
}

/// A board that violates the representation invariants, or an illegal move
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("red and black occupy the same squares ({0:#018x})")]
    Overlap(u64),
    #[error("king bits set on empty squares ({0:#018x})")]
    OrphanKings(u64),
    #[error("pieces placed on light squares ({0:#018x})")]
    LightSquares(u64),
    #[error("board text has {0} squares, expected 64")]
    WrongSize(usize),
    #[error("unknown board token '{0}'")]
    BadToken(char),
    #[error("move {index} ({text}) is not legal in the position")]
    IllegalMove { index: usize, text: String },
}
