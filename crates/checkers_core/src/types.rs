use serde::{Deserialize, Serialize};

pub const BOARD_WIDTH: u8 = 8;
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Black,
}
impl Side {
    pub const BOTH: [Side; 2] = [Side::Red, Side::Black];

    pub fn other(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Black => 1,
        }
    }
    /// Row delta of a forward step: red heads for row 0, black for row 7.
    pub fn forward(self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }
    /// Row on which a man of this side becomes a king.
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::Red => 0,
            Side::Black => BOARD_WIDTH - 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Outcome of a position for the side to move. Draws are not detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Ongoing,
    Winner(Side),
}

/// Whether a side holding a capture may still play a quiet move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureRule {
    /// House rule: captures and quiet moves are offered together.
    #[default]
    Optional,
    /// Captures are mandatory and a started chain must be finished.
    Forced,
}

// Helpers
pub fn row_of(sq: u8) -> i8 {
    (sq / BOARD_WIDTH) as i8
}
pub fn col_of(sq: u8) -> i8 {
    (sq % BOARD_WIDTH) as i8
}
pub fn sq(row: i8, col: i8) -> Option<u8> {
    let w = BOARD_WIDTH as i8;
    if (0..w).contains(&row) && (0..w).contains(&col) {
        Some((row as u8) * BOARD_WIDTH + (col as u8))
    } else {
        None
    }
}

/// Dark squares carry the pieces; light squares are never used.
pub fn is_playable(sq: u8) -> bool {
    sq < BOARD_SIZE && (row_of(sq) + col_of(sq)) % 2 == 1
}

/// Two-digit shorthand coordinate: row digit counted from red's home row,
/// then the 1-based column.
pub fn sq_to_coord(sq: u8) -> String {
    let r = (b'0' + (BOARD_WIDTH - sq / BOARD_WIDTH)) as char;
    let c = (b'1' + (sq % BOARD_WIDTH)) as char;
    format!("{r}{c}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let r = b[0];
    let f = b[1];
    if !(b'1'..=b'8').contains(&r) || !(b'1'..=b'8').contains(&f) {
        return None;
    }
    let row = BOARD_WIDTH - (r - b'0');
    let col = f - b'1';
    Some(row * BOARD_WIDTH + col)
}
