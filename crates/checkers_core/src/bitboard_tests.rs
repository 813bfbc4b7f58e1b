use super::*;
use crate::types::{is_playable, sq};

#[test]
fn test_from_square() {
    assert_eq!(Bitboard::from_square(0).0, 1);
    assert_eq!(Bitboard::from_square(7).0, 128);
    assert_eq!(Bitboard::from_square(63).0, 1 << 63);
}

#[test]
fn test_popcount() {
    assert_eq!(Bitboard::EMPTY.popcount(), 0);
    assert_eq!(Bitboard::from_square(0).popcount(), 1);
    assert_eq!(Bitboard::COL_0.popcount(), 8);
    assert_eq!(Bitboard::ROW_7.popcount(), 8);
    assert_eq!(Bitboard::PLAYABLE.popcount(), 32);
    assert_eq!(Bitboard::RED_START.popcount(), 12);
    assert_eq!(Bitboard::BLACK_START.popcount(), 12);
}

#[test]
fn test_iterator() {
    let bb = Bitboard(0b1010);
    let squares: Vec<u8> = bb.collect();
    assert_eq!(squares, vec![1, 3]);
}

#[test]
fn test_playable_mask_matches_square_helper() {
    for s in 0..64u8 {
        assert_eq!(Bitboard::PLAYABLE.contains(s), is_playable(s), "square {s}");
    }
    assert!((Bitboard::RED_START & !Bitboard::PLAYABLE).is_empty());
    assert!((Bitboard::BLACK_START & !Bitboard::PLAYABLE).is_empty());
    // Bottom-left corner is a dark square held by red.
    assert!(Bitboard::RED_START.contains(sq(7, 0).unwrap()));
}

#[test]
fn test_diagonal_shifts() {
    let center = Bitboard::from_square(sq(4, 3).unwrap());
    assert_eq!(center.up_left(), Bitboard::from_square(sq(3, 2).unwrap()));
    assert_eq!(center.up_right(), Bitboard::from_square(sq(3, 4).unwrap()));
    assert_eq!(center.down_left(), Bitboard::from_square(sq(5, 2).unwrap()));
    assert_eq!(center.down_right(), Bitboard::from_square(sq(5, 4).unwrap()));
}

#[test]
fn test_shifts_do_not_wrap_columns() {
    let left_edge = Bitboard::from_square(sq(5, 0).unwrap());
    assert_eq!(left_edge.up_left(), Bitboard::EMPTY);
    assert_eq!(left_edge.down_left(), Bitboard::EMPTY);

    let right_edge = Bitboard::from_square(sq(2, 7).unwrap());
    assert_eq!(right_edge.up_right(), Bitboard::EMPTY);
    assert_eq!(right_edge.down_right(), Bitboard::EMPTY);
}

#[test]
fn test_shifts_drop_off_top_and_bottom() {
    let top = Bitboard::from_square(sq(0, 3).unwrap());
    assert_eq!(top.up_left() | top.up_right(), Bitboard::EMPTY);

    let bottom = Bitboard::from_square(sq(7, 4).unwrap());
    assert_eq!(bottom.down_left() | bottom.down_right(), Bitboard::EMPTY);
}

#[test]
fn test_forward_directions_per_side() {
    let piece = Bitboard::from_square(sq(4, 3).unwrap());
    let red = piece.step_all(Diagonal::forward(Side::Red));
    assert_eq!(red.popcount(), 2);
    assert!(red.into_iter().all(|s| s / 8 == 3));

    let black = piece.step_all(Diagonal::forward(Side::Black));
    assert!(black.into_iter().all(|s| s / 8 == 5));

    assert_eq!(piece.step_all(Diagonal::for_piece(Side::Red, true)).popcount(), 4);
}
