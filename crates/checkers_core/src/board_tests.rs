use super::*;

fn at(row: i8, col: i8) -> u8 {
    sq(row, col).unwrap()
}

fn mask(squares: &[(i8, i8)]) -> u64 {
    squares.iter().fold(0, |m, &(r, c)| m | 1u64 << at(r, c))
}

#[test]
fn test_startpos_layout() {
    let board = Board::startpos();
    assert_eq!(board.pieces(Side::Red).popcount(), 12);
    assert_eq!(board.pieces(Side::Black).popcount(), 12);
    assert!(board.kings().is_empty());
    assert!(board.is_consistent());
    assert_eq!(board.piece_at(at(7, 0)), Some((Side::Red, false)));
    assert_eq!(board.piece_at(at(0, 1)), Some((Side::Black, false)));
    assert_eq!(board.piece_at(at(4, 1)), None);
    assert_eq!(Board::default(), board);
}

#[test]
fn test_from_bitboards_validates() {
    let red = mask(&[(5, 0)]);
    let black = mask(&[(2, 1)]);
    assert!(Board::from_bitboards(red, black, 0).is_ok());
    assert!(Board::from_bitboards(red, black, red).is_ok());
    assert_eq!(
        Board::from_bitboards(red, red, 0),
        Err(BoardError::Overlap(red))
    );
    let orphan = mask(&[(3, 2)]);
    assert_eq!(
        Board::from_bitboards(red, black, orphan),
        Err(BoardError::OrphanKings(orphan))
    );
    assert!(matches!(
        Board::from_bitboards(1, 0, 0),
        Err(BoardError::LightSquares(1))
    ));
}

#[test]
fn test_parse_text_grid() {
    let text = "
        . . . . . . . .
        . . O . . . . .
        . X . O . . . .
        . . . . . . . .
        . . . O . . . .
        . . . . O . . .
        . . . O . . . .
        . . . . O . . .";
    let board: Board = text.parse().unwrap();
    assert_eq!(board.pieces(Side::Red).popcount(), 6);
    assert_eq!(board.pieces(Side::Black).popcount(), 1);
    assert_eq!(board.kings_of(Side::Red).popcount(), 6);
    assert_eq!(board.piece_at(at(2, 1)), Some((Side::Black, true)));
    assert!(board.is_consistent());
}

#[test]
fn test_parse_text_errors() {
    assert_eq!(". . .".parse::<Board>(), Err(BoardError::WrongSize(3)));
    let mut grid = ".".repeat(63);
    grid.push('z');
    assert_eq!(grid.parse::<Board>(), Err(BoardError::BadToken('z')));
    let mut light = String::from("o");
    light.push_str(&".".repeat(63));
    assert!(matches!(
        light.parse::<Board>(),
        Err(BoardError::LightSquares(_))
    ));
}

#[test]
fn test_display_startpos() {
    let text = Board::startpos().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "8 . x . x . x . x ");
    assert_eq!(lines[7], "1 o . o . o . o . ");
    assert_eq!(lines[8], "  1 2 3 4 5 6 7 8");
}

#[test]
fn test_perform_simple_move() {
    let board = Board::startpos();
    let mv = Move::simple(at(5, 0), at(4, 1), false);
    let next = board.perform_move(&mv, Side::Red);
    assert!(!next.red().contains(at(5, 0)));
    assert!(next.red().contains(at(4, 1)));
    assert_eq!(next.black(), board.black());
    assert!(next.is_consistent());
    // The original board is untouched.
    assert!(board.red().contains(at(5, 0)));
}

#[test]
fn test_perform_capture_removes_piece_and_king_bit() {
    let board = Board::from_bitboards(
        mask(&[(5, 2)]),
        mask(&[(4, 3), (0, 1)]),
        mask(&[(4, 3)]),
    )
    .unwrap();
    let mv = Move::new(at(5, 2), at(3, 4), vec![at(4, 3)], false);
    let next = board.perform_move(&mv, Side::Red);
    assert_eq!(next.black(), Bitboard(mask(&[(0, 1)])));
    assert!(next.kings().is_empty());
    assert_eq!(next.red(), Bitboard(mask(&[(3, 4)])));
}

#[test]
fn test_perform_promotion_and_king_travel() {
    let board = Board::from_bitboards(mask(&[(1, 2)]), mask(&[(6, 1)]), 0).unwrap();
    let promote = Move::simple(at(1, 2), at(0, 3), true);
    let next = board.perform_move(&promote, Side::Red);
    assert!(next.kings().contains(at(0, 3)));

    // A king keeps its crown even if the move flag says otherwise.
    let back = Move::simple(at(0, 3), at(1, 4), false);
    let after = next.perform_move(&back, Side::Red);
    assert!(after.kings().contains(at(1, 4)));
    assert!(!after.kings().contains(at(0, 3)));
}

#[test]
fn test_black_moves_update_black_side() {
    let board = Board::startpos();
    let mv = Move::simple(at(2, 1), at(3, 0), false);
    let next = board.perform_move(&mv, Side::Black);
    assert!(next.black().contains(at(3, 0)));
    assert_eq!(next.red(), board.red());
}

#[test]
fn test_get_state_blocked_side_loses() {
    // Red man pinned in the corner by a black man on the edge.
    let board = Board::from_bitboards(mask(&[(1, 0)]), mask(&[(0, 1)]), 0).unwrap();
    assert_eq!(board.get_state(Side::Red), GameState::Winner(Side::Black));
    assert_eq!(board.get_state(Side::Black), GameState::Ongoing);
}

#[test]
fn test_get_state_no_pieces_loses() {
    let board = Board::from_bitboards(mask(&[(5, 0)]), 0, 0).unwrap();
    assert_eq!(board.get_state(Side::Black), GameState::Winner(Side::Red));
    assert_eq!(Board::startpos().get_state(Side::Red), GameState::Ongoing);
}

#[test]
fn test_from_moves_replays_game() {
    let moves: Vec<Move> = ["o:31,42", "o:62,51"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let board = Board::from_moves(&moves).unwrap();
    assert!(board.red().contains(at(4, 1)));
    assert!(board.black().contains(at(3, 0)));

    // Black cannot move first.
    let wrong_turn: Vec<Move> = vec!["o:62,51".parse().unwrap()];
    assert!(matches!(
        Board::from_moves(&wrong_turn),
        Err(BoardError::IllegalMove { index: 0, .. })
    ));
}
