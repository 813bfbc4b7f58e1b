use super::*;
use checkers_core::sq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn at(row: i8, col: i8) -> u8 {
    sq(row, col).unwrap()
}

fn mask(squares: &[(i8, i8)]) -> u64 {
    squares.iter().fold(0, |m, &(r, c)| m | 1u64 << at(r, c))
}

fn board(red: &[(i8, i8)], black: &[(i8, i8)], kings: &[(i8, i8)]) -> Board {
    Board::from_bitboards(mask(red), mask(black), mask(kings)).unwrap()
}

fn config(depth: u8) -> SearchConfig {
    SearchConfig {
        max_depth: depth,
        ..SearchConfig::deterministic()
    }
}

/// Red can take black's last man or play a quiet move.
fn winning_capture() -> Board {
    board(&[(5, 2)], &[(4, 3)], &[])
}

/// Red can take one man and be recaptured, or take both.
fn double_or_single() -> Board {
    board(&[(5, 0)], &[(4, 1), (2, 3)], &[])
}

#[test]
fn test_finds_winning_capture() {
    let mut search = Search::new(winning_capture(), Side::Red, config(4));
    let (best, score) = search.compute_score(Side::Red, false);
    let best = best.unwrap();
    assert_eq!(best.captures, vec![at(4, 3)]);
    assert_eq!(score, WIN_SCORE);
    // Decisive after the first pass.
    assert_eq!(search.depth(), 1);
    assert_eq!(search.best_move(), Some(&best));
}

#[test]
fn test_prefers_full_chain() {
    for depth in 1..=4 {
        let mut search = Search::new(double_or_single(), Side::Red, config(depth));
        let (best, score) = search.search_depth(Side::Red, depth);
        assert_eq!(best.unwrap().captures.len(), 2, "depth {depth}");
        assert_eq!(score, WIN_SCORE);
    }
}

#[test]
fn test_no_moves_is_a_loss() {
    // Red man pinned in the corner.
    let pinned = board(&[(1, 0)], &[(0, 1)], &[]);
    let mut search = Search::new(pinned, Side::Red, config(6));
    let (best, score) = search.compute_score(Side::Red, false);
    assert!(best.is_none());
    assert_eq!(score, -WIN_SCORE);
}

#[test]
fn test_opponent_to_move_without_moves_is_a_win() {
    let pinned = board(&[(1, 0)], &[(0, 1)], &[]);
    let mut search = Search::new(pinned, Side::Black, config(6));
    let (best, score) = search.compute_score(Side::Red, false);
    assert!(best.is_none());
    assert_eq!(score, WIN_SCORE);
}

#[test]
fn test_deterministic_repeat() {
    let run = || {
        let mut search = Search::new(Board::startpos(), Side::Red, config(4));
        search.search_depth(Side::Red, 4)
    };
    let (a_move, a_score) = run();
    let (b_move, b_score) = run();
    assert!(a_move.is_some());
    assert_eq!(a_move, b_move);
    assert_eq!(a_score, b_score);
}

#[test]
fn test_repeat_on_same_search_is_stable() {
    let mut search = Search::new(Board::startpos(), Side::Red, config(3));
    let first = search.compute_score(Side::Red, false);
    let second = search.compute_score(Side::Red, false);
    assert_eq!(first.0, second.0);
    assert!(search.table_len() > 0);
}

#[test]
fn test_table_does_not_change_the_move() {
    for position in [winning_capture(), double_or_single()] {
        for depth in 1..=4 {
            let mut with = Search::new(position, Side::Red, config(depth));
            let mut without = Search::new(
                position,
                Side::Red,
                SearchConfig {
                    use_table: false,
                    ..config(depth)
                },
            );
            let (a, _) = with.search_depth(Side::Red, depth);
            let (b, _) = without.search_depth(Side::Red, depth);
            assert_eq!(a, b, "depth {depth}");
            assert_eq!(without.table_len(), 0);
        }
    }
}

/// Positions reached by seeded random play, with the side to move.
fn random_positions(count: u64) -> Vec<(Board, Side)> {
    (0..count)
        .filter_map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::startpos();
            let mut side = Side::Red;
            for _ in 0..rng.gen_range(4..40) {
                let moves = board.compute_moves(side);
                let mv = moves.choose(&mut rng)?;
                board = board.perform_move(mv, side);
                side = side.other();
            }
            (!board.compute_moves(side).is_empty()).then_some((board, side))
        })
        .collect()
}

#[test]
fn test_table_agrees_on_random_positions() {
    for (position, side) in random_positions(30) {
        for depth in 1..=5 {
            let mut with = Search::new(position, side, config(depth));
            let mut without = Search::new(
                position,
                side,
                SearchConfig {
                    use_table: false,
                    ..config(depth)
                },
            );
            let (a_move, a_score) = with.search_depth(side, depth);
            let (b_move, b_score) = without.search_depth(side, depth);
            assert_eq!(a_move, b_move, "depth {depth}\n{position}");
            assert_eq!(a_score, b_score, "depth {depth}\n{position}");
        }
    }
}

#[test]
fn test_reusing_deeper_entries_keeps_a_legal_move() {
    for (position, side) in random_positions(5) {
        let cfg = SearchConfig {
            reuse_deeper: true,
            ..config(4)
        };
        let mut search = Search::new(position, side, cfg);
        let (best, _) = search.compute_score(side, false);
        assert!(position.compute_moves(side).contains(&best.unwrap()));
    }
}

#[test]
fn test_parallel_matches_sequential() {
    for depth in 1..=4 {
        let base = SearchConfig {
            use_table: false,
            ..config(depth)
        };
        let mut sequential = Search::new(Board::startpos(), Side::Red, base.clone());
        let mut parallel = Search::new(
            Board::startpos(),
            Side::Red,
            SearchConfig {
                parallel: true,
                ..base
            },
        );
        let (a_move, a_score) = sequential.search_depth(Side::Red, depth);
        let (b_move, b_score) = parallel.search_depth(Side::Red, depth);
        assert_eq!(a_move, b_move, "depth {depth}");
        assert_eq!(a_score, b_score, "depth {depth}");
    }
}

#[test]
fn test_parallel_with_table_finds_win() {
    let cfg = SearchConfig {
        parallel: true,
        ..config(5)
    };
    let mut search = Search::new(double_or_single(), Side::Red, cfg);
    let (best, _) = search.compute_score(Side::Red, false);
    assert_eq!(best.unwrap().captures.len(), 2);
}

#[test]
fn test_node_budget_stops_deepening() {
    let cfg = SearchConfig {
        node_budget: 1,
        ..config(8)
    };
    let mut search = Search::new(Board::startpos(), Side::Red, cfg);
    let (best, _) = search.compute_score(Side::Red, false);
    assert!(best.is_some());
    assert_eq!(search.depth(), 1);
    assert!(search.nodes() > 1);
}

#[test]
fn test_depth_limit() {
    let mut search = Search::new(Board::startpos(), Side::Red, config(3));
    search.compute_score(Side::Red, false);
    assert_eq!(search.depth(), 3);
    let line = search.principal_line();
    assert!(!line.is_empty() && line.len() <= 3);
    assert_eq!(Some(&line[0]), search.best_move());
}

#[test]
fn test_update_board_keeps_table() {
    let mut search = Search::new(Board::startpos(), Side::Red, config(3));
    let (best, _) = search.compute_score(Side::Red, false);
    let after = Board::startpos().perform_move(&best.unwrap(), Side::Red);
    let reply = after.compute_moves(Side::Black)[0].clone();
    let next = after.perform_move(&reply, Side::Red.other());

    let kept = search.table_len();
    search.update_board(next);
    assert_eq!(search.table_len(), kept);
    let (best, _) = search.compute_score(Side::Red, false);
    let best = best.unwrap();
    assert!(next.compute_moves(Side::Red).contains(&best));
}

#[test]
fn test_black_player() {
    let after = Board::startpos().perform_move(&"o:31,42".parse().unwrap(), Side::Red);
    let mut search = Search::new(after, Side::Black, config(3));
    let (best, _) = search.compute_score(Side::Black, false);
    assert!(after.compute_moves(Side::Black).contains(&best.unwrap()));
}

#[test]
fn test_seeded_tie_breaks_repeat() {
    let cfg = SearchConfig {
        tie_break_probability: 1.0,
        seed: Some(42),
        ..config(2)
    };
    let run = || {
        let mut search = Search::new(Board::startpos(), Side::Red, cfg.clone());
        search.search_depth(Side::Red, 2).0
    };
    let first = run();
    assert!(first.is_some());
    assert_eq!(first, run());
}

#[test]
fn test_forced_rule_search() {
    let cfg = SearchConfig {
        capture_rule: checkers_core::CaptureRule::Forced,
        ..config(3)
    };
    let b = board(&[(5, 0), (6, 5)], &[(4, 1), (2, 3), (0, 7)], &[]);
    let mut search = Search::new(b, Side::Red, cfg);
    let (best, _) = search.compute_score(Side::Red, false);
    assert_eq!(best.unwrap().captures.len(), 2);
}
