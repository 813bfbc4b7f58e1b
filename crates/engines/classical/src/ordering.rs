//! Move ordering heuristics.

use checkers_core::{Board, CaptureRule, Move, Side};

const PROMOTION_BONUS: f32 = 0.5;
const KING_MOVE_BONUS: f32 = 0.02;
const SINGLE_CAPTURE_BONUS: f32 = 0.2;
const CHAIN_CAPTURE_BONUS: f32 = 0.3;
/// Per piece the opponent can capture right after the move.
const EXPOSURE_PENALTY: f32 = 0.2;
const CACHED_BEST_BONUS: f32 = 5.0;

/// A move with everything the search needs to recurse into it.
pub struct Candidate {
    /// Position of the move in generation order.
    pub index: usize,
    pub mv: Move,
    pub child: Board,
    /// The opponent's moves in `child`, handed to the child node.
    pub replies: Vec<Move>,
    pub weight: f32,
}

/// Weigh `moves` for `turn` and sort them best first.
///
/// `cached` returns the table value of a child position; the child with the
/// best cached value for the mover (highest when `prefer_high`) gets a large
/// bonus. Equal weights keep generation order.
pub fn order_moves<F>(
    board: &Board,
    moves: Vec<Move>,
    turn: Side,
    rule: CaptureRule,
    prefer_high: bool,
    cached: F,
) -> Vec<Candidate>
where
    F: Fn(&Board) -> Option<f32>,
{
    let kings = board.kings_of(turn);

    let mut top: Option<(usize, f32)> = None;
    let mut out: Vec<Candidate> = moves
        .into_iter()
        .enumerate()
        .map(|(index, mv)| {
            let child = board.perform_move(&mv, turn);
            if let Some(value) = cached(&child) {
                let better = match top {
                    None => true,
                    Some((_, best)) if prefer_high => value > best,
                    Some((_, best)) => value < best,
                };
                if better {
                    top = Some((index, value));
                }
            }

            let replies = child.compute_moves_with(turn.other(), rule);
            let weight = static_weight(&mv, kings.contains(mv.from), &replies);
            Candidate {
                index,
                mv,
                child,
                replies,
                weight,
            }
        })
        .collect();

    if let Some((index, _)) = top {
        out[index].weight += CACHED_BEST_BONUS;
    }
    out.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    out
}

fn static_weight(mv: &Move, was_king: bool, replies: &[Move]) -> f32 {
    let mut weight = 0.0;
    if mv.promoted && !was_king {
        weight += PROMOTION_BONUS;
    }
    if mv.promoted {
        weight += KING_MOVE_BONUS;
    }
    weight += match mv.captures.len() {
        0 => 0.0,
        1 => SINGLE_CAPTURE_BONUS,
        n => CHAIN_CAPTURE_BONUS * n as f32,
    };
    let exposed: usize = replies.iter().map(|r| r.captures.len()).sum();
    weight - EXPOSURE_PENALTY * exposed as f32
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
