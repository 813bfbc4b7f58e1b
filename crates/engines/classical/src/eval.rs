//! Static evaluation of checkers positions.

use checkers_core::{Bitboard, Board, Move, Side};

use crate::config::{PhaseWeights, WeightProfile};

/// Heuristic leaf scorer.
///
/// Scores are from `player`'s point of view: positive favors `player`.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    profile: WeightProfile,
}

impl Evaluator {
    /// The profile is trusted to be valid; see [`WeightProfile::validate`].
    pub fn new(profile: WeightProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &WeightProfile {
        &self.profile
    }

    /// Evaluate `board` with `turn` to move, given the moves `turn` has.
    ///
    /// Material and placement are summed per side; mobility adds the
    /// difference between `player`'s and the opponent's move counts.
    pub fn score(&self, board: &Board, turn: Side, player: Side, moves: &[Move]) -> f32 {
        let phase = self.profile.phase(board.piece_count());
        let own = self.side_total(board, player, phase);
        let other = self.side_total(board, player.other(), phase);

        let to_move = moves.len() as f32;
        let waiting = board.compute_moves(turn.other()).len() as f32;
        let net = if turn == player {
            to_move - waiting
        } else {
            waiting - to_move
        };

        own - other + self.profile.mobility_weight * net
    }

    /// Like [`Evaluator::score`], generating `turn`'s moves itself.
    pub fn evaluate(&self, board: &Board, turn: Side, player: Side) -> f32 {
        let moves = board.compute_moves(turn);
        self.score(board, turn, player, &moves)
    }

    fn side_total(&self, board: &Board, side: Side, phase: &PhaseWeights) -> f32 {
        let men = self.placed(board.men_of(side), side, &self.profile.men_table);
        let kings = self.placed(board.kings_of(side), side, &self.profile.king_table);

        phase.man_weight * board.men_of(side).popcount() as f32
            + phase.position_weight * men
            + phase.king_weight * board.kings_of(side).popcount() as f32
            + phase.king_position_weight * kings
    }

    /// Sum of table entries under `pieces`, black reading the board mirrored.
    fn placed(&self, pieces: Bitboard, side: Side, table: &[f32]) -> f32 {
        let scale = self.profile.table_scale;
        pieces
            .map(|sq| {
                let idx = match side {
                    Side::Red => sq as usize,
                    Side::Black => 63 - sq as usize,
                };
                table.get(idx).copied().unwrap_or(0.0) / scale
            })
            .sum()
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
