use crate::bitboard::{Bitboard, Diagonal};
use crate::board::Board;
use crate::moves::Move;
use crate::types::*;

/// Generate every move for `side`, returning a freshly allocated vector.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    legal_moves_with(board, side, CaptureRule::Optional)
}

pub fn legal_moves_with(board: &Board, side: Side, rule: CaptureRule) -> Vec<Move> {
    let mut out = Vec::with_capacity(32);
    legal_moves_into(board, side, rule, &mut out);
    out
}

/// Generate moves into the provided buffer, reusing it across calls.
///
/// Pieces are visited in ascending square order; for each piece its quiet
/// steps come first, then every capture chain it can start.
pub fn legal_moves_into(board: &Board, side: Side, rule: CaptureRule, out: &mut Vec<Move>) {
    out.clear();
    let own = board.pieces(side);
    let opp = board.pieces(side.other());

    for from in own {
        let king = board.kings().contains(from);
        gen_steps(board, from, side, king, out);

        let chain = Chain {
            origin: from,
            side,
            own,
        };
        chain.extend(from, opp, king, &[], out);
    }

    if rule == CaptureRule::Forced && out.iter().any(Move::is_capture) {
        out.retain(Move::is_capture);
        // A started chain has to be finished: drop chains that a longer
        // generated chain continues.
        let complete: Vec<bool> = out
            .iter()
            .map(|m| {
                !out.iter()
                    .any(|o| o.captures.len() > m.captures.len() && o.subset_equal(m))
            })
            .collect();
        let mut keep = complete.into_iter();
        out.retain(|_| keep.next().unwrap_or(true));
    }
}

fn gen_steps(board: &Board, from: u8, side: Side, king: bool, out: &mut Vec<Move>) {
    let targets = Bitboard::from_square(from).step_all(Diagonal::for_piece(side, king))
        & board.empty_squares();
    for to in targets {
        let promoted = king || row_of(to) as u8 == side.promotion_row();
        out.push(Move::simple(from, to, promoted));
    }
}

/// Fixed context of one piece's capture search.
struct Chain {
    origin: u8,
    side: Side,
    /// The mover's pieces. The origin stays in here for the whole chain, so
    /// a chain can never land back on its own starting square.
    own: Bitboard,
}

impl Chain {
    /// Try every jump from `at`. Each legal jump is recorded as a move on its
    /// own and then continued with the jumped piece taken off `opponents`.
    fn extend(&self, at: u8, opponents: Bitboard, king: bool, captured: &[u8], out: &mut Vec<Move>) {
        let at_bb = Bitboard::from_square(at);
        for &dir in Diagonal::for_piece(self.side, king) {
            let over = dir.shift(at_bb) & opponents;
            if over.is_empty() {
                continue;
            }
            let landing = dir.shift(over) & Bitboard::PLAYABLE & !(self.own | opponents);
            let (Some(over_sq), Some(land_sq)) = (over.lsb(), landing.lsb()) else {
                continue;
            };

            let now_king = king || row_of(land_sq) as u8 == self.side.promotion_row();
            let mut chain = Vec::with_capacity(captured.len() + 1);
            chain.extend_from_slice(captured);
            chain.push(over_sq);

            out.push(Move::new(self.origin, land_sq, chain.clone(), now_king));
            self.extend(land_sq, opponents ^ over, now_king, &chain, out);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
