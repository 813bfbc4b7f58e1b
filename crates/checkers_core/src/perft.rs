use crate::{board::Board, movegen::legal_moves_into, moves::Move, types::*};

/// Pure perft node count.
/// Counts all positions reachable from `board` with `side` to move after
/// exactly `depth` plies.
pub fn perft(board: &Board, side: Side, depth: u8, rule: CaptureRule) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(board: &Board, side: Side, depth: u8, rule: CaptureRule, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let Some((buf, rest)) = layers.split_first_mut() else {
            return 0;
        };

        legal_moves_into(board, side, rule, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter() {
            let next = board.perform_move(mv, side);
            nodes += inner(&next, side.other(), depth - 1, rule, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(32); depth as usize];
    inner(board, side, depth, rule, &mut layers[..])
}
