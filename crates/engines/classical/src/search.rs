//! Iterative-deepening alpha-beta search.
//!
//! Values are minimax values from the point of view of the searching
//! `player`, not negamax: the player's nodes maximize and the opponent's
//! minimize. The transposition table is keyed by the board hash with the
//! side-relative flag set when the player is to move.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use checkers_core::{Board, Move, SearchLimits, Side};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::SearchConfig;
use crate::eval::Evaluator;
use crate::ordering::{order_moves, Candidate};
use crate::tt::{window, TranspositionTable, TERMINAL_DEPTH};

/// Value of a won position; a lost one is its negation.
pub const WIN_SCORE: f32 = 1e6;

/// Relative margin below the incumbent at which root windows open, so that
/// root moves equal to the incumbent come back exact.
const TIE_EPSILON: f32 = 1e-3;

/// Search state for one player, kept across the moves of a game so the
/// transposition table carries over.
pub struct Search {
    board: Board,
    player: Side,
    config: SearchConfig,
    evaluator: Evaluator,
    table: Mutex<TranspositionTable>,
    nodes: AtomicU64,
    rng: StdRng,
    score: f32,
    best: Option<Move>,
    line: Vec<Move>,
    depth: u8,
    total_nodes: u64,
}

impl Search {
    pub fn new(board: Board, player: Side, config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            board,
            player,
            evaluator: Evaluator::new(config.weights.clone()),
            table: Mutex::new(TranspositionTable::new(config.table_lifetime)),
            nodes: AtomicU64::new(0),
            rng,
            score: 0.0,
            best: None,
            line: Vec::new(),
            depth: 0,
            total_nodes: 0,
            config,
        }
    }

    /// Replace the position to search. The table is kept.
    pub fn update_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.config.max_depth = limits.max_depth;
        self.config.node_budget = limits.node_budget;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> Side {
        self.player
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Score of the last search, from the player's point of view.
    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn best_move(&self) -> Option<&Move> {
        self.best.as_ref()
    }

    /// Expected line of play found by the last completed pass.
    pub fn principal_line(&self) -> &[Move] {
        &self.line
    }

    /// Depth of the last completed pass.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Nodes visited by the last search, over all its passes.
    pub fn nodes(&self) -> u64 {
        self.total_nodes
    }

    pub fn table_len(&self) -> usize {
        self.table().len()
    }

    /// Search the current board with `turn` to move, deepening from one ply
    /// until the score is decisive, the node budget of a pass is spent or the
    /// depth limit is reached.
    pub fn compute_score(&mut self, turn: Side, verbose: bool) -> (Option<Move>, f32) {
        self.table().age_and_evict();
        self.total_nodes = 0;
        self.best = None;
        self.line.clear();
        self.depth = 0;

        let limits = self.config.limits();
        for depth in 1..=limits.max_depth.max(1) {
            let (best, score) = self.search_depth(turn, depth);
            let pass_nodes = self.nodes.load(Ordering::Relaxed);
            self.total_nodes += pass_nodes;

            let line = self
                .line
                .iter()
                .map(Move::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            if verbose {
                info!("depth {depth}: score {score:.3}, {pass_nodes} nodes, line {line}");
            } else {
                debug!("depth {depth}: score {score:.3}, {pass_nodes} nodes, line {line}");
            }

            if best.is_none()
                || score.abs() > self.config.decisive_score
                || limits.budget_spent(pass_nodes)
            {
                break;
            }
        }
        debug!("table holds {} positions", self.table_len());

        (self.best.clone(), self.score)
    }

    /// One fixed-depth pass from the current board, without aging the table.
    pub fn search_depth(&mut self, turn: Side, depth: u8) -> (Option<Move>, f32) {
        self.nodes.store(0, Ordering::Relaxed);
        let depth = depth.max(1);
        let (best, score) = self.search_root(turn, depth);

        self.best = best.clone();
        self.score = score;
        self.depth = depth;
        self.line = self.trace_line(turn, depth);
        (best, score)
    }

    fn search_root(&mut self, turn: Side, depth: u8) -> (Option<Move>, f32) {
        let board = self.board;
        let maximizing = turn == self.player;
        let moves = board.compute_moves_with(turn, self.config.capture_rule);
        if moves.is_empty() {
            let value = self.terminal_value(turn);
            self.store(self.key(&board, turn), TERMINAL_DEPTH, (value, value), value);
            return (None, value);
        }

        let candidates = self.order(&board, moves, turn);
        // Indexed by generation order.
        let mut values: Vec<Option<(Move, f32)>> = vec![None; candidates.len()];

        if self.config.parallel {
            let this = &*self;
            let results: Vec<(usize, Move, f32)> = candidates
                .into_par_iter()
                .map(|c| {
                    let value = this.visit_child(
                        c.child,
                        turn,
                        depth,
                        &c.mv,
                        f32::NEG_INFINITY,
                        f32::INFINITY,
                        c.replies,
                    );
                    (c.index, c.mv, value)
                })
                .collect();
            for (index, mv, value) in results {
                values[index] = Some((mv, value));
            }
        } else {
            let mut incumbent: Option<f32> = None;
            for c in candidates {
                let (alpha, beta) = match incumbent {
                    None => (f32::NEG_INFINITY, f32::INFINITY),
                    Some(v) if maximizing => (v - TIE_EPSILON * v.abs().max(1.0), f32::INFINITY),
                    Some(v) => (f32::NEG_INFINITY, v + TIE_EPSILON * v.abs().max(1.0)),
                };
                let value = self.visit_child(c.child, turn, depth, &c.mv, alpha, beta, c.replies);
                incumbent = Some(match incumbent {
                    Some(v) if maximizing => v.max(value),
                    Some(v) => v.min(value),
                    None => value,
                });
                values[c.index] = Some((c.mv, value));
            }
        }

        let (best, score) = self.select(values.into_iter().flatten(), maximizing);
        self.store(self.key(&board, turn), depth, (score, score), score);
        (best, score)
    }

    /// Pick the best root move in generation order. Equal values replace the
    /// incumbent with the configured probability.
    fn select(&mut self, values: impl Iterator<Item = (Move, f32)>, maximizing: bool) -> (Option<Move>, f32) {
        let p = self.config.tie_break_probability;
        let mut best: Option<(Move, f32)> = None;
        for (mv, value) in values {
            debug!("root move {mv} = {value:.3}");
            trace!("\n{}", mv.repr());
            let replace = match &best {
                None => true,
                Some((_, b)) if value == *b => p > 0.0 && self.rng.gen::<f32>() < p,
                Some((_, b)) if maximizing => value > *b,
                Some((_, b)) => value < *b,
            };
            if replace {
                best = Some((mv, value));
            }
        }
        match best {
            Some((mv, value)) => (Some(mv), value),
            None => (None, self.terminal_value(self.player)),
        }
    }

    /// Search the position after `mv`, extending a capture that would
    /// otherwise end on the horizon.
    #[allow(clippy::too_many_arguments)]
    fn visit_child(
        &self,
        child: Board,
        turn: Side,
        depth: u8,
        mv: &Move,
        alpha: f32,
        beta: f32,
        replies: Vec<Move>,
    ) -> f32 {
        let mut next_depth = depth - 1;
        if mv.is_capture() && next_depth == 0 {
            next_depth = 1;
        }
        let next = turn.other();
        self.evaluate(child, next, next_depth, alpha, beta, next == self.player, Some(replies))
    }

    /// Alpha-beta value of `board` with `turn` to move and `depth` plies
    /// left. `replies` are `turn`'s moves if the caller already has them.
    #[allow(clippy::too_many_arguments)]
    fn evaluate(
        &self,
        board: Board,
        turn: Side,
        depth: u8,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
        replies: Option<Vec<Move>>,
    ) -> f32 {
        self.nodes.fetch_add(1, Ordering::Relaxed);

        let key = self.key(&board, turn);
        if self.config.use_table {
            let cached = self.table().lookup(key);
            if let Some(value) = cached.and_then(|e| e.cutoff(depth, alpha, beta, self.config.reuse_deeper)) {
                return value;
            }
        }

        let moves = replies.unwrap_or_else(|| board.compute_moves_with(turn, self.config.capture_rule));
        if moves.is_empty() {
            let value = self.terminal_value(turn);
            self.store(key, TERMINAL_DEPTH, (value, value), value);
            return value;
        }

        if depth == 0 {
            let value = self.evaluator.score(&board, turn, self.player, &moves);
            self.store(key, 0, (value, value), value);
            return value;
        }

        let (alpha0, beta0) = (alpha, beta);
        let candidates = self.order(&board, moves, turn);

        let mut value = if maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
        for c in candidates {
            let child = self.visit_child(c.child, turn, depth, &c.mv, alpha, beta, c.replies);
            if maximizing {
                value = value.max(child);
                alpha = alpha.max(value);
            } else {
                value = value.min(child);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        self.store(key, depth, window(value, alpha0, beta0), value);
        value
    }

    fn order(&self, board: &Board, moves: Vec<Move>, turn: Side) -> Vec<Candidate> {
        let next = turn.other();
        order_moves(
            board,
            moves,
            turn,
            self.config.capture_rule,
            turn == self.player,
            |child| self.cached_value(child, next),
        )
    }

    /// Follow the best cached child from the current board.
    fn trace_line(&self, turn: Side, depth: u8) -> Vec<Move> {
        let mut line = Vec::with_capacity(depth as usize);
        let mut board = self.board;
        let mut turn = turn;
        for _ in 0..depth {
            let prefer_high = turn == self.player;
            let mut best: Option<(Move, Board, f32)> = None;
            for mv in board.compute_moves_with(turn, self.config.capture_rule) {
                let child = board.perform_move(&mv, turn);
                let Some(value) = self.cached_value(&child, turn.other()) else {
                    continue;
                };
                let better = match &best {
                    None => true,
                    Some((_, _, b)) if prefer_high => value > *b,
                    Some((_, _, b)) => value < *b,
                };
                if better {
                    best = Some((mv, child, value));
                }
            }
            let Some((mv, child, _)) = best else {
                break;
            };
            line.push(mv);
            board = child;
            turn = turn.other();
        }
        line
    }

    fn cached_value(&self, board: &Board, turn: Side) -> Option<f32> {
        if !self.config.use_table {
            return None;
        }
        self.table().value(self.key(board, turn))
    }

    fn terminal_value(&self, turn: Side) -> f32 {
        if turn == self.player {
            -WIN_SCORE
        } else {
            WIN_SCORE
        }
    }

    #[inline]
    fn key(&self, board: &Board, turn: Side) -> u64 {
        board.hash_key(turn == self.player)
    }

    fn store(&self, key: u64, depth: u8, window: (f32, f32), value: f32) {
        if self.config.use_table {
            self.table().store(key, depth, window, value);
        }
    }

    fn table(&self) -> MutexGuard<'_, TranspositionTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
