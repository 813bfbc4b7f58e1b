//! Random Move Checkers Engine
//!
//! A simple engine that selects moves uniformly at random from all legal moves.
//! Useful for:
//! - Baseline comparisons (any real engine should easily beat this)
//! - Stress testing move generation and the match runner

use checkers_core::{legal_moves_into, Board, CaptureRule, Engine, SearchLimits, SearchResult, Side};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// A checkers engine that plays random legal moves.
///
/// This engine provides no evaluation - it simply picks a random move
/// from all available legal moves. Seeding it makes a game reproducible.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    nodes: u64,
    rule: CaptureRule,
    rng: StdRng,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            nodes: 0,
            rule: CaptureRule::Optional,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// Pick only among the moves `rule` allows.
    pub fn with_rule(mut self, rule: CaptureRule) -> Self {
        self.rule = rule;
        self
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, board: &Board, side: Side, _limits: SearchLimits) -> SearchResult {
        let mut moves = Vec::with_capacity(32);
        legal_moves_into(board, side, self.rule, &mut moves);

        self.nodes = 1;

        let best_move = moves.choose(&mut self.rng).cloned();

        SearchResult {
            best_move,
            score: 0.0,
            depth: 1,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "seed" => value
                .parse()
                .map(|seed| self.rng = StdRng::seed_from_u64(seed))
                .is_ok(),
            "forcedcaptures" => value
                .parse()
                .map(|forced: bool| {
                    self.rule = if forced {
                        CaptureRule::Forced
                    } else {
                        CaptureRule::Optional
                    }
                })
                .is_ok(),
            _ => false,
        }
    }
}
