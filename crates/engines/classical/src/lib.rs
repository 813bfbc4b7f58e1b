//! Classical Checkers Engine
//!
//! Iterative-deepening alpha-beta search over a transposition table, with a
//! weighted material and placement evaluation.
//! This is the baseline engine for comparison with other approaches.

pub mod config;
mod eval;
mod ordering;
mod search;
mod tt;

use checkers_core::{Board, Engine, SearchLimits, SearchResult, Side};

pub use config::{ConfigError, PhaseWeights, SearchConfig, WeightProfile};
pub use eval::Evaluator;
pub use search::{Search, WIN_SCORE};
pub use tt::{Entry, TranspositionTable, TERMINAL_DEPTH};

/// Classical checkers engine using minimax with alpha-beta pruning.
///
/// This engine uses:
/// - Iterative deepening until a decisive score or the node budget
/// - A transposition table aged between moves, not cleared
/// - Heuristic move ordering
/// - Optional rayon fan-out over root moves
///
/// The [`Search`] is kept while the engine plays the same side, so cached
/// results carry over between the moves of a game.
#[derive(Default)]
pub struct ClassicalEngine {
    config: SearchConfig,
    search: Option<Search>,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            search: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, board: &Board, side: Side, limits: SearchLimits) -> SearchResult {
        let search = match &mut self.search {
            Some(search) if search.player() == side => {
                search.update_board(*board);
                search
            }
            slot => slot.insert(Search::new(*board, side, self.config.clone())),
        };
        search.set_limits(limits);

        let (best_move, score) = search.compute_score(side, false);
        SearchResult {
            best_move,
            score,
            depth: search.depth(),
            nodes: search.nodes(),
        }
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }

    fn new_game(&mut self) {
        self.search = None;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        let applied = match name.to_ascii_lowercase().as_str() {
            "parallel" => value.parse().map(|v| self.config.parallel = v).is_ok(),
            "usetable" => value.parse().map(|v| self.config.use_table = v).is_ok(),
            "reusedeeper" => value.parse().map(|v| self.config.reuse_deeper = v).is_ok(),
            "tiebreak" => value
                .parse::<f32>()
                .ok()
                .filter(|p| (0.0..=1.0).contains(p))
                .map(|p| self.config.tie_break_probability = p)
                .is_some(),
            "seed" => value.parse().map(|v| self.config.seed = Some(v)).is_ok(),
            _ => false,
        };
        if applied {
            self.search = None;
        }
        applied
    }
}
