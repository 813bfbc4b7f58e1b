pub mod bitboard;
pub mod board;
pub mod error;
pub mod limits;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use bitboard::*;
pub use board::*;
pub use error::*;
pub use limits::*;
pub use movegen::*;
pub use moves::*;
pub use perft::perft;
pub use types::*;
pub use zobrist::{ZOBRIST, position_hash};

// =============================================================================
// Engine trait — implemented by all checkers engines (classical, random, etc.)
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation from the searching side's perspective
    pub score: f32,
    /// Deepest completed iterative-deepening pass
    pub depth: u8,
    /// Number of nodes searched (optional, for stats)
    pub nodes: u64,
}

/// Trait that all checkers engines must implement.
///
/// This allows swapping the alpha-beta engine for baselines such as the
/// random mover in matches and tests.
pub trait Engine: Send {
    /// Search the position for `side` within the given limits.
    ///
    /// # Arguments
    /// * `board` - The current position to analyze
    /// * `side` - The side to move
    /// * `limits` - Search limits (depth, node budget)
    ///
    /// # Returns
    /// SearchResult containing best move, score, and statistics
    fn search(&mut self, board: &Board, side: Side, limits: SearchLimits) -> SearchResult;

    /// Returns the engine's name for identification in matches
    fn name(&self) -> &str;

    /// Returns the engine's author
    fn author(&self) -> &str {
        "ML-checkers"
    }

    /// Reset internal state for a new game (clear hash tables, history, etc.)
    fn new_game(&mut self) {}

    /// Optional: Set an engine option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
