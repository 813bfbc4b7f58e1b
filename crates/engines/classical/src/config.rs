//! Engine configuration: search knobs and the evaluator's weight profile.
//!
//! Everything deserializes from TOML with per-field defaults, so a config
//! file only has to name what it changes:
//!
//! ```toml
//! max_depth = 10
//! parallel = true
//!
//! [weights.endgame]
//! man_weight = 1.2
//! position_weight = 0.0
//! king_weight = 2.5
//! king_position_weight = 0.3
//! ```

use std::path::{Path, PathBuf};

use checkers_core::{CaptureRule, SearchLimits, BOARD_SIZE, DEFAULT_MAX_DEPTH, DEFAULT_NODE_BUDGET};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{name} table has {len} entries, expected 64")]
    TableSize { name: &'static str, len: usize },
    #[error("table scale must be positive, got {0}")]
    TableScale(f32),
    #[error("tie break probability must lie in [0, 1], got {0}")]
    TieBreak(f32),
}

/// Weights of one game phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    /// Flat value of every man.
    pub man_weight: f32,
    /// Scale of the men positional table.
    pub position_weight: f32,
    /// Flat value of every king.
    pub king_weight: f32,
    /// Scale of the king centralization table.
    pub king_position_weight: f32,
}

/// Weight profile injected into the evaluator.
///
/// Tables are indexed by square from red's point of view (row 0 is red's
/// promotion row); black pieces read the mirrored square `63 - i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightProfile {
    /// Below this many pieces on the board the endgame weights apply.
    pub endgame_threshold: u32,
    pub mobility_weight: f32,
    /// Table entries are divided by this before weighting.
    pub table_scale: f32,
    pub men_table: Vec<f32>,
    pub king_table: Vec<f32>,
    pub middlegame: PhaseWeights,
    pub endgame: PhaseWeights,
}

#[rustfmt::skip]
const MEN_TABLE: [f32; 64] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    7.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 7.0,
    7.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 7.0,
    7.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 7.0,
    7.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 7.0,
    2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0,
    2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0,
    2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0,
];

// Centre squares are worth the most to a king.
#[rustfmt::skip]
const KING_TABLE: [f32; 64] = [
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    1.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 1.0,
    1.0, 3.0, 5.0, 5.0, 5.0, 5.0, 3.0, 1.0,
    1.0, 3.0, 5.0, 7.0, 7.0, 5.0, 3.0, 1.0,
    1.0, 3.0, 5.0, 7.0, 7.0, 5.0, 3.0, 1.0,
    1.0, 3.0, 5.0, 5.0, 5.0, 5.0, 3.0, 1.0,
    1.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 1.0,
    1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

impl Default for WeightProfile {
    fn default() -> Self {
        Self {
            middlegame: PhaseWeights {
                man_weight: 0.4,
                position_weight: 0.6,
                king_weight: 2.0,
                king_position_weight: 0.0,
            },
            endgame: PhaseWeights {
                man_weight: 1.4,
                position_weight: 0.0,
                king_weight: 2.0,
                king_position_weight: 0.2,
            },
            endgame_threshold: 14,
            mobility_weight: 0.1,
            table_scale: 9.0,
            men_table: MEN_TABLE.to_vec(),
            king_table: KING_TABLE.to_vec(),
        }
    }
}

impl WeightProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, table) in [("men", &self.men_table), ("king", &self.king_table)] {
            if table.len() != BOARD_SIZE as usize {
                return Err(ConfigError::TableSize {
                    name,
                    len: table.len(),
                });
            }
        }
        if self.table_scale.is_nan() || self.table_scale <= 0.0 {
            return Err(ConfigError::TableScale(self.table_scale));
        }
        Ok(())
    }

    /// Weights for a board holding `pieces` pieces in total.
    #[inline]
    pub fn phase(&self, pieces: u32) -> &PhaseWeights {
        if pieces < self.endgame_threshold {
            &self.endgame
        } else {
            &self.middlegame
        }
    }
}

/// Search settings of the classical engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Deepest iterative-deepening pass.
    pub max_depth: u8,
    /// Deepening stops after a pass that visits more nodes than this.
    pub node_budget: u64,
    /// Deepening stops once |score| exceeds this.
    pub decisive_score: f32,
    /// Search root moves on the rayon pool.
    pub parallel: bool,
    /// Consult and fill the transposition table.
    pub use_table: bool,
    /// Let deeper table entries cut off shallower nodes. Faster, but the
    /// chosen move may then differ from a search without the table.
    pub reuse_deeper: bool,
    /// Top-level searches an untouched table entry survives.
    pub table_lifetime: u8,
    /// Chance that an equally valued root move replaces the incumbent.
    pub tie_break_probability: f32,
    /// Seed for tie breaking; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub capture_rule: CaptureRule,
    pub weights: WeightProfile,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            node_budget: DEFAULT_NODE_BUDGET,
            decisive_score: 50.0,
            parallel: false,
            use_table: true,
            reuse_deeper: false,
            table_lifetime: 4,
            tie_break_probability: 0.3,
            seed: None,
            capture_rule: CaptureRule::Optional,
            weights: WeightProfile::default(),
        }
    }
}

impl SearchConfig {
    /// Defaults without tie randomness: equal root moves resolve to the
    /// first generated one.
    pub fn deterministic() -> Self {
        Self {
            tie_break_probability: 0.0,
            seed: Some(0),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.tie_break_probability) {
            return Err(ConfigError::TieBreak(self.tie_break_probability));
        }
        self.weights.validate()
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_depth: self.max_depth,
            node_budget: self.node_budget,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.max_depth = limits.max_depth;
        self.node_budget = limits.node_budget;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
