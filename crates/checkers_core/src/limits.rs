//! Effort limits shared by every engine.
//!
//! Searches are never interrupted mid-pass. Limits are checked between
//! iterative-deepening passes: a pass is started only while the depth limit
//! allows it, and no further pass starts once the node budget is spent.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: u8 = 16;
pub const DEFAULT_NODE_BUDGET: u64 = 3_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Deepest iterative-deepening pass, in plies.
    pub max_depth: u8,
    /// Node count of one pass after which deepening stops.
    pub node_budget: u64,
}

impl SearchLimits {
    /// Create limits with only a depth constraint.
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            node_budget: u64::MAX,
        }
    }

    /// Create limits with only a node budget.
    pub fn nodes(node_budget: u64) -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            node_budget,
        }
    }

    /// Whether a pass that visited `nodes` nodes should be the last one.
    #[inline]
    pub fn budget_spent(&self, nodes: u64) -> bool {
        nodes > self.node_budget
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            node_budget: DEFAULT_NODE_BUDGET,
        }
    }
}
