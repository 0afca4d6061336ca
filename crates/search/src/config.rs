//! Search configuration parameters.
//!
//! These parameters select the search strategy and bound how much of the
//! game tree it may explore.

use crate::algorithm::Algorithm;
use gametree_core::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Default number of children kept by branch-limited search.
pub const DEFAULT_BRANCH_LIMIT: usize = 5;

/// How heuristic values are combined with the maximizing flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// Heuristic values are used as returned (mover-relative) while the
    /// maximizing flag alternates every ply.
    #[default]
    Mover,

    /// Values at odd ply distance from the root are negated so every
    /// comparison happens from the root mover's point of view.
    Root,
}

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Strategy the engine dispatches to.
    pub algorithm: Algorithm,

    /// Children kept per node by the branch-limited variants.
    /// Must be positive.
    pub branch_limit: usize,

    /// How leaf values are oriented before comparison.
    pub perspective: Perspective,

    /// Maximum number of nodes a single search may enter.
    /// `None` searches without a budget.
    pub max_nodes: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Minimax,
            branch_limit: DEFAULT_BRANCH_LIMIT,
            perspective: Perspective::Mover,
            max_nodes: None,
        }
    }
}

impl SearchConfig {
    /// Create a config for the given algorithm with default parameters.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Default::default()
        }
    }

    /// Create a config from an algorithm tag such as `"min_max"`.
    ///
    /// # Errors
    /// Returns `SearchError::UnknownAlgorithm` for an unrecognised tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        Ok(Self::new(tag.parse()?))
    }

    /// Set the branch limit.
    pub fn with_branch_limit(mut self, branch_limit: usize) -> Self {
        self.branch_limit = branch_limit;
        self
    }

    /// Set the perspective.
    pub fn with_perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective;
        self
    }

    /// Set the node budget.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Check the parameters.
    ///
    /// # Errors
    /// Returns `SearchError::InvalidConfig` if `branch_limit` or
    /// `max_nodes` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.branch_limit == 0 {
            return Err(SearchError::InvalidConfig(
                "branch_limit must be positive".to_string(),
            ));
        }
        if self.max_nodes == Some(0) {
            return Err(SearchError::InvalidConfig(
                "max_nodes must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}
