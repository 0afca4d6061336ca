//! Search results.

use crate::algorithm::Algorithm;
use gametree_core::Score;
use serde::{Deserialize, Serialize};

/// What a search selected at the state it was given.
#[derive(Clone, Debug, PartialEq)]
pub enum Choice<S> {
    /// A direct one-ply successor of the searched state.
    Child(S),

    /// Depth ran out or the state was terminal: the value is the static
    /// evaluation of the searched state itself.
    Horizon,

    /// The state is not terminal but has no successors.
    NoMoves,
}

impl<S> Choice<S> {
    /// The chosen successor, if any.
    pub fn child(&self) -> Option<&S> {
        match self {
            Choice::Child(state) => Some(state),
            Choice::Horizon | Choice::NoMoves => None,
        }
    }

    /// Consume the choice, returning the chosen successor, if any.
    pub fn into_child(self) -> Option<S> {
        match self {
            Choice::Child(state) => Some(state),
            Choice::Horizon | Choice::NoMoves => None,
        }
    }
}

/// Counters gathered during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Recursive calls entered, root included.
    pub nodes: u64,

    /// Nodes whose successors were generated.
    pub expansions: u64,

    /// Heuristic calls producing a node's value (horizon or no moves).
    pub leaf_evaluations: u64,

    /// Heuristic calls used only to rank children for branch limiting.
    pub ranking_evaluations: u64,

    /// Sibling loops cut short by alpha-beta.
    pub cutoffs: u64,
}

/// Signal that a guidance variant ran its fallback instead of a learned
/// ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceFallback {
    /// The algorithm the engine was configured with.
    pub requested: Algorithm,

    /// The algorithm that actually ran.
    pub used: Algorithm,
}

/// Result of a search.
#[derive(Clone, Debug)]
pub struct SearchResult<S> {
    /// Value of the searched state.
    pub value: Score,

    /// Selected successor, or why there is none.
    pub choice: Choice<S>,

    /// Counters for this search.
    pub stats: SearchStats,

    /// Set when a guidance hook fell back to branch-limited search.
    pub fallback: Option<GuidanceFallback>,
}

impl<S> SearchResult<S> {
    /// The move to play: the chosen successor of the root.
    ///
    /// `None` for a zero-depth or terminal root and for a root without
    /// successors.
    pub fn best_move(&self) -> Option<&S> {
        self.choice.child()
    }

    /// Consume the result, returning the move to play.
    pub fn into_best_move(self) -> Option<S> {
        self.choice.into_child()
    }

    /// True when the result came from a guidance fallback.
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}
