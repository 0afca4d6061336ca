//! Predictive-guidance hooks.
//!
//! These algorithms are placeholders for a learned ranking that would replace
//! the static-heuristic ranking step of branch-limited search: one ranking
//! from the state alone, one from the state plus auxiliary per-state
//! features. Neither model exists yet, so both run branch-limited search and
//! report the fallback on the result and in the log.

use crate::algorithm::Algorithm;
use crate::engine::{Evaluated, Search};
use crate::result::GuidanceFallback;
use gametree_core::Result;
use rand::Rng;
use tracing::warn;

impl<'a, S, R: Rng> Search<'a, S, R> {
    pub(crate) fn predictive_branch_limited(
        &mut self,
        state: &S,
        depth: usize,
        maximizing: bool,
    ) -> Result<Evaluated<S>> {
        self.fall_back(Algorithm::PredictiveBranchLimited);
        self.branch_limited(state, depth, maximizing)
    }

    pub(crate) fn multi_input_predictive_branch_limited(
        &mut self,
        state: &S,
        depth: usize,
        maximizing: bool,
    ) -> Result<Evaluated<S>> {
        self.fall_back(Algorithm::MultiInputPredictiveBranchLimited);
        self.branch_limited(state, depth, maximizing)
    }

    fn fall_back(&mut self, requested: Algorithm) {
        warn!(
            algorithm = %requested,
            fallback = %Algorithm::BranchLimited,
            "predictive ranking not implemented, falling back"
        );
        self.fallback = Some(GuidanceFallback {
            requested,
            used: Algorithm::BranchLimited,
        });
    }
}
