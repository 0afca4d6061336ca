//! Branch-limited minimax.
//!
//! Forward pruning: at each node the children are ranked by their static
//! evaluation and only the best `branch_limit` are searched, exactly like
//! plain minimax including its random tie-break. A child cut by the ranking
//! is never expanded, however good a deeper search would have found it.

use crate::config::Perspective;
use crate::engine::{Evaluated, Search};
use crate::result::Choice;
use gametree_core::{Result, Score};
use rand::Rng;

impl<'a, S, R: Rng> Search<'a, S, R> {
    pub(crate) fn branch_limited(
        &mut self,
        state: &S,
        depth: usize,
        maximizing: bool,
    ) -> Result<Evaluated<S>> {
        if let Some(leaf) = self.visit(state, depth)? {
            return Ok(leaf);
        }

        let children = self.expand(state);
        if children.is_empty() {
            return self.leaf(state, depth, Choice::NoMoves);
        }

        let limit = self.engine.config().branch_limit;
        let kept = if children.len() > limit {
            self.rank_children(children, limit)?
        } else {
            children
        };

        self.minimax_over(kept, depth, maximizing, Self::branch_limited)
    }

    /// Keep the `limit` children with the highest static value.
    ///
    /// The sort is stable, so equally ranked children keep their generation
    /// order.
    fn rank_children(&mut self, children: Vec<S>, limit: usize) -> Result<Vec<S>> {
        let mut ranked: Vec<(Score, S)> = Vec::with_capacity(children.len());
        for child in children {
            self.stats.ranking_evaluations += 1;
            let score = self.evaluate(&child)?;
            // A child's heuristic is relative to the opponent, who moves there.
            let score = match self.engine.config().perspective {
                Perspective::Mover => score,
                Perspective::Root => score.negate(),
            };
            ranked.push((score, child));
        }

        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(limit);
        Ok(ranked.into_iter().map(|(_, child)| child).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::games::{GameTree, NodeId};
    use crate::{Algorithm, Choice, Engine, SearchConfig};
    use gametree_core::Score;

    fn engine(branch_limit: usize, tree: GameTree) -> Engine<NodeId> {
        let config = SearchConfig::new(Algorithm::BranchLimited).with_branch_limit(branch_limit);
        Engine::for_rules(config, tree).unwrap()
    }

    #[test]
    fn test_keeps_statically_best_children() {
        let mut tree = GameTree::new(0.0);
        tree.add_child(GameTree::ROOT, 1.0);
        let b = tree.add_child(GameTree::ROOT, 6.0);
        tree.add_child(GameTree::ROOT, 4.0);
        tree.add_child(GameTree::ROOT, 2.0);

        let result = engine(2, tree).find_best_move(&GameTree::ROOT, 1).unwrap();
        assert_eq!(result.value, Score::new(6.0).unwrap());
        assert_eq!(result.choice, Choice::Child(b));
        assert_eq!(result.stats.ranking_evaluations, 4);
        // Only the 6 and the 4 are searched.
        assert_eq!(result.stats.nodes, 3);
    }

    #[test]
    fn test_excluded_child_never_expanded() {
        // A ranks low statically but hides a large value one ply down.
        let mut tree = GameTree::new(0.0);
        let a = tree.add_child(GameTree::ROOT, -5.0);
        tree.add_child(a, 50.0);
        let b = tree.add_child(GameTree::ROOT, 5.0);
        tree.add_child(b, 1.0);

        let result = engine(1, tree).find_best_move(&GameTree::ROOT, 2).unwrap();
        assert_eq!(result.choice, Choice::Child(b));
        assert_eq!(result.value, Score::new(1.0).unwrap());
        assert_eq!(result.stats.expansions, 2);
    }

    #[test]
    fn test_no_ranking_under_limit() {
        let mut tree = GameTree::new(0.0);
        tree.add_child(GameTree::ROOT, 1.0);
        tree.add_child(GameTree::ROOT, 2.0);

        let result = engine(5, tree).find_best_move(&GameTree::ROOT, 1).unwrap();
        assert_eq!(result.value, Score::new(2.0).unwrap());
        assert_eq!(result.stats.ranking_evaluations, 0);
    }

    #[test]
    fn test_ranking_rejects_nan() {
        let mut tree = GameTree::new(0.0);
        tree.add_child(GameTree::ROOT, f64::NAN);
        tree.add_child(GameTree::ROOT, 1.0);

        let err = engine(1, tree).find_best_move(&GameTree::ROOT, 1).unwrap_err();
        assert!(err.is_contract_violation());
    }
}
