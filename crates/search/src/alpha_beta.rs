//! Alpha-beta pruning, fail-hard and fail-soft.
//!
//! Both variants thread an `[alpha, beta]` window through the recursion and
//! track a single best child per node: the first one that strictly improves
//! on the best value so far. Neither breaks ties at random.
//!
//! - Fail-hard narrows the window after each child and stops scanning
//!   siblings once it closes, returning the best value found so far. The
//!   value is not clamped to the window.
//! - Fail-soft returns the moment the best value escapes the window, with the
//!   child that caused it and its raw value, so callers running aspiration
//!   windows can see how far outside the bound the true value lies.

use crate::engine::{compare, Evaluated, Search};
use crate::result::Choice;
use gametree_core::{Result, Score};
use rand::Rng;
use std::cmp::Ordering;
use tracing::trace;

impl<'a, S, R: Rng> Search<'a, S, R> {
    pub(crate) fn fail_hard_alpha_beta(
        &mut self,
        state: &S,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<Evaluated<S>> {
        if let Some(leaf) = self.visit(state, depth)? {
            return Ok(leaf);
        }

        let mut children = self.expand(state);
        if children.is_empty() {
            return self.leaf(state, depth, Choice::NoMoves);
        }

        let mut best: Option<(Score, usize)> = None;
        for (index, child) in children.iter().enumerate() {
            let value = self
                .fail_hard_alpha_beta(child, depth - 1, alpha, beta, !maximizing)?
                .value;
            let best_value = improve(&mut best, value, index, maximizing);

            let closed = if maximizing {
                alpha = alpha.max(best_value);
                alpha >= beta
            } else {
                beta = beta.min(best_value);
                beta <= alpha
            };
            if closed {
                self.stats.cutoffs += 1;
                trace!(depth, index, %alpha, %beta, "fail-hard cutoff");
                break;
            }
        }

        Ok(settle(&mut children, best))
    }

    pub(crate) fn fail_soft_alpha_beta(
        &mut self,
        state: &S,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<Evaluated<S>> {
        if let Some(leaf) = self.visit(state, depth)? {
            return Ok(leaf);
        }

        let mut children = self.expand(state);
        if children.is_empty() {
            return self.leaf(state, depth, Choice::NoMoves);
        }

        let mut best: Option<(Score, usize)> = None;
        for (index, child) in children.iter().enumerate() {
            let value = self
                .fail_soft_alpha_beta(child, depth - 1, alpha, beta, !maximizing)?
                .value;
            let best_value = improve(&mut best, value, index, maximizing);

            let escaped = if maximizing {
                best_value >= beta
            } else {
                best_value <= alpha
            };
            if escaped {
                self.stats.cutoffs += 1;
                trace!(depth, index, value = %best_value, %alpha, %beta, "fail-soft cutoff");
                return Ok(settle(&mut children, best));
            }

            if maximizing {
                alpha = alpha.max(best_value);
            } else {
                beta = beta.min(best_value);
            }
        }

        Ok(settle(&mut children, best))
    }
}

/// Record `value` if it strictly improves on the best so far (or is the
/// first), and return the best value.
fn improve(
    best: &mut Option<(Score, usize)>,
    value: Score,
    index: usize,
    maximizing: bool,
) -> Score {
    match *best {
        Some((best_value, _)) if compare(value, best_value, maximizing) != Ordering::Greater => {
            best_value
        }
        _ => {
            *best = Some((value, index));
            value
        }
    }
}

/// Turn the tracked best into a node result, moving the chosen child out.
fn settle<S>(children: &mut Vec<S>, best: Option<(Score, usize)>) -> Evaluated<S> {
    match best {
        Some((value, index)) => Evaluated {
            value,
            choice: Choice::Child(children.swap_remove(index)),
        },
        None => Evaluated {
            value: Score::LOSS,
            choice: Choice::NoMoves,
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::games::{GameTree, NodeId};
    use crate::{Algorithm, Engine, SearchConfig};
    use gametree_core::Score;

    fn engine(algorithm: Algorithm, tree: GameTree) -> Engine<NodeId> {
        Engine::for_rules(SearchConfig::new(algorithm), tree).unwrap()
    }

    /// Root (max) with two min children; the second is cut after its first
    /// leaf because 2 <= alpha (3).
    fn cut_tree() -> (GameTree, NodeId) {
        let mut tree = GameTree::new(0.0);
        let a = tree.add_child(GameTree::ROOT, 0.0);
        tree.add_child(a, 3.0);
        tree.add_child(a, 12.0);
        let b = tree.add_child(GameTree::ROOT, 0.0);
        tree.add_child(b, 2.0);
        tree.add_child(b, 8.0);
        (tree, a)
    }

    #[test]
    fn test_fail_hard_cuts_second_branch() {
        let (tree, a) = cut_tree();
        let result = engine(Algorithm::FailHardAlphaBeta, tree)
            .find_best_move(&GameTree::ROOT, 2)
            .unwrap();

        assert_eq!(result.value, Score::new(3.0).unwrap());
        assert_eq!(result.best_move(), Some(&a));
        assert_eq!(result.stats.leaf_evaluations, 3);
        assert_eq!(result.stats.cutoffs, 1);
    }

    #[test]
    fn test_fail_soft_cuts_second_branch() {
        let (tree, a) = cut_tree();
        let result = engine(Algorithm::FailSoftAlphaBeta, tree)
            .find_best_move(&GameTree::ROOT, 2)
            .unwrap();

        assert_eq!(result.value, Score::new(3.0).unwrap());
        assert_eq!(result.best_move(), Some(&a));
        assert_eq!(result.stats.leaf_evaluations, 3);
    }

    #[test]
    fn test_first_strict_improvement_wins_ties() {
        let mut tree = GameTree::new(0.0);
        let first = tree.add_child(GameTree::ROOT, 9.0);
        tree.add_child(GameTree::ROOT, 9.0);
        tree.add_child(GameTree::ROOT, 5.0);

        for algorithm in [Algorithm::FailHardAlphaBeta, Algorithm::FailSoftAlphaBeta] {
            let engine = engine(algorithm, tree.clone());
            for _ in 0..10 {
                let result = engine.find_best_move(&GameTree::ROOT, 1).unwrap();
                assert_eq!(result.best_move(), Some(&first), "{}", algorithm);
            }
        }
    }

    #[test]
    fn test_fail_soft_stops_at_first_escape() {
        // At B (min, window [5, +inf]) the first leaf 1 already falls below
        // alpha, so its sibling is never looked at.
        let mut tree = GameTree::new(0.0);
        let a = tree.add_child(GameTree::ROOT, 0.0);
        tree.add_child(a, 5.0);
        let b = tree.add_child(GameTree::ROOT, 0.0);
        tree.add_child(b, 1.0);
        tree.add_child(b, 0.0);

        let result = engine(Algorithm::FailSoftAlphaBeta, tree)
            .find_best_move(&GameTree::ROOT, 2)
            .unwrap();
        assert_eq!(result.value, Score::new(5.0).unwrap());
        assert_eq!(result.best_move(), Some(&a));
        assert_eq!(result.stats.leaf_evaluations, 2);
        assert_eq!(result.stats.cutoffs, 1);
    }

    #[test]
    fn test_win_closes_window() {
        let mut tree = GameTree::new(0.0);
        let win = tree.add_child(GameTree::ROOT, f64::INFINITY);
        tree.add_child(GameTree::ROOT, 1.0);

        for algorithm in [Algorithm::FailHardAlphaBeta, Algorithm::FailSoftAlphaBeta] {
            let result = engine(algorithm, tree.clone())
                .find_best_move(&GameTree::ROOT, 1)
                .unwrap();
            assert_eq!(result.value, Score::WIN);
            assert_eq!(result.best_move(), Some(&win));
            assert_eq!(result.stats.leaf_evaluations, 1);
        }
    }
}
