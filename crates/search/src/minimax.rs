//! Plain minimax.
//!
//! Exhaustive: every child of every node is searched. All children sharing
//! the best value are kept and one of them is drawn at random, which makes
//! this variant the reference the pruned variants are checked against.

use crate::engine::{compare, Evaluated, Search};
use crate::result::Choice;
use gametree_core::{Result, Score};
use rand::Rng;
use std::cmp::Ordering;

impl<'a, S, R: Rng> Search<'a, S, R> {
    pub(crate) fn minimax(
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

        self.minimax_over(children, depth, maximizing, Self::minimax)
    }

    /// Search every child with `recurse` and pick uniformly among the best.
    ///
    /// Shared with branch-limited search, which calls it on the children that
    /// survive ranking.
    pub(crate) fn minimax_over(
        &mut self,
        children: Vec<S>,
        depth: usize,
        maximizing: bool,
        recurse: fn(&mut Self, &S, usize, bool) -> Result<Evaluated<S>>,
    ) -> Result<Evaluated<S>> {
        let mut best: Option<Score> = None;
        let mut tied: Vec<usize> = Vec::new();

        for (index, child) in children.iter().enumerate() {
            let value = recurse(self, child, depth - 1, !maximizing)?.value;

            match best.map(|b| compare(value, b, maximizing)) {
                None | Some(Ordering::Greater) => {
                    best = Some(value);
                    tied.clear();
                    tied.push(index);
                }
                Some(Ordering::Equal) => tied.push(index),
                Some(Ordering::Less) => {}
            }
        }

        let value = match best {
            Some(value) => value,
            // Callers never pass an empty child list.
            None if maximizing => Score::LOSS,
            None => Score::WIN,
        };
        let choice = self.pick_tied(children, &tied);
        Ok(Evaluated { value, choice })
    }
}
