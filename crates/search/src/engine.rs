//! Search engine: construction, dispatch and the state shared by every
//! variant during one search.

use crate::{
    algorithm::Algorithm,
    config::{Perspective, SearchConfig},
    result::{Choice, GuidanceFallback, SearchResult, SearchStats},
};
use gametree_core::{Result, Rules, Score, SearchError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Static evaluation, mover-relative.
pub type HeuristicFn<S> = Box<dyn Fn(&S) -> f64 + Send + Sync>;

/// One-ply successor enumeration.
pub type SuccessorsFn<S> = Box<dyn Fn(&S) -> Vec<S> + Send + Sync>;

/// Terminal-state predicate.
pub type TerminalFn<S> = Box<dyn Fn(&S) -> bool + Send + Sync>;

/// Game-tree search engine.
///
/// Holds one configured algorithm and the three collaborator functions. The
/// engine is immutable once built, so a single instance can serve any number
/// of searches, including from several threads.
pub struct Engine<S> {
    config: SearchConfig,
    heuristic: HeuristicFn<S>,
    successors: SuccessorsFn<S>,
    is_terminal: TerminalFn<S>,
}

impl<S> Engine<S> {
    /// Create an engine from a config and the three collaborator functions.
    ///
    /// # Errors
    /// Returns a configuration error if the config does not validate.
    pub fn new<H, C, T>(
        config: SearchConfig,
        heuristic: H,
        successors: C,
        is_terminal: T,
    ) -> Result<Self>
    where
        H: Fn(&S) -> f64 + Send + Sync + 'static,
        C: Fn(&S) -> Vec<S> + Send + Sync + 'static,
        T: Fn(&S) -> bool + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self {
            config,
            heuristic: Box::new(heuristic),
            successors: Box::new(successors),
            is_terminal: Box::new(is_terminal),
        })
    }

    /// Create an engine from an algorithm tag such as `"fail_soft_alpha_beta"`,
    /// with default parameters.
    ///
    /// # Errors
    /// Returns `SearchError::UnknownAlgorithm`, naming every valid tag, if the
    /// tag is not recognised.
    pub fn from_tag<H, C, T>(
        tag: &str,
        heuristic: H,
        successors: C,
        is_terminal: T,
    ) -> Result<Self>
    where
        H: Fn(&S) -> f64 + Send + Sync + 'static,
        C: Fn(&S) -> Vec<S> + Send + Sync + 'static,
        T: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self::new(SearchConfig::from_tag(tag)?, heuristic, successors, is_terminal)
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The configured algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    /// Search `depth` plies below `root` and return its value and best move.
    ///
    /// Ties are broken with the thread-local RNG. Use
    /// [`Engine::find_best_move_with_rng`] for reproducible runs.
    pub fn find_best_move(&self, root: &S, depth: usize) -> Result<SearchResult<S>> {
        self.find_best_move_with_rng(root, depth, &mut rand::thread_rng())
    }

    /// Search `depth` plies below `root`, drawing tie-breaks from `rng`.
    ///
    /// The root is always searched as the maximizing side: the heuristic is
    /// already relative to the player to move.
    ///
    /// # Errors
    /// Returns `SearchError::NonComparableScore` if the heuristic yields NaN
    /// and `SearchError::NodeBudgetExhausted` if the node budget runs out.
    pub fn find_best_move_with_rng<R: Rng>(
        &self,
        root: &S,
        depth: usize,
        rng: &mut R,
    ) -> Result<SearchResult<S>> {
        let mut search = Search::new(self, rng, depth);
        let evaluated = search.run(root, depth)?;

        debug!(
            algorithm = %self.config.algorithm,
            depth,
            value = %evaluated.value,
            nodes = search.stats.nodes,
            cutoffs = search.stats.cutoffs,
            "search finished"
        );

        Ok(SearchResult {
            value: evaluated.value,
            choice: evaluated.choice,
            stats: search.stats,
            fallback: search.fallback,
        })
    }
}

impl<S: 'static> Engine<S> {
    /// Create an engine over a [`Rules`] implementation.
    ///
    /// # Errors
    /// Returns a configuration error if the config does not validate.
    pub fn for_rules<G>(config: SearchConfig, rules: G) -> Result<Self>
    where
        G: Rules<State = S> + Send + Sync + 'static,
    {
        let rules = Arc::new(rules);
        let (h, c, t) = (rules.clone(), rules.clone(), rules);
        Self::new(
            config,
            move |s: &S| h.heuristic(s),
            move |s: &S| c.successors(s),
            move |s: &S| t.is_terminal(s),
        )
    }
}

impl<S> std::fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("config", &self.config).finish()
    }
}

/// Value of a node plus what was chosen there.
pub(crate) struct Evaluated<S> {
    pub(crate) value: Score,
    pub(crate) choice: Choice<S>,
}

/// State of a single search.
///
/// The variants are implemented as methods on this type, one module each.
pub(crate) struct Search<'a, S, R> {
    pub(crate) engine: &'a Engine<S>,
    rng: &'a mut R,
    root_depth: usize,
    pub(crate) stats: SearchStats,
    pub(crate) fallback: Option<GuidanceFallback>,
}

impl<'a, S, R: Rng> Search<'a, S, R> {
    fn new(engine: &'a Engine<S>, rng: &'a mut R, root_depth: usize) -> Self {
        Self {
            engine,
            rng,
            root_depth,
            stats: SearchStats::default(),
            fallback: None,
        }
    }

    fn run(&mut self, root: &S, depth: usize) -> Result<Evaluated<S>> {
        match self.engine.config.algorithm {
            Algorithm::Minimax => self.minimax(root, depth, true),
            Algorithm::FailHardAlphaBeta => {
                self.fail_hard_alpha_beta(root, depth, Score::LOSS, Score::WIN, true)
            }
            Algorithm::FailSoftAlphaBeta => {
                self.fail_soft_alpha_beta(root, depth, Score::LOSS, Score::WIN, true)
            }
            Algorithm::BranchLimited => self.branch_limited(root, depth, true),
            Algorithm::PredictiveBranchLimited => self.predictive_branch_limited(root, depth, true),
            Algorithm::MultiInputPredictiveBranchLimited => {
                self.multi_input_predictive_branch_limited(root, depth, true)
            }
        }
    }

    /// Enter a node. Returns its static value if recursion stops here.
    pub(crate) fn visit(&mut self, state: &S, depth: usize) -> Result<Option<Evaluated<S>>> {
        self.stats.nodes += 1;
        if let Some(limit) = self.engine.config.max_nodes {
            if self.stats.nodes > limit {
                return Err(SearchError::NodeBudgetExhausted(limit));
            }
        }

        if depth == 0 || (self.engine.is_terminal)(state) {
            return self.leaf(state, depth, Choice::Horizon).map(Some);
        }
        Ok(None)
    }

    /// Generate the successors of a node.
    pub(crate) fn expand(&mut self, state: &S) -> Vec<S> {
        self.stats.expansions += 1;
        (self.engine.successors)(state)
    }

    /// Value a node statically.
    pub(crate) fn leaf(
        &mut self,
        state: &S,
        depth: usize,
        choice: Choice<S>,
    ) -> Result<Evaluated<S>> {
        self.stats.leaf_evaluations += 1;
        let raw = self.evaluate(state)?;
        let value = match self.engine.config.perspective {
            Perspective::Mover => raw,
            Perspective::Root if (self.root_depth - depth) % 2 == 1 => raw.negate(),
            Perspective::Root => raw,
        };
        Ok(Evaluated { value, choice })
    }

    /// Run the heuristic, rejecting values that cannot be ordered.
    pub(crate) fn evaluate(&self, state: &S) -> Result<Score> {
        Score::new((self.engine.heuristic)(state))
    }

    /// Draw one child uniformly from the tied-best indices.
    pub(crate) fn pick_tied(&mut self, mut children: Vec<S>, tied: &[usize]) -> Choice<S> {
        match tied.choose(&mut *self.rng) {
            Some(&index) => Choice::Child(children.swap_remove(index)),
            None => Choice::NoMoves,
        }
    }
}

/// Order `value` against `best` from the point of view of the side to move:
/// `Greater` means `value` is an improvement.
pub(crate) fn compare(value: Score, best: Score, maximizing: bool) -> Ordering {
    if maximizing {
        value.cmp(&best)
    } else {
        best.cmp(&value)
    }
}
