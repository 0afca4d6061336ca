//! Adversarial game-tree search.
//!
//! This crate provides a depth-limited search engine that works with any game
//! supplied as three functions (successors, terminal test, heuristic), or as a
//! `gametree_core::Rules` implementation.
//!
//! # Algorithms
//!
//! - **Minimax**: exhaustive, random tie-break among equally best moves
//! - **Fail-hard alpha-beta**: shared window, early break, unclamped value
//! - **Fail-soft alpha-beta**: returns as soon as a value escapes the window
//! - **Branch-limited**: searches only the statically best `branch_limit`
//!   children at each node
//! - **Predictive guidance hooks**: reserved for learned ranking; currently
//!   fall back to branch-limited search and say so on the result
//!
//! # Example
//!
//! ```
//! use gametree_core::Rules;
//! use gametree_search::{games::TicTacToe, Algorithm, Engine, Perspective, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = TicTacToe;
//! let state = game.initial_state();
//!
//! let config =
//!     SearchConfig::new(Algorithm::FailSoftAlphaBeta).with_perspective(Perspective::Root);
//! let engine = Engine::for_rules(config, game).expect("valid config");
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let result = engine.find_best_move_with_rng(&state, 4, &mut rng).unwrap();
//! println!("Value: {}", result.value);
//! println!("Next position:\n{}", result.best_move().unwrap());
//! ```

pub mod algorithm;
mod alpha_beta;
mod branch_limited;
pub mod config;
pub mod engine;
pub mod games;
mod guidance;
mod minimax;
pub mod result;

pub use algorithm::Algorithm;
pub use config::{Perspective, SearchConfig, DEFAULT_BRANCH_LIMIT};
pub use engine::Engine;
pub use result::{Choice, GuidanceFallback, SearchResult, SearchStats};
