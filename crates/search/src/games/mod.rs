//! Reference games for engine validation.
//!
//! These games are used to check the search variants against known answers
//! before pointing the engine at a real rules engine.

pub mod tictactoe;
pub mod tree;

pub use tictactoe::{Player, TicTacToe, TicTacToeAction, TicTacToeState};
pub use tree::{GameTree, NodeId};
