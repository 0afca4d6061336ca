//! Game-tree core - collaborator contract and common types
//!
//! This crate provides the pieces shared by the search engine and the games
//! it searches over.
//!
//! # Types
//!
//! - [`Rules`] - Trait a rules engine implements to be searchable
//! - [`Score`] - Totally ordered evaluation with win/loss sentinels
//! - [`SearchError`] - Configuration and contract errors

mod error;
mod rules;
mod score;

pub use error::{Result, SearchError};
pub use rules::Rules;
pub use score::Score;
