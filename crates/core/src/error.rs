use thiserror::Error;

/// Errors that can occur while configuring or running a search
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Unknown algorithm '{tag}'. Choose between {valid}")]
    UnknownAlgorithm { tag: String, valid: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Heuristic returned a non-comparable score: {0}")]
    NonComparableScore(f64),

    #[error("Node budget of {0} exhausted")]
    NodeBudgetExhausted(u64),
}

impl SearchError {
    /// True for errors raised while building an engine.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SearchError::UnknownAlgorithm { .. } | SearchError::InvalidConfig(_)
        )
    }

    /// True when a collaborator broke the search contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, SearchError::NonComparableScore(_))
    }
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
