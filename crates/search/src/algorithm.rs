//! Search algorithm selector.

use gametree_core::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of search strategies an engine can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Exhaustive minimax with a random tie-break among best children.
    #[serde(rename = "min_max")]
    Minimax,

    /// Alpha-beta with a shared window and early break.
    #[serde(rename = "fail_hard_alpha_beta")]
    FailHardAlphaBeta,

    /// Alpha-beta returning as soon as a child escapes the window.
    #[serde(rename = "fail_soft_alpha_beta")]
    FailSoftAlphaBeta,

    /// Minimax over the statically best `branch_limit` children only.
    #[serde(rename = "branching_limit")]
    BranchLimited,

    /// Reserved for a learned ranking step; runs `BranchLimited` for now.
    #[serde(rename = "pred_blminmax")]
    PredictiveBranchLimited,

    /// Reserved for a learned ranking over state plus auxiliary features;
    /// runs `BranchLimited` for now.
    #[serde(rename = "multi_input_pred_blminmax")]
    MultiInputPredictiveBranchLimited,
}

impl Algorithm {
    /// Every algorithm, in declaration order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Minimax,
        Algorithm::FailHardAlphaBeta,
        Algorithm::FailSoftAlphaBeta,
        Algorithm::BranchLimited,
        Algorithm::PredictiveBranchLimited,
        Algorithm::MultiInputPredictiveBranchLimited,
    ];

    /// The string tag used on the command line and in records.
    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::Minimax => "min_max",
            Algorithm::FailHardAlphaBeta => "fail_hard_alpha_beta",
            Algorithm::FailSoftAlphaBeta => "fail_soft_alpha_beta",
            Algorithm::BranchLimited => "branching_limit",
            Algorithm::PredictiveBranchLimited => "pred_blminmax",
            Algorithm::MultiInputPredictiveBranchLimited => "multi_input_pred_blminmax",
        }
    }

    /// True for the guidance hooks that currently fall back to `BranchLimited`.
    pub fn is_guided(self) -> bool {
        matches!(
            self,
            Algorithm::PredictiveBranchLimited | Algorithm::MultiInputPredictiveBranchLimited
        )
    }

    /// True if the algorithm consults `branch_limit`.
    pub fn uses_branch_limit(self) -> bool {
        self == Algorithm::BranchLimited || self.is_guided()
    }

    fn valid_tags() -> String {
        Self::ALL
            .iter()
            .map(|a| a.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.tag() == s)
            .ok_or_else(|| SearchError::UnknownAlgorithm {
                tag: s.to_string(),
                valid: Self::valid_tags(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_parse_back() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.tag().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_unknown_tag_names_valid_set() {
        let err = "negamax".parse::<Algorithm>().unwrap_err();
        assert!(err.is_configuration());

        let message = err.to_string();
        assert!(message.contains("negamax"));
        for algorithm in Algorithm::ALL {
            assert!(message.contains(algorithm.tag()), "missing {}", algorithm);
        }
    }

    #[test]
    fn test_guided_algorithms() {
        assert!(Algorithm::PredictiveBranchLimited.is_guided());
        assert!(Algorithm::MultiInputPredictiveBranchLimited.is_guided());
        assert!(!Algorithm::BranchLimited.is_guided());
        assert!(Algorithm::BranchLimited.uses_branch_limit());
        assert!(!Algorithm::Minimax.uses_branch_limit());
    }

    #[test]
    fn test_display_matches_tag() {
        assert_eq!(Algorithm::FailSoftAlphaBeta.to_string(), "fail_soft_alpha_beta");
    }

    #[test]
    fn test_serde_uses_tags() {
        for algorithm in Algorithm::ALL {
            let json = serde_json::to_string(&algorithm).unwrap();
            assert_eq!(json, format!("\"{}\"", algorithm.tag()));
            assert_eq!(serde_json::from_str::<Algorithm>(&json).unwrap(), algorithm);
        }
        assert_eq!(serde_json::to_string(&Algorithm::Minimax).unwrap(), "\"min_max\"");
        assert!(serde_json::from_str::<Algorithm>("\"Minimax\"").is_err());
    }
}
