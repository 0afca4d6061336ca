//! Search scores with enforced comparability.
//!
//! A [`Score`] wraps an `f64` that is guaranteed not to be NaN, so every pair
//! of scores produced during a search can be ordered.

use crate::{Result, SearchError};
use std::cmp::Ordering;

/// A position evaluation.
///
/// Invariant: never NaN. Two sentinels mark decisive outcomes:
/// - [`Score::WIN`] (+∞): the player to move has won
/// - [`Score::LOSS`] (−∞): the player to move has lost
/// - [`Score::DRAW`] (0): neutral or drawn
///
/// # Example
/// ```
/// use gametree_core::Score;
///
/// let score = Score::new(3.5).unwrap();
/// assert!(score < Score::WIN);
/// assert!(Score::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Score(f64);

impl Score {
    /// Definite win for the player to move.
    pub const WIN: Self = Self(f64::INFINITY);

    /// Definite loss for the player to move.
    pub const LOSS: Self = Self(f64::NEG_INFINITY);

    /// Neutral or drawn outcome.
    pub const DRAW: Self = Self(0.0);

    /// Create a new score.
    ///
    /// # Errors
    /// Returns `SearchError::NonComparableScore` if the value is NaN.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(SearchError::NonComparableScore(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Negate the score (for the opponent's perspective).
    pub fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Check if this is the win sentinel.
    pub fn is_win(self) -> bool {
        self.0 == f64::INFINITY
    }

    /// Check if this is the loss sentinel.
    pub fn is_loss(self) -> bool {
        self.0 == f64::NEG_INFINITY
    }

    /// Check if this is either sentinel.
    pub fn is_decisive(self) -> bool {
        self.0.is_infinite()
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

// NaN is rejected at construction, so `==` on the inner value is reflexive.
impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        // 0.0 and -0.0 compare equal here, unlike `f64::total_cmp`.
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

impl std::ops::Neg for Score {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_win() {
            write!(f, "+inf")
        } else if self.is_loss() {
            write!(f, "-inf")
        } else {
            write!(f, "{:.3}", self.0)
        }
    }
}

impl From<Score> for f64 {
    fn from(s: Score) -> f64 {
        s.0
    }
}

impl TryFrom<f64> for Score {
    type Error = SearchError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}
