//! Position evaluation
//!
//! Contains:
//! - The three-valued [`Score`] returned by the recursive evaluator
//! - A bounded memoization cache keyed on board contents
//! - The depth-limited minimax evaluator itself

pub mod cache;
pub mod minimax;

pub use cache::{CacheKey, ScoreCache};
pub use minimax::Evaluator;

use crate::board::Mark;
use crate::rules::Outcome;

/// Evaluation result from the viewpoint of one mark.
///
/// The derived ordering ranks `Loss < Draw < Win`, which is what the
/// minimax folds compare with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Score {
    Loss = -1,
    Draw = 0,
    Win = 1,
}

impl Score {
    /// The same result seen from the other side.
    #[inline]
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Score::Loss => Score::Win,
            Score::Draw => Score::Draw,
            Score::Win => Score::Loss,
        }
    }

    /// Numeric value: -1, 0 or 1.
    #[inline]
    #[must_use]
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Score of a finished position for `maximizing`, or `None` while
    /// the game is still ongoing.
    #[must_use]
    pub fn from_outcome(outcome: Outcome, maximizing: Mark) -> Option<Self> {
        match outcome {
            Outcome::Ongoing => None,
            Outcome::Draw => Some(Score::Draw),
            Outcome::Win(mark) if mark == maximizing => Some(Score::Win),
            Outcome::Win(_) => Some(Score::Loss),
        }
    }
}
