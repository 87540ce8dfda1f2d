//! Depth-limited minimax evaluation
//!
//! Positions are scored from the maximizing mark's viewpoint by full
//! exploration of the candidate tree down to a ply cutoff. Positions
//! cut off before resolution count as draws, so deep scores are an
//! approximation of the true game value, not an exact one. There is no
//! alpha-beta pruning; the board is cloned per branch and results are
//! memoized instead.

use crate::board::{Board, Mark};
use crate::eval::{CacheKey, Score, ScoreCache};
use crate::search::CandidateGenerator;

/// Recursive evaluator owning its candidate generator and memo cache.
///
/// # Example
///
/// ```
/// use connectk::board::{Board, Mark};
/// use connectk::eval::{Evaluator, Score};
/// use connectk::search::CandidateGenerator;
///
/// let board = Board::from_rows(3, &["XX.", "OO.", "..."]).expect("valid grid");
/// let mut evaluator = Evaluator::new(4, CandidateGenerator::default(), 1024);
///
/// // Cross moves next and completes its row.
/// assert_eq!(evaluator.evaluate(&board, Mark::Cross, 0), Score::Win);
/// ```
#[derive(Debug)]
pub struct Evaluator {
    max_depth: u32,
    generator: CandidateGenerator,
    cache: ScoreCache,
    nodes: u64,
}

impl Evaluator {
    /// Create an evaluator that recurses at most `max_depth` plies and
    /// memoizes up to `cache_capacity` positions.
    #[must_use]
    pub fn new(max_depth: u32, generator: CandidateGenerator, cache_capacity: usize) -> Self {
        Self {
            max_depth,
            generator,
            cache: ScoreCache::new(cache_capacity),
            nodes: 0,
        }
    }

    /// Score `board` for `maximizing`, which must be a real mark.
    ///
    /// Terminal positions score exactly. A position still ongoing at
    /// `max_depth` plies scores as a draw. The mark to move is derived
    /// from placement parity, so `depth` only drives the cutoff.
    pub fn evaluate(&mut self, board: &Board, maximizing: Mark, depth: u32) -> Score {
        debug_assert!(maximizing != Mark::Empty, "maximizing mark must be real");
        self.nodes += 1;

        if let Some(score) = Score::from_outcome(board.outcome(), maximizing) {
            return score;
        }
        if depth >= self.max_depth {
            return Score::Draw;
        }

        // Cached scores are stored from Cross's viewpoint so one entry
        // serves either maximizing mark. Win/Draw/Loss is zero-sum, so
        // the other viewpoint is the exact flip.
        let key = CacheKey::from_board(board);
        if let Some(stored) = self.cache.probe(&key) {
            return orient(stored, maximizing);
        }

        let mover = board.mark_to_move();
        let mut best: Option<Score> = None;
        for pos in self.generator.generate(board) {
            let mut child = board.clone();
            let placed = child.place(pos, mover);
            debug_assert!(placed, "candidate {pos:?} must be playable");
            let score = self.evaluate(&child, maximizing, depth + 1);
            best = Some(match best {
                None => score,
                Some(current) if mover == maximizing => current.max(score),
                Some(current) => current.min(score),
            });
        }

        let result = best.unwrap_or(Score::Draw);
        self.cache.insert(key, orient(result, maximizing));
        result
    }

    /// Positions visited since construction, cache hits included.
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Memo cache hits since construction.
    #[inline]
    #[must_use]
    pub fn cache_hits(&self) -> u64 {
        self.cache.hits()
    }
}

/// Reorient a Cross-viewpoint score for `maximizing`, in both
/// directions (the mapping is its own inverse).
#[inline]
fn orient(score: Score, maximizing: Mark) -> Score {
    if maximizing == Mark::Cross {
        score
    } else {
        score.flip()
    }
}
