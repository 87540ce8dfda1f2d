//! Heuristic candidate-move generation
//!
//! Evaluating every empty cell of a 10x10 board is intractable for the
//! recursive search, so the branching factor is bounded here: occupied
//! cells are ranked by "potential" (summed same-mark run lengths over
//! the 8 compass directions), low-potential cells are dropped, and the
//! Empty 8-neighbours of the survivors become the candidate list.

use log::trace;

use crate::board::{Board, Mark, Pos};

/// The 8 compass directions.
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

/// Potential an occupied cell needs to stay in the ranking.
pub const DEFAULT_MIN_POTENTIAL: u32 = 3;

/// How many top-ranked cells the fallback keeps when too few pass the
/// potential threshold.
pub const DEFAULT_FALLBACK_COUNT: usize = 5;

/// Candidate generator with its two tuning knobs.
///
/// # Example
///
/// ```
/// use connectk::{Board, CandidateGenerator, Mark, Pos};
///
/// let mut board = Board::new(10, 5).expect("valid dimensions");
/// board.place(Pos::new(4, 4), Mark::Cross);
///
/// let generator = CandidateGenerator::default();
/// let candidates = generator.generate(&board);
/// assert_eq!(candidates.len(), 8); // the mark's empty neighbours
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateGenerator {
    min_potential: u32,
    fallback_count: usize,
}

impl CandidateGenerator {
    pub fn new(min_potential: u32, fallback_count: usize) -> Self {
        Self {
            min_potential,
            fallback_count,
        }
    }

    /// Candidate positions for the next move.
    ///
    /// Every returned position is Empty and in bounds. The result is
    /// empty only when no occupied cell has an Empty neighbour: a full
    /// board, or the empty board whose opening move is the caller's
    /// short-circuit.
    ///
    /// Ranking ties and the neighbour union are resolved in a fixed
    /// order, so identical boards produce identical candidate lists.
    #[must_use]
    pub fn generate(&self, board: &Board) -> Vec<Pos> {
        let size = board.size();

        let mut scored: Vec<(Pos, u32)> = Vec::new();
        for row in 0..size {
            for col in 0..size {
                let pos = Pos::new(row, col);
                let mark = board.get(pos);
                if mark == Mark::Empty || !has_empty_neighbour(board, pos) {
                    continue;
                }
                scored.push((pos, potential(board, pos, mark)));
            }
        }

        // Rank by potential descending, position order on ties.
        scored.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let passing = scored
            .iter()
            .take_while(|(_, p)| *p >= self.min_potential)
            .count();
        let retained = if passing > self.fallback_count {
            &scored[..passing]
        } else {
            &scored[..scored.len().min(self.fallback_count)]
        };

        let mut seen = vec![false; size * size];
        let mut candidates = Vec::new();
        for &(pos, _) in retained {
            for &(dr, dc) in &NEIGHBOURS {
                if let Some(next) = pos.offset(dr, dc, size) {
                    let index = next.to_index(size);
                    if !seen[index] && board.get(next) == Mark::Empty {
                        seen[index] = true;
                        candidates.push(next);
                    }
                }
            }
        }

        trace!(
            "{} candidates from {} retained of {} ranked cells",
            candidates.len(),
            retained.len(),
            scored.len()
        );
        candidates
    }
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_POTENTIAL, DEFAULT_FALLBACK_COUNT)
    }
}

/// Summed length of the same-mark runs radiating from `pos` over all 8
/// directions. An off-board or differing cell ends a walk.
fn potential(board: &Board, pos: Pos, mark: Mark) -> u32 {
    let size = board.size();
    let mut total = 0;
    for &(dr, dc) in &NEIGHBOURS {
        let mut cursor = pos;
        while let Some(next) = cursor.offset(dr, dc, size) {
            if board.get(next) != mark {
                break;
            }
            total += 1;
            cursor = next;
        }
    }
    total
}

fn has_empty_neighbour(board: &Board, pos: Pos) -> bool {
    let size = board.size();
    NEIGHBOURS.iter().any(|&(dr, dc)| {
        pos.offset(dr, dc, size)
            .is_some_and(|next| board.get(next) == Mark::Empty)
    })
}
