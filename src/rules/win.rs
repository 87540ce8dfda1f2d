//! Terminal-state detection: run-length wins and full-board draws
//!
//! The scan covers every row, every column, and both diagonal
//! families: main diagonals (constant `col - row`) and anti-diagonals
//! (constant `col + row`). Diagonals shorter than the win condition
//! are skipped since they cannot hold a winning run. The whole scan is
//! O(size²) and runs after every real or hypothetical move.

use crate::board::{Board, Mark, Pos};

/// Terminal state of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The game goes on.
    Ongoing,
    /// A run of the required length exists for this mark.
    Win(Mark),
    /// Every cell is filled and no winning run exists.
    Draw,
}

impl Outcome {
    #[inline]
    #[must_use]
    pub fn is_over(self) -> bool {
        self != Outcome::Ongoing
    }

    #[inline]
    #[must_use]
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            _ => None,
        }
    }
}

/// Scan the whole board for a terminal state.
///
/// The first run of `condition` identical non-Empty marks wins for
/// that mark. With no run and every cell filled the game is a draw;
/// otherwise it is ongoing.
#[must_use]
pub fn outcome(board: &Board) -> Outcome {
    let size = board.size();
    let condition = board.condition();

    // Rows and columns always have full length.
    for row in 0..size {
        if let Some(mark) = scan_line((0..size).map(|col| board.get(Pos::new(row, col))), condition)
        {
            return Outcome::Win(mark);
        }
    }
    for col in 0..size {
        if let Some(mark) = scan_line((0..size).map(|row| board.get(Pos::new(row, col))), condition)
        {
            return Outcome::Win(mark);
        }
    }

    // Main diagonals (constant col - row), starting on the top edge
    // then on the left edge.
    for start_col in 0..size {
        let len = size - start_col;
        if len < condition {
            break;
        }
        if let Some(mark) = scan_line(
            (0..len).map(|i| board.get(Pos::new(i, start_col + i))),
            condition,
        ) {
            return Outcome::Win(mark);
        }
    }
    for start_row in 1..size {
        let len = size - start_row;
        if len < condition {
            break;
        }
        if let Some(mark) = scan_line(
            (0..len).map(|i| board.get(Pos::new(start_row + i, i))),
            condition,
        ) {
            return Outcome::Win(mark);
        }
    }

    // Anti-diagonals (constant col + row), starting on the top edge
    // heading down-left, then on the right edge.
    for start_col in 0..size {
        let len = start_col + 1;
        if len < condition {
            continue;
        }
        if let Some(mark) = scan_line(
            (0..len).map(|i| board.get(Pos::new(i, start_col - i))),
            condition,
        ) {
            return Outcome::Win(mark);
        }
    }
    for start_row in 1..size {
        let len = size - start_row;
        if len < condition {
            break;
        }
        if let Some(mark) = scan_line(
            (0..len).map(|i| board.get(Pos::new(start_row + i, size - 1 - i))),
            condition,
        ) {
            return Outcome::Win(mark);
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

/// Run-length scan of a single line. Returns the mark of the first run
/// reaching `condition`; Empty cells reset the run.
fn scan_line<I>(marks: I, condition: usize) -> Option<Mark>
where
    I: Iterator<Item = Mark>,
{
    let mut run_mark = Mark::Empty;
    let mut run_len = 0usize;
    for mark in marks {
        if mark != Mark::Empty && mark == run_mark {
            run_len += 1;
        } else {
            run_mark = mark;
            run_len = usize::from(mark != Mark::Empty);
        }
        if run_len >= condition {
            return Some(run_mark);
        }
    }
    None
}
