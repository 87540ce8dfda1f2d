//! Dynamic square grid with validated construction
//!
//! The grid is a flat `Vec<Mark>` indexed row-major. All mutation goes
//! through [`Board::place`] / [`Board::apply_move`], which report
//! failure as `false` instead of erroring; only construction with bad
//! dimensions produces a [`BoardError`].

use std::fmt;

use thiserror::Error;

use super::{Mark, Player, Pos};
use crate::rules::{self, Outcome};

/// Construction-time failures. Move-level problems (out of range,
/// occupied cell) are boolean results, never errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be positive, got {0}")]
    InvalidSize(usize),
    #[error("win condition must be positive, got {0}")]
    InvalidCondition(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    InvalidRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unrecognized cell character {0:?}")]
    InvalidCell(char),
}

/// Game board: a `size * size` grid of marks plus the run length
/// required to win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    condition: usize,
    cells: Vec<Mark>,
    cross_placed: usize,
    nought_placed: usize,
}

impl Board {
    /// Create an empty board.
    ///
    /// A `condition` larger than `size` is clamped to `size` (a run
    /// cannot be longer than a line). Zero size or zero condition is
    /// rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use connectk::Board;
    ///
    /// let board = Board::new(10, 5).expect("valid dimensions");
    /// assert_eq!(board.size(), 10);
    /// assert_eq!(board.condition(), 5);
    ///
    /// let clamped = Board::new(3, 5).expect("valid dimensions");
    /// assert_eq!(clamped.condition(), 3);
    /// ```
    pub fn new(size: usize, condition: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize(size));
        }
        if condition == 0 {
            return Err(BoardError::InvalidCondition(condition));
        }
        Ok(Self {
            size,
            condition: condition.min(size),
            cells: vec![Mark::Empty; size * size],
            cross_placed: 0,
            nought_placed: 0,
        })
    }

    /// Build a board from one string per row, using the characters of
    /// [`Mark::as_char`] (`X`, `O`, `.`; lowercase and space accepted).
    /// The board size is the number of rows.
    pub fn from_rows(condition: usize, rows: &[&str]) -> Result<Self, BoardError> {
        let size = rows.len();
        let mut board = Board::new(size, condition)?;
        for (row, text) in rows.iter().enumerate() {
            let len = text.chars().count();
            if len != size {
                return Err(BoardError::InvalidRow {
                    row,
                    len,
                    expected: size,
                });
            }
            for (col, ch) in text.chars().enumerate() {
                let mark = Mark::from_char(ch).ok_or(BoardError::InvalidCell(ch))?;
                if mark != Mark::Empty {
                    board.place(Pos::new(row, col), mark);
                }
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Run length required to win, always `<= size`.
    #[inline]
    pub fn condition(&self) -> usize {
        self.condition
    }

    /// Number of non-Empty cells.
    #[inline]
    pub fn filled(&self) -> usize {
        self.cross_placed + self.nought_placed
    }

    /// How many cells a given mark occupies.
    #[inline]
    pub fn placed(&self, mark: Mark) -> usize {
        match mark {
            Mark::Cross => self.cross_placed,
            Mark::Nought => self.nought_placed,
            Mark::Empty => self.size * self.size - self.filled(),
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled() == self.size * self.size
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Mark at a position.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is out of bounds, in every build: on the flat
    /// grid a column past the edge would otherwise alias into the next
    /// row.
    #[inline]
    pub fn get(&self, pos: Pos) -> Mark {
        assert!(self.in_bounds(pos), "position {pos:?} out of bounds");
        self.cells[pos.to_index(self.size)]
    }

    /// Put `mark` on an empty in-bounds cell. Returns `false` and
    /// leaves the board untouched when the position is out of range,
    /// the cell is occupied, or `mark` is `Empty`.
    pub fn place(&mut self, pos: Pos, mark: Mark) -> bool {
        if mark == Mark::Empty || !self.in_bounds(pos) {
            return false;
        }
        let index = pos.to_index(self.size);
        if self.cells[index] != Mark::Empty {
            return false;
        }
        self.cells[index] = mark;
        match mark {
            Mark::Cross => self.cross_placed += 1,
            Mark::Nought => self.nought_placed += 1,
            Mark::Empty => unreachable!(),
        }
        true
    }

    /// Apply a player's move. Same contract as [`Board::place`]; a
    /// player whose mark is still unassigned cannot move.
    pub fn apply_move(&mut self, player: &Player, pos: Pos) -> bool {
        self.place(pos, player.mark)
    }

    /// Reset every cell to `Empty`, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(Mark::Empty);
        self.cross_placed = 0;
        self.nought_placed = 0;
    }

    /// Terminal state of the current position. See [`rules::outcome`].
    #[inline]
    pub fn outcome(&self) -> Outcome {
        rules::outcome(self)
    }

    /// Mark that moves next, by placement parity: the mark with fewer
    /// cells moves; on a tie Cross moves (Cross opens the game). Holds
    /// for boards built in any order, not only alternating play.
    #[inline]
    pub fn mark_to_move(&self) -> Mark {
        if self.cross_placed > self.nought_placed {
            Mark::Nought
        } else {
            Mark::Cross
        }
    }

    /// Center cell, the fixed opening move: `((size-1)/2, (size-1)/2)`
    /// with floor division, so even sizes land on the upper-left of
    /// the four central cells.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Pos {
        Pos::new((self.size - 1) / 2, (self.size - 1) / 2)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.size {
                write!(f, "{}", self.get(Pos::new(row, col)).as_char())?;
            }
        }
        Ok(())
    }
}
