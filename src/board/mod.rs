//! Board representation for generalized connect-k games
//!
//! The vocabulary types live here: [`Mark`] (cell contents), [`Pos`]
//! (grid coordinates) and [`Player`] (identity + assigned mark). The
//! grid itself is [`Board`].

pub mod board;

// Re-exports
pub use board::{Board, BoardError};

/// Cell contents. `Cross` is the first player's mark: it moves first
/// from an empty board and breaks move-parity ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mark {
    Empty = 0,
    Cross = 1,
    Nought = 2,
}

impl Mark {
    /// Get the opposing mark
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::Cross => Mark::Nought,
            Mark::Nought => Mark::Cross,
            Mark::Empty => Mark::Empty,
        }
    }

    /// Character used by [`Board`]'s text form: `X`, `O` or `.`
    #[inline]
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::Cross => 'X',
            Mark::Nought => 'O',
        }
    }

    /// Inverse of [`Mark::as_char`]; `None` for unknown characters.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Mark> {
        match ch {
            '.' | ' ' => Some(Mark::Empty),
            'X' | 'x' => Some(Mark::Cross),
            'O' | 'o' => Some(Mark::Nought),
            _ => None,
        }
    }
}

/// Position on a board. Row-major ordering is derived so that move
/// lists can be sorted deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Flat index into a `size * size` grid. The position must be in
    /// bounds for that size.
    #[inline]
    #[must_use]
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Step by a signed offset, `None` when the result leaves a
    /// `size * size` grid. The walk helpers in the candidate generator
    /// and the win scan are built on this.
    #[inline]
    #[must_use]
    pub fn offset(self, dr: i64, dc: i64, size: usize) -> Option<Pos> {
        let row = self.row as i64 + dr;
        let col = self.col as i64 + dc;
        if row >= 0 && row < size as i64 && col >= 0 && col < size as i64 {
            Some(Pos::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

/// A participant: a display name plus the mark assigned for the
/// current game. A fresh player is unassigned (`Mark::Empty`) until a
/// session hands out marks; moving with an unassigned mark is refused
/// by [`Board::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub mark: Mark,
}

impl Player {
    /// New player with no mark assigned yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mark: Mark::Empty,
        }
    }

    /// New player with a fixed mark, for callers that skip the session
    /// layer.
    pub fn with_mark(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            mark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_opponent() {
        assert_eq!(Mark::Cross.opponent(), Mark::Nought);
        assert_eq!(Mark::Nought.opponent(), Mark::Cross);
        assert_eq!(Mark::Empty.opponent(), Mark::Empty);
    }

    #[test]
    fn test_mark_char_round_trip() {
        for mark in [Mark::Empty, Mark::Cross, Mark::Nought] {
            assert_eq!(Mark::from_char(mark.as_char()), Some(mark));
        }
        assert_eq!(Mark::from_char('x'), Some(Mark::Cross));
        assert_eq!(Mark::from_char(' '), Some(Mark::Empty));
        assert_eq!(Mark::from_char('?'), None);
    }

    #[test]
    fn test_pos_index() {
        assert_eq!(Pos::new(0, 0).to_index(10), 0);
        assert_eq!(Pos::new(2, 3).to_index(10), 23);
        assert_eq!(Pos::new(9, 9).to_index(10), 99);
    }

    #[test]
    fn test_pos_ordering_is_row_major() {
        let mut positions = vec![Pos::new(1, 0), Pos::new(0, 2), Pos::new(0, 1)];
        positions.sort();
        assert_eq!(
            positions,
            vec![Pos::new(0, 1), Pos::new(0, 2), Pos::new(1, 0)]
        );
    }

    #[test]
    fn test_pos_offset() {
        let pos = Pos::new(1, 1);
        assert_eq!(pos.offset(1, 1, 3), Some(Pos::new(2, 2)));
        assert_eq!(pos.offset(-1, 0, 3), Some(Pos::new(0, 1)));
        assert_eq!(pos.offset(-2, 0, 3), None);
        assert_eq!(pos.offset(0, 2, 3), None);
    }

    #[test]
    fn test_player_starts_unassigned() {
        let player = Player::new("P1");
        assert_eq!(player.mark, Mark::Empty);
        let computer = Player::with_mark("CPU", Mark::Nought);
        assert_eq!(computer.mark, Mark::Nought);
    }
}
