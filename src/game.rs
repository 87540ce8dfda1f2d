//! Game session layer
//!
//! Drives a full game between two players: mark assignment, alternating
//! turns, a latched outcome, and engine-backed computer moves. Input
//! and rendering stay with the caller; the session owns only the
//! rules-side state.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, BoardError, Mark, Player, Pos};
use crate::engine::{Engine, EngineConfig, SearchError};
use crate::rules::Outcome;

/// One game in progress.
///
/// A fresh session is ready to play: construction assigns marks and
/// picks the opening player. [`GameSession::start`] rewinds everything
/// for a rematch on the same board dimensions.
///
/// # Example
///
/// ```
/// use connectk::{GameSession, Outcome, Pos};
///
/// let mut session = GameSession::small("Ada", "Grace").expect("valid preset");
/// assert!(session.play(Pos::new(0, 0)));
/// assert!(!session.play(Pos::new(0, 0)), "cell already taken");
/// assert_eq!(session.outcome(), Outcome::Ongoing);
/// ```
pub struct GameSession {
    board: Board,
    players: [Player; 2],
    current: usize,
    outcome: Outcome,
    engine: Engine,
    history: Vec<(Pos, Mark)>,
    rng: SmallRng,
}

impl GameSession {
    /// New session on a `size` x `size` board requiring `condition` in
    /// a row, with marks already dealt out.
    pub fn new(
        size: usize,
        condition: usize,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Result<Self, BoardError> {
        let board = Board::new(size, condition)?;
        let mut session = Self {
            board,
            players: [Player::new(first), Player::new(second)],
            current: 0,
            outcome: Outcome::Ongoing,
            engine: Engine::new(),
            history: Vec::new(),
            rng: SmallRng::from_entropy(),
        };
        session.start();
        Ok(session)
    }

    /// The small preset: 3x3, three in a row.
    pub fn small(
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Result<Self, BoardError> {
        Self::new(3, 3, first, second)
    }

    /// The big preset: 10x10, five in a row.
    pub fn big(
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Result<Self, BoardError> {
        Self::new(10, 5, first, second)
    }

    /// Reproducible session: the seed drives mark assignment and the
    /// engine's tie-breaks.
    pub fn with_seed(
        size: usize,
        condition: usize,
        first: impl Into<String>,
        second: impl Into<String>,
        seed: u64,
    ) -> Result<Self, BoardError> {
        let board = Board::new(size, condition)?;
        let mut session = Self {
            board,
            players: [Player::new(first), Player::new(second)],
            current: 0,
            outcome: Outcome::Ongoing,
            engine: Engine::with_seed(EngineConfig::default(), seed),
            history: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        };
        session.start();
        Ok(session)
    }

    /// Begin a fresh game: empty board, cleared history, and a random
    /// player dealt Cross. Cross always opens, so the dealt player
    /// moves first. Returns the opening player.
    pub fn start(&mut self) -> &Player {
        self.board.clear();
        self.history.clear();
        self.outcome = Outcome::Ongoing;

        let first = self.rng.gen_range(0..2);
        self.players[first].mark = Mark::Cross;
        self.players[1 - first].mark = Mark::Nought;
        self.current = first;
        info!("new game: {} opens as Cross", self.players[first].name);
        &self.players[first]
    }

    /// Current player's move at `pos`.
    ///
    /// Returns `false` without changing anything when the game is
    /// already over or the cell cannot be taken. The turn passes only
    /// on success, and stays put once the game ends.
    pub fn play(&mut self, pos: Pos) -> bool {
        if self.outcome.is_over() {
            return false;
        }
        let mark = self.players[self.current].mark;
        if !self.board.place(pos, mark) {
            return false;
        }
        debug!("{} plays {:?}", self.players[self.current].name, pos);

        self.history.push((pos, mark));
        self.outcome = self.board.outcome();
        if self.outcome.is_over() {
            info!("game over after {} moves: {:?}", self.history.len(), self.outcome);
        } else {
            self.current = 1 - self.current;
        }
        true
    }

    /// Let the engine move for the current player.
    ///
    /// # Returns
    ///
    /// * `Ok(pos)` - The move that was selected and applied
    /// * `Err(SearchError::NoCandidates)` - Game over or board full
    pub fn play_engine_move(&mut self) -> Result<Pos, SearchError> {
        if self.outcome.is_over() {
            return Err(SearchError::NoCandidates);
        }
        let mark = self.players[self.current].mark;
        let pos = self.engine.select_move(&self.board, mark)?;
        let applied = self.play(pos);
        debug_assert!(applied, "selected move {pos:?} must apply");
        Ok(pos)
    }

    /// Winning player, if the game has been won.
    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.outcome
            .winner()
            .and_then(|mark| self.players.iter().find(|player| player.mark == mark))
    }

    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Latched outcome; once non-`Ongoing` it never changes until the
    /// next [`GameSession::start`].
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    #[must_use]
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Player whose turn it is (the winner once the game is over).
    #[inline]
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Applied moves in order.
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[(Pos, Mark)] {
        &self.history
    }
}
