//! Connect-k game engine
//!
//! A board-game core for the connect-k family, from tic-tac-toe up to
//! gomoku-sized grids: N x N boards where K consecutive marks in a
//! row, column or diagonal win.
//!
//! - Any board size from 1x1 upward; the win condition clamps to the
//!   board size
//! - Exhaustive depth-bounded minimax over heuristically chosen
//!   candidate moves, no pruning
//! - One search thread per first-ply candidate, joined over a channel
//! - Uniformly random tie-breaks among equally scored moves
//!
//! # Architecture
//!
//! - [`board`]: Marks, positions, players and the owned grid
//! - [`rules`]: Win and draw detection
//! - [`search`]: Heuristic candidate generation
//! - [`eval`]: Memoized depth-bounded minimax scoring
//! - [`engine`]: Parallel move selection
//! - [`game`]: Turn-taking session gluing it all together
//!
//! # Quick Start
//!
//! ```
//! use connectk::{Board, Engine, EngineConfig, Mark, Pos};
//!
//! // Shallow search keeps the example fast.
//! let config = EngineConfig { max_depth: 2, ..EngineConfig::default() };
//! let mut engine = Engine::with_config(config);
//!
//! let mut board = Board::new(10, 5).expect("valid dimensions");
//! board.place(Pos::new(4, 4), Mark::Cross);
//!
//! // The engine answers for Nought.
//! let pos = engine.select_move(&board, Mark::Nought).expect("board not full");
//! board.place(pos, Mark::Nought);
//! println!("engine plays at ({}, {})", pos.row, pos.col);
//! ```
//!
//! # Move selection
//!
//! 1. Empty board: the fixed center opening, no search
//! 2. Candidate generation around the existing marks
//! 3. One evaluation task per candidate, each on its own board clone
//! 4. Minimum opponent-perspective score wins; ties break at random
//!
//! The evaluator truncates at a configurable ply budget and scores
//! truncated positions as draws, so play is exact near the end of a
//! game and approximate in the middle of it.

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, Mark, Player, Pos};
pub use engine::{Engine, EngineConfig, MoveChoice, SearchError};
pub use eval::{Evaluator, Score};
pub use game::GameSession;
pub use rules::{outcome, Outcome};
pub use search::CandidateGenerator;
