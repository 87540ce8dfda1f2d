//! Game rules for generalized connect-k
//!
//! One concern lives here: deciding whether a position is terminal.
//! A game ends with a run of `condition` identical marks on any row,
//! column or diagonal, or with a draw once the board is full.

pub mod win;

// Re-exports for convenient access
pub use win::{outcome, Outcome};
