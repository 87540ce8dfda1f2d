//! Candidate-move search support
//!
//! Contains:
//! - Heuristic candidate generation bounding the branching factor

pub mod candidates;

pub use candidates::CandidateGenerator;
