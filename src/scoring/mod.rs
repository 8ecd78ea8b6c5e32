//! Scoring engine: pure evaluation of claimed piles.
//!
//! Multiplier tables scale classed VP only. Set-bonus VP is computed
//! separately and added after scaling.

pub mod engine;

pub use engine::{ScoreBreakdown, ScoringEngine};
