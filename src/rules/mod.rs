//! Rules engine trait for match drivers.
//!
//! `RulesEngine` is the seam between the battle engine and anything that
//! plays matches: legal actions, applying them, and the final result.
//! `BattleEngine` implements it.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
