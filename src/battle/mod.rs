//! Battle engine: the match state machine.
//!
//! ## Flow
//!
//! 1. `BattleEngine::start_new_game` builds a `MatchState` from a config.
//! 2. Each battle, every seat commits once (`play_card` / `play_special`).
//!    The first commitment of a battle reveals a prize into an empty pot.
//! 3. The last commitment resolves the battle (see `resolve`), then checks
//!    whether the match has ended.
//!
//! `award_special` runs outside battles: the winner of a bid pays a hand card
//! for a special unit.

mod abilities;
pub mod engine;
pub mod resolve;
mod termination;

pub use engine::BattleEngine;
pub use resolve::BattleOutcome;
