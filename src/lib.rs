//! # skirmish-engine
//!
//! Rules engine for a simultaneous-bid territory game: every battle each
//! player commits a strength card (or a one-shot special unit), the highest
//! strength takes the prize pot, ties grow the pot, and claimed prizes are
//! scored at the end through per-player multiplier tables and set bonuses.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: seats are `1..=player_count`; no API assumes two players.
//!
//! 2. **Validate, Then Mutate**: a rejected action leaves the match state as it was.
//!    The one exception is the out-of-cards anomaly, which terminates the match.
//!
//! 3. **Deterministic Core**: the engine never draws randomness. Deck shuffling
//!    happens once, at config build time, from an explicit seed.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: prize piles are `im` vectors, so cloning a
//!   `MatchState` for history or rollback is O(1).
//!
//! - **Declarative Abilities**: prizes and special units carry ability tags
//!   plus opaque parameters; the battle and scoring engines interpret them.
//!
//! ## Modules
//!
//! - `core`: players, match state, actions, configuration, errors, RNG
//! - `cards`: prizes, abilities, special units, multiplier tables
//! - `battle`: battle engine (commitments, resolution, end-of-game detection)
//! - `rules`: `RulesEngine` trait for drivers
//! - `scoring`: final scores
//!
//! ## Example
//!
//! ```
//! use skirmish_engine::{BattleEngine, MatchConfig, PlayerId, RulesEngine, ScoringEngine};
//!
//! let config = MatchConfig::standard_two_player(Some(42)).unwrap();
//! let engine = BattleEngine::new();
//! let mut state = engine.start_new_game(&config);
//!
//! // Both players play their cards from the top down
//! for value in (1..=15).rev() {
//!     for seat in 1..=2 {
//!         engine.play_card(&mut state, PlayerId::new(seat), value).unwrap();
//!     }
//!     if state.is_game_over() {
//!         break;
//!     }
//! }
//!
//! assert!(state.is_game_over());
//! let scores = ScoringEngine::new().final_scores(&state);
//! assert_eq!(scores[PlayerId::new(1)], scores[PlayerId::new(2)]);
//! assert!(engine.is_terminal(&state).is_some());
//! ```

pub mod battle;
pub mod cards;
pub mod core;
pub mod rules;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    Action, ConfigError, EndReason, EngineError, ErrorKind, GameRng, IllegalAction, MatchConfig,
    MatchConfigBuilder, MatchState, PlayerId, PlayerMap, PotSummary, SnapshotError, Strength,
};

pub use crate::cards::{
    MultiplierTable, Prize, PrizeAbility, PrizeAbilityKind, PrizeClass, SpecialAbilityKind,
    SpecialUnit,
};

pub use crate::battle::{BattleEngine, BattleOutcome};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::scoring::{ScoreBreakdown, ScoringEngine};
