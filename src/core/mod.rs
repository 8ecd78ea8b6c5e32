//! Core engine types: players, state, actions, RNG, configuration, errors.
//!
//! Everything the battle and scoring engines thread through their calls
//! lives here. Nothing in this module interprets abilities.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, Strength};
pub use config::{default_deck, default_hand, MatchConfig, MatchConfigBuilder};
pub use error::{ConfigError, EngineError, ErrorKind, IllegalAction, SnapshotError};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{EndReason, Hand, MatchState, PotSummary};
