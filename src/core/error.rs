//! Error types.
//!
//! Every non-fatal `EngineError` is raised before the match state is touched.
//! `EngineError::OutOfCardsEarly` is the exception: the state has already
//! been terminated when it is returned.

use thiserror::Error;

use super::action::Strength;
use super::player::PlayerId;

/// Coarse classification of engine errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Battle action submitted after the match ended.
    TerminalStateViolation,
    /// Unknown player, or a card/unit that is not held.
    IllegalAction,
    /// Bid value not held when awarding a special unit.
    OwnershipViolation,
    /// Engine invariant broken upstream; the match has been terminated.
    Fatal,
}

/// Why an action was rejected as illegal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("{0} is not seated in this match")]
    UnknownPlayer(PlayerId),

    #[error("{player} does not hold card {value}")]
    CardNotInHand { player: PlayerId, value: Strength },

    #[error("{player} does not own special unit '{id}'")]
    SpecialNotOwned { player: PlayerId, id: String },

    #[error("{0} has already committed to this battle")]
    AlreadyCommitted(PlayerId),

    #[error("special unit '{id}' is already owned by {owner}")]
    SpecialAlreadyOwned { id: String, owner: PlayerId },

    #[error("multiplier table '{id}' is already assigned to {owner}")]
    TableAlreadyAssigned { id: String, owner: PlayerId },
}

/// Errors returned by battle-engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("match is already over")]
    MatchOver,

    #[error("illegal action: {0}")]
    Illegal(#[from] IllegalAction),

    #[error("{player} cannot bid with card {value}: not in hand")]
    BidNotHeld { player: PlayerId, value: Strength },

    /// A hand ran dry while another still held cards.
    #[error("player out of cards early")]
    OutOfCardsEarly { player: Option<PlayerId> },
}

impl EngineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::MatchOver => ErrorKind::TerminalStateViolation,
            EngineError::Illegal(_) => ErrorKind::IllegalAction,
            EngineError::BidNotHeld { .. } => ErrorKind::OwnershipViolation,
            EngineError::OutOfCardsEarly { .. } => ErrorKind::Fatal,
        }
    }

    /// Fatal errors leave the match terminated; all others leave it untouched.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Fatal
    }
}

/// Invalid match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least two players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("at most 255 players are supported, got {0}")]
    TooManyPlayers(usize),

    #[error("prize deck is empty")]
    EmptyPrizeDeck,

    #[error("hand values are empty")]
    EmptyHand,

    #[error("prize at deck position {0} has an empty id")]
    EmptyPrizeId(usize),
}

/// Snapshot encode/decode failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),

    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}
