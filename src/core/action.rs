//! Player actions.
//!
//! Each battle, every seated player commits exactly one action: a strength
//! card from hand or an owned special unit. Awarding a special unit after an
//! out-of-band bid is not a battle action and has its own entry point.

use serde::{Deserialize, Serialize};

/// Numeric value a player commits to a battle.
pub type Strength = i32;

/// A battle commitment.
///
/// ```
/// use skirmish_engine::core::Action;
///
/// let card = Action::PlayCard(5);
/// let unit = Action::play_special("M_TIE");
///
/// assert_ne!(card, unit);
/// assert_eq!(format!("{}", unit), "play special M_TIE");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a strength card from hand.
    PlayCard(Strength),
    /// Play an owned special unit, by id.
    PlaySpecial(String),
}

impl Action {
    #[must_use]
    pub fn play_special(id: impl Into<String>) -> Self {
        Action::PlaySpecial(id.into())
    }

    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self, Action::PlaySpecial(_))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlayCard(v) => write!(f, "play card {}", v),
            Action::PlaySpecial(id) => write!(f, "play special {}", id),
        }
    }
}
