//! Special units: one-shot battle assets.
//!
//! A special unit is owned by at most one player and is spent the moment it
//! is committed to a battle, whatever the outcome.

use serde::{Deserialize, Serialize};

use super::params::{ParamKey, ParamValue, Params};
use crate::core::Strength;

/// Parameter key: opponent base strength that triggers an overpower.
/// Without it the trigger is the highest value of the match's hand.
pub const PARAM_THRESHOLD: &str = "threshold";
/// Parameter key: strength used when no overpower triggers.
pub const PARAM_FALLBACK_STRENGTH: &str = "fallback_strength";

/// Default strength of an overpowering unit that does not trigger.
pub const DEFAULT_FALLBACK_STRENGTH: Strength = 1;

/// Closed set of special-unit ability kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAbilityKind {
    /// Beats the top hand value by one if an opponent plays it; otherwise
    /// fights at a fallback strength.
    OverpowerThreshold,
    RevealOpponentCorp,
    /// Wins a tie outright if no other tied player also holds it.
    WinAllTies,
    ReturnOnce,
    /// Discards the newest pot prize and reveals a replacement before battle.
    SwapPot,
    PeekNext,
}

/// An ownable special unit.
///
/// ```
/// use skirmish_engine::cards::{SpecialAbilityKind, SpecialUnit};
///
/// let ace = SpecialUnit::new("M_OF", "Overpower Ace", 7, SpecialAbilityKind::OverpowerThreshold)
///     .with_param("fallback_strength", 2);
///
/// assert_eq!(ace.overpower_threshold(10), 10);
/// assert_eq!(ace.fallback_strength(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialUnit {
    pub id: String,
    pub name: String,
    /// Provisional strength when committed.
    pub base_strength: Strength,
    pub ability: SpecialAbilityKind,
    pub params: Params,
}

impl SpecialUnit {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_strength: Strength,
        ability: SpecialAbilityKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_strength,
            ability,
            params: Params::default(),
        }
    }

    /// Add a parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, key: impl Into<ParamKey>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    fn int_param(&self, key: &str) -> Option<Strength> {
        self.params
            .get(&ParamKey::new(key))
            .and_then(ParamValue::as_int)
            .and_then(|v| Strength::try_from(v).ok())
    }

    /// Opponent base strength that triggers the overpower: the `threshold`
    /// parameter, else `max_hand_value`.
    #[must_use]
    pub fn overpower_threshold(&self, max_hand_value: Strength) -> Strength {
        self.int_param(PARAM_THRESHOLD).unwrap_or(max_hand_value)
    }

    /// Strength used when the overpower does not trigger.
    #[must_use]
    pub fn fallback_strength(&self) -> Strength {
        self.int_param(PARAM_FALLBACK_STRENGTH).unwrap_or(DEFAULT_FALLBACK_STRENGTH)
    }
}

impl std::fmt::Display for SpecialUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}
