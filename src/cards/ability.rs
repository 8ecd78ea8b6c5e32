//! Prize ability descriptors.
//!
//! Abilities are declarative: a closed kind tag plus opaque parameters.
//! Two firing times exist:
//! - **on-claim**: once, when the carrying prize enters a claimed pile
//!   (handled by the battle engine)
//! - **at-scoring**: once per scoring pass, read-only (handled by the
//!   scoring engine)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::params::{ParamKey, ParamValue, Params};
use super::prize::PrizeClass;

/// Parameter key naming the target category of a set bonus.
pub const PARAM_CLASS: &str = "class";
/// Parameter key holding a set bonus' count → VP table.
pub const PARAM_THRESHOLDS: &str = "thresholds";

/// Closed set of prize ability kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeAbilityKind {
    /// On-claim: take the next deck prize at double value without a battle.
    DoubleNextPrizeNoBattle,
    /// At-scoring: flat VP by number of claimed prizes in a category.
    ClassSetBonus,
    /// The claimer picks the category of the prize.
    ChooseClass,
    /// Liability prize.
    LoseVictoryPoints,
}

/// An ability attached to a prize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrizeAbility {
    #[serde(rename = "type")]
    pub kind: PrizeAbilityKind,
    #[serde(default)]
    pub params: Params,
}

/// Typed view of a `ClassSetBonus` ability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetBonus<'a> {
    pub class: PrizeClass,
    pub thresholds: &'a BTreeMap<u32, i64>,
}

impl SetBonus<'_> {
    /// Bonus for holding `count` prizes of the target category: the value of
    /// the highest threshold not exceeding `count`, or 0 when none qualifies.
    #[must_use]
    pub fn bonus_for(&self, count: u32) -> i64 {
        self.thresholds
            .range(..=count)
            .next_back()
            .map_or(0, |(_, &bonus)| bonus)
    }
}

impl PrizeAbility {
    /// Create an ability with no parameters.
    #[must_use]
    pub fn new(kind: PrizeAbilityKind) -> Self {
        Self {
            kind,
            params: Params::default(),
        }
    }

    /// Add a parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, key: impl Into<ParamKey>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// "Double the next prize, no battle for it."
    #[must_use]
    pub fn double_next() -> Self {
        Self::new(PrizeAbilityKind::DoubleNextPrizeNoBattle)
    }

    /// Set bonus for `class` with (count, bonus VP) thresholds.
    #[must_use]
    pub fn class_set_bonus(class: PrizeClass, thresholds: impl IntoIterator<Item = (u32, i64)>) -> Self {
        let table: BTreeMap<u32, i64> = thresholds.into_iter().collect();
        Self::new(PrizeAbilityKind::ClassSetBonus)
            .with_param(PARAM_CLASS, class.key())
            .with_param(PARAM_THRESHOLDS, table)
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(&ParamKey::new(key))
    }

    /// Interpret this ability as a set bonus.
    ///
    /// `None` if the kind differs or the parameters are missing/malformed;
    /// malformed set bonuses contribute nothing.
    #[must_use]
    pub fn set_bonus(&self) -> Option<SetBonus<'_>> {
        if self.kind != PrizeAbilityKind::ClassSetBonus {
            return None;
        }
        let class = self
            .param(PARAM_CLASS)
            .and_then(ParamValue::as_text)
            .and_then(PrizeClass::from_key)?;
        let thresholds = self.param(PARAM_THRESHOLDS).and_then(ParamValue::as_thresholds)?;
        Some(SetBonus { class, thresholds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bonus_view() {
        let ability = PrizeAbility::class_set_bonus(PrizeClass::Mining, [(2, 1), (3, 3), (4, 5)]);
        let bonus = ability.set_bonus().unwrap();

        assert_eq!(bonus.class, PrizeClass::Mining);
        assert_eq!(bonus.bonus_for(0), 0);
        assert_eq!(bonus.bonus_for(1), 0);
        assert_eq!(bonus.bonus_for(2), 1);
        assert_eq!(bonus.bonus_for(3), 3);
        assert_eq!(bonus.bonus_for(4), 5);
        assert_eq!(bonus.bonus_for(9), 5);
    }

    #[test]
    fn test_zero_threshold_applies_at_zero() {
        let ability = PrizeAbility::class_set_bonus(PrizeClass::Research, [(0, 2)]);
        assert_eq!(ability.set_bonus().unwrap().bonus_for(0), 2);
    }

    #[test]
    fn test_malformed_set_bonus_is_ignored() {
        let wrong_kind = PrizeAbility::double_next();
        assert!(wrong_kind.set_bonus().is_none());

        let unknown_class = PrizeAbility::new(PrizeAbilityKind::ClassSetBonus)
            .with_param(PARAM_CLASS, "asteroid")
            .with_param(PARAM_THRESHOLDS, BTreeMap::from([(1, 1)]));
        assert!(unknown_class.set_bonus().is_none());

        let no_table = PrizeAbility::new(PrizeAbilityKind::ClassSetBonus)
            .with_param(PARAM_CLASS, "mining");
        assert!(no_table.set_bonus().is_none());
    }

    #[test]
    fn test_ability_kind_serde() {
        let json = serde_json::to_string(&PrizeAbilityKind::DoubleNextPrizeNoBattle).unwrap();
        assert_eq!(json, "\"double_next_prize_no_battle\"");
    }

    #[test]
    fn test_ability_record_uses_type_tag() {
        let value = serde_json::to_value(PrizeAbility::double_next()).unwrap();
        assert_eq!(value["type"], "double_next_prize_no_battle");
        assert!(value.get("kind").is_none());

        let parsed: PrizeAbility =
            serde_json::from_str(r#"{"type": "lose_victory_points", "params": {}}"#).unwrap();
        assert_eq!(parsed, PrizeAbility::new(PrizeAbilityKind::LoseVictoryPoints));
    }
}
