//! Multiplier tables (corporations).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::prize::PrizeClass;

/// Per-category scoring multipliers assigned to a player.
///
/// Multipliers may exceed 1, equal 1, or be negative; a negative entry is an
/// expansion rule, not an error. A category missing from the table scores
/// at 1.0.
///
/// ```
/// use skirmish_engine::cards::{MultiplierTable, PrizeClass};
///
/// let corp = MultiplierTable::new("CORP_MINING", "Deep Core Ventures")
///     .with_multiplier(PrizeClass::Mining, 2.0);
///
/// assert_eq!(corp.multiplier_for(Some(PrizeClass::Mining)), 2.0);
/// assert_eq!(corp.multiplier_for(Some(PrizeClass::Research)), 1.0);
/// assert_eq!(corp.multiplier_for(None), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTable {
    pub id: String,
    pub name: String,
    pub multipliers: BTreeMap<PrizeClass, f64>,
}

impl MultiplierTable {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            multipliers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_multiplier(mut self, class: PrizeClass, multiplier: f64) -> Self {
        self.multipliers.insert(class, multiplier);
        self
    }

    /// Multiplier for a category. Unclassed prizes and absent categories score at 1.0.
    #[must_use]
    pub fn multiplier_for(&self, class: Option<PrizeClass>) -> f64 {
        class
            .and_then(|c| self.multipliers.get(&c).copied())
            .unwrap_or(1.0)
    }
}

/// Multiplier for an optional table assignment; the one place the 1.0 default lives.
#[must_use]
pub fn resolve_multiplier(table: Option<&MultiplierTable>, class: Option<PrizeClass>) -> f64 {
    table.map_or(1.0, |t| t.multiplier_for(class))
}
