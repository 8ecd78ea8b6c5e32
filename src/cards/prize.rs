//! Prizes: the claimable units of victory points.
//!
//! A `Prize` is immutable once built. Moving it deck → pot → claimed pile
//! moves the value; effects that change points (doubling) build a new value.

use serde::{Deserialize, Serialize};

use super::ability::{PrizeAbility, PrizeAbilityKind};

/// Closed category of a prize.
///
/// Multiplier tables and set bonuses are keyed by category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeClass {
    // Base game
    TradePost,
    Research,
    Mining,
    // Expansion
    TribalWorld,
    IndustrialWorld,
    SpaceFaringWorld,
    // Promos
    Station,
}

impl PrizeClass {
    /// Every category, in declaration order.
    pub const ALL: [PrizeClass; 7] = [
        PrizeClass::TradePost,
        PrizeClass::Research,
        PrizeClass::Mining,
        PrizeClass::TribalWorld,
        PrizeClass::IndustrialWorld,
        PrizeClass::SpaceFaringWorld,
        PrizeClass::Station,
    ];

    /// The three base-game categories.
    pub const BASE: [PrizeClass; 3] = [PrizeClass::TradePost, PrizeClass::Research, PrizeClass::Mining];

    /// Stable string key, as used in ability parameters and snapshots.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            PrizeClass::TradePost => "trade_post",
            PrizeClass::Research => "research",
            PrizeClass::Mining => "mining",
            PrizeClass::TribalWorld => "tribal_world",
            PrizeClass::IndustrialWorld => "industrial_world",
            PrizeClass::SpaceFaringWorld => "space_faring_world",
            PrizeClass::Station => "station",
        }
    }

    /// Parse a category key. Unknown keys yield `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for PrizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A claimable prize.
///
/// ## Example
///
/// ```
/// use skirmish_engine::cards::{Prize, PrizeAbility, PrizeClass};
///
/// let prize = Prize::new("P1", 2)
///     .with_name("Mining Outpost")
///     .with_class(PrizeClass::Mining)
///     .with_ability(PrizeAbility::double_next());
///
/// assert_eq!(prize.victory_points, 2);
/// assert_eq!(prize.doubled().victory_points, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    /// Stable identity. Uniqueness is the deck builder's concern.
    pub id: String,

    /// Printed VP. Expansion rules allow negative values.
    #[serde(rename = "victoryPoints", alias = "victory_points")]
    pub victory_points: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// `None` is the unclassed bucket at scoring time.
    #[serde(default)]
    pub class: Option<PrizeClass>,

    /// Abilities in firing order.
    #[serde(default)]
    pub abilities: Vec<PrizeAbility>,
}

impl Prize {
    #[must_use]
    pub fn new(id: impl Into<String>, victory_points: i64) -> Self {
        Self {
            id: id.into(),
            victory_points,
            name: None,
            description: None,
            class: None,
            abilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: PrizeClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Append an ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: PrizeAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    /// A copy of this prize worth twice its printed VP, saturating at the
    /// `i64` bounds.
    #[must_use]
    pub fn doubled(&self) -> Self {
        Self {
            victory_points: self.victory_points.saturating_mul(2),
            ..self.clone()
        }
    }

    /// Whether any ability of `kind` is attached.
    #[must_use]
    pub fn has_ability(&self, kind: PrizeAbilityKind) -> bool {
        self.abilities.iter().any(|a| a.kind == kind)
    }
}

/// Summed printed VP, saturating at the `i64` bounds.
pub fn total_vp<'a>(prizes: impl IntoIterator<Item = &'a Prize>) -> i64 {
    prizes
        .into_iter()
        .fold(0i64, |total, prize| total.saturating_add(prize.victory_points))
}

impl std::fmt::Display for Prize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} VP)", self.id, self.victory_points)
    }
}
