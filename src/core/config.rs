//! Match configuration.
//!
//! `MatchConfig` is the validated input to `BattleEngine::start_new_game`:
//! - player count (2..=255)
//! - the ordered prize deck (already shuffled when a seed was given)
//! - the hand-value sequence every player starts with
//!
//! Seeded shuffling happens here, once, at build time. The engine itself
//! never draws randomness.

use serde::{Deserialize, Serialize};

use super::action::Strength;
use super::error::ConfigError;
use super::rng::GameRng;
use crate::cards::{Prize, PrizeClass};

/// Default number of players.
pub const DEFAULT_PLAYER_COUNT: usize = 2;
/// Highest card of the default hand (`1..=15`).
pub const DEFAULT_TOP_CARD: Strength = 15;
/// Copies of each VP value (1, 2, 3) in the default deck.
const DEFAULT_COPIES_PER_VALUE: usize = 5;

/// Validated match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    player_count: usize,
    prizes: Vec<Prize>,
    hand_values: Vec<Strength>,
    seed: Option<u64>,
}

impl MatchConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::default()
    }

    /// Standard two-player match: default deck, hand `1..=15`.
    pub fn standard_two_player(seed: Option<u64>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder().player_count(2);
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Prize deck in reveal order.
    #[must_use]
    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    #[must_use]
    pub fn hand_values(&self) -> &[Strength] {
        &self.hand_values
    }

    /// Seed the deck was shuffled with, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Builder for `MatchConfig`.
///
/// ```
/// use skirmish_engine::cards::Prize;
/// use skirmish_engine::core::MatchConfig;
///
/// let config = MatchConfig::builder()
///     .player_count(3)
///     .prizes(vec![Prize::new("P1", 1), Prize::new("P2", 2)])
///     .hand_values(vec![1, 2, 3])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.player_count(), 3);
/// assert_eq!(config.prizes().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct MatchConfigBuilder {
    player_count: usize,
    prizes: Option<Vec<Prize>>,
    hand_values: Option<Vec<Strength>>,
    seed: Option<u64>,
}

impl Default for MatchConfigBuilder {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYER_COUNT,
            prizes: None,
            hand_values: None,
            seed: None,
        }
    }
}

impl MatchConfigBuilder {
    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Use these prizes as the deck. Unset means `default_deck()`.
    #[must_use]
    pub fn prizes(mut self, prizes: Vec<Prize>) -> Self {
        self.prizes = Some(prizes);
        self
    }

    /// Hand every player starts with. Unset means `1..=15`.
    #[must_use]
    pub fn hand_values(mut self, values: Vec<Strength>) -> Self {
        self.hand_values = Some(values);
        self
    }

    /// Shuffle the deck with this seed at build time.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and build. An explicitly empty deck or hand is an error.
    pub fn build(self) -> Result<MatchConfig, ConfigError> {
        if self.player_count < 2 {
            return Err(ConfigError::TooFewPlayers(self.player_count));
        }
        if self.player_count > 255 {
            return Err(ConfigError::TooManyPlayers(self.player_count));
        }

        let mut prizes = self.prizes.unwrap_or_else(default_deck);
        if prizes.is_empty() {
            return Err(ConfigError::EmptyPrizeDeck);
        }
        if let Some(pos) = prizes.iter().position(|p| p.id.is_empty()) {
            return Err(ConfigError::EmptyPrizeId(pos));
        }

        let hand_values = self.hand_values.unwrap_or_else(default_hand);
        if hand_values.is_empty() {
            return Err(ConfigError::EmptyHand);
        }

        if let Some(seed) = self.seed {
            GameRng::new(seed).for_context("prize_deck").shuffle(&mut prizes);
        }

        Ok(MatchConfig {
            player_count: self.player_count,
            prizes,
            hand_values,
            seed: self.seed,
        })
    }
}

/// Default hand: `1..=15`.
#[must_use]
pub fn default_hand() -> Vec<Strength> {
    (1..=DEFAULT_TOP_CARD).collect()
}

/// Default deck: five prizes each of 1, 2 and 3 VP, ids `P1..P15`, with
/// categories cycling through the base-game categories.
#[must_use]
pub fn default_deck() -> Vec<Prize> {
    (1..=3i64)
        .flat_map(|vp| std::iter::repeat(vp).take(DEFAULT_COPIES_PER_VALUE))
        .enumerate()
        .map(|(i, vp)| {
            let n = i + 1;
            Prize::new(format!("P{}", n), vp)
                .with_name(format!("Prize {}", n))
                .with_class(PrizeClass::BASE[i % PrizeClass::BASE.len()])
        })
        .collect()
}
