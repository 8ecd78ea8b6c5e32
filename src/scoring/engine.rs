//! Final scoring.
//!
//! Per player, independently:
//! 1. claimed prizes grouped by category; unclassed prizes form their own bucket
//! 2. each classed bucket's VP times the player's multiplier for that category
//! 3. unclassed VP added as printed
//! 4. set-bonus VP from every `ClassSetBonus` ability on a claimed prize,
//!    added last and never multiplied

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{resolve_multiplier, total_vp, Prize, PrizeClass};
use crate::core::{MatchState, PlayerId, PlayerMap};

/// How a player's final score is made up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Classed VP after multipliers.
    pub classed: f64,
    /// Unclassed VP, never multiplied.
    pub unclassed: f64,
    /// Flat set-bonus VP, never multiplied.
    pub set_bonus: f64,
    pub total: f64,
}

/// Read-only scoring pass over a match state.
///
/// Works on any state, terminal or not; it never mutates.
///
/// ```
/// use skirmish_engine::battle::BattleEngine;
/// use skirmish_engine::cards::{MultiplierTable, Prize, PrizeClass};
/// use skirmish_engine::core::{MatchConfig, PlayerId};
/// use skirmish_engine::scoring::ScoringEngine;
///
/// let config = MatchConfig::builder()
///     .prizes(vec![Prize::new("M", 3).with_class(PrizeClass::Mining)])
///     .hand_values(vec![1, 2])
///     .build()
///     .unwrap();
/// let engine = BattleEngine::new();
/// let mut state = engine.start_new_game(&config);
/// let corp = MultiplierTable::new("C", "Miners").with_multiplier(PrizeClass::Mining, 2.0);
/// state.assign_multiplier_table(PlayerId::new(1), corp).unwrap();
///
/// engine.play_card(&mut state, PlayerId::new(1), 2).unwrap();
/// engine.play_card(&mut state, PlayerId::new(2), 1).unwrap();
///
/// let scores = ScoringEngine::new().final_scores(&state);
/// assert_eq!(scores[PlayerId::new(1)], 6.0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Final score per seat.
    #[must_use]
    pub fn final_scores(&self, state: &MatchState) -> PlayerMap<f64> {
        state
            .claimed_piles()
            .map(|player, _| self.breakdown(state, player).total)
    }

    /// Printed VP per seat: no multipliers, no bonuses.
    #[must_use]
    pub fn raw_scores(&self, state: &MatchState) -> PlayerMap<i64> {
        state
            .claimed_piles()
            .map(|_, pile| total_vp(pile))
    }

    /// Score components for one seat. An unseated player scores zero.
    #[must_use]
    pub fn breakdown(&self, state: &MatchState, player: PlayerId) -> ScoreBreakdown {
        let Some(pile) = state.claimed(player) else {
            return ScoreBreakdown::default();
        };
        let table = state.multiplier_table(player);

        let mut by_class: FxHashMap<PrizeClass, i64> = FxHashMap::default();
        let mut unclassed = 0i64;
        for prize in pile {
            let bucket = match prize.class {
                Some(class) => by_class.entry(class).or_insert(0),
                None => &mut unclassed,
            };
            *bucket = bucket.saturating_add(prize.victory_points);
        }

        let classed: f64 = by_class
            .iter()
            .map(|(&class, &vp)| vp as f64 * resolve_multiplier(table, Some(class)))
            .sum();
        let unclassed = unclassed as f64;
        let set_bonus = set_bonus_vp(pile) as f64;

        ScoreBreakdown {
            classed,
            unclassed,
            set_bonus,
            total: classed + unclassed + set_bonus,
        }
    }
}

/// Flat VP from every set-bonus ability on the pile, counted against the same pile.
fn set_bonus_vp(pile: &Vector<Prize>) -> i64 {
    pile.iter()
        .flat_map(|prize| prize.abilities.iter())
        .filter_map(|ability| ability.set_bonus())
        .map(|bonus| {
            let count = pile.iter().filter(|p| p.class == Some(bonus.class)).count();
            bonus.bonus_for(u32::try_from(count).unwrap_or(u32::MAX))
        })
        .fold(0i64, i64::saturating_add)
}
