//! The battle engine: match entry point and per-action state transitions.

use super::resolve::{self, BattleOutcome};
use super::termination;
use crate::cards::{Prize, SpecialUnit};
use crate::core::{
    Action, EndReason, EngineError, IllegalAction, MatchConfig, MatchState, PlayerId, PotSummary,
    Strength,
};
use crate::rules::{GameResult, RulesEngine};
use crate::scoring::ScoringEngine;

/// Stateless battle engine.
///
/// Every operation takes the match state explicitly. Operations validate
/// before they mutate: a non-fatal error leaves the state exactly as it was.
///
/// ```
/// use skirmish_engine::battle::BattleEngine;
/// use skirmish_engine::cards::Prize;
/// use skirmish_engine::core::{MatchConfig, PlayerId};
///
/// let config = MatchConfig::builder()
///     .prizes(vec![Prize::new("P1", 1), Prize::new("P2", 2)])
///     .build()
///     .unwrap();
/// let engine = BattleEngine::new();
/// let mut state = engine.start_new_game(&config);
///
/// engine.play_card(&mut state, PlayerId::new(1), 5).unwrap();
/// engine.play_card(&mut state, PlayerId::new(2), 3).unwrap();
///
/// let pile = state.claimed(PlayerId::new(1)).unwrap();
/// assert_eq!(pile[0].id, "P1");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BattleEngine;

impl BattleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Create a fresh match from a validated configuration.
    #[must_use]
    pub fn start_new_game(&self, config: &MatchConfig) -> MatchState {
        log::debug!(
            "new match: {} players, {} prizes, {} cards per hand",
            config.player_count(),
            config.prizes().len(),
            config.hand_values().len()
        );
        MatchState::new(config)
    }

    // === Actions ===

    /// Commit a hand card to the current battle.
    ///
    /// Resolves the battle once every seat has committed.
    pub fn play_card(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        value: Strength,
    ) -> Result<Option<BattleOutcome>, EngineError> {
        check_can_commit(state, player)?;

        if state.hand(player).is_some_and(<[Strength]>::is_empty) {
            log::error!("{} tried to play from an empty hand", player);
            state.terminate(EndReason::PlayerOutOfCardsEarly);
            return Err(EngineError::OutOfCardsEarly { player: Some(player) });
        }
        if !state.holds_card(player, value) {
            return Err(IllegalAction::CardNotInHand { player, value }.into());
        }

        state.prime_pot();
        state.remove_from_hand(player, value);
        state.commit(player, value, None);
        log::trace!("{} commits card {}", player, value);

        self.resolve_if_ready(state)
    }

    /// Commit an owned special unit to the current battle. The unit is spent.
    pub fn play_special(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        id: &str,
    ) -> Result<Option<BattleOutcome>, EngineError> {
        check_can_commit(state, player)?;

        let Some(unit) = state.take_special(player, id) else {
            return Err(IllegalAction::SpecialNotOwned { player, id: id.to_string() }.into());
        };

        state.prime_pot();
        let strength = unit.base_strength;
        log::trace!("{} commits special {} at base {}", player, unit, strength);
        state.commit(player, strength, Some(unit));

        self.resolve_if_ready(state)
    }

    /// Give a special unit to the winner of an out-of-band bid.
    ///
    /// The bid card leaves the winner's hand; losing bidders keep theirs.
    pub fn award_special(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        unit: SpecialUnit,
        bid_value: Strength,
    ) -> Result<(), EngineError> {
        if state.is_game_over() {
            return Err(EngineError::MatchOver);
        }
        state.check_seat(player)?;
        if !state.holds_card(player, bid_value) {
            return Err(EngineError::BidNotHeld { player, value: bid_value });
        }
        state.check_special_unowned(&unit.id)?;

        state.remove_from_hand(player, bid_value);
        log::debug!("{} wins {} with a bid of {}", player, unit, bid_value);
        state.add_special(player, unit);
        Ok(())
    }

    /// Dispatch a battle action.
    pub fn apply_action(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        action: &Action,
    ) -> Result<Option<BattleOutcome>, EngineError> {
        match action {
            Action::PlayCard(value) => self.play_card(state, player, *value),
            Action::PlaySpecial(id) => self.play_special(state, player, id),
        }
    }

    fn resolve_if_ready(&self, state: &mut MatchState) -> Result<Option<BattleOutcome>, EngineError> {
        if !state.all_committed() {
            return Ok(None);
        }
        let outcome = resolve::resolve_battle(state);
        termination::check_end_of_game(state)?;
        Ok(Some(outcome))
    }

    // === Queries ===

    /// Hand values the player may play. Empty once the match is over.
    #[must_use]
    pub fn legal_cards(&self, state: &MatchState, player: PlayerId) -> Vec<Strength> {
        if state.is_game_over() {
            return Vec::new();
        }
        state.hand(player).map(<[Strength]>::to_vec).unwrap_or_default()
    }

    /// Every action the player may take now: one per distinct hand value,
    /// then one per owned special unit.
    #[must_use]
    pub fn legal_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action> {
        if state.is_game_over() || !state.is_seated(player) || state.has_committed(player) {
            return Vec::new();
        }

        let mut values = self.legal_cards(state, player);
        values.sort_unstable();
        values.dedup();

        let specials = state.specials(player).unwrap_or_default();
        let mut actions = Vec::with_capacity(values.len() + specials.len());
        actions.extend(values.into_iter().map(Action::PlayCard));
        actions.extend(specials.iter().map(|u| Action::play_special(u.id.as_str())));
        actions
    }

    #[must_use]
    pub fn pot_total_vp(&self, state: &MatchState) -> i64 {
        state.pot_total_vp()
    }

    #[must_use]
    pub fn pot_summary(&self, state: &MatchState) -> PotSummary {
        state.pot_summary()
    }

    #[must_use]
    pub fn peek_next_prize<'a>(&self, state: &'a MatchState) -> Option<&'a Prize> {
        state.peek_next_prize()
    }
}

impl RulesEngine for BattleEngine {
    fn legal_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action> {
        BattleEngine::legal_actions(self, state, player)
    }

    fn apply_action(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), EngineError> {
        BattleEngine::apply_action(self, state, player, action).map(|_| ())
    }

    /// Winner(s) by final score once the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<GameResult> {
        if !state.is_game_over() {
            return None;
        }
        let scores = ScoringEngine::new().final_scores(state);
        Some(GameResult::from_scores(scores.iter().map(|(p, &s)| (p, s))))
    }
}

/// Shared commit preconditions: live match, seated player, open slot.
fn check_can_commit(state: &MatchState, player: PlayerId) -> Result<(), EngineError> {
    if state.is_game_over() {
        return Err(EngineError::MatchOver);
    }
    state.check_seat(player)?;
    if state.has_committed(player) {
        return Err(IllegalAction::AlreadyCommitted(player).into());
    }
    Ok(())
}
