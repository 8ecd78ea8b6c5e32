//! Match state: the evolving snapshot of one match.
//!
//! ## MatchState
//!
//! - Hands: per-seat ordered strength values still held
//! - Prize deck + cursor: prizes are revealed strictly in order, once
//! - Pot: prizes at stake, in reveal order
//! - Claimed piles: per-seat, append-only
//! - Discard pile: prizes removed without being claimed
//! - Pending commitments for the current battle
//! - Termination flag and reason
//! - Multiplier-table assignments and owned special units
//!
//! Prize piles use `im` persistent vectors, so `clone()` is cheap: callers
//! wanting history or rollback keep old snapshots around.
//!
//! Every prize is in exactly one of: deck remainder, pot, one claimed pile,
//! discard pile.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::Strength;
use super::config::MatchConfig;
use super::error::{EngineError, IllegalAction, SnapshotError};
use super::player::{PlayerId, PlayerMap};
use crate::cards::{total_vp, MultiplierTable, Prize, SpecialUnit};

/// Strength values held by one player, in their original order.
pub type Hand = SmallVec<[Strength; 16]>;

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// All hands used, every prize claimed.
    Normal,
    /// Tie with nothing left to reveal; the pot was discarded.
    FinalTiePotDiscarded,
    /// All hands used while prizes were still unclaimed.
    ShipsExhaustedPrizesRemaining,
    /// Anomaly: one hand ran dry before another.
    PlayerOutOfCardsEarly,
}

impl EndReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EndReason::Normal => "normal",
            EndReason::FinalTiePotDiscarded => "final_tie_pot_discarded",
            EndReason::ShipsExhaustedPrizesRemaining => "ships_exhausted_prizes_remaining",
            EndReason::PlayerOutOfCardsEarly => "player_out_of_cards_early",
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is currently at stake.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PotSummary {
    pub prizes: Vec<Prize>,
    pub total_vp: i64,
    pub count: usize,
}

/// State of one in-progress or finished match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    player_count: usize,

    hands: PlayerMap<Hand>,

    /// Highest value in the configured starting hand.
    max_hand_value: Strength,

    /// Full deck; never reordered after setup.
    prize_deck: Vector<Prize>,

    /// Index of the next prize to reveal. Only increases.
    deck_cursor: usize,

    prize_pot: Vector<Prize>,

    claimed: PlayerMap<Vector<Prize>>,

    /// Comparable strength committed this battle.
    pending_plays: PlayerMap<Option<Strength>>,

    /// Special unit behind a pending play, if any.
    pending_specials: PlayerMap<Option<SpecialUnit>>,

    #[serde(default)]
    discarded: Vector<Prize>,

    game_over: bool,

    end_reason: Option<EndReason>,

    multiplier_tables: PlayerMap<Option<MultiplierTable>>,

    specials: PlayerMap<Vec<SpecialUnit>>,
}

impl MatchState {
    /// Fresh match: identical hands, empty pot, cursor at 0, no assignments.
    pub(crate) fn new(config: &MatchConfig) -> Self {
        let player_count = config.player_count();
        let hand: Hand = config.hand_values().iter().copied().collect();

        Self {
            player_count,
            hands: PlayerMap::with_value(player_count, hand),
            max_hand_value: config.hand_values().iter().copied().max().unwrap_or_default(),
            prize_deck: config.prizes().iter().cloned().collect(),
            deck_cursor: 0,
            prize_pot: Vector::new(),
            claimed: PlayerMap::with_default(player_count),
            pending_plays: PlayerMap::with_value(player_count, None),
            pending_specials: PlayerMap::with_value(player_count, None),
            discarded: Vector::new(),
            game_over: false,
            end_reason: None,
            multiplier_tables: PlayerMap::with_value(player_count, None),
            specials: PlayerMap::with_default(player_count),
        }
    }

    /// Highest card any player could play, fixed at setup.
    #[must_use]
    pub fn max_hand_value(&self) -> Strength {
        self.max_hand_value
    }

    // === Seats ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Iterate over all seats.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count)
    }

    #[must_use]
    pub fn is_seated(&self, player: PlayerId) -> bool {
        self.hands.contains(player)
    }

    pub(crate) fn check_seat(&self, player: PlayerId) -> Result<(), EngineError> {
        if self.is_seated(player) {
            Ok(())
        } else {
            Err(IllegalAction::UnknownPlayer(player).into())
        }
    }

    // === Hands ===

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Option<&[Strength]> {
        self.hands.get(player).map(|h| h.as_slice())
    }

    #[must_use]
    pub fn hands(&self) -> &PlayerMap<Hand> {
        &self.hands
    }

    #[must_use]
    pub fn holds_card(&self, player: PlayerId, value: Strength) -> bool {
        self.hands.get(player).is_some_and(|h| h.contains(&value))
    }

    /// Remove the first instance of `value`. Returns false if not held.
    pub(crate) fn remove_from_hand(&mut self, player: PlayerId, value: Strength) -> bool {
        let Some(hand) = self.hands.get_mut(player) else {
            return false;
        };
        match hand.iter().position(|&v| v == value) {
            Some(pos) => {
                hand.remove(pos);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn all_hands_empty(&self) -> bool {
        self.hands.values().all(|h| h.is_empty())
    }

    /// First seat with an empty hand while some other seat still holds cards.
    #[must_use]
    pub fn player_out_of_cards_early(&self) -> Option<PlayerId> {
        let any_held = self.hands.values().any(|h| !h.is_empty());
        if !any_held {
            return None;
        }
        self.hands.iter().find(|(_, h)| h.is_empty()).map(|(p, _)| p)
    }

    // === Deck ===

    /// The full deck, revealed or not.
    #[must_use]
    pub fn prize_deck(&self) -> &Vector<Prize> {
        &self.prize_deck
    }

    #[must_use]
    pub fn deck_cursor(&self) -> usize {
        self.deck_cursor
    }

    #[must_use]
    pub fn deck_exhausted(&self) -> bool {
        self.deck_cursor >= self.prize_deck.len()
    }

    /// Prizes not yet revealed.
    pub fn remaining_deck(&self) -> impl Iterator<Item = &Prize> {
        self.prize_deck.iter().skip(self.deck_cursor)
    }

    /// Next prize to be revealed, without revealing it.
    #[must_use]
    pub fn peek_next_prize(&self) -> Option<&Prize> {
        self.prize_deck.get(self.deck_cursor)
    }

    /// Reveal the next prize, advancing the cursor. `None` once exhausted.
    pub(crate) fn reveal_next(&mut self) -> Option<Prize> {
        let prize = self.prize_deck.get(self.deck_cursor)?.clone();
        self.deck_cursor += 1;
        log::trace!("revealed {} (cursor {})", prize, self.deck_cursor);
        Some(prize)
    }

    // === Pot ===

    #[must_use]
    pub fn pot(&self) -> &Vector<Prize> {
        &self.prize_pot
    }

    #[must_use]
    pub fn pot_total_vp(&self) -> i64 {
        total_vp(&self.prize_pot)
    }

    #[must_use]
    pub fn pot_summary(&self) -> PotSummary {
        PotSummary {
            prizes: self.prize_pot.iter().cloned().collect(),
            total_vp: self.pot_total_vp(),
            count: self.prize_pot.len(),
        }
    }

    /// Reveal one prize into an empty pot. An exhausted deck leaves it empty.
    pub(crate) fn prime_pot(&mut self) {
        if !self.prize_pot.is_empty() {
            return;
        }
        if let Some(prize) = self.reveal_next() {
            self.prize_pot.push_back(prize);
        }
    }

    /// Reveal the next prize onto the pot. Returns false if the deck is exhausted.
    pub(crate) fn escalate_pot(&mut self) -> bool {
        match self.reveal_next() {
            Some(prize) => {
                self.prize_pot.push_back(prize);
                true
            }
            None => false,
        }
    }

    /// Remove the most recently added pot prize.
    pub(crate) fn pop_pot(&mut self) -> Option<Prize> {
        self.prize_pot.pop_back()
    }

    pub(crate) fn take_pot(&mut self) -> Vector<Prize> {
        std::mem::take(&mut self.prize_pot)
    }

    /// Move the whole pot to the discard pile.
    pub(crate) fn discard_pot(&mut self) {
        let pot = self.take_pot();
        self.discarded.append(pot);
    }

    // === Claimed / discarded ===

    #[must_use]
    pub fn claimed(&self, player: PlayerId) -> Option<&Vector<Prize>> {
        self.claimed.get(player)
    }

    #[must_use]
    pub fn claimed_piles(&self) -> &PlayerMap<Vector<Prize>> {
        &self.claimed
    }

    pub(crate) fn claim(&mut self, player: PlayerId, prize: Prize) {
        self.claimed[player].push_back(prize);
    }

    #[must_use]
    pub fn discarded(&self) -> &Vector<Prize> {
        &self.discarded
    }

    pub(crate) fn discard(&mut self, prize: Prize) {
        self.discarded.push_back(prize);
    }

    /// Whether any prize sits outside every claimed pile.
    #[must_use]
    pub fn has_unclaimed_prizes(&self) -> bool {
        !self.deck_exhausted() || !self.prize_pot.is_empty() || !self.discarded.is_empty()
    }

    /// Cards held plus prizes claimed, across all seats.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let held: usize = self.hands.values().map(|h| h.len()).sum();
        let claimed: usize = self.claimed.values().map(|c| c.len()).sum();
        held + claimed
    }

    // === Pending commitments ===

    #[must_use]
    pub fn pending_play(&self, player: PlayerId) -> Option<Strength> {
        self.pending_plays.get(player).copied().flatten()
    }

    #[must_use]
    pub fn pending_special(&self, player: PlayerId) -> Option<&SpecialUnit> {
        self.pending_specials.get(player).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn has_committed(&self, player: PlayerId) -> bool {
        self.pending_play(player).is_some()
    }

    #[must_use]
    pub fn all_committed(&self) -> bool {
        self.pending_plays.values().all(Option::is_some)
    }

    #[must_use]
    pub fn pending_plays(&self) -> &PlayerMap<Option<Strength>> {
        &self.pending_plays
    }

    #[must_use]
    pub fn pending_specials(&self) -> &PlayerMap<Option<SpecialUnit>> {
        &self.pending_specials
    }

    pub(crate) fn commit(&mut self, player: PlayerId, strength: Strength, special: Option<SpecialUnit>) {
        self.pending_plays[player] = Some(strength);
        self.pending_specials[player] = special;
    }

    pub(crate) fn clear_pending(&mut self) {
        for (_, play) in self.pending_plays.iter_mut() {
            *play = None;
        }
        for (_, special) in self.pending_specials.iter_mut() {
            *special = None;
        }
    }

    // === Termination ===

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub(crate) fn terminate(&mut self, reason: EndReason) {
        self.game_over = true;
        self.end_reason = Some(reason);
        log::info!("match over: {}", reason);
    }

    // === Multiplier tables ===

    #[must_use]
    pub fn multiplier_table(&self, player: PlayerId) -> Option<&MultiplierTable> {
        self.multiplier_tables.get(player).and_then(Option::as_ref)
    }

    /// Assign (or replace) a seat's multiplier table.
    ///
    /// A table id can be held by one seat only.
    pub fn assign_multiplier_table(
        &mut self,
        player: PlayerId,
        table: MultiplierTable,
    ) -> Result<(), EngineError> {
        self.check_seat(player)?;
        let holder = self
            .multiplier_tables
            .iter()
            .find(|&(p, t)| p != player && t.as_ref().is_some_and(|t| t.id == table.id));
        if let Some((owner, _)) = holder {
            return Err(IllegalAction::TableAlreadyAssigned { id: table.id, owner }.into());
        }
        self.multiplier_tables[player] = Some(table);
        Ok(())
    }

    // === Special units ===

    #[must_use]
    pub fn specials(&self, player: PlayerId) -> Option<&[SpecialUnit]> {
        self.specials.get(player).map(Vec::as_slice)
    }

    /// Seat currently owning a unit with this id.
    #[must_use]
    pub fn special_owner(&self, id: &str) -> Option<PlayerId> {
        self.specials
            .iter()
            .find(|(_, units)| units.iter().any(|u| u.id == id))
            .map(|(p, _)| p)
    }

    #[must_use]
    pub fn owns_special(&self, player: PlayerId, id: &str) -> bool {
        self.specials
            .get(player)
            .is_some_and(|units| units.iter().any(|u| u.id == id))
    }

    /// Give a seat a special unit without a bid (setup, scenario seeding).
    pub fn grant_special(&mut self, player: PlayerId, unit: SpecialUnit) -> Result<(), EngineError> {
        self.check_seat(player)?;
        self.check_special_unowned(&unit.id)?;
        self.specials[player].push(unit);
        Ok(())
    }

    pub(crate) fn check_special_unowned(&self, id: &str) -> Result<(), EngineError> {
        match self.special_owner(id) {
            Some(owner) => Err(IllegalAction::SpecialAlreadyOwned { id: id.to_string(), owner }.into()),
            None => Ok(()),
        }
    }

    pub(crate) fn add_special(&mut self, player: PlayerId, unit: SpecialUnit) {
        self.specials[player].push(unit);
    }

    /// Remove and return an owned unit.
    pub(crate) fn take_special(&mut self, player: PlayerId, id: &str) -> Option<SpecialUnit> {
        let units = self.specials.get_mut(player)?;
        let pos = units.iter().position(|u| u.id == id)?;
        Some(units.remove(pos))
    }

    // === Snapshots ===

    /// Encode a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    /// Decode and validate a binary snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let state: Self = bincode::deserialize(bytes).map_err(SnapshotError::Decode)?;
        state.validate()?;
        Ok(state)
    }

    /// Check the structural consistency of a state built outside the engine.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let n = self.player_count;
        if !(2..=255).contains(&n) {
            return Err(SnapshotError::Inconsistent(format!("player_count {} out of range", n)));
        }

        let sizes = [
            ("hands", self.hands.player_count()),
            ("claimed", self.claimed.player_count()),
            ("pending_plays", self.pending_plays.player_count()),
            ("pending_specials", self.pending_specials.player_count()),
            ("multiplier_tables", self.multiplier_tables.player_count()),
            ("specials", self.specials.player_count()),
        ];
        if let Some((field, len)) = sizes.iter().find(|(_, len)| *len != n) {
            return Err(SnapshotError::Inconsistent(format!(
                "{} has {} seats, expected {}",
                field, len, n
            )));
        }

        if self.deck_cursor > self.prize_deck.len() {
            return Err(SnapshotError::Inconsistent(format!(
                "deck cursor {} beyond deck of {}",
                self.deck_cursor,
                self.prize_deck.len()
            )));
        }

        if self.end_reason.is_some() && !self.game_over {
            return Err(SnapshotError::Inconsistent("end reason set on a live match".into()));
        }

        Ok(())
    }
}
