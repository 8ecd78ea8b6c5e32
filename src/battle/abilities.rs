//! Ability dispatch, one table per trigger point.
//!
//! | Trigger          | Source        | Kinds acted on              |
//! |------------------|---------------|-----------------------------|
//! | pre-battle       | special units | `SwapPot`                   |
//! | strength override| special units | `OverpowerThreshold`        |
//! | tie-break        | special units | `WinAllTies`                |
//! | on-claim         | prizes        | `DoubleNextPrizeNoBattle`   |
//!
//! Every other kind has an explicit no-op arm at each trigger point, so a new
//! kind fails to compile until it is placed.

use smallvec::SmallVec;

use crate::cards::{Prize, PrizeAbilityKind, SpecialAbilityKind, SpecialUnit};
use crate::core::{MatchState, PlayerId, PlayerMap, Strength};

/// Seats involved in one battle. Most matches seat few players.
pub(crate) type Seats = SmallVec<[PlayerId; 4]>;

// === Pre-battle ===

/// Apply pot-modifying special abilities before strengths are compared.
///
/// A pot swap happens at most once per battle, however many players
/// committed a swapping unit.
pub(crate) fn apply_pre_battle(state: &mut MatchState) {
    let mut swap = false;

    for unit in state.pending_specials().values().flatten() {
        match unit.ability {
            SpecialAbilityKind::SwapPot => swap = true,
            SpecialAbilityKind::OverpowerThreshold
            | SpecialAbilityKind::WinAllTies
            | SpecialAbilityKind::RevealOpponentCorp
            | SpecialAbilityKind::ReturnOnce
            | SpecialAbilityKind::PeekNext => {}
        }
    }

    if swap {
        swap_pot(state);
    }
}

/// Discard the newest pot prize and reveal a replacement.
///
/// Does nothing when the pot is empty or there is nothing left to reveal.
fn swap_pot(state: &mut MatchState) {
    state.prime_pot();
    if state.pot().is_empty() || state.deck_exhausted() {
        return;
    }
    if let Some(old) = state.pop_pot() {
        log::debug!("pot swap: discarding {}", old);
        state.discard(old);
        state.escalate_pot();
    }
}

// === Strength ===

/// Strengths as committed: hand values, or a unit's base strength.
pub(crate) fn base_strengths(state: &MatchState) -> PlayerMap<Strength> {
    state.pending_plays().map(|_, play| play.unwrap_or_default())
}

/// Effective strengths after conditional overrides.
///
/// Overrides only ever read `base`, never another override's result.
pub(crate) fn effective_strengths(
    state: &MatchState,
    base: &PlayerMap<Strength>,
) -> PlayerMap<Strength> {
    base.map(|player, &strength| match state.pending_special(player) {
        Some(unit) => override_strength(unit, player, strength, base, state.max_hand_value()),
        None => strength,
    })
}

fn override_strength(
    unit: &SpecialUnit,
    player: PlayerId,
    strength: Strength,
    base: &PlayerMap<Strength>,
    max_hand_value: Strength,
) -> Strength {
    match unit.ability {
        SpecialAbilityKind::OverpowerThreshold => {
            let threshold = unit.overpower_threshold(max_hand_value);
            let triggered = base.iter().any(|(other, &s)| other != player && s == threshold);
            if triggered {
                threshold.saturating_add(1)
            } else {
                unit.fallback_strength()
            }
        }
        SpecialAbilityKind::WinAllTies
        | SpecialAbilityKind::SwapPot
        | SpecialAbilityKind::RevealOpponentCorp
        | SpecialAbilityKind::ReturnOnce
        | SpecialAbilityKind::PeekNext => strength,
    }
}

/// Every seat sharing the maximum effective strength.
pub(crate) fn top_seats(effective: &PlayerMap<Strength>) -> Seats {
    let Some(max) = effective.values().copied().max() else {
        return Seats::new();
    };
    effective
        .iter()
        .filter(|(_, &s)| s == max)
        .map(|(p, _)| p)
        .collect()
}

// === Tie-break ===

/// Narrow a tie to a single winner when exactly one tied seat forces it.
///
/// Returns the input unchanged when zero or several tied seats hold a
/// tie-break ability.
pub(crate) fn break_tie(state: &MatchState, tied: Seats) -> Seats {
    if tied.len() < 2 {
        return tied;
    }

    let breakers: Seats = tied
        .iter()
        .copied()
        .filter(|&p| state.pending_special(p).is_some_and(forces_tie_win))
        .collect();

    if breakers.len() == 1 {
        breakers
    } else {
        tied
    }
}

fn forces_tie_win(unit: &SpecialUnit) -> bool {
    match unit.ability {
        SpecialAbilityKind::WinAllTies => true,
        SpecialAbilityKind::OverpowerThreshold
        | SpecialAbilityKind::SwapPot
        | SpecialAbilityKind::RevealOpponentCorp
        | SpecialAbilityKind::ReturnOnce
        | SpecialAbilityKind::PeekNext => false,
    }
}

// === On-claim ===

/// Append `prize` to the winner's pile, then fire its on-claim abilities in order.
pub(crate) fn claim_prize(state: &mut MatchState, winner: PlayerId, prize: Prize) {
    let kinds: SmallVec<[PrizeAbilityKind; 2]> = prize.abilities.iter().map(|a| a.kind).collect();
    log::trace!("{} claims {}", winner, prize);
    state.claim(winner, prize);

    for kind in kinds {
        match kind {
            PrizeAbilityKind::DoubleNextPrizeNoBattle => double_next(state, winner),
            PrizeAbilityKind::ClassSetBonus
            | PrizeAbilityKind::ChooseClass
            | PrizeAbilityKind::LoseVictoryPoints => {}
        }
    }
}

/// Take the next deck prize at double value, skipping the pot.
///
/// The doubled prize's own on-claim abilities do not fire.
fn double_next(state: &mut MatchState, winner: PlayerId) {
    match state.reveal_next() {
        Some(next) => {
            let doubled = next.doubled();
            log::debug!("{} takes {} without a battle", winner, doubled);
            state.claim(winner, doubled);
        }
        None => log::debug!("double-next for {} found an exhausted deck", winner),
    }
}
