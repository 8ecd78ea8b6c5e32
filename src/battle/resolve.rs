//! Battle resolution.
//!
//! Runs once every seat has a pending play:
//! 1. pre-battle special effects (pot swap)
//! 2. base strengths
//! 3. conditional strength overrides (against base strengths)
//! 4. winner set, narrowed by a tie-break ability if exactly one tied seat has one
//! 5. pending plays cleared
//! 6. single winner takes the pot in order, firing on-claim abilities
//! 7. unresolved tie escalates the pot, or discards it and ends the match

use super::abilities;
use crate::core::{EndReason, MatchState, PlayerId};

/// How a battle settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleOutcome {
    /// One seat claimed the whole pot.
    Won { winner: PlayerId, claimed: usize },
    /// Tie; one more prize joined the pot.
    Escalated,
    /// Tie with nothing left to reveal; the pot was discarded and the match ended.
    PotDiscarded,
}

pub(crate) fn resolve_battle(state: &mut MatchState) -> BattleOutcome {
    abilities::apply_pre_battle(state);

    let base = abilities::base_strengths(state);
    let effective = abilities::effective_strengths(state, &base);
    let winners = abilities::break_tie(state, abilities::top_seats(&effective));

    log::debug!(
        "battle: effective strengths {:?}, top seats {:?}",
        effective.values().collect::<Vec<_>>(),
        winners
    );

    state.clear_pending();

    if let [winner] = winners.as_slice() {
        let winner = *winner;
        let pot = state.take_pot();
        let claimed = pot.len();
        for prize in pot {
            abilities::claim_prize(state, winner, prize);
        }
        log::debug!("{} wins the battle and claims {} prize(s)", winner, claimed);
        return BattleOutcome::Won { winner, claimed };
    }

    if state.escalate_pot() {
        log::debug!("tie: pot escalates to {} prize(s)", state.pot().len());
        BattleOutcome::Escalated
    } else {
        log::debug!("tie with an exhausted deck: discarding {} prize(s)", state.pot().len());
        state.discard_pot();
        state.terminate(EndReason::FinalTiePotDiscarded);
        BattleOutcome::PotDiscarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Prize;
    use crate::core::MatchConfig;

    fn state() -> MatchState {
        let config = MatchConfig::builder()
            .prizes(vec![Prize::new("P1", 1), Prize::new("P2", 2)])
            .hand_values(vec![1, 2, 3])
            .build()
            .unwrap();
        let mut state = MatchState::new(&config);
        state.prime_pot();
        state
    }

    #[test]
    fn test_single_winner_takes_pot() {
        let mut state = state();
        state.commit(PlayerId::new(1), 3, None);
        state.commit(PlayerId::new(2), 1, None);

        let outcome = resolve_battle(&mut state);

        assert_eq!(outcome, BattleOutcome::Won { winner: PlayerId::new(1), claimed: 1 });
        assert!(state.pot().is_empty());
        assert!(!state.all_committed());
        assert_eq!(state.pending_play(PlayerId::new(1)), None);
    }

    #[test]
    fn test_tie_escalates_then_discards() {
        let mut state = state();
        state.commit(PlayerId::new(1), 2, None);
        state.commit(PlayerId::new(2), 2, None);
        assert_eq!(resolve_battle(&mut state), BattleOutcome::Escalated);
        assert_eq!(state.pot().len(), 2);

        state.commit(PlayerId::new(1), 1, None);
        state.commit(PlayerId::new(2), 1, None);
        assert_eq!(resolve_battle(&mut state), BattleOutcome::PotDiscarded);

        assert!(state.pot().is_empty());
        assert_eq!(state.discarded().len(), 2);
        assert!(state.is_game_over());
        assert_eq!(state.end_reason(), Some(EndReason::FinalTiePotDiscarded));
    }
}
