//! End-of-game detection after a battle that did not already end the match.

use crate::core::{EndReason, EngineError, MatchState};

/// Check, in order: a hand ran dry early (anomaly), every hand is empty, else continue.
///
/// The anomaly terminates the match and is reported as a fatal error.
pub(crate) fn check_end_of_game(state: &mut MatchState) -> Result<(), EngineError> {
    if state.is_game_over() {
        return Ok(());
    }

    if let Some(player) = state.player_out_of_cards_early() {
        log::error!("{} ran out of cards while others still hold some", player);
        state.terminate(EndReason::PlayerOutOfCardsEarly);
        return Err(EngineError::OutOfCardsEarly { player: Some(player) });
    }

    if state.all_hands_empty() {
        let reason = if state.has_unclaimed_prizes() {
            EndReason::ShipsExhaustedPrizesRemaining
        } else {
            EndReason::Normal
        };
        state.terminate(reason);
    }

    Ok(())
}
