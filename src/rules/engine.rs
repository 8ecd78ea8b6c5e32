//! Rules engine trait for drivers.
//!
//! A driver (a playout loop, a bot, a server) sees the game through this
//! trait:
//! - What actions are legal
//! - How actions modify state
//! - Who won

use crate::core::{Action, EngineError, MatchState, PlayerId};

/// Result of a finished match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single top score.
    Winner(PlayerId),
    /// Every seat shares the top score.
    Draw,
    /// Some, but not all, seats share the top score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Build a result from seats in order of their final scores.
    #[must_use]
    pub fn from_scores(scores: impl IntoIterator<Item = (PlayerId, f64)>) -> Self {
        let scores: Vec<(PlayerId, f64)> = scores.into_iter().collect();
        let top = scores.iter().map(|&(_, s)| s).fold(f64::NEG_INFINITY, f64::max);
        let winners: Vec<PlayerId> = scores
            .iter()
            .filter(|&&(_, s)| s == top)
            .map(|&(p, _)| p)
            .collect();

        match winners.as_slice() {
            [single] => GameResult::Winner(*single),
            _ if winners.len() == scores.len() => GameResult::Draw,
            _ => GameResult::Winners(winners),
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty if the player can't act right now
/// - `apply_action`: deterministic; a rejected action leaves the state as it was
///   (fatal errors excepted, see `EngineError::is_fatal`)
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    /// Enumerate all legal actions for a player.
    fn legal_actions(&self, state: &MatchState, player: PlayerId) -> Vec<Action>;

    /// Apply an action to the match state.
    fn apply_action(
        &self,
        state: &mut MatchState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), EngineError>;

    /// Check if the match is over.
    fn is_terminal(&self, state: &MatchState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Seats that still have to act in the current battle.
    fn waiting_on(&self, state: &MatchState) -> Vec<PlayerId> {
        state
            .players()
            .filter(|&p| !self.legal_actions(state, p).is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(2)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(1)));

        let shared = GameResult::Winners(vec![PlayerId::new(1), PlayerId::new(3)]);
        assert!(shared.is_winner(PlayerId::new(1)));
        assert!(!shared.is_winner(PlayerId::new(2)));
        assert!(shared.is_winner(PlayerId::new(3)));
    }

    #[test]
    fn test_game_result_from_scores() {
        let p = PlayerId::new;

        assert_eq!(
            GameResult::from_scores([(p(1), 8.0), (p(2), 3.0)]),
            GameResult::Winner(p(1))
        );
        assert_eq!(GameResult::from_scores([(p(1), 0.0), (p(2), 0.0)]), GameResult::Draw);
        assert_eq!(
            GameResult::from_scores([(p(1), 5.0), (p(2), 1.0), (p(3), 5.0)]),
            GameResult::Winners(vec![p(1), p(3)])
        );
    }
}
