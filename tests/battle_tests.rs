//! Battle resolution tests.
//!
//! These tests drive whole battles through the public `BattleEngine` API:
//! pot priming, single-winner settlement, tie escalation, on-claim
//! abilities and end-of-game detection.

use skirmish_engine::battle::{BattleEngine, BattleOutcome};
use skirmish_engine::cards::{Prize, PrizeAbility};
use skirmish_engine::core::{
    Action, EndReason, EngineError, MatchConfig, MatchState, PlayerId, SnapshotError,
};
use skirmish_engine::scoring::ScoringEngine;

fn p(seat: u8) -> PlayerId {
    PlayerId::new(seat)
}

fn three_prizes() -> Vec<Prize> {
    vec![Prize::new("P1", 1), Prize::new("P2", 2), Prize::new("P3", 3)]
}

fn start(prizes: Vec<Prize>, hand: Vec<i32>) -> (BattleEngine, MatchState) {
    let config = MatchConfig::builder()
        .prizes(prizes)
        .hand_values(hand)
        .build()
        .unwrap();
    let engine = BattleEngine::new();
    let state = engine.start_new_game(&config);
    (engine, state)
}

fn ids(prizes: &im::Vector<Prize>) -> Vec<&str> {
    prizes.iter().map(|p| p.id.as_str()).collect()
}

/// Play one full two-seat battle.
fn battle(engine: &BattleEngine, state: &mut MatchState, a: i32, b: i32) -> Option<BattleOutcome> {
    engine.play_card(state, p(1), a).unwrap();
    engine.play_card(state, p(2), b).unwrap()
}

/// Higher card takes the single prize in the pot.
#[test]
fn test_single_winner_claims_pot() {
    let (engine, mut state) = start(three_prizes(), (1..=15).collect());

    let outcome = battle(&engine, &mut state, 5, 3);

    assert_eq!(outcome, Some(BattleOutcome::Won { winner: p(1), claimed: 1 }));
    assert_eq!(ids(state.claimed(p(1)).unwrap()), vec!["P1"]);
    assert!(state.claimed(p(2)).unwrap().is_empty());
    assert!(state.pot().is_empty());
    assert!(!state.holds_card(p(1), 5));
    assert!(!state.holds_card(p(2), 3));
    assert_eq!(state.hand(p(1)).unwrap().len(), 14);
    assert!(!state.is_game_over());
}

/// A tie adds the next prize; the next win takes both, in reveal order.
#[test]
fn test_tie_then_win_takes_whole_pot() {
    let (engine, mut state) = start(three_prizes(), (1..=15).collect());

    assert_eq!(battle(&engine, &mut state, 5, 5), Some(BattleOutcome::Escalated));
    assert_eq!(ids(state.pot()), vec!["P1", "P2"]);
    assert!(state.claimed(p(1)).unwrap().is_empty());
    assert!(state.claimed(p(2)).unwrap().is_empty());

    battle(&engine, &mut state, 2, 1);

    assert_eq!(ids(state.claimed(p(1)).unwrap()), vec!["P1", "P2"]);
    assert!(state.pot().is_empty());
}

/// Repeated ties keep growing the pot until someone wins it all.
#[test]
fn test_tie_chain_accumulates() {
    let prizes: Vec<Prize> = (1..=5).map(|i| Prize::new(format!("P{}", i), i)).collect();
    let (engine, mut state) = start(prizes, (1..=15).collect());

    for value in [15, 14, 13] {
        battle(&engine, &mut state, value, value);
    }
    assert_eq!(ids(state.pot()), vec!["P1", "P2", "P3", "P4"]);
    assert_eq!(engine.pot_total_vp(&state), 10);

    battle(&engine, &mut state, 1, 12);

    assert_eq!(ids(state.claimed(p(2)).unwrap()), vec!["P1", "P2", "P3", "P4"]);
    assert_eq!(engine.peek_next_prize(&state).map(|p| p.id.as_str()), Some("P5"));
}

/// Ties that exhaust the deck discard the pot and end the match.
#[test]
fn test_final_tie_discards_pot() {
    let (engine, mut state) = start(
        vec![Prize::new("P1", 1), Prize::new("P2", 2)],
        vec![1, 2, 3],
    );

    assert_eq!(battle(&engine, &mut state, 1, 1), Some(BattleOutcome::Escalated));
    assert_eq!(battle(&engine, &mut state, 2, 2), Some(BattleOutcome::PotDiscarded));

    assert!(state.is_game_over());
    assert_eq!(state.end_reason(), Some(EndReason::FinalTiePotDiscarded));
    assert!(state.pot().is_empty());
    assert_eq!(ids(state.discarded()), vec!["P1", "P2"]);

    let scores = ScoringEngine::new().final_scores(&state);
    assert_eq!(scores[p(1)], 0.0);
    assert_eq!(scores[p(2)], 0.0);
}

/// Winning a double-next prize also takes the following prize at double value.
#[test]
fn test_double_next_prize() {
    let prizes = vec![
        Prize::new("P1", 1).with_ability(PrizeAbility::double_next()),
        Prize::new("P2", 2),
        Prize::new("P3", 3),
    ];
    let (engine, mut state) = start(prizes, (1..=15).collect());

    battle(&engine, &mut state, 9, 4);

    let pile = state.claimed(p(1)).unwrap();
    assert_eq!(ids(pile), vec!["P1", "P2"]);
    assert_eq!(pile[0].victory_points, 1);
    assert_eq!(pile[1].victory_points, 4);
    assert_eq!(state.deck_cursor(), 2);

    // Next battle fights over P3
    engine.play_card(&mut state, p(1), 1).unwrap();
    assert_eq!(ids(state.pot()), vec!["P3"]);
}

/// Every hand empty with every prize claimed is a normal end.
#[test]
fn test_normal_end() {
    let (engine, mut state) = start(vec![Prize::new("P1", 1), Prize::new("P2", 2)], vec![1, 2]);

    battle(&engine, &mut state, 2, 1);
    battle(&engine, &mut state, 1, 2);

    assert!(state.is_game_over());
    assert_eq!(state.end_reason(), Some(EndReason::Normal));
    assert_eq!(ids(state.claimed(p(1)).unwrap()), vec!["P1"]);
    assert_eq!(ids(state.claimed(p(2)).unwrap()), vec!["P2"]);
}

/// Hands running out with prizes left in the deck.
#[test]
fn test_hands_exhausted_with_prizes_remaining() {
    let (engine, mut state) = start(three_prizes(), vec![4]);

    battle(&engine, &mut state, 4, 4);

    // The tie revealed P2, then hands ran out
    assert!(state.is_game_over());
    assert_eq!(state.end_reason(), Some(EndReason::ShipsExhaustedPrizesRemaining));
    assert_eq!(ids(state.pot()), vec!["P1", "P2"]);
}

/// After the match ends, battle actions are rejected and change nothing.
#[test]
fn test_no_actions_after_game_over() {
    let (engine, mut state) = start(vec![Prize::new("P1", 1)], vec![1, 2]);
    battle(&engine, &mut state, 1, 1);
    assert!(state.is_game_over());

    let before = state.clone();

    assert_eq!(engine.play_card(&mut state, p(1), 2), Err(EngineError::MatchOver));
    assert_eq!(
        engine.apply_action(&mut state, p(2), &Action::play_special("M1")),
        Err(EngineError::MatchOver)
    );
    assert!(engine.legal_actions(&state, p(1)).is_empty());
    assert!(engine.legal_cards(&state, p(2)).is_empty());
    assert_eq!(state, before);
}

/// Cards held plus prizes claimed never increases.
#[test]
fn test_card_count_conservation() {
    let (engine, mut state) = start(three_prizes(), (1..=15).collect());
    let initial = state.card_count();

    let mut last = initial;
    for (a, b) in [(7, 7), (3, 9), (15, 1), (2, 2)] {
        battle(&engine, &mut state, a, b);
        assert!(state.card_count() <= last);
        last = state.card_count();
    }

    // Every prize is in exactly one place
    let placed = state.remaining_deck().count()
        + state.pot().len()
        + state.discarded().len()
        + state.claimed_piles().values().map(|c| c.len()).sum::<usize>();
    assert_eq!(placed, 3);
}

/// A mid-match snapshot restores to an equivalent state.
#[test]
fn test_snapshot_round_trip() {
    let (engine, mut state) = start(three_prizes(), (1..=15).collect());
    battle(&engine, &mut state, 8, 3);
    engine.play_card(&mut state, p(2), 10).unwrap();

    let bytes = state.to_bytes().unwrap();
    let restored = MatchState::from_bytes(&bytes).unwrap();

    assert_eq!(restored, state);
    assert_eq!(engine.legal_actions(&restored, p(1)), engine.legal_actions(&state, p(1)));
    assert_eq!(
        ScoringEngine::new().final_scores(&restored),
        ScoringEngine::new().final_scores(&state)
    );

    assert!(matches!(
        MatchState::from_bytes(&bytes[..bytes.len() / 2]),
        Err(SnapshotError::Decode(_))
    ));
}
